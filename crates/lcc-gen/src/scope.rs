//! Scope chain with allocation-handle payloads.
//!
//! Same chained-scope discipline as the quaternion generator's symbol
//! tables, but what a name resolves to here is the stack slot backing it.
//! Scope nodes live in a flat arena and are retained after exit.

use inkwell::values::PointerValue;
use rustc_hash::FxHashMap;

/// Index of a scope in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// A single scope.
struct Scope<'ctx> {
    parent: Option<ScopeId>,
    bindings: FxHashMap<String, PointerValue<'ctx>>,
}

/// Arena of scopes binding names to stack allocations.
pub struct ScopeChain<'ctx> {
    scopes: Vec<Scope<'ctx>>,
    current: ScopeId,
}

impl<'ctx> ScopeChain<'ctx> {
    /// Creates a chain holding only the root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                parent: None,
                bindings: FxHashMap::default(),
            }],
            current: ScopeId(0),
        }
    }

    /// Creates a child of the current scope and makes it current.
    pub fn enter_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(self.current),
            bindings: FxHashMap::default(),
        });
        self.current = id;
        id
    }

    /// Restores the parent of the current scope.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.0 as usize].parent {
            self.current = parent;
        }
    }

    /// Binds a name in the current scope.
    ///
    /// Returns false when the name is already bound here; the existing
    /// binding is kept.
    pub fn bind(&mut self, name: &str, slot: PointerValue<'ctx>) -> bool {
        let scope = &mut self.scopes[self.current.0 as usize];
        if scope.bindings.contains_key(name) {
            return false;
        }
        scope.bindings.insert(name.to_string(), slot);
        true
    }

    /// Resolves a name against the current scope only.
    pub fn lookup_current(&self, name: &str) -> Option<PointerValue<'ctx>> {
        self.scopes[self.current.0 as usize]
            .bindings
            .get(name)
            .copied()
    }

    /// Resolves a name by walking the chain outward.
    pub fn lookup(&self, name: &str) -> Option<PointerValue<'ctx>> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if let Some(slot) = self.scopes[id.0 as usize].bindings.get(name) {
                return Some(*slot);
            }
            scope = self.scopes[id.0 as usize].parent;
        }

        None
    }
}

impl<'ctx> Default for ScopeChain<'ctx> {
    fn default() -> Self {
        Self::new()
    }
}
