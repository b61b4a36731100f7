//! Edge case tests for lcc-gen.
