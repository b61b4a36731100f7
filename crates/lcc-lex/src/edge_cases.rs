//! Edge case and property tests for lcc-lex.

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::{tokenize, Lexer, SourceReader};

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_edge_whitespace_only() {
        let tokens = tokenize("  \t \x0b\x0c ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10_000);
        let tokens = tokenize(&format!("int {} ;", name));
        assert_eq!(tokens[1].content_str(), name);
    }

    #[test]
    fn test_edge_long_number() {
        let digits = "9".repeat(1_000);
        let tokens = tokenize(&digits);
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].content_str(), digits);
    }

    #[test]
    fn test_edge_crlf_carriage_return_is_invalid() {
        // \r is not in the space set of this dialect.
        let kinds: Vec<_> = tokenize("a\r\nb").iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Invalid,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_edge_comment_only_file() {
        let tokens = tokenize("/* nothing here */");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_edge_many_newlines() {
        let tokens = tokenize("\n\n\nint\n\n");
        let kw = &tokens[0];
        assert_eq!(kw.kind, TokenKind::KwInt);
        assert_eq!(kw.position.line, 4);
        assert_eq!(kw.position.column, 1);
    }

    #[test]
    fn test_edge_adjacent_comments_and_tokens() {
        let kinds: Vec<_> = tokenize("a/*x*/b//y\nc")
            .iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_edge_identifier_bytes_invariant() {
        // Every identifier token contains only bytes from its alphabet.
        let tokens = tokenize("foo _bar $qux a1b2 int x9");
        for token in tokens.iter().filter(|t| t.kind == TokenKind::Identifier) {
            assert!(!token.content_str().is_empty());
            for b in token.content_str().bytes() {
                assert!(
                    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80,
                    "unexpected identifier byte {b:#x}"
                );
            }
        }
    }

    #[test]
    fn test_edge_trivia_retained_when_requested() {
        let tokens = Lexer::new(SourceReader::from_bytes(b"a b\nc".to_vec()))
            .keep_trivia(true)
            .run();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    // ==================== PROPERTIES ====================

    mod properties {
        use proptest::prelude::*;

        use crate::token::TokenKind;
        use crate::tokenize;

        /// A small vocabulary of spellable tokens for round-trip checks.
        fn spelling_strategy() -> impl Strategy<Value = String> {
            let fixed = prop::sample::select(vec![
                "int", "float", "char", "void", "if", "else", "while", "return", "==", "=",
                "<=", "<", ">=", ">", "+", "-", "*", "(", ")", "{", "}", "[", "]", ";", ",",
            ]);

            prop_oneof![
                // Identifiers and integers.
                "[a-z][a-z0-9_]{0,8}",
                "(0|[1-9][0-9]{0,6})",
                fixed.prop_map(str::to_string),
            ]
        }

        /// Re-spells a lexed token stream with single spaces between tokens.
        fn respell(tokens: &[crate::Token]) -> String {
            tokens
                .iter()
                .filter(|t| t.kind != TokenKind::Eof)
                .map(|t| {
                    t.kind
                        .spelling()
                        .map(str::to_string)
                        .unwrap_or_else(|| t.content_str().to_string())
                })
                .collect::<Vec<_>>()
                .join(" ")
        }

        proptest! {
            #[test]
            fn prop_roundtrip_retokenizes_identically(
                spellings in proptest::collection::vec(spelling_strategy(), 0..40)
            ) {
                let source = spellings.join(" ");
                let first = tokenize(&source);
                let second = tokenize(&respell(&first));

                prop_assert_eq!(first.len(), second.len());
                for (a, b) in first.iter().zip(second.iter()) {
                    prop_assert_eq!(a.kind, b.kind);
                    prop_assert_eq!(&a.content, &b.content);
                }
            }

            #[test]
            fn prop_single_trailing_eof(source in "[ -~\n]{0,200}") {
                let tokens = tokenize(&source);
                let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
                prop_assert_eq!(eof_count, 1);
                prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
            }

            #[test]
            fn prop_sequence_numbers_strictly_increase(source in "[ -~\n]{0,200}") {
                let tokens = tokenize(&source);
                for pair in tokens.windows(2) {
                    prop_assert!(pair[0].number < pair[1].number);
                }
            }
        }
    }
}
