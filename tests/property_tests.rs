//! Property-based tests for the Epoch lexer and recognizers
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use std::sync::Arc;

use epoch::lexer::{Lexer, Token, lex};
use epoch::parser::parse_file;
use epoch::source::SourceFile;
use proptest::prelude::*;

fn file() -> Arc<SourceFile> {
    Arc::new(SourceFile::new("prop.epoch"))
}

fn positions(tokens: &[Token]) -> Vec<(String, u32, u32)> {
    tokens.iter().map(|t| (t.text.clone(), t.line, t.column)).collect()
}

// =============================================================================
// Strategies
// =============================================================================

/// Source-like text: identifiers, numbers, punctuation, strings, comments and line breaks.
fn source_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        "[a-z_][a-z0-9_]{0,6}",
        "-?[0-9]{1,4}",
        "0x[0-9A-F]{1,4}",
        "(==|!=|\\+\\+|--|->|&&|\\+=|-=|=>|[-+*/=<>!&|.,:;(){}\\[\\]])",
        "\"[a-z ]{0,5}\"",
        "//[a-z ]{0,8}\n",
        "[ \t\n]{1,3}",
    ];
    prop::collection::vec(fragment, 0..40).prop_map(|parts| parts.concat())
}

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("Not a keyword", |s| !epoch_core::lang::keywords::is_reserved(s))
}

// =============================================================================
// Lexer properties
// =============================================================================

proptest! {
    /// Property: lexing the same text twice yields identical tokens and positions.
    #[test]
    fn lexing_is_idempotent(source in source_strategy()) {
        let first = lex(&source, file());
        let second = lex(&source, file());
        prop_assert_eq!(positions(&first), positions(&second));
    }

    /// Property: peek(k) then consume(k + 1) then peek(0) yields the token previously at offset k + 1.
    #[test]
    fn lookahead_matches_consume(source in source_strategy(), k in 0usize..8) {
        let mut lexer = Lexer::new(&source, file());
        let expected = lexer.peek(k + 1).cloned();
        let _ = lexer.peek(k);
        lexer.consume(k + 1);
        prop_assert_eq!(lexer.peek(0).cloned(), expected);
    }

    /// Property: the lazy cursor and the eager `lex` helper agree.
    #[test]
    fn lazy_and_eager_lexing_agree(source in source_strategy()) {
        let lazy: Vec<Token> = Lexer::new(&source, file()).collect();
        prop_assert_eq!(positions(&lazy), positions(&lex(&source, file())));
    }

    /// Property: tokens never contain whitespace outside string literals and come out in source order.
    #[test]
    fn tokens_are_ordered_and_trimmed(source in source_strategy()) {
        let tokens = lex(&source, file());
        for pair in tokens.windows(2) {
            prop_assert!((pair[0].line, pair[0].column) < (pair[1].line, pair[1].column));
            prop_assert!(pair[0].offset < pair[1].offset);
        }
        for tok in &tokens {
            prop_assert!(!tok.text.is_empty());
            if !tok.text.starts_with('"') {
                prop_assert!(!tok.text.chars().any(char::is_whitespace), "token {:?}", tok.text);
            }
        }
    }

    /// Property: arbitrary unicode input never panics either layer.
    #[test]
    fn arbitrary_input_does_not_panic(source in any::<String>()) {
        let _ = lex(&source, file());
        let _ = parse_file(&source, file());
    }

    /// Property: generated functions always parse and keep their parameter names visible in the body.
    #[test]
    fn generated_functions_parse(name in ident_strategy(), param in ident_strategy()) {
        prop_assume!(name != param);
        let source = format!("{name} : integer {param} -> integer out\n{{\n    out = {param} + 1\n}}\n");
        let symbols = parse_file(&source, file()).map_err(|f| TestCaseError::fail(f.error.message))?;
        prop_assert_eq!(symbols.functions.len(), 1);
        let visible: Vec<String> = symbols.scopes.visible_at(2, 4).iter().map(|v| v.name().to_string()).collect();
        prop_assert_eq!(visible, vec![param, "out".to_string()]);
    }
}
