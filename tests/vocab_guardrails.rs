//! Vocabulary guardrails.
//!
//! Keywords, builtin types and punctuation are defined once in `epoch_core::lang`. The lexer has to produce exactly
//! those spellings, and the recognizers and symbol table have to ask the registries instead of comparing token
//! text against string literals.

use std::sync::Arc;

use epoch::lexer::{TokenKind, lex};
use epoch::source::SourceFile;
use epoch_core::lang::{keywords, punctuation, types};

/// Modules that branch on vocabulary. Registries and test chunks are not listed.
const VOCABULARY_USERS: &[(&str, &str)] = &[
    ("lexer/mod.rs", include_str!("../crates/epoch_syntax/src/lexer/mod.rs")),
    ("token_helpers.rs", include_str!("../crates/epoch_syntax/src/token_helpers.rs")),
    ("parser/core.rs", include_str!("../crates/epoch_syntax/src/parser/core.rs")),
    ("parser/helpers.rs", include_str!("../crates/epoch_syntax/src/parser/helpers.rs")),
    ("parser/decl.rs", include_str!("../crates/epoch_syntax/src/parser/decl.rs")),
    ("parser/types.rs", include_str!("../crates/epoch_syntax/src/parser/types.rs")),
    ("parser/stmts.rs", include_str!("../crates/epoch_syntax/src/parser/stmts.rs")),
    ("parser/expr.rs", include_str!("../crates/epoch_syntax/src/parser/expr.rs")),
    ("project/symbols.rs", include_str!("../src/project/symbols.rs")),
];

fn lex_one(text: &str) -> Vec<epoch::lexer::Token> {
    lex(text, Arc::new(SourceFile::anonymous()))
}

// ============================================================================
// Lexer and registries agree
// ============================================================================

#[test]
fn every_keyword_lexes_as_itself() {
    for info in keywords::KEYWORDS {
        let tokens = lex_one(info.canonical);
        assert_eq!(tokens.len(), 1, "`{}` split into {tokens:?}", info.canonical);
        assert!(tokens[0].is_keyword(info.id), "`{}` not recognized as {:?}", info.canonical, info.id);
    }
}

#[test]
fn every_punctuation_lexes_as_one_token() {
    for info in punctuation::PUNCTUATION {
        let tokens = lex_one(info.canonical);
        assert_eq!(tokens.len(), 1, "`{}` split into {tokens:?}", info.canonical);
        assert_eq!(tokens[0].kind, TokenKind::Punctuation(info.id), "`{}`", info.canonical);
    }
}

#[test]
fn every_builtin_type_can_start_a_type_reference() {
    for info in types::BUILTIN_TYPES {
        let tokens = lex_one(info.canonical);
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_type_name(), "`{}` is not usable as a type", info.canonical);
    }
}

// ============================================================================
// No string comparisons on vocabulary
// ============================================================================

/// Spellings that must never appear as `== "..."` or as a `"..." =>` match arm outside the registries.
fn guarded_spellings() -> Vec<&'static str> {
    let mut spellings: Vec<&'static str> = keywords::KEYWORDS.iter().map(|k| k.canonical).collect();
    spellings.extend(types::BUILTIN_TYPES.iter().map(|t| t.canonical));
    spellings.extend(
        punctuation::PUNCTUATION
            .iter()
            .map(|p| p.canonical)
            .filter(|c| punctuation::is_compound(c)),
    );
    spellings.sort_unstable();
    spellings.dedup();
    spellings
}

fn stringly_checks(source: &str, spellings: &[&str]) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .filter(|(_, line)| {
            line.contains(".text == \"")
                || spellings
                    .iter()
                    .any(|s| line.contains(&format!("== \"{s}\"")) || line.contains(&format!("\"{s}\" =>")))
        })
        .map(|(idx, line)| (idx + 1, line.trim().to_string()))
        .collect()
}

#[test]
fn recognizers_use_registries_for_vocabulary() {
    let spellings = guarded_spellings();
    let offenders: Vec<String> = VOCABULARY_USERS
        .iter()
        .flat_map(|(name, source)| {
            stringly_checks(source, &spellings)
                .into_iter()
                .map(move |(line, text)| format!("{name}:{line}: {text}"))
        })
        .collect();
    assert!(
        offenders.is_empty(),
        "compare through epoch_core::lang ids instead of spellings:\n{}",
        offenders.join("\n")
    );
}

#[test]
fn stringly_check_detection() {
    let spellings = guarded_spellings();
    assert_eq!(stringly_checks("if tok.text == \"while\" {", &spellings).len(), 1);
    assert_eq!(stringly_checks("    \"->\" => arrow(),", &spellings).len(), 1);
    assert_eq!(stringly_checks("// tok.text == \"if\"", &spellings).len(), 0);
    assert_eq!(stringly_checks("tok.is_keyword(KeywordId::While)", &spellings).len(), 0);
}
