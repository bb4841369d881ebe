//! Punctuation vocabulary.
//!
//! This module defines the canonical set of punctuation tokens used by the lexer/parser: delimiters, separators,
//! operator marks and the whitelisted **compound** spellings (`==`, `->`, ...).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (and trivially so; punctuation has no case).
//! - The lexer splits punctuation runs using [`is_compound`]: a run is only ever extended while the extended
//!   spelling is in the compound whitelist.
//!
//! ## Examples
//! ```rust
//! use epoch_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("->"), Some(PunctuationId::Arrow));
//! assert!(punctuation::is_compound("&&"));
//! assert!(!punctuation::is_compound("<="));
//! assert!(punctuation::is_punctuation_char('{'));
//! ```

use super::registry::Since;

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets, braces and parentheses (and `<`/`>` when used around template lists).
    Delimiter,
    /// Separators like `,`, `:` and `;`.
    Separator,
    /// Single-character operator marks.
    Mark,
    /// Whitelisted two-character spellings.
    Compound,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Lt,
    Gt,

    // Separators
    Comma,
    Colon,
    Semicolon,

    // Marks
    Dot,
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    Bang,
    Amp,
    Pipe,
    Caret,
    Percent,
    Tilde,

    // Compounds
    EqEq,
    NotEq,
    PlusPlus,
    MinusMinus,
    Arrow,
    AmpAmp,
    PlusEq,
    MinusEq,
    FatArrow,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    pub since: Since,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Delimiters
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::Lt, "<", PunctuationCategory::Delimiter),
    info(PunctuationId::Gt, ">", PunctuationCategory::Delimiter),
    // Separators
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    // Marks
    info(PunctuationId::Dot, ".", PunctuationCategory::Mark),
    info(PunctuationId::Plus, "+", PunctuationCategory::Mark),
    info(PunctuationId::Minus, "-", PunctuationCategory::Mark),
    info(PunctuationId::Star, "*", PunctuationCategory::Mark),
    info(PunctuationId::Slash, "/", PunctuationCategory::Mark),
    info(PunctuationId::Eq, "=", PunctuationCategory::Mark),
    info(PunctuationId::Bang, "!", PunctuationCategory::Mark),
    info(PunctuationId::Amp, "&", PunctuationCategory::Mark),
    info(PunctuationId::Pipe, "|", PunctuationCategory::Mark),
    info(PunctuationId::Caret, "^", PunctuationCategory::Mark),
    info(PunctuationId::Percent, "%", PunctuationCategory::Mark),
    info(PunctuationId::Tilde, "~", PunctuationCategory::Mark),
    // Compounds
    info(PunctuationId::EqEq, "==", PunctuationCategory::Compound),
    info(PunctuationId::NotEq, "!=", PunctuationCategory::Compound),
    info(PunctuationId::PlusPlus, "++", PunctuationCategory::Compound),
    info(PunctuationId::MinusMinus, "--", PunctuationCategory::Compound),
    info(PunctuationId::Arrow, "->", PunctuationCategory::Compound),
    info(PunctuationId::AmpAmp, "&&", PunctuationCategory::Compound),
    info(PunctuationId::PlusEq, "+=", PunctuationCategory::Compound),
    info(PunctuationId::MinusEq, "-=", PunctuationCategory::Compound),
    info(PunctuationId::FatArrow, "=>", PunctuationCategory::Compound),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Return `true` if `c` starts (or is) a punctuation token.
pub fn is_punctuation_char(c: char) -> bool {
    matches!(
        c,
        '(' | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | '<'
            | '>'
            | ','
            | ':'
            | ';'
            | '.'
            | '+'
            | '-'
            | '*'
            | '/'
            | '='
            | '!'
            | '&'
            | '|'
            | '^'
            | '%'
            | '~'
    )
}

/// Return `true` if `s` is one of the whitelisted compound spellings.
pub fn is_compound(s: &str) -> bool {
    PUNCTUATION
        .iter()
        .any(|p| p.category == PunctuationCategory::Compound && p.canonical == s)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        since: Since(1, 0),
    }
}
