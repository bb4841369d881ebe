//! Define the reserved keyword vocabulary for the Epoch language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings, categories and provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Epoch keywords are *contextual*: the lexer emits them as identifier tokens and the recognizers decide whether a
//!   spelling acts as a keyword at a given position. This registry only answers "is this spelling reserved".
//!
//! ## Examples
//! ```rust
//! use epoch_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("while"), Some(KeywordId::While));
//! assert_eq!(keywords::from_str("While"), None);
//! assert_eq!(keywords::as_str(KeywordId::Alias), "alias");
//! ```

use super::registry::{Example, Since, Stability};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Definitions
    Type,
    Alias,
    Structure,
    Global,
    Task,

    // Control flow
    If,
    ElseIf,
    Else,
    While,

    // Modifiers
    Ref,

    // Literals / special types
    Nothing,
    True,
    False,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Definition,
    ControlFlow,
    Modifier,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub description: &'static str,
    pub since: Since,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Definitions
    info(
        KeywordId::Type,
        "type",
        KeywordCategory::Definition,
        "Introduces a sum type or a strong alias.",
    ),
    info(
        KeywordId::Alias,
        "alias",
        KeywordCategory::Definition,
        "Introduces a weak (transparent) alias.",
    ),
    info(
        KeywordId::Structure,
        "structure",
        KeywordCategory::Definition,
        "Introduces a structure definition.",
    ),
    info(
        KeywordId::Global,
        "global",
        KeywordCategory::Definition,
        "Opens a block of program-wide variable definitions.",
    ),
    KeywordInfo {
        stability: Stability::Draft,
        ..info(
            KeywordId::Task,
            "task",
            KeywordCategory::Definition,
            "Reserved for task definitions; not recognized yet.",
        )
    },
    // Control flow
    info(
        KeywordId::If,
        "if",
        KeywordCategory::ControlFlow,
        "Conditional entity.",
    ),
    info(
        KeywordId::ElseIf,
        "elseif",
        KeywordCategory::ControlFlow,
        "Chained conditional branch.",
    ),
    info(
        KeywordId::Else,
        "else",
        KeywordCategory::ControlFlow,
        "Fallback branch of a conditional.",
    ),
    info(
        KeywordId::While,
        "while",
        KeywordCategory::ControlFlow,
        "Loop entity.",
    ),
    // Modifiers
    info(
        KeywordId::Ref,
        "ref",
        KeywordCategory::Modifier,
        "Marks a parameter or member as passed by reference.",
    ),
    // Literals
    info(
        KeywordId::Nothing,
        "nothing",
        KeywordCategory::Literal,
        "The empty type; also spells an empty parameter list.",
    ),
    info(
        KeywordId::True,
        "true",
        KeywordCategory::Literal,
        "Boolean literal.",
    ),
    info(
        KeywordId::False,
        "false",
        KeywordCategory::Literal,
        "Boolean literal.",
    ),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return `true` if the spelling is reserved.
pub fn is_reserved(s: &str) -> bool {
    from_str(s).is_some()
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    description: &'static str,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        description,
        since: Since(1, 0),
        stability: Stability::Stable,
        examples: &[],
    }
}
