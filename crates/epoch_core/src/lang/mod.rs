//! Epoch language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords, punctuation, operators and
//! builtin types.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer and the recognizers. Callers work
//! with **stable IDs** (e.g. `KeywordId`, `PunctuationId`) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no syntax types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics,
//!   signature display, "is this a type" queries).
//!
//! ## Examples
//! ```rust
//! use epoch_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("elseif"), Some(KeywordId::ElseIf));
//! assert_eq!(keywords::as_str(KeywordId::Structure), "structure");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
pub mod types;
