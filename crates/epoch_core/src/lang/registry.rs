//! Shareable metadata for `epoch_core::lang` registries.
//!
//! The `epoch_core::lang` module is a set of **registry-first** vocabularies: keywords, punctuation, operators and
//! builtin types. This submodule provides the small, dependency-free metadata types reused across all of them.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives in the lexer/parser.

/// Identify the language release a vocabulary item has been available since, as `(major, minor)`.
///
/// ## Examples
/// ```rust
/// use epoch_core::lang::registry::Since;
///
/// let since = Since(1, 0);
/// assert!(since >= Since(0, 9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Since(pub u16, pub u16);

/// Describe the lifecycle status of a language vocabulary item.
///
/// ## Notes
/// - This is intended for docs/tooling (e.g. to flag legacy spellings), not for feature-gating by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// Represent a small example snippet for documentation.
///
/// ## Examples
/// ```rust
/// use epoch_core::lang::registry::Example;
///
/// let ex = Example {
///     code: "while (x < 10) { ++x }",
///     note: Some("Minimal loop."),
/// };
/// assert!(ex.code.contains("while"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
