//! Operator vocabulary.
//!
//! This module defines the operators the statement/expression recognizers accept, grouped by how they are used:
//! binary operators that join two terms, assignment operators, increment operators and prefix operators.
//!
//! ## Notes
//! - Expression structure is never built, so there is no precedence table: every binary operator is a single
//!   lookahead-one match and only token consumption matters.
//! - Several operators share a spelling with a punctuation token; [`from_str`] returns the operator meaning for a
//!   given [`OperatorKind`].
//!
//! ## Examples
//! ```rust
//! use epoch_core::lang::operators::{self, OperatorId, OperatorKind};
//!
//! assert_eq!(operators::from_str("&&", OperatorKind::Binary), Some(OperatorId::LogicalAnd));
//! assert!(operators::is_binary(";"));
//! assert!(!operators::is_binary("="));
//! assert_eq!(operators::from_str("+=", OperatorKind::Assignment), Some(OperatorId::AddAssign));
//! ```

/// How an operator participates in a statement or expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// `term op term`
    Binary,
    /// `lvalue op expression`
    Assignment,
    /// `op lvalue` or `lvalue op`
    Increment,
    /// `op term`
    Prefix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Binary
    Member,
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Sequence,
    Greater,
    Less,
    BitwiseAnd,
    LogicalAnd,

    // Assignment
    Assign,
    AddAssign,
    SubtractAssign,

    // Increment
    Increment,
    Decrement,

    // Prefix
    Not,
    Negate,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub kind: OperatorKind,
    /// Assignment operators that may be chained (`a = b = c`).
    pub chainable: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Binary
    op(OperatorId::Member, ".", OperatorKind::Binary),
    op(OperatorId::Add, "+", OperatorKind::Binary),
    op(OperatorId::Subtract, "-", OperatorKind::Binary),
    op(OperatorId::Multiply, "*", OperatorKind::Binary),
    op(OperatorId::Divide, "/", OperatorKind::Binary),
    op(OperatorId::Equal, "==", OperatorKind::Binary),
    op(OperatorId::NotEqual, "!=", OperatorKind::Binary),
    op(OperatorId::Sequence, ";", OperatorKind::Binary),
    op(OperatorId::Greater, ">", OperatorKind::Binary),
    op(OperatorId::Less, "<", OperatorKind::Binary),
    op(OperatorId::BitwiseAnd, "&", OperatorKind::Binary),
    op(OperatorId::LogicalAnd, "&&", OperatorKind::Binary),
    // Assignment
    OperatorInfo {
        chainable: true,
        ..op(OperatorId::Assign, "=", OperatorKind::Assignment)
    },
    op(OperatorId::AddAssign, "+=", OperatorKind::Assignment),
    op(OperatorId::SubtractAssign, "-=", OperatorKind::Assignment),
    // Increment
    op(OperatorId::Increment, "++", OperatorKind::Increment),
    op(OperatorId::Decrement, "--", OperatorKind::Increment),
    // Prefix
    op(OperatorId::Not, "!", OperatorKind::Prefix),
    op(OperatorId::Negate, "-", OperatorKind::Prefix),
];

/// Return the spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Resolve a spelling to an operator of the requested kind.
pub fn from_str(spelling: &str, kind: OperatorKind) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| o.kind == kind && o.spelling == spelling)
        .map(|o| o.id)
}

/// Return `true` if the spelling is a binary operator.
pub fn is_binary(spelling: &str) -> bool {
    from_str(spelling, OperatorKind::Binary).is_some()
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spelling: &'static str, kind: OperatorKind) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        kind,
        chainable: false,
    }
}
