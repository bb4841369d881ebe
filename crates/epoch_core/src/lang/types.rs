//! Builtin type vocabulary.
//!
//! This registry covers the type names every Epoch program can use without defining them.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This module is vocabulary only (spellings + metadata), not type-system semantics.
//!
//! ## Examples
//! ```rust
//! use epoch_core::lang::types::{self, BuiltinTypeId};
//!
//! assert_eq!(types::from_str("integer"), Some(BuiltinTypeId::Integer));
//! assert_eq!(types::as_str(BuiltinTypeId::Boolean), "boolean");
//! assert!(types::is_builtin("nothing"));
//! ```

use super::registry::Since;

/// Stable identifier for builtin types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTypeId {
    Integer,
    Integer16,
    Integer64,
    Real,
    Boolean,
    String,
    Buffer,
    Identifier,
    Nothing,
}

/// Metadata for a builtin type.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypeInfo {
    pub id: BuiltinTypeId,
    pub canonical: &'static str,
    pub description: &'static str,
    pub since: Since,
}

/// Registry of builtin types.
pub const BUILTIN_TYPES: &[BuiltinTypeInfo] = &[
    info(BuiltinTypeId::Integer, "integer", "32-bit signed integer."),
    info(BuiltinTypeId::Integer16, "integer16", "16-bit signed integer."),
    info(BuiltinTypeId::Integer64, "integer64", "64-bit signed integer."),
    info(BuiltinTypeId::Real, "real", "32-bit floating point number."),
    info(BuiltinTypeId::Boolean, "boolean", "Truth value."),
    info(BuiltinTypeId::String, "string", "Immutable text."),
    info(BuiltinTypeId::Buffer, "buffer", "Mutable byte buffer."),
    info(BuiltinTypeId::Identifier, "identifier", "Name of a program entity."),
    info(BuiltinTypeId::Nothing, "nothing", "The empty type."),
];

/// Return the canonical spelling for a builtin type.
pub fn as_str(id: BuiltinTypeId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a builtin type.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinTypeId) -> &'static BuiltinTypeInfo {
    BUILTIN_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("builtin type info missing")
}

/// Resolve a type name to a builtin type.
pub fn from_str(s: &str) -> Option<BuiltinTypeId> {
    BUILTIN_TYPES.iter().find(|t| t.canonical == s).map(|t| t.id)
}

/// Return `true` if `s` names a builtin type.
pub fn is_builtin(s: &str) -> bool {
    from_str(s).is_some()
}

const fn info(id: BuiltinTypeId, canonical: &'static str, description: &'static str) -> BuiltinTypeInfo {
    BuiltinTypeInfo {
        id,
        canonical,
        description,
        since: Since(1, 0),
    }
}
