//! Provide the canonical language vocabulary for Epoch tooling.
//!
//! This crate is intentionally small and dependency-free. Both the lexer/parser (`epoch_syntax`) and the project
//! layer (`epoch`) consult these registries instead of scattering string comparisons across the code base.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no syntax-tree types.

pub mod lang;
