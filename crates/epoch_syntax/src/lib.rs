//! Syntax frontend for Epoch source analysis: lexer, recognizers, lexical scopes, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by any host that needs symbol information about Epoch
//! programs (a project symbol table, a command-line checker, editor integrations).
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it recognizes constructs and records declarations, but performs no
//!   type checking and builds no expression trees.
//! - A file either parses completely or fails with a single [`diagnostics::SyntaxError`]; the recognizers never
//!   attempt recovery inside a file.
//! - Vocabulary identity (keywords/punctuation/operators) comes from `epoch_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use std::sync::Arc;
//! use epoch_syntax::{parser, source::SourceFile};
//!
//! let file = Arc::new(SourceFile::new("math.epoch"));
//! let symbols = parser::parse_file("add : integer x, integer y -> integer sum { sum = x + y }", file).unwrap();
//! assert_eq!(symbols.functions.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod source;
pub mod token_helpers;
