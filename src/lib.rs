#![forbid(unsafe_code)]
//! Epoch IntelliSense core
//!
//! Project-wide symbol analysis for the Epoch programming language: every source file is lexed and recognized by
//! `epoch_syntax`, the results are merged into a project [`SymbolTable`], and each rebuild is published as an
//! immutable [`Generation`] that readers can hold while the next one is being built.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **Poisoned locks**: Project state is recovered from a poisoned lock rather than panicking; a rebuild either
//!   publishes a complete generation or leaves the previous one in place.

pub mod cli;
pub mod config;
pub mod project;

pub use config::AnalysisConfig;
pub use epoch_syntax::{ast, diagnostics, lexer, parser, scope, source};
pub use project::symbols::SymbolTable;
pub use project::sources::{DirectorySource, InMemorySources, ProjectError, SourceIssue, SourceProvider, SourceText};
pub use project::{Generation, Project};
