//! Recognizers for the Epoch programming language
//!
//! Turns a lazily lexed token stream into [`FileSymbols`]: declarations, globals and the lexical scopes of
//! function bodies.
//!
//! ## Recognizer discipline
//! Each recognizer first decides, using lookahead only, whether the construct is present. Until that decision it
//! consumes nothing, so an alternative that does not match leaves the stream untouched and the next alternative
//! can be tried. Once a recognizer commits, any malformed input is a fatal [`SyntaxError`] for the whole file.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use epoch_syntax::{parser, source::SourceFile};
//!
//! let source = "structure point : integer x, integer y\nalias coord = integer\n";
//! let symbols = parser::parse_file(source, Arc::new(SourceFile::new("geo.epoch"))).unwrap();
//! assert_eq!(symbols.structures[0].members.len(), 2);
//! assert_eq!(symbols.weak_aliases[0].name.text, "coord");
//! ```

use crate::ast::*;
use crate::diagnostics::{Diagnostic, SyntaxError};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::scope::{Position, ScopeId};
use crate::source::FileRef;
use epoch_core::lang::keywords::KeywordId;
use epoch_core::lang::operators::{self, OperatorKind};
use epoch_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
