//! Token types for the Epoch lexer.
//!
//! Punctuation tokens carry a registry-backed [`PunctuationId`]; everything else keeps its raw text and a coarse
//! [`TokenKind`].
//!
//! ## Notes
//! - Keywords are contextual and lexed as [`TokenKind::Identifier`]. Use `crate::token_helpers` to ask whether an
//!   identifier spells a keyword.
//! - String literal tokens keep both quote characters in [`Token::text`].

use crate::source::FileRef;
use epoch_core::lang::punctuation::PunctuationId;

/// Coarse classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Punctuation(PunctuationId),
    /// Numeric literal (decimal, hex, real, optionally negative).
    Literal,
    StringLiteral,
}

/// A lexed token with its source location.
///
/// `line` and `column` are 0-based and refer to the first character of the token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
    /// Byte offset of the first character.
    pub offset: usize,
    pub file: FileRef,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind, line: u32, column: u32, offset: usize, file: FileRef) -> Self {
        Self {
            text: text.into(),
            kind,
            line,
            column,
            offset,
            file,
        }
    }

    /// Byte length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Something the lexer noticed but could not turn into a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexAnomaly {
    pub kind: LexAnomalyKind,
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexAnomalyKind {
    /// A string literal ran to the end of input; the partial literal was dropped.
    UnterminatedString,
}

impl LexAnomalyKind {
    pub fn message(self) -> &'static str {
        match self {
            LexAnomalyKind::UnterminatedString => "unterminated string literal",
        }
    }
}
