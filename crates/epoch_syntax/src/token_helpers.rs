//! Small helper APIs for working with [`Token`] / [`TokenKind`].
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make the contextual keyword rules
//! explicit in one place.

use crate::lexer::{Token, TokenKind};
use epoch_core::lang::keywords::{self, KeywordId};
use epoch_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }
}

impl Token {
    /// Return the keyword id if this identifier spells a reserved word.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self.kind {
            TokenKind::Identifier => keywords::from_str(&self.text),
            _ => None,
        }
    }

    /// Return `true` if this token spells the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        self.keyword_id() == Some(id)
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }

    /// Convenience wrapper for `self.kind.is_punctuation(id)`.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        self.kind.is_punctuation(id)
    }

    /// Return `true` if this token can name a user entity (identifier that is not reserved).
    pub fn is_name(&self) -> bool {
        self.kind == TokenKind::Identifier && !keywords::is_reserved(&self.text)
    }

    /// Return `true` if this token can start a type reference.
    ///
    /// `nothing` is reserved but is also a valid type.
    pub fn is_type_name(&self) -> bool {
        self.is_name() || self.is_keyword(KeywordId::Nothing)
    }

    /// Return `true` for numeric, string and boolean literals.
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TokenKind::Literal | TokenKind::StringLiteral)
            || self.is_keyword(KeywordId::True)
            || self.is_keyword(KeywordId::False)
    }

    /// Return `true` if this token may end an operand, so a following `-` is a binary minus.
    pub fn ends_operand(&self) -> bool {
        match self.kind {
            TokenKind::Identifier => !matches!(
                self.keyword_id(),
                Some(KeywordId::If | KeywordId::ElseIf | KeywordId::While | KeywordId::Ref)
            ),
            TokenKind::Literal | TokenKind::StringLiteral => true,
            TokenKind::Punctuation(id) => matches!(id, PunctuationId::RParen | PunctuationId::RBracket),
        }
    }
}
