/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Lookahead checks at an arbitrary offset (`check_punct`, `check_name`, ...)
/// - Consuming / expecting tokens (`advance`, `expect_punct`, `expect_name`)
/// - Error construction anchored at the current token (`error_here`)
/// - The open-scope stack (`open_scope`, `close_scope`, `declare`)
/// - The recursion guard (`nested`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Lookahead
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.lexer.peek(0).is_none()
    }

    fn peek(&mut self, at: usize) -> Option<&Token> {
        self.lexer.peek(at)
    }

    fn check_punct(&mut self, at: usize, id: PunctuationId) -> bool {
        self.peek(at).is_some_and(|t| t.is_punctuation(id))
    }

    fn check_keyword(&mut self, at: usize, id: KeywordId) -> bool {
        self.peek(at).is_some_and(|t| t.is_keyword(id))
    }

    /// A non-reserved identifier.
    fn check_name(&mut self, at: usize) -> bool {
        self.peek(at).is_some_and(Token::is_name)
    }

    fn check_type_name(&mut self, at: usize) -> bool {
        self.peek(at).is_some_and(Token::is_type_name)
    }

    fn check_literal(&mut self, at: usize) -> bool {
        self.peek(at).is_some_and(Token::is_literal)
    }

    /// Resolve the token at `at` as an operator of the given kind.
    fn operator_at(&mut self, at: usize, kind: OperatorKind) -> Option<operators::OperatorId> {
        let tok = self.peek(at)?;
        if !matches!(tok.kind, TokenKind::Punctuation(_)) {
            return None;
        }
        operators::from_str(&tok.text, kind)
    }

    // ========================================================================
    // Consuming
    // ========================================================================

    fn advance(&mut self) -> Option<Token> {
        self.lexer.advance()
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(0, id) {
            self.lexer.consume(1);
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(0, id) {
            self.lexer.consume(1);
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, context: &str) -> Result<Token, SyntaxError> {
        if self.check_punct(0, id) {
            if let Some(tok) = self.advance() {
                return Ok(tok);
            }
        }
        let spelling = epoch_core::lang::punctuation::as_str(id);
        Err(self.error_here(format!("expected '{spelling}' {context}")))
    }

    fn expect_name(&mut self, context: &str) -> Result<Token, SyntaxError> {
        if self.check_name(0) {
            if let Some(tok) = self.advance() {
                return Ok(tok);
            }
        }
        Err(self.error_here(format!("expected name {context}")))
    }

    /// Build an error at the current token, or at the last consumed token when the input has run out.
    fn error_here(&mut self, message: impl Into<String>) -> SyntaxError {
        let message = message.into();
        if let Some(tok) = self.lexer.peek(0) {
            return SyntaxError::at(tok, message);
        }
        match self.lexer.last_consumed() {
            Some(tok) => SyntaxError::at(tok, format!("{message} (reached end of input)")),
            None => SyntaxError::at_start(self.lexer.file().clone(), message),
        }
    }

    /// Run `inner` one level deeper, failing once [`MAX_NESTING`] is reached.
    fn nested<T>(
        &mut self,
        what: &str,
        inner: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_here(format!("{what} nested too deeply")));
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    fn open_scope(&mut self, brace: &Token) -> ScopeId {
        let parent = self.scopes.last().copied();
        let id = self.symbols.scopes.open(parent, position(brace));
        self.scopes.push(id);
        id
    }

    fn close_scope(&mut self, brace: &Token) {
        if let Some(id) = self.scopes.pop() {
            self.symbols.scopes.close(id, position(brace));
        }
    }

    /// Declare a variable in the innermost open scope.
    fn declare(&mut self, variable: Variable) {
        if let Some(&id) = self.scopes.last() {
            self.symbols.scopes.declare(id, variable);
        }
    }
}

fn position(tok: &Token) -> Position {
    Position::new(tok.line, tok.column)
}
