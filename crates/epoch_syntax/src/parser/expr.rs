/// Expression recognition.
///
/// Expressions are recognized, never built: `term (binary-op term)*`, where every binary operator is a flat
/// lookahead-one match. There is no precedence; only token consumption matters, and the result is an opaque
/// [`Expression`] marker.
impl<'a> Parser<'a> {
    fn expression(&mut self) -> Recognized<Expression> {
        let Some((line, column)) = self.peek(0).map(|t| (t.line, t.column)) else {
            return Ok(None);
        };
        let before = self.lexer.consumed();
        if !self.term()? {
            return Ok(None);
        }
        while let Some(op) = self.operator_at(0, OperatorKind::Binary) {
            self.lexer.consume(1);
            if !self.term()? {
                return Err(self.error_here(format!(
                    "expected expression after operator '{}'",
                    operators::as_str(op)
                )));
            }
        }
        Ok(Some(Expression {
            line,
            column,
            token_count: self.lexer.consumed() - before,
        }))
    }

    /// Parse one term; returns `false` (consuming nothing) if no term starts here.
    fn term(&mut self) -> Result<bool, SyntaxError> {
        let Some(tok) = self.peek(0) else {
            return Ok(false);
        };
        let is_literal = tok.is_literal();
        let is_type_name = tok.is_type_name();
        let is_paren = tok.is_punctuation(PunctuationId::LParen);

        if is_literal {
            self.lexer.consume(1);
            return Ok(true);
        }
        if is_paren {
            self.lexer.consume(1);
            if self.nested("expression", Self::expression)?.is_none() {
                return Err(self.error_here("expected expression after '('"));
            }
            self.expect_punct(PunctuationId::RParen, "to close parenthesized expression")?;
            return Ok(true);
        }
        if self.operator_at(0, OperatorKind::Increment).is_some() {
            let Some(len) = self.lvalue_len(1) else {
                return Err(self.error_here("expected variable after increment operator"));
            };
            self.lexer.consume(len + 1);
            return Ok(true);
        }
        if let Some(op) = self.operator_at(0, OperatorKind::Prefix) {
            self.lexer.consume(1);
            if !self.nested("expression", Self::term)? {
                return Err(self.error_here(format!(
                    "expected expression after '{}'",
                    operators::as_str(op)
                )));
            }
            return Ok(true);
        }
        if is_type_name {
            if self.starts_call(0) {
                self.call()?;
            } else {
                self.lexer.consume(1);
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Return `true` if `name(` or `name<args>(` starts at `at`.
    fn starts_call(&mut self, at: usize) -> bool {
        if !self.check_name(at) {
            return false;
        }
        if self.check_punct(at + 1, PunctuationId::LParen) {
            return true;
        }
        match self.template_args_len(at + 1) {
            Some(len) => self.check_punct(at + 1 + len, PunctuationId::LParen),
            None => false,
        }
    }

    /// `name[<args>](expression, ...)`; only call after [`Parser::starts_call`] said yes.
    fn call(&mut self) -> Result<(), SyntaxError> {
        let args_len = self.template_args_len(1).unwrap_or(0);
        self.lexer.consume(1 + args_len);
        self.expect_punct(PunctuationId::LParen, "to open argument list")?;
        if self.match_punct(PunctuationId::RParen) {
            return Ok(());
        }
        loop {
            if self.nested("call", Self::expression)?.is_none() {
                return Err(self.error_here("expected argument expression"));
            }
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::RParen, "to close argument list")?;
            return Ok(());
        }
    }
}
