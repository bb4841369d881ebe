/// Statement recognition inside `{ ... }` blocks.
///
/// Statements are recognized for their token extent only, except for local initializations, which declare a
/// variable in the innermost open scope.

/// Which statement form was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    Entity,
    Block,
    PreOperation,
    Initialization,
    Call,
    Assignment,
    PostOperation,
}

impl<'a> Parser<'a> {
    /// Parse statements up to and including the `}` that closes the innermost open scope.
    fn block_statements(&mut self) -> Result<(), SyntaxError> {
        loop {
            if self.check_punct(0, PunctuationId::RBrace) {
                if let Some(close) = self.advance() {
                    self.close_scope(&close);
                }
                return Ok(());
            }
            if self.is_at_end() {
                return Err(self.error_here("expected '}' to close block"));
            }
            match self.statement()? {
                Some(kind) => tracing::trace!(?kind, "statement"),
                None => return Err(self.error_here("syntax error: expected statement")),
            }
        }
    }

    /// `{ statements }` nested inside another block.
    fn code_block(&mut self) -> Result<(), SyntaxError> {
        let open = self.expect_punct(PunctuationId::LBrace, "to open block")?;
        self.open_scope(&open);
        self.nested("block", Self::block_statements)
    }

    fn statement(&mut self) -> Recognized<StatementKind> {
        if self.entity()?.is_some() {
            return Ok(Some(StatementKind::Entity));
        }
        if self.check_punct(0, PunctuationId::LBrace) {
            self.code_block()?;
            return Ok(Some(StatementKind::Block));
        }
        if self.pre_operation()?.is_some() {
            return Ok(Some(StatementKind::PreOperation));
        }
        if let Some(variable) = self.initialization(VariableOrigin::Local)? {
            self.declare(variable);
            return Ok(Some(StatementKind::Initialization));
        }
        if self.starts_call(0) {
            self.call()?;
            return Ok(Some(StatementKind::Call));
        }
        if self.assignment()?.is_some() {
            return Ok(Some(StatementKind::Assignment));
        }
        if self.post_operation()?.is_some() {
            return Ok(Some(StatementKind::PostOperation));
        }
        Ok(None)
    }

    /// `if (c) { } elseif (c) { } else { }` and `while (c) { }`.
    fn entity(&mut self) -> Recognized<()> {
        if self.check_keyword(0, KeywordId::While) && self.check_punct(1, PunctuationId::LParen) {
            self.lexer.consume(1);
            self.condition()?;
            self.code_block()?;
            return Ok(Some(()));
        }
        if !self.check_keyword(0, KeywordId::If) || !self.check_punct(1, PunctuationId::LParen) {
            return Ok(None);
        }
        self.lexer.consume(1);
        self.condition()?;
        self.code_block()?;
        while self.check_keyword(0, KeywordId::ElseIf) {
            self.lexer.consume(1);
            self.condition()?;
            self.code_block()?;
        }
        if self.match_keyword(KeywordId::Else) {
            self.code_block()?;
        }
        Ok(Some(()))
    }

    /// `( expression )`
    fn condition(&mut self) -> Result<Expression, SyntaxError> {
        self.expect_punct(PunctuationId::LParen, "to open condition")?;
        let Some(expr) = self.expression()? else {
            return Err(self.error_here("expected condition expression"));
        };
        self.expect_punct(PunctuationId::RParen, "to close condition")?;
        Ok(expr)
    }

    /// `type [ref] name = expression`
    fn initialization(&mut self, origin: VariableOrigin) -> Recognized<Variable> {
        let Some(len) = self.type_len(0) else {
            return Ok(None);
        };
        let name_at = if self.check_keyword(len, KeywordId::Ref) { len + 1 } else { len };
        if !self.check_name(name_at) || !self.check_punct(name_at + 1, PunctuationId::Eq) {
            return Ok(None);
        }
        let ty = self.type_with_ref("for variable")?;
        let name = self.expect_name("for variable")?;
        self.lexer.consume(1); // `=`
        if self.expression()?.is_none() {
            return Err(self.error_here(format!("expected initializer for '{}'", name.text)));
        }
        Ok(Some(Variable::new(name, ty, origin)))
    }

    /// Length of `name(.name)*` at `at`.
    fn lvalue_len(&mut self, at: usize) -> Option<usize> {
        if !self.check_name(at) {
            return None;
        }
        let mut i = at + 1;
        while self.check_punct(i, PunctuationId::Dot) && self.check_name(i + 1) {
            i += 2;
        }
        Some(i - at)
    }

    /// `lvalue = [lvalue = ...] expression`; only plain `=` may be chained.
    fn assignment(&mut self) -> Recognized<()> {
        let Some(len) = self.lvalue_len(0) else {
            return Ok(None);
        };
        let Some(mut op) = self.operator_at(len, OperatorKind::Assignment) else {
            return Ok(None);
        };
        self.lexer.consume(len + 1);
        loop {
            let Some(next_len) = self.lvalue_len(0) else { break };
            let Some(next_op) = self.operator_at(next_len, OperatorKind::Assignment) else {
                break;
            };
            if !operators::info_for(op).chainable || !operators::info_for(next_op).chainable {
                return Err(self.error_here("compound assignment cannot be chained"));
            }
            self.lexer.consume(next_len + 1);
            op = next_op;
        }
        if self.expression()?.is_none() {
            return Err(self.error_here(format!(
                "expected expression after '{}'",
                operators::as_str(op)
            )));
        }
        Ok(Some(()))
    }

    /// `++lvalue` / `--lvalue`
    fn pre_operation(&mut self) -> Recognized<()> {
        if self.operator_at(0, OperatorKind::Increment).is_none() {
            return Ok(None);
        }
        let Some(len) = self.lvalue_len(1) else {
            return Ok(None);
        };
        self.lexer.consume(len + 1);
        Ok(Some(()))
    }

    /// `lvalue++` / `lvalue--`
    fn post_operation(&mut self) -> Recognized<()> {
        let Some(len) = self.lvalue_len(0) else {
            return Ok(None);
        };
        if self.operator_at(len, OperatorKind::Increment).is_none() {
            return Ok(None);
        }
        self.lexer.consume(len + 1);
        Ok(Some(()))
    }
}
