/// Top-level definitions.
///
/// Every recognizer here follows the same shape: decide with lookahead, then commit. Returning `Ok(None)` means
/// nothing was consumed.
impl<'a> Parser<'a> {
    /// `type Name : A | B` or `type Name<type T> : A | T`.
    fn sum_type(&mut self) -> Recognized<SumType> {
        if !self.check_keyword(0, KeywordId::Type) || !self.check_name(1) {
            return Ok(None);
        }
        if self.check_punct(2, PunctuationId::Lt) {
            let Some(len) = self.template_params_len(2) else {
                return Ok(None);
            };
            if !self.check_punct(2 + len, PunctuationId::Colon) {
                return Ok(None);
            }
        } else {
            if !self.check_punct(2, PunctuationId::Colon) {
                return Ok(None);
            }
            let Some(base) = self.type_len(3) else {
                return Ok(None);
            };
            if !self.check_punct(3 + base, PunctuationId::Pipe) {
                return Ok(None);
            }
        }

        self.lexer.consume(1); // `type`
        let name = self.expect_name("after 'type'")?;
        let template_params = self.template_params()?;
        self.expect_punct(PunctuationId::Colon, "after sum type name")?;
        let mut bases = vec![self.type_signature("for sum type base")?];
        while self.match_punct(PunctuationId::Pipe) {
            bases.push(self.type_signature("after '|'")?);
        }
        Ok(Some(SumType {
            name,
            template_params,
            bases,
        }))
    }

    /// `type Name : Base` (only reached when the sum type recognizer declined).
    fn strong_alias(&mut self) -> Recognized<StrongAlias> {
        if !self.check_keyword(0, KeywordId::Type)
            || !self.check_name(1)
            || !self.check_punct(2, PunctuationId::Colon)
        {
            return Ok(None);
        }
        self.lexer.consume(1);
        let name = self.expect_name("after 'type'")?;
        self.lexer.consume(1); // `:`
        let base = self.type_signature("for alias base")?;
        Ok(Some(StrongAlias { name, base }))
    }

    /// `alias Name = Target`
    fn weak_alias(&mut self) -> Recognized<WeakAlias> {
        if !self.check_keyword(0, KeywordId::Alias)
            || !self.check_name(1)
            || !self.check_punct(2, PunctuationId::Eq)
        {
            return Ok(None);
        }
        self.lexer.consume(1);
        let name = self.expect_name("after 'alias'")?;
        self.lexer.consume(1); // `=`
        let target = self.type_signature("for alias target")?;
        Ok(Some(WeakAlias { name, target }))
    }

    /// `structure Name [<params>] : member, member, ...`
    fn structure(&mut self) -> Recognized<Structure> {
        if !self.check_keyword(0, KeywordId::Structure) || !self.check_name(1) {
            return Ok(None);
        }
        self.lexer.consume(1);
        let name = self.expect_name("after 'structure'")?;
        let template_params = self.template_params()?;
        self.expect_punct(PunctuationId::Colon, "after structure name")?;
        let mut members = Vec::new();
        loop {
            members.push(self.structure_member()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(Some(Structure {
            name,
            template_params,
            members,
        }))
    }

    fn structure_member(&mut self) -> Result<StructureMember, SyntaxError> {
        if self.check_punct(0, PunctuationId::LParen) {
            let (name, returns) = self.higher_order_signature()?;
            return Ok(StructureMember {
                name,
                ty: returns.unwrap_or_else(|| TypeSignature::named("nothing")),
                kind: MemberKind::Function,
            });
        }
        let ty = self.type_with_ref("for structure member")?;
        let name = self.expect_name("for structure member")?;
        Ok(StructureMember {
            name,
            ty,
            kind: MemberKind::Data,
        })
    }

    /// `global { type name = expr ... }`
    fn global_block(&mut self) -> Recognized<Vec<Variable>> {
        if !self.check_keyword(0, KeywordId::Global) || !self.check_punct(1, PunctuationId::LBrace) {
            return Ok(None);
        }
        self.lexer.consume(2);
        let mut globals = Vec::new();
        loop {
            if self.match_punct(PunctuationId::RBrace) {
                return Ok(Some(globals));
            }
            if self.is_at_end() {
                return Err(self.error_here("expected '}' to close global block"));
            }
            match self.initialization(VariableOrigin::Global)? {
                Some(variable) => globals.push(variable),
                None => return Err(self.error_here("expected variable definition in global block")),
            }
        }
    }

    /// Tasks are reserved but not recognized yet.
    fn task(&mut self) -> Recognized<()> {
        Ok(None)
    }

    /// `name [<params>] : parameters [-> return] [tags] [{ body }]`
    fn function(&mut self) -> Recognized<FunctionOverload> {
        if !self.check_name(0) {
            return Ok(None);
        }
        let params_len = if self.check_punct(1, PunctuationId::Lt) {
            match self.template_params_len(1) {
                Some(len) => len,
                None => return Ok(None),
            }
        } else {
            0
        };
        if !self.check_punct(1 + params_len, PunctuationId::Colon) {
            return Ok(None);
        }

        let name = self.expect_name("for function")?;
        let template_params = self.template_params()?;
        self.lexer.consume(1); // `:`
        let parameters = self.parameters()?;
        let returns = self.return_clause()?;
        let tags = self.tags()?;
        let scope = if self.check_punct(0, PunctuationId::LBrace) {
            Some(self.function_body(&parameters, &returns)?)
        } else {
            None
        };
        Ok(Some(FunctionOverload {
            name,
            template_params,
            parameters,
            returns,
            tags,
            scope,
            file: self.lexer.file().clone(),
        }))
    }

    /// Return `true` if a parameter starts at the cursor.
    fn starts_parameter(&mut self) -> bool {
        if self.check_punct(0, PunctuationId::LParen) || self.check_literal(0) {
            return true;
        }
        match self.type_len(0) {
            Some(len) => self.check_keyword(len, KeywordId::Ref) || self.check_name(len),
            None => false,
        }
    }

    fn parameters(&mut self) -> Result<Vec<Parameter>, SyntaxError> {
        if self.match_keyword(KeywordId::Nothing) {
            return Ok(Vec::new());
        }
        let mut params = Vec::new();
        if !self.starts_parameter() {
            return Ok(params);
        }
        loop {
            params.push(self.parameter()?);
            if !self.match_punct(PunctuationId::Comma) {
                return Ok(params);
            }
        }
    }

    fn parameter(&mut self) -> Result<Parameter, SyntaxError> {
        if self.check_punct(0, PunctuationId::LParen) {
            let (name, returns) = self.higher_order_signature()?;
            return Ok(Parameter {
                name,
                ty: returns.unwrap_or_else(|| TypeSignature::named("nothing")),
                kind: ParameterKind::HigherOrder,
            });
        }
        if self.check_literal(0) {
            if let Some(lit) = self.advance() {
                return Ok(Parameter {
                    ty: literal_type(&lit),
                    name: lit,
                    kind: ParameterKind::Literal,
                });
            }
        }
        let ty = self.type_with_ref("for parameter")?;
        let name = self.expect_name("for parameter")?;
        Ok(Parameter {
            name,
            ty,
            kind: ParameterKind::Named,
        })
    }

    /// `-> type name [= expr]` or `-> expr`.
    fn return_clause(&mut self) -> Result<FunctionReturn, SyntaxError> {
        if !self.match_punct(PunctuationId::Arrow) {
            return Ok(FunctionReturn::None);
        }
        let is_variable = match self.type_len(0) {
            Some(len) => self.check_name(len) || self.check_keyword(len, KeywordId::Ref),
            None => false,
        };
        if is_variable {
            let ty = self.type_with_ref("for return value")?;
            let name = self.expect_name("for return value")?;
            if self.match_punct(PunctuationId::Eq) && self.expression()?.is_none() {
                return Err(self.error_here("expected initializer for return value"));
            }
            return Ok(FunctionReturn::Variable(Variable::new(name, ty, VariableOrigin::Return)));
        }
        match self.expression()? {
            Some(expr) => Ok(FunctionReturn::Expression(expr)),
            None => Err(self.error_here("expected return value or expression after '->'")),
        }
    }

    /// `[name, name(args), ...]`
    fn tags(&mut self) -> Result<Vec<FunctionTag>, SyntaxError> {
        if !self.match_punct(PunctuationId::LBracket) {
            return Ok(Vec::new());
        }
        let mut tags = Vec::new();
        loop {
            let is_tag_name = self.peek(0).is_some_and(|t| t.kind == TokenKind::Identifier);
            let Some(name) = (if is_tag_name { self.advance() } else { None }) else {
                return Err(self.error_here("expected tag name"));
            };
            let mut arguments = Vec::new();
            if self.match_punct(PunctuationId::LParen) {
                while !self.match_punct(PunctuationId::RParen) {
                    match self.advance() {
                        Some(tok) if tok.is_punctuation(PunctuationId::Comma) => {}
                        Some(tok) => arguments.push(tok),
                        None => return Err(self.error_here("expected ')' to close tag arguments")),
                    }
                }
            }
            tags.push(FunctionTag { name, arguments });
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::RBracket, "to close tag list")?;
            return Ok(tags);
        }
    }

    /// Parse a function body; parameters and the return variable are declared in its scope first.
    fn function_body(&mut self, parameters: &[Parameter], returns: &FunctionReturn) -> Result<ScopeId, SyntaxError> {
        let open = self.expect_punct(PunctuationId::LBrace, "to open function body")?;
        let scope = self.open_scope(&open);
        for param in parameters {
            if param.kind != ParameterKind::Literal {
                self.declare(Variable::new(param.name.clone(), param.ty.clone(), VariableOrigin::Parameter));
            }
        }
        if let FunctionReturn::Variable(variable) = returns {
            self.declare(variable.clone());
        }
        self.block_statements()?;
        Ok(scope)
    }
}
