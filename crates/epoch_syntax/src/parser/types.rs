/// Type references and template lists.
///
/// Each shape has a lookahead form (`*_len`, returns how many tokens it would span without consuming) and a
/// consuming form. Recognizers use the lookahead forms to decide whether to commit.
impl<'a> Parser<'a> {
    /// Length of a type reference at `at`: a type name plus optional template arguments.
    fn type_len(&mut self, at: usize) -> Option<usize> {
        if !self.check_type_name(at) {
            return None;
        }
        if !self.check_punct(at + 1, PunctuationId::Lt) {
            return Some(1);
        }
        // `list <` that is not a valid argument list is just the bare name.
        Some(self.template_args_len(at + 1).map_or(1, |n| n + 1))
    }

    /// Length of `<arg, arg>` at `at`, where each argument is a type or a literal.
    fn template_args_len(&mut self, at: usize) -> Option<usize> {
        if !self.check_punct(at, PunctuationId::Lt) || self.depth >= MAX_NESTING {
            return None;
        }
        self.depth += 1;
        let len = self.template_args_body_len(at);
        self.depth -= 1;
        len
    }

    fn template_args_body_len(&mut self, at: usize) -> Option<usize> {
        let mut i = at + 1;
        loop {
            i += if self.check_literal(i) { 1 } else { self.type_len(i)? };
            if self.check_punct(i, PunctuationId::Comma) {
                i += 1;
                continue;
            }
            if self.check_punct(i, PunctuationId::Gt) {
                return Some(i + 1 - at);
            }
            return None;
        }
    }

    /// Length of `<kind name, kind name>` at `at`, e.g. `<type T, integer N>`.
    fn template_params_len(&mut self, at: usize) -> Option<usize> {
        if !self.check_punct(at, PunctuationId::Lt) {
            return None;
        }
        let mut i = at + 1;
        loop {
            let kind_ok = self.peek(i).is_some_and(|t| t.kind == TokenKind::Identifier);
            if !kind_ok || !self.check_name(i + 1) {
                return None;
            }
            i += 2;
            if self.check_punct(i, PunctuationId::Comma) {
                i += 1;
                continue;
            }
            if self.check_punct(i, PunctuationId::Gt) {
                return Some(i + 1 - at);
            }
            return None;
        }
    }

    /// Parse a type reference (without any trailing `ref`).
    fn type_signature(&mut self, context: &str) -> Result<TypeSignature, SyntaxError> {
        if !self.check_type_name(0) {
            return Err(self.error_here(format!("expected type {context}")));
        }
        let has_args = self.template_args_len(1).is_some();
        let Some(name) = self.advance() else {
            return Err(self.error_here(format!("expected type {context}")));
        };
        let mut sig = TypeSignature::named(name.text);
        if has_args {
            self.lexer.consume(1); // `<`
            loop {
                if self.check_literal(0) {
                    if let Some(lit) = self.advance() {
                        sig.template_args.push(TypeSignature::named(lit.text));
                    }
                } else {
                    let arg = self.nested("template argument", |p| p.type_signature("in template arguments"))?;
                    sig.template_args.push(arg);
                }
                if self.match_punct(PunctuationId::Comma) {
                    continue;
                }
                self.expect_punct(PunctuationId::Gt, "to close template arguments")?;
                break;
            }
        }
        Ok(sig)
    }

    /// Parse a type reference followed by an optional `ref`.
    fn type_with_ref(&mut self, context: &str) -> Result<TypeSignature, SyntaxError> {
        let sig = self.type_signature(context)?;
        let reference = self.match_keyword(KeywordId::Ref);
        Ok(sig.with_reference(reference))
    }

    /// Parse an optional template parameter list.
    fn template_params(&mut self) -> Result<Vec<TemplateParameter>, SyntaxError> {
        if !self.check_punct(0, PunctuationId::Lt) {
            return Ok(Vec::new());
        }
        if self.template_params_len(0).is_none() {
            return Err(self.error_here("malformed template parameter list"));
        }
        self.lexer.consume(1); // `<`
        let mut params = Vec::new();
        loop {
            let Some(kind) = self.advance() else {
                return Err(self.error_here("expected template parameter"));
            };
            let name = self.expect_name("for template parameter")?;
            params.push(TemplateParameter { kind: kind.text, name });
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::Gt, "to close template parameters")?;
            return Ok(params);
        }
    }

    /// Parse `(name : params -> ret)`; the parameter types are consumed but not kept.
    fn higher_order_signature(&mut self) -> Result<(Token, Option<TypeSignature>), SyntaxError> {
        self.expect_punct(PunctuationId::LParen, "to open function signature")?;
        let name = self.expect_name("for function-typed parameter")?;
        self.expect_punct(PunctuationId::Colon, "after function-typed parameter name")?;
        if !self.check_punct(0, PunctuationId::Arrow) && !self.check_punct(0, PunctuationId::RParen) {
            loop {
                self.type_with_ref("in function signature")?;
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        let returns = if self.match_punct(PunctuationId::Arrow) {
            Some(self.type_signature("after '->'")?)
        } else {
            None
        };
        self.expect_punct(PunctuationId::RParen, "to close function signature")?;
        Ok((name, returns))
    }
}

/// Builtin type of a literal parameter such as `0`, `2.5`, `"x"` or `true`.
fn literal_type(tok: &Token) -> TypeSignature {
    let name = match tok.kind {
        TokenKind::StringLiteral => "string",
        TokenKind::Identifier => "boolean",
        _ if tok.text.contains('.') => "real",
        _ => "integer",
    };
    TypeSignature::named(name)
}
