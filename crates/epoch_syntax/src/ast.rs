//! Symbol records produced by the Epoch recognizers.
//!
//! These are not a full AST: recognizers record declarations (functions, types, variables) and discard the
//! structure of statements and expressions. Expressions are represented by the opaque [`Expression`] marker.
//!
//! The [`std::fmt::Display`] impls render the canonical signature format used by completion lists and the CLI:
//!
//! ```text
//! name<template> : p1type p1, p2type ref p2 -> rettype ret [tag1, tag2]
//! ```

use std::fmt;

use crate::diagnostics::Diagnostic;
use crate::lexer::Token;
use crate::scope::{ScopeArena, ScopeId};
use crate::source::FileRef;

// ============================================================================
// Types
// ============================================================================

/// A type reference such as `integer`, `list<string>` or `buffer ref`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSignature {
    pub name: String,
    pub template_args: Vec<TypeSignature>,
    pub reference: bool,
}

impl TypeSignature {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template_args: Vec::new(),
            reference: false,
        }
    }

    pub fn with_reference(mut self, reference: bool) -> Self {
        self.reference = reference;
        self
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.template_args.is_empty() {
            write!(f, "<{}>", join(&self.template_args, ", "))?;
        }
        if self.reference {
            write!(f, " ref")?;
        }
        Ok(())
    }
}

/// A template parameter such as the `type T` in `<type T>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateParameter {
    pub kind: String,
    pub name: Token,
}

impl fmt::Display for TemplateParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name.text)
    }
}

fn write_template_params(f: &mut fmt::Formatter<'_>, params: &[TemplateParameter]) -> fmt::Result {
    if params.is_empty() {
        return Ok(());
    }
    write!(f, "<{}>", join(params, ", "))
}

// ============================================================================
// Variables
// ============================================================================

/// Where a variable was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableOrigin {
    Local,
    Parameter,
    Return,
    Global,
}

impl VariableOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableOrigin::Local => "local",
            VariableOrigin::Parameter => "parameter",
            VariableOrigin::Return => "return",
            VariableOrigin::Global => "global",
        }
    }
}

/// A named, typed variable visible in some scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: Token,
    pub ty: TypeSignature,
    pub origin: VariableOrigin,
}

impl Variable {
    pub fn new(name: Token, ty: TypeSignature, origin: VariableOrigin) -> Self {
        Self { name, ty, origin }
    }

    pub fn name(&self) -> &str {
        &self.name.text
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name.text)
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Shape of one function parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    /// `integer x`, `buffer ref b`
    Named,
    /// A literal used for pattern-matched dispatch, e.g. `fib : 0 -> 1`.
    Literal,
    /// `(callback : integer -> boolean)`; the inner signature is not modeled.
    HigherOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name; for literal parameters, the literal token itself.
    pub name: Token,
    pub ty: TypeSignature,
    pub kind: ParameterKind,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParameterKind::Named => write!(f, "{} {}", self.ty, self.name.text),
            ParameterKind::Literal => write!(f, "{}", self.name.text),
            ParameterKind::HigherOrder => write!(f, "({} : ...)", self.name.text),
        }
    }
}

/// Opaque marker for a recognized expression.
///
/// Expression structure is never built; only its location and extent are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    pub line: u32,
    pub column: u32,
    pub token_count: usize,
}

/// What a function produces.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionReturn {
    /// No `->` clause.
    None,
    /// `-> integer result [= init]`: a named return variable.
    Variable(Variable),
    /// `-> expression`: the function evaluates to an expression.
    Expression(Expression),
}

/// A tag such as `[external("lib.dll", "fn")]`; arguments are kept as raw tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTag {
    pub name: Token,
    pub arguments: Vec<Token>,
}

impl fmt::Display for FunctionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.text)?;
        if !self.arguments.is_empty() {
            let args: Vec<&str> = self.arguments.iter().map(|t| t.text.as_str()).collect();
            write!(f, "({})", args.join(", "))?;
        }
        Ok(())
    }
}

/// One overload of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionOverload {
    pub name: Token,
    pub template_params: Vec<TemplateParameter>,
    pub parameters: Vec<Parameter>,
    pub returns: FunctionReturn,
    pub tags: Vec<FunctionTag>,
    /// Body scope, if the overload has a `{ ... }` body.
    pub scope: Option<ScopeId>,
    pub file: FileRef,
}

impl fmt::Display for FunctionOverload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.text)?;
        write_template_params(f, &self.template_params)?;
        if self.parameters.is_empty() {
            write!(f, " : nothing")?;
        } else {
            write!(f, " : {}", join(&self.parameters, ", "))?;
        }
        match &self.returns {
            FunctionReturn::None => {}
            FunctionReturn::Variable(v) => write!(f, " -> {v}")?,
            FunctionReturn::Expression(_) => write!(f, " -> ...")?,
        }
        if !self.tags.is_empty() {
            write!(f, " [{}]", join(&self.tags, ", "))?;
        }
        Ok(())
    }
}

/// All overloads sharing one function name.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub overloads: Vec<FunctionOverload>,
}

impl FunctionSignature {
    pub fn new(overload: FunctionOverload) -> Self {
        Self {
            name: overload.name.text.clone(),
            overloads: vec![overload],
        }
    }
}

// ============================================================================
// Type definitions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Data,
    /// `(name : params -> ret)`; the member type is the return type.
    Function,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructureMember {
    pub name: Token,
    pub ty: TypeSignature,
    pub kind: MemberKind,
}

impl fmt::Display for StructureMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MemberKind::Data => write!(f, "{} {}", self.ty, self.name.text),
            MemberKind::Function => write!(f, "({} : ... -> {})", self.name.text, self.ty),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub name: Token,
    pub template_params: Vec<TemplateParameter>,
    pub members: Vec<StructureMember>,
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "structure {}", self.name.text)?;
        write_template_params(f, &self.template_params)?;
        write!(f, " : {}", join(&self.members, ", "))
    }
}

/// `type Name : A | B | C`
#[derive(Debug, Clone, PartialEq)]
pub struct SumType {
    pub name: Token,
    pub template_params: Vec<TemplateParameter>,
    pub bases: Vec<TypeSignature>,
}

impl fmt::Display for SumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {}", self.name.text)?;
        write_template_params(f, &self.template_params)?;
        write!(f, " : {}", join(&self.bases, " | "))
    }
}

/// `type Name : Base`; a distinct type with the representation of `Base`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrongAlias {
    pub name: Token,
    pub base: TypeSignature,
}

/// `alias Name = Target`; a transparent second name for `Target`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeakAlias {
    pub name: Token,
    pub target: TypeSignature,
}

// ============================================================================
// Per-file output
// ============================================================================

/// Everything one file contributes to a project.
#[derive(Debug, Clone)]
pub struct FileSymbols {
    pub file: FileRef,
    /// One entry per function definition, in source order (overloads are merged by the project).
    pub functions: Vec<FunctionSignature>,
    pub structures: Vec<Structure>,
    pub sum_types: Vec<SumType>,
    pub strong_aliases: Vec<StrongAlias>,
    pub weak_aliases: Vec<WeakAlias>,
    pub globals: Vec<Variable>,
    pub scopes: ScopeArena,
    /// Non-fatal findings (unterminated strings).
    pub warnings: Vec<Diagnostic>,
}

impl FileSymbols {
    pub fn new(file: FileRef) -> Self {
        Self {
            file,
            functions: Vec::new(),
            structures: Vec::new(),
            sum_types: Vec::new(),
            strong_aliases: Vec::new(),
            weak_aliases: Vec::new(),
            globals: Vec::new(),
            scopes: ScopeArena::default(),
            warnings: Vec::new(),
        }
    }

    /// Return `true` if the file declared nothing.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.structures.is_empty()
            && self.sum_types.is_empty()
            && self.strong_aliases.is_empty()
            && self.weak_aliases.is_empty()
            && self.globals.is_empty()
    }
}

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(sep)
}
