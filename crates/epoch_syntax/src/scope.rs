//! Lexical scopes for one source file.
//!
//! Every `{ ... }` block opens a [`LexicalScope`]. Scopes live in a per-file [`ScopeArena`] and refer to each
//! other by [`ScopeId`]: children are owned by the arena, and each scope keeps an index back to its parent.
//!
//! Positions are 0-based `(line, column)` pairs. A scope spans from its opening `{` to its closing `}`, inclusive.

use crate::ast::Variable;

/// Index of a scope inside its file's [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A 0-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexicalScope {
    pub start: Position,
    pub end: Position,
    /// Variables in declaration order.
    pub variables: Vec<Variable>,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    closed: bool,
}

impl LexicalScope {
    /// Return `true` if `(line, column)` falls inside this scope's span.
    pub fn contains(&self, line: u32, column: u32) -> bool {
        if line < self.start.line || line > self.end.line {
            return false;
        }
        if line == self.start.line && column < self.start.column {
            return false;
        }
        if line == self.end.line && column > self.end.column {
            return false;
        }
        true
    }

    /// Return `true` once the closing `}` has been seen (or the scope was sealed after a failure).
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Arena of all scopes in one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeArena {
    scopes: Vec<LexicalScope>,
    roots: Vec<ScopeId>,
}

impl ScopeArena {
    /// Open a new scope starting at `start`, nested inside `parent` (or at file level).
    pub fn open(&mut self, parent: Option<ScopeId>, start: Position) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(LexicalScope {
            start,
            end: start,
            variables: Vec::new(),
            parent,
            children: Vec::new(),
            closed: false,
        });
        match parent.and_then(|p| self.scopes.get_mut(p.0)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Close a scope at the position of its `}`.
    pub fn close(&mut self, id: ScopeId, end: Position) {
        if let Some(scope) = self.scopes.get_mut(id.0) {
            scope.end = end;
            scope.closed = true;
        }
    }

    /// Close every still-open scope at `end`, innermost first.
    ///
    /// Used when a file fails to parse so partial scopes still have a usable span.
    pub fn seal_open(&mut self, end: Position) {
        for scope in self.scopes.iter_mut().rev().filter(|s| !s.closed) {
            scope.end = end.max(scope.start);
            scope.closed = true;
        }
    }

    pub fn declare(&mut self, id: ScopeId, variable: Variable) {
        if let Some(scope) = self.scopes.get_mut(id.0) {
            scope.variables.push(variable);
        }
    }

    pub fn get(&self, id: ScopeId) -> Option<&LexicalScope> {
        self.scopes.get(id.0)
    }

    /// File-level scopes (function bodies).
    pub fn roots(&self) -> &[ScopeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &LexicalScope)> {
        self.scopes.iter().enumerate().map(|(i, s)| (ScopeId(i), s))
    }

    /// Collect the variables visible at `(line, column)` starting from the scopes in `from`.
    ///
    /// Each containing scope contributes its variables, outermost first, and the search descends only into
    /// children that also contain the position; sibling blocks never leak into each other.
    pub fn visible_from<'a>(&'a self, from: &[ScopeId], line: u32, column: u32, out: &mut Vec<&'a Variable>) {
        for &id in from {
            let Some(scope) = self.get(id) else { continue };
            if !scope.contains(line, column) {
                continue;
            }
            out.extend(scope.variables.iter());
            self.visible_from(&scope.children, line, column, out);
        }
    }

    /// Variables visible at `(line, column)` from any file-level scope.
    pub fn visible_at(&self, line: u32, column: u32) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.visible_from(&self.roots, line, column, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{TypeSignature, VariableOrigin};
    use crate::lexer::{Token, TokenKind};
    use crate::source::SourceFile;
    use std::sync::Arc;

    fn var(name: &str) -> Variable {
        let tok = Token::new(name, TokenKind::Identifier, 0, 0, 0, Arc::new(SourceFile::anonymous()));
        Variable::new(tok, TypeSignature::named("integer"), VariableOrigin::Local)
    }

    fn names(vars: &[&Variable]) -> Vec<String> {
        vars.iter().map(|v| v.name().to_string()).collect()
    }

    #[test]
    fn test_containment_edges() {
        let mut arena = ScopeArena::default();
        let id = arena.open(None, Position::new(2, 10));
        arena.close(id, Position::new(5, 1));
        let Some(scope) = arena.get(id) else {
            panic!("scope missing")
        };
        assert!(scope.contains(2, 10));
        assert!(!scope.contains(2, 9));
        assert!(scope.contains(3, 0));
        assert!(scope.contains(5, 1));
        assert!(!scope.contains(5, 2));
        assert!(!scope.contains(6, 0));
        assert!(!scope.contains(1, 50));
    }

    #[test]
    fn test_nested_visibility_excludes_siblings() {
        let mut arena = ScopeArena::default();
        let outer = arena.open(None, Position::new(0, 0));
        arena.declare(outer, var("a"));
        let first = arena.open(Some(outer), Position::new(1, 4));
        arena.declare(first, var("b"));
        arena.close(first, Position::new(3, 4));
        let second = arena.open(Some(outer), Position::new(4, 4));
        arena.declare(second, var("c"));
        arena.close(second, Position::new(6, 4));
        arena.close(outer, Position::new(7, 0));

        assert_eq!(names(&arena.visible_at(2, 0)), ["a", "b"]);
        assert_eq!(names(&arena.visible_at(5, 0)), ["a", "c"]);
        assert_eq!(names(&arena.visible_at(7, 0)), ["a"]);
        assert!(arena.visible_at(8, 0).is_empty());
        assert_eq!(arena.get(first).and_then(|s| s.parent), Some(outer));
        assert_eq!(arena.roots(), &[outer]);
    }

    #[test]
    fn test_seal_open_closes_dangling_scopes() {
        let mut arena = ScopeArena::default();
        let outer = arena.open(None, Position::new(0, 0));
        let inner = arena.open(Some(outer), Position::new(1, 0));
        arena.seal_open(Position::new(4, 2));
        assert!(arena.get(outer).is_some_and(LexicalScope::is_closed));
        assert!(arena.get(inner).is_some_and(|s| s.contains(4, 2)));
    }
}
