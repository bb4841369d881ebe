//! Diagnostics for Epoch source analysis.
//!
//! - [`SyntaxError`] is the single fatal error a file can produce; parsing stops at the first one.
//! - [`Diagnostic`] is the host-facing record (errors and warnings) collected per project generation in a
//!   [`DiagnosticSink`].
//! - [`Diagnostic::to_report`] turns a diagnostic into a `miette` report with a labeled source snippet for
//!   terminal rendering.
//!
//! Lines and columns are 0-based everywhere except in `Display` output, which is 1-based for humans.

use std::fmt;

use miette::{LabeledSpan, NamedSource, SourceSpan};

use crate::lexer::Token;
use crate::source::{FileRef, SourceFile};

/// A syntax error with location information.
#[derive(Debug, Clone, PartialEq, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(epoch::syntax))]
pub struct SyntaxError {
    pub message: String,
    pub file: FileRef,
    pub line: u32,
    pub column: u32,
    pub offset: usize,
    pub length: usize,
}

impl SyntaxError {
    /// Error anchored at `token`.
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: token.file.clone(),
            line: token.line,
            column: token.column,
            offset: token.offset,
            length: token.len(),
        }
    }

    /// Error at the start of `file`, used when a file fails before any token was consumed.
    pub fn at_start(file: FileRef, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file,
            line: 0,
            column: 0,
            offset: 0,
            length: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Host hook for jumping to a diagnostic's location (an editor, a pager, a test recorder).
pub trait Navigator {
    fn open(&mut self, file: &SourceFile, line: u32, column: u32);
}

/// A located finding reported to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub file: FileRef,
    pub line: u32,
    pub column: u32,
    pub offset: usize,
    pub length: usize,
}

impl Diagnostic {
    pub fn warning(file: FileRef, message: impl Into<String>, line: u32, column: u32, offset: usize) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
            file,
            line,
            column,
            offset,
            length: 1,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Ask the host to jump to this diagnostic's file and position.
    pub fn navigate(&self, navigator: &mut impl Navigator) {
        navigator.open(&self.file, self.line, self.column);
    }

    /// Build a renderable report with a labeled snippet of `source`.
    pub fn to_report(&self, source: &str) -> DiagnosticReport {
        let offset = self.offset.min(source.len());
        let length = self.length.min(source.len() - offset);
        DiagnosticReport {
            message: self.message.clone(),
            severity: self.severity,
            snippet: NamedSource::new(self.file.to_string(), source.to_string()),
            span: SourceSpan::from((offset, length)),
        }
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(err: SyntaxError) -> Self {
        Self {
            message: err.message,
            severity: Severity::Error,
            file: err.file,
            line: err.line,
            column: err.column,
            offset: err.offset,
            length: err.length,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.file,
            self.line + 1,
            self.column + 1,
            self.severity,
            self.message
        )
    }
}

/// A [`Diagnostic`] bound to its source text, renderable with any `miette` report handler.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    severity: Severity,
    snippet: NamedSource<String>,
    span: SourceSpan,
}

impl miette::Diagnostic for DiagnosticReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.severity {
            Severity::Error => "epoch::syntax",
            Severity::Warning => "epoch::lexer",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.snippet)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some("here".to_string()),
            self.span,
        ))))
    }
}

/// Ordered collection of diagnostics for one project generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticSink {
    items: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| !d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Diagnostics for one file, matched case-insensitively.
    pub fn for_file<'a>(&'a self, file: &'a SourceFile) -> impl Iterator<Item = &'a Diagnostic> {
        self.items.iter().filter(move |d| d.file.key() == file.key())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Extend<Diagnostic> for DiagnosticSink {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a> IntoIterator for &'a DiagnosticSink {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
