/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, its top-level `parse()` driver and the small result types shared
/// across the other parser chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type Recognized<T> = Result<Option<T>, SyntaxError>;

/// Deepest nesting of blocks, parenthesized terms, call arguments and template arguments.
///
/// Every level is a recursive call; past this depth the file fails with a syntax error instead of exhausting the
/// stack.
pub const MAX_NESTING: usize = 256;

/// A recognized construct together with the number of tokens it consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<T> {
    pub node: T,
    pub consumed: usize,
}

/// A file that failed to parse.
///
/// `partial` holds everything registered before the error, with unclosed scopes sealed at the error location.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{error}")]
pub struct ParseFailure {
    pub error: SyntaxError,
    pub partial: Box<FileSymbols>,
}

/// Top-level constructs, in the order the driver tries them.
#[derive(Debug)]
enum Construct {
    SumType(SumType),
    StrongAlias(StrongAlias),
    WeakAlias(WeakAlias),
    Structure(Structure),
    Globals(Vec<Variable>),
    Task,
    Function(FunctionOverload),
}

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and does not recover: the first [`SyntaxError`] ends the file.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    symbols: FileSymbols,
    /// Stack of open `{ ... }` scopes, innermost last.
    scopes: Vec<ScopeId>,
    /// Current recursion depth, bounded by [`MAX_NESTING`].
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser over `source`.
    pub fn new(source: &'a str, file: FileRef) -> Self {
        Self {
            lexer: Lexer::new(source, file.clone()),
            symbols: FileSymbols::new(file),
            scopes: Vec::new(),
            depth: 0,
        }
    }

    /// Parse the whole file.
    ///
    /// ## Errors
    /// Returns a [`ParseFailure`] carrying the first syntax error and the partial symbols registered before it.
    pub fn parse(mut self) -> Result<FileSymbols, ParseFailure> {
        while !self.is_at_end() {
            match self.recognize(Self::construct) {
                Ok(Some(found)) => {
                    tracing::trace!(consumed = found.consumed, "recognized top-level construct");
                    self.register(found.node);
                }
                Ok(None) => {
                    let err = self.error_here("syntax error: expected a type, structure, global block or function");
                    return Err(self.fail(err));
                }
                Err(err) => return Err(self.fail(err)),
            }
        }
        Ok(self.finish())
    }

    /// Run a recognizer and measure how many tokens it consumed.
    fn recognize<T>(&mut self, recognizer: impl FnOnce(&mut Self) -> Recognized<T>) -> Recognized<Match<T>> {
        let before = self.lexer.consumed();
        let node = recognizer(self)?;
        Ok(node.map(|node| Match {
            node,
            consumed: self.lexer.consumed() - before,
        }))
    }

    fn construct(&mut self) -> Recognized<Construct> {
        if let Some(sum) = self.sum_type()? {
            return Ok(Some(Construct::SumType(sum)));
        }
        if let Some(alias) = self.strong_alias()? {
            return Ok(Some(Construct::StrongAlias(alias)));
        }
        if let Some(alias) = self.weak_alias()? {
            return Ok(Some(Construct::WeakAlias(alias)));
        }
        if let Some(structure) = self.structure()? {
            return Ok(Some(Construct::Structure(structure)));
        }
        if let Some(globals) = self.global_block()? {
            return Ok(Some(Construct::Globals(globals)));
        }
        if self.task()?.is_some() {
            return Ok(Some(Construct::Task));
        }
        if let Some(function) = self.function()? {
            return Ok(Some(Construct::Function(function)));
        }
        Ok(None)
    }

    fn register(&mut self, construct: Construct) {
        match construct {
            Construct::SumType(sum) => self.symbols.sum_types.push(sum),
            Construct::StrongAlias(alias) => self.symbols.strong_aliases.push(alias),
            Construct::WeakAlias(alias) => self.symbols.weak_aliases.push(alias),
            Construct::Structure(structure) => self.symbols.structures.push(structure),
            Construct::Globals(globals) => self.symbols.globals.extend(globals),
            Construct::Task => {}
            Construct::Function(function) => self.symbols.functions.push(FunctionSignature::new(function)),
        }
    }

    fn finish(mut self) -> FileSymbols {
        self.attach_lexer_warnings();
        self.symbols
    }

    fn fail(mut self, error: SyntaxError) -> ParseFailure {
        tracing::debug!(line = error.line, column = error.column, message = %error.message, "parse failed");
        self.symbols
            .scopes
            .seal_open(Position::new(error.line, error.column));
        self.attach_lexer_warnings();
        ParseFailure {
            error,
            partial: Box::new(self.symbols),
        }
    }

    fn attach_lexer_warnings(&mut self) {
        let file = self.lexer.file().clone();
        let warnings = self.lexer.anomalies().iter().map(|a| {
            Diagnostic::warning(file.clone(), a.kind.message(), a.line, a.column, a.offset)
        });
        self.symbols.warnings.extend(warnings);
    }
}
