//! Lexer for the Epoch programming language
//!
//! Tokens are produced lazily: the parser asks for lookahead with [`Lexer::peek`] and the lexer scans only as far
//! as needed, buffering scanned-but-unconsumed tokens in a small queue.
//!
//! Scanning is a character-class state machine. Each character is classified relative to the run being built
//! (whitespace, comment, identifier, punctuation, compound punctuation, literal, string literal) and a token is
//! emitted whenever the class changes.
//!
//! ## Notes
//! - A punctuation run only grows while the grown spelling is a whitelisted compound (`==`, `->`, ...). Any other
//!   pair of punctuation characters lexes as two tokens: `<=` is `<` then `=`.
//! - A `-` immediately followed by a digit starts a negative literal, unless the previous token can end an operand
//!   (`a-5` lexes as `a`, `-`, `5`).
//! - Characters that are not whitespace, punctuation, digits or quotes are absorbed into identifiers.
//! - An unterminated string literal is dropped and recorded in [`Lexer::anomalies`].

pub mod tokens;

use std::collections::VecDeque;

pub use tokens::{LexAnomaly, LexAnomalyKind, Token, TokenKind};

use crate::source::FileRef;
use epoch_core::lang::punctuation;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Character-class transitions (simplified):
//
// [Whitespace] → letter → [Identifier] → punct → emit → [Punctuation]
//      ↓                                                    ↓
//    digit / '-'digit → [Literal]          punct forming a compound → [PunctuationCompound]
//      ↓
//     '"' → [StringLiteral] → '"' → emit
//      ↓
//     "//" → [Comment] → '\n' → [Whitespace]
// ============================================================================

/// Character class of the run currently being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Comment,
    Identifier,
    Punctuation,
    PunctuationCompound,
    Literal,
    StringLiteral,
}

/// What the next character does to the current run.
enum Step {
    /// The character joins the run (possibly promoting its class).
    Extend(CharClass),
    /// The character starts a new run; the current run, if any, is emitted first.
    Begin(CharClass),
}

/// Start position of a run.
#[derive(Debug, Clone, Copy)]
struct Mark {
    offset: usize,
    line: u32,
    column: u32,
}

/// Lazy lexer over one source file.
///
/// Tokens flow strictly forward: once consumed they are never un-consumed.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    file: FileRef,
    line: u32,
    column: u32,
    /// Scanned but not yet consumed tokens.
    pending: VecDeque<Token>,
    /// Whether the previously scanned token can end an operand.
    prev_ends_operand: bool,
    last_consumed: Option<Token>,
    consumed: usize,
    exhausted: bool,
    anomalies: Vec<LexAnomaly>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str, file: FileRef) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            file,
            line: 0,
            column: 0,
            pending: VecDeque::new(),
            prev_ends_operand: false,
            last_consumed: None,
            consumed: 0,
            exhausted: false,
            anomalies: Vec::new(),
        }
    }

    /// Return the token `offset` positions ahead of the cursor without consuming anything.
    ///
    /// Returns `None` when the input ends before that token.
    pub fn peek(&mut self, offset: usize) -> Option<&Token> {
        self.fill(offset + 1);
        self.pending.get(offset)
    }

    /// Consume `n` tokens.
    ///
    /// Consuming past the end of input is a no-op for the missing tokens.
    pub fn consume(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Consume one token and return it.
    pub fn advance(&mut self) -> Option<Token> {
        self.fill(1);
        let token = self.pending.pop_front()?;
        self.consumed += 1;
        self.last_consumed = Some(token.clone());
        Some(token)
    }

    /// The most recently consumed token, used to anchor errors at end of input.
    pub fn last_consumed(&self) -> Option<&Token> {
        self.last_consumed.as_ref()
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn file(&self) -> &FileRef {
        &self.file
    }

    /// Anomalies recorded while scanning so far.
    pub fn anomalies(&self) -> &[LexAnomaly] {
        &self.anomalies
    }

    pub fn into_anomalies(self) -> Vec<LexAnomaly> {
        self.anomalies
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn fill(&mut self, wanted: usize) {
        while self.pending.len() < wanted && !self.exhausted {
            match self.scan_token() {
                Some(token) => self.pending.push_back(token),
                None => self.exhausted = true,
            }
        }
    }

    fn mark(&mut self) -> Mark {
        let offset = self.chars.peek().map_or(self.source.len(), |(i, _)| *i);
        Mark {
            offset,
            line: self.line,
            column: self.column,
        }
    }

    fn peek_char(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    /// Character following the one at `offset`.
    fn char_after(&self, offset: usize, c: char) -> Option<char> {
        self.source.get(offset + c.len_utf8()..)?.chars().next()
    }

    fn bump(&mut self) {
        if let Some((_, c)) = self.chars.next() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    // ========================================================================
    // Main scanning loop
    // ========================================================================

    /// Scan the next token, or return `None` at end of input.
    fn scan_token(&mut self) -> Option<Token> {
        let mut class = CharClass::Whitespace;
        let mut text = String::new();
        let mut start = self.mark();

        loop {
            let Some((offset, c)) = self.peek_char() else {
                return self.finish_at_end(class, text, start);
            };

            match class {
                CharClass::StringLiteral => {
                    text.push(c);
                    self.bump();
                    if c == '"' {
                        return Some(self.emit(CharClass::StringLiteral, text, start));
                    }
                    continue;
                }
                CharClass::Comment => {
                    if c == '\n' {
                        class = CharClass::Whitespace;
                    } else {
                        self.bump();
                    }
                    continue;
                }
                _ => {}
            }

            match self.step(class, offset, c, &text) {
                Step::Extend(next) => {
                    class = next;
                    text.push(c);
                    self.bump();
                }
                Step::Begin(next) => {
                    if !text.is_empty() {
                        return Some(self.emit(class, text, start));
                    }
                    class = next;
                    start = self.mark();
                    self.bump();
                    if !matches!(next, CharClass::Whitespace | CharClass::Comment) {
                        text.push(c);
                    }
                }
            }
        }
    }

    /// Classify `c` relative to the run being built.
    fn step(&self, class: CharClass, offset: usize, c: char, run: &str) -> Step {
        if c.is_whitespace() {
            return Step::Begin(CharClass::Whitespace);
        }
        match class {
            CharClass::Identifier if continues_identifier(c) => return Step::Extend(CharClass::Identifier),
            CharClass::Literal if continues_literal(c, run) => return Step::Extend(CharClass::Literal),
            CharClass::Punctuation | CharClass::PunctuationCompound if punctuation::is_punctuation_char(c) => {
                let mut candidate = String::with_capacity(run.len() + c.len_utf8());
                candidate.push_str(run);
                candidate.push(c);
                if punctuation::is_compound(&candidate) {
                    return Step::Extend(CharClass::PunctuationCompound);
                }
            }
            _ => {}
        }
        Step::Begin(self.classify_fresh(offset, c))
    }

    /// Classify a character that starts a new run.
    fn classify_fresh(&self, offset: usize, c: char) -> CharClass {
        let next = self.char_after(offset, c);
        match c {
            '"' => CharClass::StringLiteral,
            '/' if next == Some('/') => CharClass::Comment,
            '-' if next.is_some_and(|n| n.is_ascii_digit()) && !self.prev_ends_operand => CharClass::Literal,
            c if c.is_ascii_digit() => CharClass::Literal,
            c if punctuation::is_punctuation_char(c) => CharClass::Punctuation,
            _ => CharClass::Identifier,
        }
    }

    fn finish_at_end(&mut self, class: CharClass, text: String, start: Mark) -> Option<Token> {
        match class {
            CharClass::Whitespace | CharClass::Comment => None,
            CharClass::StringLiteral => {
                tracing::debug!(line = start.line, column = start.column, "unterminated string literal");
                self.anomalies.push(LexAnomaly {
                    kind: LexAnomalyKind::UnterminatedString,
                    line: start.line,
                    column: start.column,
                    offset: start.offset,
                });
                None
            }
            _ => Some(self.emit(class, text, start)),
        }
    }

    fn emit(&mut self, class: CharClass, text: String, start: Mark) -> Token {
        let kind = match class {
            CharClass::Literal => TokenKind::Literal,
            CharClass::StringLiteral => TokenKind::StringLiteral,
            CharClass::Punctuation | CharClass::PunctuationCompound => {
                punctuation::from_str(&text).map_or(TokenKind::Identifier, TokenKind::Punctuation)
            }
            CharClass::Identifier | CharClass::Whitespace | CharClass::Comment => TokenKind::Identifier,
        };
        let token = Token::new(text, kind, start.line, start.column, start.offset, self.file.clone());
        self.prev_ends_operand = token.ends_operand();
        token
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.advance()
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Anything that is not whitespace, punctuation or a quote continues an identifier.
fn continues_identifier(c: char) -> bool {
    !c.is_whitespace() && !punctuation::is_punctuation_char(c) && c != '"'
}

/// Numeric literal runs accept hex digits, `.`, `_` and the `x` of a `0x` prefix.
fn continues_literal(c: char, run: &str) -> bool {
    match c {
        'x' | 'X' => matches!(run, "0" | "-0"),
        '.' | '_' => true,
        c => c.is_ascii_hexdigit(),
    }
}

/// Lex a whole source string eagerly.
///
/// This is a shorthand for draining a [`Lexer`]; anomalies are discarded.
#[tracing::instrument(skip_all, fields(source_len = source.len(), file = %file))]
pub fn lex(source: &str, file: FileRef) -> Vec<Token> {
    Lexer::new(source, file).collect()
}

// ============================================================================
// TESTS
// ============================================================================
