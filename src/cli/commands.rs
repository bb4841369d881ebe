//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use epoch_syntax::ast::FileSymbols;
use epoch_syntax::diagnostics::Diagnostic;
use epoch_syntax::lexer::{Lexer, TokenKind};
use epoch_syntax::parser;
use epoch_syntax::source::SourceFile;

use crate::config::AnalysisConfig;
use crate::project::sources::DirectorySource;
use crate::project::{Generation, Project};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    // Check file size before reading
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

/// Build one project generation from the files under `path`.
fn analyze(path: &Path, config: AnalysisConfig) -> CliResult<Arc<Generation>> {
    let sources = DirectorySource::new(path, config.extension.clone());
    let project = Project::new(config);
    project
        .reparse(&sources)
        .map_err(|e| CliError::failure(format!("Error: {}", e)))
}

/// Render a diagnostic with a source snippet, falling back to the one-line form if the file cannot be re-read.
fn render(diagnostic: &Diagnostic) -> String {
    match fs::read_to_string(diagnostic.file.path()) {
        Ok(source) => format!("{:?}", miette::Report::new(diagnostic.to_report(&source))),
        Err(_) => diagnostic.to_string(),
    }
}

// ============================================================================
// Project commands
// ============================================================================

/// Parse every source file and report syntax errors and warnings.
pub fn check(path: &Path, config: AnalysisConfig) -> CliResult<ExitCode> {
    let generation = analyze(path, config)?;
    let diagnostics = &generation.diagnostics;

    for diagnostic in diagnostics {
        eprintln!("{}", render(diagnostic));
    }

    let errors = diagnostics.errors().count();
    let warnings = diagnostics.warnings().count();
    println!(
        "Checked {} file(s): {} error(s), {} warning(s)",
        generation.symbols.file_count(),
        errors,
        warnings
    );

    if errors > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Print the variables visible at a 1-based `line`/`column` in `file`.
pub fn symbols(path: &Path, config: AnalysisConfig, file: &Path, line: u32, column: u32) -> CliResult<ExitCode> {
    let generation = analyze(path, config)?;
    let resolved = resolve_in_project(path, file);
    let visible = generation
        .symbols
        .available_variables(&resolved, line.saturating_sub(1), column.saturating_sub(1));

    if visible.is_empty() {
        println!("No variables visible at {}:{}:{}", file.display(), line, column);
        return Ok(ExitCode::SUCCESS);
    }
    for variable in visible {
        println!("{:<10} {}", variable.origin.as_str(), variable);
    }
    Ok(ExitCode::SUCCESS)
}

/// A relative file is looked up inside the project root first, then relative to the working directory.
fn resolve_in_project(root: &Path, file: &Path) -> PathBuf {
    if file.is_relative() && root.is_dir() {
        let joined = root.join(file);
        if joined.is_file() {
            return joined;
        }
    }
    file.to_path_buf()
}

/// Print every function overload, sorted by name.
pub fn signatures(path: &Path, config: AnalysisConfig) -> CliResult<ExitCode> {
    let generation = analyze(path, config)?;
    for overload in generation.symbols.function_signatures() {
        println!("{}", overload);
    }
    for diagnostic in generation.diagnostics.errors() {
        eprintln!("{}", diagnostic);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Debug commands
// ============================================================================

/// Tokenize a file and print one token per line.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let mut lexer = Lexer::new(&source, Arc::new(SourceFile::new(file_path)));

    for tok in lexer.by_ref() {
        let kind = match tok.kind {
            TokenKind::Identifier => "identifier",
            TokenKind::Punctuation(_) => "punctuation",
            TokenKind::Literal => "literal",
            TokenKind::StringLiteral => "string",
        };
        println!("{}:{}\t{:<12}{}", tok.line + 1, tok.column + 1, kind, tok.text);
    }
    for anomaly in lexer.anomalies() {
        eprintln!(
            "{}:{}:{}: warning: {}",
            file_path.display(),
            anomaly.line + 1,
            anomaly.column + 1,
            anomaly.kind.message()
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse a single file and print the declarations it contributes.
pub fn parse_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let file = Arc::new(SourceFile::new(file_path));

    match parser::parse_file(&source, file) {
        Ok(symbols) => {
            print_declarations(&symbols);
            for warning in &symbols.warnings {
                eprintln!("{}", warning);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            print_declarations(&failure.partial);
            let diagnostic = Diagnostic::from(failure.error);
            let msg = format!("{:?}", miette::Report::new(diagnostic.to_report(&source)));
            Err(CliError::failure(msg.trim_end()))
        }
    }
}

fn print_declarations(symbols: &FileSymbols) {
    for sum in &symbols.sum_types {
        println!("{}", sum);
    }
    for alias in &symbols.strong_aliases {
        println!("type {} : {}", alias.name.text, alias.base);
    }
    for alias in &symbols.weak_aliases {
        println!("alias {} = {}", alias.name.text, alias.target);
    }
    for structure in &symbols.structures {
        println!("{}", structure);
    }
    for global in &symbols.globals {
        println!("global {}", global);
    }
    for function in &symbols.functions {
        for overload in &function.overloads {
            println!("{}", overload);
        }
    }
}
