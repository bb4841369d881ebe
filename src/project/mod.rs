//! Project analysis: debounced rebuilds and atomically published generations.
//!
//! A [`Project`] turns the current contents of a [`SourceProvider`] into a [`Generation`]: a [`SymbolTable`] plus
//! the [`DiagnosticSink`] produced while building it. Rebuilds always start from empty collections and parse every
//! file again; the finished generation replaces the previous one in a single swap, so a reader holding a
//! [`Project::snapshot`] never observes a half-built table.
//!
//! ## Failure policy
//!
//! A file that fails to parse reports its syntax error and, when [`AnalysisConfig::retain_last_good`] is set,
//! contributes the symbols from its most recent successful parse instead. Without a previous good parse (or with
//! retention disabled) the symbols recognized before the error are used.
//!
//! A file the provider could not read reports an error and is treated like a failed parse. A file that is not
//! valid UTF-8 is parsed from its lossily decoded text and reports a warning.

pub mod sources;
pub mod symbols;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use epoch_syntax::ast::FileSymbols;
use epoch_syntax::diagnostics::{Diagnostic, DiagnosticSink, SyntaxError};
use epoch_syntax::parser::parse_file;
use epoch_syntax::source::SourceFile;

use crate::config::AnalysisConfig;
use sources::{ProjectError, SourceIssue, SourceProvider, SourceText};
use symbols::SymbolTable;

/// One complete, immutable result of a project rebuild.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    /// Monotonic rebuild counter; the empty initial generation is `0`.
    pub number: u64,
    pub symbols: SymbolTable,
    pub diagnostics: DiagnosticSink,
}

/// Mutable bookkeeping shared by rebuilds; never visible to readers.
#[derive(Debug, Default)]
struct RebuildState {
    last_parse: Option<Instant>,
    dirty: bool,
    /// Last successful parse of each file, keyed by normalized path.
    last_good: HashMap<String, FileSymbols>,
    next_generation: u64,
}

/// The analysis root for one project container.
#[derive(Debug)]
pub struct Project {
    config: AnalysisConfig,
    published: RwLock<Arc<Generation>>,
    state: Mutex<RebuildState>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Project {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            published: RwLock::new(Arc::new(Generation::default())),
            state: Mutex::new(RebuildState {
                next_generation: 1,
                ..RebuildState::default()
            }),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The most recently published generation.
    ///
    /// The returned `Arc` stays valid (and unchanged) across later rebuilds.
    pub fn snapshot(&self) -> Arc<Generation> {
        let published = self.published.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&published)
    }

    /// Force the next [`Project::parse_if_outdated`] call to rebuild regardless of the debounce window.
    pub fn invalidate(&self) {
        self.lock_state().dirty = true;
    }

    /// Rebuild unless the last rebuild finished less than the debounce interval ago.
    ///
    /// Returns `Ok(true)` if a new generation was published.
    pub fn parse_if_outdated(&self, provider: &dyn SourceProvider) -> Result<bool, ProjectError> {
        self.parse_if_outdated_at(provider, Instant::now())
    }

    /// [`Project::parse_if_outdated`] with an explicit clock reading.
    pub fn parse_if_outdated_at(&self, provider: &dyn SourceProvider, now: Instant) -> Result<bool, ProjectError> {
        let mut state = self.lock_state();
        if !state.dirty {
            if let Some(last) = state.last_parse {
                let elapsed = now.saturating_duration_since(last);
                if elapsed < self.config.debounce {
                    tracing::debug!(?elapsed, "skipping reparse inside debounce window");
                    return Ok(false);
                }
            }
        }
        self.rebuild(&mut state, provider, now)?;
        Ok(true)
    }

    /// Rebuild unconditionally and return the published generation.
    pub fn reparse(&self, provider: &dyn SourceProvider) -> Result<Arc<Generation>, ProjectError> {
        let mut state = self.lock_state();
        self.rebuild(&mut state, provider, Instant::now())
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RebuildState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[tracing::instrument(skip_all, fields(generation = state.next_generation))]
    fn rebuild(
        &self,
        state: &mut RebuildState,
        provider: &dyn SourceProvider,
        now: Instant,
    ) -> Result<Arc<Generation>, ProjectError> {
        let files = provider.sources()?;

        let mut symbols = SymbolTable::new();
        let mut diagnostics = DiagnosticSink::new();
        let mut seen = HashSet::with_capacity(files.len());

        for source in files {
            let (key, contribution) = self.analyze(state, source, &mut diagnostics);
            seen.insert(key);
            symbols.merge_file(contribution);
        }
        state.last_good.retain(|key, _| seen.contains(key));

        let generation = Arc::new(Generation {
            number: state.next_generation,
            symbols,
            diagnostics,
        });
        state.next_generation += 1;
        state.last_parse = Some(now);
        state.dirty = false;

        {
            let mut published = self.published.write().unwrap_or_else(PoisonError::into_inner);
            *published = Arc::clone(&generation);
        }
        tracing::info!(
            generation = generation.number,
            files = generation.symbols.file_count(),
            functions = generation.symbols.function_count(),
            errors = generation.diagnostics.errors().count(),
            "published project generation"
        );
        Ok(generation)
    }

    /// Parse one file and decide what it contributes to the generation being built.
    fn analyze(
        &self,
        state: &mut RebuildState,
        source: SourceText,
        diagnostics: &mut DiagnosticSink,
    ) -> (String, FileSymbols) {
        let file = Arc::new(SourceFile::new(source.path));
        let key = file.key().to_string();

        match &source.issue {
            Some(issue @ SourceIssue::Unreadable(_)) => {
                tracing::warn!(file = %file, "{issue}");
                diagnostics.push(Diagnostic::from(SyntaxError::at_start(Arc::clone(&file), issue.to_string())));
                let contribution = self.retained(state, &key).unwrap_or_else(|| FileSymbols::new(file));
                return (key, contribution);
            }
            Some(issue @ SourceIssue::InvalidUtf8) => {
                diagnostics.push(Diagnostic::warning(Arc::clone(&file), issue.to_string(), 0, 0, 0));
            }
            None => {}
        }

        match parse_file(&source.text, Arc::clone(&file)) {
            Ok(mut parsed) => {
                diagnostics.extend(self.take_warnings(&mut parsed));
                state.last_good.insert(key.clone(), parsed.clone());
                (key, parsed)
            }
            Err(failure) => {
                tracing::warn!(
                    file = %file,
                    line = failure.error.line + 1,
                    column = failure.error.column + 1,
                    "{}",
                    failure.error.message
                );
                let mut partial = *failure.partial;
                diagnostics.extend(self.take_warnings(&mut partial));
                diagnostics.push(Diagnostic::from(failure.error));

                match self.retained(state, &key) {
                    Some(previous) => {
                        tracing::debug!(file = %file, "using last successful parse");
                        (key, previous)
                    }
                    None => (key, partial),
                }
            }
        }
    }

    /// The last successful parse of `key`, when retention is enabled.
    fn retained(&self, state: &RebuildState, key: &str) -> Option<FileSymbols> {
        if self.config.retain_last_good {
            state.last_good.get(key).cloned()
        } else {
            None
        }
    }

    fn take_warnings(&self, symbols: &mut FileSymbols) -> Vec<Diagnostic> {
        let warnings = std::mem::take(&mut symbols.warnings);
        if self.config.warn_unterminated_strings {
            warnings
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::InMemorySources;
    use std::time::Duration;

    #[test]
    fn test_initial_generation_is_empty() {
        let project = Project::default();
        let snapshot = project.snapshot();
        assert_eq!(snapshot.number, 0);
        assert_eq!(snapshot.symbols.file_count(), 0);
        assert!(snapshot.diagnostics.is_empty());
    }

    #[test]
    fn test_debounce_window() {
        let project = Project::new(AnalysisConfig::new().with_debounce(Duration::from_secs(15)));
        let sources = InMemorySources::new().with("a.epoch", "f : nothing");
        let start = Instant::now();

        assert!(project.parse_if_outdated_at(&sources, start).unwrap());
        assert!(!project.parse_if_outdated_at(&sources, start + Duration::from_secs(14)).unwrap());
        assert!(project.parse_if_outdated_at(&sources, start + Duration::from_secs(15)).unwrap());
        assert_eq!(project.snapshot().number, 2);
    }

    #[test]
    fn test_invalidate_bypasses_debounce() {
        let project = Project::default();
        let sources = InMemorySources::new().with("a.epoch", "f : nothing");
        let start = Instant::now();
        assert!(project.parse_if_outdated_at(&sources, start).unwrap());
        project.invalidate();
        assert!(project.parse_if_outdated_at(&sources, start).unwrap());
        assert!(!project.parse_if_outdated_at(&sources, start).unwrap());
    }

    #[test]
    fn test_warnings_can_be_suppressed() {
        let source = "g : nothing\n\"dangling";
        let quiet = Project::new(AnalysisConfig::new().with_warn_unterminated_strings(false));
        let loud = Project::default();
        let sources = InMemorySources::new().with("a.epoch", source);
        assert!(quiet.reparse(&sources).unwrap().diagnostics.is_empty());
        assert_eq!(loud.reparse(&sources).unwrap().diagnostics.warnings().count(), 1);
    }
}
