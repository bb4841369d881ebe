//! Source enumeration for a project.
//!
//! A [`SourceProvider`] answers "which files belong to this project, and what do they contain right now". The
//! project asks for a fresh listing on every rebuild, so providers decide how current the text is (disk contents,
//! editor buffers, fixtures).

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use epoch_syntax::source::normalize_path;
use thiserror::Error;

/// Errors that occur while enumerating or reading project sources
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project root {0} is not a directory or source file")]
    InvalidRoot(PathBuf),
}

/// Why a listed file's text is not exactly what is on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceIssue {
    /// The file could not be read; `text` is empty.
    Unreadable(String),
    /// The file is not valid UTF-8; invalid sequences were replaced with `U+FFFD`.
    InvalidUtf8,
}

impl fmt::Display for SourceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceIssue::Unreadable(reason) => write!(f, "failed to read source file: {reason}"),
            SourceIssue::InvalidUtf8 => write!(f, "source file is not valid UTF-8; invalid bytes were replaced"),
        }
    }
}

/// The current text of one project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
    pub issue: Option<SourceIssue>,
}

impl SourceText {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            issue: None,
        }
    }

    /// Read `path` from disk. Problems are recorded on the result instead of failing the listing.
    pub fn read(path: PathBuf) -> Self {
        match fs::read(&path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Self::new(path, text),
                Err(err) => Self {
                    text: String::from_utf8_lossy(err.as_bytes()).into_owned(),
                    path,
                    issue: Some(SourceIssue::InvalidUtf8),
                },
            },
            Err(err) => Self {
                path,
                text: String::new(),
                issue: Some(SourceIssue::Unreadable(err.to_string())),
            },
        }
    }
}

/// Enumerate a project's source files.
pub trait SourceProvider {
    /// Return every source file with its current text.
    ///
    /// An `Err` means the listing itself failed. A single file that cannot be read is returned with a
    /// [`SourceIssue`] so the rest of the project still rebuilds.
    fn sources(&self) -> Result<Vec<SourceText>, ProjectError>;
}

/// All files with a given extension below a directory (or a single file).
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extension: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }

    /// Recursively collect matching files, skipping hidden and build directories.
    fn collect(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ProjectError> {
        let entries = fs::read_dir(dir).map_err(|source| ProjectError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                if !name.starts_with('.') && name != "target" {
                    self.collect(&path, out)?;
                }
            } else if self.has_extension(&path) {
                out.push(path);
            }
        }
        Ok(())
    }
}

impl SourceProvider for DirectorySource {
    fn sources(&self) -> Result<Vec<SourceText>, ProjectError> {
        let mut paths = Vec::new();
        if self.root.is_file() {
            paths.push(self.root.clone());
        } else if self.root.is_dir() {
            self.collect(&self.root, &mut paths)?;
        } else {
            return Err(ProjectError::InvalidRoot(self.root.clone()));
        }
        paths.sort();
        Ok(paths.into_iter().map(SourceText::read).collect())
    }
}

/// Sources held in memory, keyed case-insensitively by path.
///
/// Useful for editor buffers and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySources {
    files: BTreeMap<String, SourceText>,
}

impl InMemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.insert_source(SourceText::new(path, text));
    }

    /// Add or replace a file, keeping any [`SourceIssue`] it carries.
    pub fn insert_source(&mut self, source: SourceText) {
        self.files.insert(normalize_path(&source.path), source);
    }

    /// Builder form of [`InMemorySources::insert`].
    pub fn with(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn remove(&mut self, path: impl AsRef<Path>) -> Option<SourceText> {
        self.files.remove(&normalize_path(path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceProvider for InMemorySources {
    fn sources(&self) -> Result<Vec<SourceText>, ProjectError> {
        Ok(self.files.values().cloned().collect())
    }
}
