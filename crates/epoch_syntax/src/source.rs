//! Source-file identity.
//!
//! Every token, scope and diagnostic points back at the [`SourceFile`] it came from. Paths are compared
//! case-insensitively throughout, so a file is identified by its normalized [`SourceFile::key`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared handle to a source file; cheap to clone into every token.
pub type FileRef = Arc<SourceFile>;

/// A file registered with a project.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    key: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = normalize_path(&path);
        Self { path, key }
    }

    /// A file with no on-disk location (snippets, tests, fuzzing).
    pub fn anonymous() -> Self {
        Self::new("<memory>")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Normalized lookup key (lower-cased, forward slashes).
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SourceFile {}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Normalize a path into the case-insensitive key used for scope lookups.
///
/// Separators become `/`, `.` segments are dropped and `..` folds into its parent lexically, so `./main.epoch`,
/// `lib/../main.epoch` and `MAIN.epoch` share one key.
pub fn normalize_path(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/").to_lowercase();
    let absolute = text.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in text.split('/') {
        match segment {
            "" | "." => {}
            ".." if segments.last().is_some_and(|last| *last != "..") => {
                segments.pop();
            }
            ".." if absolute => {}
            _ => segments.push(segment),
        }
    }
    let joined = segments.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_compare_case_insensitively() {
        let a = SourceFile::new("Src/Main.epoch");
        let b = SourceFile::new("src/main.EPOCH");
        assert_eq!(a, b);
        assert_eq!(a.key(), "src/main.epoch");
        // The original spelling is preserved for display.
        assert_eq!(a.to_string(), "Src/Main.epoch");
    }

    #[test]
    fn test_backslashes_normalize() {
        assert_eq!(normalize_path(Path::new(r"C:\Proj\A.epoch")), "c:/proj/a.epoch");
    }

    #[test]
    fn test_dot_segments_normalize() {
        assert_eq!(normalize_path(Path::new("./main.epoch")), "main.epoch");
        assert_eq!(normalize_path(Path::new("lib/./../Main.epoch")), "main.epoch");
        assert_eq!(normalize_path(Path::new("../up/a.epoch")), "../up/a.epoch");
        assert_eq!(normalize_path(Path::new("/root/../a.epoch")), "/a.epoch");
        assert_eq!(normalize_path(Path::new("/../a.epoch")), "/a.epoch");
        assert_eq!(SourceFile::new("./Src/A.epoch"), SourceFile::new("src/a.epoch"));
    }
}
