//! Analysis configuration for Epoch projects

use std::time::Duration;

/// Default quiet period between automatic rebuilds.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(15);

/// Default source file extension.
pub const DEFAULT_EXTENSION: &str = "epoch";

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// File extension (without the dot) of Epoch sources; matched case-insensitively
    pub extension: String,
    /// Minimum time between rebuilds triggered by [`crate::Project::parse_if_outdated`]
    pub debounce: Duration,
    /// Keep a file's last successful parse when it currently fails, instead of its partial result
    pub retain_last_good: bool,
    /// Report unterminated string literals as warnings
    pub warn_unterminated_strings: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            retain_last_good: true,
            warn_unterminated_strings: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the debounce interval
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Choose between last-known-good and partial symbols for failing files
    pub fn with_retain_last_good(mut self, retain: bool) -> Self {
        self.retain_last_good = retain;
        self
    }

    /// Enable or disable unterminated-string warnings
    pub fn with_warn_unterminated_strings(mut self, warn: bool) -> Self {
        self.warn_unterminated_strings = warn;
        self
    }

    /// Return `true` if `path` has the configured extension.
    pub fn matches_extension(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.extension, "epoch");
        assert_eq!(config.debounce, Duration::from_secs(15));
        assert!(config.retain_last_good);
        assert!(config.warn_unterminated_strings);
    }

    #[test]
    fn test_builder_chain() {
        let config = AnalysisConfig::new()
            .with_extension(".ep")
            .with_debounce(Duration::from_millis(250))
            .with_retain_last_good(false)
            .with_warn_unterminated_strings(false);
        assert_eq!(config.extension, "ep");
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert!(!config.retain_last_good);
        assert!(!config.warn_unterminated_strings);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let config = AnalysisConfig::default();
        assert!(config.matches_extension(Path::new("src/Main.EPOCH")));
        assert!(!config.matches_extension(Path::new("src/main.rs")));
        assert!(!config.matches_extension(Path::new("src/epoch")));
    }
}
