//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for Gantry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema")]
    pub schema: Option<String>,

    /// Project name
    pub name: Option<String>,

    /// Git configuration
    pub git: GitConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Release configuration
    pub release: ReleaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            name: None,
            git: GitConfig::default(),
            changelog: ChangelogConfig::default(),
            release: ReleaseConfig::default(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote used to derive commit URLs
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Override for the merge-commit header pattern.
    ///
    /// Default: `^Merge pull request #(\d+) from (.+)$`
    pub merge_pattern: Option<String>,

    /// Override for the footer note keywords.
    ///
    /// Default: `BREAKING CHANGE`, `BREAKING CHANGES`
    pub note_keywords: Option<Vec<String>>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            merge_pattern: None,
            note_keywords: None,
        }
    }
}

/// Release configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Create releases as drafts
    pub draft: bool,

    /// Mark releases as pre-releases
    pub prerelease: bool,

    /// Abort the run when a per-commit PR/issue lookup fails.
    ///
    /// When false (the default) a failed lookup degrades to empty
    /// associations for that commit only.
    pub fail_on_lookup_error: bool,

    /// Asset files to upload with each release
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            draft: false,
            prerelease: false,
            fail_on_lookup_error: false,
            files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.git.remote, "origin");
        assert_eq!(config.changelog.file, PathBuf::from("CHANGELOG.md"));
        assert!(!config.release.draft);
        assert!(!config.release.fail_on_lookup_error);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let yaml = "release:\n  draft: true\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.release.draft);
        // Unspecified sections fall back to defaults
        assert_eq!(config.git.remote, "origin");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.git.remote, config.git.remote);
    }
}
