//! Configuration validation

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if let Some(pattern) = &config.changelog.merge_pattern {
        if let Err(e) = Regex::new(pattern) {
            return Err(ConfigError::InvalidValue {
                field: "changelog.merge_pattern".to_string(),
                message: e.to_string(),
            }
            .into());
        }
    }

    if let Some(keywords) = &config.changelog.note_keywords {
        if keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "changelog.note_keywords".to_string(),
                message: "keywords cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_remote_rejected() {
        let mut config = Config::default();
        config.git.remote = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_merge_pattern_rejected() {
        let mut config = Config::default();
        config.changelog.merge_pattern = Some("([".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_note_keyword_rejected() {
        let mut config = Config::default();
        config.changelog.note_keywords = Some(vec!["BREAKING CHANGE".to_string(), " ".to_string()]);
        assert!(validate_config(&config).is_err());
    }
}
