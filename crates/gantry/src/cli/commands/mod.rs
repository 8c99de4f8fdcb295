//! CLI commands

mod changelog;
mod release;

pub use changelog::ChangelogCommand;
pub use release::ReleaseCommand;

use gantry_core::config::ChangelogConfig;
use gantry_changelog::{ConventionalParser, ParserConfig};

/// Build the commit parser from configuration overrides
pub(crate) fn build_parser(config: &ChangelogConfig) -> anyhow::Result<ConventionalParser> {
    let mut parser_config = ParserConfig::default();

    if let Some(pattern) = &config.merge_pattern {
        parser_config = parser_config.with_merge_pattern(pattern);
    }
    if let Some(keywords) = &config.note_keywords {
        parser_config = parser_config.with_note_keywords(keywords.clone());
    }

    Ok(ConventionalParser::with_config(parser_config)?)
}
