//! Gantry Changelog - commit classification and changelog synthesis
//!
//! This crate parses raw commit messages into structured conventional-commit
//! records, associates them with pull requests and issues, and renders the
//! grouped release changelog.

pub mod breaking;
pub mod enrich;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod types;

pub use breaking::is_breaking_change;
pub use enrich::enrich;
pub use parser::{CommitParser, ConventionalParser, ParserConfig};
pub use pipeline::{ChangelogPipeline, CommitAssociations};
pub use render::render;
pub use types::{CommitType, EnrichedCommit, ParsedCommit, RawCommit};
