//! Commit message parsing

mod conventional;
mod types;

pub use conventional::ConventionalParser;
pub use types::*;

use crate::types::ParsedCommit;

/// Trait for commit message parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit message into a structured record.
    ///
    /// Total over arbitrary input: messages that do not match the
    /// conventional grammar still yield a record with no category.
    fn parse(&self, message: &str) -> ParsedCommit;
}
