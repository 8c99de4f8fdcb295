//! Changelog types

use serde::{Deserialize, Serialize};

/// A raw commit as supplied by a collaborator (hosted API or local git)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommit {
    /// Full commit sha
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// Author name, when known
    pub author: Option<String>,
    /// Canonical URL of the commit
    pub url: String,
}

impl RawCommit {
    /// Create a new RawCommit
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            author: None,
            url: String::new(),
        }
    }

    /// Set the author name
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the commit URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// First 7 characters of the sha
    pub fn short_sha(&self) -> &str {
        let end = self
            .sha
            .char_indices()
            .nth(7)
            .map_or(self.sha.len(), |(i, _)| i);
        &self.sha[..end]
    }
}

/// A note block extracted from a commit footer (e.g. a breaking-change note)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Note keyword (e.g. "BREAKING CHANGE")
    pub title: String,
    /// Note text
    pub text: String,
}

/// An issue/PR cross-reference extracted from commit text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    /// Action verb (lowercased), empty when the reference is bare
    pub action: String,
    /// Owner, when the reference is qualified as `owner/repo#N`
    pub owner: Option<String>,
    /// Repository, when the reference is qualified
    pub repository: Option<String>,
    /// Referenced issue number
    pub issue: u64,
    /// The raw matched substring
    pub raw: String,
    /// Prefix punctuation (`#`)
    pub prefix: String,
}

/// A commit message parsed against the conventional-commit grammar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// Commit category, `None` when the header does not match the grammar
    /// or the type word is not a recognized category
    pub commit_type: Option<CommitType>,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// One-line summary without the type/scope prefix; falls back to the
    /// full header when the grammar does not match
    pub subject: String,
    /// Full first line of the message
    pub header: String,
    /// Free text between the header and the footer
    pub body: Option<String>,
    /// Trailing notes block
    pub footer: Option<String>,
    /// Extracted notes (breaking-change family)
    pub notes: Vec<Note>,
    /// Whether the header matches the merge-commit pattern
    pub is_merge: bool,
    /// Referenced user handles, first-seen order
    pub mentions: Vec<String>,
    /// Issue/PR cross-references from body and footer
    pub references: Vec<Reference>,
}

/// An associated pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// Pull request number
    pub number: u64,
    /// Pull request URL
    pub url: String,
}

/// An associated issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    /// Issue number
    pub number: u64,
    /// Issue URL
    pub url: String,
}

/// A parsed commit merged with its associations and breaking-change status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedCommit {
    /// The parsed message
    pub parsed: ParsedCommit,
    /// The originating raw commit
    pub raw: RawCommit,
    /// Associated pull requests, de-duplicated by number
    pub pull_requests: Vec<PullRequestRef>,
    /// Associated issues, de-duplicated by number
    pub issues: Vec<IssueRef>,
    /// Whether the commit is a breaking change
    pub breaking_change: bool,
}

/// Commit type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    /// New feature
    Feat,
    /// Bug fix
    Fix,
    /// Documentation
    Docs,
    /// Code style (formatting, etc.)
    Style,
    /// Refactoring
    Refactor,
    /// Performance improvement
    Perf,
    /// Tests
    Test,
    /// Build system
    Build,
    /// CI configuration
    Ci,
    /// Chores (maintenance)
    Chore,
    /// Reverting changes
    Revert,
}

/// Ordered category table: section headers are emitted in this order,
/// after "Breaking Changes" and before the residual "Commits" bucket.
pub const SECTIONS: [(CommitType, &str); 11] = [
    (CommitType::Feat, "Features"),
    (CommitType::Fix, "Bug Fixes"),
    (CommitType::Docs, "Documentation"),
    (CommitType::Style, "Styles"),
    (CommitType::Refactor, "Code Refactoring"),
    (CommitType::Perf, "Performance Improvements"),
    (CommitType::Test, "Tests"),
    (CommitType::Build, "Builds"),
    (CommitType::Ci, "Continuous Integration"),
    (CommitType::Chore, "Chores"),
    (CommitType::Revert, "Reverts"),
];

impl CommitType {
    /// Get the section title for this type
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Feat => "Features",
            Self::Fix => "Bug Fixes",
            Self::Docs => "Documentation",
            Self::Style => "Styles",
            Self::Refactor => "Code Refactoring",
            Self::Perf => "Performance Improvements",
            Self::Test => "Tests",
            Self::Build => "Builds",
            Self::Ci => "Continuous Integration",
            Self::Chore => "Chores",
            Self::Revert => "Reverts",
        }
    }
}

impl std::str::FromStr for CommitType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            "revert" => Ok(Self::Revert),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_type_from_str() {
        assert_eq!("feat".parse::<CommitType>().unwrap(), CommitType::Feat);
        assert_eq!("revert".parse::<CommitType>().unwrap(), CommitType::Revert);
        assert!("unknown".parse::<CommitType>().is_err());
        // Membership is exact: aliases and case variants are not categories
        assert!("feature".parse::<CommitType>().is_err());
        assert!("Fix".parse::<CommitType>().is_err());
    }

    #[test]
    fn test_sections_order_matches_titles() {
        for (commit_type, title) in SECTIONS {
            assert_eq!(commit_type.section_title(), title);
        }
        assert_eq!(SECTIONS[0].1, "Features");
        assert_eq!(SECTIONS[10].1, "Reverts");
    }

    #[test]
    fn test_short_sha() {
        let commit = RawCommit::new("abcdef1234567890", "feat: x");
        assert_eq!(commit.short_sha(), "abcdef1");

        let short = RawCommit::new("abc", "feat: x");
        assert_eq!(short.short_sha(), "abc");
    }
}
