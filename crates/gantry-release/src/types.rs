//! Release types

use semver::Version;
use serde::{Deserialize, Serialize};

/// A tag as reported by a release host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRef {
    /// Tag name
    pub name: String,
    /// Sha of the commit the tag points to
    pub sha: String,
}

impl TagRef {
    /// Create a new TagRef
    pub fn new(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sha: sha.into(),
        }
    }
}

/// A tag considered for previous-release resolution
#[derive(Debug, Clone)]
pub struct TagCandidate {
    /// Tag name
    pub name: String,
    /// Sha of the commit the tag points to
    pub commit_sha: String,
    /// Parsed semantic version; `None` excludes the tag from resolution
    pub version: Option<Version>,
}

impl TagCandidate {
    /// Create a new candidate, parsing the version from the tag name
    pub fn new(name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        let name = name.into();
        let version = parse_version(&name).ok();

        Self {
            name,
            commit_sha: commit_sha.into(),
            version,
        }
    }
}

/// Parse a semantic version from a tag name, allowing a leading `v`
pub fn parse_version(tag: &str) -> Result<Version, semver::Error> {
    let tag = tag.strip_prefix('v').unwrap_or(tag);
    Version::parse(tag)
}

/// A closed issue together with what closed it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueClosure {
    /// Issue number
    pub issue_number: u64,
    /// Issue URL
    pub issue_url: String,
    /// Sha of the closing commit, when the closer was a commit
    pub closing_commit_sha: Option<String>,
    /// Number of the closing pull request, when the closer was a PR
    pub closing_pr_number: Option<u64>,
}

/// A release to be created on the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRequest {
    /// Tag the release is created for
    pub tag: String,
    /// Release title
    pub title: String,
    /// Release body (the rendered changelog)
    pub body: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as pre-release
    pub prerelease: bool,
}

/// Identifier of a created release, used for asset uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseId(pub String);

impl std::fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_parses_version() {
        let tag = TagCandidate::new("v1.2.3", "abc");
        assert_eq!(tag.version, Some(Version::new(1, 2, 3)));

        let bare = TagCandidate::new("1.2.3", "abc");
        assert_eq!(bare.version, Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_candidate_invalid_version() {
        let tag = TagCandidate::new("nightly-2020-01-01", "abc");
        assert!(tag.version.is_none());
    }

    #[test]
    fn test_parse_version_prerelease() {
        let version = parse_version("v1.9.0-rc.1").unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.pre.as_str(), "rc.1");
    }
}
