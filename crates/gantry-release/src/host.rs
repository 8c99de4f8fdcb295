//! Release host abstraction
//!
//! The hosting service owns tags, commits, pull requests, issues, and
//! releases. The workflow consumes these capabilities fully materialized;
//! pagination, retries, and authentication live behind the implementation.

use std::path::Path;

use chrono::{DateTime, Utc};

use gantry_core::error::HostError;
use gantry_changelog::types::{PullRequestRef, RawCommit};

use crate::types::{IssueClosure, ReleaseId, ReleaseRequest, TagRef};

/// Trait for release host collaborators.
///
/// The workflow is single-threaded; implementations are not required to be
/// thread-safe (a local `git2` repository, for one, is not).
pub trait ReleaseHost {
    /// List all repository tags
    fn list_tags(&self) -> Result<Vec<TagRef>, HostError>;

    /// Get the commit range between two refs, chronological,
    /// base-exclusive / head-inclusive. `base = None` means the whole
    /// history up to `head`.
    fn compare_commits(&self, base: Option<&str>, head: &str)
        -> Result<Vec<RawCommit>, HostError>;

    /// List pull requests associated with a commit
    fn pull_requests_for_commit(&self, sha: &str) -> Result<Vec<PullRequestRef>, HostError>;

    /// List issues closed since a point in time, with their closers
    fn closed_issues_since(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<IssueClosure>, HostError>;

    /// Timestamp of a commit, when known
    fn commit_timestamp(&self, sha: &str) -> Result<Option<DateTime<Utc>>, HostError>;

    /// Create a release
    fn create_release(&self, request: &ReleaseRequest) -> Result<ReleaseId, HostError>;

    /// Upload an asset file to a release
    fn upload_asset(&self, release: &ReleaseId, path: &Path) -> Result<(), HostError>;
}
