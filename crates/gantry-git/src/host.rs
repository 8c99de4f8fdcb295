//! Local-repository release host
//!
//! Backs the `ReleaseHost` capabilities a local checkout can answer: tags,
//! commit ranges, and commit timestamps. A local repository knows nothing
//! about pull requests or issues (those associations come back empty), and
//! it cannot publish releases.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use git2::Oid;

use gantry_core::error::HostError;
use gantry_changelog::types::{PullRequestRef, RawCommit};
use gantry_release::types::{IssueClosure, ReleaseId, ReleaseRequest, TagRef};
use gantry_release::ReleaseHost;

use crate::repository::GitRepo;

impl ReleaseHost for GitRepo {
    fn list_tags(&self) -> Result<Vec<TagRef>, HostError> {
        self.tags().map_err(|e| HostError::request("list_tags", e))
    }

    fn compare_commits(
        &self,
        base: Option<&str>,
        head: &str,
    ) -> Result<Vec<RawCommit>, HostError> {
        self.commits_between(base, head)
            .map_err(|e| HostError::request("compare_commits", e))
    }

    fn pull_requests_for_commit(&self, _sha: &str) -> Result<Vec<PullRequestRef>, HostError> {
        Ok(Vec::new())
    }

    fn closed_issues_since(
        &self,
        _since: Option<DateTime<Utc>>,
    ) -> Result<Vec<IssueClosure>, HostError> {
        Ok(Vec::new())
    }

    fn commit_timestamp(&self, sha: &str) -> Result<Option<DateTime<Utc>>, HostError> {
        let oid = Oid::from_str(sha).map_err(|e| HostError::request("commit_timestamp", e))?;

        match self.repo.find_commit(oid) {
            Ok(commit) => Ok(Utc.timestamp_opt(commit.time().seconds(), 0).single()),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(HostError::request("commit_timestamp", e)),
        }
    }

    fn create_release(&self, _request: &ReleaseRequest) -> Result<ReleaseId, HostError> {
        Err(HostError::Unsupported("create_release".to_string()))
    }

    fn upload_asset(&self, _release: &ReleaseId, _path: &Path) -> Result<(), HostError> {
        Err(HostError::Unsupported("upload_asset".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    fn setup_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "feat: initial", &tree, &[])
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_local_associations_are_empty() {
        let (_temp, repo) = setup_repo();

        assert!(repo.pull_requests_for_commit("abc").unwrap().is_empty());
        assert!(repo.closed_issues_since(None).unwrap().is_empty());
    }

    #[test]
    fn test_commit_timestamp() {
        let (_temp, repo) = setup_repo();
        let head = repo.head_commit().unwrap().id().to_string();

        let timestamp = repo.commit_timestamp(&head).unwrap();
        assert!(timestamp.is_some());
    }

    #[test]
    fn test_publishing_unsupported() {
        let (_temp, repo) = setup_repo();
        let request = ReleaseRequest {
            tag: "v1.0.0".to_string(),
            title: "v1.0.0".to_string(),
            body: String::new(),
            draft: false,
            prerelease: false,
        };

        assert!(matches!(
            repo.create_release(&request),
            Err(HostError::Unsupported(_))
        ));
    }
}
