//! Commit range operations

use git2::{ObjectType, Sort};
use tracing::{debug, instrument};

use gantry_changelog::types::RawCommit;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Commits between `base` (exclusive) and `head` (inclusive), in
    /// chronological order. `base = None` walks the whole history.
    #[instrument(skip(self))]
    pub fn commits_between(&self, base: Option<&str>, head: &str) -> Result<Vec<RawCommit>> {
        let head_oid = self
            .repo
            .revparse_single(head)?
            .peel(ObjectType::Commit)?
            .id();

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head_oid)?;

        if let Some(base) = base {
            let base_oid = self
                .repo
                .revparse_single(base)?
                .peel(ObjectType::Commit)?
                .id();
            revwalk.hide(base_oid)?;
        }

        let url_base = self.commit_url_base();

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_raw(&commit, url_base.as_deref()));
        }

        // revwalk yields newest first; the changelog wants oldest first
        commits.reverse();

        debug!(base = ?base, head, count = commits.len(), "collected commit range");
        Ok(commits)
    }
}

/// Convert a git2 Commit to a RawCommit
fn commit_to_raw(commit: &git2::Commit<'_>, url_base: Option<&str>) -> RawCommit {
    let sha = commit.id().to_string();
    let url = url_base
        .map(|base| format!("{base}/{sha}"))
        .unwrap_or_default();

    let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

    let mut raw = RawCommit::new(sha, message).with_url(url);
    if let Some(name) = commit.author().name() {
        raw = raw.with_author(name);
    }
    raw
}
