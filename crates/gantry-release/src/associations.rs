//! Issue-to-commit association matching

use gantry_changelog::types::IssueRef;

use crate::types::IssueClosure;

/// Index of closed issues, queried per commit.
///
/// An issue is associated with a commit when its closer is that commit, or
/// when its closing pull request is one of the commit's associated PRs.
#[derive(Debug, Clone, Default)]
pub struct IssueIndex {
    closures: Vec<IssueClosure>,
}

impl IssueIndex {
    /// Build an index from materialized issue closures
    pub fn new(closures: Vec<IssueClosure>) -> Self {
        Self { closures }
    }

    /// Number of indexed closures
    pub fn len(&self) -> usize {
        self.closures.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.closures.is_empty()
    }

    /// Issues associated with a commit, in closure order
    pub fn issues_for(&self, sha: &str, pull_request_numbers: &[u64]) -> Vec<IssueRef> {
        self.closures
            .iter()
            .filter(|closure| {
                closure.closing_commit_sha.as_deref() == Some(sha)
                    || closure
                        .closing_pr_number
                        .is_some_and(|number| pull_request_numbers.contains(&number))
            })
            .map(|closure| IssueRef {
                number: closure.issue_number,
                url: closure.issue_url.clone(),
            })
            .collect()
    }
}
