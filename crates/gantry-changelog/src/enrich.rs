//! Commit enrichment
//!
//! Merges a parsed commit with externally supplied pull-request and issue
//! associations. Purely a merge step: no lookups happen here.

use std::collections::HashSet;

use crate::breaking::is_breaking_change;
use crate::types::{EnrichedCommit, IssueRef, ParsedCommit, PullRequestRef, RawCommit};

/// Build an enriched commit from a parsed message and its associations.
///
/// Associations are de-duplicated by number; the first-seen URL wins.
/// Empty association lists are the common case and are valid input.
pub fn enrich(
    parsed: ParsedCommit,
    raw: RawCommit,
    pull_requests: Vec<PullRequestRef>,
    issues: Vec<IssueRef>,
) -> EnrichedCommit {
    let breaking_change = is_breaking_change(parsed.body.as_deref(), parsed.footer.as_deref());

    EnrichedCommit {
        pull_requests: dedup_pull_requests(pull_requests),
        issues: dedup_issues(issues),
        breaking_change,
        parsed,
        raw,
    }
}

fn dedup_pull_requests(refs: Vec<PullRequestRef>) -> Vec<PullRequestRef> {
    let mut seen = HashSet::new();
    refs.into_iter().filter(|r| seen.insert(r.number)).collect()
}

fn dedup_issues(refs: Vec<IssueRef>) -> Vec<IssueRef> {
    let mut seen = HashSet::new();
    refs.into_iter().filter(|r| seen.insert(r.number)).collect()
}
