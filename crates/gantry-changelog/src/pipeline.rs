//! Changelog pipeline
//!
//! Composes parsing, enrichment, and rendering over an ordered commit range.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::enrich::enrich;
use crate::parser::{CommitParser, ConventionalParser};
use crate::render::render;
use crate::types::{EnrichedCommit, IssueRef, PullRequestRef, RawCommit};

/// Per-commit pull-request and issue associations, keyed by sha.
///
/// Built by the caller from whatever collaborators it has; commits without
/// an entry simply have no associations.
#[derive(Debug, Clone, Default)]
pub struct CommitAssociations {
    links: HashMap<String, CommitLinks>,
}

#[derive(Debug, Clone, Default)]
struct CommitLinks {
    pull_requests: Vec<PullRequestRef>,
    issues: Vec<IssueRef>,
}

impl CommitAssociations {
    /// Create an empty association map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the associations for a commit
    pub fn insert(
        &mut self,
        sha: impl Into<String>,
        pull_requests: Vec<PullRequestRef>,
        issues: Vec<IssueRef>,
    ) {
        self.links.insert(
            sha.into(),
            CommitLinks {
                pull_requests,
                issues,
            },
        );
    }

    /// Look up the associations for a commit
    pub fn get(&self, sha: &str) -> (&[PullRequestRef], &[IssueRef]) {
        self.links
            .get(sha)
            .map(|links| (links.pull_requests.as_slice(), links.issues.as_slice()))
            .unwrap_or((&[], &[]))
    }
}

/// The changelog pipeline: raw commits in, Markdown document out
pub struct ChangelogPipeline {
    parser: Box<dyn CommitParser>,
}

impl ChangelogPipeline {
    /// Create a pipeline with the default parser
    pub fn new() -> Self {
        Self {
            parser: Box::new(ConventionalParser::new()),
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Parse and enrich a commit range.
    ///
    /// Merge commits are dropped here and never reach the renderer.
    pub fn enrich_all(
        &self,
        commits: &[RawCommit],
        associations: &CommitAssociations,
    ) -> Vec<EnrichedCommit> {
        let mut enriched = Vec::new();

        for raw in commits {
            let parsed = self.parser.parse(&raw.message);
            if parsed.is_merge {
                debug!(sha = raw.short_sha(), "skipping merge commit");
                continue;
            }

            let (pull_requests, issues) = associations.get(&raw.sha);
            enriched.push(enrich(
                parsed,
                raw.clone(),
                pull_requests.to_vec(),
                issues.to_vec(),
            ));
        }

        enriched
    }

    /// Generate the changelog document for a commit range
    #[instrument(skip(self, commits, associations), fields(commit_count = commits.len()))]
    pub fn generate(&self, commits: &[RawCommit], associations: &CommitAssociations) -> String {
        let enriched = self.enrich_all(commits, associations);
        let output = render(&enriched);
        debug!(
            entry_count = enriched.len(),
            output_len = output.len(),
            "changelog rendered"
        );
        output
    }
}

impl Default for ChangelogPipeline {
    fn default() -> Self {
        Self::new()
    }
}
