//! Release workflow orchestration
//!
//! Drives the full flow: resolve the previous release, fetch the commit
//! range, gather per-commit associations, render the changelog, and publish
//! the release with its assets.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument, warn};

use gantry_core::config::ReleaseConfig;
use gantry_core::error::{HostError, ReleaseError, Result};
use gantry_changelog::{ChangelogPipeline, CommitAssociations};

use crate::associations::IssueIndex;
use crate::host::ReleaseHost;
use crate::resolver::{parse_tag_ref, resolve_previous};
use crate::types::{ReleaseId, ReleaseRequest, TagCandidate};

/// Options for a release run
#[derive(Debug, Clone, Default)]
pub struct ReleaseOptions {
    /// Release title (defaults to the tag name)
    pub title: Option<String>,
    /// Create the release as a draft
    pub draft: bool,
    /// Mark the release as a pre-release
    pub prerelease: bool,
    /// Asset files to upload
    pub files: Vec<PathBuf>,
    /// Render everything but do not touch the host
    pub dry_run: bool,
}

impl ReleaseOptions {
    /// Create options for a dry run
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Default::default()
        }
    }

    /// Set the release title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the asset files
    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }
}

/// Result of a release run
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseOutcome {
    /// The release tag
    pub tag: String,
    /// The resolved previous release tag, when one exists
    pub previous_tag: Option<String>,
    /// Number of commits in the range
    pub commit_count: usize,
    /// The rendered changelog body
    pub changelog: String,
    /// Identifier of the created release (absent on dry runs)
    pub release: Option<ReleaseId>,
    /// Assets uploaded to the release
    pub uploaded_assets: Vec<PathBuf>,
}

/// Execute a release against a host
pub struct ReleaseWorkflow<'a, H: ReleaseHost> {
    host: &'a H,
    config: &'a ReleaseConfig,
    options: ReleaseOptions,
    pipeline: ChangelogPipeline,
}

impl<'a, H: ReleaseHost> ReleaseWorkflow<'a, H> {
    /// Create a new workflow with the default pipeline
    pub fn new(host: &'a H, config: &'a ReleaseConfig, options: ReleaseOptions) -> Self {
        Self {
            host,
            config,
            options,
            pipeline: ChangelogPipeline::new(),
        }
    }

    /// Use a custom changelog pipeline
    pub fn with_pipeline(mut self, pipeline: ChangelogPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Run the release for a tag ref (e.g. `refs/tags/v1.2.3`) up to `head`.
    ///
    /// An invalid release tag is fatal. Per-commit lookup failures degrade
    /// to empty associations unless `fail_on_lookup_error` is set; a failure
    /// for one commit never affects the others.
    #[instrument(skip(self))]
    pub fn execute(&self, tag_ref: &str, head: &str) -> Result<ReleaseOutcome> {
        let tag = parse_tag_ref(tag_ref)?;

        let candidates: Vec<TagCandidate> = self
            .host
            .list_tags()?
            .into_iter()
            .map(|t| TagCandidate::new(t.name, t.sha))
            .collect();

        let previous = resolve_previous(&tag, &candidates)?;
        info!(
            tag = %tag,
            previous = ?previous.as_ref().map(|t| &t.name),
            "resolved previous release"
        );

        let commits = self
            .host
            .compare_commits(previous.as_ref().map(|t| t.name.as_str()), head)?;
        info!(commit_count = commits.len(), "retrieved commit range");

        let since = match &previous {
            Some(prev) => match self.host.commit_timestamp(&prev.commit_sha) {
                Ok(timestamp) => timestamp,
                Err(e) => {
                    self.tolerate(e, "previous release timestamp lookup failed")?;
                    None
                }
            },
            None => None,
        };

        let closures = match self.host.closed_issues_since(since) {
            Ok(closures) => closures,
            Err(e) => {
                self.tolerate(e, "closed-issue lookup failed")?;
                Vec::new()
            }
        };
        let issue_index = IssueIndex::new(closures);

        let mut associations = CommitAssociations::new();
        for commit in &commits {
            let pull_requests = match self.host.pull_requests_for_commit(&commit.sha) {
                Ok(pull_requests) => pull_requests,
                Err(e) => {
                    self.tolerate(e, "pull-request lookup failed")?;
                    Vec::new()
                }
            };

            let numbers: Vec<u64> = pull_requests.iter().map(|pr| pr.number).collect();
            let issues = issue_index.issues_for(&commit.sha, &numbers);
            associations.insert(commit.sha.clone(), pull_requests, issues);
        }

        let changelog = self.pipeline.generate(&commits, &associations);

        let mut outcome = ReleaseOutcome {
            tag: tag.clone(),
            previous_tag: previous.map(|t| t.name),
            commit_count: commits.len(),
            changelog: changelog.clone(),
            release: None,
            uploaded_assets: Vec::new(),
        };

        if self.options.dry_run {
            info!(tag = %tag, "dry run, skipping release creation");
            return Ok(outcome);
        }

        for file in &self.options.files {
            if !file.exists() {
                return Err(ReleaseError::AssetMissing(file.clone()).into());
            }
        }

        let request = ReleaseRequest {
            title: self.options.title.clone().unwrap_or_else(|| tag.clone()),
            tag: tag.clone(),
            body: changelog,
            draft: self.options.draft || self.config.draft,
            prerelease: self.options.prerelease || self.config.prerelease,
        };

        let release = self.host.create_release(&request)?;
        info!(tag = %tag, release = %release, "created release");

        for file in &self.options.files {
            self.host.upload_asset(&release, file)?;
            info!(path = %file.display(), "uploaded release asset");
            outcome.uploaded_assets.push(file.clone());
        }

        outcome.release = Some(release);
        Ok(outcome)
    }

    /// Apply the per-commit isolation policy to a lookup failure
    fn tolerate(&self, error: HostError, context: &str) -> Result<()> {
        if self.config.fail_on_lookup_error {
            return Err(error.into());
        }
        warn!(error = %error, "{context}, continuing with empty associations");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    use chrono::{DateTime, TimeZone, Utc};

    use gantry_core::error::GantryError;
    use gantry_changelog::types::{PullRequestRef, RawCommit};

    use crate::types::{IssueClosure, TagRef};

    #[derive(Default)]
    struct MockHost {
        tags: Vec<TagRef>,
        commits: Vec<RawCommit>,
        pull_requests: HashMap<String, Vec<PullRequestRef>>,
        closures: Vec<IssueClosure>,
        fail_pull_requests_for: Option<String>,
        compare_calls: Mutex<Vec<Option<String>>>,
        created: Mutex<Vec<ReleaseRequest>>,
        uploaded: Mutex<Vec<PathBuf>>,
    }

    impl ReleaseHost for MockHost {
        fn list_tags(&self) -> std::result::Result<Vec<TagRef>, HostError> {
            Ok(self.tags.clone())
        }

        fn compare_commits(
            &self,
            base: Option<&str>,
            _head: &str,
        ) -> std::result::Result<Vec<RawCommit>, HostError> {
            self.compare_calls
                .lock()
                .unwrap()
                .push(base.map(String::from));
            Ok(self.commits.clone())
        }

        fn pull_requests_for_commit(
            &self,
            sha: &str,
        ) -> std::result::Result<Vec<PullRequestRef>, HostError> {
            if self.fail_pull_requests_for.as_deref() == Some(sha) {
                return Err(HostError::request("pull_requests_for_commit", "boom"));
            }
            Ok(self.pull_requests.get(sha).cloned().unwrap_or_default())
        }

        fn closed_issues_since(
            &self,
            _since: Option<DateTime<Utc>>,
        ) -> std::result::Result<Vec<IssueClosure>, HostError> {
            Ok(self.closures.clone())
        }

        fn commit_timestamp(
            &self,
            _sha: &str,
        ) -> std::result::Result<Option<DateTime<Utc>>, HostError> {
            Ok(Utc.timestamp_opt(1_700_000_000, 0).single())
        }

        fn create_release(
            &self,
            request: &ReleaseRequest,
        ) -> std::result::Result<ReleaseId, HostError> {
            self.created.lock().unwrap().push(request.clone());
            Ok(ReleaseId("release-1".to_string()))
        }

        fn upload_asset(
            &self,
            _release: &ReleaseId,
            path: &Path,
        ) -> std::result::Result<(), HostError> {
            self.uploaded.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    fn raw(sha: &str, message: &str) -> RawCommit {
        RawCommit::new(sha, message)
            .with_author("Ada")
            .with_url(format!("https://example.com/commit/{sha}"))
    }

    fn host_with_history() -> MockHost {
        let mut pull_requests = HashMap::new();
        pull_requests.insert(
            "aaa1111111".to_string(),
            vec![PullRequestRef {
                number: 10,
                url: "https://example.com/pull/10".to_string(),
            }],
        );

        MockHost {
            tags: vec![
                TagRef::new("v1.0.0", "sha-a"),
                TagRef::new("v1.1.0", "sha-b"),
                TagRef::new("nightly", "sha-c"),
            ],
            commits: vec![
                raw("aaa1111111", "feat: add login"),
                raw("bbb2222222", "fix: crash on startup\n\ncloses #8"),
            ],
            pull_requests,
            closures: vec![
                IssueClosure {
                    issue_number: 8,
                    issue_url: "https://example.com/issues/8".to_string(),
                    closing_commit_sha: Some("bbb2222222".to_string()),
                    closing_pr_number: None,
                },
                IssueClosure {
                    issue_number: 9,
                    issue_url: "https://example.com/issues/9".to_string(),
                    closing_commit_sha: None,
                    closing_pr_number: Some(10),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_full_release() {
        let host = host_with_history();
        let config = ReleaseConfig::default();
        let workflow = ReleaseWorkflow::new(&host, &config, ReleaseOptions::default());

        let outcome = workflow.execute("refs/tags/v1.2.0", "HEAD").unwrap();

        assert_eq!(outcome.tag, "v1.2.0");
        assert_eq!(outcome.previous_tag.as_deref(), Some("v1.1.0"));
        assert_eq!(outcome.commit_count, 2);
        assert_eq!(outcome.release, Some(ReleaseId("release-1".to_string())));

        // Range was requested from the previous release
        let calls = host.compare_calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[Some("v1.1.0".to_string())]);

        // The created release carries the rendered changelog
        let created = host.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].tag, "v1.2.0");
        assert_eq!(created[0].title, "v1.2.0");
        assert!(created[0].body.contains("## Features"));
        assert!(created[0]
            .body
            .contains("[#10](https://example.com/pull/10)"));
        assert!(created[0]
            .body
            .contains("closes [#8](https://example.com/issues/8)"));
    }

    #[test]
    fn test_issue_matched_via_pull_request() {
        let host = host_with_history();
        let config = ReleaseConfig::default();
        let workflow = ReleaseWorkflow::new(&host, &config, ReleaseOptions::dry_run());

        let outcome = workflow.execute("refs/tags/v1.2.0", "HEAD").unwrap();

        // Issue #9 was closed by PR #10, which belongs to the first commit
        assert!(outcome
            .changelog
            .contains("closes [#9](https://example.com/issues/9)"));
    }

    #[test]
    fn test_dry_run_does_not_touch_host() {
        let host = host_with_history();
        let config = ReleaseConfig::default();
        let workflow = ReleaseWorkflow::new(&host, &config, ReleaseOptions::dry_run());

        let outcome = workflow.execute("refs/tags/v1.2.0", "HEAD").unwrap();

        assert!(outcome.release.is_none());
        assert!(!outcome.changelog.is_empty());
        assert!(host.created.lock().unwrap().is_empty());
        assert!(host.uploaded.lock().unwrap().is_empty());
    }

    #[test]
    fn test_first_release_uses_full_history() {
        let host = MockHost {
            commits: vec![raw("aaa1111111", "feat: first")],
            ..Default::default()
        };
        let config = ReleaseConfig::default();
        let workflow = ReleaseWorkflow::new(&host, &config, ReleaseOptions::dry_run());

        let outcome = workflow.execute("refs/tags/v0.1.0", "HEAD").unwrap();

        assert!(outcome.previous_tag.is_none());
        let calls = host.compare_calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[None]);
    }

    #[test]
    fn test_invalid_tag_is_fatal() {
        let host = host_with_history();
        let config = ReleaseConfig::default();
        let workflow = ReleaseWorkflow::new(&host, &config, ReleaseOptions::dry_run());

        let err = workflow
            .execute("refs/tags/not-a-version", "HEAD")
            .unwrap_err();
        assert!(matches!(err, GantryError::Version(_)));
        assert!(err.to_string().contains("not-a-version"));
    }

    #[test]
    fn test_non_tag_ref_rejected() {
        let host = host_with_history();
        let config = ReleaseConfig::default();
        let workflow = ReleaseWorkflow::new(&host, &config, ReleaseOptions::dry_run());

        let err = workflow.execute("refs/heads/main", "HEAD").unwrap_err();
        assert!(matches!(err, GantryError::Release(_)));
    }

    #[test]
    fn test_lookup_failure_degrades_to_empty() {
        let mut host = host_with_history();
        host.fail_pull_requests_for = Some("aaa1111111".to_string());
        let config = ReleaseConfig::default();
        let workflow = ReleaseWorkflow::new(&host, &config, ReleaseOptions::dry_run());

        let outcome = workflow.execute("refs/tags/v1.2.0", "HEAD").unwrap();

        // The failing commit still appears, just without its PR link;
        // the other commit keeps its associations.
        assert!(outcome.changelog.contains("add login"));
        assert!(!outcome.changelog.contains("#10"));
        assert!(outcome.changelog.contains("closes [#8]"));
    }

    #[test]
    fn test_lookup_failure_fatal_when_configured() {
        let mut host = host_with_history();
        host.fail_pull_requests_for = Some("aaa1111111".to_string());
        let config = ReleaseConfig {
            fail_on_lookup_error: true,
            ..Default::default()
        };
        let workflow = ReleaseWorkflow::new(&host, &config, ReleaseOptions::dry_run());

        let err = workflow.execute("refs/tags/v1.2.0", "HEAD").unwrap_err();
        assert!(matches!(err, GantryError::Host(_)));
    }

    #[test]
    fn test_asset_upload() {
        let temp = tempfile::TempDir::new().unwrap();
        let asset = temp.path().join("artifact.tar.gz");
        std::fs::write(&asset, b"bundle").unwrap();

        let host = host_with_history();
        let config = ReleaseConfig::default();
        let options = ReleaseOptions::default().with_files(vec![asset.clone()]);
        let workflow = ReleaseWorkflow::new(&host, &config, options);

        let outcome = workflow.execute("refs/tags/v1.2.0", "HEAD").unwrap();

        assert_eq!(outcome.uploaded_assets, vec![asset.clone()]);
        assert_eq!(host.uploaded.lock().unwrap().as_slice(), &[asset]);
    }

    #[test]
    fn test_missing_asset_rejected_before_release() {
        let host = host_with_history();
        let config = ReleaseConfig::default();
        let options =
            ReleaseOptions::default().with_files(vec![PathBuf::from("/nonexistent/artifact")]);
        let workflow = ReleaseWorkflow::new(&host, &config, options);

        let err = workflow.execute("refs/tags/v1.2.0", "HEAD").unwrap_err();
        assert!(matches!(err, GantryError::Release(_)));
        assert!(host.created.lock().unwrap().is_empty());
    }
}
