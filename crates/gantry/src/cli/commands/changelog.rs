//! Changelog command

use clap::Args;
use console::style;
use semver::Version;
use tracing::info;

use gantry_core::config::load_config_or_default;
use gantry_changelog::{ChangelogPipeline, CommitAssociations};
use gantry_git::GitRepo;
use gantry_release::resolve_previous;

use crate::cli::{Cli, OutputFormat};

/// Generate the changelog for a release tag
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Release tag to generate for (default: the highest version tag)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to configured changelog file)
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(tag = ?self.tag, write = self.write, "executing changelog command");
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);

        let repo = GitRepo::discover(&cwd)?.with_remote(&config.git.remote);
        let candidates = repo.tag_candidates()?;

        let tag = match &self.tag {
            Some(tag) => tag.clone(),
            None => highest_version_tag(&candidates).ok_or_else(|| {
                anyhow::anyhow!("no semantic-version tags found; pass --tag")
            })?,
        };

        let previous = resolve_previous(&tag, &candidates)?;

        // For an existing tag the range ends at the tag itself; for an
        // upcoming release it ends at HEAD.
        let head = if candidates.iter().any(|c| c.name == tag) {
            tag.clone()
        } else {
            "HEAD".to_string()
        };

        let commits = repo.commits_between(previous.as_ref().map(|t| t.name.as_str()), &head)?;

        if commits.is_empty() {
            if !cli.quiet {
                println!(
                    "{}",
                    style("No commits found since the previous release.").yellow()
                );
            }
            return Ok(());
        }

        // Local generation has no PR/issue collaborators; empty
        // associations are valid input.
        let pipeline = ChangelogPipeline::new().with_parser(super::build_parser(&config.changelog)?);
        let associations = CommitAssociations::new();
        let changelog = pipeline.generate(&commits, &associations);

        if self.write {
            let output_path = self
                .output
                .clone()
                .unwrap_or_else(|| cwd.join(&config.changelog.file));

            let entry = format!("# {tag}\n\n{changelog}\n");

            // Prepend to existing file or create new
            if output_path.exists() {
                let existing = std::fs::read_to_string(&output_path)?;
                let combined = format!("{entry}\n{existing}");
                std::fs::write(&output_path, combined)?;
            } else {
                std::fs::write(&output_path, &entry)?;
            }

            if !cli.quiet {
                println!(
                    "{} Changelog written to {}",
                    style("✓").green().bold(),
                    style(output_path.display()).cyan()
                );
            }
        } else {
            match cli.format {
                OutputFormat::Json => {
                    let enriched = pipeline.enrich_all(&commits, &associations);
                    let payload = serde_json::json!({
                        "tag": tag,
                        "previous_tag": previous.as_ref().map(|t| &t.name),
                        "changelog": changelog,
                        "commits": enriched,
                    });
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                }
                OutputFormat::Text => {
                    println!("{changelog}");
                }
            }
        }

        Ok(())
    }
}

/// Name of the highest semantic-version tag, when any exists
fn highest_version_tag(candidates: &[gantry_release::TagCandidate]) -> Option<String> {
    let mut versioned: Vec<(&str, &Version)> = candidates
        .iter()
        .filter_map(|c| c.version.as_ref().map(|v| (c.name.as_str(), v)))
        .collect();
    versioned.sort_by(|a, b| b.1.cmp(a.1));
    versioned.first().map(|(name, _)| name.to_string())
}
