//! Release command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use gantry_core::config::load_config_or_default;
use gantry_changelog::ChangelogPipeline;
use gantry_git::GitRepo;
use gantry_release::{ReleaseOptions, ReleaseWorkflow};

use crate::cli::{Cli, OutputFormat};

/// Create a release with a generated changelog
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Tag to release (e.g. v1.2.3)
    #[arg(short, long)]
    pub tag: String,

    /// Release title (defaults to the tag)
    #[arg(long)]
    pub title: Option<String>,

    /// Create the release as a draft
    #[arg(long)]
    pub draft: bool,

    /// Mark the release as a pre-release
    #[arg(long)]
    pub prerelease: bool,

    /// Asset files to upload (defaults to configured files)
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Resolve and render everything without creating the release
    #[arg(long)]
    pub dry_run: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            tag = %self.tag,
            draft = self.draft,
            prerelease = self.prerelease,
            dry_run = self.dry_run,
            "executing release command"
        );
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);

        let repo = GitRepo::discover(&cwd)?.with_remote(&config.git.remote);

        let files = if self.files.is_empty() {
            config.release.files.clone()
        } else {
            self.files.clone()
        };

        let mut options = ReleaseOptions {
            title: self.title.clone(),
            draft: self.draft,
            prerelease: self.prerelease,
            files,
            dry_run: self.dry_run,
        };
        if options.title.is_none() {
            options.title = Some(self.tag.clone());
        }

        // The range ends at the tag itself when it already exists locally,
        // at HEAD when releasing an upcoming tag.
        let head = if repo.tags()?.iter().any(|t| t.name == self.tag) {
            self.tag.clone()
        } else {
            "HEAD".to_string()
        };

        let pipeline =
            ChangelogPipeline::new().with_parser(super::build_parser(&config.changelog)?);
        let workflow =
            ReleaseWorkflow::new(&repo, &config.release, options).with_pipeline(pipeline);

        let outcome = workflow.execute(&format!("refs/tags/{}", self.tag), &head)?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    match &outcome.previous_tag {
                        Some(previous) => println!(
                            "{} {} commits since {}",
                            style("→").blue(),
                            outcome.commit_count,
                            style(previous).cyan()
                        ),
                        None => println!(
                            "{} First release: {} commits",
                            style("→").blue(),
                            outcome.commit_count
                        ),
                    }
                }

                println!("{}", outcome.changelog);

                if !cli.quiet {
                    if self.dry_run {
                        println!(
                            "{} Dry run - no release created for {}",
                            style("!").yellow().bold(),
                            style(&outcome.tag).cyan()
                        );
                    } else if let Some(release) = &outcome.release {
                        println!(
                            "{} Created release {} ({} asset(s) uploaded)",
                            style("✓").green().bold(),
                            style(release).cyan(),
                            outcome.uploaded_assets.len()
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
