//! Changelog rendering
//!
//! Produces the final Markdown document from enriched commits. Rendering is
//! a pure function of its input: identical input yields byte-identical
//! output, which keeps re-runs and dry-run diffing stable.

use crate::types::{EnrichedCommit, IssueRef, PullRequestRef, SECTIONS};

/// Render the changelog document.
///
/// Commits are partitioned into Breaking Changes (regardless of type; a
/// breaking commit also appears in its category section), one section per
/// category in table order, and a residual "Commits" section for
/// uncategorized commits. Input order is preserved within each section;
/// merge commits must have been excluded upstream.
pub fn render(commits: &[EnrichedCommit]) -> String {
    let mut sections = Vec::new();

    let breaking: Vec<&EnrichedCommit> =
        commits.iter().filter(|c| c.breaking_change).collect();
    push_section(&mut sections, "Breaking Changes", &breaking);

    for (commit_type, title) in SECTIONS {
        let bucket: Vec<&EnrichedCommit> = commits
            .iter()
            .filter(|c| c.parsed.commit_type == Some(commit_type))
            .collect();
        push_section(&mut sections, title, &bucket);
    }

    let uncategorized: Vec<&EnrichedCommit> = commits
        .iter()
        .filter(|c| c.parsed.commit_type.is_none())
        .collect();
    push_section(&mut sections, "Commits", &uncategorized);

    sections.join("\n\n").trim().to_string()
}

fn push_section(sections: &mut Vec<String>, title: &str, entries: &[&EnrichedCommit]) {
    if entries.is_empty() {
        return;
    }

    let lines: Vec<String> = entries.iter().map(|c| format_entry(c)).collect();
    sections.push(format!("## {}\n{}", title, lines.join("\n")));
}

/// Format a single changelog entry
fn format_entry(commit: &EnrichedCommit) -> String {
    let pull_requests = pull_request_list(&commit.pull_requests);
    let closes = closes_suffix(&commit.issues);

    if commit.parsed.commit_type.is_some() {
        let scope = commit
            .parsed
            .scope
            .as_ref()
            .map(|s| format!("**{s}**: "))
            .unwrap_or_default();

        let author = match (&commit.raw.author, commit.raw.url.is_empty()) {
            (Some(name), false) => format!(" ([{}]({}))", name, commit.raw.url),
            (Some(name), true) => format!(" ({name})"),
            (None, _) => String::new(),
        };

        format!(
            "- {}{}{}{}{}",
            scope, commit.parsed.subject, pull_requests, author, closes
        )
    } else {
        let author = commit
            .raw
            .author
            .as_ref()
            .map(|name| format!(" ({name})"))
            .unwrap_or_default();

        format!(
            "- {}: {}{}{}{}",
            commit.raw.short_sha(),
            commit.parsed.header,
            author,
            pull_requests,
            closes
        )
    }
}

/// e.g. ` [#1](url)` / ` [#1](url),[#2](url)` / ``
fn pull_request_list(pull_requests: &[PullRequestRef]) -> String {
    if pull_requests.is_empty() {
        return String::new();
    }

    let links: Vec<String> = pull_requests
        .iter()
        .map(|pr| format!("[#{}]({})", pr.number, pr.url))
        .collect();
    format!(" {}", links.join(","))
}

/// e.g. `, closes [#5](url), [#6](url)` / ``
fn closes_suffix(issues: &[IssueRef]) -> String {
    if issues.is_empty() {
        return String::new();
    }

    let links: Vec<String> = issues
        .iter()
        .map(|issue| format!("[#{}]({})", issue.number, issue.url))
        .collect();
    format!(", closes {}", links.join(", "))
}
