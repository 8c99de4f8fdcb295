//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use regex::Regex;
use std::sync::LazyLock;

use super::{CommitParser, ParserConfig, DEFAULT_MERGE_PATTERN};
use crate::types::{Note, ParsedCommit, Reference};
use gantry_core::error::ChangelogError;

/// Regex for parsing conventional commit headers
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>[^)]+)\))?: (?P<subject>.+)$")
        .expect("Invalid regex")
});

/// Regex for issue/PR cross-references, with an optional action verb
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:(?P<action>close[sd]?|fix(?:e[sd])?|resolve[sd]?)\s+)?(?:(?P<owner>[\w-]+)/(?P<repository>[\w.-]+))?(?P<prefix>#)(?P<issue>\d+)",
    )
    .expect("Invalid regex")
});

/// Regex for user-handle mentions
static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([\w-]+)").expect("Invalid regex"));

static DEFAULT_MERGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_MERGE_PATTERN).expect("Invalid regex"));

/// Parser for Conventional Commits format
pub struct ConventionalParser {
    config: ParserConfig,
    merge_regex: Regex,
}

impl ConventionalParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            merge_regex: DEFAULT_MERGE_REGEX.clone(),
        }
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Result<Self, ChangelogError> {
        let merge_regex =
            Regex::new(&config.merge_pattern).map_err(|e| ChangelogError::InvalidPattern {
                pattern: config.merge_pattern.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            config,
            merge_regex,
        })
    }

    /// Match a footer note keyword at the start of a line.
    ///
    /// Returns the keyword and the text following `<keyword>:`.
    fn note_keyword(&self, line: &str) -> Option<(String, String)> {
        for keyword in &self.config.note_keywords {
            if let Some(rest) = line.strip_prefix(keyword.as_str()) {
                if let Some(text) = rest.strip_prefix(':') {
                    return Some((keyword.clone(), text.trim_start().to_string()));
                }
            }
        }
        None
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, message: &str) -> ParsedCommit {
        let header = message.lines().next().unwrap_or_default().to_string();
        let is_merge = self.merge_regex.is_match(&header);

        // Type is populated only for recognized category words; the subject
        // falls back to the whole header when the grammar does not match.
        let (commit_type, scope, subject) = match HEADER_REGEX.captures(&header) {
            Some(caps) => (
                caps.name("type").and_then(|m| m.as_str().parse().ok()),
                caps.name("scope").map(|m| m.as_str().to_string()),
                caps["subject"].to_string(),
            ),
            None => (None, None, header.clone()),
        };

        let rest = match message.find('\n') {
            Some(idx) => &message[idx + 1..],
            None => "",
        };

        let paragraphs = split_paragraphs(rest);

        // The footer begins at the first paragraph opening with a note
        // keyword; everything before it is body.
        let footer_start = paragraphs
            .iter()
            .position(|p| self.note_keyword(p[0]).is_some());

        let (body_paragraphs, footer_paragraphs) = match footer_start {
            Some(idx) => paragraphs.split_at(idx),
            None => (&paragraphs[..], &[][..]),
        };

        let body = join_paragraphs(body_paragraphs);
        let footer = join_paragraphs(footer_paragraphs);

        let mut notes = Vec::new();
        for paragraph in footer_paragraphs {
            if let Some((title, first_line)) = self.note_keyword(paragraph[0]) {
                let mut text = first_line;
                for line in &paragraph[1..] {
                    text.push('\n');
                    text.push_str(line);
                }
                notes.push(Note { title, text });
            }
        }

        let references = extract_references(rest);
        let mentions = extract_mentions(message);

        ParsedCommit {
            commit_type,
            scope,
            subject,
            header,
            body,
            footer,
            notes,
            is_merge,
            mentions,
            references,
        }
    }
}

/// Group non-blank lines into blank-line-separated paragraphs
fn split_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

fn join_paragraphs(paragraphs: &[Vec<&str>]) -> Option<String> {
    if paragraphs.is_empty() {
        return None;
    }
    Some(
        paragraphs
            .iter()
            .map(|p| p.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n"),
    )
}

/// Extract issue/PR cross-references from text below the header
fn extract_references(text: &str) -> Vec<Reference> {
    let mut references = Vec::new();

    for caps in REFERENCE_REGEX.captures_iter(text) {
        let Some(issue) = caps
            .name("issue")
            .and_then(|m| m.as_str().parse::<u64>().ok())
        else {
            continue;
        };

        references.push(Reference {
            action: caps
                .name("action")
                .map(|m| m.as_str().to_lowercase())
                .unwrap_or_default(),
            owner: caps.name("owner").map(|m| m.as_str().to_string()),
            repository: caps.name("repository").map(|m| m.as_str().to_string()),
            issue,
            raw: caps[0].to_string(),
            prefix: caps["prefix"].to_string(),
        });
    }

    references
}

/// Extract `@handle` mentions, first-seen order
fn extract_mentions(text: &str) -> Vec<String> {
    let mut mentions = Vec::new();
    for caps in MENTION_REGEX.captures_iter(text) {
        let handle = caps[1].to_string();
        if !mentions.contains(&handle) {
            mentions.push(handle);
        }
    }
    mentions
}
