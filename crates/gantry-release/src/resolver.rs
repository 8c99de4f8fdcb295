//! Previous-release resolution

use regex::Regex;
use semver::Version;
use std::sync::LazyLock;
use tracing::debug;

use gantry_core::error::{ReleaseError, VersionError};

use crate::types::{parse_version, TagCandidate};

static TAG_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:refs/)?tags/(.+)$").expect("Invalid regex"));

/// Select the nearest prior release tag.
///
/// Fails when `current_tag` is not a valid semantic version, since no
/// commit range can be computed from it. Candidates without a parsed version
/// are ignored; the remainder are ranked by semver precedence and the
/// highest version strictly less than the current one wins. `None` means
/// first release: the commit range starts at the beginning of history.
pub fn resolve_previous(
    current_tag: &str,
    tags: &[TagCandidate],
) -> Result<Option<TagCandidate>, VersionError> {
    let current = parse_version(current_tag).map_err(|e| VersionError::InvalidReleaseTag {
        tag: current_tag.to_string(),
        reason: e.to_string(),
    })?;

    let mut candidates: Vec<(TagCandidate, Version)> = tags
        .iter()
        .filter_map(|tag| tag.version.clone().map(|version| (tag.clone(), version)))
        .collect();

    // Descending by precedence; the sort is stable, so duplicate versions
    // keep their input order.
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    let previous = candidates
        .into_iter()
        .find(|(_, version)| *version < current)
        .map(|(tag, _)| tag);

    debug!(
        current = current_tag,
        previous = ?previous.as_ref().map(|t| &t.name),
        "resolved previous release tag"
    );
    Ok(previous)
}

/// Extract the tag name from a `refs/tags/<name>` (or `tags/<name>`) ref
pub fn parse_tag_ref(ref_str: &str) -> Result<String, ReleaseError> {
    TAG_REF_REGEX
        .captures(ref_str)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ReleaseError::NotATagRef(ref_str.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<TagCandidate> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| TagCandidate::new(*name, format!("sha{i}")))
            .collect()
    }

    #[test]
    fn test_picks_highest_predecessor() {
        let tags = candidates(&["1.9.0", "1.9.0-rc.1", "invalid-tag", "2.0.0"]);

        let previous = resolve_previous("2.0.0", &tags).unwrap().unwrap();
        assert_eq!(previous.name, "1.9.0");
    }

    #[test]
    fn test_prerelease_ranks_below_release() {
        let tags = candidates(&["1.9.0-rc.1", "1.9.0"]);

        let previous = resolve_previous("1.9.0", &tags).unwrap().unwrap();
        assert_eq!(previous.name, "1.9.0-rc.1");
    }

    #[test]
    fn test_current_tag_excluded() {
        let tags = candidates(&["2.0.0"]);

        assert!(resolve_previous("2.0.0", &tags).unwrap().is_none());
    }

    #[test]
    fn test_empty_list_is_first_release() {
        assert!(resolve_previous("1.0.0", &[]).unwrap().is_none());
    }

    #[test]
    fn test_invalid_current_tag_fails() {
        let result = resolve_previous("not-a-version", &candidates(&["1.0.0"]));

        let err = result.unwrap_err();
        let VersionError::InvalidReleaseTag { tag, .. } = err;
        assert_eq!(tag, "not-a-version");
    }

    #[test]
    fn test_v_prefixed_tags() {
        let tags = candidates(&["v1.0.0", "v1.1.0"]);

        let previous = resolve_previous("v1.2.0", &tags).unwrap().unwrap();
        assert_eq!(previous.name, "v1.1.0");
    }

    #[test]
    fn test_unordered_input() {
        let tags = candidates(&["0.3.0", "1.1.0", "0.9.9", "1.0.0"]);

        let previous = resolve_previous("1.1.0", &tags).unwrap().unwrap();
        assert_eq!(previous.name, "1.0.0");
    }

    #[test]
    fn test_parse_tag_ref() {
        assert_eq!(parse_tag_ref("refs/tags/v1.2.3").unwrap(), "v1.2.3");
        assert_eq!(parse_tag_ref("tags/v1.2.3").unwrap(), "v1.2.3");
        assert!(parse_tag_ref("refs/heads/main").is_err());
    }
}
