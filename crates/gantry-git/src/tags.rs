//! Tag operations

use tracing::{debug, instrument};

use gantry_release::types::{TagCandidate, TagRef};

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// List all tags with the commit sha each points to
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagRef>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                tags.push(TagRef::new(name, commit.id().to_string()));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag: resolve to the tagged commit
                tags.push(TagRef::new(name, tag.target_id().to_string()));
            }

            true
        })?;

        debug!(count = tags.len(), "listed tags");
        Ok(tags)
    }

    /// Tags as previous-release candidates
    pub fn tag_candidates(&self) -> Result<Vec<TagCandidate>> {
        Ok(self
            .tags()?
            .into_iter()
            .map(|tag| TagCandidate::new(tag.name, tag.sha))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn setup_repo_with_tags() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let sig = Signature::now("Test", "test@example.com").unwrap();

        std::fs::write(temp.path().join("file.txt"), "content").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("file.txt")).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let commit = repo.find_commit(oid).unwrap();
        repo.tag_lightweight("v1.0.0", commit.as_object(), false)
            .unwrap();
        repo.tag("v1.1.0", commit.as_object(), &sig, "release 1.1.0", false)
            .unwrap();
        repo.tag_lightweight("not-a-version", commit.as_object(), false)
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_list_tags() {
        let (_temp, repo) = setup_repo_with_tags();
        let tags = repo.tags().unwrap();

        let mut names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["not-a-version", "v1.0.0", "v1.1.0"]);
    }

    #[test]
    fn test_annotated_tag_resolves_to_commit() {
        let (_temp, repo) = setup_repo_with_tags();
        let tags = repo.tags().unwrap();

        let lightweight = tags.iter().find(|t| t.name == "v1.0.0").unwrap();
        let annotated = tags.iter().find(|t| t.name == "v1.1.0").unwrap();
        assert_eq!(lightweight.sha, annotated.sha);
    }

    #[test]
    fn test_tag_candidates_parse_versions() {
        let (_temp, repo) = setup_repo_with_tags();
        let candidates = repo.tag_candidates().unwrap();

        let versioned = candidates.iter().filter(|c| c.version.is_some()).count();
        assert_eq!(versioned, 2);
    }
}
