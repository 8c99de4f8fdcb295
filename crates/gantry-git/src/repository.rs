//! Git repository operations

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{info, instrument};

use gantry_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
    remote: String,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
            remote: "origin".to_string(),
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self {
            repo,
            path,
            remote: "origin".to_string(),
        })
    }

    /// Use a different remote for commit URL derivation
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the HEAD commit
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self.repo.head()?;
        head.peel_to_commit().map_err(GitError::Git2)
    }

    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Base URL for commit links, derived from the configured remote.
    ///
    /// `None` when the repository has no usable remote.
    pub fn commit_url_base(&self) -> Option<String> {
        let url = self.remote_url(&self.remote).ok().flatten()?;
        let base = normalize_remote_url(&url)?;
        Some(format!("{base}/commit"))
    }
}

/// Turn a remote URL into a browsable https base URL
fn normalize_remote_url(url: &str) -> Option<String> {
    let url = url.strip_suffix(".git").unwrap_or(url);

    if url.starts_with("http://") || url.starts_with("https://") {
        return Some(url.trim_end_matches('/').to_string());
    }

    // scp-like syntax: git@host:owner/repo
    if let Some(rest) = url.strip_prefix("git@") {
        if let Some((host, path)) = rest.split_once(':') {
            return Some(format!("https://{host}/{path}"));
        }
    }

    // ssh://git@host/owner/repo
    if let Some(rest) = url.strip_prefix("ssh://") {
        let rest = rest.strip_prefix("git@").unwrap_or(rest);
        return Some(format!("https://{rest}"));
    }

    None
}
