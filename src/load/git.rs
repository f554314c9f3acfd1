//! Loads git-form directives: one file at one ref, via the repository cache.

use tracing::debug;

use super::LoadError;
use crate::repo::{RepoCache, Vcs};

/// Capability consumed by the expander for git-form directives.
pub trait GitSource {
    fn read(&self, repo_url: &str, file_path: &str, reference: &str) -> Result<String, LoadError>;
}

/// Reads blobs out of cached clones using a non-mutating show-object lookup
/// (`git show <ref>:<path>`); the clone's checked-out branch and working tree
/// are never altered.
pub struct GitFileLoader<V> {
    cache: RepoCache<V>,
}

impl<V: Vcs> GitFileLoader<V> {
    pub fn new(cache: RepoCache<V>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &RepoCache<V> {
        &self.cache
    }

    /// Map git's diagnostics to the error taxonomy. Substring-based on the
    /// combined output; anything unrecognized degrades to `Io` with the full
    /// output preserved.
    fn classify(combined: &str, repo_url: &str, file_path: &str, reference: &str) -> LoadError {
        let lower = combined.to_ascii_lowercase();
        if lower.contains("does not exist in") || lower.contains("exists on disk, but not in") {
            LoadError::PathNotFound {
                repo_url: repo_url.to_string(),
                file_path: file_path.to_string(),
                reference: reference.to_string(),
            }
        } else if lower.contains("invalid object name")
            || lower.contains("unknown revision")
            || lower.contains("bad revision")
        {
            LoadError::RefNotFound {
                repo_url: repo_url.to_string(),
                reference: reference.to_string(),
            }
        } else {
            LoadError::Io(format!(
                "git show '{reference}:{file_path}' in '{repo_url}' failed: {}",
                combined.trim()
            ))
        }
    }
}

impl<V: Vcs> GitSource for GitFileLoader<V> {
    fn read(&self, repo_url: &str, file_path: &str, reference: &str) -> Result<String, LoadError> {
        let repo_path = self.cache.ensure(repo_url)?;
        debug!(repo_url, file_path, reference, "loading git directive");

        let out = self.cache.vcs().show(&repo_path, reference, file_path);
        if out.success {
            Ok(out.stdout)
        } else {
            Err(Self::classify(&out.combined, repo_url, file_path, reference))
        }
    }
}
