//! Local cache of cloned repositories, keyed by URL.
//!
//! The cache directory is process-wide persistent state shared across runs:
//! a repository is cloned the first time its URL is seen and only fetched
//! afterwards. Nothing is ever evicted. Concurrent expansions touching the
//! same repository path are not guarded against; callers that need that must
//! serialize (see SPEC notes in DESIGN.md for the recorded decision).

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub mod vcs;

pub use vcs::{GitCli, Vcs, VcsOutput};

/// Clone or fetch failed: the underlying version-control process exited
/// non-zero (network failure, bad URL, auth failure). `reason` preserves the
/// process's combined output.
#[derive(Debug, Clone, Error)]
#[error("repository '{url}' unavailable: {reason}")]
pub struct RepositoryUnavailable {
    pub url: String,
    pub reason: String,
}

/// Extract a repository's short name from its URL: the last path segment,
/// `.git` suffix stripped. SSH-style (`git@host:org/repo.git`) and HTTPS-style
/// (`https://host/org/repo.git`) URLs yield the same name.
pub fn repo_short_name(url: &str) -> String {
    let tail = if url.contains('@') && url.contains(':') {
        url.rsplit(':').next().unwrap_or(url)
    } else {
        url.trim_end_matches('/')
    };
    let name = tail.trim_end_matches('/').rsplit('/').next().unwrap_or(tail);
    name.strip_suffix(".git").unwrap_or(name).to_string()
}

/// Maps repository URLs to local clones under one cache directory, creating
/// or refreshing them on demand.
pub struct RepoCache<V> {
    root: PathBuf,
    vcs: V,
}

impl<V: Vcs> RepoCache<V> {
    pub fn new(root: impl Into<PathBuf>, vcs: V) -> Self {
        Self { root: root.into(), vcs }
    }

    /// Local clone path a URL maps to, whether or not it exists yet.
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.root.join(repo_short_name(url))
    }

    /// Guarantee a usable clone of `url` exists and is reasonably current.
    ///
    /// First call for a URL clones; every later call fetches remote refs
    /// without merging or touching the working tree. Calling twice never
    /// reclones, within or across processes.
    pub fn ensure(&self, url: &str) -> Result<PathBuf, RepositoryUnavailable> {
        let repo_path = self.path_for(url);

        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|err| RepositoryUnavailable {
                url: url.to_string(),
                reason: format!("cannot create cache directory {}: {err}", self.root.display()),
            })?;
        }

        if repo_path.exists() {
            debug!(url, path = %repo_path.display(), "fetching cached repository");
            self.vcs.fetch(&repo_path)?;
        } else {
            debug!(url, path = %repo_path.display(), "cloning repository");
            self.vcs.clone_repo(url, &repo_path)?;
        }
        Ok(repo_path)
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::{repo_short_name, RepoCache, RepositoryUnavailable, Vcs, VcsOutput};
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingVcs {
        clones: RefCell<usize>,
        fetches: RefCell<usize>,
    }

    impl Vcs for CountingVcs {
        fn clone_repo(&self, _url: &str, dest: &Path) -> Result<(), RepositoryUnavailable> {
            *self.clones.borrow_mut() += 1;
            std::fs::create_dir_all(dest).unwrap();
            Ok(())
        }

        fn fetch(&self, _repo: &Path) -> Result<(), RepositoryUnavailable> {
            *self.fetches.borrow_mut() += 1;
            Ok(())
        }

        fn show(&self, _repo: &Path, _reference: &str, _file_path: &str) -> VcsOutput {
            VcsOutput { success: true, stdout: String::new(), combined: String::new() }
        }
    }

    #[test]
    fn short_name_handles_ssh_and_https_identically() {
        assert_eq!(repo_short_name("git@github.com:user/repo.git"), "repo");
        assert_eq!(repo_short_name("https://github.com/user/repo.git"), "repo");
        assert_eq!(repo_short_name("https://github.com/user/repo/"), "repo");
        assert_eq!(repo_short_name("https://github.com/user/repo"), "repo");
    }

    #[test]
    fn ensure_clones_once_then_fetches() {
        let root = TempDir::new().unwrap();
        let cache = RepoCache::new(root.path().join("repos"), CountingVcs::default());

        let url = "https://example.com/org/widget.git";
        let first = cache.ensure(url).unwrap();
        let second = cache.ensure(url).unwrap();

        assert_eq!(first, second);
        assert!(first.ends_with("widget"));
        assert_eq!(*cache.vcs().clones.borrow(), 1);
        assert_eq!(*cache.vcs().fetches.borrow(), 1);
    }

    #[test]
    fn clone_failure_surfaces_reason() {
        struct FailingVcs;
        impl Vcs for FailingVcs {
            fn clone_repo(&self, url: &str, _dest: &Path) -> Result<(), RepositoryUnavailable> {
                Err(RepositoryUnavailable {
                    url: url.to_string(),
                    reason: "fatal: repository not found".to_string(),
                })
            }
            fn fetch(&self, _repo: &Path) -> Result<(), RepositoryUnavailable> {
                unreachable!("no clone exists, fetch must not run")
            }
            fn show(&self, _repo: &Path, _reference: &str, _file_path: &str) -> VcsOutput {
                unreachable!()
            }
        }

        let root = TempDir::new().unwrap();
        let cache = RepoCache::new(root.path().join("repos"), FailingVcs);
        let err = cache.ensure("https://example.com/org/missing.git").unwrap_err();
        assert!(err.to_string().contains("repository not found"));
    }
}
