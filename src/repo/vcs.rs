//! Version-control transport: subprocess `git` behind a capability trait.

use std::path::Path;
use std::process::Command;

use super::RepositoryUnavailable;

/// Outcome of one version-control process invocation.
#[derive(Debug, Clone)]
pub struct VcsOutput {
    pub success: bool,
    /// stdout of the process, captured verbatim (lossy UTF-8).
    pub stdout: String,
    /// stdout and stderr interleaved content for diagnostics.
    pub combined: String,
}

/// The three operations the expansion engine needs from a version-control
/// system. Implemented by [`GitCli`] in production and by counting fakes in
/// tests, so cache and loader logic stay independent of the concrete
/// transport.
pub trait Vcs {
    /// Full clone of `url` into `dest`.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), RepositoryUnavailable>;

    /// Fetch remote refs into the clone at `repo`. Never merges and never
    /// touches the working tree.
    fn fetch(&self, repo: &Path) -> Result<(), RepositoryUnavailable>;

    /// Show the blob at `<reference>:<file_path>` in the clone at `repo`,
    /// without checking anything out.
    fn show(&self, repo: &Path, reference: &str, file_path: &str) -> VcsOutput;
}

/// Transport that shells out to the `git` binary. Exit status determines
/// success; output is preserved for diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    fn run(&self, args: &[&str]) -> std::io::Result<VcsOutput> {
        tracing::debug!(?args, "running git");
        let output = Command::new("git").args(args).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let mut combined = stdout.clone();
        if !stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&stderr);
        }
        Ok(VcsOutput { success: output.status.success(), stdout, combined })
    }

    fn run_or_unavailable(&self, url: &str, args: &[&str]) -> Result<(), RepositoryUnavailable> {
        match self.run(args) {
            Ok(out) if out.success => Ok(()),
            Ok(out) => Err(RepositoryUnavailable {
                url: url.to_string(),
                reason: out.combined.trim().to_string(),
            }),
            Err(err) => Err(RepositoryUnavailable { url: url.to_string(), reason: err.to_string() }),
        }
    }
}

impl Vcs for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), RepositoryUnavailable> {
        let dest = dest.to_string_lossy();
        self.run_or_unavailable(url, &["clone", url, dest.as_ref()])
    }

    fn fetch(&self, repo: &Path) -> Result<(), RepositoryUnavailable> {
        let repo_s = repo.to_string_lossy();
        self.run_or_unavailable(repo_s.as_ref(), &["-C", repo_s.as_ref(), "fetch"])
    }

    fn show(&self, repo: &Path, reference: &str, file_path: &str) -> VcsOutput {
        let repo_s = repo.to_string_lossy();
        let spec = format!("{reference}:{file_path}");
        match self.run(&["-C", repo_s.as_ref(), "show", &spec]) {
            Ok(out) => out,
            Err(err) => {
                VcsOutput { success: false, stdout: String::new(), combined: err.to_string() }
            }
        }
    }
}
