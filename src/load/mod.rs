//! Content loaders for the two directive forms, plus their error taxonomy.

use thiserror::Error;

use crate::repo::RepositoryUnavailable;

pub mod git;
pub mod local;

pub use git::{GitFileLoader, GitSource};
pub use local::{FileSource, LocalFileLoader};

/// Why one directive failed to resolve. Messages carry the directive's
/// identifying fields; the expander inlines them into the output rather than
/// propagating them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file '{filename}' not found under '{base_dir}'")]
    NotFound { filename: String, base_dir: String },

    #[error("ref '{reference}' not found in '{repo_url}'")]
    RefNotFound { repo_url: String, reference: String },

    #[error("path '{file_path}' does not exist at ref '{reference}' in '{repo_url}'")]
    PathNotFound { repo_url: String, file_path: String, reference: String },

    #[error("{0}")]
    Repository(#[from] RepositoryUnavailable),

    #[error("I/O failure: {0}")]
    Io(String),
}
