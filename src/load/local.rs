//! Loads file-form directives from a configured base directory.

use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use super::LoadError;

/// Capability consumed by the expander for file-form directives. Production
/// code uses [`LocalFileLoader`]; tests substitute in-memory doubles.
pub trait FileSource {
    fn read(&self, filename: &str) -> Result<String, LoadError>;
}

/// Resolves filenames relative to one base directory and reads them as UTF-8
/// text. The base directory comes from configuration (conventionally the
/// `PROMPT_UNROLL_BASE_DIR` environment variable, read by the caller); it
/// defaults to the current directory. No side effects beyond the read.
pub struct LocalFileLoader {
    base_dir: PathBuf,
}

impl LocalFileLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }
}

impl FileSource for LocalFileLoader {
    fn read(&self, filename: &str) -> Result<String, LoadError> {
        let path = self.base_dir.join(filename);
        debug!(path = %path.display(), "loading file directive");
        std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                filename: filename.to_string(),
                base_dir: self.base_dir.display().to_string(),
            },
            _ => LoadError::Io(format!("cannot read '{}': {err}", path.display())),
        })
    }
}
