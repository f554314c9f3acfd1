//! Settings loading and CLI argument merging.
//!
//! Precedence, lowest to highest: built-in defaults, `prompt-unroll.toml`
//! (optional), `PROMPT_UNROLL_*` environment variables, CLI flags.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default name of the optional config file, looked up in the working
/// directory.
pub const CONFIG_FILE: &str = "prompt-unroll.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory that file-form directives resolve against.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Directory holding cached repository clones. Persists across runs;
    /// clones accumulate and are never evicted.
    #[serde(default = "default_repos_dir")]
    pub repos_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self { base_dir: default_base_dir(), repos_dir: default_repos_dir() }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_repos_dir() -> PathBuf {
    PathBuf::from("repos")
}

/// Values given on the command line; `None` means "not specified, keep the
/// configured value".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_dir: Option<PathBuf>,
    pub repos_dir: Option<PathBuf>,
}

/// Load settings from file and environment, then apply CLI overrides on top.
pub fn load_settings(config_file: Option<&PathBuf>, cli: CliOverrides) -> Result<Settings> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    figment = match config_file {
        Some(path) => figment.merge(Toml::file_exact(path)),
        None => figment.merge(Toml::file(CONFIG_FILE)),
    };
    let settings: Settings = figment
        .merge(Env::prefixed("PROMPT_UNROLL_"))
        .extract()
        .context("failed to load settings")?;
    Ok(merge_cli_with_settings(settings, cli))
}

pub fn merge_cli_with_settings(mut base: Settings, cli: CliOverrides) -> Settings {
    if let Some(base_dir) = cli.base_dir {
        base.base_dir = base_dir;
    }
    if let Some(repos_dir) = cli.repos_dir {
        base.repos_dir = repos_dir;
    }
    base
}

#[cfg(test)]
mod tests {
    use super::{merge_cli_with_settings, CliOverrides, Settings};
    use std::path::PathBuf;

    #[test]
    fn defaults_resolve_against_working_directory() {
        let settings = Settings::default();
        assert_eq!(settings.base_dir, PathBuf::from("."));
        assert_eq!(settings.repos_dir, PathBuf::from("repos"));
    }

    #[test]
    fn cli_overrides_replace_base_values() {
        let base = Settings { base_dir: PathBuf::from("/srv/prompts"), ..Settings::default() };
        let cli = CliOverrides {
            base_dir: Some(PathBuf::from("/tmp/prompts")),
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_settings(base, cli);
        assert_eq!(merged.base_dir, PathBuf::from("/tmp/prompts"));
        assert_eq!(merged.repos_dir, PathBuf::from("repos"));
    }
}
