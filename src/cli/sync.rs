//! Sync command: pre-warm the repository cache for one URL.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::{load_settings, CliOverrides};
use crate::repo::{GitCli, RepoCache};

#[derive(Args)]
pub struct SyncArgs {
    /// Repository URL to clone or refresh
    #[arg(value_name = "URL")]
    pub url: String,

    /// Directory for cached repository clones (env: PROMPT_UNROLL_REPOS_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub repos_dir: Option<PathBuf>,

    /// Path to config file (default: prompt-unroll.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: SyncArgs) -> Result<()> {
    let settings = load_settings(
        args.config.as_ref(),
        CliOverrides { repos_dir: args.repos_dir, ..CliOverrides::default() },
    )?;

    let cache = RepoCache::new(&settings.repos_dir, GitCli);
    let existed = cache.path_for(&args.url).exists();
    let path = cache.ensure(&args.url)?;

    if existed {
        println!("Fetched {} into {}", args.url, path.display());
    } else {
        println!("Cloned {} into {}", args.url, path.display());
    }
    Ok(())
}
