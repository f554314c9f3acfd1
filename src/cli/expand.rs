//! Expand command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

use crate::config::{load_settings, CliOverrides};
use crate::expand::Expander;
use crate::load::{GitFileLoader, LocalFileLoader};
use crate::repo::{GitCli, RepoCache};

#[derive(Args)]
pub struct ExpandArgs {
    /// Prompt text file to expand; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write expanded text here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Base directory for file directives (env: PROMPT_UNROLL_BASE_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Directory for cached repository clones (env: PROMPT_UNROLL_REPOS_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub repos_dir: Option<PathBuf>,

    /// Path to config file (default: prompt-unroll.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: ExpandArgs) -> Result<()> {
    let settings = load_settings(
        args.config.as_ref(),
        CliOverrides { base_dir: args.base_dir, repos_dir: args.repos_dir },
    )?;

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            buf
        }
    };

    let files = LocalFileLoader::new(&settings.base_dir);
    let git = GitFileLoader::new(RepoCache::new(&settings.repos_dir, GitCli));
    let expanded = Expander::new(&files, &git).expand(&text);

    match &args.output {
        Some(path) => std::fs::write(path, expanded)
            .with_context(|| format!("failed to write output file {}", path.display()))?,
        None => print!("{expanded}"),
    }

    Ok(())
}
