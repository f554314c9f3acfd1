//! prompt-unroll: recursively expand load directives embedded in prompt text
//!
//! Scans prompt text for file and git load directives, resolves them through
//! a local base directory or a cached repository clone, and prints the fully
//! expanded text.

use anyhow::Result;

fn main() -> Result<()> {
    prompt_unroll::cli::run()
}
