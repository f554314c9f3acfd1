//! Prompt-Unroll: recursively expand load directives embedded in prompt text
//!
//! This library assembles large text prompts by expanding embedded
//! directives that pull in external content from the local filesystem or
//! from a file at a ref inside a cached git clone, splicing the (recursively
//! expanded) content back into the surrounding text.

pub mod cli;
pub mod config;
pub mod directive;
pub mod expand;
pub mod load;
pub mod repo;
