//! Tooling & Integration Layer
//!
//! The `ticca` command-line interface and its output formatting.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
