//! CLI module
//!
//! Command-line interface for browsing a collection endpoint.
//!
//! # Commands
//!
//! - `fetch` - Fetch one page and print its (filtered) items
//! - `browse` - Interactive line-oriented browsing session on stdin
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{BrowseCommand, Cli, Commands, OutputFormat};
pub use runner::Runner;
