//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cursor-paginated collection browser
#[derive(Parser, Debug)]
#[command(name = "pagebrowse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Collection endpoint, overrides the configuration file
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single page
    Fetch {
        /// Page cursor (defaults to the endpoint's first page)
        #[arg(long)]
        cursor: Option<String>,

        /// Only print items whose name contains this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Browse interactively (commands are read from stdin)
    Browse,

    /// Print the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one object per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// One line of input in a browse session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    Refresh,
    /// Navigate to a cursor, or to the first page when absent
    Go(Option<String>),
    /// Set the search query (empty clears it)
    Search(String),
    Show,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse one input line; `None` for blank or unknown input
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Prev,
            "r" | "refresh" => Self::Refresh,
            "g" | "go" => Self::Go((!rest.is_empty()).then(|| rest.to_string())),
            "/" | "s" | "search" => Self::Search(rest.to_string()),
            "show" | "ls" => Self::Show,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}
