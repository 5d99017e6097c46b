//! Command-line surface and configuration.
//!
//! Every option can also come from the environment, so a shell session can
//! point at another backend without repeating flags.

use clap::{Parser, Subcommand};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Manage a remote to-do list from the terminal
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(version)]
pub struct Cli {
    /// Base URL of the server exposing /api/todos
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Which items to show: all, active or completed
    #[arg(long, env = "TODO_FILTER", default_value = "all")]
    pub filter: String,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the list (default)
    List,

    /// Add an item
    Add {
        /// Item text; surrounding whitespace is dropped
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Flip an item between active and completed
    Toggle {
        /// Item id, or #N for the N-th shown row
        id: String,
    },

    /// Replace an item's text
    Edit {
        /// Item id, or #N for the N-th shown row
        id: String,

        /// New text
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },

    /// Delete an item
    Rm {
        /// Item id, or #N for the N-th shown row
        id: String,
    },

    /// Delete every completed item
    ClearCompleted,

    /// Read commands from stdin against a single session
    Shell,
}

impl Cli {
    /// Default log directive when RUST_LOG is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
