//! CLI argument parsing with clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command words accepted by the dispatcher, in help order
pub const COMMAND_NAMES: [&str; 4] = ["show", "add", "drop", "select"];

/// Gitstack - bookmark git branches on an ordered stack and jump between them
#[derive(Parser, Debug)]
#[command(name = "gitstack")]
#[command(version = VERSION)]
#[command(about = "Bookmark git branches on an ordered stack and jump between them")]
#[command(long_about = "Gitstack keeps a personal, ordered stack of git branch names.\n\nBranches are added by name (or the current branch), dropped by position, and checked out by position. Every run reconciles the stack against the repository's branches, so deleted branches disappear from it.\n\nWith no command, the stack is shown.")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the stack listing
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Stack file to use instead of the configured one
    #[arg(long, global = true, env = "GITSTACK_FILE", value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Run git in this working copy instead of the current directory
    #[arg(short = 'C', long = "repo", global = true, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the tracked branches that still exist, in stack order
    ///
    /// The checked-out branch is marked with `├`, the others with `│`.
    Show,

    /// Track a branch at the end of the stack
    #[command(long_about = "Track a branch at the end of the stack.\n\nWithout a name, the current branch is tracked. The branch must exist and must not already be on the stack.")]
    Add {
        /// Branch to track (defaults to the current branch)
        name: Option<String>,
    },

    /// Remove a branch from the stack
    #[command(long_about = "Remove a branch from the stack.\n\nWith an index, the entry at that position is removed. Without one, the current branch is removed. The change is written immediately.")]
    Drop {
        /// Stack position to remove (defaults to the current branch)
        #[arg(allow_negative_numbers = true)]
        index: Option<String>,
    },

    /// Check out the branch at a stack position
    Select {
        /// Stack position to check out
        #[arg(allow_negative_numbers = true)]
        index: String,
    },

    #[command(external_subcommand)]
    Unrecognized(Vec<String>),
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}
