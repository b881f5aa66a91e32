//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::tree::DEFAULT_RENDER_DEPTH;
use crate::domain::TreeShape;

/// Library catalog search: look up books by ISBN or by title and author
#[derive(Parser, Debug)]
#[command(name = "bookcat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Catalog file, `~` and `$VAR` are expanded (overrides config and BOOKCAT_CATALOG)
    #[arg(short = 'f', long, global = true, value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Tree shape built from the catalog: balanced or insertion (overrides config)
    #[arg(long, global = true)]
    pub shape: Option<TreeShape>,

    /// Directory holding a local .bookcat.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether a book with this ISBN is in the catalog
    Isbn {
        /// Exact ISBN (case-sensitive)
        isbn: String,
    },

    /// Check whether a book with this title and author is in the catalog
    Find {
        /// Exact title
        #[arg(short, long)]
        title: String,
        /// Exact author
        #[arg(short, long)]
        author: String,
    },

    /// Show the catalog as a tree
    Tree {
        /// Levels to show before deeper subtrees are folded
        #[arg(long, default_value_t = DEFAULT_RENDER_DEPTH)]
        depth: usize,
    },

    /// Show catalog summary
    Info,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
}
