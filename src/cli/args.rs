//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::{SearchMode, Side, Traversal};

/// Binary search tree workbench: edit trees, replay traversal and search traces, keep snapshots
#[derive(Parser, Debug)]
#[command(name = "bstviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Working snapshot name (default from config)
    #[arg(short, long, global = true)]
    pub snapshot: Option<String>,

    /// Print machine readable JSON instead of replaying
    #[arg(long, global = true)]
    pub json: bool,

    /// Milliseconds between replayed steps (default from config)
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Print shell completions and exit
    #[arg(long = "generator", value_enum)]
    pub generator: Option<Shell>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert values in BST order (duplicates are ignored)
    Insert {
        /// Values to insert, in order
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Insert a value at an explicit position, ignoring BST order
    InsertManual {
        /// Value to insert
        #[arg(allow_negative_numbers = true)]
        value: i64,
        /// Value of the parent node
        #[arg(short, long, allow_negative_numbers = true)]
        parent: i64,
        /// Child slot: left or right
        #[arg(long)]
        side: Side,
    },

    /// Delete a value
    Delete {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Remove all nodes
    Clear,

    /// Search for a value and replay the trace
    Search {
        #[arg(allow_negative_numbers = true)]
        value: i64,
        /// complete (every node) or bst (ordered descent)
        #[arg(short, long)]
        mode: Option<SearchMode>,
    },

    /// Run a traversal and replay the trace
    Traverse {
        /// inorder, preorder, postorder, dfs or bfs
        order: Traversal,
    },

    /// Show height, counts, balance and BST validity
    Stats,

    /// Draw the tree
    Show,

    /// List nodes with a free child slot
    Parents,

    /// Manage saved snapshots
    Snapshots {
        #[command(subcommand)]
        command: SnapshotCommands,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SnapshotCommands {
    /// List snapshots, newest first
    List,
    /// Show one snapshot (id or name)
    Show { key: String },
    /// Rename a snapshot (id or name)
    Rename { key: String, name: String },
    /// Delete a snapshot (id or name)
    Delete { key: String },
    /// Delete all snapshots of the configured user
    Purge,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings
    Show,
    /// Print the global config file location
    Path,
}
