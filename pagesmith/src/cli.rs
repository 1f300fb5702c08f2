//! Command-line interface definitions for pagesmith

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Search filter for the find-page command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindFilter {
    /// Match ordinary pages only
    Page,
    /// Match databases only
    Database,
}

/// CLI structure for the pagesmith application
#[derive(Parser)]
#[command(name = "pagesmith")]
#[command(version)]
#[command(about = "Publish markdown documents as Notion pages", long_about = None)]
pub struct Cli {
    /// Integration token (overrides NOTION_TOKEN and pagesmith.toml)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for pagesmith
#[derive(Subcommand)]
pub enum Commands {
    /// Convert markdown to block JSON without contacting the API
    Convert {
        /// Input markdown file (stdin when omitted)
        input: Option<PathBuf>,

        /// Output file for the block JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Find a page or database ID by searching for its title
    FindPage {
        /// Title to search for
        title: String,

        /// Restrict matches to pages or databases
        #[arg(long, value_enum)]
        kind: Option<KindFilter>,

        /// List every candidate, not just the best match
        #[arg(short, long)]
        all: bool,
    },

    /// Create a page under a parent located by title
    CreatePage {
        /// Title of the existing parent page or database
        #[arg(short, long)]
        parent: String,

        /// Title for the new page
        #[arg(short, long)]
        title: String,

        /// Markdown content file (stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Create a page under a parent identified by ID
    CreateSubpage {
        /// ID of the parent page
        #[arg(long)]
        parent_id: String,

        /// Title for the new page
        #[arg(short, long)]
        title: String,

        /// Markdown content file (stdin when omitted)
        input: Option<PathBuf>,
    },
}
