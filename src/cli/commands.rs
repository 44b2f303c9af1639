//! CLI commands and argument parsing

use crate::filter::DateWindow;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse book club recommendations
#[derive(Parser, Debug)]
#[command(name = "bookclub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config file and BOOKCLUB_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

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
    /// Fetch every recommendation and filter locally
    Books {
        /// Match title or author (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only this source ("all" for every source)
        #[arg(long)]
        source: Option<String>,

        /// Only books published within this window
        #[arg(long, value_enum, default_value = "all")]
        since: DateWindow,
    },

    /// Fetch one page, filtered by the server
    Page {
        #[arg(short, long)]
        search: Option<String>,

        /// Source name
        #[arg(long)]
        integration: Option<String>,

        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        offset: Option<u32>,
    },

    /// Show one recommendation
    Book {
        /// Recommendation id (usually its URL)
        id: String,
    },

    /// Search recommendations on the server
    Search {
        query: String,
    },

    /// List recommendation sources
    Sources,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}
