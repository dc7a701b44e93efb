//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kharch - Track daily expenses from the terminal
#[derive(Parser)]
#[command(name = "kharch")]
#[command(about = "Personal expense tracker with AI entry and remote sync", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir, or KHARCH_DATA_DIR)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record an expense
    Add {
        /// Amount spent
        #[arg(short, long)]
        amount: Option<f64>,

        /// Spending category (normalized; unknown values become OTHERS)
        #[arg(short, long)]
        category: Option<String>,

        /// Free-form sub-category
        #[arg(long)]
        sub_category: Option<String>,

        /// Vendor or place
        #[arg(long)]
        vendor: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Payment mode (Cash, UPI, Card, ...)
        #[arg(short, long)]
        payment_mode: Option<String>,

        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List recent expenses, newest first
    List {
        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete an expense by id
    Delete {
        /// Expense id
        id: String,
    },

    /// Manage additional income entries
    Income {
        #[command(subcommand)]
        action: Option<IncomeAction>,
    },

    /// Show or set the monthly salary
    Salary {
        /// New salary value (omit to show the current value)
        value: Option<f64>,
    },

    /// Show the monthly summary and income overview
    Summary {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Record an expense from a natural language description
    Assist {
        /// Description, e.g. "coffee at Blue Tokai 250 upi"
        text: String,
    },

    /// Analyze recent spending for savings opportunities
    Insights,

    /// Export expenses to CSV
    Export {
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: String,

        /// Include the notes column
        #[arg(long)]
        notes: bool,

        /// Output file (defaults to expenses_FROM_to_TO.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sync with the remote vault
    Sync {
        #[command(subcommand)]
        action: SyncAction,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable; default is same-origin only)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum IncomeAction {
    /// Record an income entry
    Add {
        /// Amount received
        #[arg(short, long)]
        amount: f64,

        /// Income source
        #[arg(short, long)]
        source: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List income entries
    List,

    /// Delete an income entry by id
    Delete {
        /// Income entry id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum SyncAction {
    /// Attach a sync identity and adopt the remote vault if one exists
    Login {
        /// Email address (hashed into a deterministic vault key)
        email: String,
    },

    /// Detach the sync identity (local data is kept)
    Logout,

    /// Push the local snapshot to the remote vault
    Push,

    /// Replace local data with the remote snapshot
    Pull,

    /// Show the sync identity
    Status,
}
