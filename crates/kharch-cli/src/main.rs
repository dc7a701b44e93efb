//! Kharch CLI - Personal expense tracker
//!
//! Usage:
//!   kharch add --amount 250 --category food   Record an expense
//!   kharch assist "coffee 250 upi"            Record via AI extraction
//!   kharch summary                            Monthly totals and overview
//!   kharch serve --port 3000                  Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Add {
            amount,
            category,
            sub_category,
            vendor,
            date,
            payment_mode,
            notes,
        } => commands::cmd_add(
            cli.data.as_deref(),
            amount,
            category,
            sub_category,
            vendor,
            date.as_deref(),
            payment_mode,
            notes,
        ),
        Commands::List { limit } => commands::cmd_list(cli.data.as_deref(), limit),
        Commands::Delete { id } => commands::cmd_delete(cli.data.as_deref(), &id),
        Commands::Income { action } => match action {
            None | Some(IncomeAction::List) => commands::cmd_income_list(cli.data.as_deref()),
            Some(IncomeAction::Add {
                amount,
                source,
                date,
            }) => commands::cmd_income_add(cli.data.as_deref(), amount, source, date.as_deref()),
            Some(IncomeAction::Delete { id }) => {
                commands::cmd_income_delete(cli.data.as_deref(), &id)
            }
        },
        Commands::Salary { value } => commands::cmd_salary(cli.data.as_deref(), value),
        Commands::Summary { year, month } => {
            commands::cmd_summary(cli.data.as_deref(), year, month)
        }
        Commands::Assist { text } => commands::cmd_assist(cli.data.as_deref(), &text).await,
        Commands::Insights => commands::cmd_insights(cli.data.as_deref()).await,
        Commands::Export {
            from,
            to,
            notes,
            output,
        } => commands::cmd_export(cli.data.as_deref(), &from, &to, notes, output.as_deref()),
        Commands::Sync { action } => match action {
            SyncAction::Login { email } => {
                commands::cmd_sync_login(cli.data.as_deref(), &email).await
            }
            SyncAction::Logout => commands::cmd_sync_logout(cli.data.as_deref()),
            SyncAction::Push => commands::cmd_sync_push(cli.data.as_deref()).await,
            SyncAction::Pull => commands::cmd_sync_pull(cli.data.as_deref()).await,
            SyncAction::Status => commands::cmd_sync_status(cli.data.as_deref()),
        },
        Commands::Serve {
            port,
            host,
            static_dir,
            cors_origins,
        } => {
            commands::cmd_serve(
                cli.data.as_deref(),
                &host,
                port,
                static_dir.as_deref(),
                cors_origins,
            )
            .await
        }
    }
}
