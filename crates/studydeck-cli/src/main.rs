use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studydeck_core::{ApiClient, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "studydeck")]
#[command(author, version, about = "Terminal client for the Study Habits Recommender")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard TUI
    Run,
    /// Log a study session
    Log {
        /// Hours studied
        #[arg(long)]
        hours: f64,
        /// Subject studied
        #[arg(long)]
        subject: Option<String>,
        /// Time of day bucket, e.g. "Morning"
        #[arg(long = "time")]
        study_time: Option<String>,
        /// Study method, e.g. "Pomodoro"
        #[arg(long)]
        method: Option<String>,
        /// Distraction level: Low, Medium or High
        #[arg(long)]
        distractions: Option<String>,
        /// Quiz score (0-100)
        #[arg(long)]
        score: Option<u32>,
        /// Session date as YYYY-MM-DD (defaults to today, server-side)
        #[arg(long)]
        date: Option<String>,
    },
    /// Print the aggregate study stats
    Stats,
    /// Print the personalized recommendation report
    Recommend,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Arc::new(AppConfig::load()?);
    tracing::debug!("using service at {}", config.server.base_url);

    match Cli::parse().command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Log {
            hours,
            subject,
            study_time,
            method,
            distractions,
            score,
            date,
        }) => {
            let api = ApiClient::new(&config)?;
            commands::log::run(
                &api,
                commands::log::SessionArgs {
                    hours,
                    subject,
                    study_time,
                    method,
                    distractions,
                    score,
                    date,
                },
            )
            .await
        }
        Some(Commands::Stats) => {
            let api = ApiClient::new(&config)?;
            commands::stats::run(&api).await
        }
        Some(Commands::Recommend) => {
            let api = ApiClient::new(&config)?;
            commands::recommend::run(&api).await
        }
    }
}
