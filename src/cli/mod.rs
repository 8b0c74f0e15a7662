//! CLI module - Command-line interface for matchstats
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};

use crate::config::Config;

/// matchstats - read-only football statistics API
#[derive(Parser)]
#[command(name = "matchstats")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "daemon")]
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch the competition list once to verify upstream access
    #[command(alias = "-c", alias = "--check")]
    Check,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let state = crate::api::create_app_state(config.clone(), None)?;

    println!("Fetching competitions from {}", config.upstream.base_url);
    let competitions = state.stats.list_competitions().await?;

    println!("✓ {} competition seasons available", competitions.len());
    for competition in competitions.iter().take(5) {
        println!(
            "  {} - {} ({}) [{}/{}]",
            competition.country_name,
            competition.competition_name,
            competition.season_name,
            competition.competition_id,
            competition.season_id
        );
    }

    Ok(())
}
