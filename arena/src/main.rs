//! Arena - plays tic-tac-toe matches between the MCTS player and an opponent
//!
//! Each match alternates the first mover. Opponent moves on occupied cells are
//! rejected and asked for again; the search player's moves are always legal.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;

mod arena;
mod config;
mod policy;
mod render;
mod stats;

use crate::arena::Arena;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    info!(
        games = config.games,
        seed = config.seed,
        opponent = %config.opponent,
        "Starting arena"
    );

    let stats_path = config.stats_path.clone();
    let mut arena = Arena::new(config)?;
    let stats = arena.run()?;

    println!("{}", stats);

    if let Some(path) = stats_path {
        stats.write_json(Path::new(&path))?;
        info!(path = %path, "Match stats written");
    }

    Ok(())
}
