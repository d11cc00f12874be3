//! Todo example binary
//!
//! Reads one command per line from stdin and prints the list after each.

use anyhow::Context;
use std::io::{self, BufRead, Write};
use todo::cli::{self, Command, Reply};
use todo::{Config, TodoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| Config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    todo_store_runtime::metrics::register_metrics();

    tracing::info!(
        id_strategy = ?config.id_strategy,
        "Starting todo session"
    );

    let mut store = TodoStore::from_config(&config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{}", cli::USAGE)?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(stdout, "{e}\n{}", cli::USAGE)?;
                continue;
            },
        };

        match cli::execute(&mut store, command).context("Failed to render snapshot")? {
            Reply::Output(text) => writeln!(stdout, "{text}")?,
            Reply::Quit => break,
        }
    }

    let snapshot = store.snapshot();
    tracing::info!(
        todos = snapshot.len(),
        liked = snapshot.liked_count(),
        saved = snapshot.saved_count(),
        "Session finished"
    );

    Ok(())
}
