// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pocketledger::{Ledger, cli, commands, db, store::SqliteStore};

/// Log filter for the binary, e.g. `POCKETLEDGER_LOG=debug`.
const LOG_ENV: &str = "POCKETLEDGER_LOG";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = db::db_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let store = SqliteStore::open(&path)?;
    if let Some(("doctor", sub)) = matches.subcommand() {
        return commands::doctor::handle(&Ledger::unreconciled(store), sub);
    }
    let (mut ledger, on_load) = Ledger::open(store)
        .with_context(|| format!("Load ledger from {}", path.display()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let written = ledger.initialize_documents()?;
            println!("Database initialized at {}", path.display());
            if !written.is_empty() {
                println!("Seeded: {}", written.join(", "));
            }
        }
        Some(("wallet", sub)) => commands::wallets::handle(&mut ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut ledger, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut ledger, sub)?,
        Some(("migrate", _)) => {
            commands::doctor::migrate(&mut ledger, on_load)?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
