//! staffdesk CLI Entry Point
//!
//! Interactive stdin/stdout menu; no flags or subcommands beyond
//! `--help`/`--version`. Tables and prompts go to stdout, logs to stderr.
//! Exits 0 on a normal quit; any unhandled error prints a diagnostic and
//! exits non-zero.

use anyhow::Context;
use clap::Parser;

use staffdesk::store::Store;
use staffdesk::{config, menu};

/// Interactive command-line employee tracker backed by MySQL
#[derive(Parser)]
#[command(name = "staffdesk")]
#[command(about = "Interactive command-line employee tracker backed by MySQL")]
#[command(version)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let _cli = Cli::parse();

    let config = config::resolve().context("could not resolve database configuration")?;
    let mut store = Store::connect(&config)
        .await
        .context("could not connect to the database")?;
    println!("Connected to the database.");

    menu::run(&mut store).await?;

    store.disconnect().await?;
    println!("Goodbye!");
    Ok(())
}
