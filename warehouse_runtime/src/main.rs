//! `warehouse` — interactive warehouse simulation.
//!
//! Reads the warehouse configuration, then one command per line from stdin
//! until `close` or end of input.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use warehouse_runtime::logging::init_logger;
use warehouse_runtime::session::{Session, SessionError};

#[derive(Parser)]
#[command(
    name = "warehouse",
    about = "Step-based warehouse fulfilment simulation",
    long_about = "Loads customers and volunteers from a configuration file, then reads\n\
                  commands (step, order, customer, orderStatus, customerStatus,\n\
                  volunteerStatus, log, backup, restore, close) from stdin."
)]
struct Cli {
    /// Warehouse configuration file
    config_path: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "WAREHOUSE_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.log_level)?;

    let mut session = Session::from_config_file(&cli.config_path).with_context(|| {
        format!(
            "unable to open configuration file {}",
            cli.config_path.display()
        )
    })?;
    for err in session.config_errors() {
        eprintln!("Error: configuration {}", err);
    }

    println!("Warehouse is open!");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }
        match session.handle_line(&line) {
            Ok(output) => {
                let text = output.to_string();
                if !text.is_empty() {
                    println!("{}", text);
                }
            }
            Err(SessionError::Closed) => break,
            Err(e) => println!("{}", e),
        }
        if !session.is_open() {
            break;
        }
    }

    Ok(())
}
