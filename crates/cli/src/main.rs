// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sd - drive an inference worker over line-delimited JSON RPC

mod color;
mod commands;
mod env;
mod exit_error;
mod logging;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "sd", version, disable_help_subcommand = true, styles = color::styles())]
#[command(about = "Run threads against an inference worker")]
struct Cli {
    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a thread, or continue one from saved messages
    Thread(commands::thread::ThreadArgs),
}

#[tokio::main]
async fn main() {
    logging::init();
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        std::process::exit(ExitError::code_of(&err));
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Thread(args)) => commands::thread::handle(args, cli.format).await,
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
