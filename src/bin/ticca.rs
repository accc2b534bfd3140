//! Ticca CLI Binary
//!
//! Command-line interface for the ticca agent directory.

use clap::Parser;
use std::process;
use ticca::error::ApiError;
use ticca::logging::init_logging;
use ticca::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    // Create CLI context
    let context = match CliContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing workspace: {}", e);
            process::exit(exit_code(&e));
        }
    };

    let logging = context.logging_config(&cli.logging_overrides());
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(exit_code(&e));
    }

    // Execute command
    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(exit_code(&e));
        }
    }
}

/// Configuration problems exit with 2, other failures with 1.
fn exit_code(err: &ApiError) -> i32 {
    if err.is_fatal() {
        2
    } else {
        1
    }
}
