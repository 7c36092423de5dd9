//! pdfduplex - Merge duplex scan batches into one document.

mod cli;

use anyhow::Context;
use clap::Parser;
use std::process;

use crate::cli::Cli;
use pdfduplex::error::DuplexError;
use pdfduplex::output::OutputFormatter;
use pdfduplex::pipeline::Pipeline;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        OutputFormatter::quiet().error(&format!("Error: {err:#}"));
        process::exit(exit_code(&err));
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "pdfduplex=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Cannot determine the current directory")?;
    let config = cli.to_config(&cwd)?;

    let formatter = OutputFormatter::from_config(&config);
    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfduplex::NAME, pdfduplex::VERSION));
        formatter.blank_line();
    }

    let working_dir = config.working_dir.clone();
    let report = Pipeline::new(config)
        .with_formatter(formatter)
        .run()
        .await
        .with_context(|| format!("Merging scans in {}", working_dir.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Exit code of the first [`DuplexError`] in the chain, or 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<DuplexError>())
        .map_or(1, DuplexError::exit_code)
}
