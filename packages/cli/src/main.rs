#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the fund fact sheet extraction tool.
//!
//! Iterates a directory of PDF fact sheets, asks an LLM to pull the fixed
//! field schema out of each one, and writes all rows to a single CSV at
//! the end of the run. Entirely sequential; one completion call per
//! document, no retries.

mod interactive;
mod pipeline;
mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::pipeline::{ErrorPolicy, ExtractOptions};

#[derive(Parser)]
#[command(name = "fund_sheets", about = "Fund fact sheet field extraction tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from every PDF in a directory into one CSV
    Extract {
        /// Directory containing fact sheet PDFs
        #[arg(long, default_value = "FundFactSheet")]
        input: PathBuf,
        /// Output CSV path
        #[arg(long, default_value = "product_data.csv")]
        output: PathBuf,
        /// Abort the whole batch at the first failing document instead of
        /// skipping it
        #[arg(long)]
        halt_on_error: bool,
        /// Maximum number of documents to process (for smoke runs)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the fields extracted from every fact sheet
    Fields,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = progress::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi).await;
    };

    match command {
        Commands::Fields => {
            for field in fund_sheets_schema::FIELDS {
                println!("{field}");
            }
        }
        Commands::Extract {
            input,
            output,
            halt_on_error,
            limit,
        } => {
            let provider = fund_sheets_ai::providers::create_provider_from_env()?;

            let options = ExtractOptions {
                input,
                output,
                policy: if halt_on_error {
                    ErrorPolicy::Halt
                } else {
                    ErrorPolicy::Skip
                },
                limit,
            };

            pipeline::run(provider.as_ref(), &options, &multi).await?;
        }
    }

    Ok(())
}
