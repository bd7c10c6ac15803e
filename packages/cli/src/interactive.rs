//! Interactive flow when the binary is run without a subcommand.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};
use indicatif::MultiProgress;

use crate::pipeline::{self, ErrorPolicy, ExtractOptions};

/// Prompts for the run configuration, then executes the extraction.
///
/// # Errors
///
/// Returns an error if a prompt, provider setup, or the pipeline fails.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt("Fact sheet directory")
        .default("FundFactSheet".to_string())
        .interact_text()?;

    let output: String = Input::new()
        .with_prompt("Output CSV file")
        .default("product_data.csv".to_string())
        .interact_text()?;

    let halt = Confirm::new()
        .with_prompt("Halt the whole batch on the first failing document?")
        .default(false)
        .interact()?;

    let provider = fund_sheets_ai::providers::create_provider_from_env()?;

    let options = ExtractOptions {
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        policy: if halt {
            ErrorPolicy::Halt
        } else {
            ErrorPolicy::Skip
        },
        limit: None,
    };

    pipeline::run(provider.as_ref(), &options, multi).await?;

    Ok(())
}
