//! Brands command implementation.
//!
//! Prints the loaded keg to stdout, as text or JSON.

use clap::Args;

use crate::error::{KegError, Result};
use crate::output::Printer;
use crate::types::Keg;

use super::SourceArgs;

/// Print the loaded brands and their sizes
#[derive(Args, Debug)]
pub struct BrandsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print a JSON summary instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BrandsArgs, printer: &Printer) -> Result<()> {
    let config = args.source.config()?;
    let keg = args.source.load(&config, printer)?;
    println!("{}", render(&keg, args.json)?);
    Ok(())
}

fn render(keg: &Keg, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(&keg.summary()).map_err(|e| KegError::Build {
            message: format!("Failed to serialize summary: {}", e),
            help: None,
        })
    } else {
        Ok(keg.to_string())
    }
}
