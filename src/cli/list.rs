//! List command implementation.
//!
//! Writes every brand out as a folder of `{index}__{name}.png` files, the
//! layout that folder sources are read from.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::export::export_sprites;
use crate::output::{plural, Printer};
use crate::types::Scale;

use super::SourceArgs;

/// Write each brand's sprites as individual files
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory (default: from config, else "out")
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Sprite scale as a fraction in (0, 1]
    #[arg(long, default_value = "1")]
    pub scale: f64,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let config = args.source.config()?;
    let scale = Scale::new("--scale", args.scale)?;
    let output = args.output.unwrap_or_else(|| config.output.clone());

    let keg = args.source.load(&config, printer)?;

    for brand in keg.brands() {
        let dir = export_sprites(brand, &output, scale)?;
        printer.status(
            "Exported",
            &format!("{} to {}", plural(brand.len(), "emoji", "emojis"), printer.path(&dir)),
        );
    }

    Ok(())
}
