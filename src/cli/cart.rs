//! Cart command implementation.
//!
//! Loads brands and packs each into one cartridge PNG.

use std::path::PathBuf;

use clap::Args;

use crate::cartridge::write_cartridge;
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::Scale;

use super::SourceArgs;

/// Pack each brand into a single cartridge PNG
#[derive(Args, Debug)]
pub struct CartArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory (default: from config, else "out")
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Tile scale as a fraction in (0, 1]
    #[arg(long, default_value = "1")]
    pub scale: f64,
}

pub fn run(args: CartArgs, printer: &Printer) -> Result<()> {
    let config = args.source.config()?;
    let scale = Scale::new("--scale", args.scale)?;
    let output = args.output.unwrap_or_else(|| config.output.clone());

    let keg = args.source.load(&config, printer)?;

    for brand in keg.brands() {
        printer.status("Packing", &format!("{} ({})", brand.name(), plural(brand.len(), "emoji", "emojis")));
        let (path, cartridge) = write_cartridge(brand, &output, scale)?;
        printer.info(
            "Wrote",
            &format!(
                "{} {}",
                printer.path(&path),
                printer.dim(&format!("({}x{} grid)", cartridge.columns, cartridge.rows))
            ),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::write_raster;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_cart_writes_one_file_per_brand() {
        let root = tempdir().unwrap();
        for brand in ["Goog", "Sams"] {
            let dir = root.path().join(brand);
            for i in 1..=3u8 {
                let mut img = RgbaImage::from_pixel(5, 5, Rgba([i * 50, 0, 0, 255]));
                img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
                write_raster(&img, &dir.join(format!("{}__e{}.png", i, i)), 100).unwrap();
            }
        }
        let out = root.path().join("carts");

        let args = CartArgs {
            source: SourceArgs {
                sources: vec![root.path().join("Goog"), root.path().join("Sams")],
                tile: None,
                sprite_scale: None,
                background: None,
                config: None,
            },
            output: Some(out.clone()),
            scale: 1.0,
        };
        run(args, &Printer::plain()).unwrap();

        // Default brand names translate the directory names.
        assert!(out.join("Google-5x5.png").is_file());
        assert!(out.join("Samsung-5x5.png").is_file());
    }
}
