//! Emojify command implementation.
//!
//! Renders an input image as an emoji mosaic with one brand, or with
//! every loaded brand in turn.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Args;

use crate::error::{KegError, Result};
use crate::output::Printer;
use crate::render::{check_quality, open_raster, write_raster, MosaicRenderer};
use crate::types::{Brand, Keg};

use super::SourceArgs;

/// Render an image as a mosaic of emojis
#[derive(Args, Debug)]
pub struct EmojifyArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Image to render
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output file (with --brand) or directory (default: from config, else "out")
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Mosaic grid size as a fraction of the input size, in (0, 1]
    #[arg(long)]
    pub image_scale: Option<f64>,

    /// Tile size as a fraction of the emoji size, in (0, 1]
    #[arg(long)]
    pub emoji_scale: Option<f64>,

    /// Output quality in (0, 100]; below 100 writes JPEG
    #[arg(long, short)]
    pub quality: Option<u8>,

    /// Render with this brand only
    #[arg(long, short)]
    pub brand: Option<String>,

    /// Seed for emoji selection (default: from the clock)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: EmojifyArgs, printer: &Printer) -> Result<()> {
    let mut config = args.source.config()?;
    if let Some(value) = args.image_scale {
        config.image_scale = value;
    }
    if let Some(value) = args.emoji_scale {
        config.emoji_scale = value;
    }
    let image_scale = config.image_scale()?;
    let emoji_scale = config.emoji_scale()?;
    let quality = check_quality(args.quality.unwrap_or(config.quality))?;
    let seed = args.seed.or(config.seed).unwrap_or_else(clock_seed);

    let source = open_raster(&args.input)?;
    let stem = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mosaic".to_string());

    let keg = args.source.load(&config, printer)?;
    let output = args.output.as_deref();
    let targets = plan(&keg, args.brand.as_deref(), output, &config.output, &stem)?;

    printer.info("Seed", &seed.to_string());
    for (brand, path) in targets {
        printer.status("Rendering", &format!("{} with {}", printer.path(&args.input), brand.name()));
        let mosaic = MosaicRenderer::new(brand.corpus(), image_scale, emoji_scale)?
            .render_seeded(&source, seed)?;
        let written = write_raster(&mosaic.image, &path, quality)?;
        printer.info(
            "Wrote",
            &format!(
                "{} {}",
                printer.path(&written),
                printer.dim(&format!("({}x{} tiles)", mosaic.columns, mosaic.rows))
            ),
        );
    }

    Ok(())
}

/// Pick the brands to render and where each one goes.
fn plan<'k>(
    keg: &'k Keg,
    brand: Option<&str>,
    output: Option<&Path>,
    default_dir: &Path,
    stem: &str,
) -> Result<Vec<(&'k Brand, PathBuf)>> {
    match brand {
        Some(name) => {
            let brand = keg.find(name).ok_or_else(|| KegError::Validation {
                message: format!("Unknown brand '{}'", name),
                help: Some(format!(
                    "Loaded brands: {}",
                    keg.brands().iter().map(Brand::name).collect::<Vec<_>>().join(", ")
                )),
            })?;
            let path = match output {
                Some(path) => path.to_path_buf(),
                None => default_dir.join(format!("{}-{}", stem, brand.name())),
            };
            Ok(vec![(brand, path)])
        }
        None => {
            let dir = output.unwrap_or(default_dir);
            Ok(keg
                .brands()
                .iter()
                .map(|b| (b, dir.join(b.name()).join(format!("{}-{}", stem, b.name()))))
                .collect())
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
