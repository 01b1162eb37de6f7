pub mod brands;
pub mod cart;
pub mod completions;
pub mod emojify;
pub mod list;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::cartridge::parse_dimensions;
use crate::discovery::{classify_sources, load_sources, Config, LoadOptions};
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::{Colour, Keg, Scale};

/// keg - Emoji mosaics and cartridge packing
#[derive(Parser, Debug)]
#[command(name = "keg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack each brand into a single cartridge PNG
    Cart(cart::CartArgs),

    /// Write each brand's sprites as individual files
    List(list::ListArgs),

    /// Render an image as a mosaic of emojis
    Emojify(emojify::EmojifyArgs),

    /// Print the loaded brands and their sizes
    Brands(brands::BrandsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Where emojis are loaded from. Shared by every loading subcommand.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Sprite folders and cartridge files
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,

    /// Cartridge tile size as WxH (default: from the `-WxH` file name suffix)
    #[arg(long)]
    pub tile: Option<String>,

    /// Resize sprites while loading, as a fraction in (0, 1]
    #[arg(long)]
    pub sprite_scale: Option<f64>,

    /// Colour painted under cartridge cells (e.g. #FFFFFF)
    #[arg(long)]
    pub background: Option<String>,

    /// Config file (default: ./keg.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Read the config file this invocation points at.
    pub fn config(&self) -> Result<Config> {
        Config::resolve(self.config.as_deref(), Path::new("."))
    }

    /// Merge flags over config into loader options.
    pub fn load_options(&self, config: &Config) -> Result<LoadOptions> {
        let sprite_scale = match self.sprite_scale {
            Some(value) => Scale::new("--sprite-scale", value)?,
            None => Scale::FULL,
        };
        let background = match &self.background {
            Some(hex) => Some(Colour::from_hex(hex)?),
            None => config.background_colour()?,
        };
        let tile = self.tile.as_deref().map(parse_dimensions).transpose()?;

        Ok(LoadOptions {
            sprite_scale,
            background,
            tile,
            jobs: None,
        })
    }

    /// Load every source into a keg with display names applied.
    pub fn load(&self, config: &Config, printer: &Printer) -> Result<Keg> {
        let options = self.load_options(config)?;
        let sources = classify_sources(&self.sources);
        printer.status("Loading", &plural(sources.total(), "source", "sources"));

        let mut keg = load_sources(&sources, &options)?;
        keg.apply_brand_names(&config.brand_names);

        let skipped = self.sources.len().saturating_sub(keg.len());
        if skipped > 0 {
            printer.warning("Skipped", &format!("{} that could not be loaded", plural(skipped, "source", "sources")));
        }

        for brand in keg.brands() {
            printer.info("Loaded", &format!("{} ({})", brand.name(), plural(brand.len(), "emoji", "emojis")));
        }
        Ok(keg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_emojify() {
        let cli = Cli::try_parse_from([
            "keg", "emojify", "emojis/Apple", "Goog-72x72.png", "--input", "cat.png", "--brand", "Apple",
            "--seed", "7", "--tile", "72x72",
        ])
        .unwrap();

        match cli.command {
            Commands::Emojify(args) => {
                assert_eq!(args.source.sources.len(), 2);
                assert_eq!(args.input, PathBuf::from("cat.png"));
                assert_eq!(args.brand.as_deref(), Some("Apple"));
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.source.tile.as_deref(), Some("72x72"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_sources_required() {
        assert!(Cli::try_parse_from(["keg", "cart"]).is_err());
    }

    #[test]
    fn test_load_options_from_flags_and_config() {
        let cli = Cli::try_parse_from(["keg", "brands", "x", "--tile", "36x36", "--sprite-scale", "0.5"]).unwrap();
        let Commands::Brands(args) = cli.command else {
            panic!("expected brands");
        };

        let config = Config::parse("background: \"#000\"").unwrap();
        let options = args.source.load_options(&config).unwrap();
        assert_eq!(options.tile, Some((36, 36)));
        assert_eq!(options.sprite_scale.value(), 0.5);
        assert_eq!(options.background, Some(Colour::BLACK));
    }

    #[test]
    fn test_load_keeps_good_sources() {
        let root = tempfile::tempdir().unwrap();
        let good = root.path().join("Joy");
        let mut img = image::RgbaImage::from_pixel(3, 3, image::Rgba([9, 9, 9, 255]));
        img.put_pixel(1, 1, image::Rgba([200, 0, 0, 255]));
        crate::render::write_raster(&img, &good.join("1__grin.png"), 100).unwrap();

        let source = SourceArgs {
            sources: vec![good, root.path().join("missing")],
            tile: None,
            sprite_scale: None,
            background: None,
            config: None,
        };
        let keg = source.load(&Config::default(), &Printer::plain()).unwrap();
        assert_eq!(keg.len(), 1);
        assert_eq!(keg.brands()[0].name(), "Joy");
    }

    #[test]
    fn test_load_options_reject_bad_values() {
        let cli = Cli::try_parse_from(["keg", "brands", "x", "--sprite-scale", "1.5"]).unwrap();
        let Commands::Brands(args) = cli.command else {
            panic!("expected brands");
        };
        assert!(args.source.load_options(&Config::default()).is_err());
    }
}
