//! Project configuration (keg.yaml) parsing.
//!
//! The config holds output defaults and the brand display-name table. It
//! is loaded once at start-up and passed explicitly to whatever needs it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KegError, Result};
use crate::types::{default_brand_names, BrandNames, Colour, Scale};

/// The name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "keg.yaml";

/// Configuration loaded from keg.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output directory for cartridges, sprite exports and mosaics.
    pub output: PathBuf,

    /// Output quality in (0, 100]; below 100 selects JPEG.
    pub quality: u8,

    /// Fraction of the source image's size used as the mosaic grid.
    pub image_scale: f64,

    /// Fraction of each sprite's size used as the mosaic tile.
    pub emoji_scale: f64,

    /// Colour painted under unpacked cartridge cells.
    pub background: Option<String>,

    /// Fixed seed for mosaic sprite selection.
    pub seed: Option<u64>,

    /// Brand display names (e.g. "Goog" -> "Google").
    pub brand_names: BrandNames,
}

fn default_output() -> PathBuf {
    PathBuf::from("out")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            quality: 100,
            image_scale: 1.0,
            emoji_scale: 1.0,
            background: None,
            seed: None,
            brand_names: default_brand_names(),
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KegError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| KegError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some("Check keg.yaml syntax".to_string()),
        })
    }

    /// Load an explicit config file, or `keg.yaml` from `dir` if present,
    /// or fall back to defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// The background colour, parsed.
    pub fn background_colour(&self) -> Result<Option<Colour>> {
        self.background.as_deref().map(Colour::from_hex).transpose()
    }

    pub fn image_scale(&self) -> Result<Scale> {
        Scale::new("image_scale", self.image_scale)
    }

    pub fn emoji_scale(&self) -> Result<Scale> {
        Scale::new("emoji_scale", self.emoji_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("output: build").unwrap();

        assert_eq!(config.output, PathBuf::from("build"));
        assert_eq!(config.quality, 100);
        assert_eq!(config.brand_names.get("Goog").map(String::as_str), Some("Google"));
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r##"
output: renders
quality: 85
image_scale: 0.25
emoji_scale: 0.5
background: "#FFFFFF"
seed: 42
brand_names:
  Appl: Apple
"##;
        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.output, PathBuf::from("renders"));
        assert_eq!(config.quality, 85);
        assert_eq!(config.image_scale().unwrap().value(), 0.25);
        assert_eq!(config.emoji_scale().unwrap().value(), 0.5);
        assert_eq!(config.background_colour().unwrap(), Some(Colour::WHITE));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.brand_names.len(), 1);
        assert_eq!(config.brand_names.get("Appl").map(String::as_str), Some("Apple"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.output, PathBuf::from("out"));
        assert!(config.background_colour().unwrap().is_none());
    }

    #[test]
    fn test_invalid_values_surface_on_use() {
        let config = Config::parse("image_scale: 2.0\nbackground: nope").unwrap();
        assert!(config.image_scale().is_err());
        assert!(config.background_colour().is_err());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(Config::parse("quality: [").is_err());
    }

    #[test]
    fn test_resolve_prefers_local_file() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::resolve(None, dir.path()).unwrap().quality, 100);

        fs::write(dir.path().join(CONFIG_FILENAME), "quality: 70").unwrap();
        assert_eq!(Config::resolve(None, dir.path()).unwrap().quality, 70);

        let other = dir.path().join("other.yaml");
        fs::write(&other, "quality: 40").unwrap();
        assert_eq!(Config::resolve(Some(&other), dir.path()).unwrap().quality, 40);
    }
}
