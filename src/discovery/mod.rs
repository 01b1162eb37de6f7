//! Source discovery and brand loading.
//!
//! Command-line paths are split into sprite directories and cartridge
//! files, then each one is loaded as an independent brand.
//!
//! # Example
//!
//! ```ignore
//! use emojikeg::discovery::{classify_sources, load_sources, LoadOptions};
//!
//! let sources = classify_sources(&paths);
//! let keg = load_sources(&sources, &LoadOptions::default())?;
//! println!("{}", keg);
//! ```

mod config;
mod loader;
mod scanner;

pub use config::{Config, CONFIG_FILENAME};
pub use loader::{load_cartridge, load_directory, load_sources, LoadOptions};
pub use scanner::{classify_sources, is_image_file, list_images, parse_indexed_name, Sources};
