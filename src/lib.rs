//! emojikeg - Emoji mosaics and sprite cartridges
//!
//! A library for loading emoji sets ("brands") from sprite folders or
//! packed cartridge images, indexing them by average colour, and rendering
//! arbitrary images as mosaics of those emojis.

pub mod cartridge;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod export;
pub mod normalize;
pub mod output;
pub mod render;
pub mod types;

pub use cartridge::{unpack, write_cartridge, Cartridge, CartridgePacker};
pub use discovery::{classify_sources, load_sources, Config, LoadOptions, Sources};
pub use error::{KegError, Result};
pub use export::export_sprites;
pub use normalize::{normalize, NormalizeReport};
pub use render::{open_raster, write_raster, Mosaic, MosaicRenderer};
pub use types::{
    average_colour, Brand, BrandBuilder, BrandNames, Colour, Corpus, Keg, PaletteIndex, Scale,
    Sprite,
};
