//! Rendering module for keg.
//!
//! This module handles composing mosaics from corpus sprites and reading
//! and writing raster files.

mod mosaic;
mod raster;

pub use mosaic::{Mosaic, MosaicRenderer};
pub use raster::{check_quality, open_raster, resolve_output, write_raster, OutputFormat};
