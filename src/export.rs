//! Sprite directory export.
//!
//! Writes a brand back out as `{dir}/{brand}/{i}__{name}.png`, the layout
//! directory ingestion reads.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::render::write_raster;
use crate::types::{resize_nearest, Brand, Scale};

/// Write every sprite of `brand` to its own PNG under `{dir}/{brand}`.
///
/// Indices are 1-based in corpus order. Returns the brand directory.
pub fn export_sprites(brand: &Brand, dir: &Path, scale: Scale) -> Result<PathBuf> {
    let brand_dir = dir.join(brand.name());
    for (i, sprite) in brand.corpus().sprites().enumerate() {
        let path = brand_dir.join(format!("{}__{}.png", i + 1, sprite.name()));
        if scale.is_full() {
            write_raster(sprite.image(), &path, 100)?;
        } else {
            let (w, h) = scale.apply_size(sprite.size());
            write_raster(&resize_nearest(sprite.image(), w, h), &path, 100)?;
        }
    }
    Ok(brand_dir)
}
