//! Cartridge packer.
//!
//! Lays a corpus out on a near-square grid of equal cells, row-major from
//! the top-left, and records the cell size in the file name.

use std::path::{Path, PathBuf};

use image::imageops;
use image::RgbaImage;

use crate::error::{KegError, Result};
use crate::render::write_raster;
use crate::types::{resize_nearest, Brand, Corpus, Scale};

/// A packed cartridge sheet.
#[derive(Debug, Clone)]
pub struct Cartridge {
    /// The sheet image.
    pub image: RgbaImage,
    /// Cell size in pixels.
    pub tile: (u32, u32),
    /// Grid width in cells.
    pub columns: u32,
    /// Grid height in cells.
    pub rows: u32,
    /// Number of sprites placed.
    pub placed: usize,
}

impl Cartridge {
    /// File name for this cartridge: `{stem}-{W}x{H}.png`.
    pub fn file_name(&self, stem: &str) -> String {
        cartridge_file_name(stem, self.tile)
    }
}

/// Grid shape for `count` sprites.
///
/// Columns are `floor(sqrt(count))`; rows are `ceil(count / columns)` plus
/// one spare row.
pub fn grid_for(count: usize) -> (u32, u32) {
    let columns = integer_sqrt(count).max(1);
    let rows = count.div_ceil(columns) + 1;
    (columns as u32, rows as u32)
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Format the cartridge file name carrying the cell size.
pub fn cartridge_file_name(stem: &str, (w, h): (u32, u32)) -> String {
    format!("{}-{}x{}.png", stem, w, h)
}

/// Packs corpora into cartridge sheets.
pub struct CartridgePacker {
    pub scale: Scale,
}

impl CartridgePacker {
    pub fn new(scale: Scale) -> Self {
        Self { scale }
    }

    /// Pack every sprite of the corpus, in list order.
    pub fn pack(&self, corpus: &Corpus) -> Result<Cartridge> {
        let tile_size = corpus.tile_size().ok_or_else(|| KegError::Validation {
            message: "Cannot pack an empty corpus".to_string(),
            help: Some("Check that the brand loaded at least one non-blank sprite".to_string()),
        })?;
        let (tile_w, tile_h) = self.scale.apply_size(tile_size);
        let (columns, rows) = grid_for(corpus.len());

        let (sheet_w, sheet_h) = match (columns.checked_mul(tile_w), rows.checked_mul(tile_h)) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(KegError::Build {
                    message: format!(
                        "Cartridge of {}x{} cells at {}x{} px is too large",
                        columns, rows, tile_w, tile_h
                    ),
                    help: Some("Use a smaller --scale".to_string()),
                })
            }
        };

        let mut sheet = RgbaImage::new(sheet_w, sheet_h);
        let mut placed = 0usize;

        for sprite in corpus.sprites() {
            let col = placed as u32 % columns;
            let row = placed as u32 / columns;
            let cell = resize_nearest(sprite.image(), tile_w, tile_h);
            // Cells never overlap, so copy instead of blending.
            imageops::replace(
                &mut sheet,
                &cell,
                (col * tile_w) as i64,
                (row * tile_h) as i64,
            );
            placed += 1;
        }

        Ok(Cartridge {
            image: sheet,
            tile: (tile_w, tile_h),
            columns,
            rows,
            placed,
        })
    }
}

/// Pack a brand and write it to `{dir}/{brand}-{W}x{H}.png`.
///
/// Returns the written path.
pub fn write_cartridge(brand: &Brand, dir: &Path, scale: Scale) -> Result<(PathBuf, Cartridge)> {
    let cartridge = CartridgePacker::new(scale).pack(brand.corpus())?;
    let path = dir.join(cartridge.file_name(brand.name()));
    let written = write_raster(&cartridge.image, &path, 100)?;
    Ok((written, cartridge))
}
