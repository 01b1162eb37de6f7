//! Cartridge unpacking.
//!
//! Slices a cartridge sheet back into cells. Cell `i` in row-major scan
//! order becomes the sprite named `"{i}"` at slot `i`.

use image::imageops;
use image::RgbaImage;
use log::warn;

use crate::error::{KegError, Result};
use crate::types::{resize_nearest, BrandBuilder, Colour, Scale};

/// A single cell cut from a cartridge sheet.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Row-major scan index.
    pub index: usize,
    pub row: u32,
    pub col: u32,
    pub image: RgbaImage,
}

/// Parse a "WxH" dimension string into (width, height).
pub fn parse_dimensions(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(|| KegError::Parse {
        message: format!("Invalid dimensions '{}': expected WxH (e.g. 72x72)", s),
        help: Some("Use the format WxH, for example: 72x72, 36x36".to_string()),
    })?;

    let w: u32 = w.parse().map_err(|_| KegError::Parse {
        message: format!("Invalid width '{}' in dimensions '{}'", w, s),
        help: Some("Width must be a positive integer".to_string()),
    })?;

    let h: u32 = h.parse().map_err(|_| KegError::Parse {
        message: format!("Invalid height '{}' in dimensions '{}'", h, s),
        help: Some("Height must be a positive integer".to_string()),
    })?;

    if w == 0 || h == 0 {
        return Err(KegError::Parse {
            message: format!("Dimensions must be non-zero, got {}x{}", w, h),
            help: Some("Both width and height must be at least 1".to_string()),
        });
    }

    Ok((w, h))
}

/// Split a cartridge file stem into its name and the `-WxH` cell size.
///
/// `"Apple-72x72"` gives `("Apple", (72, 72))`. Returns `None` when the
/// stem carries no valid suffix.
pub fn parse_tile_suffix(stem: &str) -> Option<(String, (u32, u32))> {
    let (name, dims) = stem.rsplit_once('-')?;
    if !dims.contains(['x', 'X']) || !dims.chars().all(|c| c.is_ascii_digit() || c == 'x' || c == 'X') {
        return None;
    }
    let size = parse_dimensions(dims).ok()?;
    Some((name.to_string(), size))
}

/// Cut a sheet into a row-major grid of `tile`-sized cells.
///
/// Partial cells at the right or bottom edge are dropped. With a
/// background colour each cell is drawn over a solid fill of it.
pub fn slice_cartridge(
    sheet: &RgbaImage,
    (cell_w, cell_h): (u32, u32),
    background: Option<Colour>,
) -> Result<Vec<Cell>> {
    if cell_w == 0 || cell_h == 0 {
        return Err(KegError::validation(format!(
            "Cell size must be non-zero, got {}x{}",
            cell_w, cell_h
        )));
    }

    let cols = sheet.width() / cell_w;
    let rows = sheet.height() / cell_h;

    if cols == 0 || rows == 0 {
        return Err(KegError::Validation {
            message: format!(
                "Sheet {}x{} is smaller than one {}x{} cell",
                sheet.width(),
                sheet.height(),
                cell_w,
                cell_h
            ),
            help: Some("Check the -WxH suffix or pass --tile explicitly".to_string()),
        });
    }

    if sheet.width() % cell_w != 0 || sheet.height() % cell_h != 0 {
        warn!(
            "sheet {}x{} is not a multiple of {}x{}; partial edge cells ignored",
            sheet.width(),
            sheet.height(),
            cell_w,
            cell_h
        );
    }

    let mut cells = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let cut = imageops::crop_imm(sheet, col * cell_w, row * cell_h, cell_w, cell_h).to_image();
            let image = match background {
                Some(colour) => {
                    let mut filled = RgbaImage::from_pixel(cell_w, cell_h, colour.into());
                    imageops::overlay(&mut filled, &cut, 0, 0);
                    filled
                }
                None => cut,
            };
            cells.push(Cell {
                index: cells.len(),
                row,
                col,
                image,
            });
        }
    }

    Ok(cells)
}

/// Unpack a sheet into a new brand.
///
/// Each cell is resized by `sprite_scale` before insertion. The returned
/// builder still holds padding cells; finishing it strips them.
pub fn unpack(
    sheet: &RgbaImage,
    brand: impl Into<String>,
    tile: (u32, u32),
    background: Option<Colour>,
    sprite_scale: Scale,
) -> Result<BrandBuilder> {
    let builder = BrandBuilder::new(brand);
    for cell in slice_cartridge(sheet, tile, background)? {
        let image = if sprite_scale.is_full() {
            cell.image
        } else {
            let (w, h) = sprite_scale.apply_size(tile);
            resize_nearest(&cell.image, w, h)
        };
        builder.insert_at(cell.index, cell.index.to_string(), image)?;
    }
    Ok(builder)
}
