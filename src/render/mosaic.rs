//! Mosaic renderer - redraws an image as a grid of corpus sprites.
//!
//! Each pixel of the downsampled source becomes one tile. The sprite for a
//! tile is drawn at random from the palette bucket nearest to the pixel's
//! colour, and the choice is remembered for the rest of the render so equal
//! colours always get the same sprite.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use image::imageops;
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{KegError, Result};
use crate::types::{resize_nearest, Colour, Corpus, Scale, Sprite};

/// A rendered mosaic.
#[derive(Debug, Clone)]
pub struct Mosaic {
    /// The composed canvas.
    pub image: RgbaImage,
    /// Grid width in tiles.
    pub columns: u32,
    /// Grid height in tiles.
    pub rows: u32,
    /// Tile size in pixels.
    pub tile: (u32, u32),
    /// Sprite name per tile, row-major.
    placements: Vec<String>,
}

impl Mosaic {
    /// Name of the sprite drawn at a grid cell.
    pub fn sprite_at(&self, col: u32, row: u32) -> Option<&str> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        self.placements
            .get((row * self.columns + col) as usize)
            .map(String::as_str)
    }

    /// Sprite names per tile, row-major.
    pub fn placements(&self) -> &[String] {
        &self.placements
    }
}

/// Renders source images with the sprites of one corpus.
pub struct MosaicRenderer<'a> {
    corpus: &'a Corpus,
    image_scale: Scale,
    emoji_scale: Scale,
}

impl<'a> MosaicRenderer<'a> {
    /// Create a renderer. Fails if the corpus has no sprites.
    pub fn new(corpus: &'a Corpus, image_scale: Scale, emoji_scale: Scale) -> Result<Self> {
        if corpus.is_empty() || corpus.palette().is_empty() {
            return Err(KegError::Validation {
                message: "Cannot render a mosaic with an empty corpus".to_string(),
                help: Some("Check that the brand loaded at least one non-blank sprite".to_string()),
            });
        }
        Ok(Self {
            corpus,
            image_scale,
            emoji_scale,
        })
    }

    /// Render with a generator seeded from `seed`.
    pub fn render_seeded(&self, source: &RgbaImage, seed: u64) -> Result<Mosaic> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.render(source, &mut rng)
    }

    /// Render `source` as a grid of sprites.
    pub fn render<R: Rng>(&self, source: &RgbaImage, rng: &mut R) -> Result<Mosaic> {
        let (src_w, src_h) = source.dimensions();
        if src_w == 0 || src_h == 0 {
            return Err(KegError::validation(format!(
                "Source image has zero dimensions ({}x{})",
                src_w, src_h
            )));
        }

        let tile_size = self.corpus.tile_size().ok_or_else(|| {
            KegError::validation("Cannot render a mosaic with an empty corpus")
        })?;
        let (tile_w, tile_h) = self.emoji_scale.apply_size(tile_size);
        let (columns, rows) = self.image_scale.apply_size((src_w, src_h));

        let canvas_w = columns.checked_mul(tile_w);
        let canvas_h = rows.checked_mul(tile_h);
        let (canvas_w, canvas_h) = match (canvas_w, canvas_h) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(KegError::Validation {
                    message: format!(
                        "Mosaic of {}x{} tiles at {}x{} px is too large",
                        columns, rows, tile_w, tile_h
                    ),
                    help: Some("Lower the image scale or the emoji scale".to_string()),
                })
            }
        };

        let sampled = resize_nearest(source, columns, rows);
        let mut canvas = RgbaImage::new(canvas_w, canvas_h);
        let mut chosen: HashMap<Colour, (Arc<Sprite>, RgbaImage)> = HashMap::new();
        let mut placements = Vec::with_capacity((columns * rows) as usize);

        for (x, y, px) in sampled.enumerate_pixels() {
            let colour = Colour::from(*px);

            let (sprite, tile) = match chosen.entry(colour) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let bucket = self.corpus.palette().nearest(colour)?;
                    let sprite = Arc::clone(&bucket[rng.random_range(0..bucket.len())]);
                    let tile = resize_nearest(sprite.image(), tile_w, tile_h);
                    entry.insert((sprite, tile))
                }
            };

            imageops::overlay(
                &mut canvas,
                &*tile,
                (x * tile_w) as i64,
                (y * tile_h) as i64,
            );
            placements.push(sprite.name().to_string());
        }

        Ok(Mosaic {
            image: canvas,
            columns,
            rows,
            tile: (tile_w, tile_h),
            placements,
        })
    }
}
