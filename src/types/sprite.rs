//! Sprite type - one named tile with its representative colour.

use image::RgbaImage;

use crate::error::{KegError, Result};

use super::Colour;

/// A named raster tile.
///
/// The average colour is computed once at construction and never changes;
/// sprites are immutable after creation.
#[derive(Debug, Clone)]
pub struct Sprite {
    name: String,
    image: RgbaImage,
    average: Colour,
}

impl Sprite {
    /// Create a sprite, computing its average colour.
    ///
    /// Fails if the image has no pixels.
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Result<Self> {
        let name = name.into();
        if image.width() == 0 || image.height() == 0 {
            return Err(KegError::Validation {
                message: format!("Sprite '{}' has zero dimensions", name),
                help: Some("Sprites must be at least 1x1 pixels".to_string()),
            });
        }

        let average = average_colour(&image);
        Ok(Self {
            name,
            image,
            average,
        })
    }

    /// Sprite name (unique within a corpus).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sprite's pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The representative colour used for palette indexing.
    pub fn average(&self) -> Colour {
        self.average
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// True when every pixel equals the first one.
    ///
    /// Stops at the first differing pixel.
    pub fn is_uniform(&self) -> bool {
        let mut pixels = self.image.pixels();
        match pixels.next() {
            Some(first) => pixels.all(|p| p == first),
            None => true,
        }
    }
}

/// Compute the representative colour of an image.
///
/// Channels are summed over pixels with non-zero alpha, but divided by the
/// total pixel count, so transparent margins darken the result. The output
/// alpha is always opaque.
pub fn average_colour(image: &RgbaImage) -> Colour {
    let total = image.width() as u64 * image.height() as u64;
    if total == 0 {
        return Colour::BLACK;
    }

    let mut sums = [0u64; 4];
    for px in image.pixels().filter(|p| p[3] != 0) {
        for (sum, &channel) in sums.iter_mut().zip(px.0.iter()) {
            *sum += channel as u64;
        }
    }

    // Round half up.
    let mean = |sum: u64| ((sum + total / 2) / total).min(255) as u8;
    Colour::rgb(mean(sums[0]), mean(sums[1]), mean(sums[2]))
}
