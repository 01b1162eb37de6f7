//! Scale factors and nearest-neighbour resampling.

use std::fmt;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{KegError, Result};

/// A validated scale factor in the range (0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Scale {
    /// Full size.
    pub const FULL: Scale = Scale(1.0);

    /// Create a scale from a fraction in (0, 1].
    ///
    /// `parameter` names the value in the error message.
    pub fn new(parameter: &str, value: f64) -> Result<Self> {
        if value.is_nan() || value <= 0.0 || value > 1.0 {
            return Err(KegError::Validation {
                message: format!("{} must be in (0, 1], got {}", parameter, value),
                help: Some("Use a fraction such as 0.5 (1 keeps the original size)".to_string()),
            });
        }
        Ok(Self(value))
    }

    /// Create a scale from a percentage in (0, 100].
    pub fn from_percent(parameter: &str, percent: f64) -> Result<Self> {
        if percent.is_nan() || percent <= 0.0 || percent > 100.0 {
            return Err(KegError::validation(format!(
                "{} must be in (0, 100], got {}",
                parameter, percent
            )));
        }
        Ok(Self(percent / 100.0))
    }

    /// The scale as a fraction.
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_full(self) -> bool {
        self.0 == 1.0
    }

    /// Scale a length: `ceil(len * scale)`, never zero for a non-zero length.
    pub fn apply(self, len: u32) -> u32 {
        if len == 0 {
            return 0;
        }
        ((len as f64 * self.0).ceil() as u32).clamp(1, len)
    }

    /// Scale a (width, height) pair.
    pub fn apply_size(self, (w, h): (u32, u32)) -> (u32, u32) {
        (self.apply(w), self.apply(h))
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}

/// Resample an image to the given size with nearest-neighbour sampling.
///
/// Returns a copy unchanged when the size already matches.
pub fn resize_nearest(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Nearest)
}
