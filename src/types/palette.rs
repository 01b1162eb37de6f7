//! Palette index - sprites bucketed by their average colour.

use std::sync::Arc;

use crate::error::{KegError, Result};

use super::{Colour, Sprite};

/// Maps representative colours to buckets of sprites sharing that colour.
///
/// `colours[i]` is always the key of `buckets[i]`. Insertion matches keys
/// exactly; lookup by [`PaletteIndex::nearest`] uses RGBA distance.
#[derive(Debug, Clone, Default)]
pub struct PaletteIndex {
    colours: Vec<Colour>,
    buckets: Vec<Vec<Arc<Sprite>>>,
}

impl PaletteIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sprite to the bucket keyed by its exact average colour,
    /// creating the bucket if needed.
    pub fn insert(&mut self, sprite: Arc<Sprite>) {
        let key = sprite.average();
        match self.colours.iter().position(|&c| c == key) {
            Some(i) => self.buckets[i].push(sprite),
            None => {
                self.colours.push(key);
                self.buckets.push(vec![sprite]);
            }
        }
    }

    /// Remove a sprite by name. Empty buckets are dropped with their key.
    ///
    /// Returns true if the sprite was found.
    pub fn remove(&mut self, name: &str) -> bool {
        for i in 0..self.buckets.len() {
            if let Some(pos) = self.buckets[i].iter().position(|s| s.name() == name) {
                self.buckets[i].remove(pos);
                if self.buckets[i].is_empty() {
                    self.buckets.remove(i);
                    self.colours.remove(i);
                }
                return true;
            }
        }
        false
    }

    /// Find the bucket whose key is closest to `colour`.
    ///
    /// Ties go to the bucket created first.
    pub fn nearest(&self, colour: Colour) -> Result<&[Arc<Sprite>]> {
        let best = self
            .colours
            .iter()
            .enumerate()
            .min_by_key(|(i, c)| (c.distance_sq(colour), *i))
            .map(|(i, _)| i);

        match best {
            Some(i) => Ok(&self.buckets[i]),
            None => Err(KegError::Validation {
                message: "Palette index is empty".to_string(),
                help: Some("Load at least one non-blank sprite first".to_string()),
            }),
        }
    }

    /// Get the bucket keyed by exactly `colour`.
    pub fn bucket(&self, colour: Colour) -> Option<&[Arc<Sprite>]> {
        self.colours
            .iter()
            .position(|&c| c == colour)
            .map(|i| self.buckets[i].as_slice())
    }

    /// Distinct colours, in bucket creation order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Iterate over (colour, bucket) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Colour, &[Arc<Sprite>])> {
        self.colours
            .iter()
            .copied()
            .zip(self.buckets.iter().map(|b| b.as_slice()))
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Total number of sprites across all buckets.
    pub fn sprite_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}
