//! Corpus - the ordered sprite list of one brand plus its palette index.

use std::collections::HashSet;
use std::sync::Arc;

use image::RgbaImage;
use log::warn;

use crate::error::{KegError, Result};

use super::{PaletteIndex, Sprite};

/// Highest slot index `add_at` accepts.
pub const MAX_SLOT: usize = 1 << 20;

/// An ordered, possibly sparse list of sprites with a palette index.
///
/// Gaps are empty slots left by explicit-index insertion; they only exist
/// until the corpus is normalized. Every sprite in the list is also in
/// exactly one palette bucket.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    slots: Vec<Option<Arc<Sprite>>>,
    names: HashSet<String>,
    palette: PaletteIndex,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sprite at the end of the list.
    ///
    /// Returns the slot index the sprite was placed at.
    pub fn add(&mut self, name: impl Into<String>, image: RgbaImage) -> Result<usize> {
        let sprite = self.make_sprite(name.into(), image)?;
        self.slots.push(Some(Arc::clone(&sprite)));
        self.register(sprite);
        Ok(self.slots.len() - 1)
    }

    /// Place a sprite at an explicit slot, growing the list with gaps.
    ///
    /// If the slot is already taken the sprite is appended instead. Indices
    /// above [`MAX_SLOT`] are rejected.
    pub fn add_at(&mut self, index: usize, name: impl Into<String>, image: RgbaImage) -> Result<usize> {
        let name = name.into();
        if index > MAX_SLOT {
            return Err(KegError::Validation {
                message: format!("Slot {} for sprite '{}' is out of range", index, name),
                help: Some(format!("Sprite indices must be at most {}", MAX_SLOT)),
            });
        }
        let sprite = self.make_sprite(name, image)?;

        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }

        let placed = if self.slots[index].is_none() {
            self.slots[index] = Some(Arc::clone(&sprite));
            index
        } else {
            warn!(
                "slot {} already holds a sprite; appending '{}' at the end",
                index,
                sprite.name()
            );
            self.slots.push(Some(Arc::clone(&sprite)));
            self.slots.len() - 1
        };

        self.register(sprite);
        Ok(placed)
    }

    fn make_sprite(&self, name: String, image: RgbaImage) -> Result<Arc<Sprite>> {
        if self.names.contains(&name) {
            return Err(KegError::Validation {
                message: format!("Duplicate sprite name '{}'", name),
                help: Some("Sprite names must be unique within a brand".to_string()),
            });
        }
        Ok(Arc::new(Sprite::new(name, image)?))
    }

    fn register(&mut self, sprite: Arc<Sprite>) {
        self.names.insert(sprite.name().to_string());
        self.palette.insert(sprite);
    }

    /// Sprites in list order, gaps skipped.
    pub fn sprites(&self) -> impl Iterator<Item = &Arc<Sprite>> {
        self.slots.iter().flatten()
    }

    /// Look up a sprite by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Sprite>> {
        self.sprites().find(|s| s.name() == name)
    }

    /// Number of sprites (gaps excluded).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of empty slots.
    pub fn gap_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// True once there are no gaps and no uniform sprites left.
    pub fn is_normalized(&self) -> bool {
        self.gap_count() == 0 && !self.sprites().any(|s| s.is_uniform())
    }

    /// Length of the slot list, gaps included.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Tile size taken from the first sprite.
    ///
    /// All sprites of a normalized corpus are expected to share this size.
    pub fn tile_size(&self) -> Option<(u32, u32)> {
        self.sprites().next().map(|s| s.size())
    }

    /// The palette index over all sprites.
    pub fn palette(&self) -> &PaletteIndex {
        &self.palette
    }

    /// Drop all gaps, keeping sprite order. Returns the number removed.
    pub(crate) fn compact(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(Option::is_some);
        before - self.slots.len()
    }

    /// Remove every sprite matching `predicate` from the list and palette.
    pub(crate) fn remove_where(&mut self, predicate: impl Fn(&Sprite) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        for slot in &mut self.slots {
            if slot.as_deref().is_some_and(&predicate) {
                if let Some(sprite) = slot.take() {
                    removed.push(sprite.name().to_string());
                }
            }
        }
        self.slots.retain(Option::is_some);

        for name in &removed {
            self.names.remove(name);
            self.palette.remove(name);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn tile(colour: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba(colour))
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut corpus = Corpus::new();
        assert_eq!(corpus.add("a", tile([255, 0, 0, 255])).unwrap(), 0);
        assert_eq!(corpus.add("b", tile([0, 0, 255, 255])).unwrap(), 1);

        let names: Vec<&str> = corpus.sprites().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(corpus.palette().sprite_count(), 2);
    }

    #[test]
    fn test_add_at_leaves_gaps() {
        let mut corpus = Corpus::new();
        corpus.add_at(3, "d", tile([1, 2, 3, 255])).unwrap();
        corpus.add_at(1, "b", tile([4, 5, 6, 255])).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.slot_count(), 4);
        assert_eq!(corpus.gap_count(), 2);

        let names: Vec<&str> = corpus.sprites().map(|s| s.name()).collect();
        assert_eq!(names, vec!["b", "d"]);
    }

    #[test]
    fn test_add_at_occupied_slot_appends() {
        let mut corpus = Corpus::new();
        corpus.add_at(0, "first", tile([1, 1, 1, 255])).unwrap();
        let placed = corpus.add_at(0, "second", tile([2, 2, 2, 255])).unwrap();

        assert_eq!(placed, 1);
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_add_at_rejects_huge_index() {
        let mut corpus = Corpus::new();
        assert!(corpus.add_at(usize::MAX, "huge", tile([1, 1, 1, 255])).is_err());
        assert!(corpus.add_at(MAX_SLOT + 1, "big", tile([1, 1, 1, 255])).is_err());
        assert_eq!(corpus.slot_count(), 0);
        assert!(corpus.is_empty());

        assert_eq!(corpus.add_at(MAX_SLOT, "edge", tile([1, 1, 1, 255])).unwrap(), MAX_SLOT);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut corpus = Corpus::new();
        corpus.add("smile", tile([1, 1, 1, 255])).unwrap();
        assert!(corpus.add("smile", tile([2, 2, 2, 255])).is_err());
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.palette().sprite_count(), 1);
    }

    #[test]
    fn test_tile_size() {
        let mut corpus = Corpus::new();
        assert_eq!(corpus.tile_size(), None);
        corpus.add_at(2, "x", tile([0, 0, 0, 255])).unwrap();
        assert_eq!(corpus.tile_size(), Some((4, 4)));
    }

    #[test]
    fn test_remove_where_updates_palette() {
        let mut corpus = Corpus::new();
        corpus.add("keep", tile([9, 9, 9, 255])).unwrap();
        corpus.add("drop", tile([200, 0, 0, 255])).unwrap();

        let removed = corpus.remove_where(|s| s.name() == "drop");
        assert_eq!(removed, vec!["drop".to_string()]);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.palette().len(), 1);
        assert!(corpus.get("drop").is_none());
        assert!(corpus.get("keep").is_some());
    }
}
