//! Corpus clean-up.
//!
//! Scraped tables and cartridge sheets both leave junk behind: empty slots
//! where a row had no glyph for a brand, and blank tiles from sheet padding.
//! Normalizing drops both so the corpus is dense and every tile carries
//! an actual glyph.

use log::debug;

use crate::types::Corpus;

/// What a normalization pass removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Number of empty slots dropped.
    pub gaps: usize,
    /// Names of uniform sprites removed, in list order.
    pub uniform: Vec<String>,
}

impl NormalizeReport {
    /// True when nothing was removed.
    pub fn is_clean(&self) -> bool {
        self.gaps == 0 && self.uniform.is_empty()
    }
}

/// Compact gaps, then remove sprites whose pixels are all identical.
pub fn normalize(corpus: &mut Corpus) -> NormalizeReport {
    let gaps = compact_gaps(corpus);
    let uniform = strip_uniform(corpus);

    debug!(
        "normalized corpus: {} gaps dropped, {} uniform sprites removed, {} remaining",
        gaps,
        uniform.len(),
        corpus.len()
    );

    NormalizeReport { gaps, uniform }
}

/// Drop empty slots, preserving the order of the remaining sprites.
pub fn compact_gaps(corpus: &mut Corpus) -> usize {
    corpus.compact()
}

/// Remove every uniform (single-colour) sprite.
pub fn strip_uniform(corpus: &mut Corpus) -> Vec<String> {
    corpus.remove_where(|sprite| sprite.is_uniform())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    fn varied(seed: u8) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([seed, 0, 0, 255]));
        img.put_pixel(3, 3, Rgba([0, seed, 255, 255]));
        img
    }

    fn names(corpus: &Corpus) -> Vec<String> {
        corpus.sprites().map(|s| s.name().to_string()).collect()
    }

    #[test]
    fn test_removes_single_transparent_sprite() {
        let mut corpus = Corpus::new();
        corpus.add("a", varied(10)).unwrap();
        corpus.add("blank", RgbaImage::new(4, 4)).unwrap();
        corpus.add("b", varied(20)).unwrap();
        corpus.add("c", varied(30)).unwrap();

        let report = normalize(&mut corpus);

        assert_eq!(report.uniform, vec!["blank".to_string()]);
        assert_eq!(names(&corpus), vec!["a", "b", "c"]);
        assert_eq!(corpus.palette().sprite_count(), 3);
    }

    #[test]
    fn test_removes_opaque_uniform_sprite() {
        let mut corpus = Corpus::new();
        corpus.add("black", RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))).unwrap();
        corpus.add("a", varied(1)).unwrap();

        let report = normalize(&mut corpus);
        assert_eq!(report.uniform, vec!["black".to_string()]);
        assert_eq!(names(&corpus), vec!["a"]);
    }

    #[test]
    fn test_compacts_gaps_in_order() {
        let mut corpus = Corpus::new();
        corpus.add_at(5, "late", varied(5)).unwrap();
        corpus.add_at(0, "early", varied(6)).unwrap();
        corpus.add_at(2, "middle", varied(7)).unwrap();
        assert!(!corpus.is_normalized());

        let report = normalize(&mut corpus);
        assert!(corpus.is_normalized());

        assert_eq!(report.gaps, 3);
        assert_eq!(corpus.gap_count(), 0);
        assert_eq!(names(&corpus), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_clean_corpus_unchanged() {
        let mut corpus = Corpus::new();
        corpus.add("a", varied(1)).unwrap();
        corpus.add("b", varied(2)).unwrap();

        let report = normalize(&mut corpus);
        assert!(report.is_clean());
        assert_eq!(names(&corpus), vec!["a", "b"]);
    }

    #[test]
    fn test_palette_partition_after_normalize() {
        let mut corpus = Corpus::new();
        for i in 0..12u8 {
            corpus.add_at(i as usize * 2, format!("s{}", i), varied(i % 4)).unwrap();
        }
        corpus.add("blank", RgbaImage::new(4, 4)).unwrap();
        normalize(&mut corpus);

        let palette = corpus.palette();
        assert_eq!(palette.sprite_count(), corpus.len());
        for sprite in corpus.sprites() {
            let hits: usize = palette
                .iter()
                .map(|(_, bucket)| bucket.iter().filter(|s| s.name() == sprite.name()).count())
                .sum();
            assert_eq!(hits, 1, "{} should be in exactly one bucket", sprite.name());
            let bucket = palette.bucket(sprite.average()).unwrap();
            assert!(bucket.iter().any(|s| s.name() == sprite.name()));
        }
    }
}
