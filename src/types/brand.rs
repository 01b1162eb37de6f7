//! Brands - independently ingested corpora - and the keg that collects them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

use image::RgbaImage;
use serde::Serialize;

use crate::error::{KegError, Result};
use crate::normalize::{normalize, NormalizeReport};

use super::Corpus;

/// A brand being populated.
///
/// Insertions take `&self` so several workers can feed one brand; each
/// insertion holds the lock for that single sprite only.
#[derive(Debug)]
pub struct BrandBuilder {
    name: String,
    corpus: Mutex<Corpus>,
}

impl BrandBuilder {
    /// Start an empty brand.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            corpus: Mutex::new(Corpus::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a sprite.
    pub fn insert(&self, name: impl Into<String>, image: RgbaImage) -> Result<usize> {
        self.lock()?.add(name, image)
    }

    /// Place a sprite at an explicit slot.
    pub fn insert_at(&self, index: usize, name: impl Into<String>, image: RgbaImage) -> Result<usize> {
        self.lock()?.add_at(index, name, image)
    }

    /// Number of sprites inserted so far.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Corpus>> {
        self.corpus.lock().map_err(|_| KegError::Build {
            message: format!("Corpus lock for brand '{}' was poisoned", self.name),
            help: None,
        })
    }

    /// Normalize the corpus and freeze the brand.
    pub fn finish(self) -> (Brand, NormalizeReport) {
        let mut corpus = self
            .corpus
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let report = normalize(&mut corpus);
        (
            Brand {
                name: self.name,
                corpus,
            },
            report,
        )
    }
}

/// A named, normalized, read-only corpus.
#[derive(Debug, Clone)]
pub struct Brand {
    name: String,
    corpus: Corpus,
}

impl Brand {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Number of sprites.
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Display-name translations for brand labels (e.g. "Goog" -> "Google").
pub type BrandNames = BTreeMap<String, String>;

/// The aggregated list of loaded brands.
#[derive(Debug, Clone, Default)]
pub struct Keg {
    brands: Vec<Brand>,
}

/// Per-brand entry of a keg summary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BrandSummary {
    pub name: String,
    pub sprites: usize,
    pub colours: usize,
    pub tile: Option<(u32, u32)>,
}

impl Keg {
    pub fn new(brands: Vec<Brand>) -> Self {
        Self { brands }
    }

    pub fn push(&mut self, brand: Brand) {
        self.brands.push(brand);
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    /// Find a brand by (display) name.
    pub fn find(&self, name: &str) -> Option<&Brand> {
        self.brands.iter().find(|b| b.name == name)
    }

    /// Replace brand names that have a display translation.
    pub fn apply_brand_names(&mut self, names: &BrandNames) {
        for brand in &mut self.brands {
            if let Some(display) = names.get(&brand.name) {
                let display = display.clone();
                brand.rename(display);
            }
        }
    }

    /// Total sprites across all brands.
    pub fn total(&self) -> usize {
        self.brands.iter().map(Brand::len).sum()
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// Machine-readable summary.
    pub fn summary(&self) -> Vec<BrandSummary> {
        self.brands
            .iter()
            .map(|b| BrandSummary {
                name: b.name.clone(),
                sprites: b.len(),
                colours: b.corpus.palette().len(),
                tile: b.corpus.tile_size(),
            })
            .collect()
    }
}

impl fmt::Display for Keg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for brand in &self.brands {
            writeln!(f, "{} - {} emojis", brand.name, brand.len())?;
        }
        write!(f, "total - {}", self.total())
    }
}

/// The default brand display names.
pub fn default_brand_names() -> BrandNames {
    [
        ("BrowserAppl", "Apple"),
        ("Goog", "Google"),
        ("FB", "Facebook"),
        ("Wind", "Windows"),
        ("Twtr", "Twitter"),
        ("Sams", "Samsung"),
        ("GMail", "Gmail"),
        ("SB", "SB"),
        ("DCM", "DCM"),
        ("KDDI", "KDDI"),
        ("Joy", "Joy"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
