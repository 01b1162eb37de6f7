//! Core domain types for keg.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values
//! - `Sprite` - a named tile with its average colour
//! - `PaletteIndex` - sprites bucketed by average colour
//! - `Corpus` - the ordered sprite list of one brand
//! - `Brand` / `Keg` - named corpora and their aggregate

mod brand;
mod colour;
mod corpus;
mod palette;
mod scale;
mod sprite;

pub use brand::{default_brand_names, Brand, BrandBuilder, BrandNames, BrandSummary, Keg};
pub use colour::Colour;
pub use corpus::{Corpus, MAX_SLOT};
pub use palette::PaletteIndex;
pub use scale::{resize_nearest, Scale};
pub use sprite::{average_colour, Sprite};
