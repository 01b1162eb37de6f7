//! End-to-end pipeline: sprite folder -> cartridge -> reloaded keg -> mosaic.

use std::path::Path;

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use emojikeg::discovery::{classify_sources, load_sources, LoadOptions};
use emojikeg::{write_cartridge, write_raster, MosaicRenderer, Scale};

const SHADES: [[u8; 3]; 6] = [
    [230, 20, 20],
    [20, 230, 20],
    [20, 20, 230],
    [230, 230, 20],
    [20, 230, 230],
    [120, 120, 120],
];

fn write_brand(dir: &Path) {
    for (i, [r, g, b]) in SHADES.iter().enumerate() {
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([*r, *g, *b, 255]));
        img.put_pixel(7, 7, Rgba([0, 0, 0, 0]));
        write_raster(&img, &dir.join(format!("{}__shade{}.png", i + 1, i)), 100).unwrap();
    }
    // A blank tile that normalization must drop.
    write_raster(&RgbaImage::new(8, 8), &dir.join("7__blank.png"), 100).unwrap();
}

#[test]
fn folder_and_cartridge_load_the_same_sprites() {
    let root = tempdir().unwrap();
    let folder = root.path().join("Twtr");
    write_brand(&folder);

    let keg = load_sources(&classify_sources(&[folder]), &LoadOptions::default()).unwrap();
    let brand = &keg.brands()[0];
    assert_eq!(brand.len(), SHADES.len());

    let carts = root.path().join("carts");
    let (cart_path, cartridge) = write_cartridge(brand, &carts, Scale::FULL).unwrap();
    assert_eq!(cart_path, carts.join("Twtr-8x8.png"));
    assert_eq!((cartridge.columns, cartridge.rows), (2, 4));

    let reloaded = load_sources(&classify_sources(&[cart_path]), &LoadOptions::default()).unwrap();
    let unpacked = &reloaded.brands()[0];
    assert_eq!(unpacked.name(), "Twtr");

    let before: Vec<_> = brand.corpus().sprites().map(|s| s.image().clone()).collect();
    let after: Vec<_> = unpacked.corpus().sprites().map(|s| s.image().clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn mosaics_are_reproducible_per_seed() {
    let root = tempdir().unwrap();
    let folder = root.path().join("Sams");
    write_brand(&folder);
    let keg = load_sources(&classify_sources(&[folder]), &LoadOptions::default()).unwrap();
    let corpus = keg.brands()[0].corpus();

    let source = RgbaImage::from_fn(10, 6, |x, y| Rgba([(x * 25) as u8, (y * 40) as u8, 90, 255]));
    let renderer = MosaicRenderer::new(corpus, Scale::FULL, Scale::new("emoji_scale", 0.5).unwrap()).unwrap();

    let first = renderer.render_seeded(&source, 99).unwrap();
    let second = renderer.render_seeded(&source, 99).unwrap();
    assert_eq!(first.image.dimensions(), (40, 24));
    assert_eq!(first.placements(), second.placements());
    assert!(first.image == second.image);
}
