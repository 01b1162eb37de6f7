//! Brand loader - turns sprite directories and cartridge files into brands.
//!
//! Every source unit becomes one brand, loaded on its own thread. Inside a
//! directory, files are decoded by a small worker pool that feeds the
//! brand through its lock one sprite at a time.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use image::RgbaImage;
use log::{info, warn};

use crate::cartridge::{parse_tile_suffix, unpack};
use crate::error::{KegError, Result};
use crate::render::open_raster;
use crate::types::{resize_nearest, Brand, BrandBuilder, Colour, Keg, Scale};

use super::scanner::{list_images, parse_indexed_name, Sources};

/// Options for loading brands.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Resize every sprite by this fraction before insertion.
    pub sprite_scale: Scale,
    /// Colour painted under unpacked cartridge cells.
    pub background: Option<Colour>,
    /// Cartridge tile size, overriding the file name suffix.
    pub tile: Option<(u32, u32)>,
    /// Decoder threads per directory (defaults to available parallelism).
    pub jobs: Option<usize>,
}

impl LoadOptions {
    fn jobs(&self) -> usize {
        self.jobs.filter(|&n| n > 0).unwrap_or_else(default_jobs)
    }

    fn prepare(&self, image: RgbaImage) -> RgbaImage {
        if self.sprite_scale.is_full() {
            return image;
        }
        let (w, h) = self.sprite_scale.apply_size(image.dimensions());
        resize_nearest(&image, w, h)
    }
}

fn default_jobs() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// An unindexed file waiting to be appended, keyed by listing order.
type Deferred = (usize, String, RgbaImage);

/// Load a directory of `{index}__{name}` sprite files as one brand.
pub fn load_directory(dir: &Path, options: &LoadOptions) -> Result<Brand> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    let files = list_images(dir)?;

    let builder = BrandBuilder::new(name);
    let deferred: Mutex<Vec<Deferred>> = Mutex::new(Vec::new());
    let next_idx = AtomicUsize::new(0);
    let workers = options.jobs().min(files.len()).max(1);

    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| loop {
                let idx = next_idx.fetch_add(1, Ordering::SeqCst);
                let Some(path) = files.get(idx) else {
                    break;
                };
                if let Err(e) = load_file(path, idx, &builder, &deferred, options) {
                    warn!("{}: {}", path.display(), e);
                }
            });
        }
    });

    // Unindexed files go last, in listing order.
    let mut deferred = deferred.into_inner().unwrap_or_else(PoisonError::into_inner);
    deferred.sort_by_key(|(order, _, _)| *order);
    for (_, name, image) in deferred {
        if let Err(e) = builder.insert(name.as_str(), image) {
            warn!("{}: {}", name, e);
        }
    }

    finish(builder)
}

fn load_file(
    path: &Path,
    order: usize,
    builder: &BrandBuilder,
    deferred: &Mutex<Vec<Deferred>>,
    options: &LoadOptions,
) -> Result<()> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| KegError::validation("File name is not valid UTF-8"))?;

    // Decode outside the brand lock.
    let image = options.prepare(open_raster(path)?);

    match parse_indexed_name(stem) {
        Some((index, name)) => {
            builder.insert_at(index, name, image)?;
        }
        None => {
            warn!("{} has no index prefix; appending it", path.display());
            deferred
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((order, stem.to_string(), image));
        }
    }
    Ok(())
}

/// Load a packed cartridge file as one brand.
///
/// The tile size comes from `options.tile` or the `-{W}x{H}` stem suffix.
pub fn load_cartridge(path: &Path, options: &LoadOptions) -> Result<Brand> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| KegError::validation("File name is not valid UTF-8"))?;

    let (name, tile) = match (parse_tile_suffix(stem), options.tile) {
        (Some((name, _)), Some(tile)) => (name, tile),
        (Some((name, tile)), None) => (name, tile),
        (None, Some(tile)) => (stem.to_string(), tile),
        (None, None) => {
            return Err(KegError::Validation {
                message: format!("Cannot tell the tile size of '{}'", path.display()),
                help: Some("Name the file like Brand-72x72.png or pass --tile WxH".to_string()),
            })
        }
    };

    let sheet = open_raster(path)?;
    let builder = unpack(&sheet, name, tile, options.background, options.sprite_scale)?;
    finish(builder)
}

fn finish(builder: BrandBuilder) -> Result<Brand> {
    let (brand, report) = builder.finish();
    if brand.is_empty() {
        return Err(KegError::Build {
            message: format!("Brand '{}' has no usable sprites", brand.name()),
            help: None,
        });
    }
    info!(
        "loaded {}: {} sprites ({} gaps, {} blank removed)",
        brand.name(),
        brand.len(),
        report.gaps,
        report.uniform.len()
    );
    Ok(brand)
}

/// Load every source unit concurrently and collect the brands.
///
/// A unit that fails is logged and dropped. Brands keep the order of
/// `sources` (directories first, then cartridges).
pub fn load_sources(sources: &Sources, options: &LoadOptions) -> Result<Keg> {
    let results: Vec<(&Path, Result<Brand>)> = thread::scope(|s| {
        let dirs = sources.directories.iter().map(|dir| {
            let handle = s.spawn(move || load_directory(dir, options));
            (dir.as_path(), handle)
        });
        let carts = sources.cartridges.iter().map(|file| {
            let handle = s.spawn(move || load_cartridge(file, options));
            (file.as_path(), handle)
        });
        let handles: Vec<_> = dirs.chain(carts).collect();

        handles
            .into_iter()
            .map(|(path, handle)| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(KegError::Build {
                        message: "Loader thread panicked".to_string(),
                        help: None,
                    })
                });
                (path, result)
            })
            .collect()
    });

    let mut keg = Keg::default();
    for (path, result) in results {
        match result {
            Ok(brand) => keg.push(brand),
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }

    if keg.is_empty() {
        return Err(KegError::Build {
            message: "No emojis found in the given folders or cartridges".to_string(),
            help: Some("Pass a folder of {index}__{name} images or a Brand-WxH.png cartridge".to_string()),
        });
    }
    Ok(keg)
}
