//! Raster file input and output.
//!
//! The output format follows the file extension: `.png` is lossless,
//! `.jpg`/`.jpeg` take a quality in (0, 100]. Without an image extension
//! (dots in the name don't count), full quality picks PNG and anything less
//! picks JPEG.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use log::warn;

use crate::error::{KegError, Result};

/// Output encoding resolved from a path and quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg { quality: u8 },
}

/// Decode an image file to RGBA.
///
/// Animated formats yield their first frame.
pub fn open_raster(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| KegError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to load image: {}", e),
    })?;
    Ok(img.to_rgba8())
}

/// Check that an output quality is in (0, 100].
pub fn check_quality(quality: u8) -> Result<u8> {
    if quality == 0 || quality > 100 {
        return Err(KegError::Validation {
            message: format!("Quality must be in (0, 100], got {}", quality),
            help: Some("Use 100 for lossless PNG output".to_string()),
        });
    }
    Ok(quality)
}

/// Work out the final path and encoding for an output file.
pub fn resolve_output(path: &Path, quality: u8) -> Result<(PathBuf, OutputFormat)> {
    let quality = check_quality(quality)?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| is_image_extension(ext));

    match ext.as_deref() {
        None => {
            let (ext, format) = if quality == 100 {
                ("png", OutputFormat::Png)
            } else {
                ("jpg", OutputFormat::Jpeg { quality })
            };
            Ok((append_extension(path, ext), format))
        }
        Some("png") => {
            if quality < 100 {
                warn!(
                    "quality {} ignored for PNG output {}",
                    quality,
                    path.display()
                );
            }
            Ok((path.to_path_buf(), OutputFormat::Png))
        }
        Some("jpg") | Some("jpeg") => Ok((path.to_path_buf(), OutputFormat::Jpeg { quality })),
        Some(other) => Err(KegError::Validation {
            message: format!("Unsupported output format '.{}'", other),
            help: Some("Only .png and .jpg output is supported".to_string()),
        }),
    }
}

/// Extensions recognised as image formats. Any other dotted suffix is
/// treated as part of the file name.
fn is_image_extension(ext: &str) -> bool {
    matches!(
        ext,
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tif" | "tiff" | "ico" | "tga" | "avif"
    )
}

/// Add `.{ext}` after the full file name, keeping any dots already in it.
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Write an image, creating parent directories as needed.
///
/// Returns the path actually written (an extension may have been added).
pub fn write_raster(image: &RgbaImage, path: &Path, quality: u8) -> Result<PathBuf> {
    let (path, format) = resolve_output(path, quality)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KegError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let encode_err = |e: image::ImageError| KegError::Io {
        path: path.clone(),
        message: format!("Failed to write image: {}", e),
    };

    match format {
        OutputFormat::Png => image.save(&path).map_err(encode_err)?,
        OutputFormat::Jpeg { quality } => {
            let file = File::create(&path).map_err(|e| KegError::Io {
                path: path.clone(),
                message: format!("Failed to create file: {}", e),
            })?;
            let mut writer = BufWriter::new(file);
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))
                .map_err(encode_err)?;
        }
    }

    Ok(path)
}
