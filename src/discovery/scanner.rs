//! File system scanner for ingestion sources.
//!
//! Sorts command-line paths into sprite directories and cartridge files,
//! and lists the image files inside a sprite directory.

use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::error::{KegError, Result};

/// Image extensions accepted as sprites or cartridges.
const IMAGE_EXTENSIONS: &[&str] = &["png", "gif", "jpg", "jpeg", "bmp", "webp"];

/// Ingestion sources split by kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sources {
    /// Directories of individual sprite files.
    pub directories: Vec<PathBuf>,
    /// Packed cartridge files.
    pub cartridges: Vec<PathBuf>,
}

impl Sources {
    /// Get the total number of source units.
    pub fn total(&self) -> usize {
        self.directories.len() + self.cartridges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Split paths into directories and files. Missing paths are skipped.
pub fn classify_sources(paths: &[PathBuf]) -> Sources {
    let mut sources = Sources::default();
    for path in paths {
        if path.is_dir() {
            sources.directories.push(path.clone());
        } else if path.is_file() {
            sources.cartridges.push(path.clone());
        } else {
            warn!("{} is not a valid path; skipping", path.display());
        }
    }
    sources
}

/// Check if a path has an image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// List image files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(0).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(KegError::Io {
                    path: dir.to_path_buf(),
                    message: format!("Failed to read directory: {}", e),
                })
            }
            Err(e) => {
                warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if entry.depth() == 0 || !entry.file_type().is_file() {
            continue;
        }
        if is_image_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Parse a `"{index}__{name}"` file stem.
pub fn parse_indexed_name(stem: &str) -> Option<(usize, String)> {
    let mut parts = stem.split("__");
    let (index, name) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || name.is_empty() {
        return None;
    }
    Some((index.parse().ok()?, name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_indexed_name() {
        assert_eq!(parse_indexed_name("12__grinning"), Some((12, "grinning".to_string())));
        assert_eq!(parse_indexed_name("0__a"), Some((0, "a".to_string())));
        assert_eq!(parse_indexed_name("grinning"), None);
        assert_eq!(parse_indexed_name("x__grinning"), None);
        assert_eq!(parse_indexed_name("1__a__b"), None);
        assert_eq!(parse_indexed_name("1__"), None);
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a.png")));
        assert!(is_image_file(Path::new("a.GIF")));
        assert!(!is_image_file(Path::new("a.txt")));
        assert!(!is_image_file(Path::new("png")));
    }

    #[test]
    fn test_classify_sources() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Apple-72x72.png");
        fs::write(&file, b"").unwrap();
        let missing = dir.path().join("missing");

        let sources = classify_sources(&[dir.path().to_path_buf(), file.clone(), missing]);
        assert_eq!(sources.directories, vec![dir.path().to_path_buf()]);
        assert_eq!(sources.cartridges, vec![file]);
        assert_eq!(sources.total(), 2);
    }

    #[test]
    fn test_list_images_sorted_and_shallow() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2__b.png"), b"").unwrap();
        fs::write(dir.path().join("1__a.png"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/3__c.png"), b"").unwrap();

        let files = list_images(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["1__a.png", "2__b.png"]);
    }

    #[test]
    fn test_list_images_missing_dir() {
        assert!(list_images(Path::new("/nonexistent/keg/brand")).is_err());
    }
}
