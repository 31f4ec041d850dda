//! # Path Translation Module
//!
//! Catalog files store each track's `file` as written by whoever made the
//! catalog: usually relative to the catalog file itself, sometimes
//! absolute. This module turns those locators into absolute filesystem
//! paths the player can open.
//!
//! ```no_run
//! use std::path::Path;
//! use tuneshelf::path_translator;
//!
//! let abs = path_translator::resolve_track_path(
//!     Some(Path::new("/home/user/Music")),
//!     "pop/adele/hello.mp3",
//! )?;
//! assert_eq!(abs, Path::new("/home/user/Music/pop/adele/hello.mp3"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Context, Result};
use log::debug;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Absolute path for a track's `file` entry.
///
/// Relative entries are taken relative to `base_dir` (the catalog's
/// directory), or to the working directory when there is none. `.` and
/// `..` components are folded away. The file does not have to exist.
///
/// # Errors
///
/// Fails for an empty locator or when the working directory cannot be read.
pub fn resolve_track_path(base_dir: Option<&Path>, file: &str) -> Result<PathBuf> {
    if file.trim().is_empty() {
        return Err(anyhow!("Track file path cannot be empty"));
    }

    let path = Path::new(file);
    let absolute = match base_dir {
        Some(base) => path.absolutize_from(base),
        None => path.absolutize(),
    }
    .with_context(|| format!("Failed to resolve track file path '{file}'"))?;

    debug!("Resolved track file '{file}' to {}", absolute.display());
    Ok(absolute.into_owned())
}

/// Like [`resolve_track_path`], but the file must exist.
///
/// # Errors
///
/// "File '<path>' not found!" when nothing is at the resolved path.
pub fn existing_track_path(base_dir: Option<&Path>, file: &str) -> Result<PathBuf> {
    let path = resolve_track_path(base_dir, file)?;
    if !path.is_file() {
        return Err(anyhow!("File '{}' not found!", path.display()));
    }
    Ok(path)
}

/// Directory that relative entries of the catalog at `catalog_path` are
/// relative to.
///
/// # Errors
///
/// Fails when the working directory cannot be read.
pub fn catalog_base_dir(catalog_path: &Path) -> Result<PathBuf> {
    let absolute = catalog_path
        .absolutize()
        .with_context(|| format!("Failed to resolve catalog path {}", catalog_path.display()))?;

    Ok(absolute
        .parent()
        .map_or_else(|| PathBuf::from("/"), Path::to_path_buf))
}
