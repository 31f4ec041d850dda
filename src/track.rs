//! Track records and the catalog snapshot they live in.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// One entry of the music library, as the catalog file stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique within a catalog. No ordering is implied.
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Audio file locator. Relative paths are relative to the catalog file.
    pub file: String,
}

/// An ordered, read-only snapshot of the library.
///
/// The only way to build one is [`Catalog::new`], which guarantees the ids
/// are unique. Nothing in the crate mutates a catalog after that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Wrap `tracks`, keeping their order.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidArgument`] when two tracks share an id.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(track.id) {
                return Err(CoreError::InvalidArgument(format!(
                    "duplicate track id {} in catalog",
                    track.id
                )));
            }
        }

        Ok(Self { tracks })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Catalog index of the track with `id`.
    pub fn position(&self, id: i64) -> Option<usize> {
        self.tracks.iter().position(|track| track.id == id)
    }

    /// First track whose title equals `title`, ignoring case and
    /// surrounding whitespace.
    pub fn find_by_title(&self, title: &str) -> Option<&Track> {
        let wanted = title.trim().to_lowercase();
        self.tracks
            .iter()
            .find(|track| track.title.to_lowercase() == wanted)
    }

    /// SHA-256 over every field of every track, in order.
    ///
    /// Two snapshots with the same fingerprint produce identical feature
    /// spaces, so it is safe to key cached vectors on it.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for track in &self.tracks {
            hasher.update(track.id.to_le_bytes());
            for field in [&track.title, &track.artist, &track.genre, &track.file] {
                // Length prefix keeps ("ab", "c") and ("a", "bc") apart.
                hasher.update((field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
        }
        hasher.finalize().into()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
