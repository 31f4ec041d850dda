//! Content-based "more like this" recommendations.
//!
//! Every track is reduced to its `genre artist title` text, turned into a
//! term-count vector over the vocabulary of the whole catalog, and compared
//! to the liked track by cosine similarity. The most similar other tracks
//! come back first; equal scores keep catalog order.
//!
//! ```
//! use tuneshelf::recommend::recommend;
//! use tuneshelf::track::{Catalog, Track};
//!
//! let track = |id, title: &str, artist: &str| Track {
//!     id,
//!     title: title.to_string(),
//!     artist: artist.to_string(),
//!     genre: "Pop".to_string(),
//!     file: format!("{id}.mp3"),
//! };
//! let catalog = Catalog::new(vec![
//!     track(1, "Rolling in the Deep", "Adele"),
//!     track(2, "Shape of You", "Ed Sheeran"),
//!     track(3, "Someone Like You", "Adele"),
//! ])?;
//!
//! let similar = recommend(&catalog, 1, 5)?;
//! let ids: Vec<i64> = similar.iter().map(|t| t.id).collect();
//! assert_eq!(ids, vec![3, 2]);
//! # Ok::<(), tuneshelf::CoreError>(())
//! ```

use crate::algorithm::{rank_by_score, similarity_row};
use crate::error::{CoreError, Result};
use crate::featurize::{FeatureIndex, Tokenizer};
use crate::track::{Catalog, Track};
use log::debug;

/// How many tracks a recommendation returns unless told otherwise.
pub const DEFAULT_TOP_N: usize = 5;

/// A recommended track and how close it is to the liked one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
    pub track: &'a Track,
    pub score: f64,
}

/// Recommends tracks similar to a liked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommender {
    tokenizer: Tokenizer,
    top_n: usize,
}

impl Recommender {
    /// # Errors
    ///
    /// [`CoreError::InvalidArgument`] when `top_n` is zero.
    pub fn new(tokenizer: Tokenizer, top_n: usize) -> Result<Self> {
        if top_n == 0 {
            return Err(CoreError::InvalidArgument(
                "top_n must be a positive number of tracks".to_string(),
            ));
        }
        Ok(Self { tokenizer, top_n })
    }

    /// Feature tokenizer, `top_n` results.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidArgument`] when `top_n` is zero.
    pub fn with_top_n(top_n: usize) -> Result<Self> {
        Self::new(Tokenizer::for_features(), top_n)
    }

    /// Up to `top_n` tracks most similar to `liked_id`, best first. The
    /// liked track itself is never part of the result.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] when no track has `liked_id`.
    pub fn recommend<'a>(&self, catalog: &'a Catalog, liked_id: i64) -> Result<Vec<&'a Track>> {
        Ok(self
            .recommend_scored(catalog, liked_id)?
            .into_iter()
            .map(|rec| rec.track)
            .collect())
    }

    /// Same as [`Recommender::recommend`], keeping the similarity scores.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] when no track has `liked_id`.
    pub fn recommend_scored<'a>(
        &self,
        catalog: &'a Catalog,
        liked_id: i64,
    ) -> Result<Vec<Recommendation<'a>>> {
        let liked = locate(catalog, liked_id)?;
        let index = FeatureIndex::build(catalog, &self.tokenizer);
        Ok(rank_against(catalog, &index, liked, self.top_n))
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self {
            tokenizer: Tokenizer::for_features(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// One-shot recommendation with the feature tokenizer.
///
/// # Errors
///
/// [`CoreError::InvalidArgument`] when `top_n` is zero (checked first),
/// [`CoreError::NotFound`] when no track has `liked_id`.
pub fn recommend(catalog: &Catalog, liked_id: i64, top_n: usize) -> Result<Vec<&Track>> {
    Recommender::with_top_n(top_n)?.recommend(catalog, liked_id)
}

fn locate(catalog: &Catalog, liked_id: i64) -> Result<usize> {
    catalog
        .position(liked_id)
        .ok_or(CoreError::NotFound(liked_id))
}

fn rank_against<'a>(
    catalog: &'a Catalog,
    index: &FeatureIndex,
    liked: usize,
    top_n: usize,
) -> Vec<Recommendation<'a>> {
    let tracks = catalog.tracks();
    let scores = similarity_row(index, liked);

    let picked: Vec<Recommendation<'a>> = rank_by_score(&scores)
        .into_iter()
        // By position, not by id: the liked track goes even if another
        // track scores exactly 1.0 against it.
        .filter(|&(i, _)| i != liked)
        .take(top_n)
        .map(|(i, score)| Recommendation {
            track: &tracks[i],
            score,
        })
        .collect();

    debug!(
        "Recommending {} of {} tracks for id {}",
        picked.len(),
        tracks.len(),
        tracks[liked].id
    );
    picked
}

struct CachedIndex {
    fingerprint: [u8; 32],
    index: FeatureIndex,
}

/// A [`Recommender`] that keeps the last feature index around.
///
/// The index is keyed by [`Catalog::fingerprint`], so handing in a
/// different snapshot rebuilds it. Results are identical to the uncached
/// path; only the featurization work is skipped.
pub struct RecommendationSession {
    recommender: Recommender,
    cached: Option<CachedIndex>,
}

impl RecommendationSession {
    pub const fn new(recommender: Recommender) -> Self {
        Self {
            recommender,
            cached: None,
        }
    }

    /// True when the cached index was built from exactly this snapshot.
    #[cfg(test)]
    pub(crate) fn is_cached_for(&self, catalog: &Catalog) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|cached| cached.fingerprint == catalog.fingerprint())
    }

    /// # Errors
    ///
    /// [`CoreError::NotFound`] when no track has `liked_id`.
    pub fn recommend<'a>(&mut self, catalog: &'a Catalog, liked_id: i64) -> Result<Vec<&'a Track>> {
        Ok(self
            .recommend_scored(catalog, liked_id)?
            .into_iter()
            .map(|rec| rec.track)
            .collect())
    }

    /// # Errors
    ///
    /// [`CoreError::NotFound`] when no track has `liked_id`.
    pub fn recommend_scored<'a>(
        &mut self,
        catalog: &'a Catalog,
        liked_id: i64,
    ) -> Result<Vec<Recommendation<'a>>> {
        let liked = locate(catalog, liked_id)?;
        let top_n = self.recommender.top_n;
        let index = self.index_for(catalog);
        Ok(rank_against(catalog, index, liked, top_n))
    }

    fn index_for(&mut self, catalog: &Catalog) -> &FeatureIndex {
        let fingerprint = catalog.fingerprint();
        let cached = match self.cached.take() {
            Some(cached) if cached.fingerprint == fingerprint => cached,
            previous => {
                if previous.is_some() {
                    debug!("Catalog snapshot changed, rebuilding feature index");
                }
                CachedIndex {
                    fingerprint,
                    index: FeatureIndex::build(catalog, &self.recommender.tokenizer),
                }
            }
        };
        &self.cached.insert(cached).index
    }
}

impl Default for RecommendationSession {
    fn default() -> Self {
        Self::new(Recommender::default())
    }
}
