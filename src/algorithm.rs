//! Similarity scoring and ranking.
//!
//! Scores are cosine similarities between term-count vectors. Counts are
//! never negative, so every score lies in `[0, 1]`.

use crate::featurize::{FeatureIndex, TermVector};
use std::cmp::Ordering;

/// Cosine of the angle between `a` and `b`.
///
/// ```text
/// cos(a, b) = (a · b) / (|a| * |b|)
/// ```
///
/// A zero vector (a track whose metadata yields no terms) is orthogonal to
/// everything, itself included, and scores 0.
///
/// # Examples
///
/// ```
/// use tuneshelf::algorithm::cosine_similarity;
/// use tuneshelf::featurize::Vocabulary;
///
/// let docs = vec![
///     vec!["pop".to_string(), "adele".to_string()],
///     vec!["pop".to_string(), "sheeran".to_string()],
/// ];
/// let vocab = Vocabulary::build(&docs);
/// let a = vocab.vectorize(&docs[0]);
/// let b = vocab.vectorize(&docs[1]);
///
/// assert!((cosine_similarity(&a, &b) - 0.5).abs() < 1e-9);
/// assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let norms = a.norm() * b.norm();
    if norms == 0.0 {
        return 0.0;
    }

    // Rounding can push identical vectors a hair past 1.
    (a.dot(b) / norms).clamp(0.0, 1.0)
}

/// Similarity of the vector at `target` against every vector of the index,
/// in catalog order. The target's own entry is included.
#[must_use]
pub fn similarity_row(index: &FeatureIndex, target: usize) -> Vec<f64> {
    let Some(liked) = index.vector(target) else {
        return Vec::new();
    };

    index
        .vectors()
        .iter()
        .enumerate()
        .map(|(i, other)| {
            let score = cosine_similarity(liked, other);
            log::trace!("similarity[{target}][{i}] = {score:.4}");
            score
        })
        .collect()
}

/// `(catalog index, score)` pairs ordered by score, highest first.
///
/// The sort is stable, so equal scores stay in catalog order.
#[must_use]
pub fn rank_by_score(scores: &[f64]) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    ranked
}
