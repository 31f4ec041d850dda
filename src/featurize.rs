//! Text featurization shared by the recommender and the query interpreter.
//!
//! A [`Tokenizer`] is a plain value: whoever runs a search or a
//! recommendation builds one (or reuses one for a whole session) and passes
//! it in. There is no process-wide model to load.

use crate::error::{CoreError, Result};
use crate::track::{Catalog, Track};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Settings for splitting text into terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Fold terms to lowercase before they are counted or compared.
    pub lowercase: bool,
    /// Terms shorter than this many characters are dropped.
    pub min_token_len: usize,
}

/// Splits text into alphanumeric runs. Everything else is a separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    /// # Errors
    ///
    /// [`CoreError::InvalidArgument`] when `min_token_len` is zero.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        if config.min_token_len == 0 {
            return Err(CoreError::InvalidArgument(
                "min_token_len must be at least 1".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Tokenizer used to build feature vectors.
    ///
    /// Single-character runs ("a", "I", the "b" of "R&B") are not terms.
    pub const fn for_features() -> Self {
        Self {
            config: TokenizerConfig {
                lowercase: true,
                min_token_len: 2,
            },
        }
    }

    /// Tokenizer used on free-text queries. Keeps every run.
    pub const fn for_queries() -> Self {
        Self {
            config: TokenizerConfig {
                lowercase: true,
                min_token_len: 1,
            },
        }
    }

    /// Terms of `text`, in order of appearance, duplicates kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|run| run.chars().count() >= self.config.min_token_len)
            .map(|run| {
                if self.config.lowercase {
                    run.to_lowercase()
                } else {
                    run.to_string()
                }
            })
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::for_features()
    }
}

/// `genre artist title`, the text a track is compared by.
pub fn feature_document(track: &Track) -> String {
    format!("{} {} {}", track.genre, track.artist, track.title)
}

/// Sorted term → column mapping shared by every vector of one index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    columns: BTreeMap<String, usize>,
}

impl Vocabulary {
    /// Collects every distinct term of `documents`. Columns follow the
    /// lexical order of the terms.
    pub fn build<I, D>(documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[String]>,
    {
        let terms: BTreeSet<String> = documents
            .into_iter()
            .flat_map(|doc| doc.as_ref().to_vec())
            .collect();

        let columns = terms
            .into_iter()
            .enumerate()
            .map(|(column, term)| (term, column))
            .collect();

        Self { columns }
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    fn len(&self) -> usize {
        self.columns.len()
    }

    /// Sparse term-count vector of `terms` in this vocabulary.
    /// Terms outside the vocabulary are ignored.
    pub fn vectorize(&self, terms: &[String]) -> TermVector {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for term in terms {
            if let Some(column) = self.column(term) {
                *counts.entry(column).or_insert(0) += 1;
            }
        }
        TermVector {
            entries: counts.into_iter().collect(),
        }
    }
}

/// Term counts over a [`Vocabulary`], stored as `(column, count)` pairs
/// sorted by column. Zero counts are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVector {
    entries: Vec<(usize, u32)>,
}

impl TermVector {
    #[cfg(test)]
    fn count(&self, column: usize) -> u32 {
        self.entries
            .binary_search_by_key(&column, |&(c, _)| c)
            .map_or(0, |i| self.entries[i].1)
    }

    /// Dot product. Both sides are sorted, so this is a merge walk.
    pub fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (col_a, count_a) = self.entries[i];
            let (col_b, count_b) = other.entries[j];
            match col_a.cmp(&col_b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += f64::from(count_a) * f64::from(count_b);
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, count)| f64::from(count) * f64::from(count))
            .sum::<f64>()
            .sqrt()
    }
}

/// Vocabulary plus one vector per track, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureIndex {
    vocabulary: Vocabulary,
    vectors: Vec<TermVector>,
}

impl FeatureIndex {
    /// Featurizes the whole catalog. The vocabulary spans every track, not
    /// just the ones that end up as candidates.
    pub fn build(catalog: &Catalog, tokenizer: &Tokenizer) -> Self {
        let documents: Vec<Vec<String>> = catalog
            .iter()
            .map(|track| tokenizer.tokenize(&feature_document(track)))
            .collect();

        let vocabulary = Vocabulary::build(&documents);
        let vectors = documents
            .iter()
            .map(|terms| vocabulary.vectorize(terms))
            .collect();

        debug!(
            "Built feature index: {} documents, {} terms",
            documents.len(),
            vocabulary.len()
        );

        Self {
            vocabulary,
            vectors,
        }
    }

    pub fn vectors(&self) -> &[TermVector] {
        &self.vectors
    }

    /// Vector of the track at catalog position `index`.
    pub fn vector(&self, index: usize) -> Option<&TermVector> {
        self.vectors.get(index)
    }
}
