//! Free-text search ("play some pop by adele").
//!
//! The query is split into words and each word is looked up, exactly and
//! case-insensitively, in the set of genres and the set of artists the
//! catalog actually contains. Matching is per word, so a two-word artist
//! such as "Ed Sheeran" can never be recognised.

use crate::featurize::Tokenizer;
use crate::track::{Catalog, Track};
use log::debug;
use std::collections::HashSet;

/// What a query was understood to ask for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTerms {
    /// Lowercased genre, when a query word names one.
    pub genre: Option<String>,
    /// Lowercased artist, when a query word names one.
    pub artist: Option<String>,
}

impl QueryTerms {
    /// Nothing recognisable was found.
    pub const fn is_empty(&self) -> bool {
        self.genre.is_none() && self.artist.is_none()
    }

    /// Genre OR artist match, both compared lowercase.
    pub fn matches(&self, track: &Track) -> bool {
        let genre_hit = self
            .genre
            .as_deref()
            .is_some_and(|genre| track.genre.to_lowercase() == genre);
        let artist_hit = self
            .artist
            .as_deref()
            .is_some_and(|artist| track.artist.to_lowercase() == artist);
        genre_hit || artist_hit
    }
}

/// Lowercased distinct genres and artists of one catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownTerms {
    genres: HashSet<String>,
    artists: HashSet<String>,
}

impl KnownTerms {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let genres = catalog.iter().map(|t| t.genre.to_lowercase()).collect();
        let artists = catalog.iter().map(|t| t.artist.to_lowercase()).collect();
        Self { genres, artists }
    }

    pub fn is_genre(&self, word: &str) -> bool {
        self.genres.contains(word)
    }

    pub fn is_artist(&self, word: &str) -> bool {
        self.artists.contains(word)
    }
}

/// Extracts genre and artist terms from queries and filters a catalog by
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryInterpreter {
    tokenizer: Tokenizer,
}

impl QueryInterpreter {
    pub const fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// The first query word naming a genre sets the genre, the first naming
    /// an artist sets the artist. The two checks are independent: one word
    /// can set both.
    pub fn interpret(&self, catalog: &Catalog, query: &str) -> QueryTerms {
        let known = KnownTerms::from_catalog(catalog);
        let mut terms = QueryTerms::default();

        for word in self.tokenizer.tokenize(&query.to_lowercase()) {
            if terms.genre.is_none() && known.is_genre(&word) {
                terms.genre = Some(word.clone());
            }
            if terms.artist.is_none() && known.is_artist(&word) {
                terms.artist = Some(word);
            }
            if terms.genre.is_some() && terms.artist.is_some() {
                break;
            }
        }

        debug!(
            "Query {query:?} -> genre {:?}, artist {:?}",
            terms.genre, terms.artist
        );
        terms
    }

    /// Tracks whose genre or artist was named in `query`, in catalog order.
    /// A query naming neither matches nothing.
    pub fn search<'a>(&self, catalog: &'a Catalog, query: &str) -> Vec<&'a Track> {
        let terms = self.interpret(catalog, query);
        filter_catalog(catalog, &terms)
    }
}

impl Default for QueryInterpreter {
    fn default() -> Self {
        Self::new(Tokenizer::for_queries())
    }
}

/// Tracks matching `terms`, in catalog order. Empty terms match nothing.
pub fn filter_catalog<'a>(catalog: &'a Catalog, terms: &QueryTerms) -> Vec<&'a Track> {
    if terms.is_empty() {
        return Vec::new();
    }
    catalog.iter().filter(|track| terms.matches(track)).collect()
}

/// One-shot search with the query tokenizer.
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a Track> {
    QueryInterpreter::default().search(catalog, query)
}
