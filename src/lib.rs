//! Local music-library browser with content-based suggestions.
//!
//! Core modules (pure, no I/O):
//! - [`track`] - Track records and the validated catalog snapshot
//! - [`featurize`] - Tokenizer, vocabulary, term-count vectors
//! - [`algorithm`] - Cosine similarity and stable ranking
//! - [`recommend`] - "More like this" recommendations
//! - [`search`] - Genre/artist extraction from free-text queries
//! - [`error`] - Core error taxonomy
//!
//! ### Supporting Modules
//!
//! - [`catalog`] - JSON and SQLite catalog providers
//! - [`player`] - External-program audio playback
//! - [`menu`] - Interactive menu
//! - [`config`] - Configuration and data directory management
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`path_translator`] - Resolution of catalog-relative track files
//!
//! ## Quick Start Example
//!
//! ```
//! use tuneshelf::track::{Catalog, Track};
//! use tuneshelf::{recommend, search};
//!
//! let track = |id, title: &str, artist: &str, genre: &str| Track {
//!     id,
//!     title: title.to_string(),
//!     artist: artist.to_string(),
//!     genre: genre.to_string(),
//!     file: format!("songs/{id}.mp3"),
//! };
//! let catalog = Catalog::new(vec![
//!     track(1, "Rolling in the Deep", "Adele", "Pop"),
//!     track(2, "Shape of You", "Ed Sheeran", "Pop"),
//!     track(3, "Someone Like You", "Adele", "Pop"),
//! ])?;
//!
//! let similar = recommend::recommend(&catalog, 1, recommend::DEFAULT_TOP_N)?;
//! assert_eq!(similar[0].id, 3);
//!
//! let found = search::search(&catalog, "play something by adele");
//! assert_eq!(found.len(), 2);
//! # Ok::<(), tuneshelf::CoreError>(())
//! ```
//!
//! ## Algorithm Details
//!
//! ### Recommendations
//! - Each track becomes the document `genre artist title`
//! - Documents are lowercased and split into alphanumeric terms of two or
//!   more characters
//! - Term counts over the whole catalog's vocabulary form the vectors
//! - Other tracks are ranked by cosine similarity to the liked one; ties
//!   keep catalog order
//!
//! ### Search
//! - The query is lowercased and split into words
//! - The first word naming a catalog genre and the first naming a catalog
//!   artist are extracted
//! - Tracks matching the genre OR the artist are returned in catalog order
//!
//! ## Error Handling
//!
//! Core functions return [`CoreError`]: `NotFound` for an unknown liked id,
//! `InvalidArgument` for inputs such as a zero result count. Everything
//! that does I/O returns `anyhow::Result` with context messages.
//!
//! ## Logging
//!
//! Uses the `log` facade; the binary installs `env_logger`, so
//! `RUST_LOG=tuneshelf::algorithm=trace` shows every similarity score.

pub mod algorithm;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod featurize;
pub mod menu;
pub mod path_translator;
pub mod player;
pub mod recommend;
pub mod search;
pub mod track;

pub use error::CoreError;
