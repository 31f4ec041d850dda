//! # Command-Line Interface Module
//!
//! Clap derive definitions for Tuneshelf.
//!
//! ## Commands
//!
//! - `list`: Show every track of the catalog
//! - `play`: Play a track by its exact title
//! - `recommend`: Tracks similar to one you liked
//! - `search`: Find tracks by genre or artist named in plain words
//! - `menu`: Interactive menu (the default)
//! - `import`: Copy a JSON catalog into the SQLite library
//!
//! ## Examples
//!
//! ```bash
//! tuneshelf --catalog ~/Music/songs.json list
//! tuneshelf recommend 3 --top-n 10
//! tuneshelf search play some jazz by miles
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "tuneshelf")]
#[command(about = "Tuneshelf: browse a local music library, search it in plain words, get similar-track suggestions")]
#[command(version)]
pub struct Args {
    /// Catalog to browse: a JSON file, or a SQLite library (.db)
    #[arg(long, global = true, env = "TUNESHELF_CATALOG", value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Config file to read instead of the platform default
    #[arg(long, global = true, env = "TUNESHELF_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute. Without one, the interactive menu opens.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all tracks in the catalog
    ///
    /// One line per track: id, title, artist and genre, in catalog order.
    List,

    /// Play a track by its exact title
    ///
    /// The title is matched ignoring case. Type 'q' and Enter to stop.
    Play {
        /// Track title; several words are joined with spaces
        #[arg(required = true, num_args = 1.., value_hint = clap::ValueHint::Other)]
        title: Vec<String>,
    },

    /// Recommend tracks similar to one you liked
    ///
    /// Similarity is computed from genre, artist and title words. The liked
    /// track itself is never recommended.
    #[command(allow_negative_numbers = true)]
    Recommend {
        /// Id of the liked track
        id: i64,

        /// How many tracks to recommend (default from config, else 5)
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Show the similarity score of each recommendation
        #[arg(short, long)]
        verbose: bool,
    },

    /// Search tracks by a genre or artist named in the query
    ///
    /// Example: tuneshelf search play some pop music by adele
    ///
    /// Each word is compared with the catalog's genres and artists, so
    /// names made of several words are not recognised.
    Search {
        /// Free-text query; several words are joined with spaces
        #[arg(num_args = 0..)]
        query: Vec<String>,
    },

    /// Open the interactive menu
    Menu,

    /// Copy a JSON catalog into the SQLite library
    ///
    /// Relative file paths are made absolute, so the library can be used
    /// from any directory with --catalog <library.db>.
    Import {
        /// JSON catalog to read
        #[arg(value_hint = clap::ValueHint::FilePath)]
        json: PathBuf,

        /// Library to write (default: data directory/library.db)
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        db: Option<PathBuf>,

        /// Replace the tracks of an existing library
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    ///
    /// Usage: tuneshelf completion bash > ~/.local/share/bash-completion/completions/tuneshelf
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Generate bash completion that also completes track titles for `play`
    CompletionEnhanced,

    /// List track titles for completion (hidden command)
    #[command(hide = true)]
    CompleteTitles,
}
