//! # Tuneshelf - Local Music Library Browser
//!
//! List the library, play a track, search it in plain words, and get
//! similar-track suggestions from the tracks' genre, artist and title.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive menu over ./songs.json
//! tuneshelf
//!
//! # One-shot commands
//! tuneshelf list
//! tuneshelf recommend 1 --top-n 3
//! tuneshelf search play some pop by adele
//! tuneshelf play "Someone Like You"
//!
//! # Keep the library in SQLite instead
//! tuneshelf import songs.json
//! tuneshelf --catalog ~/.local/share/tuneshelf/library.db list
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;
use tuneshelf::catalog::{self, CatalogProvider};
use tuneshelf::cli::{self, Command};
use tuneshelf::config::{self, RuntimeConfig};
use tuneshelf::player::{self, CommandPlayer};
use tuneshelf::recommend::Recommender;
use tuneshelf::search::QueryInterpreter;
use tuneshelf::{completion, console, display, menu, path_translator};

/// Config file first, then `--catalog` / `TUNESHELF_CATALOG` on top.
fn load_config(args: &cli::Args) -> Result<RuntimeConfig> {
    let config = match &args.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::load_default()?,
    };

    Ok(match &args.catalog {
        Some(path) => config.with_catalog_path(path.clone()),
        None => config,
    })
}

/// Main entry point for the Tuneshelf application.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug tuneshelf search jazz` - Enable debug logging
/// - `RUST_LOG=tuneshelf::algorithm=trace tuneshelf recommend 1` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config = load_config(&args)?;
    debug!("Runtime config: {config:?}");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command.clone().unwrap_or(Command::Menu) {
        Command::List => {
            let catalog = catalog::open_provider(&config.catalog_path).load()?;
            display::write_listing(&mut out, &catalog)?;
        }
        Command::Play { title } => {
            let provider = catalog::open_provider(&config.catalog_path);
            let catalog = provider.load()?;
            let title = title.join(" ");

            let track = catalog
                .find_by_title(&title)
                .with_context(|| format!("Song not found: no track titled '{title}'"))?;
            let base_dir = provider.base_dir();
            let file = path_translator::existing_track_path(base_dir.as_deref(), &track.file)?;

            let mut player = CommandPlayer::from_config(&config.player);
            let mut input = console::terminal()?;
            let end = player::play_until_quit(&mut player, &file, &mut input, &mut out)?;
            debug!("Playback ended: {end:?}");
        }
        Command::Recommend { id, top_n, verbose } => {
            let catalog = catalog::open_provider(&config.catalog_path).load()?;
            let top_n = match top_n {
                Some(n) => n,
                None => config.checked_top_n()?,
            };

            let recommender = Recommender::with_top_n(top_n)?;
            let recommendations = recommender.recommend_scored(&catalog, id)?;

            if recommendations.is_empty() {
                writeln!(out, "No recommendations found!")?;
            } else {
                writeln!(out, "\nRecommended Songs:")?;
                for rec in &recommendations {
                    let line = if verbose {
                        display::scored_line(rec)
                    } else {
                        display::result_line(rec.track)
                    };
                    writeln!(out, "{line}")?;
                }
            }
        }
        Command::Search { query } => {
            let catalog = catalog::open_provider(&config.catalog_path).load()?;
            let results = QueryInterpreter::default().search(&catalog, &query.join(" "));

            if results.is_empty() {
                writeln!(out, "No songs matched your query.")?;
            } else {
                display::write_results(&mut out, "Search Results:", &results)?;
            }
        }
        Command::Menu => {
            let provider = catalog::open_provider(&config.catalog_path);
            let catalog = provider.load().with_context(|| {
                format!("No songs available from {}. Exiting...", provider.describe())
            })?;
            if catalog.is_empty() {
                writeln!(out, "No songs available. Exiting...")?;
                return Ok(());
            }

            let recommender = Recommender::with_top_n(config.checked_top_n()?)?;
            let player = CommandPlayer::from_config(&config.player);
            let mut input = console::terminal()?;

            menu::Menu::new(&catalog, provider.base_dir(), recommender, player)
                .run(&mut input, &mut out)?;
        }
        Command::Import { json, db, force } => {
            let db_path: PathBuf = match db {
                Some(path) => path,
                None => config::get_db_path()?,
            };
            info!("Importing {} into {}", json.display(), db_path.display());

            let count = catalog::import_json(&json, &db_path, force)?;
            writeln!(out, "Imported {count} tracks into {}", db_path.display())?;
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(
                completion::shell_to_completion_shell(&shell),
                &mut cmd,
                &mut out,
            );
        }
        Command::CompletionEnhanced => {
            completion::write_enhanced_bash_completion(&mut out)?;
        }
        Command::CompleteTitles => {
            // Completion must stay quiet when the catalog is unavailable.
            if let Ok(catalog) = catalog::open_provider(&config.catalog_path).load() {
                completion::write_title_completions(&mut out, &catalog)?;
            }
        }
    }

    Ok(())
}
