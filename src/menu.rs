//! Interactive numbered menu: play, recommend, search, exit.

use crate::console::LineSource;
use crate::display;
use crate::error::CoreError;
use crate::path_translator;
use crate::player::{play_until_quit, AudioPlayer};
use crate::recommend::{RecommendationSession, Recommender};
use crate::search::QueryInterpreter;
use crate::track::Catalog;
use anyhow::Result;
use log::{debug, warn};
use std::io::Write;
use std::path::PathBuf;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    Recommend,
    Search,
    Exit,
}

impl MenuChoice {
    /// `"1"`..`"4"`, surrounding whitespace ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Play),
            "2" => Some(Self::Recommend),
            "3" => Some(Self::Search),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

const MENU: &str = "\nMenu:\n1. Play a song\n2. Get recommendations\n3. NLP Search\n4. Exit";

/// State of one interactive session over a loaded catalog.
pub struct Menu<'a, P: AudioPlayer> {
    catalog: &'a Catalog,
    base_dir: Option<PathBuf>,
    session: RecommendationSession,
    interpreter: QueryInterpreter,
    player: P,
}

impl<'a, P: AudioPlayer> Menu<'a, P> {
    /// `base_dir` is where relative track files are looked up.
    pub fn new(
        catalog: &'a Catalog,
        base_dir: Option<PathBuf>,
        recommender: Recommender,
        player: P,
    ) -> Self {
        Self {
            catalog,
            base_dir,
            session: RecommendationSession::new(recommender),
            interpreter: QueryInterpreter::default(),
            player,
        }
    }

    /// List the catalog, then loop on the menu until the user exits or
    /// input ends.
    ///
    /// # Errors
    ///
    /// Only input/output failures end the loop with an error; failed
    /// actions are reported and the menu continues.
    pub fn run(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
        display::write_listing(out, self.catalog)?;

        loop {
            writeln!(out, "{MENU}")?;
            let Some(line) = input.read_line("Enter your choice: ")? else {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Play) => self.play(input, out)?,
                Some(MenuChoice::Recommend) => self.recommend(input, out)?,
                Some(MenuChoice::Search) => self.search(input, out)?,
                Some(MenuChoice::Exit) => {
                    writeln!(out, "Goodbye!")?;
                    return Ok(());
                }
                None => writeln!(out, "Invalid choice! Please try again.")?,
            }
        }
    }

    fn play(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
        let Some(title) = input.read_line("Enter the exact song name to play: ")? else {
            return Ok(());
        };

        let Some(track) = self.catalog.find_by_title(&title) else {
            writeln!(out, "Song not found!")?;
            return Ok(());
        };

        let file = match path_translator::existing_track_path(self.base_dir.as_deref(), &track.file)
        {
            Ok(file) => file,
            Err(e) => {
                writeln!(out, "Error: {e}")?;
                return Ok(());
            }
        };

        if let Err(e) = play_until_quit(&mut self.player, &file, input, out) {
            warn!("Playback of {} failed: {e:#}", file.display());
            writeln!(out, "An error occurred: {e}")?;
        }
        Ok(())
    }

    fn recommend(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
        let Some(line) = input.read_line("Enter a song ID you liked: ")? else {
            return Ok(());
        };

        let Ok(liked_id) = line.trim().parse::<i64>() else {
            writeln!(out, "Invalid input! Please enter a valid song ID.")?;
            return Ok(());
        };

        match self.session.recommend(self.catalog, liked_id) {
            Ok(tracks) if tracks.is_empty() => writeln!(out, "No recommendations found!")?,
            Ok(tracks) => display::write_results(out, "Recommended Songs:", &tracks)?,
            Err(CoreError::NotFound(id)) => {
                debug!("Liked id {id} not in catalog");
                writeln!(out, "Song not found!")?;
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        }
        Ok(())
    }

    fn search(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
        let Some(query) =
            input.read_line("Enter your query (e.g., 'Play some pop music by Adele'): ")?
        else {
            return Ok(());
        };

        let results = self.interpreter.search(self.catalog, &query);
        if results.is_empty() {
            writeln!(out, "No songs matched your query.")?;
        } else {
            display::write_results(out, "Search Results:", &results)?;
        }
        Ok(())
    }
}
