//! Text formats for tracks shown to the user.

use crate::recommend::Recommendation;
use crate::track::{Catalog, Track};
use std::io::{self, Write};

/// `1. Hello - Adele (Soul)`
#[must_use]
pub fn listing_line(track: &Track) -> String {
    format!("{}. {} - {} ({})", track.id, track.title, track.artist, track.genre)
}

/// `1. Hello - Adele`
#[must_use]
pub fn result_line(track: &Track) -> String {
    format!("{}. {} - {}", track.id, track.title, track.artist)
}

/// `1. Hello - Adele [0.365]`
#[must_use]
pub fn scored_line(rec: &Recommendation<'_>) -> String {
    format!("{} [{:.3}]", result_line(rec.track), rec.score)
}

/// The whole catalog under an "Available Songs:" heading.
///
/// # Errors
///
/// Writing to `out` failed.
pub fn write_listing(out: &mut dyn Write, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "\nAvailable Songs:")?;
    for track in catalog {
        writeln!(out, "{}", listing_line(track))?;
    }
    Ok(())
}

/// `heading` followed by one result line per track.
///
/// # Errors
///
/// Writing to `out` failed.
pub fn write_results(out: &mut dyn Write, heading: &str, tracks: &[&Track]) -> io::Result<()> {
    writeln!(out, "\n{heading}")?;
    for track in tracks {
        writeln!(out, "{}", result_line(track))?;
    }
    Ok(())
}
