//! # Integration Tests for Tuneshelf
//!
//! End-to-end checks from a user's point of view: catalogs on disk, the
//! library API over them, and the `tuneshelf` binary.

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use tuneshelf::catalog::{CatalogProvider, JsonCatalog};
use tuneshelf::recommend::{self, RecommendationSession, Recommender};
use tuneshelf::search;
use tuneshelf::track::Catalog;
use tuneshelf::CoreError;

const SONGS_JSON: &str = r#"[
  {"id": 1, "title": "Rolling in the Deep", "artist": "Adele", "genre": "Pop", "file": "songs/rolling.mp3"},
  {"id": 2, "title": "Shape of You", "artist": "Ed Sheeran", "genre": "Pop", "file": "songs/shape.mp3"},
  {"id": 3, "title": "Someone Like You", "artist": "Adele", "genre": "Pop", "file": "songs/someone.mp3"},
  {"id": 4, "title": "So What", "artist": "Miles Davis", "genre": "Jazz", "file": "songs/so_what.mp3"},
  {"id": 5, "title": "Blue in Green", "artist": "Miles Davis", "genre": "Jazz", "file": "songs/blue.mp3"},
  {"id": 6, "title": "Back in Black", "artist": "ACDC", "genre": "Rock", "file": "songs/back.mp3"}
]"#;

/// Test helper to create a temporary JSON catalog
fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("songs.json");
    fs::write(&path, SONGS_JSON)?;
    Ok((temp_dir, path))
}

fn load(path: &Path) -> Result<Catalog> {
    JsonCatalog::new(path).load()
}

fn ids<'a>(tracks: impl IntoIterator<Item = &'a tuneshelf::track::Track>) -> Vec<i64> {
    tracks.into_iter().map(|t| t.id).collect()
}

mod recommendation_tests {
    use super::*;

    #[test]
    fn test_same_artist_ranks_first() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let catalog = load(&path)?;

        let recs = recommend::recommend(&catalog, 4, 5)?;
        assert_eq!(recs[0].id, 5);
        Ok(())
    }

    #[test]
    fn test_liked_track_excluded_and_length_bounded() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let catalog = load(&path)?;

        for track in &catalog {
            for top_n in [1, 3, 5, 10] {
                let recs = recommend::recommend(&catalog, track.id, top_n)?;
                assert!(recs.iter().all(|t| t.id != track.id));
                assert!(recs.len() <= top_n.min(catalog.len() - 1));

                let unique: HashSet<i64> = recs.iter().map(|t| t.id).collect();
                assert_eq!(unique.len(), recs.len());
            }
        }
        Ok(())
    }

    #[test]
    fn test_scores_non_increasing_and_deterministic() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let catalog = load(&path)?;
        let recommender = Recommender::with_top_n(10)?;

        let first = recommender.recommend_scored(&catalog, 1)?;
        let second = recommender.recommend_scored(&catalog, 1)?;

        assert!(first.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_session_matches_one_shot() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let catalog = load(&path)?;
        let mut session = RecommendationSession::default();

        for track in &catalog {
            assert_eq!(
                ids(session.recommend(&catalog, track.id)?),
                ids(recommend::recommend(&catalog, track.id, recommend::DEFAULT_TOP_N)?)
            );
        }
        Ok(())
    }

    #[test]
    fn test_unknown_id_is_not_found() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let catalog = load(&path)?;

        let err = recommend::recommend(&catalog, 99, 5).unwrap_err();
        assert_eq!(err, CoreError::NotFound(99));
        Ok(())
    }
}

mod search_tests {
    use super::*;

    #[test]
    fn test_genre_query() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let catalog = load(&path)?;

        assert_eq!(ids(search::search(&catalog, "Play some jazz tonight")), vec![4, 5]);
        Ok(())
    }

    #[test]
    fn test_genre_or_artist() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let catalog = load(&path)?;

        assert_eq!(ids(search::search(&catalog, "rock or adele")), vec![1, 3, 6]);
        Ok(())
    }

    #[test]
    fn test_results_are_ordered_subset() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let catalog = load(&path)?;
        let order: Vec<i64> = ids(&catalog);

        for query in ["pop", "acdc", "jazz by adele", "nothing here", ""] {
            let found = ids(search::search(&catalog, query));
            let positions: Vec<usize> = found
                .iter()
                .map(|id| order.iter().position(|o| o == id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{query}");
        }
        Ok(())
    }

    #[test]
    fn test_multi_word_artist_not_matched() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let catalog = load(&path)?;

        assert!(search::search(&catalog, "something by miles davis").is_empty());
        assert!(search::search(&catalog, "").is_empty());
        Ok(())
    }
}

mod cli_tests {
    use super::*;

    fn tuneshelf(args: &[&str], catalog: &Path) -> Output {
        Command::new(env!("CARGO_BIN_EXE_tuneshelf"))
            .args(args)
            .env("TUNESHELF_CATALOG", catalog)
            .env("TUNESHELF_CONFIG", catalog.with_file_name("config.json"))
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run tuneshelf")
    }

    #[test]
    fn test_cli_help_displays_correctly() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let output = tuneshelf(&["--help"], &path);

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("tuneshelf"));
        assert!(stdout.contains("recommend"));
        assert!(stdout.contains("search"));
        Ok(())
    }

    #[test]
    fn test_list_command() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let output = tuneshelf(&["list"], &path);

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("Available Songs:"));
        assert!(stdout.contains("4. So What - Miles Davis (Jazz)"));
        Ok(())
    }

    #[test]
    fn test_recommend_command() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let output = tuneshelf(&["recommend", "4", "--top-n", "1"], &path);

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("Recommended Songs:\n5. Blue in Green - Miles Davis\n"));
        Ok(())
    }

    #[test]
    fn test_recommend_unknown_id_fails() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;
        let output = tuneshelf(&["recommend", "99"], &path);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("99"));
        Ok(())
    }

    #[test]
    fn test_search_command() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;

        let output = tuneshelf(&["search", "play", "something", "by", "adele"], &path);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("Search Results:\n1. Rolling in the Deep - Adele\n3. Someone Like You - Adele\n"));

        let output = tuneshelf(&["search", "polka"], &path);
        assert!(String::from_utf8_lossy(&output.stdout).contains("No songs matched your query."));
        Ok(())
    }

    #[test]
    fn test_missing_catalog_fails() -> Result<()> {
        let dir = TempDir::new()?;
        let output = tuneshelf(&["list"], &dir.path().join("absent.json"));

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
        Ok(())
    }

    #[test]
    fn test_import_then_list_library() -> Result<()> {
        let (dir, path) = create_test_catalog()?;
        let db = dir.path().join("library.db");

        let output = tuneshelf(&["import", path.to_str().unwrap(), "--db", db.to_str().unwrap()], &path);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(String::from_utf8_lossy(&output.stdout).contains("Imported 6 tracks"));

        let output = tuneshelf(&["list"], &db);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("6. Back in Black - ACDC (Rock)"));

        let again = tuneshelf(&["import", path.to_str().unwrap(), "--db", db.to_str().unwrap()], &path);
        assert!(!again.status.success());
        Ok(())
    }

    #[test]
    fn test_completion_commands() -> Result<()> {
        let (_dir, path) = create_test_catalog()?;

        let output = tuneshelf(&["completion", "bash"], &path);
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("_tuneshelf"));

        let output = tuneshelf(&["complete-titles"], &path);
        assert!(String::from_utf8_lossy(&output.stdout).contains("Blue in Green\n"));
        Ok(())
    }
}
