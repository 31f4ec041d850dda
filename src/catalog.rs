//! # Catalog Providers
//!
//! Where the track list comes from. The core never reads files; it is
//! handed a [`Catalog`] built by one of these.
//!
//! - [`JsonCatalog`]: a `songs.json` array of `{id, title, artist, genre, file}`
//! - [`SqliteCatalog`]: a `tracks` table in a `SQLite` library file, filled
//!   by `tuneshelf import`

use crate::path_translator;
use crate::track::{Catalog, Track};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use rusqlite::Connection;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Something that can produce a catalog snapshot.
pub trait CatalogProvider {
    /// Load and validate the full track list.
    ///
    /// # Errors
    ///
    /// Missing or unreadable source, malformed records, duplicate ids.
    fn load(&self) -> Result<Catalog>;

    /// Directory relative `file` entries are resolved against.
    fn base_dir(&self) -> Option<PathBuf>;

    /// Human-readable source name for messages.
    fn describe(&self) -> String;
}

/// A catalog stored as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogProvider for JsonCatalog {
    fn load(&self) -> Result<Catalog> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                bail!("Catalog file '{}' not found!", self.path.display())
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read catalog file '{}'", self.path.display())
                })
            }
        };

        let tracks: Vec<Track> = serde_json::from_str(&content).with_context(|| {
            format!("Catalog file '{}' contains invalid JSON!", self.path.display())
        })?;

        let catalog = Catalog::new(tracks)
            .with_context(|| format!("Catalog file '{}' is inconsistent", self.path.display()))?;

        info!("Loaded {} tracks from {}", catalog.len(), self.path.display());
        Ok(catalog)
    }

    fn base_dir(&self) -> Option<PathBuf> {
        path_translator::catalog_base_dir(&self.path).ok()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A catalog stored in a `SQLite` library file.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    path: PathBuf,
}

impl SqliteCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the library, creating the file and table if needed.
    ///
    /// # Errors
    ///
    /// Connection refused or schema creation failed.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).with_context(|| {
            format!("SQLite connection refused. Library location: {}", self.path.display())
        })?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tracks (
                position INTEGER PRIMARY KEY,
                id       INTEGER NOT NULL UNIQUE,
                title    TEXT    NOT NULL,
                artist   TEXT    NOT NULL,
                genre    TEXT    NOT NULL,
                file     TEXT    NOT NULL
            )",
            (),
        )
        .context("Invalid SQL command when CREATEing tracks TABLE")?;

        Ok(conn)
    }

    /// Write `catalog` into the library in one transaction, keeping its
    /// order. A library that already holds tracks is only replaced when
    /// `force` is set. Returns the number of tracks written.
    ///
    /// # Errors
    ///
    /// Non-empty library without `force`, or any SQL failure.
    pub fn store(&self, catalog: &Catalog, force: bool) -> Result<usize> {
        let mut conn = self.connect()?;

        let existing: i64 = conn
            .query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))
            .context("Could not count library entries.")?;
        if existing > 0 && !force {
            bail!(
                "Library {} already holds {existing} tracks. Use --force to replace them.",
                self.path.display()
            );
        }

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM tracks", ())
            .context("Failed to clear tracks TABLE")?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tracks (position, id, title, artist, genre, file)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            for (position, track) in catalog.iter().enumerate() {
                let position = i64::try_from(position).context("Catalog too large")?;
                stmt.execute((
                    position,
                    track.id,
                    &track.title,
                    &track.artist,
                    &track.genre,
                    &track.file,
                ))
                .with_context(|| format!("Failed to INSERT track INTO library: {track:?}"))?;
            }
        }
        tx.commit().context("Committing SQL transaction failed.")?;

        info!("Stored {} tracks in {}", catalog.len(), self.path.display());
        Ok(catalog.len())
    }
}

impl CatalogProvider for SqliteCatalog {
    fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            bail!("Library file '{}' not found!", self.path.display());
        }
        let conn = self.connect()?;

        let mut stmt = conn
            .prepare("SELECT id, title, artist, genre, file FROM tracks ORDER BY position")
            .context("Invalid SQL statement when SELECTing FROM tracks")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Track {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    artist: row.get(2)?,
                    genre: row.get(3)?,
                    file: row.get(4)?,
                })
            })
            .context("Cannot query tracks.")?;

        let mut tracks = Vec::new();
        for row in rows {
            tracks.push(row.context("Queried track could not be read.")?);
        }

        let catalog = Catalog::new(tracks)?;
        info!("Loaded {} tracks from {}", catalog.len(), self.path.display());
        Ok(catalog)
    }

    fn base_dir(&self) -> Option<PathBuf> {
        path_translator::catalog_base_dir(&self.path).ok()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Picks a provider from the file extension: `.db`, `.db3`, `.sqlite` and
/// `.sqlite3` are libraries, anything else is read as JSON.
pub fn open_provider(path: &Path) -> Box<dyn CatalogProvider> {
    let is_library = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "db" | "db3" | "sqlite" | "sqlite3"
            )
        });

    if is_library {
        debug!("Using SQLite library provider for {}", path.display());
        Box::new(SqliteCatalog::new(path))
    } else {
        debug!("Using JSON catalog provider for {}", path.display());
        Box::new(JsonCatalog::new(path))
    }
}

/// Copy a JSON catalog into a library. Relative `file` entries are made
/// absolute first, so the library works from any directory.
///
/// # Errors
///
/// Anything [`JsonCatalog::load`] or [`SqliteCatalog::store`] reports.
pub fn import_json(json_path: &Path, db_path: &Path, force: bool) -> Result<usize> {
    let source = JsonCatalog::new(json_path);
    let catalog = source.load()?;
    let base_dir = source.base_dir();

    let tracks = catalog
        .iter()
        .map(|track| {
            let file = path_translator::resolve_track_path(base_dir.as_deref(), &track.file)?;
            Ok(Track {
                file: file.to_string_lossy().into_owned(),
                ..track.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    SqliteCatalog::new(db_path).store(&Catalog::new(tracks)?, force)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::tests::sample_catalog;
    use tempfile::TempDir;

    fn write_json(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const SONGS_JSON: &str = r#"[
        {"id": 1, "title": "Rolling in the Deep", "artist": "Adele", "genre": "Pop", "file": "songs/rolling.mp3"},
        {"id": 2, "title": "Shape of You", "artist": "Ed Sheeran", "genre": "Pop", "file": "songs/shape.mp3"},
        {"id": 3, "title": "Someone Like You", "artist": "Adele", "genre": "Pop", "file": "/abs/someone.mp3"}
    ]"#;

    #[test]
    fn test_json_load_keeps_order() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_json(&dir, "songs.json", SONGS_JSON);
        let catalog = JsonCatalog::new(&path).load()?;
        assert_eq!(catalog, {
            let mut expected = sample_catalog().tracks().to_vec();
            expected[0].file = "songs/rolling.mp3".to_string();
            expected[1].file = "songs/shape.mp3".to_string();
            expected[2].file = "/abs/someone.mp3".to_string();
            Catalog::new(expected)?
        });
        Ok(())
    }

    #[test]
    fn test_json_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = JsonCatalog::new(dir.path().join("songs.json")).load().unwrap_err();
        assert!(err.to_string().contains("not found"), "{err}");
    }

    #[test]
    fn test_json_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write_json(&dir, "songs.json", "[{\"id\": 1,");
        let err = JsonCatalog::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("invalid JSON"), "{err}");
    }

    #[test]
    fn test_json_missing_field_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_json(&dir, "songs.json", r#"[{"id": 1, "title": "x", "artist": "y"}]"#);
        assert!(JsonCatalog::new(&path).load().is_err());
    }

    #[test]
    fn test_json_duplicate_ids_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_json(
            &dir,
            "songs.json",
            r#"[{"id": 1, "title": "a", "artist": "b", "genre": "c", "file": "d"},
                {"id": 1, "title": "e", "artist": "f", "genre": "g", "file": "h"}]"#,
        );
        let err = JsonCatalog::new(&path).load().unwrap_err();
        assert!(format!("{err:#}").contains("duplicate track id 1"), "{err:#}");
    }

    #[test]
    fn test_json_base_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_json(&dir, "songs.json", "[]");
        assert_eq!(JsonCatalog::new(&path).base_dir(), Some(dir.path().to_path_buf()));
        Ok(())
    }

    #[test]
    fn test_sqlite_store_and_load() -> Result<()> {
        let dir = TempDir::new()?;
        let library = SqliteCatalog::new(dir.path().join("library.db"));
        let catalog = sample_catalog();

        assert_eq!(library.store(&catalog, false)?, 3);
        assert_eq!(library.load()?, catalog);
        Ok(())
    }

    #[test]
    fn test_sqlite_keeps_non_id_order() -> Result<()> {
        let dir = TempDir::new()?;
        let library = SqliteCatalog::new(dir.path().join("library.db"));
        let mut tracks = sample_catalog().tracks().to_vec();
        tracks.reverse();
        let catalog = Catalog::new(tracks)?;

        library.store(&catalog, false)?;
        let ids: Vec<i64> = library.load()?.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        Ok(())
    }

    #[test]
    fn test_sqlite_refuses_overwrite_without_force() -> Result<()> {
        let dir = TempDir::new()?;
        let library = SqliteCatalog::new(dir.path().join("library.db"));
        library.store(&sample_catalog(), false)?;

        assert!(library.store(&sample_catalog(), false).is_err());

        let smaller = Catalog::new(sample_catalog().tracks()[..1].to_vec())?;
        assert_eq!(library.store(&smaller, true)?, 1);
        assert_eq!(library.load()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_sqlite_missing_library() {
        let dir = TempDir::new().unwrap();
        let err = SqliteCatalog::new(dir.path().join("none.db")).load().unwrap_err();
        assert!(err.to_string().contains("not found"), "{err}");
        assert!(!dir.path().join("none.db").exists());
    }

    #[test]
    fn test_open_provider_by_extension() {
        assert!(open_provider(Path::new("x/library.db")).describe().ends_with("library.db"));
        let dir = TempDir::new().unwrap();
        let library = dir.path().join("LIB.SQLITE");
        SqliteCatalog::new(&library).store(&sample_catalog(), false).unwrap();
        assert_eq!(open_provider(&library).load().unwrap().len(), 3);

        let json = write_json(&dir, "songs.json", SONGS_JSON);
        assert_eq!(open_provider(&json).load().unwrap().len(), 3);
    }

    #[test]
    fn test_import_makes_paths_absolute() -> Result<()> {
        let dir = TempDir::new()?;
        let json = write_json(&dir, "songs.json", SONGS_JSON);
        let db = dir.path().join("library.db");

        assert_eq!(import_json(&json, &db, false)?, 3);

        let catalog = SqliteCatalog::new(&db).load()?;
        let files: Vec<&str> = catalog.iter().map(|t| t.file.as_str()).collect();
        assert_eq!(
            files[0],
            dir.path().join("songs/rolling.mp3").to_string_lossy()
        );
        assert_eq!(files[2], "/abs/someone.mp3");
        Ok(())
    }
}
