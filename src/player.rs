//! # Audio Playback
//!
//! Playback is delegated to an external program, the same way the rest of
//! the tool shells out instead of linking an audio stack. The default is
//! `ffplay -nodisp -autoexit -loglevel quiet <file>`; anything that takes
//! a file argument and exits when done works.

use crate::config::PlayerConfig;
use crate::console::LineSource;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Plays one file at a time.
pub trait AudioPlayer {
    /// Begin playing `file`, stopping whatever was playing.
    ///
    /// # Errors
    ///
    /// Playback could not be started.
    fn start(&mut self, file: &Path) -> Result<()>;

    /// Still playing?
    ///
    /// # Errors
    ///
    /// The player's state could not be queried.
    fn is_playing(&mut self) -> Result<bool>;

    /// Stop playback. Stopping an idle player is fine.
    ///
    /// # Errors
    ///
    /// The player could not be stopped.
    fn stop(&mut self) -> Result<()>;
}

/// Runs a player program as a child process.
#[derive(Debug)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            child: None,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }
}

impl AudioPlayer for CommandPlayer {
    fn start(&mut self, file: &Path) -> Result<()> {
        self.stop()?;

        debug!("Spawning {} {:?} {}", self.program, self.args, file.display());
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to start audio player '{}'. Is it installed and on PATH?",
                    self.program
                )
            })?;

        info!("Playing {}", file.display());
        self.child = Some(child);
        Ok(())
    }

    fn is_playing(&mut self) -> Result<bool> {
        let Some(child) = self.child.as_mut() else {
            return Ok(false);
        };

        match child.try_wait().context("Failed to query audio player")? {
            None => Ok(true),
            Some(status) => {
                if !status.success() {
                    warn!("Audio player '{}' exited with {status}", self.program);
                }
                self.child = None;
                Ok(false)
            }
        }
    }

    fn stop(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        match child.kill() {
            Ok(()) => info!("Playback stopped"),
            // Already exited on its own.
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
            Err(e) => {
                // Keep the handle so a later stop (or Drop) can retry.
                self.child = Some(child);
                return Err(e)
                    .with_context(|| format!("Failed to stop audio player '{}'", self.program));
            }
        }

        child.wait().context("Failed to reap audio player")?;
        Ok(())
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Could not stop audio player on exit: {e:#}");
        }
    }
}

/// How a [`play_until_quit`] session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// The track played to the end.
    Finished,
    /// The user quit (`q`, Ctrl-C or Ctrl-D).
    Stopped,
}

/// Play `file` and keep reading commands while it plays. `q` stops it.
///
/// # Errors
///
/// The player failed to start or stop, or input/output failed.
pub fn play_until_quit<P>(
    player: &mut P,
    file: &Path,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<PlaybackEnd>
where
    P: AudioPlayer + ?Sized,
{
    player.start(file)?;
    writeln!(out, "Playing '{}'... Press 'q' to quit the song.", file.display())?;

    while player.is_playing()? {
        match input.read_line("> ")? {
            Some(command) if command.trim().eq_ignore_ascii_case("q") => {
                player.stop()?;
                return Ok(PlaybackEnd::Stopped);
            }
            Some(_) => {}
            None => {
                player.stop()?;
                return Ok(PlaybackEnd::Stopped);
            }
        }
    }

    Ok(PlaybackEnd::Finished)
}
