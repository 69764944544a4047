//! Single-slot background media playback.
//!
//! [`Player`] tracks at most one running playback. Starting a new one stops
//! the current one first, and stopping when nothing plays is a no-op.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use thiserror::Error;

use crate::config::types::ResolvedConfig;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no file to play")]
    EmptyPath,

    #[error("failed to start {program} for {path}: {source}")]
    Spawn {
        program: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A running playback.
pub trait Playback {
    fn id(&self) -> u32;

    /// Terminate the playback. Must tolerate an already-finished process.
    fn stop(&mut self);

    /// Non-blocking check for termination.
    fn has_exited(&mut self) -> bool;

    /// Block until the playback ends on its own.
    fn wait(&mut self);
}

/// Starts playbacks.
pub trait MediaSpawner {
    fn spawn(&self, path: &str, cwd: &Path) -> Result<Box<dyn Playback>, PlayerError>;
}

pub struct Player {
    spawner: Box<dyn MediaSpawner>,
    cwd: PathBuf,
    active: Option<Box<dyn Playback>>,
}

impl Player {
    /// Player whose playbacks run with `cwd` as working directory.
    pub fn new(spawner: Box<dyn MediaSpawner>, cwd: impl Into<PathBuf>) -> Self {
        Self { spawner, cwd: cwd.into(), active: None }
    }

    /// Configured audio player, running from the vault root.
    pub fn from_config(cfg: &ResolvedConfig) -> Self {
        let spawner = ProcessSpawner::new(&cfg.launch.audio_player, cfg.launch.audio_args.clone());
        Self::new(Box::new(spawner), &cfg.vault_root)
    }

    /// Stop whatever is playing, then start `path`.
    pub fn start(&mut self, path: &str) -> Result<u32, PlayerError> {
        if path.is_empty() {
            return Err(PlayerError::EmptyPath);
        }

        self.stop();
        let playback = self.spawner.spawn(path, &self.cwd)?;
        let id = playback.id();
        tracing::info!(id, path, "playback started");
        self.active = Some(playback);
        Ok(id)
    }

    /// Stop the active playback, if any.
    pub fn stop(&mut self) {
        if let Some(mut playback) = self.active.take() {
            tracing::debug!(id = playback.id(), "stopping playback");
            playback.stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_id(&self) -> Option<u32> {
        self.active.as_ref().map(|p| p.id())
    }

    /// Exit notification for playback `id`: clears the slot if it is the
    /// tracked one. Notifications for older playbacks are ignored.
    pub fn notify_exit(&mut self, id: u32) {
        if self.active_id() == Some(id) {
            tracing::debug!(id, "playback finished");
            self.active = None;
        }
    }

    /// Check the tracked playback without blocking. Returns whether
    /// something is still playing.
    pub fn poll(&mut self) -> bool {
        if let Some(playback) = self.active.as_mut()
            && playback.has_exited()
        {
            let id = playback.id();
            self.notify_exit(id);
        }
        self.is_playing()
    }

    /// Block until the tracked playback ends.
    pub fn wait(&mut self) {
        if let Some(playback) = self.active.as_mut() {
            playback.wait();
            let id = playback.id();
            self.notify_exit(id);
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs an external program as `<program> <args..> <path>` with null stdio.
#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    program: String,
    args: Vec<String>,
}

impl ProcessSpawner {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }
}

impl MediaSpawner for ProcessSpawner {
    fn spawn(&self, path: &str, cwd: &Path) -> Result<Box<dyn Playback>, PlayerError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlayerError::Spawn {
                program: self.program.clone(),
                path: path.to_string(),
                source: e,
            })?;
        Ok(Box::new(ChildPlayback(child)))
    }
}

struct ChildPlayback(Child);

impl Playback for ChildPlayback {
    fn id(&self) -> u32 {
        self.0.id()
    }

    fn stop(&mut self) {
        // Already exited is fine; reap either way.
        let _ = self.0.kill();
        let _ = self.0.wait();
    }

    fn has_exited(&mut self) -> bool {
        !matches!(self.0.try_wait(), Ok(None))
    }

    fn wait(&mut self) {
        if let Err(e) = self.0.wait() {
            tracing::warn!("failed waiting for playback {}: {}", self.0.id(), e);
        }
    }
}
