use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub launch: LaunchConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    /// Root searched for audio links. Defaults to the vault root.
    pub audio_root: Option<String>,
}

/// External programs used to open what a link resolves to.
#[derive(Debug, Deserialize, Clone)]
pub struct LaunchConfig {
    /// Editor for notes. Falls back to `$EDITOR`, `$VISUAL`, then `vim`.
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default = "default_image_viewer")]
    pub image_viewer: String,
    #[serde(default = "default_audio_player")]
    pub audio_player: String,
    #[serde(default)]
    pub audio_args: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            editor: None,
            image_viewer: default_image_viewer(),
            audio_player: default_audio_player(),
            audio_args: Vec::new(),
        }
    }
}

fn default_image_viewer() -> String {
    if cfg!(target_os = "macos") { "open".to_string() } else { "xdg-open".to_string() }
}

fn default_audio_player() -> String {
    "mpv".to_string()
}

/// How queries reach the index file.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackendKind {
    /// Open the file in-process with SQLite.
    #[default]
    Sqlite,
    /// Shell out to the `sqlite3` program.
    Sqlite3,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    #[serde(default)]
    pub backend: IndexBackendKind,
    #[serde(default = "default_sqlite3_program")]
    pub sqlite3_program: String,
    /// Escape LIKE wildcards in substring lookups and drop NUL characters.
    #[serde(default)]
    pub hardened: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: IndexBackendKind::default(),
            sqlite3_program: default_sqlite3_program(),
            hardened: false,
        }
    }
}

fn default_sqlite3_program() -> String {
    "sqlite3".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub vault_root: PathBuf,
    pub audio_root: PathBuf,
    /// Index file, always `<vault_root>/.vaultnav/index.db`.
    pub index_path: PathBuf,
    pub launch: LaunchConfig,
    pub index: IndexConfig,
    pub logging: LoggingConfig,
}
