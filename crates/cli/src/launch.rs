//! Opening resolved targets with external programs.

use std::process::{Command, Stdio};

use tracing::{error, info};
use vaultnav_core::config::ResolvedConfig;
use vaultnav_core::player::Player;
use vaultnav_core::Launcher;

/// Opens notes in the editor, images in the viewer, and plays audio in
/// the foreground.
pub struct SystemLauncher {
    editor: String,
    image_viewer: String,
    player: Player,
    failed: bool,
}

impl SystemLauncher {
    pub fn from_config(rc: &ResolvedConfig) -> Self {
        Self {
            editor: editor_command(rc.launch.editor.as_deref()),
            image_viewer: rc.launch.image_viewer.clone(),
            player: Player::from_config(rc),
            failed: false,
        }
    }

    /// Whether any launch failed.
    pub fn failed(&self) -> bool {
        self.failed
    }
}

/// Configured editor, then `$EDITOR`, then `$VISUAL`, then `vim`.
pub fn editor_command(configured: Option<&str>) -> String {
    configured
        .map(ToOwned::to_owned)
        .or_else(|| std::env::var("EDITOR").ok())
        .or_else(|| std::env::var("VISUAL").ok())
        .unwrap_or_else(|| "vim".to_string())
}

impl Launcher for SystemLauncher {
    fn open_note(&mut self, path: &str) {
        info!("opening {}", path);
        match Command::new(&self.editor).arg(path).status() {
            Ok(s) if s.success() => {}
            Ok(s) => {
                error!("Editor exited with status: {}", s);
                self.failed = true;
            }
            Err(e) => {
                error!("Failed to open editor '{}': {}", self.editor, e);
                self.failed = true;
            }
        }
    }

    fn view_image(&mut self, path: &str) {
        let spawned = Command::new(&self.image_viewer)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => info!("viewing {} (pid {})", path, child.id()),
            Err(e) => {
                error!("Failed to start image viewer '{}': {}", self.image_viewer, e);
                self.failed = true;
            }
        }
    }

    fn play_audio(&mut self, path: &str) {
        match self.player.start(path) {
            Ok(_) => self.player.wait(),
            Err(e) => {
                error!("{}", e);
                self.failed = true;
            }
        }
    }
}
