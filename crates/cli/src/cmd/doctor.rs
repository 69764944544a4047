use std::path::Path;

use vaultnav_core::config::loader::{default_config_path, ConfigLoader};
use vaultnav_core::config::IndexBackendKind;
use vaultnav_core::index::schema;
use vaultnav_core::index::IndexError;

use crate::logging;

pub fn run(config: Option<&Path>, profile: Option<&str>) -> i32 {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            logging::init(&rc);
            tracing::debug!("configuration loaded for profile {}", rc.active_profile);

            println!("OK   vnav doctor");
            println!("version: {}", vaultnav_core::version());
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("vault_root: {}", rc.vault_root.display());
            println!("audio_root: {}", rc.audio_root.display());
            println!("index: {}", rc.index_path.display());
            println!("index.status: {}", index_status(&rc.index_path));
            println!(
                "index.backend: {}",
                match rc.index.backend {
                    IndexBackendKind::Sqlite => "sqlite",
                    IndexBackendKind::Sqlite3 => "sqlite3",
                }
            );
            println!("index.hardened: {}", rc.index.hardened);
            println!("launch.editor: {}", rc.launch.editor.as_deref().unwrap_or("(environment)"));
            println!("launch.image_viewer: {}", rc.launch.image_viewer);
            println!("launch.audio_player: {}", rc.launch.audio_player);
            0
        }
        Err(e) => {
            println!("FAIL vnav doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            1
        }
    }
}

fn index_status(path: &Path) -> String {
    match schema::inspect(path) {
        Ok(missing) if missing.is_empty() => "ok".to_string(),
        Ok(missing) => format!("missing tables: {}", missing.join(", ")),
        Err(IndexError::Missing(_)) => "missing".to_string(),
        Err(e) => format!("unreadable ({e})"),
    }
}
