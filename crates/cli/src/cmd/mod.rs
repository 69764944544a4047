pub mod backlinks;
pub mod doctor;
pub mod follow;
pub mod tags;

use std::path::Path;

use vaultnav_core::config::loader::ConfigLoader;
use vaultnav_core::config::ResolvedConfig;
use vaultnav_core::Capabilities;

use crate::logging;

/// Load configuration and start logging, or exit with status 1.
pub fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&rc);
    rc
}

pub fn capabilities(no_interactive: bool) -> Capabilities {
    if no_interactive {
        Capabilities::non_interactive()
    } else {
        Capabilities::detect()
    }
}

/// Strip a leading `./` from a vault-relative path.
pub fn normalize_path(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}
