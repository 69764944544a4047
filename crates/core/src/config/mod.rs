//! Profile-based TOML configuration.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{IndexBackendKind, ResolvedConfig};
