//! Wikilink recognition and resolution for markdown vaults.
//!
//! Given the line under an editor cursor, [`resolver::Resolver`] finds the
//! `[[wikilink]]` the cursor sits in, classifies its target and resolves it
//! against the vault index to a single note, image or audio file.

pub mod config;
pub mod dispatch;
pub mod index;
pub mod link;
pub mod lines;
pub mod picker;
pub mod player;
pub mod resolver;
pub mod vault;

pub use dispatch::Launcher;
pub use link::{TargetKind, WikilinkToken, classify, find_wikilink_at_cursor, sanitize};
pub use picker::{Capabilities, FirstCandidatePicker, Picker};
pub use resolver::{Resolution, Resolver, UnresolvedReason};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
