//! Wikilink tokens: finding them under a cursor and turning them into
//! vault references.
//!
//! ```
//! use vaultnav_core::link::{TargetKind, classify, find_wikilink_at_cursor, sanitize};
//!
//! let line = "see [[Reading List#2024|books]] later";
//! let token = find_wikilink_at_cursor(line, 8).unwrap();
//! assert_eq!(token.raw, "Reading List#2024|books");
//!
//! let reference = sanitize(&token.raw).unwrap();
//! assert_eq!(reference, "Reading List.md");
//! assert_eq!(classify(&reference), TargetKind::Note);
//! ```

pub mod reference;
pub mod scanner;

pub use reference::{TargetKind, classify, sanitize};
pub use scanner::{WikilinkToken, find_wikilink_at_cursor, find_wikilinks};
