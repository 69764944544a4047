//! File discovery inside the vault and its media roots.

pub mod finder;

pub use finder::{FileSearch, WalkdirSearch};

/// Join a vault-relative path onto `root` by plain string concatenation.
///
/// No normalization happens: `..` segments and absolute-looking relative
/// paths are kept verbatim.
pub fn join_root(root: &str, relative: &str) -> String {
    if root.is_empty() || root.ends_with('/') {
        format!("{root}{relative}")
    } else {
        format!("{root}/{relative}")
    }
}
