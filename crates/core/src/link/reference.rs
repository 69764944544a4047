//! Link sanitization and target classification.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(\w+)$").unwrap());

const IMAGE_EXTENSIONS: [&str; 3] = ["avif", "png", "jpg"];

/// What a sanitized reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Note,
    Image,
    /// Fallback for every extension that is neither a note nor an image.
    Audio,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Note => "note",
            TargetKind::Image => "image",
            TargetKind::Audio => "audio",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize raw wikilink content into a vault reference.
///
/// Applied in order:
/// 1. drop everything from the first `#` (section anchor)
/// 2. drop everything from the first `|` (display alias)
/// 3. drop the leading list marker: the whole run of `-` and whitespace,
///    not a single `-`, so `--x` and ` -x` both become `x.md`
/// 4. trim surrounding whitespace
/// 5. append `.md` when no `.<word>` extension is left
///
/// Returns `None` when nothing is left to resolve. The result never starts
/// with a list marker and always ends in an extension, so sanitizing twice
/// gives the same answer as sanitizing once.
pub fn sanitize(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let target = raw.split('#').next().unwrap_or_default();
    let target = target.split('|').next().unwrap_or_default();
    let target = target.trim_start_matches(|c: char| c == '-' || c.is_whitespace()).trim();

    if target.is_empty() {
        return None;
    }

    if EXTENSION_RE.is_match(target) {
        Some(target.to_string())
    } else {
        Some(format!("{target}.md"))
    }
}

/// Final extension of `reference`, if any. Case is preserved.
pub fn extension(reference: &str) -> Option<&str> {
    EXTENSION_RE.captures(reference).and_then(|cap| cap.get(1)).map(|m| m.as_str())
}

/// Classify a reference by its extension.
///
/// Matching is case-sensitive: `photo.PNG` is not an image.
pub fn classify(reference: &str) -> TargetKind {
    match extension(reference) {
        None | Some("md") => TargetKind::Note,
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => TargetKind::Image,
        Some(_) => TargetKind::Audio,
    }
}
