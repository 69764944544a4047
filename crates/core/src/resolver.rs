//! Turning the wikilink under a cursor into one concrete target.
//!
//! Resolution runs scanner → sanitizer → classifier → lookup:
//!
//! - **notes** are looked up by link text in the backlink index; with no
//!   match the raw link text itself is taken as a vault-relative path,
//!   alias and anchor included
//! - **images** are looked up the same way, but the result is returned
//!   relative to the working directory (`./<path>`), not the vault root
//! - **audio** (any other extension) is found by filename search under the
//!   audio root
//!
//! Several candidates go to the [`Picker`]. Lookups never fail outright:
//! a broken or missing index reads as "no candidates", and every dead end
//! comes back as [`Resolution::Unresolved`] with the reason attached.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::types::ResolvedConfig;
use crate::dispatch::{Launcher, dispatch};
use crate::index::IndexQueries;
use crate::lines::Candidates;
use crate::link::{TargetKind, WikilinkToken, classify, find_wikilink_at_cursor, sanitize};
use crate::picker::Picker;
use crate::vault::{FileSearch, WalkdirSearch, join_root};

/// Why a link could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    NoTokenUnderCursor,
    EmptyAfterSanitization,
    NoCandidates,
    /// The index file is missing, so "no candidates" may be wrong.
    IndexUnavailable,
    SelectionCancelled,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UnresolvedReason::NoTokenUnderCursor => "no wikilink under cursor",
            UnresolvedReason::EmptyAfterSanitization => "link has no target",
            UnresolvedReason::NoCandidates => "no matching file",
            UnresolvedReason::IndexUnavailable => "index not available",
            UnresolvedReason::SelectionCancelled => "selection cancelled",
        };
        f.write_str(msg)
    }
}

/// The single target a link resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    OpenNote { path: String },
    ShowImage { path: String },
    PlayAudio { path: String },
    Unresolved { reason: UnresolvedReason },
}

impl Resolution {
    fn unresolved(reason: UnresolvedReason) -> Self {
        Resolution::Unresolved { reason }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Resolution::OpenNote { path }
            | Resolution::ShowImage { path }
            | Resolution::PlayAudio { path } => Some(path.as_str()),
            Resolution::Unresolved { .. } => None,
        }
    }

    /// Short label: `note`, `image`, `audio` or `unresolved`.
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::OpenNote { .. } => TargetKind::Note.as_str(),
            Resolution::ShowImage { .. } => TargetKind::Image.as_str(),
            Resolution::PlayAudio { .. } => TargetKind::Audio.as_str(),
            Resolution::Unresolved { .. } => "unresolved",
        }
    }
}

/// Unindexed note: the link text as written, with `.md` appended unless
/// already present. No sanitizing happens here.
fn note_path_from_raw(raw: &str) -> String {
    if raw.ends_with(".md") { raw.to_string() } else { format!("{raw}.md") }
}

enum Choice {
    None,
    Chosen(String),
    Cancelled,
}

pub struct Resolver {
    vault_root: String,
    audio_root: PathBuf,
    index: IndexQueries,
    search: Box<dyn FileSearch>,
    picker: Box<dyn Picker>,
}

impl Resolver {
    pub fn new(
        vault_root: impl Into<String>,
        audio_root: impl Into<PathBuf>,
        index: IndexQueries,
        search: Box<dyn FileSearch>,
        picker: Box<dyn Picker>,
    ) -> Self {
        Self {
            vault_root: vault_root.into(),
            audio_root: audio_root.into(),
            index,
            search,
            picker,
        }
    }

    pub fn from_config(cfg: &ResolvedConfig, picker: Box<dyn Picker>) -> Self {
        Self::new(
            cfg.vault_root.to_string_lossy(),
            &cfg.audio_root,
            IndexQueries::from_config(cfg),
            Box::new(WalkdirSearch),
            picker,
        )
    }

    /// Resolve the wikilink under `cursor` (0-based char offset) in `line`.
    pub fn resolve(&self, line: &str, cursor: usize) -> Resolution {
        match find_wikilink_at_cursor(line, cursor) {
            Some(token) => self.resolve_token(&token),
            None => Resolution::unresolved(UnresolvedReason::NoTokenUnderCursor),
        }
    }

    /// Resolve, then hand the result to `launcher`.
    pub fn follow(&self, line: &str, cursor: usize, launcher: &mut dyn Launcher) -> Resolution {
        let resolution = self.resolve(line, cursor);
        dispatch(&resolution, launcher);
        resolution
    }

    pub fn resolve_token(&self, token: &WikilinkToken) -> Resolution {
        let Some(reference) = sanitize(&token.raw) else {
            return Resolution::unresolved(UnresolvedReason::EmptyAfterSanitization);
        };

        let kind = classify(&reference);
        tracing::debug!(raw = %token.raw, %reference, %kind, "resolving wikilink");

        match kind {
            TargetKind::Note => self.resolve_note(&token.raw),
            TargetKind::Image => self.resolve_image(&token.raw),
            TargetKind::Audio => self.resolve_audio(&token.raw),
        }
    }

    fn resolve_note(&self, raw: &str) -> Resolution {
        let candidates = Candidates::from_output(&self.index.backlinks_to(raw));
        let relative = match self.choose("Open note", candidates) {
            Choice::Chosen(path) => path,
            Choice::None => note_path_from_raw(raw),
            Choice::Cancelled => {
                return Resolution::unresolved(UnresolvedReason::SelectionCancelled);
            }
        };
        Resolution::OpenNote { path: join_root(&self.vault_root, &relative) }
    }

    fn resolve_image(&self, raw: &str) -> Resolution {
        let candidates = Candidates::from_output(&self.index.backlinks_to(raw));
        match self.choose("Show image", candidates) {
            Choice::Chosen(path) => Resolution::ShowImage { path: format!("./{path}") },
            Choice::None => Resolution::unresolved(self.empty_lookup_reason()),
            Choice::Cancelled => Resolution::unresolved(UnresolvedReason::SelectionCancelled),
        }
    }

    fn resolve_audio(&self, raw: &str) -> Resolution {
        let output = self.search.search(&self.audio_root, raw);
        match self.choose("Play", Candidates::from_output(&output)) {
            Choice::Chosen(path) => Resolution::PlayAudio { path },
            Choice::None => Resolution::unresolved(UnresolvedReason::NoCandidates),
            Choice::Cancelled => Resolution::unresolved(UnresolvedReason::SelectionCancelled),
        }
    }

    fn choose(&self, prompt: &str, candidates: Candidates) -> Choice {
        match candidates {
            Candidates::Empty => Choice::None,
            Candidates::Single(path) => Choice::Chosen(path),
            Candidates::Multiple(paths) => {
                tracing::debug!(count = paths.len(), "ambiguous link");
                match self.picker.choose(prompt, &paths) {
                    Some(path) => Choice::Chosen(path),
                    None => Choice::Cancelled,
                }
            }
        }
    }

    fn empty_lookup_reason(&self) -> UnresolvedReason {
        if self.index.is_available() {
            UnresolvedReason::NoCandidates
        } else {
            UnresolvedReason::IndexUnavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexBackend, IndexError};
    use crate::picker::FirstCandidatePicker;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    /// Answers every query with the same text.
    struct Canned(Option<String>);

    impl IndexBackend for Canned {
        fn run(&self, _sql: &str) -> Result<String, IndexError> {
            self.0.clone().ok_or_else(|| IndexError::Missing("index.db".into()))
        }

        fn is_available(&self) -> bool {
            self.0.is_some()
        }
    }

    type Searches = Rc<RefCell<Vec<(PathBuf, String)>>>;

    struct CannedSearch {
        output: String,
        seen: Searches,
    }

    impl FileSearch for CannedSearch {
        fn search(&self, root: &Path, term: &str) -> String {
            self.seen.borrow_mut().push((root.to_path_buf(), term.to_string()));
            self.output.clone()
        }
    }

    struct PickLast;

    impl Picker for PickLast {
        fn select(&self, _prompt: &str, candidates: &[String]) -> Option<usize> {
            Some(candidates.len() - 1)
        }
    }

    struct Declines;

    impl Picker for Declines {
        fn select(&self, _prompt: &str, _candidates: &[String]) -> Option<usize> {
            None
        }
    }

    fn resolver_with(
        index: Option<&str>,
        search: &str,
        picker: Box<dyn Picker>,
    ) -> (Resolver, Searches) {
        let seen = Searches::default();
        let resolver = Resolver::new(
            "/vault",
            "/audio",
            IndexQueries::new(Box::new(Canned(index.map(str::to_string)))),
            Box::new(CannedSearch { output: search.to_string(), seen: seen.clone() }),
            picker,
        );
        (resolver, seen)
    }

    fn resolver(index: Option<&str>, search: &str) -> Resolver {
        resolver_with(index, search, Box::new(FirstCandidatePicker)).0
    }

    #[derive(Default)]
    struct RecordingLauncher {
        calls: Vec<String>,
    }

    impl Launcher for RecordingLauncher {
        fn open_note(&mut self, path: &str) {
            self.calls.push(format!("note {path}"));
        }

        fn view_image(&mut self, path: &str) {
            self.calls.push(format!("image {path}"));
        }

        fn play_audio(&mut self, path: &str) {
            self.calls.push(format!("audio {path}"));
        }
    }

    #[test]
    fn test_no_token_under_cursor() {
        let r = resolver(Some(""), "");
        assert_eq!(
            r.resolve("no links here", 3),
            Resolution::Unresolved { reason: UnresolvedReason::NoTokenUnderCursor }
        );
        assert_eq!(
            r.resolve("[[link]] after", 10),
            Resolution::Unresolved { reason: UnresolvedReason::NoTokenUnderCursor }
        );
    }

    #[test]
    fn test_empty_after_sanitization() {
        let r = resolver(Some(""), "");
        assert_eq!(
            r.resolve("[[#heading]]", 4),
            Resolution::Unresolved { reason: UnresolvedReason::EmptyAfterSanitization }
        );
    }

    #[test]
    fn test_note_without_index_match_falls_back_to_link_text() {
        let r = resolver(Some(""), "");
        assert_eq!(
            r.resolve("see [[My Note]]", 8),
            Resolution::OpenNote { path: "/vault/My Note.md".into() }
        );
    }

    #[test]
    fn test_note_with_md_extension_kept() {
        let r = resolver(Some(""), "");
        assert_eq!(
            r.resolve("[[daily/2024-05-01.md]]", 3),
            Resolution::OpenNote { path: "/vault/daily/2024-05-01.md".into() }
        );
    }

    #[test]
    fn test_unindexed_note_keeps_raw_link_text() {
        let r = resolver(Some(""), "");
        assert_eq!(
            r.resolve("[[Ideas|my ideas]]", 3),
            Resolution::OpenNote { path: "/vault/Ideas|my ideas.md".into() }
        );
        assert_eq!(
            r.resolve("[[Plans#Q3]]", 3),
            Resolution::OpenNote { path: "/vault/Plans#Q3.md".into() }
        );
        assert_eq!(
            r.resolve("[[-Sub.md]]", 3),
            Resolution::OpenNote { path: "/vault/-Sub.md".into() }
        );
    }

    #[test]
    fn test_note_with_missing_index_still_falls_back() {
        let r = resolver(None, "");
        assert_eq!(
            r.resolve("[[Ideas]]", 3),
            Resolution::OpenNote { path: "/vault/Ideas.md".into() }
        );
    }

    #[test]
    fn test_note_single_index_match() {
        let r = resolver(Some("projects/Ideas.md\n"), "");
        assert_eq!(
            r.resolve("[[Ideas|my ideas]]", 3),
            Resolution::OpenNote { path: "/vault/projects/Ideas.md".into() }
        );
    }

    #[test]
    fn test_ambiguous_note_goes_through_picker() {
        let (r, _) = resolver_with(Some("a/Ideas.md\nb/Ideas.md\n"), "", Box::new(PickLast));
        assert_eq!(r.resolve("[[Ideas]]", 3), Resolution::OpenNote { path: "/vault/b/Ideas.md".into() });

        let r = resolver(Some("a/Ideas.md\nb/Ideas.md\n"), "");
        assert_eq!(r.resolve("[[Ideas]]", 3), Resolution::OpenNote { path: "/vault/a/Ideas.md".into() });
    }

    #[test]
    fn test_duplicate_index_rows_are_not_ambiguous() {
        let (r, _) = resolver_with(Some("a/Ideas.md\na/Ideas.md\n"), "", Box::new(Declines));
        assert_eq!(r.resolve("[[Ideas]]", 3), Resolution::OpenNote { path: "/vault/a/Ideas.md".into() });
    }

    #[test]
    fn test_cancelled_selection() {
        let (r, _) = resolver_with(Some("a.md\nb.md\n"), "", Box::new(Declines));
        assert_eq!(
            r.resolve("[[x]]", 2),
            Resolution::Unresolved { reason: UnresolvedReason::SelectionCancelled }
        );
    }

    #[test]
    fn test_image_is_relative_to_working_directory() {
        let r = resolver(Some("imgs/a.png\n"), "");
        let mut launcher = RecordingLauncher::default();

        let resolution = r.follow("![[a.png]]", 4, &mut launcher);
        assert_eq!(resolution, Resolution::ShowImage { path: "./imgs/a.png".into() });
        assert_eq!(launcher.calls, vec!["image ./imgs/a.png"]);
    }

    #[test]
    fn test_image_without_match() {
        let r = resolver(Some(""), "");
        assert_eq!(
            r.resolve("[[a.jpg]]", 3),
            Resolution::Unresolved { reason: UnresolvedReason::NoCandidates }
        );

        let r = resolver(None, "");
        assert_eq!(
            r.resolve("[[a.jpg]]", 3),
            Resolution::Unresolved { reason: UnresolvedReason::IndexUnavailable }
        );
    }

    #[test]
    fn test_uppercase_image_extension_is_audio() {
        let (r, seen) = resolver_with(Some("x.PNG\n"), "", Box::new(FirstCandidatePicker));
        assert_eq!(
            r.resolve("[[x.PNG]]", 3),
            Resolution::Unresolved { reason: UnresolvedReason::NoCandidates }
        );
        assert_eq!(*seen.borrow(), vec![(PathBuf::from("/audio"), "x.PNG".to_string())]);
    }

    #[test]
    fn test_audio_searches_audio_root_with_raw_text() {
        let (r, seen) =
            resolver_with(Some(""), "/audio/talks/intro.mp3\n", Box::new(FirstCandidatePicker));
        let mut launcher = RecordingLauncher::default();

        let resolution = r.follow("[[intro.mp3]]", 5, &mut launcher);
        assert_eq!(resolution, Resolution::PlayAudio { path: "/audio/talks/intro.mp3".into() });
        assert_eq!(launcher.calls, vec!["audio /audio/talks/intro.mp3"]);
        assert_eq!(*seen.borrow(), vec![(PathBuf::from("/audio"), "intro.mp3".to_string())]);
    }

    #[test]
    fn test_audio_with_no_match_is_noop() {
        let r = resolver(Some(""), "");
        let mut launcher = RecordingLauncher::default();

        let resolution = r.follow("[[missing.ogg]]", 4, &mut launcher);
        assert_eq!(resolution, Resolution::Unresolved { reason: UnresolvedReason::NoCandidates });
        assert!(launcher.calls.is_empty());
    }

    #[test]
    fn test_follow_note_dispatches_once() {
        let r = resolver(Some(""), "");
        let mut launcher = RecordingLauncher::default();

        r.follow("[[My Note]]", 3, &mut launcher);
        assert_eq!(launcher.calls, vec!["note /vault/My Note.md"]);
    }

    #[test]
    fn test_resolution_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Resolution::OpenNote { path: "/v/a.md".into() }).unwrap();
        assert_eq!(json, r#"{"kind":"open_note","path":"/v/a.md"}"#);

        let json = serde_json::to_string(&Resolution::Unresolved {
            reason: UnresolvedReason::NoCandidates,
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"unresolved","reason":"no_candidates"}"#);
    }

    #[test]
    fn test_labels_and_reason_messages() {
        insta::assert_snapshot!(
            UnresolvedReason::IndexUnavailable.to_string(),
            @"index not available"
        );
        assert_eq!(Resolution::PlayAudio { path: "x".into() }.label(), "audio");
        assert_eq!(Resolution::ShowImage { path: "x".into() }.path(), Some("x"));
        assert_eq!(
            Resolution::Unresolved { reason: UnresolvedReason::NoCandidates }.path(),
            None
        );
    }
}
