//! Cursor-aware wikilink scanning.

use std::sync::LazyLock;

use regex::Regex;

// [[content]] where content holds no brackets and may be empty.
static WIKILINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[^\[\]]*\]\]").unwrap());

/// A `[[...]]` span found on a single line.
///
/// Offsets are 0-based character positions, half-open: `start` is the
/// index of the first `[`, `end` is one past the final `]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikilinkToken {
    /// Text between the delimiters, exactly as written.
    pub raw: String,
    pub start: usize,
    pub end: usize,
}

impl WikilinkToken {
    /// Whether `cursor` binds to this span.
    ///
    /// The cursor must sit past the opening `[[` and no further than the
    /// last `]`. A cursor on either opening bracket does not bind.
    pub fn contains(&self, cursor: usize) -> bool {
        cursor >= self.start + 2 && cursor < self.end
    }
}

/// Find the wikilink whose span contains `cursor` (a 0-based char offset).
///
/// Spans are examined left to right and never overlap, so when two spans
/// could qualify the textually earlier one wins.
pub fn find_wikilink_at_cursor(line: &str, cursor: usize) -> Option<WikilinkToken> {
    if !line.contains("[[") {
        return None;
    }
    scan(line).find(|token| token.contains(cursor))
}

/// All wikilink spans on a line, in order.
pub fn find_wikilinks(line: &str) -> Vec<WikilinkToken> {
    scan(line).collect()
}

fn scan(line: &str) -> impl Iterator<Item = WikilinkToken> + '_ {
    // Regex offsets are bytes; keep a running char count so each span is
    // converted without rescanning the line from the start.
    let mut seen_bytes = 0;
    let mut seen_chars = 0;

    WIKILINK_RE.find_iter(line).map(move |m| {
        let span = m.as_str();
        let raw = &span[2..span.len() - 2];

        seen_chars += line[seen_bytes..m.start()].chars().count();
        let start = seen_chars;
        let end = start + span.chars().count();
        seen_bytes = m.end();
        seen_chars = end;

        WikilinkToken { raw: raw.to_string(), start, end }
    })
}
