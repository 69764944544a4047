//! Handling of newline-delimited output from the index and file search.

use std::collections::HashSet;

/// Strip the trailing line break sequence (`\n` or `\r\n`), if any.
///
/// Only the final terminator goes; inner blank lines are left alone.
pub fn strip_line_terminator(text: &str) -> &str {
    text.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(text)
}

/// Non-empty lines of `text`, in order.
pub fn candidate_lines(text: &str) -> Vec<String> {
    text.lines().filter(|line| !line.trim().is_empty()).map(str::to_string).collect()
}

/// Candidate records from tool output, deduplicated keeping first-seen order.
///
/// The index does not guarantee unique rows (one file can be reached
/// through several backlinks), so repeats are dropped here rather than
/// being offered to the picker twice.
pub fn records(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    candidate_lines(strip_line_terminator(text))
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

/// Zero, one or many candidates for a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    Empty,
    Single(String),
    Multiple(Vec<String>),
}

impl Candidates {
    pub fn from_output(text: &str) -> Self {
        Self::from(records(text))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Candidates::Empty)
    }
}

impl From<Vec<String>> for Candidates {
    fn from(mut items: Vec<String>) -> Self {
        match items.len() {
            0 => Candidates::Empty,
            1 => Candidates::Single(items.remove(0)),
            _ => Candidates::Multiple(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_terminator() {
        assert_eq!(strip_line_terminator("a\nb\n"), "a\nb");
        assert_eq!(strip_line_terminator("a\r\n"), "a");
        assert_eq!(strip_line_terminator("a"), "a");
        assert_eq!(strip_line_terminator(""), "");
        // Only one terminator is removed.
        assert_eq!(strip_line_terminator("a\n\n"), "a\n");
    }

    #[test]
    fn test_candidate_lines_skip_blank() {
        assert_eq!(candidate_lines("a.md\n\nb.md\n"), vec!["a.md", "b.md"]);
        assert!(candidate_lines("").is_empty());
        assert!(candidate_lines("\n\n").is_empty());
    }

    #[test]
    fn test_records_deduplicate_in_order() {
        let text = "b.md\na.md\nb.md\r\n";
        assert_eq!(records(text), vec!["b.md", "a.md"]);
    }

    #[test]
    fn test_candidates_from_output() {
        assert_eq!(Candidates::from_output(""), Candidates::Empty);
        assert_eq!(Candidates::from_output("x.md\n"), Candidates::Single("x.md".into()));
        assert_eq!(Candidates::from_output("x.md\nx.md\n"), Candidates::Single("x.md".into()));
        assert_eq!(
            Candidates::from_output("x.md\ny.md\n"),
            Candidates::Multiple(vec!["x.md".into(), "y.md".into()])
        );
    }
}
