//! Choosing one candidate out of several.
//!
//! A [`Picker`] is chosen once, from a [`Capabilities`] descriptor, when the
//! resolver is built. Interactive pickers live in front ends (the CLI uses
//! a fuzzy selector); [`FirstCandidatePicker`] is the non-interactive
//! fallback and simply takes the first candidate.

use std::io::{self, IsTerminal};

use crate::lines::candidate_lines;

/// What the current environment can offer the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// An interactive selector can be shown and answered.
    pub interactive_picker: bool,
}

impl Capabilities {
    /// Interactive only when both stdin and stderr are terminals.
    pub fn detect() -> Self {
        Self { interactive_picker: io::stdin().is_terminal() && io::stderr().is_terminal() }
    }

    pub fn non_interactive() -> Self {
        Self { interactive_picker: false }
    }
}

pub trait Picker {
    /// Index of the chosen candidate, or `None` when nothing was chosen.
    ///
    /// Only called with at least one candidate.
    fn select(&self, prompt: &str, candidates: &[String]) -> Option<usize>;

    /// Offer `candidates`; call `on_chosen` once with the choice.
    ///
    /// No candidates or no selection means no callback.
    fn pick_from(&self, prompt: &str, candidates: &[String], on_chosen: &mut dyn FnMut(&str)) {
        if candidates.is_empty() {
            return;
        }
        if let Some(choice) =
            self.select(prompt, candidates).and_then(|idx| candidates.get(idx))
        {
            on_chosen(choice);
        }
    }

    /// Like [`Picker::pick_from`], with one candidate per non-empty line of
    /// `text`.
    fn pick(&self, prompt: &str, text: &str, on_chosen: &mut dyn FnMut(&str)) {
        self.pick_from(prompt, &candidate_lines(text), on_chosen);
    }

    /// The chosen candidate, if any.
    fn choose(&self, prompt: &str, candidates: &[String]) -> Option<String> {
        let mut chosen = None;
        self.pick_from(prompt, candidates, &mut |c| chosen = Some(c.to_string()));
        chosen
    }
}

/// Always takes the first candidate, without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidatePicker;

impl Picker for FirstCandidatePicker {
    fn select(&self, _prompt: &str, _candidates: &[String]) -> Option<usize> {
        Some(0)
    }
}
