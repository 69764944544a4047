//! Fuzzy selection for ambiguous links.

use dialoguer::theme::ColorfulTheme;
use dialoguer::FuzzySelect;
use tracing::warn;
use vaultnav_core::{Capabilities, FirstCandidatePicker, Picker};

/// Presents candidates with `dialoguer`'s fuzzy selector on stderr.
pub struct InteractivePicker;

impl Picker for InteractivePicker {
    fn select(&self, prompt: &str, candidates: &[String]) -> Option<usize> {
        match FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(candidates)
            .default(0)
            .interact_opt()
        {
            Ok(choice) => choice,
            Err(e) => {
                warn!("Selector error: {}", e);
                None
            }
        }
    }
}

pub fn select_picker(caps: Capabilities) -> Box<dyn Picker> {
    if caps.interactive_picker {
        Box::new(InteractivePicker)
    } else {
        Box::new(FirstCandidatePicker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_takes_first() {
        let picker = select_picker(Capabilities::non_interactive());
        let candidates = vec!["a.md".to_string(), "b.md".to_string()];
        assert_eq!(picker.choose("Open", &candidates).as_deref(), Some("a.md"));
    }
}
