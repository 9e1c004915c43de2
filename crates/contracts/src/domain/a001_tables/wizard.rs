//! Add-row wizard: walks headers one at a time and accumulates a payload.
//!
//! The payload only holds headers the user touched. Typing stores a string,
//! Skip stores an explicit null, and a header never reached stays absent.

use serde_json::{Map, Value};

/// Number of entered values shown in the wizard preview
pub const PREVIEW_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    Submitting,
}

/// Result of a Next or Skip command
#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    /// Moved to the header at this index
    Advanced(usize),
    /// Past the last header: hand this payload to the completion callback
    Submit(Map<String, Value>),
    /// A submission is already pending
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddRowWizard {
    headers: Vec<String>,
    index: usize,
    values: Map<String, Value>,
    phase: WizardPhase,
}

impl AddRowWizard {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            index: 0,
            values: Map::new(),
            phase: WizardPhase::Editing,
        }
    }

    /// Back to the first header with nothing entered.
    pub fn reset(&mut self) {
        self.index = 0;
        self.values.clear();
        self.phase = WizardPhase::Editing;
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    pub fn current_header(&self) -> Option<&str> {
        self.headers.get(self.index).map(String::as_str)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.headers.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0 && !self.is_submitting()
    }

    /// Text for the active input; skipped and untouched headers show "".
    pub fn current_value(&self) -> String {
        self.current_header()
            .and_then(|h| self.values.get(h))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn set_value(&mut self, text: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        if let Some(header) = self.current_header().map(str::to_string) {
            self.values.insert(header, Value::String(text.into()));
        }
    }

    pub fn next(&mut self) -> WizardStep {
        if self.is_submitting() {
            return WizardStep::Ignored;
        }
        self.advance()
    }

    pub fn skip(&mut self) -> WizardStep {
        if self.is_submitting() {
            return WizardStep::Ignored;
        }
        if let Some(header) = self.current_header().map(str::to_string) {
            self.values.insert(header, Value::Null);
        }
        self.advance()
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// The completion callback failed: stay on the same header.
    pub fn submission_failed(&mut self) {
        self.phase = WizardPhase::Editing;
    }

    pub fn payload(&self) -> Map<String, Value> {
        self.values.clone()
    }

    /// Rounded percentage of headers reached, counting the active one.
    pub fn progress_percent(&self) -> u32 {
        if self.headers.is_empty() {
            return 0;
        }
        let reached = (self.index + 1) as f64 / self.headers.len() as f64;
        (reached * 100.0).round() as u32
    }

    /// Step counter shown above the input.
    pub fn step_label(&self) -> String {
        if self.headers.is_empty() {
            return "Aucun champ à saisir".to_string();
        }
        format!("Champ {} sur {}", self.index + 1, self.headers.len())
    }

    /// First entered values in header order, with "(vide)" for blanks.
    pub fn preview(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .filter_map(|h| self.values.get(h).map(|v| (h, v)))
            .take(PREVIEW_LEN)
            .map(|(h, v)| {
                let text = match v {
                    Value::String(s) if !s.is_empty() => s.clone(),
                    _ => "(vide)".to_string(),
                };
                (h.clone(), text)
            })
            .collect()
    }

    fn advance(&mut self) -> WizardStep {
        if self.is_last() {
            self.phase = WizardPhase::Submitting;
            WizardStep::Submit(self.payload())
        } else {
            self.index += 1;
            WizardStep::Advanced(self.index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wizard(headers: &[&str]) -> AddRowWizard {
        AddRowWizard::new(headers.iter().map(|h| h.to_string()).collect())
    }

    #[test]
    fn test_skip_stores_null_and_typed_values_are_kept() {
        let mut w = wizard(&["A", "B", "C"]);

        w.set_value("x");
        assert_eq!(w.next(), WizardStep::Advanced(1));
        assert_eq!(w.skip(), WizardStep::Advanced(2));
        w.set_value("z");

        match w.next() {
            WizardStep::Submit(payload) => {
                assert_eq!(
                    Value::Object(payload),
                    json!({ "A": "x", "B": null, "C": "z" })
                );
            }
            other => panic!("expected submission, got {other:?}"),
        }
        assert!(w.is_submitting());
    }

    #[test]
    fn test_next_does_not_fill_untouched_headers() {
        let mut w = wizard(&["A", "B", "C"]);

        w.next();
        w.set_value("b");
        w.next();

        match w.next() {
            WizardStep::Submit(payload) => {
                assert_eq!(Value::Object(payload), json!({ "B": "b" }));
            }
            other => panic!("expected submission, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_on_last_header_submits() {
        let mut w = wizard(&["A", "B"]);
        w.set_value("a");
        w.next();

        match w.skip() {
            WizardStep::Submit(payload) => {
                assert_eq!(Value::Object(payload), json!({ "A": "a", "B": null }));
            }
            other => panic!("expected submission, got {other:?}"),
        }
    }

    #[test]
    fn test_back_is_disabled_on_first_header() {
        let mut w = wizard(&["A", "B"]);
        assert!(!w.can_go_back());
        assert!(!w.back());

        w.set_value("a");
        w.next();
        assert!(w.back());
        assert_eq!(w.index(), 0);
        assert_eq!(w.current_value(), "a");
    }

    #[test]
    fn test_commands_ignored_while_submitting() {
        let mut w = wizard(&["A"]);
        assert!(matches!(w.next(), WizardStep::Submit(_)));

        assert_eq!(w.next(), WizardStep::Ignored);
        assert_eq!(w.skip(), WizardStep::Ignored);
        w.set_value("late");
        assert!(w.payload().is_empty());
    }

    #[test]
    fn test_failed_submission_returns_to_editing() {
        let mut w = wizard(&["A", "B"]);
        w.next();
        w.set_value("b");
        assert!(matches!(w.next(), WizardStep::Submit(_)));

        w.submission_failed();
        assert!(!w.is_submitting());
        assert_eq!(w.current_header(), Some("B"));
        assert_eq!(w.current_value(), "b");
    }

    #[test]
    fn test_empty_header_list_submits_immediately() {
        let mut w = wizard(&[]);
        assert_eq!(w.current_header(), None);
        assert_eq!(w.progress_percent(), 0);
        assert_eq!(w.next(), WizardStep::Submit(Map::new()));
    }

    #[test]
    fn test_step_label_without_headers_is_neutral() {
        assert_eq!(wizard(&[]).step_label(), "Aucun champ à saisir");

        let mut w = wizard(&["A", "B"]);
        assert_eq!(w.step_label(), "Champ 1 sur 2");
        w.next();
        assert_eq!(w.step_label(), "Champ 2 sur 2");
    }

    #[test]
    fn test_progress_and_preview() {
        let mut w = wizard(&["A", "B", "C", "D", "E", "F"]);
        assert_eq!(w.progress_percent(), 17);

        for (i, text) in ["1", "", "3", "4", "5"].iter().enumerate() {
            if i == 1 {
                w.skip();
            } else {
                w.set_value(*text);
                w.next();
            }
        }

        assert_eq!(w.progress_percent(), 100);
        let preview = w.preview();
        assert_eq!(preview.len(), 4);
        assert_eq!(preview[1], ("B".to_string(), "(vide)".to_string()));
        assert_eq!(preview[3], ("D".to_string(), "4".to_string()));
    }

    #[test]
    fn test_reset_clears_values() {
        let mut w = wizard(&["A", "B"]);
        w.set_value("a");
        w.next();
        w.reset();

        assert_eq!(w.index(), 0);
        assert!(w.payload().is_empty());
    }
}
