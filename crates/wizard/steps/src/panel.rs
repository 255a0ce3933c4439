//! Read-only summary panels.
//!
//! A panel is a titled table of label/value rows. Labels come from an
//! explicit positional override list where one is given, otherwise from
//! camelCase humanization of the raw key. Rows with empty values are
//! skipped. A panel may carry edit/delete controls; review panels navigate
//! back to their step instead of emitting an edit event.

use wizard_engine::EventBus;
use wizard_types::WizardEvent;

/// One label/value row of a panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelRow {
    pub label: String,
    pub value: String,
}

/// A titled read-only summary block.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    title: String,
    rows: Vec<PanelRow>,
    edit_index: Option<usize>,
    delete_enabled: bool,
    review_panel: bool,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
            edit_index: None,
            delete_enabled: false,
            review_panel: false,
        }
    }

    /// Build from ordered key/value entries; the label for entry `i` comes
    /// from `labels[i]` when present, otherwise from the humanized key.
    /// Empty values are skipped (label positions still count them).
    pub fn from_entries<K, V>(
        title: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
        labels: &[&str],
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut panel = Self::new(title);
        for (i, (key, value)) in entries.into_iter().enumerate() {
            let value = value.into();
            if value.is_empty() {
                continue;
            }
            let label = labels
                .get(i)
                .map(|l| (*l).to_string())
                .unwrap_or_else(|| humanize_key(&key.into()));
            panel.rows.push(PanelRow { label, value });
        }
        panel
    }

    /// Attach an edit control carrying the given index.
    pub fn editable(mut self, index: usize) -> Self {
        self.edit_index = Some(index);
        self
    }

    /// Attach a delete control (shares the edit index).
    pub fn deletable(mut self) -> Self {
        self.delete_enabled = true;
        self
    }

    /// Mark as a review panel: its edit control navigates to the step
    /// named by the index instead of emitting an edit event.
    pub fn review(mut self) -> Self {
        self.review_panel = true;
        self
    }

    /// Append a row; empty values are dropped.
    pub fn push_row(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.rows.push(PanelRow {
            label: label.into(),
            value,
        });
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    pub fn row_value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }

    /// The edit control was pressed.
    pub fn emit_edit(&self, bus: &mut EventBus) {
        let Some(index) = self.edit_index else {
            return;
        };
        if self.review_panel {
            bus.publish(WizardEvent::NavigateToStep { index });
        } else {
            bus.publish(WizardEvent::EditPanel {
                index,
                title: self.title.clone(),
            });
        }
    }

    /// The delete control was pressed.
    pub fn emit_delete(&self, bus: &mut EventBus) {
        let Some(index) = self.edit_index else {
            return;
        };
        if self.delete_enabled {
            bus.publish(WizardEvent::DeletePanel {
                index,
                title: self.title.clone(),
            });
        }
    }
}

/// Turn a camelCase key into display copy: a space before each word
/// boundary, first letter capitalized, acronym runs left intact.
/// `trustNumber` → "Trust Number", `sin` → "Sin", `SIN` → "SIN".
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() && prev_lower {
            out.push(' ');
        }
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        prev_lower = ch.is_ascii_lowercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("trustNumber"), "Trust Number");
        assert_eq!(humanize_key("name"), "Name");
        assert_eq!(humanize_key("SIN"), "SIN");
    }

    #[test]
    fn test_from_entries_labels_and_fallback() {
        let panel = Panel::from_entries(
            "Trust information on file",
            [("name", "Estate of J. Doe"), ("trustType", "Testamentary")],
            &["Estate of"],
        );
        assert_eq!(panel.rows().len(), 2);
        assert_eq!(panel.rows()[0].label, "Estate of");
        assert_eq!(panel.rows()[1].label, "Trust Type");
    }

    #[test]
    fn test_empty_values_skipped_but_positions_kept() {
        let panel = Panel::from_entries(
            "t",
            [("a", "1"), ("b", ""), ("c", "3")],
            &["First", "Second", "Third"],
        );
        assert_eq!(panel.rows().len(), 2);
        assert_eq!(panel.rows()[1].label, "Third");
        assert_eq!(panel.row_value("Third"), Some("3"));
    }

    #[test]
    fn test_review_edit_navigates() {
        let panel = Panel::new("Eligibility").editable(1).review();
        let mut bus = EventBus::new();
        panel.emit_edit(&mut bus);
        assert_eq!(bus.pop(), Some(WizardEvent::NavigateToStep { index: 1 }));
    }

    #[test]
    fn test_plain_edit_emits_edit_event() {
        let panel = Panel::new("Reps").editable(3);
        let mut bus = EventBus::new();
        panel.emit_edit(&mut bus);
        match bus.pop() {
            Some(WizardEvent::EditPanel { index: 3, title }) => assert_eq!(title, "Reps"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_delete_requires_control() {
        let panel = Panel::new("Reps").editable(2);
        let mut bus = EventBus::new();
        panel.emit_delete(&mut bus);
        assert!(bus.pop().is_none());

        let panel = panel.deletable();
        panel.emit_delete(&mut bus);
        assert!(matches!(
            bus.pop(),
            Some(WizardEvent::DeletePanel { index: 2, .. })
        ));
    }
}
