//! Fields: the interactive inputs of the wizard forms.
//!
//! Every field carries a stable id (unique across the whole document) and
//! usually a group name shared with its sibling options. Radio and checkbox
//! fields hold a fixed option value and a checked flag; text and select
//! fields hold a free value. A field may reveal one or more regions when it
//! becomes active.

use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Stable identifier of a single input, e.g. `s1q1-op2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group name of a field, shared by mutually-exclusive options, e.g. `s1q1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldName(pub String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a toggleable container region, e.g. `s3q2-fieldset`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Field Kind & Value ───────────────────────────────────────────────

/// The input kind of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text entry (includes dated fields).
    Text,
    /// One option of a mutually-exclusive group.
    Radio,
    /// One option of a multi-select group.
    Checkbox,
    /// Single-select dropdown.
    Select,
}

impl FieldKind {
    /// Radio and checkbox fields carry a checked flag rather than a value.
    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox)
    }
}

/// A captured field value: a single value, or an ordered list for
/// multi-select groups. Serializes flat (string or array), matching the
/// stored snapshot format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(value.into())
    }

    /// The value as a single string, if it is one.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(v) => Some(v),
            Self::Multi(_) => None,
        }
    }

    /// The value as an ordered list, if it is one.
    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            Self::Single(_) => None,
            Self::Multi(v) => Some(v),
        }
    }

    /// Whether `candidate` matches this value: equality for single values,
    /// membership for lists. Used when repopulating checkable fields.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Single(v) => v == candidate,
            Self::Multi(vs) => vs.iter().any(|v| v == candidate),
        }
    }
}

// ── Field ────────────────────────────────────────────────────────────

/// One interactive input of a step form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Unique identifier across the whole document.
    pub id: FieldId,
    /// Group name; `None` for an ungrouped input (no sibling cascade).
    pub name: Option<FieldName>,
    /// Input kind.
    pub kind: FieldKind,
    /// For checkable kinds: the fixed option value. Otherwise the current entry.
    pub value: String,
    /// Checked flag; only meaningful for checkable kinds.
    pub checked: bool,
    /// Human-readable question text, used by the review step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Regions revealed when this field is active.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reveals: Vec<RegionId>,
}

impl Field {
    /// A free-text input.
    pub fn text(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FieldKind::Text, "")
    }

    /// One radio option with its fixed value.
    pub fn radio(
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(id, name, FieldKind::Radio, value)
    }

    /// One checkbox option with its fixed value.
    pub fn checkbox(
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(id, name, FieldKind::Checkbox, value)
    }

    /// A single-select dropdown.
    pub fn select(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FieldKind::Select, "")
    }

    fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: FieldKind,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: FieldId::new(id),
            name: Some(FieldName::new(name)),
            kind,
            value: value.into(),
            checked: false,
            label: None,
            reveals: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add a region this field reveals when active.
    pub fn with_reveal(mut self, target: impl Into<String>) -> Self {
        self.reveals.push(RegionId::new(target));
        self
    }

    /// Detach the field from any group; no sibling cascade applies to it.
    pub fn without_group(mut self) -> Self {
        self.name = None;
        self
    }

    /// Whether the field is in its "active" state: checked for checkable
    /// kinds, a non-empty selection for selects. Text fields never reveal.
    pub fn is_active(&self) -> bool {
        match self.kind {
            FieldKind::Radio | FieldKind::Checkbox => self.checked,
            FieldKind::Select => !self.value.is_empty(),
            FieldKind::Text => false,
        }
    }

    /// Reset the field to empty/unchecked. The fixed option value of
    /// checkable fields is kept; only the checked flag drops.
    pub fn clear(&mut self) {
        if self.kind.is_checkable() {
            self.checked = false;
        } else {
            self.value.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_ids_display() {
        assert_eq!(format!("{}", FieldId::new("s1q1-op2")), "s1q1-op2");
        assert_eq!(format!("{}", FieldName::new("s1q1")), "s1q1");
        assert_eq!(format!("{}", RegionId::new("s1q2-fieldset")), "s1q2-fieldset");
    }

    #[test]
    fn test_value_matches() {
        assert!(FieldValue::single("Yes").matches("Yes"));
        assert!(!FieldValue::single("Yes").matches("No"));

        let multi = FieldValue::Multi(vec!["a".into(), "b".into()]);
        assert!(multi.matches("b"));
        assert!(!multi.matches("c"));
    }

    #[test]
    fn test_value_serializes_flat() {
        let single = serde_json::to_value(FieldValue::single("2024-01-31")).unwrap();
        assert_eq!(single, serde_json::json!("2024-01-31"));

        let multi = serde_json::to_value(FieldValue::Multi(vec!["x".into()])).unwrap();
        assert_eq!(multi, serde_json::json!(["x"]));
    }

    #[test]
    fn test_active_state_per_kind() {
        let mut radio = Field::radio("q-op1", "q", "Yes");
        assert!(!radio.is_active());
        radio.checked = true;
        assert!(radio.is_active());

        let mut select = Field::select("role", "role");
        assert!(!select.is_active());
        select.value = "Trustee".into();
        assert!(select.is_active());

        let mut text = Field::text("fname", "fname");
        text.value = "Ann".into();
        assert!(!text.is_active());
    }

    #[test]
    fn test_clear_keeps_option_value() {
        let mut checkbox = Field::checkbox("q-op1", "q", "Executor");
        checkbox.checked = true;
        checkbox.clear();
        assert!(!checkbox.checked);
        assert_eq!(checkbox.value, "Executor");

        let mut text = Field::text("fname", "fname");
        text.value = "Ann".into();
        text.clear();
        assert!(text.value.is_empty());
    }

    #[test]
    fn test_without_group() {
        let field = Field::checkbox("lone", "lone", "On").without_group();
        assert!(field.name.is_none());
    }
}
