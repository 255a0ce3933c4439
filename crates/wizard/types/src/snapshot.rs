//! Step snapshots: the field values captured when leaving a step.
//!
//! A snapshot is a flat mapping of group name to value, one per step,
//! persisted under `stepData_<N>`. Snapshots are independent of each other;
//! a later step that needs an earlier step's data reads that snapshot
//! explicitly.

use crate::document::StepForm;
use crate::field::{FieldKind, FieldName, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Captured field-name → value mapping for one step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepSnapshot {
    values: BTreeMap<FieldName, FieldValue>,
}

impl StepSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gather the current values of every field in the form, per its kind:
    /// the checked radio's value, the ordered list of checked checkbox
    /// values, or the raw entry for everything else. Hidden fields take
    /// part too; the visibility cascade guarantees they were cleared, so
    /// they contribute empty entries rather than stale data.
    pub fn capture(form: &StepForm) -> Self {
        let mut snapshot = Self::new();
        form.each_field(&mut |field| {
            let Some(name) = field.name.clone() else {
                return;
            };
            match field.kind {
                FieldKind::Radio => {
                    if field.checked {
                        snapshot
                            .values
                            .insert(name, FieldValue::single(&field.value));
                    }
                }
                FieldKind::Checkbox => {
                    if field.checked {
                        match snapshot.values.entry(name).or_insert_with(|| {
                            FieldValue::Multi(Vec::new())
                        }) {
                            FieldValue::Multi(list) => list.push(field.value.clone()),
                            FieldValue::Single(_) => {}
                        }
                    }
                }
                FieldKind::Text | FieldKind::Select => {
                    snapshot
                        .values
                        .insert(name, FieldValue::single(&field.value));
                }
            }
        });
        snapshot
    }

    /// Repopulate a form from this snapshot: check radios/checkboxes whose
    /// option value matches, set the raw value of everything else. Names
    /// absent from the snapshot or not found in the form are skipped.
    pub fn apply_to(&self, form: &mut StepForm) {
        for region in &mut form.regions {
            region.each_field_mut(&mut |field| {
                let Some(name) = field.name.as_ref() else {
                    return;
                };
                let Some(value) = self.values.get(name) else {
                    return;
                };
                if field.kind.is_checkable() {
                    if value.matches(&field.value) {
                        field.checked = true;
                    }
                } else if let Some(v) = value.as_single() {
                    field.value = v.to_string();
                }
            });
        }
    }

    pub fn insert(&mut self, name: FieldName, value: FieldValue) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &FieldName) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Single-string accessor, the common case for review rendering.
    pub fn get_single(&self, name: &str) -> Option<&str> {
        self.values
            .get(&FieldName::new(name))
            .and_then(FieldValue::as_single)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &FieldValue)> {
        self.values.iter()
    }
}
