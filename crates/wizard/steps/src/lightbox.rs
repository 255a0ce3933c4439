//! The modal add/edit form.
//!
//! A lightbox owns a small set of named inputs, an open flag and an
//! optional edit index. The add trigger opens it blank; the edit path
//! populates it first. Submitting gathers every named value into one
//! payload and announces it on the bus; the edit index is left in place
//! so the consumer of the submission can tell add from edit, and is
//! cleared by the consumer (or by a plain close).

use std::collections::BTreeMap;
use wizard_engine::EventBus;
use wizard_types::{FieldName, WizardEvent};

/// A modal form with named inputs.
#[derive(Clone, Debug, Default)]
pub struct FormLightbox {
    id: String,
    fields: Vec<(FieldName, String)>,
    open: bool,
    edit_index: Option<usize>,
}

impl FormLightbox {
    pub fn new<S: Into<String>>(id: impl Into<String>, field_names: impl IntoIterator<Item = S>) -> Self {
        Self {
            id: id.into(),
            fields: field_names
                .into_iter()
                .map(|n| (FieldName::new(n), String::new()))
                .collect(),
            open: false,
            edit_index: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open without clearing (the edit path populates first; the add
    /// trigger clears explicitly).
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close and forget any pending edit.
    pub fn close(&mut self) {
        self.open = false;
        self.edit_index = None;
    }

    /// Reset every input to empty.
    pub fn clear(&mut self) {
        for (_, value) in &mut self.fields {
            value.clear();
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set one input; unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some((_, slot)) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Fill matching inputs from a prior record (the edit path).
    pub fn populate(&mut self, data: impl IntoIterator<Item = (FieldName, String)>) {
        for (name, value) in data {
            self.set_field(name.as_str(), value);
        }
    }

    pub fn set_edit_index(&mut self, index: usize) {
        self.edit_index = Some(index);
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.edit_index
    }

    pub fn clear_edit_index(&mut self) {
        self.edit_index = None;
    }

    /// Gather every named value and announce the submission. The lightbox
    /// closes; the edit index survives until its consumer clears it.
    pub fn submit(&mut self, bus: &mut EventBus) {
        let form_data: BTreeMap<FieldName, String> = self
            .fields
            .iter()
            .map(|(n, v)| (n.clone(), v.clone()))
            .collect();
        bus.publish(WizardEvent::LightboxSubmitted {
            lightbox_id: self.id.clone(),
            form_data,
        });
        self.open = false;
    }
}
