//! The dynamic row table backing the representative list.
//!
//! Rows keep insertion order; editing replaces in place; deleting removes
//! the row, re-indexes the remainder contiguously and announces the
//! deletion on the bus. An empty table shows a placeholder row.

use serde_json::Value;
use wizard_engine::EventBus;
use wizard_types::WizardEvent;

/// A table of JSON rows with add/edit/delete controls.
#[derive(Clone, Debug, Default)]
pub struct RowTable {
    id: String,
    placeholder: String,
    rows: Vec<Value>,
}

impl RowTable {
    pub fn new(id: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            placeholder: placeholder.into(),
            rows: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The placeholder row shown while the table is empty.
    pub fn placeholder_row(&self) -> Option<&str> {
        self.rows.is_empty().then_some(self.placeholder.as_str())
    }

    /// Append a row at the end.
    pub fn add_row(&mut self, row: Value) {
        self.rows.push(row);
    }

    /// Replace the row at `index` in place.
    pub fn set_row(&mut self, index: usize, row: Value) -> bool {
        match self.rows.get_mut(index) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    /// Replace the whole row set (re-derivation from stored records).
    pub fn set_rows(&mut self, rows: Vec<Value>) {
        self.rows = rows;
    }

    /// Remove the row at `index`; later rows shift down to stay
    /// contiguous. Announces the deletion.
    pub fn delete_row(&mut self, index: usize, bus: &mut EventBus) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        bus.publish(WizardEvent::RowDeleted);
        true
    }

    /// The edit control of the row at `index` was pressed.
    pub fn emit_edit(&self, index: usize, bus: &mut EventBus) -> bool {
        let Some(row) = self.rows.get(index) else {
            return false;
        };
        bus.publish(WizardEvent::EditRow {
            table_id: self.id.clone(),
            index,
            row: row.clone(),
        });
        true
    }
}
