//! The cross-component event vocabulary.
//!
//! All cross-component signaling goes through one typed channel: a producer
//! publishes fire-and-forget, consumers run synchronously in registration
//! order. Most events have exactly one producer and one consumer; the enum
//! keeps the full payload contract in one place.

use crate::field::{FieldId, FieldName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An event on the wizard's in-process bus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WizardEvent {
    /// A store key was written.
    DataUpdated {
        key: String,
        data: serde_json::Value,
    },
    /// A modal form was submitted with its gathered named values.
    LightboxSubmitted {
        lightbox_id: String,
        form_data: BTreeMap<FieldName, String>,
    },
    /// A table row's edit control was pressed.
    EditRow {
        table_id: String,
        index: usize,
        row: serde_json::Value,
    },
    /// A table row was deleted (the table already re-indexed itself).
    RowDeleted,
    /// A review panel asked to reopen a step.
    NavigateToStep { index: usize },
    /// A summary panel's edit control was pressed.
    EditPanel { index: usize, title: String },
    /// A summary panel's delete control was pressed.
    DeletePanel { index: usize, title: String },
    /// The date picker wrote a value into a field.
    DateSelected { field: FieldId, value: String },
}

impl WizardEvent {
    /// Stable event name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DataUpdated { .. } => "dataUpdated",
            Self::LightboxSubmitted { .. } => "lightboxSubmitted",
            Self::EditRow { .. } => "editRowEvent",
            Self::RowDeleted => "rowDeleted",
            Self::NavigateToStep { .. } => "navigateToStep",
            Self::EditPanel { .. } => "editPanelEvent",
            Self::DeletePanel { .. } => "deletePanelEvent",
            Self::DateSelected { .. } => "dateSelected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(WizardEvent::RowDeleted.name(), "rowDeleted");
        assert_eq!(
            WizardEvent::NavigateToStep { index: 2 }.name(),
            "navigateToStep"
        );
    }

    #[test]
    fn test_lightbox_payload_round_trip() {
        let mut form_data = BTreeMap::new();
        form_data.insert(FieldName::new("s3-repfname"), "Ann".to_string());
        let event = WizardEvent::LightboxSubmitted {
            lightbox_id: "addlegalrep-lightbox".into(),
            form_data,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: WizardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
