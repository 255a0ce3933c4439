//! The disqualification evaluator.
//!
//! A fixed collection of condition sets, each a set of field ids. The user
//! is "out" if every member of at least one set is simultaneously checked.
//! The check reads the whole document's checked inputs, not just the
//! active step's: a disqualifying answer given on an earlier step still
//! counts after moving on.
//!
//! The evaluator is pure — no state beyond the static condition sets — so
//! re-running it after every field change is idempotent.

use std::collections::BTreeSet;
use wizard_types::{FieldId, FormDocument};

/// OR'ed sets of AND'ed disqualifying field ids.
#[derive(Clone, Debug, Default)]
pub struct DisqualificationEvaluator {
    conditions: Vec<BTreeSet<FieldId>>,
}

impl DisqualificationEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one condition set: the user is out when ALL of these ids are
    /// checked at once.
    pub fn with_condition<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions
            .push(ids.into_iter().map(|s| FieldId::new(s)).collect());
        self
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the current document state disqualifies the user.
    pub fn is_out(&self, doc: &FormDocument) -> bool {
        let checked: BTreeSet<FieldId> = doc.checked_ids().into_iter().collect();
        self.conditions.iter().any(|set| set.is_subset(&checked))
    }
}
