//! The visibility engine: reactive show/hide rules over the form document.
//!
//! A field change triggers, in order:
//!
//! 1. a sibling group reset — every reveal target of every field sharing
//!    the changed field's group name is hidden, so exactly one winner per
//!    mutually-exclusive group can reveal its targets;
//! 2. the changed field reveals its own targets, if it is active;
//! 3. hiding cascades into nested dependent targets, clearing field values
//!    as it goes — a hidden field must never retain stale data;
//! 4. if the changed field's own top-level container ended up hidden,
//!    every later question container in the step sequence is force-hidden
//!    and cleared, because an earlier altering choice invalidates
//!    everything conditionally built on it downstream. Interleaved notice
//!    blocks are skipped; their visibility is driven by step handlers.
//!
//! A field with no group name only affects its own targets. A reveal
//! target that resolves nowhere is a warning, not an error; the remaining
//! targets are still processed.

use std::collections::BTreeSet;
use std::collections::VecDeque;
use wizard_types::{FieldId, FormDocument, RegionId};

/// What one field change did to the document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityOutcome {
    /// Regions revealed by the changed field.
    pub revealed: Vec<RegionId>,
    /// Regions hidden (group reset, cascade, downstream siblings).
    pub hidden: Vec<RegionId>,
    /// Fields cleared while hiding.
    pub cleared: Vec<FieldId>,
    /// Reveal targets that resolved nowhere in the document.
    pub missing: Vec<RegionId>,
}

impl VisibilityOutcome {
    /// Whether the document's structure changed (the step controller
    /// re-measures the active step's content when it did).
    pub fn changed(&self) -> bool {
        !self.revealed.is_empty() || !self.hidden.is_empty()
    }
}

/// Evaluates field-level show/hide rules as inputs change.
#[derive(Clone, Debug, Default)]
pub struct VisibilityEngine;

impl VisibilityEngine {
    pub fn new() -> Self {
        Self
    }

    /// React to a change of the given field. Unknown field ids are logged
    /// and ignored.
    pub fn on_field_change(&self, doc: &mut FormDocument, field_id: &FieldId) -> VisibilityOutcome {
        let mut outcome = VisibilityOutcome::default();

        let Some(field) = doc.field(field_id) else {
            tracing::warn!(field = %field_id, "change for unknown field ignored");
            return outcome;
        };
        let group = field.name.clone();
        let own_reveals = field.reveals.clone();
        let is_active = field.is_active();
        let step = doc.step_of_field(field_id);

        let mut visited: BTreeSet<RegionId> = BTreeSet::new();

        // Sibling group reset: hide every target any group member reveals.
        if let Some(group) = &group {
            let mut group_targets: Vec<RegionId> = Vec::new();
            for form in &doc.forms {
                for sibling in form.fields_named(group) {
                    group_targets.extend(sibling.reveals.iter().cloned());
                }
            }
            for target in group_targets {
                self.hide_with_subfields(doc, target, &mut visited, &mut outcome);
            }
        }

        // The winner reveals its own targets. Values cleared during the
        // reset stay cleared; revealing never restores them.
        if is_active {
            for target in &own_reveals {
                match doc.region_mut(target) {
                    Some(region) => {
                        region.hidden = false;
                        outcome.revealed.push(target.clone());
                    }
                    None => {
                        tracing::warn!(region = %target, "reveal target not found, skipping");
                        outcome.missing.push(target.clone());
                    }
                }
            }
        }

        // Downstream siblings: a hidden container invalidates everything
        // after it in the step's sequence.
        if group.is_some() {
            if let Some(form) = step.and_then(|s| doc.form(s)) {
                if let Some(pos) = form.position_of_field(field_id) {
                    if form.regions[pos].hidden {
                        // Only question fieldsets are invalidated; alert
                        // blocks keep their own show/hide logic.
                        let later: Vec<RegionId> = form.regions[pos + 1..]
                            .iter()
                            .filter(|r| !r.notice)
                            .map(|r| r.id.clone())
                            .collect();
                        for id in later {
                            self.hide_with_subfields(doc, id, &mut visited, &mut outcome);
                        }
                    }
                }
            }
        }

        outcome
    }

    /// Hide a region and everything conditionally dependent on it: clear
    /// every contained field, then follow the reveal targets of those
    /// fields into nested dependents. Iterative walk with a visited set,
    /// so shared targets are processed once.
    fn hide_with_subfields(
        &self,
        doc: &mut FormDocument,
        start: RegionId,
        visited: &mut BTreeSet<RegionId>,
        outcome: &mut VisibilityOutcome,
    ) {
        let mut work: VecDeque<RegionId> = VecDeque::new();
        work.push_back(start);

        while let Some(id) = work.pop_front() {
            if !visited.insert(id.clone()) {
                continue;
            }
            let Some(region) = doc.region_mut(&id) else {
                tracing::warn!(region = %id, "hide target not found, skipping");
                outcome.missing.push(id);
                continue;
            };
            region.hidden = true;
            region.clear_fields(&mut outcome.cleared);

            let mut nested: Vec<RegionId> = Vec::new();
            region.collect_reveals(&mut nested);
            outcome.hidden.push(id);
            work.extend(nested);
        }
    }
}
