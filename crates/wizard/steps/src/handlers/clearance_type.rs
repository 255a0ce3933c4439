//! Clearance type step: the fiscal-period-end and wind-up dates, and the
//! "same as fiscal period end" checkbox that keeps the wind-up date
//! synced and locked while checked.

use crate::datepicker::{DatePicker, PickerGroup};
use wizard_engine::{StepContext, StepHandler};
use wizard_types::{FieldId, FieldName, FieldValue, StepSnapshot, WizardEvent};

pub const FISCAL_FIELD: &str = "s4q2-field";
pub const WINDUP_FIELD: &str = "s4q3-field";
pub const SAME_AS_CHECKBOX: &str = "s4q3-op1";

/// Handler for the clearance type step.
pub struct ClearanceTypeHandler {
    pickers: PickerGroup,
    windup_locked: bool,
}

impl ClearanceTypeHandler {
    pub fn new() -> Self {
        Self {
            pickers: PickerGroup::new()
                .with_picker(DatePicker::new(FISCAL_FIELD))
                .with_picker(DatePicker::new(WINDUP_FIELD)),
            windup_locked: false,
        }
    }

    /// Whether the wind-up date input is locked to the fiscal date.
    pub fn windup_locked(&self) -> bool {
        self.windup_locked
    }

    pub fn pickers(&self) -> &PickerGroup {
        &self.pickers
    }

    pub fn pickers_mut(&mut self) -> &mut PickerGroup {
        &mut self.pickers
    }

    /// The "same as fiscal period end" checkbox was toggled. Checking
    /// locks the wind-up input and copies the fiscal date into it;
    /// unchecking unlocks it and leaves the value for the user to edit.
    pub fn set_same_as(&mut self, ctx: &mut StepContext<'_>, checked: bool) {
        if let Some(field) = ctx.doc.field_mut(&FieldId::new(SAME_AS_CHECKBOX)) {
            field.checked = checked;
        }
        self.windup_locked = checked;
        if checked {
            self.copy_fiscal_to_windup(ctx);
        }
    }

    fn same_as_checked(ctx: &StepContext<'_>) -> bool {
        ctx.doc
            .field(&FieldId::new(SAME_AS_CHECKBOX))
            .map(|f| f.checked)
            .unwrap_or(false)
    }

    fn fiscal_value(ctx: &StepContext<'_>) -> String {
        ctx.doc
            .field(&FieldId::new(FISCAL_FIELD))
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    fn copy_fiscal_to_windup(&self, ctx: &mut StepContext<'_>) {
        let fiscal = Self::fiscal_value(ctx);
        if let Some(field) = ctx.doc.field_mut(&FieldId::new(WINDUP_FIELD)) {
            field.value = fiscal;
        }
    }
}

impl Default for ClearanceTypeHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl StepHandler for ClearanceTypeHandler {
    fn on_activate(&mut self, ctx: &mut StepContext<'_>) {
        // Restore may have re-checked the box; re-derive the lock from it.
        self.windup_locked = Self::same_as_checked(ctx);
    }

    fn before_leave(&mut self, ctx: &mut StepContext<'_>, snapshot: &mut StepSnapshot) {
        let fiscal = Self::fiscal_value(ctx);
        if Self::same_as_checked(ctx) && !fiscal.is_empty() {
            snapshot.insert(FieldName::new("s4q3"), FieldValue::single(fiscal));
        }
    }

    fn on_event(&mut self, ctx: &mut StepContext<'_>, event: &WizardEvent) {
        if let WizardEvent::DateSelected { field, value } = event {
            if field.as_str() == FISCAL_FIELD && Self::same_as_checked(ctx) {
                if let Some(windup) = ctx.doc.field_mut(&FieldId::new(WINDUP_FIELD)) {
                    windup.value = value.clone();
                }
            }
        }
    }
}
