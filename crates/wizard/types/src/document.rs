//! The form document: the tree of regions and fields the wizard operates on.
//!
//! Each step owns one form, a form is an ordered sequence of regions
//! (question fieldsets, alert blocks), and regions nest. Visibility rules
//! reveal and hide regions; hiding a region clears every field inside it.
//!
//! Lookups by field id, group name and region id search the whole document,
//! because visibility targets and disqualification triggers are not scoped
//! to the active step.

use crate::field::{Field, FieldId, FieldName, RegionId};
use serde::{Deserialize, Serialize};

// ── Region ───────────────────────────────────────────────────────────

/// A toggleable container: a fieldset, alert block or wrapper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Unique identifier across the whole document.
    pub id: RegionId,
    /// Whether the region is currently hidden.
    pub hidden: bool,
    /// Marks an informational block (alert, computed copy) rather than a
    /// question fieldset; the downstream invalidation pass skips these.
    #[serde(default)]
    pub notice: bool,
    /// Display copy for alert/notice regions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fields directly inside this region.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    /// Nested regions, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Region>,
}

impl Region {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: RegionId::new(id),
            hidden: false,
            notice: false,
            text: None,
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Start the region hidden (revealed later by a visibility rule).
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark the region informational rather than a question fieldset.
    pub fn notice(mut self) -> Self {
        self.notice = true;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_child(mut self, child: Region) -> Self {
        self.children.push(child);
        self
    }

    /// Find a field by id anywhere in this subtree.
    pub fn find_field(&self, id: &FieldId) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| &f.id == id)
            .or_else(|| self.children.iter().find_map(|c| c.find_field(id)))
    }

    pub fn find_field_mut(&mut self, id: &FieldId) -> Option<&mut Field> {
        if let Some(pos) = self.fields.iter().position(|f| &f.id == id) {
            return self.fields.get_mut(pos);
        }
        self.children.iter_mut().find_map(|c| c.find_field_mut(id))
    }

    /// Find a region by id in this subtree (including self).
    pub fn find_region(&self, id: &RegionId) -> Option<&Region> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_region(id))
    }

    pub fn find_region_mut(&mut self, id: &RegionId) -> Option<&mut Region> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_region_mut(id))
    }

    /// Whether the subtree contains the given field.
    pub fn contains_field(&self, id: &FieldId) -> bool {
        self.find_field(id).is_some()
    }

    /// Visit every field in this subtree in display order.
    pub fn each_field(&self, visit: &mut impl FnMut(&Field)) {
        for field in &self.fields {
            visit(field);
        }
        for child in &self.children {
            child.each_field(visit);
        }
    }

    pub fn each_field_mut(&mut self, visit: &mut impl FnMut(&mut Field)) {
        for field in &mut self.fields {
            visit(field);
        }
        for child in &mut self.children {
            child.each_field_mut(visit);
        }
    }

    /// Reset every field in this subtree, recording what was cleared.
    pub fn clear_fields(&mut self, cleared: &mut Vec<FieldId>) {
        self.each_field_mut(&mut |field| {
            field.clear();
            cleared.push(field.id.clone());
        });
    }

    /// Collect the reveal targets of every field in this subtree; the
    /// visibility cascade follows these into nested dependents.
    pub fn collect_reveals(&self, out: &mut Vec<RegionId>) {
        self.each_field(&mut |field| out.extend(field.reveals.iter().cloned()));
    }

    /// Structural size of the visible part of this subtree: one unit per
    /// visible region plus one per field it shows. Drives the step
    /// controller's content measurement.
    pub fn visible_extent(&self) -> usize {
        if self.hidden {
            return 0;
        }
        1 + self.fields.len()
            + self
                .children
                .iter()
                .map(Region::visible_extent)
                .sum::<usize>()
    }
}

// ── Step Form ────────────────────────────────────────────────────────

/// The form region owned by one step: an ordered sequence of top-level
/// sibling regions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepForm {
    /// Ordinal of the owning step.
    pub step: usize,
    /// Top-level regions, in display order.
    pub regions: Vec<Region>,
}

impl StepForm {
    pub fn new(step: usize) -> Self {
        Self {
            step,
            regions: Vec::new(),
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    /// Index within the sibling sequence of the top-level region that
    /// contains the given field.
    pub fn position_of_field(&self, id: &FieldId) -> Option<usize> {
        self.regions.iter().position(|r| r.contains_field(id))
    }

    /// Visit every field of this form in display order.
    pub fn each_field(&self, visit: &mut impl FnMut(&Field)) {
        for region in &self.regions {
            region.each_field(visit);
        }
    }

    /// All fields of this form sharing the given group name.
    pub fn fields_named(&self, name: &FieldName) -> Vec<&Field> {
        fn walk<'a>(region: &'a Region, name: &FieldName, out: &mut Vec<&'a Field>) {
            for field in &region.fields {
                if field.name.as_ref() == Some(name) {
                    out.push(field);
                }
            }
            for child in &region.children {
                walk(child, name, out);
            }
        }
        let mut out = Vec::new();
        for region in &self.regions {
            walk(region, name, &mut out);
        }
        out
    }
}

// ── Form Document ────────────────────────────────────────────────────

/// All step forms of the wizard, plus document-wide lookups.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    pub forms: Vec<StepForm>,
}

impl FormDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: StepForm) -> Self {
        self.forms.push(form);
        self
    }

    pub fn form(&self, step: usize) -> Option<&StepForm> {
        self.forms.iter().find(|f| f.step == step)
    }

    pub fn form_mut(&mut self, step: usize) -> Option<&mut StepForm> {
        self.forms.iter_mut().find(|f| f.step == step)
    }

    /// Find a field by id anywhere in the document.
    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.forms
            .iter()
            .flat_map(|f| f.regions.iter())
            .find_map(|r| r.find_field(id))
    }

    pub fn field_mut(&mut self, id: &FieldId) -> Option<&mut Field> {
        self.forms
            .iter_mut()
            .flat_map(|f| f.regions.iter_mut())
            .find_map(|r| r.find_field_mut(id))
    }

    /// Find a region by id anywhere in the document.
    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.forms
            .iter()
            .flat_map(|f| f.regions.iter())
            .find_map(|r| r.find_region(id))
    }

    pub fn region_mut(&mut self, id: &RegionId) -> Option<&mut Region> {
        self.forms
            .iter_mut()
            .flat_map(|f| f.regions.iter_mut())
            .find_map(|r| r.find_region_mut(id))
    }

    /// The step owning the given field.
    pub fn step_of_field(&self, id: &FieldId) -> Option<usize> {
        self.forms
            .iter()
            .find(|f| f.regions.iter().any(|r| r.contains_field(id)))
            .map(|f| f.step)
    }

    /// Ids of every checked input anywhere in the document. This is the
    /// input to the disqualification check: triggers from earlier steps
    /// still count.
    pub fn checked_ids(&self) -> Vec<FieldId> {
        let mut out = Vec::new();
        for form in &self.forms {
            form.each_field(&mut |f| {
                if f.kind.is_checkable() && f.checked {
                    out.push(f.id.clone());
                }
            });
        }
        out
    }

    /// Visible structural extent of one step's form.
    pub fn visible_extent(&self, step: usize) -> usize {
        self.form(step)
            .map(|f| f.regions.iter().map(Region::visible_extent).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn make_doc() -> FormDocument {
        FormDocument::new().with_form(
            StepForm::new(1)
                .with_region(
                    Region::new("s1q1-fieldset")
                        .with_field(Field::radio("s1q1-op1", "s1q1", "Yes").with_reveal("s1q2-fieldset"))
                        .with_field(Field::radio("s1q1-op2", "s1q1", "No")),
                )
                .with_region(
                    Region::new("s1q2-fieldset")
                        .hidden()
                        .with_field(Field::radio("s1q2-op1", "s1q2", "Yes"))
                        .with_child(
                            Region::new("s1q2-extra")
                                .hidden()
                                .with_field(Field::text("s1q2-detail", "s1q2-detail")),
                        ),
                ),
        )
    }

    #[test]
    fn test_field_lookup() {
        let doc = make_doc();
        let field = doc.field(&FieldId::new("s1q2-detail")).unwrap();
        assert_eq!(field.kind, FieldKind::Text);
        assert!(doc.field(&FieldId::new("nope")).is_none());
    }

    #[test]
    fn test_nested_region_lookup() {
        let doc = make_doc();
        assert!(doc.region(&RegionId::new("s1q2-extra")).is_some());
        assert!(doc.region(&RegionId::new("missing")).is_none());
    }

    #[test]
    fn test_step_of_field() {
        let doc = make_doc();
        assert_eq!(doc.step_of_field(&FieldId::new("s1q1-op2")), Some(1));
        assert_eq!(doc.step_of_field(&FieldId::new("nope")), None);
    }

    #[test]
    fn test_checked_ids_document_wide() {
        let mut doc = make_doc();
        assert!(doc.checked_ids().is_empty());

        doc.field_mut(&FieldId::new("s1q1-op2")).unwrap().checked = true;
        doc.field_mut(&FieldId::new("s1q2-op1")).unwrap().checked = true;
        let checked = doc.checked_ids();
        assert_eq!(checked.len(), 2);
        assert!(checked.contains(&FieldId::new("s1q1-op2")));
    }

    #[test]
    fn test_clear_fields_recurses() {
        let mut doc = make_doc();
        doc.field_mut(&FieldId::new("s1q2-op1")).unwrap().checked = true;
        doc.field_mut(&FieldId::new("s1q2-detail")).unwrap().value = "x".into();

        let mut cleared = Vec::new();
        doc.region_mut(&RegionId::new("s1q2-fieldset"))
            .unwrap()
            .clear_fields(&mut cleared);

        assert_eq!(cleared.len(), 2);
        assert!(!doc.field(&FieldId::new("s1q2-op1")).unwrap().checked);
        assert!(doc.field(&FieldId::new("s1q2-detail")).unwrap().value.is_empty());
    }

    #[test]
    fn test_position_of_field() {
        let doc = make_doc();
        let form = doc.form(1).unwrap();
        assert_eq!(form.position_of_field(&FieldId::new("s1q1-op1")), Some(0));
        assert_eq!(form.position_of_field(&FieldId::new("s1q2-detail")), Some(1));
    }

    #[test]
    fn test_visible_extent_ignores_hidden() {
        let mut doc = make_doc();
        let before = doc.visible_extent(1);
        doc.region_mut(&RegionId::new("s1q2-fieldset")).unwrap().hidden = false;
        assert!(doc.visible_extent(1) > before);
    }
}
