//! Representatives step.
//!
//! Two paths by privilege level. Standard users build the representative
//! list themselves through the add/edit lightbox and the row table; until
//! they add one, a "no representatives" alert shows. Elevated users
//! arrive with one pre-populated record rendered as an "on file" panel,
//! with editable role/phone/email sub-fields synced back into the record
//! when the step is left.
//!
//! The mailing-address notice always names the deceased's address; its
//! lead-in copy switches once at least one representative exists.

use super::{load_or_default, set_region_hidden, set_region_text};
use crate::lightbox::FormLightbox;
use crate::panel::Panel;
use crate::table::RowTable;
use serde_json::json;
use std::collections::BTreeMap;
use wizard_engine::{StepContext, StepHandler};
use wizard_store::StoreKey;
use wizard_types::{
    AccountInfo, FieldId, FieldName, FlowType, LegalRep, UserLevel, WizardEvent,
};

pub const LIGHTBOX_ID: &str = "addlegalrep-lightbox";
pub const TABLE_ID: &str = "tb-add-rep";

const NO_REP_COPY: &str = "The clearance certificate will be mailed to the following address:";
const WITH_REP_COPY: &str =
    "A copy of the clearance certificate will be mailed to the following address:";
const STANDARD_TABLE_COPY: &str =
    "Provide information for the legal representative(s) of the deceased individual.";

/// Handler for the representatives step.
pub struct RepresentativesHandler {
    user_level: UserLevel,
    legal_reps: Vec<LegalRep>,
    deceased_address: String,
    role_options: Vec<String>,
    table: RowTable,
    lightbox: FormLightbox,
    panel: Option<Panel>,
}

impl RepresentativesHandler {
    pub fn new() -> Self {
        Self {
            user_level: UserLevel::Standard,
            legal_reps: Vec::new(),
            deceased_address: String::new(),
            role_options: Vec::new(),
            table: RowTable::new(TABLE_ID, "No legal representatives added"),
            lightbox: FormLightbox::new(
                LIGHTBOX_ID,
                [
                    "s3-repfname",
                    "s3-replname",
                    "s3-reprole",
                    "s3-reptel",
                    "s3-repemail",
                ],
            ),
            panel: None,
        }
    }

    pub fn legal_reps(&self) -> &[LegalRep] {
        &self.legal_reps
    }

    pub fn role_options(&self) -> &[String] {
        &self.role_options
    }

    pub fn table(&self) -> &RowTable {
        &self.table
    }

    pub fn lightbox(&self) -> &FormLightbox {
        &self.lightbox
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    /// Delete one representative: record and table row go together, and
    /// the deletion is announced so the view re-derives.
    pub fn delete_rep(&mut self, ctx: &mut StepContext<'_>, index: usize) {
        if index < self.legal_reps.len() {
            self.legal_reps.remove(index);
        }
        self.table.delete_row(index, ctx.bus);
        self.persist_reps(ctx);
        self.render_view(ctx);
    }

    // ── Internals ────────────────────────────────────────────────────

    fn render_view(&mut self, ctx: &mut StepContext<'_>) {
        let standard = self.user_level == UserLevel::Standard;

        set_region_hidden(ctx.doc, "s3q1-fieldset", standard);
        set_region_hidden(ctx.doc, "s3q2-fieldset", !standard);
        set_region_hidden(ctx.doc, "legalrepinfo-fieldset", standard);
        set_region_hidden(ctx.doc, "alert-mailing", standard);
        set_region_hidden(
            ctx.doc,
            "alert-norep",
            !(standard && self.legal_reps.is_empty()),
        );

        let copy = if self.legal_reps.is_empty() {
            NO_REP_COPY
        } else {
            WITH_REP_COPY
        };
        set_region_text(
            ctx.doc,
            "s3-level3-address",
            format!("{} {}", copy, self.deceased_address),
        );

        if standard {
            set_region_text(ctx.doc, "s3q2-fieldset", STANDARD_TABLE_COPY.to_string());
        }

        self.panel = if standard {
            None
        } else {
            self.legal_reps.first().map(Self::rep_panel)
        };
    }

    fn rep_panel(rep: &LegalRep) -> Panel {
        Panel::from_entries(
            "Legal representative's information on file",
            [
                ("name", rep.name.clone()),
                ("address", rep.address.clone().unwrap_or_default()),
            ],
            &["Name", "Mailing address"],
        )
    }

    fn handle_submission(
        &mut self,
        ctx: &mut StepContext<'_>,
        form_data: &BTreeMap<FieldName, String>,
    ) {
        let rep = rep_from_form(form_data);
        match self.lightbox.edit_index() {
            Some(index) if index < self.legal_reps.len() => {
                self.legal_reps[index] = rep.clone();
                self.lightbox.clear_edit_index();
                self.table.set_row(index, row_of(&rep));
            }
            _ => {
                self.lightbox.clear_edit_index();
                self.legal_reps.push(rep.clone());
                self.table.add_row(row_of(&rep));
            }
        }
        self.persist_reps(ctx);
        self.render_view(ctx);
    }

    fn open_for_edit(&mut self, index: usize) {
        let Some(rep) = self.legal_reps.get(index) else {
            tracing::warn!(index, "edit of unknown representative ignored");
            return;
        };
        let (first, last) = split_name(&rep.name);
        self.lightbox.clear();
        self.lightbox.set_field("s3-repfname", first);
        self.lightbox.set_field("s3-replname", last);
        self.lightbox
            .set_field("s3-reprole", rep.role.clone().unwrap_or_default());
        self.lightbox
            .set_field("s3-reptel", rep.phone.clone().unwrap_or_default());
        self.lightbox
            .set_field("s3-repemail", rep.email.clone().unwrap_or_default());
        self.lightbox.set_edit_index(index);
        self.lightbox.open();
    }

    fn persist_reps(&self, ctx: &mut StepContext<'_>) {
        if let Err(err) = ctx.session.save(StoreKey::LegalReps, &self.legal_reps) {
            tracing::warn!(%err, "representative records not persisted");
        }
    }
}

impl Default for RepresentativesHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl StepHandler for RepresentativesHandler {
    fn on_activate(&mut self, ctx: &mut StepContext<'_>) {
        self.user_level = load_or_default(ctx.session, StoreKey::UserLevel);
        self.legal_reps = load_or_default(ctx.session, StoreKey::LegalReps);

        let mut flow_type = FlowType::Testamentary;
        match ctx.session.load::<AccountInfo>(StoreKey::AccountInfo) {
            Ok(Some(account)) => {
                self.deceased_address = account.address;
                if let Some(ft) = account.flow_type {
                    flow_type = ft;
                }
            }
            Ok(None) => tracing::warn!("no account on file; address notice left blank"),
            Err(err) => tracing::warn!(%err, "account on file unreadable"),
        }
        self.role_options = flow_type
            .role_options()
            .iter()
            .map(|s| (*s).to_string())
            .collect();

        if self.user_level == UserLevel::Standard {
            self.table
                .set_rows(self.legal_reps.iter().map(row_of).collect());
        }
        self.render_view(ctx);
    }

    fn before_leave(
        &mut self,
        ctx: &mut StepContext<'_>,
        _snapshot: &mut wizard_types::StepSnapshot,
    ) {
        // The elevated path edits the single record's sub-fields in place;
        // sync them back before the step's data is persisted.
        if self.user_level != UserLevel::Elevated {
            return;
        }
        let Some(rep) = self.legal_reps.first_mut() else {
            return;
        };
        rep.phone = field_entry(ctx, "s3-lvl3-reptel");
        rep.email = field_entry(ctx, "s3-lvl3-repemail");
        rep.role = field_entry(ctx, "s3-lvl3-reprole");
        self.persist_reps(ctx);
    }

    fn on_event(&mut self, ctx: &mut StepContext<'_>, event: &WizardEvent) {
        match event {
            WizardEvent::LightboxSubmitted {
                lightbox_id,
                form_data,
            } if lightbox_id == LIGHTBOX_ID => {
                self.handle_submission(ctx, form_data);
            }
            WizardEvent::EditRow { table_id, index, .. } if table_id == TABLE_ID => {
                self.open_for_edit(*index);
            }
            WizardEvent::RowDeleted => {
                self.persist_reps(ctx);
                self.render_view(ctx);
            }
            _ => {}
        }
    }
}

fn rep_from_form(form_data: &BTreeMap<FieldName, String>) -> LegalRep {
    let get = |name: &str| {
        form_data
            .get(&FieldName::new(name))
            .cloned()
            .unwrap_or_default()
    };
    let full_name = format!("{} {}", get("s3-repfname"), get("s3-replname"))
        .trim()
        .to_string();
    LegalRep {
        name: full_name,
        role: non_empty(get("s3-reprole")),
        phone: non_empty(get("s3-reptel")),
        email: non_empty(get("s3-repemail")),
        address: None,
    }
}

fn row_of(rep: &LegalRep) -> serde_json::Value {
    json!({
        "name": rep.name,
        "role": rep.role.clone().unwrap_or_default(),
    })
}

fn split_name(name: &str) -> (String, String) {
    match name.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.to_string()),
        None => (name.to_string(), String::new()),
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn field_entry(ctx: &StepContext<'_>, id: &str) -> Option<String> {
    ctx.doc
        .field(&FieldId::new(id))
        .map(|f| f.value.trim().to_string())
        .and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow;
    use wizard_engine::EventBus;
    use wizard_store::SessionStore;
    use wizard_types::{FormDocument, RegionId};

    fn make_account() -> AccountInfo {
        AccountInfo {
            name: "Estate of J. Doe".into(),
            trust_type: "Testamentary".into(),
            trust_number: "T-00123".into(),
            sin: None,
            address: "1 Main St, Ottawa ON".into(),
            flow_type: Some(FlowType::Testamentary),
        }
    }

    fn make_session(level: UserLevel) -> SessionStore {
        let mut session = SessionStore::new();
        session.save(StoreKey::AccountInfo, &make_account()).unwrap();
        session.save(StoreKey::UserLevel, &level).unwrap();
        if level == UserLevel::Elevated {
            let rep = LegalRep::new("Ann Smith").with_address("1 Main St, Ottawa ON");
            session.save(StoreKey::LegalReps, &vec![rep]).unwrap();
        }
        session
    }

    fn submission(first: &str, last: &str, role: &str) -> BTreeMap<FieldName, String> {
        let mut form = BTreeMap::new();
        form.insert(FieldName::new("s3-repfname"), first.to_string());
        form.insert(FieldName::new("s3-replname"), last.to_string());
        form.insert(FieldName::new("s3-reprole"), role.to_string());
        form.insert(FieldName::new("s3-reptel"), "555-0100".to_string());
        form.insert(FieldName::new("s3-repemail"), String::new());
        form
    }

    fn region_hidden(doc: &FormDocument, id: &str) -> bool {
        doc.region(&RegionId::new(id)).unwrap().hidden
    }

    fn region_text(doc: &FormDocument, id: &str) -> String {
        doc.region(&RegionId::new(id))
            .unwrap()
            .text
            .clone()
            .unwrap_or_default()
    }

    #[test]
    fn test_standard_initial_view() {
        let mut doc = flow::document();
        let mut session = make_session(UserLevel::Standard);
        let mut bus = EventBus::new();
        let mut handler = RepresentativesHandler::new();
        let mut ctx = StepContext {
            doc: &mut doc,
            session: &mut session,
            bus: &mut bus,
        };
        handler.on_activate(&mut ctx);

        assert!(region_hidden(&doc, "s3q1-fieldset"));
        assert!(!region_hidden(&doc, "s3q2-fieldset"));
        assert!(region_hidden(&doc, "legalrepinfo-fieldset"));
        assert!(!region_hidden(&doc, "alert-norep"));
        let notice = region_text(&doc, "s3-level3-address");
        assert!(notice.starts_with("The clearance certificate will be mailed"));
        assert!(notice.contains("1 Main St, Ottawa ON"));
        assert!(handler.panel().is_none());
        assert_eq!(handler.role_options().len(), 5);
    }

    #[test]
    fn test_submission_adds_record_and_clears_alert() {
        let mut doc = flow::document();
        let mut session = make_session(UserLevel::Standard);
        let mut bus = EventBus::new();
        let mut handler = RepresentativesHandler::new();
        let mut ctx = StepContext {
            doc: &mut doc,
            session: &mut session,
            bus: &mut bus,
        };
        handler.on_activate(&mut ctx);
        handler.on_event(
            &mut ctx,
            &WizardEvent::LightboxSubmitted {
                lightbox_id: LIGHTBOX_ID.into(),
                form_data: submission("Ann", "Smith", "Executor"),
            },
        );

        assert_eq!(handler.legal_reps().len(), 1);
        assert_eq!(handler.legal_reps()[0].name, "Ann Smith");
        assert_eq!(handler.legal_reps()[0].role.as_deref(), Some("Executor"));
        assert!(handler.legal_reps()[0].email.is_none());
        assert_eq!(handler.table().len(), 1);

        let stored: Vec<LegalRep> = session.load(StoreKey::LegalReps).unwrap().unwrap();
        assert_eq!(stored.len(), 1);

        assert!(region_hidden(&doc, "alert-norep"));
        assert!(region_text(&doc, "s3-level3-address")
            .starts_with("A copy of the clearance certificate"));
    }

    #[test]
    fn test_foreign_lightbox_ignored() {
        let mut doc = flow::document();
        let mut session = make_session(UserLevel::Standard);
        let mut bus = EventBus::new();
        let mut handler = RepresentativesHandler::new();
        let mut ctx = StepContext {
            doc: &mut doc,
            session: &mut session,
            bus: &mut bus,
        };
        handler.on_activate(&mut ctx);
        handler.on_event(
            &mut ctx,
            &WizardEvent::LightboxSubmitted {
                lightbox_id: "s4q3-lightbox".into(),
                form_data: submission("Ann", "Smith", "Executor"),
            },
        );
        assert!(handler.legal_reps().is_empty());
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut doc = flow::document();
        let mut session = make_session(UserLevel::Standard);
        let mut bus = EventBus::new();
        let mut handler = RepresentativesHandler::new();
        let mut ctx = StepContext {
            doc: &mut doc,
            session: &mut session,
            bus: &mut bus,
        };
        handler.on_activate(&mut ctx);
        for (first, last) in [("Ann", "Smith"), ("Bea", "Jones")] {
            handler.on_event(
                &mut ctx,
                &WizardEvent::LightboxSubmitted {
                    lightbox_id: LIGHTBOX_ID.into(),
                    form_data: submission(first, last, "Trustee"),
                },
            );
        }

        // The edit path: row control opens the populated lightbox.
        handler.on_event(
            &mut ctx,
            &WizardEvent::EditRow {
                table_id: TABLE_ID.into(),
                index: 0,
                row: json!({"name": "Ann Smith", "role": "Trustee"}),
            },
        );
        assert!(handler.lightbox().is_open());
        assert_eq!(handler.lightbox().edit_index(), Some(0));
        assert_eq!(handler.lightbox().field("s3-repfname"), Some("Ann"));

        handler.on_event(
            &mut ctx,
            &WizardEvent::LightboxSubmitted {
                lightbox_id: LIGHTBOX_ID.into(),
                form_data: submission("Anna", "Smythe", "Executor"),
            },
        );
        assert_eq!(handler.legal_reps().len(), 2);
        assert_eq!(handler.legal_reps()[0].name, "Anna Smythe");
        assert_eq!(handler.legal_reps()[1].name, "Bea Jones");
        assert!(handler.lightbox().edit_index().is_none());
    }

    #[test]
    fn test_delete_restores_alert_and_copy() {
        let mut doc = flow::document();
        let mut session = make_session(UserLevel::Standard);
        let mut bus = EventBus::new();
        let mut handler = RepresentativesHandler::new();
        let mut ctx = StepContext {
            doc: &mut doc,
            session: &mut session,
            bus: &mut bus,
        };
        handler.on_activate(&mut ctx);
        handler.on_event(
            &mut ctx,
            &WizardEvent::LightboxSubmitted {
                lightbox_id: LIGHTBOX_ID.into(),
                form_data: submission("Ann", "Smith", "Executor"),
            },
        );

        handler.delete_rep(&mut ctx, 0);
        assert!(handler.legal_reps().is_empty());
        assert!(handler.table().is_empty());
        assert!(!region_hidden(&doc, "alert-norep"));
        assert!(region_text(&doc, "s3-level3-address")
            .starts_with("The clearance certificate will be mailed"));
        let stored: Vec<LegalRep> = session.load(StoreKey::LegalReps).unwrap().unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_elevated_initial_view_shows_panel() {
        let mut doc = flow::document();
        let mut session = make_session(UserLevel::Elevated);
        let mut bus = EventBus::new();
        let mut handler = RepresentativesHandler::new();
        let mut ctx = StepContext {
            doc: &mut doc,
            session: &mut session,
            bus: &mut bus,
        };
        handler.on_activate(&mut ctx);

        assert!(!region_hidden(&doc, "s3q1-fieldset"));
        assert!(region_hidden(&doc, "s3q2-fieldset"));
        assert!(region_hidden(&doc, "alert-norep"));
        let panel = handler.panel().unwrap();
        assert_eq!(panel.row_value("Name"), Some("Ann Smith"));
        assert_eq!(panel.row_value("Mailing address"), Some("1 Main St, Ottawa ON"));
        assert!(region_text(&doc, "s3-level3-address")
            .starts_with("A copy of the clearance certificate"));
    }

    #[test]
    fn test_elevated_subfields_sync_on_leave() {
        let mut doc = flow::document();
        let mut session = make_session(UserLevel::Elevated);
        let mut bus = EventBus::new();
        let mut handler = RepresentativesHandler::new();
        let mut ctx = StepContext {
            doc: &mut doc,
            session: &mut session,
            bus: &mut bus,
        };
        handler.on_activate(&mut ctx);

        ctx.doc.field_mut(&FieldId::new("s3-lvl3-reptel")).unwrap().value =
            "555-0199".into();
        ctx.doc.field_mut(&FieldId::new("s3-lvl3-reprole")).unwrap().value =
            "Executor".into();

        let mut snapshot = wizard_types::StepSnapshot::new();
        handler.before_leave(&mut ctx, &mut snapshot);

        let stored: Vec<LegalRep> = session.load(StoreKey::LegalReps).unwrap().unwrap();
        assert_eq!(stored[0].phone.as_deref(), Some("555-0199"));
        assert_eq!(stored[0].role.as_deref(), Some("Executor"));
        assert!(stored[0].email.is_none());
    }
}
