//! Estate information step: the account summary panel and the
//! date-of-death picker.

use crate::datepicker::{DatePicker, PickerGroup};
use crate::panel::Panel;
use wizard_engine::{StepContext, StepHandler};
use wizard_store::StoreKey;
use wizard_types::AccountInfo;

/// The dated field this step's picker is bound to.
pub const DOD_FIELD: &str = "s2q2-field";

/// Handler for the estate information step.
pub struct EstateInfoHandler {
    pickers: PickerGroup,
    panel: Option<Panel>,
}

impl EstateInfoHandler {
    pub fn new() -> Self {
        Self {
            pickers: PickerGroup::new().with_picker(DatePicker::new(DOD_FIELD)),
            panel: None,
        }
    }

    /// The read-only "on file" summary shown above the questions.
    pub fn account_panel(account: &AccountInfo) -> Panel {
        Panel::from_entries(
            "Trust information on file",
            [
                ("name", account.name.clone()),
                ("trustType", account.trust_type.clone()),
                ("trustNumber", account.trust_number.clone()),
            ],
            &["Estate of", "Trust type", "Trust account number"],
        )
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    pub fn pickers(&self) -> &PickerGroup {
        &self.pickers
    }

    pub fn pickers_mut(&mut self) -> &mut PickerGroup {
        &mut self.pickers
    }
}

impl Default for EstateInfoHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl StepHandler for EstateInfoHandler {
    fn on_activate(&mut self, ctx: &mut StepContext<'_>) {
        match ctx.session.load::<AccountInfo>(StoreKey::AccountInfo) {
            Ok(Some(account)) => self.panel = Some(Self::account_panel(&account)),
            Ok(None) => {
                tracing::warn!("no account on file; summary panel skipped");
                self.panel = None;
            }
            Err(err) => {
                tracing::warn!(%err, "account on file unreadable; summary panel skipped");
                self.panel = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_engine::EventBus;
    use wizard_store::SessionStore;
    use wizard_types::{Field, FieldId, FlowType, FormDocument, Region, StepForm};

    fn make_account() -> AccountInfo {
        AccountInfo {
            name: "Estate of J. Doe".into(),
            trust_type: "Testamentary".into(),
            trust_number: "T-00123".into(),
            sin: Some("000 000 000".into()),
            address: "1 Main St, Ottawa ON".into(),
            flow_type: Some(FlowType::Testamentary),
        }
    }

    fn make_ctx_parts() -> (FormDocument, SessionStore, EventBus) {
        let doc = FormDocument::new().with_form(
            StepForm::new(2)
                .with_region(Region::new("s2q2-fieldset").with_field(Field::text(DOD_FIELD, "s2q2"))),
        );
        (doc, SessionStore::new(), EventBus::new())
    }

    #[test]
    fn test_panel_from_account() {
        let panel = EstateInfoHandler::account_panel(&make_account());
        assert_eq!(panel.title(), "Trust information on file");
        assert_eq!(panel.row_value("Estate of"), Some("Estate of J. Doe"));
        assert_eq!(panel.row_value("Trust account number"), Some("T-00123"));
        assert_eq!(panel.rows().len(), 3);
    }

    #[test]
    fn test_activation_builds_panel() {
        let (mut doc, mut session, mut bus) = make_ctx_parts();
        session.save(StoreKey::AccountInfo, &make_account()).unwrap();
        let mut handler = EstateInfoHandler::new();

        let mut ctx = StepContext {
            doc: &mut doc,
            session: &mut session,
            bus: &mut bus,
        };
        handler.on_activate(&mut ctx);
        assert!(handler.panel().is_some());
    }

    #[test]
    fn test_activation_without_account_skips_panel() {
        let (mut doc, mut session, mut bus) = make_ctx_parts();
        let mut handler = EstateInfoHandler::new();
        let mut ctx = StepContext {
            doc: &mut doc,
            session: &mut session,
            bus: &mut bus,
        };
        handler.on_activate(&mut ctx);
        assert!(handler.panel().is_none());
    }

    #[test]
    fn test_picker_writes_date_of_death() {
        let (mut doc, _session, mut bus) = make_ctx_parts();
        let mut handler = EstateInfoHandler::new();
        let field = FieldId::new(DOD_FIELD);

        handler
            .pickers_mut()
            .open_on(&field, chrono::NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());
        let picker = handler.pickers_mut().get_mut(&field).unwrap();
        picker.show_years();
        picker.select_year(2021);
        picker.select_month(6);
        picker.select_day(4, &mut doc, &mut bus);

        assert_eq!(doc.field(&field).unwrap().value, "2021-06-04");
    }
}
