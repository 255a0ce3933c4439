//! Review step: read-only panels of every prior step's captured data,
//! re-labelled from raw field names to the question text, with edit
//! controls navigating back to the step they summarize.

use super::load_or_default;
use crate::panel::Panel;
use chrono::{Datelike, NaiveDate};
use wizard_engine::{StepContext, StepHandler};
use wizard_store::{SessionStore, StoreKey};
use wizard_types::{
    AccountInfo, FieldName, FieldValue, FormDocument, LegalRep, StepSnapshot, WizardResult,
};

/// The reviewed steps, in display order, with their panel titles.
const SECTIONS: [(usize, &str); 5] = [
    (1, "Eligibility"),
    (2, "Estate trust information"),
    (3, "Representative's information"),
    (4, "Type of clearance"),
    (5, "Supporting documentation"),
];

/// Dated snapshot entries rendered as long-form dates.
const DATE_NAMES: [&str; 2] = ["s4q2", "s4q3"];

/// Handler for the review step.
#[derive(Default)]
pub struct ReviewHandler {
    panels: Vec<Panel>,
}

impl ReviewHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }
}

impl StepHandler for ReviewHandler {
    fn on_activate(&mut self, ctx: &mut StepContext<'_>) {
        match assemble_review(ctx.doc, ctx.session) {
            Ok(panels) => self.panels = panels,
            Err(err) => {
                tracing::warn!(%err, "review assembly failed; panels left empty");
                self.panels.clear();
            }
        }
    }
}

/// Build one review panel per captured step. Steps with no stored
/// snapshot are skipped entirely.
pub fn assemble_review(
    doc: &FormDocument,
    session: &SessionStore,
) -> WizardResult<Vec<Panel>> {
    let account: Option<AccountInfo> = session.load(StoreKey::AccountInfo)?;
    let mut panels = Vec::new();

    for (step, title) in SECTIONS {
        let Some(snapshot) = session.load::<StepSnapshot>(StoreKey::StepData(step))? else {
            continue;
        };
        let mut panel = Panel::new(title).editable(step).review();
        match step {
            2 => {
                if let Some(account) = &account {
                    panel.push_row("Estate of", account.name.clone());
                    panel.push_row("Trust type", account.trust_type.clone());
                    panel.push_row("Trust account number", account.trust_number.clone());
                    panel.push_row(
                        "Social insurance number",
                        account.sin.clone().unwrap_or_default(),
                    );
                }
                let name = FieldName::new("s2q2");
                if let Some(value) = snapshot.get(&name) {
                    panel.push_row(label_for(doc, &name), value_to_string(value));
                }
            }
            3 => {
                let reps: Vec<LegalRep> = load_or_default(session, StoreKey::LegalReps);
                let address = account
                    .as_ref()
                    .map(|a| a.address.clone())
                    .unwrap_or_default();
                push_rep_rows(&mut panel, &reps, &address);
            }
            _ => {
                for (name, value) in snapshot.iter() {
                    let mut rendered = value_to_string(value);
                    if step == 4 && DATE_NAMES.contains(&name.as_str()) {
                        rendered = format_date(&rendered);
                    }
                    panel.push_row(label_for(doc, name), rendered);
                }
            }
        }
        panels.push(panel);
    }
    Ok(panels)
}

fn push_rep_rows(panel: &mut Panel, reps: &[LegalRep], address: &str) {
    let or_na = |value: &Option<String>| {
        value
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "N/A".to_string())
    };
    if reps.len() == 1 {
        let rep = &reps[0];
        panel.push_row("Legal representative name", rep.name.clone());
        panel.push_row("Legal representative mailing address", address);
        panel.push_row("Legal representative role", or_na(&rep.role));
        panel.push_row("Legal representative email address", or_na(&rep.email));
        panel.push_row("Legal representative telephone number", or_na(&rep.phone));
        return;
    }
    for (index, rep) in reps.iter().enumerate() {
        let n = index + 1;
        panel.push_row(format!("Legal representative {} name", n), rep.name.clone());
        if index == 0 {
            panel.push_row(
                format!("Legal representative {} mailing address", n),
                address,
            );
        }
        panel.push_row(format!("Legal representative {} role", n), or_na(&rep.role));
        panel.push_row(
            format!("Legal representative {} email address", n),
            or_na(&rep.email),
        );
        panel.push_row(
            format!("Legal representative {} telephone number", n),
            or_na(&rep.phone),
        );
    }
}

/// The question text for a field group, from the first labelled field
/// carrying that name; the raw name when none is labelled.
pub fn label_for(doc: &FormDocument, name: &FieldName) -> String {
    let mut found: Option<String> = None;
    for form in &doc.forms {
        form.each_field(&mut |field| {
            if found.is_none() && field.name.as_ref() == Some(name) {
                found = field.label.clone();
            }
        });
    }
    found.unwrap_or_else(|| name.as_str().to_string())
}

/// Long-form date for review display: `2024-03-07` → "March 7, 2024".
/// Empty values show as "N/A"; anything unparseable shows raw.
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return "N/A".to_string();
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => format!("{} {}, {}", date.format("%B"), date.day(), date.year()),
        Err(_) => value.to_string(),
    }
}

fn value_to_string(value: &FieldValue) -> String {
    match value {
        FieldValue::Single(v) => v.clone(),
        FieldValue::Multi(vs) => vs.join(", "),
    }
}
