//! The testamentary clearance flow definition.
//!
//! Seven steps: introduction, eligibility, estate information,
//! representatives, clearance type, supporting documents, review. The
//! eligibility step is a chain of yes/no questions where each "Yes"
//! reveals the next question and each "No" is a disqualifying answer.

use crate::handlers::{ClearanceTypeHandler, EstateInfoHandler, RepresentativesHandler, ReviewHandler};
use wizard_engine::handler::NoopHandler;
use wizard_engine::{DisqualificationEvaluator, HandlerRegistry};
use wizard_types::{Field, FormDocument, Region, Step, StepForm};

/// Ordinal of the representative step, used by its alert logic and tests.
pub const STEP_REPRESENTATIVES: usize = 3;
/// Ordinal of the review step.
pub const STEP_REVIEW: usize = 6;

const STEP_TITLES: [&str; 7] = [
    "Before you begin",
    "Eligibility",
    "Estate trust information",
    "Representative's information",
    "Type of clearance",
    "Supporting documentation",
    "Review and submit",
];

/// The ordered step list, step 0 active.
pub fn steps() -> Vec<Step> {
    STEP_TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| Step::new(i, *title))
        .collect()
}

/// The disqualifying answer sets: a "No" to any eligibility question.
pub fn evaluator() -> DisqualificationEvaluator {
    DisqualificationEvaluator::new()
        .with_condition(["s1q1-op2"])
        .with_condition(["s1q2-op2"])
        .with_condition(["s1q3-op2"])
        .with_condition(["s1q4-op2"])
}

/// Step handlers, keyed by step ordinal. Steps 1 and 5 carry no bespoke
/// behavior; step 0 has none at all.
pub fn registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(1, NoopHandler::default);
    registry.register(2, EstateInfoHandler::new);
    registry.register(3, RepresentativesHandler::new);
    registry.register(4, ClearanceTypeHandler::new);
    registry.register(5, NoopHandler::default);
    registry.register(6, ReviewHandler::new);
    registry
}

/// The whole form document.
pub fn document() -> FormDocument {
    FormDocument::new()
        .with_form(intro_form())
        .with_form(eligibility_form())
        .with_form(estate_info_form())
        .with_form(representatives_form())
        .with_form(clearance_type_form())
        .with_form(documents_form())
        .with_form(review_form())
}

fn intro_form() -> StepForm {
    StepForm::new(0).with_region(Region::new("s0-intro").notice().with_text(
        "Use this application to request a clearance certificate for a \
         testamentary trust account.",
    ))
}

fn eligibility_form() -> StepForm {
    StepForm::new(1)
        .with_region(
            Region::new("s1q1-fieldset")
                .with_field(
                    Field::radio("s1q1-op1", "s1q1", "Yes")
                        .with_label("Are you the legal representative for the deceased individual?")
                        .with_reveal("s1q2-fieldset"),
                )
                .with_field(Field::radio("s1q1-op2", "s1q1", "No")),
        )
        .with_region(
            Region::new("s1q2-fieldset")
                .hidden()
                .with_field(
                    Field::radio("s1q2-op1", "s1q2", "Yes")
                        .with_label("Have all required returns been filed for the estate?")
                        .with_reveal("s1q3-fieldset"),
                )
                .with_field(Field::radio("s1q2-op2", "s1q2", "No")),
        )
        .with_region(
            Region::new("s1q3-fieldset")
                .hidden()
                .with_field(
                    Field::radio("s1q3-op1", "s1q3", "Yes")
                        .with_label("Have all amounts owing been paid or secured?")
                        .with_reveal("s1q4-fieldset"),
                )
                .with_field(Field::radio("s1q3-op2", "s1q3", "No")),
        )
        .with_region(
            Region::new("s1q4-fieldset")
                .hidden()
                .with_field(
                    Field::radio("s1q4-op1", "s1q4", "Yes")
                        .with_label("Has the property of the estate been, or will it be, distributed?"),
                )
                .with_field(Field::radio("s1q4-op2", "s1q4", "No")),
        )
}

fn estate_info_form() -> StepForm {
    StepForm::new(2).with_region(
        Region::new("s2q2-fieldset")
            .with_field(Field::text("s2q2-field", "s2q2").with_label("Date of death")),
    )
}

fn representatives_form() -> StepForm {
    StepForm::new(3)
        .with_region(
            Region::new("s3q1-fieldset")
                .hidden()
                .with_field(
                    Field::radio("s3q1-op1", "s3q1", "Yes")
                        .with_label("Is the representative information on file correct?"),
                )
                .with_field(Field::radio("s3q1-op2", "s3q1", "No")),
        )
        .with_region(
            Region::new("legalrepinfo-fieldset")
                .with_field(
                    Field::select("s3-lvl3-reprole", "s3-lvl3-reprole")
                        .with_label("Representative role"),
                )
                .with_field(
                    Field::text("s3-lvl3-reptel", "s3-lvl3-reptel")
                        .with_label("Representative telephone number"),
                )
                .with_field(
                    Field::text("s3-lvl3-repemail", "s3-lvl3-repemail")
                        .with_label("Representative email address"),
                ),
        )
        .with_region(
            Region::new("alert-norep")
                .notice()
                .with_text("You have not added any legal representatives."),
        )
        .with_region(Region::new("s3q2-fieldset").hidden())
        .with_region(
            Region::new("alert-mailing")
                .notice()
                .with_text("Correspondence will be sent to the mailing address on file."),
        )
        .with_region(Region::new("s3-level3-address").notice())
}

fn clearance_type_form() -> StepForm {
    StepForm::new(4)
        .with_region(
            Region::new("s4q1-fieldset")
                .with_field(
                    Field::radio("s4q1-op1", "s4q1", "Final")
                        .with_label("What type of clearance are you requesting?"),
                )
                .with_field(Field::radio("s4q1-op2", "s4q1", "Partial")),
        )
        .with_region(
            Region::new("s4q2-fieldset").with_field(
                Field::text("s4q2-field", "s4q2").with_label("Fiscal period end date"),
            ),
        )
        .with_region(
            Region::new("s4q3-fieldset")
                .with_field(
                    Field::checkbox("s4q3-op1", "s4q3-same", "Same as fiscal period end")
                        .with_label("Wind-up date options"),
                )
                .with_child(
                    Region::new("windup-wrapper").with_field(
                        Field::text("s4q3-field", "s4q3").with_label("Wind-up date"),
                    ),
                ),
        )
}

fn documents_form() -> StepForm {
    StepForm::new(5)
        .with_region(
            Region::new("s5q1-fieldset")
                .with_field(
                    Field::radio("s5q1-op1", "s5q1", "Yes")
                        .with_label("Have you submitted all supporting documents?"),
                )
                .with_field(Field::radio("s5q1-op2", "s5q1", "No")),
        )
        .with_region(
            Region::new("s5q2-fieldset")
                .with_field(
                    Field::radio("s5q2-op1", "s5q2", "Online")
                        .with_label("How will you submit your documents?"),
                )
                .with_field(Field::radio("s5q2-op2", "s5q2", "By mail")),
        )
}

fn review_form() -> StepForm {
    StepForm::new(6).with_region(Region::new("s6-review-container").notice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_types::{FieldId, RegionId};

    #[test]
    fn test_seven_steps_with_titles() {
        let steps = steps();
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[1].title, "Eligibility");
        assert_eq!(steps[STEP_REVIEW].title, "Review and submit");
    }

    #[test]
    fn test_document_covers_every_step() {
        let doc = document();
        for step in 0..7 {
            assert!(doc.form(step).is_some(), "missing form for step {}", step);
        }
    }

    #[test]
    fn test_eligibility_chain_is_wired() {
        let doc = document();
        let op1 = doc.field(&FieldId::new("s1q2-op1")).unwrap();
        assert_eq!(op1.reveals, vec![RegionId::new("s1q3-fieldset")]);
        assert!(doc.region(&RegionId::new("s1q3-fieldset")).unwrap().hidden);

        // The last question reveals nothing further.
        let last = doc.field(&FieldId::new("s1q4-op1")).unwrap();
        assert!(last.reveals.is_empty());
    }

    #[test]
    fn test_out_conditions_cover_each_question() {
        assert_eq!(evaluator().condition_count(), 4);
    }

    #[test]
    fn test_registry_covers_handled_steps() {
        let registry = registry();
        for step in 1..=6 {
            assert!(registry.contains(step), "no handler for step {}", step);
        }
        assert!(!registry.contains(0));
    }
}
