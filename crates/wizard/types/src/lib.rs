//! Domain types for the clearance wizard.
//!
//! This crate defines the vocabulary shared by the store, the engine and the
//! step handlers: field and region identifiers, the form document tree that
//! visibility rules operate on, step ordinals and badges, per-step snapshots,
//! the account/representative records the flow collects, and the event
//! vocabulary of the in-process bus.
//!
//! Nothing in here performs I/O; these are plain serde-serializable values.

#![deny(unsafe_code)]

pub mod document;
pub mod errors;
pub mod events;
pub mod field;
pub mod records;
pub mod snapshot;
pub mod step;

pub use document::{FormDocument, Region, StepForm};
pub use errors::{WizardError, WizardResult};
pub use events::WizardEvent;
pub use field::{Field, FieldId, FieldKind, FieldName, FieldValue, RegionId};
pub use records::{AccountInfo, FlowType, LegalRep, SelectedTask, SessionId, UserLevel};
pub use snapshot::StepSnapshot;
pub use step::{BadgeFill, BadgeGlyph, Step, StepBadge, StepStatus};
