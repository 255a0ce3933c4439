//! The concrete clearance flow.
//!
//! This crate defines the seven-step testamentary clearance application:
//! the form document with its fields and reveal rules, the disqualifying
//! answer sets, the per-step handlers, and the reusable collaborator
//! models they drive — summary panels, the representative row table, the
//! modal add/edit form, and the date picker.
//!
//! Entry and exit live in [`app`]: [`app::launch`] checks the task
//! precondition and seeds the session; final submission hands selected
//! keys to the confirmation destination through the engine.

#![deny(unsafe_code)]

pub mod app;
pub mod datepicker;
pub mod flow;
pub mod handlers;
pub mod lightbox;
pub mod panel;
pub mod table;

pub use app::{launch, Launch};
pub use datepicker::{DatePicker, PickerGroup, PickerView};
pub use lightbox::FormLightbox;
pub use panel::{Panel, PanelRow};
pub use table::RowTable;
