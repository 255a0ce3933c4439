//! Clearance wizard runtime.
//!
//! The engine drives the progressive-disclosure and step-navigation state
//! machine: which fields are visible, which steps are reachable, what data
//! is persisted per step, and how a disqualifying answer short-circuits the
//! normal next/back flow.
//!
//! # Architecture
//!
//! The [`Wizard`] composes specialized components:
//!
//! - [`EventBus`] — in-process publish/subscribe channel
//! - [`VisibilityEngine`] — reactive show/hide rules with cascading clears
//! - [`DisqualificationEvaluator`] — the "out" condition check
//! - [`Stepper`] — ordered steps, capture/restore, numbering badges
//! - [`HandlerRegistry`] — lazy once-per-step construction of bespoke
//!   step behavior behind the [`StepHandler`] trait
//!
//! Everything runs synchronously on discrete input events; there is no
//! background work and no timers.

#![deny(unsafe_code)]

pub mod bus;
pub mod disqualify;
pub mod handler;
pub mod registry;
pub mod stepper;
pub mod visibility;
pub mod wizard;

pub use bus::EventBus;
pub use disqualify::DisqualificationEvaluator;
pub use handler::{StepContext, StepHandler};
pub use registry::HandlerRegistry;
pub use stepper::{Direction, Stepper};
pub use visibility::{VisibilityEngine, VisibilityOutcome};
pub use wizard::{NavControls, Redirect, Wizard};
