//! The step handler capability.
//!
//! Each step may carry bespoke behavior: populating summary panels,
//! maintaining a table of records, keeping derived fields in sync. The
//! wizard constructs a step's handler lazily, the first time the step
//! becomes active, and keeps the instance for the rest of the session.

use crate::bus::EventBus;
use wizard_store::SessionStore;
use wizard_types::{FormDocument, StepSnapshot, WizardEvent};

/// Everything a handler may touch while reacting to the wizard.
pub struct StepContext<'a> {
    /// The full form document (handlers may read other steps' regions).
    pub doc: &'a mut FormDocument,
    /// The wizard's session store.
    pub session: &'a mut SessionStore,
    /// The event bus, for fire-and-forget signaling.
    pub bus: &'a mut EventBus,
}

/// Bespoke per-step behavior. All hooks default to no-ops; a step with no
/// special behavior simply doesn't override anything.
pub trait StepHandler {
    /// The step became active (fires on every activation; construction
    /// happened at most once, before the first call).
    fn on_activate(&mut self, ctx: &mut StepContext<'_>) {
        let _ = ctx;
    }

    /// The step is about to be left; the captured snapshot may still be
    /// amended with derived fields before it is persisted.
    fn before_leave(&mut self, ctx: &mut StepContext<'_>, snapshot: &mut StepSnapshot) {
        let _ = (ctx, snapshot);
    }

    /// A bus event was dispatched. Handlers filter by payload ids; events
    /// reach every constructed handler regardless of the active step.
    fn on_event(&mut self, ctx: &mut StepContext<'_>, event: &WizardEvent) {
        let _ = (ctx, event);
    }
}

/// A step registered without bespoke behavior.
#[derive(Debug, Default)]
pub struct NoopHandler;

impl StepHandler for NoopHandler {}
