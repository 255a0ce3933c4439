//! The wizard runtime: one struct wiring the document, the session store,
//! the bus, the step controller and the rule engines together.
//!
//! All entry points are synchronous and run to completion: a field change
//! re-evaluates visibility and disqualification; an explicit navigation
//! captures, persists and restores step state; queued events are drained
//! and routed after every entry point.

use crate::bus::EventBus;
use crate::disqualify::DisqualificationEvaluator;
use crate::handler::{StepContext, StepHandler};
use crate::registry::HandlerRegistry;
use crate::stepper::{Direction, Stepper};
use crate::visibility::VisibilityEngine;
use std::collections::HashMap;
use wizard_store::{SessionStore, StoreKey};
use wizard_types::{
    FieldId, FormDocument, SessionId, Step, StepBadge, StepSnapshot, WizardError, WizardEvent,
    WizardResult,
};

// ── Outcomes ─────────────────────────────────────────────────────────

/// Where the wizard sends the user when it cannot, or should no longer,
/// show itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Entry precondition failed; back to the task chooser.
    Chooser,
    /// Submission hand-off; on to the confirmation destination.
    Confirmation,
}

/// Which navigation controls the active step shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavControls {
    /// The normal next/back pair.
    pub next_back: bool,
    /// The dedicated exit control of the disqualification flow.
    pub exit: bool,
}

// ── Wizard ───────────────────────────────────────────────────────────

/// The assembled wizard.
pub struct Wizard {
    session_id: SessionId,
    doc: FormDocument,
    stepper: Stepper,
    session: SessionStore,
    bus: EventBus,
    visibility: VisibilityEngine,
    evaluator: DisqualificationEvaluator,
    registry: HandlerRegistry,
    handlers: HashMap<usize, Box<dyn StepHandler>>,
    out: bool,
}

impl Wizard {
    /// Assemble a wizard over a document and step list; `initial` is the
    /// step pre-marked active at load time.
    pub fn new(
        doc: FormDocument,
        steps: Vec<Step>,
        initial: usize,
        evaluator: DisqualificationEvaluator,
        registry: HandlerRegistry,
        session: SessionStore,
    ) -> WizardResult<Self> {
        if initial >= steps.len() {
            return Err(WizardError::UnknownStep(initial));
        }
        let mut wizard = Self {
            session_id: SessionId::generate(),
            doc,
            stepper: Stepper::new(steps, initial),
            session,
            bus: EventBus::new(),
            visibility: VisibilityEngine::new(),
            evaluator,
            registry,
            handlers: HashMap::new(),
            out: false,
        };
        tracing::info!(session = wizard.session_id.short(), "wizard initialized");
        wizard.enter_step(initial)?;
        Ok(wizard)
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Check a radio or checkbox. Checking a radio unchecks its group
    /// siblings first, the way exclusive inputs behave.
    pub fn check(&mut self, id: &FieldId) {
        let Some(field) = self.doc.field(id) else {
            tracing::warn!(field = %id, "check of unknown field ignored");
            return;
        };
        if field.kind == wizard_types::FieldKind::Radio {
            if let Some(group) = field.name.clone() {
                for form in &mut self.doc.forms {
                    let siblings: Vec<FieldId> =
                        form.fields_named(&group).iter().map(|f| f.id.clone()).collect();
                    for sibling in siblings {
                        for region in &mut form.regions {
                            if let Some(f) = region.find_field_mut(&sibling) {
                                f.checked = false;
                            }
                        }
                    }
                }
            }
        }
        if let Some(field) = self.doc.field_mut(id) {
            field.checked = true;
        }
        self.field_changed(id);
    }

    /// Uncheck a checkbox (or radio, programmatically).
    pub fn uncheck(&mut self, id: &FieldId) {
        if let Some(field) = self.doc.field_mut(id) {
            field.checked = false;
        }
        self.field_changed(id);
    }

    /// Enter a value into a text or select field.
    pub fn input(&mut self, id: &FieldId, value: impl Into<String>) {
        if let Some(field) = self.doc.field_mut(id) {
            field.value = value.into();
        }
        self.field_changed(id);
    }

    /// React to a field change: visibility rules, re-measure, out check.
    pub fn field_changed(&mut self, id: &FieldId) {
        let outcome = self.visibility.on_field_change(&mut self.doc, id);
        if outcome.changed() {
            self.stepper.remeasure(&self.doc);
        }
        self.refresh_out();
        self.pump();
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Explicit next/back navigation. Out-of-range moves are rejected as
    /// no-ops: the active step and every snapshot stay untouched.
    pub fn navigate(&mut self, direction: Direction) -> WizardResult<bool> {
        let Some(target) = self.stepper.target_of(direction) else {
            tracing::debug!(?direction, active = self.stepper.active_index(), "navigation rejected");
            return Ok(false);
        };

        let outgoing = self.stepper.active_index();
        let mut snapshot = match self.doc.form(outgoing) {
            Some(form) => StepSnapshot::capture(form),
            None => StepSnapshot::new(),
        };
        self.with_handler(outgoing, |handler, ctx| {
            handler.before_leave(ctx, &mut snapshot);
        });
        self.session.save(StoreKey::StepData(outgoing), &snapshot)?;
        tracing::debug!(step = outgoing, fields = snapshot.len(), "step snapshot captured");

        self.stepper.activate(target);
        tracing::info!(from = outgoing, to = target, "step transition");
        self.enter_step(target)?;
        Ok(true)
    }

    /// Jump straight to a step (review-panel edit navigation). No capture
    /// happens; the review step owns no form data to lose.
    pub fn jump(&mut self, index: usize) -> WizardResult<bool> {
        if !self.stepper.activate(index) {
            return Ok(false);
        }
        tracing::info!(to = index, "jump to step");
        self.enter_step(index)?;
        Ok(true)
    }

    fn enter_step(&mut self, index: usize) -> WizardResult<()> {
        // Re-render from saved state: repopulate whatever the stored
        // snapshot knows about; absence means nothing to restore.
        if let Some(snapshot) = self
            .session
            .load::<StepSnapshot>(StoreKey::StepData(index))?
        {
            if let Some(form) = self.doc.form_mut(index) {
                snapshot.apply_to(form);
            }
        }

        // Lazily construct the handler, exactly once per step index.
        if !self.handlers.contains_key(&index) {
            if let Some(handler) = self.registry.construct(index) {
                self.handlers.insert(index, handler);
            }
        }
        self.with_handler(index, |handler, ctx| handler.on_activate(ctx));

        self.stepper.remeasure(&self.doc);
        self.refresh_out();
        self.pump();
        Ok(())
    }

    // ── Event routing ────────────────────────────────────────────────

    /// Publish an event and drain the queue.
    pub fn publish(&mut self, event: WizardEvent) {
        self.bus.publish(event);
        self.pump();
    }

    /// Drain the bus, routing each event synchronously: navigation events
    /// move the active step, everything reaches the constructed handlers
    /// in step order.
    pub fn pump(&mut self) {
        self.bus.publish_all(self.session.take_notifications());
        while let Some(event) = self.bus.pop() {
            self.dispatch(&event);
            self.bus.publish_all(self.session.take_notifications());
        }
    }

    fn dispatch(&mut self, event: &WizardEvent) {
        match event {
            WizardEvent::NavigateToStep { index } | WizardEvent::EditPanel { index, .. } => {
                if let Err(err) = self.jump(*index) {
                    tracing::warn!(%err, index, "navigation event failed");
                }
            }
            _ => {}
        }

        let mut indices: Vec<usize> = self.handlers.keys().copied().collect();
        indices.sort_unstable();
        for index in indices {
            self.with_handler(index, |handler, ctx| handler.on_event(ctx, event));
        }

        // Handlers re-render regions; the measured content must follow.
        self.stepper.remeasure(&self.doc);
        self.refresh_out();
    }

    fn with_handler<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut dyn StepHandler, &mut StepContext<'_>) -> R,
    ) -> Option<R> {
        let mut handler = self.handlers.remove(&index)?;
        let result = {
            let mut ctx = StepContext {
                doc: &mut self.doc,
                session: &mut self.session,
                bus: &mut self.bus,
            };
            f(handler.as_mut(), &mut ctx)
        };
        self.handlers.insert(index, handler);
        Some(result)
    }

    // ── Disqualification ─────────────────────────────────────────────

    fn refresh_out(&mut self) {
        let is_out = self.evaluator.is_out(&self.doc);
        if is_out != self.out {
            self.out = is_out;
            if is_out {
                tracing::info!("disqualifying selection made; exit flow shown");
            } else {
                tracing::info!("disqualification lifted; normal flow restored");
            }
        }
    }

    pub fn is_out(&self) -> bool {
        self.out
    }

    /// Which controls the active step currently shows.
    pub fn nav_controls(&self) -> NavControls {
        NavControls {
            next_back: !self.out,
            exit: self.out,
        }
    }

    // ── Hand-off & abandonment ───────────────────────────────────────

    /// Final submission: copy the confirmation destination's keys into the
    /// longer-lived cache, arm the one-shot wipe-suppression flag, and
    /// yield the redirect.
    pub fn submit(&mut self, site: &mut SessionStore) -> WizardResult<Redirect> {
        self.session
            .copy_to(StoreKey::AccountInfo, site, StoreKey::AccountInfo);
        self.session
            .copy_to(StoreKey::LegalReps, site, StoreKey::LegalRepresentative);
        self.session
            .copy_to(StoreKey::RacUserName, site, StoreKey::RacUserName);
        self.session
            .save(StoreKey::NavigatingToConfirmation, &true)?;
        tracing::info!(session = self.session_id.short(), "submission hand-off");
        Ok(Redirect::Confirmation)
    }

    /// The wizard is being left. Wipes the session store, unless the
    /// one-shot confirmation flag is armed; the flag is consumed either
    /// way.
    pub fn abandon(&mut self) {
        let proceeding = self
            .session
            .load::<bool>(StoreKey::NavigatingToConfirmation)
            .ok()
            .flatten()
            .unwrap_or(false);
        if proceeding {
            self.session.clear(StoreKey::NavigatingToConfirmation);
            tracing::debug!("store preserved for confirmation hand-off");
        } else {
            self.session.wipe();
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn document(&self) -> &FormDocument {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut FormDocument {
        &mut self.doc
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn active_index(&self) -> usize {
        self.stepper.active_index()
    }

    pub fn steps(&self) -> &[Step] {
        self.stepper.steps()
    }

    pub fn badges(&self) -> Vec<StepBadge> {
        self.stepper.badges()
    }
}
