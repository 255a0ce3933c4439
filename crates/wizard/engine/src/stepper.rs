//! The step controller's mechanical half: the ordered step list, the
//! unique active step, status recomputation and numbering badges, and the
//! content measurement the accordion container relies on.
//!
//! Capture, persistence and handler dispatch around a transition live in
//! the [`crate::wizard::Wizard`], which drives this.

use wizard_types::{FormDocument, Step, StepBadge, StepStatus};

/// Direction of an explicit navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Back,
}

/// Ordered list of steps with exactly one active.
#[derive(Clone, Debug)]
pub struct Stepper {
    steps: Vec<Step>,
    active: usize,
}

impl Stepper {
    /// Build from statically defined steps; `initial` is the step
    /// pre-marked active at load time.
    pub fn new(mut steps: Vec<Step>, initial: usize) -> Self {
        let active = initial.min(steps.len().saturating_sub(1));
        for (i, step) in steps.iter_mut().enumerate() {
            step.status = status_for(i, active);
        }
        Self { steps, active }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_step(&self) -> &Step {
        &self.steps[self.active]
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The index a navigation would land on, or `None` when the move is
    /// out of range and must be rejected.
    pub fn target_of(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Next => {
                let target = self.active + 1;
                (target < self.steps.len()).then_some(target)
            }
            Direction::Back => self.active.checked_sub(1),
        }
    }

    /// Make `target` the active step: the outgoing step collapses, every
    /// status and badge is recomputed. Out-of-range targets are rejected.
    pub fn activate(&mut self, target: usize) -> bool {
        if target >= self.steps.len() {
            return false;
        }
        self.steps[self.active].content_extent = None;
        self.active = target;
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.status = status_for(i, target);
        }
        true
    }

    /// Numbering badges for every step, given the current active index.
    pub fn badges(&self) -> Vec<StepBadge> {
        (0..self.steps.len())
            .map(|i| StepBadge::for_step(i, self.active))
            .collect()
    }

    /// Re-measure the active step's expandable content. Called whenever a
    /// visibility change restructures the form — the structural-mutation
    /// observer of the accordion container.
    pub fn remeasure(&mut self, doc: &FormDocument) {
        let extent = doc.visible_extent(self.active);
        self.steps[self.active].content_extent = Some(extent);
    }
}

fn status_for(index: usize, active: usize) -> StepStatus {
    use std::cmp::Ordering;
    match index.cmp(&active) {
        Ordering::Less => StepStatus::Completed,
        Ordering::Equal => StepStatus::Active,
        Ordering::Greater => StepStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_types::{BadgeFill, BadgeGlyph};

    fn make_stepper() -> Stepper {
        let steps = (0..7).map(|i| Step::new(i, format!("Step {}", i))).collect();
        Stepper::new(steps, 0)
    }

    #[test]
    fn test_initial_active() {
        let stepper = make_stepper();
        assert_eq!(stepper.active_index(), 0);
        assert!(stepper.active_step().is_active());
    }

    #[test]
    fn test_target_of_respects_bounds() {
        let mut stepper = make_stepper();
        assert_eq!(stepper.target_of(Direction::Back), None);
        assert_eq!(stepper.target_of(Direction::Next), Some(1));

        stepper.activate(6);
        assert_eq!(stepper.target_of(Direction::Next), None);
        assert_eq!(stepper.target_of(Direction::Back), Some(5));
    }

    #[test]
    fn test_activate_recomputes_statuses() {
        let mut stepper = make_stepper();
        assert!(stepper.activate(3));

        assert_eq!(stepper.steps()[1].status, StepStatus::Completed);
        assert_eq!(stepper.steps()[3].status, StepStatus::Active);
        assert_eq!(stepper.steps()[5].status, StepStatus::Pending);
    }

    #[test]
    fn test_activate_out_of_range_rejected() {
        let mut stepper = make_stepper();
        assert!(!stepper.activate(7));
        assert_eq!(stepper.active_index(), 0);
    }

    #[test]
    fn test_moving_back_demotes_completed() {
        let mut stepper = make_stepper();
        stepper.activate(4);
        stepper.activate(2);
        // Steps past the new active point are pending again.
        assert_eq!(stepper.steps()[3].status, StepStatus::Pending);
        assert_eq!(stepper.steps()[1].status, StepStatus::Completed);
    }

    #[test]
    fn test_badges_follow_active() {
        let mut stepper = make_stepper();
        stepper.activate(2);
        let badges = stepper.badges();
        assert_eq!(badges[0].glyph, BadgeGlyph::Check);
        assert_eq!(badges[1].glyph, BadgeGlyph::Check);
        assert_eq!(badges[2].glyph, BadgeGlyph::Number(2));
        assert_eq!(badges[2].fill, BadgeFill::Emphasis);
        assert_eq!(badges[3].fill, BadgeFill::Muted);
    }

    #[test]
    fn test_deactivation_collapses_content() {
        let mut stepper = make_stepper();
        let doc = FormDocument::new();
        stepper.remeasure(&doc);
        assert!(stepper.active_step().content_extent.is_some());

        stepper.activate(1);
        assert!(stepper.steps()[0].content_extent.is_none());
    }
}
