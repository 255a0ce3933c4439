//! Steps: the ordered sections of the wizard and their status display.

use serde::{Deserialize, Serialize};

// ── Step ─────────────────────────────────────────────────────────────

/// Lifecycle status of a step. Exactly one step is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StepStatus {
    /// Not yet reached (or revisited past it going back).
    #[default]
    Pending,
    /// The step currently shown.
    Active,
    /// Behind the active step.
    Completed,
}

/// One section of the wizard. Steps are statically defined at load time;
/// only their status changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Ordinal position, starting at 0.
    pub index: usize,
    /// Section heading.
    pub title: String,
    pub status: StepStatus,
    /// Expandable content height of the step's region; `None` while the
    /// step is collapsed. Re-measured by the content observer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_extent: Option<usize>,
}

impl Step {
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            status: StepStatus::Pending,
            content_extent: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == StepStatus::Active
    }
}

// ── Numbering Badge ──────────────────────────────────────────────────

/// What the numbering badge of a step shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeGlyph {
    /// Info glyph; only the first step, while not yet completed.
    Info,
    /// The step's ordinal.
    Number(usize),
    /// Check mark for completed steps.
    Check,
}

/// Fill color class of a badge. Active and completed steps share one fill,
/// later steps the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeFill {
    Emphasis,
    Muted,
}

/// Rendered state of one step's numbering badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepBadge {
    pub glyph: BadgeGlyph,
    pub fill: BadgeFill,
}

impl StepBadge {
    /// Compute the badge for the step at `index` given the active index.
    pub fn for_step(index: usize, active_index: usize) -> Self {
        let completed = index < active_index;
        let fill = if completed || index == active_index {
            BadgeFill::Emphasis
        } else {
            BadgeFill::Muted
        };
        let glyph = if completed {
            BadgeGlyph::Check
        } else if index == 0 {
            BadgeGlyph::Info
        } else {
            BadgeGlyph::Number(index)
        };
        Self { glyph, fill }
    }
}
