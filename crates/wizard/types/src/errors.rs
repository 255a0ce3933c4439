//! Error types for the clearance wizard.
//!
//! There is no fatal error path in this system; these errors cover the
//! cases a caller can meaningfully react to. A visibility rule pointing at
//! a region that does not exist is deliberately NOT an error — the engine
//! logs a warning and continues. Likewise a missing task payload redirects
//! to the chooser instead of erroring.

use thiserror::Error;

/// Errors that can occur during wizard operations.
#[derive(Debug, Error)]
pub enum WizardError {
    /// A stored value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A step index outside the configured flow.
    #[error("unknown step index: {0}")]
    UnknownStep(usize),
}

/// Result type for wizard operations.
pub type WizardResult<T> = std::result::Result<T, WizardError>;
