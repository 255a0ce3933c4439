//! The key namespace of the session cache.
//!
//! Every persisted value lives under one of these keys; the `Display`
//! impl yields the exact wire spelling the cache uses.

/// A key in the session cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// The trust account on file.
    AccountInfo,
    /// Privilege level of the signed-in representative.
    UserLevel,
    /// The representative records collected by step 3.
    LegalReps,
    /// Name of the authenticated representative.
    RacUserName,
    /// Captured snapshot of one step, keyed by its ordinal.
    StepData(usize),
    /// Entry-precondition payload in the longer-lived cache.
    SelectedTask,
    /// Hand-off key the confirmation destination reads.
    LegalRepresentative,
    /// One-shot flag suppressing the store wipe during the hand-off.
    NavigatingToConfirmation,
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccountInfo => write!(f, "accountInfo"),
            Self::UserLevel => write!(f, "userLevel"),
            Self::LegalReps => write!(f, "legalReps"),
            Self::RacUserName => write!(f, "racUserName"),
            Self::StepData(step) => write!(f, "stepData_{}", step),
            Self::SelectedTask => write!(f, "selectedTask"),
            Self::LegalRepresentative => write!(f, "legalRepresentative"),
            Self::NavigatingToConfirmation => write!(f, "navigatingToConfirmation"),
        }
    }
}
