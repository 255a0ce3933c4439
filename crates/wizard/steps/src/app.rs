//! Wizard entry.
//!
//! The chooser leaves a `selectedTask` payload in the longer-lived cache;
//! launching without one (or with one that doesn't parse) redirects back
//! to the chooser instead of initializing anything. A valid payload seeds
//! the wizard's own session store, including the pre-populated
//! representative record of the elevated path.

use crate::flow;
use wizard_engine::{Redirect, Wizard};
use wizard_store::{SessionStore, StoreKey};
use wizard_types::{LegalRep, SelectedTask, UserLevel, WizardResult};

/// Outcome of a launch attempt.
pub enum Launch {
    /// The wizard is up, step 0 active.
    Ready(Box<Wizard>),
    /// The entry precondition failed.
    Redirect(Redirect),
}

/// Initialize the wizard from the longer-lived cache.
pub fn launch(site: &SessionStore) -> WizardResult<Launch> {
    let task: SelectedTask = match site.load(StoreKey::SelectedTask) {
        Ok(Some(task)) => task,
        Ok(None) => {
            tracing::info!("no task selected; redirecting to chooser");
            return Ok(Launch::Redirect(Redirect::Chooser));
        }
        Err(err) => {
            tracing::warn!(%err, "task payload unreadable; redirecting to chooser");
            return Ok(Launch::Redirect(Redirect::Chooser));
        }
    };

    let mut session = SessionStore::new();
    session.save(StoreKey::AccountInfo, &task.account_info)?;
    session.save(StoreKey::UserLevel, &task.user_level)?;

    if task.user_level == UserLevel::Elevated && !task.account_info.address.is_empty() {
        let rep = LegalRep::new(task.rac_user_name.clone().unwrap_or_default())
            .with_address(task.account_info.address.clone());
        session.save(StoreKey::LegalReps, &vec![rep])?;
    }
    if let Some(name) = &task.rac_user_name {
        session.save(StoreKey::RacUserName, name)?;
    }
    tracing::info!(
        account = %task.account_info.name,
        level = ?task.user_level,
        "wizard launched"
    );

    let wizard = Wizard::new(
        flow::document(),
        flow::steps(),
        0,
        flow::evaluator(),
        flow::registry(),
        session,
    )?;
    Ok(Launch::Ready(Box::new(wizard)))
}
