//! Bespoke per-step behavior behind the engine's handler trait.

mod clearance_type;
mod estate_info;
mod representatives;
mod review;

pub use clearance_type::ClearanceTypeHandler;
pub use estate_info::EstateInfoHandler;
pub use representatives::{RepresentativesHandler, LIGHTBOX_ID, TABLE_ID};
pub use review::{assemble_review, format_date, label_for, ReviewHandler};

use serde::de::DeserializeOwned;
use wizard_store::{SessionStore, StoreKey};
use wizard_types::{FormDocument, RegionId};

/// Load a stored value, degrading to the default on absence or malformed
/// JSON. Handlers have no fatal path; a bad stored value is a diagnostic.
pub(crate) fn load_or_default<T>(session: &SessionStore, key: StoreKey) -> T
where
    T: DeserializeOwned + Default,
{
    match session.load::<T>(key.clone()) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            tracing::warn!(%err, key = %key, "stored value unreadable; using default");
            T::default()
        }
    }
}

/// Show or hide a region by id; a missing region is a diagnostic, not an
/// error.
pub(crate) fn set_region_hidden(doc: &mut FormDocument, id: &str, hidden: bool) {
    match doc.region_mut(&RegionId::new(id)) {
        Some(region) => region.hidden = hidden,
        None => tracing::warn!(region = id, "region not in document"),
    }
}

/// Replace a region's display copy.
pub(crate) fn set_region_text(doc: &mut FormDocument, id: &str, text: String) {
    match doc.region_mut(&RegionId::new(id)) {
        Some(region) => region.text = Some(text),
        None => tracing::warn!(region = id, "region not in document"),
    }
}
