//! Session-scoped key/value cache for the clearance wizard.
//!
//! The only persistence mechanism in the system: a synchronous, in-memory,
//! single-threaded store of JSON values, scoped to one browser-tab-like
//! session. The store is injected into every component that needs it —
//! never reached as ambient global state — which keeps the core testable.
//!
//! Two instances exist at runtime: the wizard's own session store (wiped
//! when the flow is abandoned) and the longer-lived site cache the hand-off
//! copies into.

#![deny(unsafe_code)]

pub mod keys;
pub mod session;

pub use keys::StoreKey;
pub use session::SessionStore;
