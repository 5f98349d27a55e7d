//! Session reconciliation.

mod reconciler;

pub use reconciler::{derive_username, SessionReconciler};
