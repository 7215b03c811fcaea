//! Keeping the host registry in sync with the zone file

pub mod provisioned;
pub mod reconciler;
pub mod report;

pub use provisioned::ProvisionedRegistry;
pub use reconciler::ZoneReconciler;
pub use report::{ReconcileReport, SpecError, TickOutcome};
