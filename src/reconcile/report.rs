//! What a polling tick did.

use std::time::Duration;

use thiserror::Error;

use crate::host::registry::RegistryError;
use crate::naming::NamingError;

/// Why one specialization could not be provisioned
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("base template '{0}' not found")]
    BaseTemplateNotFound(String),
    #[error("renaming '{0}' did not change its name")]
    DerivationSkipped(String),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result of one `poll` call
#[derive(Debug, Clone)]
pub enum TickOutcome {
    /// Poll interval has not elapsed
    Throttled,
    /// Zone file was missing and has been written
    Seeded,
    /// Zone file was missing and could not be written
    SeedFailed(String),
    /// Modification time unchanged since the last load
    Unchanged,
    /// Read, parse or migration failed; registry untouched
    LoadFailed(String),
    Reconciled(ReconcileReport),
}

impl TickOutcome {
    pub fn report(&self) -> Option<&ReconcileReport> {
        match self {
            TickOutcome::Reconciled(report) => Some(report),
            _ => None,
        }
    }

    /// Whether the tick did no work at all
    pub fn is_noop(&self) -> bool {
        matches!(self, TickOutcome::Throttled | TickOutcome::Unchanged)
    }
}

/// Per-reload summary
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    /// Spec ids provisioned for the first time
    pub created: Vec<String>,
    /// Spec ids refreshed in place
    pub updated: Vec<String>,
    pub failures: Vec<(String, SpecError)>,
    pub children_written: usize,
    /// Children left out, whether not applicable or failed
    pub children_skipped: usize,
    pub elapsed: Duration,
}

impl ReconcileReport {
    pub fn failure(&self, spec_id: &str) -> Option<&SpecError> {
        self.failures
            .iter()
            .find(|(id, _)| id == spec_id)
            .map(|(_, e)| e)
    }
}
