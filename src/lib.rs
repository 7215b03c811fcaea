//! Specialized Zones - config-driven derivation of specialized zone templates
//!
//! A versioned zone file describes specializations of generic base zones.
//! Each one narrows which resources the cloned zone and its buildings may
//! manufacture, store or sell. The reconciler keeps the host's template
//! registry in sync with that file across reloads.

pub mod core;
pub mod derivation;
pub mod filter;
pub mod host;
pub mod naming;
pub mod presets;
pub mod reconcile;
pub mod schema;
