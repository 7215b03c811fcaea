//! Filter algebra
//!
//! Specializations narrow a template's resources through an ordered list of
//! layers. This module combines those layers into one effective filter and
//! answers the questions derivation asks of it.

pub mod combine;
pub mod layer;

pub use combine::{combine, CombinedFilter};
pub use layer::FilterLayer;
