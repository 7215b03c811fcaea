//! Derivation of specialized templates
//!
//! A specialization clones its base zone (`parent`) and every child building
//! of that zone that fits the combined filter (`children`). Derivation only
//! produces templates; registering them is the reconciler's job.

pub mod children;
pub mod parent;

pub use children::{derive_children, select_child, DerivedChildren, SkipReason, SkippedChild};
pub use parent::derive_parent;

use crate::filter::CombinedFilter;
use crate::host::registry::TemplateRegistry;
use crate::host::template::Template;
use crate::naming::{NamingError, NamingRules};
use crate::schema::SpecializationSpec;

/// Everything derived for one specialization
#[derive(Debug, Clone)]
pub struct Derivation {
    pub parent: Template,
    pub children: DerivedChildren,
}

/// Derive the parent and its children in one go
///
/// `Ok(None)` when the parent would collide with its base.
pub fn derive<R: TemplateRegistry + ?Sized>(
    registry: &R,
    rules: &NamingRules,
    spec: &SpecializationSpec,
    base: &Template,
    base_children: &[Template],
    filter: &CombinedFilter,
) -> Result<Option<Derivation>, NamingError> {
    let Some(parent) = derive_parent(registry, rules, spec, base, filter)? else {
        return Ok(None);
    };
    let children = derive_children(registry, rules, spec, base_children, &parent, filter);
    Ok(Some(Derivation { parent, children }))
}
