//! Derived child (building) templates
//!
//! A child is carried into a specialization only when its own resources are
//! relevant to the combined filter and every required category overlaps.
//! Children without a resource component are always carried over unchanged.

use crate::core::types::ResourceCategory;
use crate::derivation::parent::apply_filter;
use crate::filter::CombinedFilter;
use crate::host::registry::TemplateRegistry;
use crate::host::template::{ResourceArrays, Template};
use crate::naming::{derive_aliases, NamingError, NamingRules};
use crate::schema::SpecializationSpec;

/// Why a child was left out of a specialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No category overlaps the filter
    NotRelevant,
    /// A required category has no overlap
    RequirementUnmet(ResourceCategory),
    /// Renaming produced the original name
    NameUnchanged,
    Naming(NamingError),
}

impl SkipReason {
    /// Whether the skip points at a configuration problem rather than a
    /// child that simply does not belong to the specialization
    pub fn is_failure(&self) -> bool {
        matches!(self, SkipReason::NameUnchanged | SkipReason::Naming(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedChild {
    pub name: String,
    pub reason: SkipReason,
}

/// Children derived for one specialization
#[derive(Debug, Clone, Default)]
pub struct DerivedChildren {
    /// Derived templates, in source order
    pub templates: Vec<Template>,
    pub skipped: Vec<SkippedChild>,
}

impl DerivedChildren {
    pub fn failures(&self) -> impl Iterator<Item = &SkippedChild> {
        self.skipped.iter().filter(|s| s.reason.is_failure())
    }
}

/// Decide whether a child belongs to the specialization
pub fn select_child(arrays: &ResourceArrays, filter: &CombinedFilter) -> Result<(), SkipReason> {
    let relevant = ResourceCategory::ALL
        .iter()
        .any(|category| filter.overlaps(*category, arrays.get(*category)));
    if !relevant {
        return Err(SkipReason::NotRelevant);
    }

    for category in ResourceCategory::ALL {
        if filter.requires(category) && !filter.overlaps(category, arrays.get(category)) {
            return Err(SkipReason::RequirementUnmet(category));
        }
    }
    Ok(())
}

/// Derive the specialized copies of the base zone's children
///
/// Each child is handled on its own; a failure drops only that child.
pub fn derive_children<R: TemplateRegistry + ?Sized>(
    registry: &R,
    rules: &NamingRules,
    spec: &SpecializationSpec,
    children: &[Template],
    derived_parent: &Template,
    filter: &CombinedFilter,
) -> DerivedChildren {
    let mut out = DerivedChildren::default();

    for child in children {
        match derive_child(registry, rules, spec, child, derived_parent, filter) {
            Ok(template) => out.templates.push(template),
            Err(reason) => {
                if reason.is_failure() {
                    tracing::warn!(spec_id = %spec.id, template = %child.name, ?reason, "Skipping child template");
                } else {
                    tracing::trace!(spec_id = %spec.id, template = %child.name, ?reason, "Child not applicable");
                }
                out.skipped.push(SkippedChild {
                    name: child.name.clone(),
                    reason,
                });
            }
        }
    }

    out
}

fn derive_child<R: TemplateRegistry + ?Sized>(
    registry: &R,
    rules: &NamingRules,
    spec: &SpecializationSpec,
    child: &Template,
    derived_parent: &Template,
    filter: &CombinedFilter,
) -> Result<Template, SkipReason> {
    if let Some(arrays) = &child.resources {
        select_child(arrays, filter)?;
    }

    let new_name = rules.rename(&child.name, &spec.id).map_err(SkipReason::Naming)?;
    if new_name == child.name {
        return Err(SkipReason::NameUnchanged);
    }

    let mut derived = registry.clone_template(child, &new_name);
    apply_filter(&mut derived, filter);
    derived.zone = Some(derived_parent.name.clone());
    derived.aliases = derive_aliases(rules, &child.name, derived.kind, &child.aliases, &spec.id, &spec.name);

    Ok(derived)
}
