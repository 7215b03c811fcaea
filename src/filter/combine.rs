//! Layer combination and the effective filter derived from it

use crate::core::types::{join_tags, ResourceCategory, ResourceSet, ResourceTag};
use crate::filter::layer::FilterLayer;

/// The single effective filter for a specialization
///
/// Derived from its layers on every load, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedFilter {
    pub manufactured: Option<ResourceSet>,
    pub stored: Option<ResourceSet>,
    pub sold: Option<ResourceSet>,
    pub require_manufactured: Option<bool>,
    pub require_stored: Option<bool>,
    pub require_sold: Option<bool>,
}

/// Combine ordered layers into one filter
///
/// Resource sets intersect across the layers that supply them; a category no
/// layer supplies stays unconstrained. Requirement flags take the first
/// non-null value in layer order.
pub fn combine(layers: &[FilterLayer]) -> CombinedFilter {
    let mut combined = CombinedFilter::default();

    for category in ResourceCategory::ALL {
        let set = layers
            .iter()
            .filter_map(|layer| layer.resources(category))
            .fold(None, |acc: Option<ResourceSet>, set| match acc {
                None => Some(set.clone()),
                Some(acc) => Some(acc.intersection(set).copied().collect()),
            });
        let requirement = layers.iter().find_map(|layer| layer.requirement(category));

        match category {
            ResourceCategory::Manufactured => {
                combined.manufactured = set;
                combined.require_manufactured = requirement;
            }
            ResourceCategory::Stored => {
                combined.stored = set;
                combined.require_stored = requirement;
            }
            ResourceCategory::Sold => {
                combined.sold = set;
                combined.require_sold = requirement;
            }
        }
    }

    combined
}

impl CombinedFilter {
    /// Filter that permits everything and requires nothing
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn resources(&self, category: ResourceCategory) -> Option<&ResourceSet> {
        match category {
            ResourceCategory::Manufactured => self.manufactured.as_ref(),
            ResourceCategory::Stored => self.stored.as_ref(),
            ResourceCategory::Sold => self.sold.as_ref(),
        }
    }

    /// Whether the category is required to overlap (null counts as not required)
    pub fn requires(&self, category: ResourceCategory) -> bool {
        let flag = match category {
            ResourceCategory::Manufactured => self.require_manufactured,
            ResourceCategory::Stored => self.require_stored,
            ResourceCategory::Sold => self.require_sold,
        };
        flag.unwrap_or(false)
    }

    /// Restrict a template's resource array to what this filter permits
    ///
    /// An unconstrained category passes the array through. Order follows the
    /// template's own array.
    pub fn restrict(&self, category: ResourceCategory, allowed: &[ResourceTag]) -> Vec<ResourceTag> {
        match self.resources(category) {
            None => allowed.to_vec(),
            Some(set) => allowed.iter().copied().filter(|tag| set.contains(tag)).collect(),
        }
    }

    /// Whether a template's resources in a category are relevant to this filter
    ///
    /// An unconstrained category counts every resource as relevant, so the
    /// answer is whether the template has any resource there at all.
    pub fn overlaps(&self, category: ResourceCategory, allowed: &[ResourceTag]) -> bool {
        match self.resources(category) {
            None => !allowed.is_empty(),
            Some(set) => allowed.iter().any(|tag| set.contains(tag)),
        }
    }

    /// Human-readable list of permitted resources across all categories
    ///
    /// `None` when no category is constrained.
    pub fn summary(&self) -> Option<String> {
        if ResourceCategory::ALL
            .iter()
            .all(|category| self.resources(*category).is_none())
        {
            return None;
        }

        let union: ResourceSet = ResourceCategory::ALL
            .iter()
            .filter_map(|category| self.resources(*category))
            .flatten()
            .copied()
            .collect();
        Some(join_tags(&union))
    }
}
