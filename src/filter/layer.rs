//! A single filter fragment as written in the zone file.

use serde::{Deserialize, Serialize};

use crate::core::types::{ResourceCategory, ResourceSet};

/// One rule fragment of a specialization
///
/// `None` means the layer has no opinion on that category. `Some(empty)` is a
/// real constraint that permits nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterLayer {
    #[serde(default)]
    pub manufactured_resources: Option<ResourceSet>,
    #[serde(default)]
    pub stored_resources: Option<ResourceSet>,
    #[serde(default)]
    pub sold_resources: Option<ResourceSet>,
    #[serde(default)]
    pub require_manufactured: Option<bool>,
    #[serde(default)]
    pub require_stored: Option<bool>,
    #[serde(default)]
    pub require_sold: Option<bool>,
}

impl FilterLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer constraining all three categories to the same set
    pub fn uniform(resources: ResourceSet) -> Self {
        Self {
            manufactured_resources: Some(resources.clone()),
            stored_resources: Some(resources.clone()),
            sold_resources: Some(resources),
            ..Self::default()
        }
    }

    pub fn with_manufactured(mut self, resources: ResourceSet) -> Self {
        self.manufactured_resources = Some(resources);
        self
    }

    pub fn with_stored(mut self, resources: ResourceSet) -> Self {
        self.stored_resources = Some(resources);
        self
    }

    pub fn with_sold(mut self, resources: ResourceSet) -> Self {
        self.sold_resources = Some(resources);
        self
    }

    pub fn requiring(mut self, category: ResourceCategory, required: bool) -> Self {
        *self.requirement_mut(category) = Some(required);
        self
    }

    /// Resource set for a category, if the layer constrains it
    pub fn resources(&self, category: ResourceCategory) -> Option<&ResourceSet> {
        match category {
            ResourceCategory::Manufactured => self.manufactured_resources.as_ref(),
            ResourceCategory::Stored => self.stored_resources.as_ref(),
            ResourceCategory::Sold => self.sold_resources.as_ref(),
        }
    }

    pub fn resources_mut(&mut self, category: ResourceCategory) -> Option<&mut ResourceSet> {
        match category {
            ResourceCategory::Manufactured => self.manufactured_resources.as_mut(),
            ResourceCategory::Stored => self.stored_resources.as_mut(),
            ResourceCategory::Sold => self.sold_resources.as_mut(),
        }
    }

    pub fn requirement(&self, category: ResourceCategory) -> Option<bool> {
        match category {
            ResourceCategory::Manufactured => self.require_manufactured,
            ResourceCategory::Stored => self.require_stored,
            ResourceCategory::Sold => self.require_sold,
        }
    }

    fn requirement_mut(&mut self, category: ResourceCategory) -> &mut Option<bool> {
        match category {
            ResourceCategory::Manufactured => &mut self.require_manufactured,
            ResourceCategory::Stored => &mut self.require_stored,
            ResourceCategory::Sold => &mut self.require_sold,
        }
    }
}
