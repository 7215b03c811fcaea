//! Template data as owned by the host registry.
//!
//! The engine reads base templates and writes the content of derived ones; the
//! host decides where they live.

use serde::{Deserialize, Serialize};

use crate::core::types::{ResourceCategory, ResourceTag, Rgba};

/// What kind of host entity a template describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Zone,
    Building,
}

impl Default for TemplateKind {
    fn default() -> Self {
        TemplateKind::Building
    }
}

/// Allowed resources per category (the host's resource-array component)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceArrays {
    #[serde(default)]
    pub manufactured: Vec<ResourceTag>,
    #[serde(default)]
    pub stored: Vec<ResourceTag>,
    #[serde(default)]
    pub sold: Vec<ResourceTag>,
}

impl ResourceArrays {
    pub fn get(&self, category: ResourceCategory) -> &[ResourceTag] {
        match category {
            ResourceCategory::Manufactured => &self.manufactured,
            ResourceCategory::Stored => &self.stored,
            ResourceCategory::Sold => &self.sold,
        }
    }

    pub fn set(&mut self, category: ResourceCategory, resources: Vec<ResourceTag>) {
        match category {
            ResourceCategory::Manufactured => self.manufactured = resources,
            ResourceCategory::Stored => self.stored = resources,
            ResourceCategory::Sold => self.sold = resources,
        }
    }
}

/// A legacy identifier that still resolves to a template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AliasRecord {
    pub name: String,
    pub kind: TemplateKind,
}

impl AliasRecord {
    pub fn new(name: impl Into<String>, kind: TemplateKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A zone or building template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub kind: TemplateKind,
    /// Zone edge color
    #[serde(default)]
    pub accent_color: Option<Rgba>,
    /// UI icon reference
    #[serde(default)]
    pub icon: Option<String>,
    /// Resource component; `None` when the template has none
    #[serde(default)]
    pub resources: Option<ResourceArrays>,
    /// Zone this building spawns in
    #[serde(default)]
    pub zone: Option<String>,
    /// Alias table; empty until something is recorded
    #[serde(default)]
    pub aliases: Vec<AliasRecord>,
}

impl Template {
    pub fn zone(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TemplateKind::Zone,
            accent_color: None,
            icon: None,
            resources: Some(ResourceArrays::default()),
            zone: None,
            aliases: Vec::new(),
        }
    }

    pub fn building(name: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TemplateKind::Building,
            accent_color: None,
            icon: None,
            resources: None,
            zone: Some(zone.into()),
            aliases: Vec::new(),
        }
    }

    /// Replace the resource component
    pub fn with_resources(
        mut self,
        manufactured: &[ResourceTag],
        stored: &[ResourceTag],
        sold: &[ResourceTag],
    ) -> Self {
        self.resources = Some(ResourceArrays {
            manufactured: manufactured.to_vec(),
            stored: stored.to_vec(),
            sold: sold.to_vec(),
        });
        self
    }

    pub fn with_alias(mut self, name: impl Into<String>) -> Self {
        let kind = self.kind;
        self.aliases.push(AliasRecord::new(name, kind));
        self
    }

    /// Whether this template spawns in the named zone
    pub fn belongs_to(&self, zone_name: &str) -> bool {
        self.zone.as_deref() == Some(zone_name)
    }
}
