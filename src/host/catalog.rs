//! Base template catalog - zones and buildings loaded from TOML
//!
//! Stands in for the host's own template list when the engine runs outside
//! the game, e.g. in the demo binary or in tests.

use ahash::AHashSet;
use serde::Deserialize;

use crate::core::types::ResourceTag;
use crate::host::labels::{description_key, title_key, StringTablePublisher};
use crate::host::registry::MemoryRegistry;
use crate::host::template::{AliasRecord, ResourceArrays, Template, TemplateKind};

/// Base templates plus their UI strings
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    strings: Vec<(String, String)>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Registry seeded with every catalog template
    pub fn to_registry(&self) -> MemoryRegistry {
        let mut registry = MemoryRegistry::new();
        for template in &self.templates {
            registry.insert(template.clone());
        }
        registry
    }

    /// Locale table holding the base titles and descriptions
    pub fn to_string_table(&self) -> StringTablePublisher {
        let mut table = StringTablePublisher::new();
        for (key, value) in &self.strings {
            table.insert(key.clone(), value.clone());
        }
        table
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, CatalogLoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogLoadError::IoError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, CatalogLoadError> {
        let toml_data: TomlCatalog =
            toml::from_str(content).map_err(|e| CatalogLoadError::ParseError(e.to_string()))?;

        let mut catalog = Self::new();
        for zone in toml_data.zones {
            catalog.push(zone.into_template(TemplateKind::Zone)?);
        }
        for building in toml_data.buildings {
            if building.zone.is_none() {
                return Err(CatalogLoadError::MissingZone(building.name));
            }
            catalog.push(building.into_template(TemplateKind::Building)?);
        }
        catalog.check_unique()?;
        Ok(catalog)
    }

    /// Reject catalogs that name two templates the same
    pub fn check_unique(&self) -> Result<(), CatalogLoadError> {
        let mut seen = AHashSet::new();
        for template in &self.templates {
            if !seen.insert(template.name.as_str()) {
                return Err(CatalogLoadError::DuplicateName(template.name.clone()));
            }
        }
        Ok(())
    }

    fn push(&mut self, (template, title, description): (Template, Option<String>, Option<String>)) {
        if let Some(title) = title {
            self.strings.push((title_key(&template.name), title));
        }
        if let Some(description) = description {
            self.strings.push((description_key(&template.name), description));
        }
        self.templates.push(template);
    }
}

/// Error type for catalog loading
#[derive(Debug, Clone)]
pub enum CatalogLoadError {
    IoError(String),
    ParseError(String),
    DuplicateName(String),
    MissingZone(String),
}

impl std::fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogLoadError::IoError(e) => write!(f, "IO error: {}", e),
            CatalogLoadError::ParseError(e) => write!(f, "Parse error: {}", e),
            CatalogLoadError::DuplicateName(e) => write!(f, "Duplicate template name: {}", e),
            CatalogLoadError::MissingZone(e) => write!(f, "Building {} has no zone", e),
        }
    }
}

impl std::error::Error for CatalogLoadError {}

/// TOML representation of a catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    zones: Vec<TomlTemplate>,
    #[serde(default)]
    buildings: Vec<TomlTemplate>,
}

/// TOML representation of one template
#[derive(Debug, Deserialize)]
struct TomlTemplate {
    name: String,
    zone: Option<String>,
    title: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    /// Buildings without economic properties leave all three out
    manufactured: Option<Vec<ResourceTag>>,
    stored: Option<Vec<ResourceTag>>,
    sold: Option<Vec<ResourceTag>>,
    #[serde(default)]
    aliases: Vec<String>,
}

impl TomlTemplate {
    fn into_template(
        self,
        kind: TemplateKind,
    ) -> Result<(Template, Option<String>, Option<String>), CatalogLoadError> {
        if self.name.trim().is_empty() {
            return Err(CatalogLoadError::ParseError("template with empty name".into()));
        }

        let resources = if self.manufactured.is_none() && self.stored.is_none() && self.sold.is_none() {
            None
        } else {
            Some(ResourceArrays {
                manufactured: self.manufactured.unwrap_or_default(),
                stored: self.stored.unwrap_or_default(),
                sold: self.sold.unwrap_or_default(),
            })
        };

        let template = Template {
            aliases: self
                .aliases
                .into_iter()
                .map(|name| AliasRecord::new(name, kind))
                .collect(),
            name: self.name,
            kind,
            accent_color: None,
            icon: self.icon,
            resources,
            zone: self.zone,
        };
        Ok((template, self.title, self.description))
    }
}
