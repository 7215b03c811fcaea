//! Zone file document model.
//!
//! The file is a JSON object with a version tag and a map of specializations
//! keyed by their stable id. Field names follow the host's PascalCase
//! convention; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::types::Rgba;
use crate::filter::{combine, CombinedFilter, FilterLayer};

/// Version tag every document is advanced to before use
pub const CURRENT_VERSION: &str = "v1alpha2";

fn current_version() -> String {
    CURRENT_VERSION.to_string()
}

/// Errors raised while reading the zone file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid zone document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("specialization with an empty id")]
    EmptyId,
}

/// One named derivation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpecializationSpec {
    /// Map key in the document; filled in on parse
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// May be blank; the lookup fails for this specialization alone
    #[serde(rename = "BaseZoneName", default)]
    pub base_template_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "Color", default)]
    pub accent_color: Rgba,
    #[serde(rename = "IconUri", default)]
    pub icon_ref: Option<String>,
    #[serde(rename = "Filters", default)]
    pub layers: Vec<FilterLayer>,
}

impl SpecializationSpec {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_template_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_template_name: base_template_name.into(),
            description: description.into(),
            accent_color: Rgba::default(),
            icon_ref: None,
            layers: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.accent_color = color;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon_ref = Some(icon.into());
        self
    }

    pub fn with_layer(mut self, layer: FilterLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// The effective filter of all layers
    pub fn combined_filter(&self) -> CombinedFilter {
        combine(&self.layers)
    }
}

/// The whole zone file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigDocument {
    /// A missing tag reads as the current version
    #[serde(default = "current_version")]
    pub version: String,
    #[serde(rename = "Zones", default)]
    pub specs: BTreeMap<String, SpecializationSpec>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDocument {
    /// Empty document at the current version
    pub fn new() -> Self {
        Self {
            version: current_version(),
            specs: BTreeMap::new(),
        }
    }

    /// Insert a spec under its id, replacing any previous one
    pub fn insert(&mut self, spec: SpecializationSpec) {
        self.specs.insert(spec.id.clone(), spec);
    }

    /// Merge another document's specs in; its entries win on id clashes
    pub fn merge(&mut self, other: ConfigDocument) {
        self.specs.extend(other.specs);
    }

    pub fn get(&self, id: &str) -> Option<&SpecializationSpec> {
        self.specs.get(id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn is_current(&self) -> bool {
        self.version == CURRENT_VERSION
    }
}

/// Parse zone file text
pub fn parse(text: &str) -> Result<ConfigDocument, ParseError> {
    let mut doc: ConfigDocument = serde_json::from_str(text)?;

    for (id, spec) in doc.specs.iter_mut() {
        if id.trim().is_empty() {
            return Err(ParseError::EmptyId);
        }
        spec.id = id.clone();
    }

    Ok(doc)
}

/// Serialize a document as indented JSON, always tagged with the current version
pub fn serialize(doc: &ConfigDocument) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Tagged<'a> {
        version: &'static str,
        zones: &'a BTreeMap<String, SpecializationSpec>,
    }

    serde_json::to_string_pretty(&Tagged {
        version: CURRENT_VERSION,
        zones: &doc.specs,
    })
}
