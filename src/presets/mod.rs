//! Starter zone file
//!
//! When no zone file exists the engine writes one built from the generated
//! industry presets and the bundled preset documents.

pub mod bundled;
pub mod industry;

pub use industry::{industry_presets, industry_spec, IndustryType, ResourceFamily, FAMILIES};

use crate::core::error::Result;
use crate::schema::{serialize, ConfigDocument, ParseError};

/// Produces the default zone file content
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfigGenerator;

impl DefaultConfigGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Every preset merged into one document; later presets win on id clashes
    pub fn document(&self) -> Result<ConfigDocument> {
        let mut doc = industry_presets();
        for (name, text) in bundled::BUNDLED {
            doc.merge(bundled::load_bundled(name, text)?);
        }
        Ok(doc)
    }

    /// The merged document as zone file text
    pub fn render(&self) -> Result<String> {
        let doc = self.document()?;
        let text = serialize(&doc).map_err(ParseError::from)?;
        Ok(text)
    }
}
