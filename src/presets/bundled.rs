//! Preset documents embedded at compile time.

use crate::core::error::Result;
use crate::schema::{migrate, parse, ConfigDocument};

/// Bundled presets, merged in this order
pub const BUNDLED: [(&str, &str); 4] = [
    (
        "office_by_education",
        include_str!("../../data/presets/office_by_education.json"),
    ),
    (
        "industry_by_education",
        include_str!("../../data/presets/industry_by_education.json"),
    ),
    (
        "commercial_by_education",
        include_str!("../../data/presets/commercial_by_education.json"),
    ),
    (
        "commercial_by_model",
        include_str!("../../data/presets/commercial_by_model.json"),
    ),
];

/// Parse and migrate one bundled preset
pub fn load_bundled(name: &str, text: &str) -> Result<ConfigDocument> {
    let doc = migrate(parse(text)?)?;
    tracing::debug!(preset = name, specs = doc.len(), "Loaded bundled preset");
    Ok(doc)
}
