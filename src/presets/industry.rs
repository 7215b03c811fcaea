//! Generated industry specializations
//!
//! Four resource families crossed with three industry types give the twelve
//! built-in industrial specializations.

use crate::core::types::{join_tags, ResourceCategory, ResourceSet, ResourceTag, Rgba};
use crate::filter::FilterLayer;
use crate::schema::{ConfigDocument, SpecializationSpec};

use ResourceTag::*;

/// Base zone every industry preset derives from
pub const INDUSTRY_BASE_ZONE: &str = "Industrial Manufacturing";

/// A family of related industrial resources
#[derive(Debug, Clone, Copy)]
pub struct ResourceFamily {
    pub name: &'static str,
    pub color: Rgba,
    /// In the order they appear in descriptions
    pub resources: &'static [ResourceTag],
}

pub const FAMILIES: [ResourceFamily; 4] = [
    ResourceFamily {
        name: "Forestry",
        color: Rgba::GREEN,
        resources: &[Wood, Timber, Paper, Furniture],
    },
    ResourceFamily {
        name: "Agriculture",
        color: Rgba::RED,
        resources: &[
            Grain,
            Livestock,
            Vegetables,
            Cotton,
            Fish,
            Beverages,
            ConvenienceFood,
            Food,
            Textiles,
        ],
    },
    ResourceFamily {
        name: "Ore",
        color: Rgba::BLUE,
        resources: &[
            Ore, Coal, Stone, Minerals, Concrete, Steel, Metals, Machinery, Vehicles,
        ],
    },
    ResourceFamily {
        name: "Oil",
        color: Rgba::BLACK,
        resources: &[
            Oil,
            Petrochemicals,
            Chemicals,
            Pharmaceuticals,
            Plastics,
            Electronics,
        ],
    },
];

/// Which part of the industrial zone a preset covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndustryType {
    General,
    Manufacturing,
    Warehouses,
}

impl IndustryType {
    pub const ALL: [IndustryType; 3] = [
        IndustryType::General,
        IndustryType::Manufacturing,
        IndustryType::Warehouses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndustryType::General => "General",
            IndustryType::Manufacturing => "Manufacturing",
            IndustryType::Warehouses => "Warehouses",
        }
    }

    fn description_prefix(&self) -> &'static str {
        match self {
            IndustryType::General => "Manufacturing and warehouses",
            IndustryType::Manufacturing => "Manufacturing only",
            IndustryType::Warehouses => "Warehouses only",
        }
    }

    /// Icon variant; general presets share the manufacturing icon
    fn icon_variant(&self) -> &'static str {
        match self {
            IndustryType::Warehouses => "Warehouses",
            _ => "Manufacturing",
        }
    }

    fn required_category(&self) -> Option<ResourceCategory> {
        match self {
            IndustryType::General => None,
            IndustryType::Manufacturing => Some(ResourceCategory::Manufactured),
            IndustryType::Warehouses => Some(ResourceCategory::Stored),
        }
    }
}

/// Build one industry preset
pub fn industry_spec(family: &ResourceFamily, industry: IndustryType) -> SpecializationSpec {
    let id = format!("{}{}", family.name, industry.as_str());
    let name = match industry {
        IndustryType::General => family.name.to_string(),
        _ => format!("{} - {} Only", family.name, industry.as_str()),
    };
    let description = format!(
        "{} - {}",
        industry.description_prefix(),
        join_tags(family.resources)
    );
    let icon = format!(
        "coui://speciz/ZoneIndustrial{}_{}.svg",
        industry.icon_variant(),
        family.name
    );

    let resources: ResourceSet = family.resources.iter().copied().collect();
    let mut layer = FilterLayer::uniform(resources);
    if let Some(category) = industry.required_category() {
        layer = layer.requiring(category, true);
    }

    SpecializationSpec::new(id, name, INDUSTRY_BASE_ZONE, description)
        .with_color(family.color)
        .with_icon(icon)
        .with_layer(layer)
}

/// All generated industry presets at the current version
pub fn industry_presets() -> ConfigDocument {
    let mut doc = ConfigDocument::new();
    for family in &FAMILIES {
        for industry in IndustryType::ALL {
            doc.insert(industry_spec(family, industry));
        }
    }
    doc
}
