//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Resource a template can manufacture, store, or sell
///
/// Mirrors the host economy's editor resource list. Serialized by variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceTag {
    NoResource,
    Money,
    Grain,
    ConvenienceFood,
    Food,
    Vegetables,
    Meals,
    Wood,
    Timber,
    Paper,
    Furniture,
    Vehicles,
    Lodging,
    UnsortedMail,
    LocalMail,
    OutgoingMail,
    Oil,
    Petrochemicals,
    Ore,
    Plastics,
    Metals,
    Electronics,
    Software,
    Coal,
    Stone,
    Livestock,
    Cotton,
    Steel,
    Minerals,
    Concrete,
    Machinery,
    Chemicals,
    Pharmaceuticals,
    Beverages,
    Textiles,
    Telecom,
    Financial,
    Media,
    Entertainment,
    Recreation,
    Garbage,
    Fish,
}

impl fmt::Display for ResourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Ordered set of resources. Ordering keeps written files and labels stable.
pub type ResourceSet = BTreeSet<ResourceTag>;

/// The three resource categories a template is constrained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    Manufactured,
    Stored,
    Sold,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 3] = [
        ResourceCategory::Manufactured,
        ResourceCategory::Stored,
        ResourceCategory::Sold,
    ];
}

/// RGBA accent color
///
/// Extra channels the host serializer writes (`grayscale`, `maxColorComponent`)
/// are ignored on read.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    pub const BLUE: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
}

/// Join resource tags for human-readable text ("Wood, Timber")
pub fn join_tags<'a>(tags: impl IntoIterator<Item = &'a ResourceTag>) -> String {
    tags.into_iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
