pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{Result, ZoneError};
pub use types::{join_tags, ResourceCategory, ResourceSet, ResourceTag, Rgba};
