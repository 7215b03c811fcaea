//! Versioned zone file schema
//!
//! Parsing, serialization and the migration chain that brings older documents
//! up to the current version.

pub mod document;
pub mod migration;

pub use document::{
    parse, serialize, ConfigDocument, ParseError, SpecializationSpec, CURRENT_VERSION,
};
pub use migration::{migrate, migrate_with_status, MigrationError, MigrationStatus};
