//! Zone file version migrations.

use thiserror::Error;

use crate::core::types::{ResourceCategory, ResourceTag};
use crate::schema::document::{ConfigDocument, CURRENT_VERSION};

/// Specs whose id starts with this prefix received `Fish` in v1alpha2
const AGRICULTURE_PREFIX: &str = "Agriculture";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MigrationError {
    #[error("migration {from} -> {to} did not advance the document version")]
    Stalled { from: String, to: String },
    #[error("migration chain from {0} did not reach the current version")]
    Unterminated(String),
}

/// One version-to-version step
pub struct Migration {
    pub from: &'static str,
    pub to: &'static str,
    pub apply: fn(ConfigDocument) -> ConfigDocument,
}

/// Ordered table of known migrations
pub struct MigrationRegistry {
    migrations: Vec<Migration>,
}

impl MigrationRegistry {
    pub fn with_defaults() -> Self {
        Self {
            migrations: vec![Migration {
                from: "v1alpha1",
                to: "v1alpha2",
                apply: add_fish_to_agriculture,
            }],
        }
    }

    pub fn find(&self, from: &str) -> Option<&Migration> {
        self.migrations.iter().find(|m| m.from == from)
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

/// What `migrate_with_status` did to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationStatus {
    /// Already at the current version
    Current,
    /// Advanced from an older known version
    Migrated { from: String },
    /// Tag not in the migration table (newer or foreign); treated as current
    Unrecognized { version: String },
}

/// Advance a document to the current version
pub fn migrate(doc: ConfigDocument) -> Result<ConfigDocument, MigrationError> {
    migrate_with_status(doc).map(|(doc, _)| doc)
}

/// Advance a document to the current version, reporting what happened
pub fn migrate_with_status(
    mut doc: ConfigDocument,
) -> Result<(ConfigDocument, MigrationStatus), MigrationError> {
    if doc.version == CURRENT_VERSION {
        return Ok((doc, MigrationStatus::Current));
    }

    let registry = MigrationRegistry::with_defaults();
    let original = doc.version.clone();

    if registry.find(&original).is_none() {
        tracing::debug!(version = %original, "Unrecognized zone file version, reading as current");
        doc.version = CURRENT_VERSION.to_string();
        return Ok((doc, MigrationStatus::Unrecognized { version: original }));
    }

    // Each step must advance, so the chain is at most one pass over the table
    for _ in 0..registry.len() {
        if doc.version == CURRENT_VERSION {
            break;
        }
        let current = doc.version.clone();
        let Some(migration) = registry.find(&current) else {
            return Err(MigrationError::Unterminated(original));
        };

        tracing::info!(from = migration.from, to = migration.to, "Migrating zone file");
        let mut updated = (migration.apply)(doc);
        updated.version = migration.to.to_string();
        if updated.version == current {
            return Err(MigrationError::Stalled {
                from: current,
                to: migration.to.to_string(),
            });
        }
        doc = updated;
    }

    if doc.version != CURRENT_VERSION {
        return Err(MigrationError::Unterminated(original));
    }

    Ok((doc, MigrationStatus::Migrated { from: original }))
}

/// v1alpha1 -> v1alpha2: Fish became an agricultural resource
///
/// Only non-empty sets get it; an empty set means the category does not apply.
fn add_fish_to_agriculture(mut doc: ConfigDocument) -> ConfigDocument {
    for (id, spec) in doc.specs.iter_mut() {
        if !id.starts_with(AGRICULTURE_PREFIX) {
            continue;
        }

        spec.description = spec.description.replace("Cotton,", "Cotton, Fish,");

        for layer in spec.layers.iter_mut() {
            for category in [ResourceCategory::Manufactured, ResourceCategory::Stored] {
                if let Some(set) = layer.resources_mut(category) {
                    if !set.is_empty() {
                        set.insert(ResourceTag::Fish);
                    }
                }
            }
        }
    }
    doc
}
