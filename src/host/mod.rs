//! Host collaborators
//!
//! Template storage, the zone file and label publishing belong to the host.
//! The engine talks to them only through the traits defined here; the
//! in-memory implementations back the tests and the demo binary.

pub mod catalog;
pub mod labels;
pub mod registry;
pub mod store;
pub mod template;

pub use catalog::{CatalogLoadError, TemplateCatalog};
pub use labels::{LabelPublisher, LabelSet, StringTablePublisher};
pub use registry::{MemoryRegistry, RegistryError, TemplateRegistry};
pub use store::{ConfigStore, FsConfigStore, MemoryConfigStore, StoreError};
pub use template::{AliasRecord, ResourceArrays, Template, TemplateKind};
