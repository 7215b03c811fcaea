//! Host template registry
//!
//! The engine never reaches into host internals; everything it needs about base
//! templates and every write it makes goes through [`TemplateRegistry`].

use ahash::{AHashMap, AHashSet};
use thiserror::Error;

use crate::host::template::Template;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("host rejected template '{0}'")]
    Rejected(String),
    #[error("template '{0}' is not registered")]
    Missing(String),
    #[error("host failure for '{name}': {reason}")]
    Host { name: String, reason: String },
}

/// Template storage owned by the host
pub trait TemplateRegistry {
    /// Every registered template, in registration order
    fn list_all(&self) -> Vec<Template>;

    fn lookup(&self, name: &str) -> Option<Template>;

    /// Buildings that spawn in the given zone
    fn children_of(&self, parent: &str) -> Vec<Template> {
        self.list_all()
            .into_iter()
            .filter(|t| t.belongs_to(parent))
            .collect()
    }

    /// Copy `source` under a new name; the copy is not registered
    fn clone_template(&self, source: &Template, new_name: &str) -> Template {
        let mut copy = source.clone();
        copy.name = new_name.to_string();
        copy
    }

    /// Register a new template
    fn add(&mut self, template: Template) -> Result<(), RegistryError>;

    /// Replace an existing template in place
    fn update(&mut self, template: Template) -> Result<(), RegistryError>;
}

/// In-memory registry
///
/// Names listed with [`MemoryRegistry::reject`] fail every write, which stands
/// in for a host that refuses a template.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    templates: AHashMap<String, Template>,
    order: Vec<String>,
    rejected: AHashSet<String>,
    adds: usize,
    updates: usize,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a template without counting it as a write
    pub fn insert(&mut self, template: Template) {
        if !self.templates.contains_key(&template.name) {
            self.order.push(template.name.clone());
        }
        self.templates.insert(template.name.clone(), template);
    }

    pub fn with(mut self, template: Template) -> Self {
        self.insert(template);
        self
    }

    pub fn reject(&mut self, name: impl Into<String>) {
        self.rejected.insert(name.into());
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Successful `add` calls so far
    pub fn add_count(&self) -> usize {
        self.adds
    }

    /// Successful `update` calls so far
    pub fn update_count(&self) -> usize {
        self.updates
    }
}

impl TemplateRegistry for MemoryRegistry {
    fn list_all(&self) -> Vec<Template> {
        self.order
            .iter()
            .filter_map(|name| self.templates.get(name))
            .cloned()
            .collect()
    }

    fn lookup(&self, name: &str) -> Option<Template> {
        self.templates.get(name).cloned()
    }

    fn add(&mut self, template: Template) -> Result<(), RegistryError> {
        if self.rejected.contains(&template.name) || self.templates.contains_key(&template.name) {
            return Err(RegistryError::Rejected(template.name));
        }
        self.insert(template);
        self.adds += 1;
        Ok(())
    }

    fn update(&mut self, template: Template) -> Result<(), RegistryError> {
        if self.rejected.contains(&template.name) {
            return Err(RegistryError::Rejected(template.name));
        }
        match self.templates.get_mut(&template.name) {
            Some(slot) => {
                *slot = template;
                self.updates += 1;
                Ok(())
            }
            None => Err(RegistryError::Missing(template.name)),
        }
    }
}
