//! Specializations materialized so far, keyed by spec id.
//!
//! Entries are added on first provisioning and refreshed afterwards. Nothing
//! is ever removed: a spec dropped from the zone file keeps its last template.

use ahash::AHashMap;

use crate::host::template::Template;

#[derive(Debug, Clone, Default)]
pub struct ProvisionedRegistry {
    parents: AHashMap<String, Template>,
}

impl ProvisionedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the derived parent for a spec id; returns true for a new id
    pub fn record(&mut self, spec_id: &str, parent: Template) -> bool {
        self.parents.insert(spec_id.to_string(), parent).is_none()
    }

    pub fn get(&self, spec_id: &str) -> Option<&Template> {
        self.parents.get(spec_id)
    }

    pub fn contains(&self, spec_id: &str) -> bool {
        self.parents.contains_key(spec_id)
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Provisioned spec ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.parents.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new_then_refresh() {
        let mut provisioned = ProvisionedRegistry::new();
        assert!(provisioned.record("OilGeneral", Template::zone("A")));
        assert!(!provisioned.record("OilGeneral", Template::zone("B")));
        assert_eq!(provisioned.len(), 1);
        assert_eq!(provisioned.get("OilGeneral").unwrap().name, "B");
    }

    #[test]
    fn test_ids_sorted() {
        let mut provisioned = ProvisionedRegistry::new();
        provisioned.record("OreGeneral", Template::zone("A"));
        provisioned.record("ForestryGeneral", Template::zone("B"));
        assert_eq!(provisioned.ids(), vec!["ForestryGeneral", "OreGeneral"]);
    }
}
