//! UI label publishing for derived templates.
//!
//! The engine only decides which strings a derived template needs; a
//! [`LabelPublisher`] turns them into host string table entries.

use ahash::AHashMap;

use crate::filter::CombinedFilter;
use crate::host::template::Template;
use crate::schema::SpecializationSpec;

/// String table key of a template's display name
pub fn title_key(template_name: &str) -> String {
    format!("Assets.NAME[{template_name}]")
}

/// String table key of a template's description
pub fn description_key(template_name: &str) -> String {
    format!("Assets.DESCRIPTION[{template_name}]")
}

/// Everything needed to label one derived template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    pub spec_id: String,
    pub title_key: String,
    pub description_key: String,
    pub base_title_key: String,
    pub base_description_key: String,
    /// Specialization name shown next to the base title
    pub human_name: String,
    /// Permitted resources, or the spec description when nothing is constrained
    pub resource_summary: String,
}

impl LabelSet {
    pub fn for_spec(
        spec: &SpecializationSpec,
        base: &Template,
        derived: &Template,
        filter: &CombinedFilter,
    ) -> Self {
        Self {
            spec_id: spec.id.clone(),
            title_key: title_key(&derived.name),
            description_key: description_key(&derived.name),
            base_title_key: title_key(&base.name),
            base_description_key: description_key(&base.name),
            human_name: spec.name.clone(),
            resource_summary: filter.summary().unwrap_or_else(|| spec.description.clone()),
        }
    }
}

pub trait LabelPublisher {
    fn publish(&mut self, labels: &LabelSet);
}

/// Publishes into an in-memory locale table
///
/// Derived entries are rendered from the base template's strings, so those
/// must be loaded first with [`StringTablePublisher::insert`].
#[derive(Debug, Clone, Default)]
pub struct StringTablePublisher {
    entries: AHashMap<String, String>,
}

impl StringTablePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn base_string(&self, key: &str, spec_id: &str) -> String {
        match self.entries.get(key) {
            Some(value) => value.clone(),
            None => {
                tracing::warn!(key, spec_id, "Base string missing from locale table");
                String::new()
            }
        }
    }
}

impl LabelPublisher for StringTablePublisher {
    fn publish(&mut self, labels: &LabelSet) {
        let base_title = self.base_string(&labels.base_title_key, &labels.spec_id);
        let base_description = self.base_string(&labels.base_description_key, &labels.spec_id);

        let title = format!("{base_title} [{}]", labels.human_name);
        let description = format!("{base_description} [{}]", labels.resource_summary);

        self.insert(labels.title_key.clone(), title.trim_start());
        self.insert(labels.description_key.clone(), description.trim_start());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ResourceSet, ResourceTag};
    use crate::filter::{combine, FilterLayer};

    fn fixture() -> (SpecializationSpec, Template, Template) {
        let spec = SpecializationSpec::new(
            "ForestryGeneral",
            "Forestry",
            "Industrial Manufacturing",
            "Manufacturing and warehouses - Wood",
        );
        let base = Template::zone("Industrial Manufacturing");
        let derived = Template::zone("SpecializedIndustrialManufacturingForestryGeneral");
        (spec, base, derived)
    }

    #[test]
    fn test_keys() {
        assert_eq!(title_key("Office High"), "Assets.NAME[Office High]");
        assert_eq!(description_key("Office High"), "Assets.DESCRIPTION[Office High]");
    }

    #[test]
    fn test_summary_from_filter() {
        let (spec, base, derived) = fixture();
        let wood: ResourceSet = [ResourceTag::Wood, ResourceTag::Timber].into_iter().collect();
        let filter = combine(&[FilterLayer::uniform(wood)]);
        let labels = LabelSet::for_spec(&spec, &base, &derived, &filter);
        assert_eq!(labels.resource_summary, "Wood, Timber");
        assert_eq!(labels.base_title_key, "Assets.NAME[Industrial Manufacturing]");
    }

    #[test]
    fn test_summary_falls_back_to_description() {
        let (spec, base, derived) = fixture();
        let labels = LabelSet::for_spec(&spec, &base, &derived, &CombinedFilter::unconstrained());
        assert_eq!(labels.resource_summary, "Manufacturing and warehouses - Wood");
    }

    #[test]
    fn test_string_table_rendering() {
        let (spec, base, derived) = fixture();
        let wood: ResourceSet = [ResourceTag::Wood].into_iter().collect();
        let labels = LabelSet::for_spec(&spec, &base, &derived, &combine(&[FilterLayer::uniform(wood)]));

        let mut table = StringTablePublisher::new();
        table.insert("Assets.NAME[Industrial Manufacturing]", "Industrial Zone");
        table.insert("Assets.DESCRIPTION[Industrial Manufacturing]", "Factories.");
        table.publish(&labels);

        assert_eq!(table.get(&labels.title_key), Some("Industrial Zone [Forestry]"));
        assert_eq!(table.get(&labels.description_key), Some("Factories. [Wood]"));
    }

    #[test]
    fn test_missing_base_string_still_published() {
        let (spec, base, derived) = fixture();
        let labels = LabelSet::for_spec(&spec, &base, &derived, &CombinedFilter::unconstrained());
        let mut table = StringTablePublisher::new();
        table.publish(&labels);
        assert_eq!(table.get(&labels.title_key), Some("[Forestry]"));
    }
}
