//! Derived parent (zone) template

use crate::core::types::ResourceCategory;
use crate::filter::CombinedFilter;
use crate::host::registry::TemplateRegistry;
use crate::host::template::Template;
use crate::naming::{derive_aliases, NamingError, NamingRules};
use crate::schema::SpecializationSpec;

/// Derive the specialized copy of `base`
///
/// Returns `Ok(None)` when renaming leaves the name unchanged, which would
/// collide with the base template; nothing is cloned in that case.
pub fn derive_parent<R: TemplateRegistry + ?Sized>(
    registry: &R,
    rules: &NamingRules,
    spec: &SpecializationSpec,
    base: &Template,
    filter: &CombinedFilter,
) -> Result<Option<Template>, NamingError> {
    let new_name = rules.rename(&base.name, &spec.id)?;
    if new_name == base.name {
        tracing::warn!(spec_id = %spec.id, template = %base.name, "Renaming did not change the name, skipping");
        return Ok(None);
    }

    let mut derived = registry.clone_template(base, &new_name);
    apply_filter(&mut derived, filter);

    derived.accent_color = Some(spec.accent_color);
    if let Some(icon) = &spec.icon_ref {
        derived.icon = Some(icon.clone());
    }

    derived.aliases = derive_aliases(rules, &base.name, derived.kind, &base.aliases, &spec.id, &spec.name);

    Ok(Some(derived))
}

/// Restrict every resource array of a template to what the filter permits
pub(crate) fn apply_filter(template: &mut Template, filter: &CombinedFilter) {
    if let Some(arrays) = template.resources.as_mut() {
        for category in ResourceCategory::ALL {
            let restricted = filter.restrict(category, arrays.get(category));
            arrays.set(category, restricted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ResourceSet, ResourceTag, Rgba};
    use crate::filter::{combine, FilterLayer};
    use crate::host::registry::MemoryRegistry;
    use crate::naming::{NamingPolicy, RenameRule};
    use ResourceTag::*;

    fn base() -> Template {
        Template::zone("Industrial Manufacturing").with_resources(
            &[Wood, Grain, Ore, Oil],
            &[Timber, Grain],
            &[],
        )
    }

    fn forestry() -> SpecializationSpec {
        let wood: ResourceSet = [Wood, Timber].into_iter().collect();
        SpecializationSpec::new("ForestryGeneral", "Forestry", "Industrial Manufacturing", "Wood")
            .with_color(Rgba::GREEN)
            .with_icon("coui://speciz/ZoneIndustrialManufacturing_Forestry.svg")
            .with_layer(FilterLayer::uniform(wood))
    }

    #[test]
    fn test_parent_renamed_and_filtered() {
        let registry = MemoryRegistry::new();
        let spec = forestry();
        let derived = derive_parent(&registry, &NamingRules::default(), &spec, &base(), &spec.combined_filter())
            .unwrap()
            .unwrap();

        assert_eq!(derived.name, "SpecializedIndustrialManufacturingForestryGeneral");
        let arrays = derived.resources.as_ref().unwrap();
        assert_eq!(arrays.manufactured, vec![Wood]);
        assert_eq!(arrays.stored, vec![Timber]);
        assert!(arrays.sold.is_empty());
        assert_eq!(derived.accent_color, Some(Rgba::GREEN));
        assert_eq!(
            derived.icon.as_deref(),
            Some("coui://speciz/ZoneIndustrialManufacturing_Forestry.svg")
        );
        assert_eq!(derived.aliases.len(), 1);
        // Nothing registered by derivation itself
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unconstrained_category_passes_through() {
        let registry = MemoryRegistry::new();
        let spec = SpecializationSpec::new("OreGeneral", "Ore", "Industrial Manufacturing", "")
            .with_layer(FilterLayer::new().with_manufactured([Ore].into_iter().collect()));
        let derived = derive_parent(&registry, &NamingRules::default(), &spec, &base(), &spec.combined_filter())
            .unwrap()
            .unwrap();
        let arrays = derived.resources.unwrap();
        assert_eq!(arrays.manufactured, vec![Ore]);
        assert_eq!(arrays.stored, vec![Timber, Grain]);
    }

    #[test]
    fn test_unchanged_name_yields_none() {
        let registry = MemoryRegistry::new();
        // A rule that maps the name onto itself
        let rules = NamingRules::with_rules(
            vec![RenameRule::new("Industrial Manufacturing", "Industrial Manufacturing")],
            NamingPolicy::Strict,
        );
        let spec = forestry();
        let result = derive_parent(&registry, &rules, &spec, &base(), &combine(&[])).unwrap();
        assert!(result.is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_strict_policy_error_propagates() {
        let registry = MemoryRegistry::new();
        let rules = NamingRules {
            policy: NamingPolicy::Strict,
            ..NamingRules::default()
        };
        let spec = SpecializationSpec::new("Media", "Media", "Office High", "");
        let result = derive_parent(&registry, &rules, &spec, &Template::zone("Office High"), &combine(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_base_icon_kept_without_spec_icon() {
        let registry = MemoryRegistry::new();
        let mut base = base();
        base.icon = Some("Media/Zones/Industrial.svg".into());
        let spec = SpecializationSpec::new("OilGeneral", "Oil", "Industrial Manufacturing", "");
        let derived = derive_parent(&registry, &NamingRules::default(), &spec, &base, &combine(&[]))
            .unwrap()
            .unwrap();
        assert_eq!(derived.icon.as_deref(), Some("Media/Zones/Industrial.svg"));
    }
}
