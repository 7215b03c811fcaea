//! Derivation against the bundled base template catalog

use specialized_zones::core::types::{ResourceCategory, ResourceTag};
use specialized_zones::derivation::{derive, derive_parent, SkipReason};
use specialized_zones::host::{TemplateCatalog, TemplateRegistry};
use specialized_zones::naming::NamingRules;
use specialized_zones::presets::{industry_spec, IndustryType, FAMILIES};
use specialized_zones::schema::parse;

fn catalog() -> TemplateCatalog {
    TemplateCatalog::load_from_toml(std::path::Path::new("data/base_templates.toml"))
        .expect("catalog should load")
}

#[test]
fn test_forestry_manufacturing_family() {
    let registry = catalog().to_registry();
    let base = registry.lookup("Industrial Manufacturing").unwrap();
    let children = registry.children_of(&base.name);
    let spec = industry_spec(&FAMILIES[0], IndustryType::Manufacturing);
    let filter = spec.combined_filter();

    let derivation = derive(&registry, &NamingRules::default(), &spec, &base, &children, &filter)
        .unwrap()
        .expect("parent should derive");

    assert_eq!(
        derivation.parent.name,
        "SpecializedIndustrialManufacturingForestryManufacturing"
    );
    let parent_resources = derivation.parent.resources.as_ref().unwrap();
    assert_eq!(
        parent_resources.manufactured,
        vec![ResourceTag::Wood, ResourceTag::Timber, ResourceTag::Paper, ResourceTag::Furniture]
    );

    let names: Vec<&str> = derivation.children.templates.iter().map(|t| t.name.as_str()).collect();
    assert!(names.contains(&"EU_SpecializedIndustrialForestryManufacturingSawmill01"));
    assert!(names.contains(&"NA_SpecializedIndustrialForestryManufacturingPaperMill01"));
    // No resource component: follows every specialization
    assert!(names.contains(&"SpecializedIndustrialForestryManufacturingSubstation01"));
    // Storage has no manufactured overlap and manufacturing is required
    assert!(!names.iter().any(|n| n.contains("Storage")));

    for child in &derivation.children.templates {
        assert_eq!(child.zone.as_deref(), Some(derivation.parent.name.as_str()));
        if let Some(arrays) = &child.resources {
            for tag in &arrays.manufactured {
                assert!(FAMILIES[0].resources.contains(tag));
            }
        }
    }
}

#[test]
fn test_warehouse_requirement() {
    let registry = catalog().to_registry();
    let base = registry.lookup("Industrial Manufacturing").unwrap();
    let children = registry.children_of(&base.name);
    let spec = industry_spec(&FAMILIES[2], IndustryType::Warehouses);
    let filter = spec.combined_filter();

    let derivation = derive(&registry, &NamingRules::default(), &spec, &base, &children, &filter)
        .unwrap()
        .unwrap();
    let names: Vec<&str> = derivation.children.templates.iter().map(|t| t.name.as_str()).collect();

    assert!(names.contains(&"NA_SpecializedIndustrialStorageOreWarehouses01"));
    assert!(names.contains(&"SpecializedIndustrialStorageOreWarehouses Level1"));
    assert!(!names.iter().any(|n| n.contains("SteelMill")));
    assert!(derivation.children.skipped.iter().any(|s| {
        s.name == "EU_IndustrialSteelMill01"
            && s.reason == SkipReason::RequirementUnmet(ResourceCategory::Stored)
    }));
}

#[test]
fn test_aliases_carried_onto_children() {
    let registry = catalog().to_registry();
    let base = registry.lookup("Industrial Manufacturing").unwrap();
    let children = registry.children_of(&base.name);
    let spec = industry_spec(&FAMILIES[3], IndustryType::General);

    let derivation = derive(
        &registry,
        &NamingRules::default(),
        &spec,
        &base,
        &children,
        &spec.combined_filter(),
    )
    .unwrap()
    .unwrap();
    let warehouse = derivation
        .children
        .templates
        .iter()
        .find(|t| t.name == "SpecializedIndustrialStorageOilGeneral Level1")
        .expect("warehouse should propagate");
    let aliases: Vec<&str> = warehouse.aliases.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        aliases,
        vec![
            "SpecializedIndustrialOilGeneralWarehouse01",
            "Warehouses Level1",
            "Specialized Industrial OilWarehouse01",
        ]
    );
}

#[test]
fn test_office_spec_from_zone_file() {
    let doc = parse(
        r#"{
  "Version": "v1alpha2",
  "Zones": {
    "MediaOffices": {
      "Name": "Media Offices",
      "BaseZoneName": "Office High",
      "Color": { "r": 0.2, "g": 0.2, "b": 0.8, "a": 1.0, "grayscale": 0.3 },
      "IconUri": null,
      "Filters": [ { "ManufacturedResources": ["Media"], "StoredResources": null } ]
    }
  }
}"#,
    )
    .unwrap();
    let spec = doc.get("MediaOffices").unwrap();

    let registry = catalog().to_registry();
    let base = registry.lookup(&spec.base_template_name).unwrap();
    let children = registry.children_of(&base.name);
    let derivation = derive(
        &registry,
        &NamingRules::default(),
        spec,
        &base,
        &children,
        &spec.combined_filter(),
    )
    .unwrap()
    .unwrap();

    // No rename rule covers offices, so the id is appended
    assert_eq!(derivation.parent.name, "Office HighMediaOffices");
    let names: Vec<&str> = derivation.children.templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["OfficeHigh02MediaOffices"]);
}

#[test]
fn test_derivation_does_not_touch_registry() {
    let registry = catalog().to_registry();
    let before = registry.len();
    let base = registry.lookup("Industrial Manufacturing").unwrap();
    let spec = industry_spec(&FAMILIES[1], IndustryType::General);
    let parent = derive_parent(&registry, &NamingRules::default(), &spec, &base, &spec.combined_filter())
        .unwrap()
        .unwrap();
    assert!(!registry.contains(&parent.name));
    assert_eq!(registry.len(), before);
}
