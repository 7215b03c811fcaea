//! Zone file reconciliation loop
//!
//! The host calls [`ZoneReconciler::poll`] on its own cadence. At most once per
//! poll interval the reconciler looks at the zone file: a missing file is
//! seeded from the presets, an unchanged modification time is ignored, and a
//! changed one triggers a full reload. A reload re-derives every spec from the
//! base templates and writes the results with create-or-update semantics, so
//! running it twice on the same file is harmless.
//!
//! Failures never escape `poll`. A bad file leaves the registry untouched
//! until the file changes again; a bad spec or template is skipped and the
//! rest of the reload carries on.

use std::time::{Duration, Instant, SystemTime};

use ahash::AHashMap;

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::derivation::derive;
use crate::host::labels::{LabelPublisher, LabelSet};
use crate::host::registry::{RegistryError, TemplateRegistry};
use crate::host::store::ConfigStore;
use crate::host::template::{Template, TemplateKind};
use crate::presets::DefaultConfigGenerator;
use crate::reconcile::provisioned::ProvisionedRegistry;
use crate::reconcile::report::{ReconcileReport, SpecError, TickOutcome};
use crate::schema::{migrate_with_status, parse, serialize, ConfigDocument, MigrationStatus, ParseError, SpecializationSpec};

/// Base templates as they were when the reconciler started
///
/// Derived templates are added to the same host registry, so bases and their
/// children are captured once up front and never re-read.
#[derive(Debug, Default)]
struct BaseSnapshot {
    templates: AHashMap<String, Template>,
    children: AHashMap<String, Vec<Template>>,
}

impl BaseSnapshot {
    fn capture<R: TemplateRegistry + ?Sized>(registry: &R) -> Self {
        let mut snapshot = Self::default();
        for template in registry.list_all() {
            if template.kind == TemplateKind::Zone {
                let children = registry.children_of(&template.name);
                snapshot.children.insert(template.name.clone(), children);
            }
            snapshot.templates.insert(template.name.clone(), template);
        }
        snapshot
    }

    fn children(&self, parent: &str) -> &[Template] {
        self.children.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Keeps the host registry in sync with the zone file
pub struct ZoneReconciler<R, S, L> {
    config: EngineConfig,
    registry: R,
    store: S,
    labels: L,
    generator: DefaultConfigGenerator,
    bases: BaseSnapshot,
    provisioned: ProvisionedRegistry,
    interval: Duration,
    last_check: Option<Instant>,
    last_modified: Option<SystemTime>,
}

impl<R, S, L> ZoneReconciler<R, S, L>
where
    R: TemplateRegistry,
    S: ConfigStore,
    L: LabelPublisher,
{
    /// Create a reconciler, capturing the registry's current templates as bases
    pub fn new(config: EngineConfig, registry: R, store: S, labels: L) -> Self {
        let bases = BaseSnapshot::capture(&registry);
        tracing::debug!(
            templates = bases.templates.len(),
            zones = bases.children.len(),
            "Captured base templates"
        );
        let interval = config.poll_interval();
        Self {
            config,
            registry,
            store,
            labels,
            generator: DefaultConfigGenerator::new(),
            bases,
            provisioned: ProvisionedRegistry::new(),
            interval,
            last_check: None,
            last_modified: None,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable store access, e.g. to edit the zone file between ticks
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn labels(&self) -> &L {
        &self.labels
    }

    pub fn provisioned(&self) -> &ProvisionedRegistry {
        &self.provisioned
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one tick
    pub fn poll(&mut self, now: Instant) -> TickOutcome {
        if let Some(last) = self.last_check {
            if now.saturating_duration_since(last) < self.interval {
                return TickOutcome::Throttled;
            }
        }
        self.last_check = Some(now);

        if !self.store.exists() {
            return self.seed();
        }

        let modified = match self.store.modified() {
            Ok(modified) => modified,
            Err(e) => {
                tracing::warn!(path = %self.store.location(), "Could not read zone file timestamp: {e}");
                return TickOutcome::LoadFailed(e.to_string());
            }
        };
        if self.last_modified == Some(modified) {
            tracing::trace!(path = %self.store.location(), "Zone file unchanged");
            return TickOutcome::Unchanged;
        }
        // Recorded before loading so a broken file is retried only once it changes
        self.last_modified = Some(modified);

        match self.load() {
            Ok(doc) => TickOutcome::Reconciled(self.reconcile_all(&doc)),
            Err(e) => {
                tracing::warn!(path = %self.store.location(), "Failed to load zone file: {e}");
                TickOutcome::LoadFailed(e.to_string())
            }
        }
    }

    /// Write the default zone file
    fn seed(&mut self) -> TickOutcome {
        let written = self
            .generator
            .render()
            .and_then(|text| Ok(self.store.write_text(&text)?));

        match written {
            Ok(()) => {
                tracing::info!(path = %self.store.location(), "Wrote default zone file");
                TickOutcome::Seeded
            }
            Err(e) => {
                tracing::warn!(path = %self.store.location(), "Failed to write default zone file: {e}");
                TickOutcome::SeedFailed(e.to_string())
            }
        }
    }

    /// Read, parse and migrate the zone file
    fn load(&mut self) -> Result<ConfigDocument> {
        let text = self.store.read_text()?;
        let (doc, status) = migrate_with_status(parse(&text)?)?;

        if let MigrationStatus::Migrated { from } = &status {
            if self.config.rewrite_migrated {
                let text = serialize(&doc).map_err(ParseError::from)?;
                self.store.write_text(&text)?;
                // Our own write must not count as an edit
                self.last_modified = self.store.modified().ok();
                tracing::info!(from = %from, path = %self.store.location(), "Rewrote migrated zone file");
            }
        }

        Ok(doc)
    }

    /// Provision every spec in the document
    fn reconcile_all(&mut self, doc: &ConfigDocument) -> ReconcileReport {
        let started = Instant::now();
        let mut report = ReconcileReport::default();

        for spec in doc.specs.values() {
            let existing = self.provisioned.contains(&spec.id);
            match self.reconcile_spec(spec, existing, &mut report) {
                Ok(()) if existing => report.updated.push(spec.id.clone()),
                Ok(()) => report.created.push(spec.id.clone()),
                Err(e) => {
                    tracing::warn!(spec_id = %spec.id, "Skipping specialization: {e}");
                    report.failures.push((spec.id.clone(), e));
                }
            }
        }

        report.elapsed = started.elapsed();
        tracing::info!(
            created = report.created.len(),
            updated = report.updated.len(),
            failed = report.failures.len(),
            children = report.children_written,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Reconciled zone file"
        );
        report
    }

    fn reconcile_spec(
        &mut self,
        spec: &SpecializationSpec,
        existing: bool,
        report: &mut ReconcileReport,
    ) -> std::result::Result<(), SpecError> {
        let base = self
            .bases
            .templates
            .get(&spec.base_template_name)
            .ok_or_else(|| SpecError::BaseTemplateNotFound(spec.base_template_name.clone()))?;
        let filter = spec.combined_filter();

        let Some(derivation) = derive(
            &self.registry,
            &self.config.naming,
            spec,
            base,
            self.bases.children(&base.name),
            &filter,
        )?
        else {
            return Err(SpecError::DerivationSkipped(base.name.clone()));
        };

        write_template(&mut self.registry, derivation.parent.clone(), existing)?;
        tracing::debug!(spec_id = %spec.id, template = %derivation.parent.name, existing, "Provisioned zone");

        for child in derivation.children.templates {
            let name = child.name.clone();
            match write_template(&mut self.registry, child, existing) {
                Ok(()) => {
                    report.children_written += 1;
                    tracing::debug!(spec_id = %spec.id, template = %name, "Provisioned building");
                }
                Err(e) => {
                    report.children_skipped += 1;
                    tracing::error!(spec_id = %spec.id, template = %name, "Registry write failed: {e}");
                }
            }
        }
        report.children_skipped += derivation.children.skipped.len();

        self.labels
            .publish(&LabelSet::for_spec(spec, base, &derivation.parent, &filter));
        self.provisioned.record(&spec.id, derivation.parent);
        Ok(())
    }
}

/// Add or update a template
///
/// An update of a template the host does not know falls back to adding it.
fn write_template<R: TemplateRegistry + ?Sized>(
    registry: &mut R,
    template: Template,
    existing: bool,
) -> std::result::Result<(), RegistryError> {
    if !existing {
        return registry.add(template);
    }
    match registry.update(template.clone()) {
        Err(RegistryError::Missing(_)) => registry.add(template),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ResourceTag::*;
    use crate::host::labels::StringTablePublisher;
    use crate::host::registry::MemoryRegistry;
    use crate::host::store::MemoryConfigStore;

    const ZONE_FILE: &str = r#"{
  "Version": "v1alpha2",
  "Zones": {
    "ForestryGeneral": {
      "Name": "Forestry",
      "BaseZoneName": "Industrial Manufacturing",
      "Color": { "r": 0.0, "g": 1.0, "b": 0.0, "a": 1.0 },
      "Filters": [ { "ManufacturedResources": ["Wood", "Timber"] } ]
    }
  }
}"#;

    fn registry() -> MemoryRegistry {
        MemoryRegistry::new()
            .with(Template::zone("Industrial Manufacturing").with_resources(&[Wood, Oil], &[], &[]))
            .with(
                Template::building("EU_IndustrialSawmill01", "Industrial Manufacturing")
                    .with_resources(&[Wood], &[], &[]),
            )
    }

    fn reconciler(store: MemoryConfigStore) -> ZoneReconciler<MemoryRegistry, MemoryConfigStore, StringTablePublisher> {
        ZoneReconciler::new(EngineConfig::default(), registry(), store, StringTablePublisher::new())
    }

    #[test]
    fn test_first_poll_reconciles_existing_file() {
        let mut reconciler = reconciler(MemoryConfigStore::with_text(ZONE_FILE));
        let outcome = reconciler.poll(Instant::now());
        let report = outcome.report().expect("should reconcile");
        assert_eq!(report.created, vec!["ForestryGeneral"]);
        assert_eq!(report.children_written, 1);
        assert!(reconciler.registry().contains("SpecializedIndustrialManufacturingForestryGeneral"));
        assert!(reconciler.registry().contains("EU_SpecializedIndustrialForestryGeneralSawmill01"));
    }

    #[test]
    fn test_parse_failure_retried_only_after_change() {
        let mut reconciler = reconciler(MemoryConfigStore::with_text("{ not json"));
        let t0 = Instant::now();
        assert!(matches!(reconciler.poll(t0), TickOutcome::LoadFailed(_)));
        assert!(matches!(reconciler.poll(t0 + Duration::from_secs(5)), TickOutcome::Unchanged));

        reconciler.store_mut().set_text(ZONE_FILE);
        let outcome = reconciler.poll(t0 + Duration::from_secs(10));
        assert!(outcome.report().is_some());
    }

    #[test]
    fn test_missing_base_is_per_spec() {
        let text = ZONE_FILE.replace("Industrial Manufacturing", "Nowhere");
        let mut reconciler = reconciler(MemoryConfigStore::with_text(text));
        let outcome = reconciler.poll(Instant::now());
        let report = outcome.report().unwrap();
        assert_eq!(
            report.failure("ForestryGeneral"),
            Some(&SpecError::BaseTemplateNotFound("Nowhere".into()))
        );
        assert!(reconciler.provisioned().is_empty());
    }

    #[test]
    fn test_blank_base_fails_only_its_own_spec() {
        let text = r#"{
  "Version": "v1alpha2",
  "Zones": {
    "Good": {
      "Name": "Forestry",
      "BaseZoneName": "Industrial Manufacturing",
      "Filters": [ { "ManufacturedResources": ["Wood"] } ]
    },
    "Blank": { "Name": "Blank", "BaseZoneName": "" },
    "Absent": { "Name": "Absent" }
  }
}"#;
        let mut reconciler = reconciler(MemoryConfigStore::with_text(text));
        let outcome = reconciler.poll(Instant::now());
        let report = outcome.report().expect("document should load");

        assert_eq!(report.created, vec!["Good"]);
        assert_eq!(report.failures.len(), 2);
        for id in ["Blank", "Absent"] {
            assert_eq!(
                report.failure(id),
                Some(&SpecError::BaseTemplateNotFound(String::new()))
            );
        }
        assert!(reconciler.provisioned().contains("Good"));
        assert!(reconciler.registry().contains("SpecializedIndustrialManufacturingGood"));
    }

    #[test]
    fn test_rejected_parent_not_recorded() {
        let mut registry = registry();
        registry.reject("SpecializedIndustrialManufacturingForestryGeneral");
        let mut reconciler = ZoneReconciler::new(
            EngineConfig::default(),
            registry,
            MemoryConfigStore::with_text(ZONE_FILE),
            StringTablePublisher::new(),
        );
        let outcome = reconciler.poll(Instant::now());
        assert!(matches!(
            outcome.report().unwrap().failure("ForestryGeneral"),
            Some(SpecError::Registry(RegistryError::Rejected(_)))
        ));
        assert!(!reconciler.provisioned().contains("ForestryGeneral"));
        assert!(reconciler.labels().is_empty());
    }

    #[test]
    fn test_rewrite_migrated_document() {
        let legacy = ZONE_FILE.replace("v1alpha2", "v1alpha1");
        let config = EngineConfig {
            rewrite_migrated: true,
            ..EngineConfig::default()
        };
        let mut reconciler = ZoneReconciler::new(
            config,
            registry(),
            MemoryConfigStore::with_text(legacy),
            StringTablePublisher::new(),
        );
        let t0 = Instant::now();
        assert!(reconciler.poll(t0).report().is_some());
        assert!(reconciler.store().text().unwrap().contains("v1alpha2"));
        assert_eq!(reconciler.store().write_count(), 1);
        // The rewrite itself does not trigger another reload
        assert!(matches!(reconciler.poll(t0 + Duration::from_secs(5)), TickOutcome::Unchanged));
    }

    #[test]
    fn test_update_of_unknown_template_adds() {
        let mut registry = MemoryRegistry::new();
        assert!(write_template(&mut registry, Template::zone("Z"), true).is_ok());
        assert!(registry.contains("Z"));
        assert_eq!(registry.add_count(), 1);
    }
}
