//! Specialized Zones - demo host
//!
//! Loads base templates from a TOML catalog, then drives the reconciler for a
//! number of ticks against the zone file on disk, printing what each tick did.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use specialized_zones::core::error::{Result, ZoneError};
use specialized_zones::core::EngineConfig;
use specialized_zones::host::{
    ConfigStore, FsConfigStore, LabelPublisher, TemplateCatalog, TemplateRegistry,
};
use specialized_zones::reconcile::{TickOutcome, ZoneReconciler};

#[derive(Parser, Debug)]
#[command(name = "specialized-zones")]
#[command(author, version, about = "Derive specialized zones from a zone file", long_about = None)]
struct Args {
    /// Engine settings (TOML); defaults apply when absent
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Base template catalog (TOML)
    #[arg(long, default_value = "data/base_templates.toml")]
    catalog: PathBuf,

    /// Zone file location, overriding the settings
    #[arg(long)]
    zone_file: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 3)]
    ticks: u32,

    /// Time between ticks in milliseconds
    #[arg(long, default_value_t = 5000)]
    tick_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("specialized_zones=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.settings {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(zone_file) = args.zone_file {
        config.zone_file = zone_file;
    }
    config.validate().map_err(ZoneError::Settings)?;

    let catalog = TemplateCatalog::load_from_toml(&args.catalog)
        .map_err(|e| ZoneError::Catalog(e.to_string()))?;
    tracing::info!(templates = catalog.len(), path = %args.catalog.display(), "Loaded base templates");

    let store = FsConfigStore::new(config.zone_file.clone());
    let mut reconciler = ZoneReconciler::new(
        config,
        catalog.to_registry(),
        store,
        catalog.to_string_table(),
    );

    for tick in 1..=args.ticks {
        let outcome = reconciler.poll(Instant::now());
        print_outcome(tick, &outcome);
        if tick < args.ticks {
            std::thread::sleep(Duration::from_millis(args.tick_ms));
        }
    }

    print_summary(&reconciler);
    Ok(())
}

fn print_outcome(tick: u32, outcome: &TickOutcome) {
    match outcome {
        TickOutcome::Throttled => println!("[{tick}] throttled"),
        TickOutcome::Seeded => println!("[{tick}] wrote default zone file"),
        TickOutcome::SeedFailed(e) => println!("[{tick}] could not write default zone file: {e}"),
        TickOutcome::Unchanged => println!("[{tick}] zone file unchanged"),
        TickOutcome::LoadFailed(e) => println!("[{tick}] zone file not loaded: {e}"),
        TickOutcome::Reconciled(report) => {
            println!(
                "[{tick}] reconciled: {} created, {} updated, {} failed, {} buildings ({} skipped) in {:?}",
                report.created.len(),
                report.updated.len(),
                report.failures.len(),
                report.children_written,
                report.children_skipped,
                report.elapsed,
            );
            for (spec_id, error) in &report.failures {
                println!("      {spec_id}: {error}");
            }
        }
    }
}

fn print_summary<R, S, L>(reconciler: &ZoneReconciler<R, S, L>)
where
    R: TemplateRegistry,
    S: ConfigStore,
    L: LabelPublisher,
{
    let provisioned = reconciler.provisioned();
    println!();
    println!("=== PROVISIONED ({}) ===", provisioned.len());
    for id in provisioned.ids() {
        if let Some(parent) = provisioned.get(id) {
            println!("  {id:<40} {}", parent.name);
        }
    }
}
