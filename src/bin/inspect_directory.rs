// Directory inspection binary
//
// Purpose: Load a data directory, then print per-domain counts, rejected
// records, spotlights and the composition of every map layer.
// Usage: DATA_DIR=data cargo run --features cli --bin inspect_directory

use relocation_directory::spotlight::{
    spotlight, ESSENTIALS_SPOTLIGHT, EVENTS_SPOTLIGHT, HOUSING_SPOTLIGHT, MAP_SHEET_SPOTLIGHT,
    SCHOOLS_SPOTLIGHT,
};
use relocation_directory::{
    compose, markers, Composition, DirectoryData, Domain, Layer, LoaderConfig, LoadState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relocation_directory=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LoaderConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", config.data_dir.display());
    tracing::info!("  CITY: {}", config.city);

    let data = DirectoryData::load(&config);

    println!("\n=== DOMAINS ===\n");
    for domain in Domain::ALL {
        match data.state(domain) {
            Some(LoadState::Ready(records)) => println!(
                "{:<14} {:>5} records  {:>3} rejected",
                domain.as_str(),
                records.len(),
                data.rejected(domain).len()
            ),
            Some(LoadState::Failed(reason)) => println!("{:<14} FAILED: {}", domain.as_str(), reason),
            _ => println!("{:<14} pending", domain.as_str()),
        }
        for rejected in data.rejected(domain) {
            println!("    #{}: {}", rejected.index, rejected.error);
        }
    }

    println!("\n=== SPOTLIGHTS ===\n");
    let surfaces = [
        ("Housing", Domain::Rentals, HOUSING_SPOTLIGHT),
        ("Schools", Domain::Schools, SCHOOLS_SPOTLIGHT),
        ("Essentials", Domain::Essentials, ESSENTIALS_SPOTLIGHT),
        ("Events", Domain::Events, EVENTS_SPOTLIGHT),
    ];
    for (label, domain, limit) in surfaces {
        println!("{label}:");
        for record in spotlight(data.records(domain), limit) {
            println!("  - {} [{}]", record.title, record.category);
        }
    }

    let collections = data.layer_collections();
    for layer in Layer::ALL {
        println!("\n=== {} LAYER ===\n", layer.label().to_uppercase());
        match compose(layer, &collections) {
            Composition::Pending => println!("Loading {} data…", layer.label().to_lowercase()),
            Composition::Failed(reason) => println!("Unavailable: {reason}"),
            Composition::Ready(rows) => {
                for row in spotlight(&rows, MAP_SHEET_SPOTLIGHT) {
                    match &row.badge {
                        Some(badge) => println!("  {} | {} [{}]", row.title, row.subtitle, badge),
                        None => println!("  {} | {}", row.title, row.subtitle),
                    }
                }
                println!("  ({} of {} shown)", rows.len().min(MAP_SHEET_SPOTLIGHT), rows.len());
            }
        }
        println!("  {} map markers", markers(layer, &collections).len());
    }

    Ok(())
}
