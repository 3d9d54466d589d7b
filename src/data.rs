//! Dataset loading.
//!
//! Reads one JSON array per domain from the data directory
//! (`{data_dir}/{dataset}.json`), normalizes every domain in parallel and
//! keeps each domain's outcome as a [`LoadState`]. A missing or malformed
//! file fails that domain only.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::domain::Domain;
use crate::layers::{LayerCollections, LoadState};
use crate::normalize::{normalize_with, NormalizeContext, NormalizedBatch, RejectedRecord};
use crate::types::{CanonicalRecord, RawRecord};

/// Parse a backend response body (a JSON array of objects) into raw records.
pub fn parse_records(body: &str) -> Result<Vec<RawRecord>> {
    let values: Vec<Value> =
        serde_json::from_str(body).with_context(|| "Response body is not a JSON array")?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(fields) => Ok(fields),
            other => bail!("Element {} is not an object: {}", index, other),
        })
        .collect()
}

/// Outcome of loading one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainLoad {
    pub state: LoadState,
    pub rejected: Vec<RejectedRecord>,
}

/// Every domain's records, loaded from a data directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryData {
    domains: FxHashMap<Domain, DomainLoad>,
}

impl DirectoryData {
    /// Load all domains from `config.data_dir`.
    pub fn load(config: &LoaderConfig) -> Self {
        info!("Loading directory data from {}", config.data_dir.display());
        let ctx = config.normalize_context();

        let domains: FxHashMap<Domain, DomainLoad> = Domain::ALL
            .par_iter()
            .map(|&domain| {
                let path = dataset_path(&config.data_dir, domain);
                let state = LoadState::Idle.start();
                let load = match load_domain(&ctx, domain, &path) {
                    Ok(batch) => {
                        for rejected in &batch.rejected {
                            warn!(
                                "Rejected {} record #{} ({}): {}",
                                domain,
                                rejected.index,
                                rejected.id.as_deref().unwrap_or("no id"),
                                rejected.error
                            );
                        }
                        DomainLoad {
                            state: state.complete(batch.records),
                            rejected: batch.rejected,
                        }
                    }
                    Err(err) => {
                        warn!("Failed to load {}: {:#}", domain, err);
                        DomainLoad {
                            state: state.fail(format!("{err:#}")),
                            rejected: Vec::new(),
                        }
                    }
                };
                (domain, load)
            })
            .collect();

        for domain in Domain::ALL {
            if let Some(load) = domains.get(&domain) {
                if let Some(records) = load.state.records() {
                    info!(
                        "  {}: {} records ({} rejected)",
                        domain,
                        records.len(),
                        load.rejected.len()
                    );
                }
            }
        }

        Self { domains }
    }

    pub fn state(&self, domain: Domain) -> Option<&LoadState> {
        self.domains.get(&domain).map(|load| &load.state)
    }

    /// Ready records of `domain`; empty while pending or failed.
    pub fn records(&self, domain: Domain) -> &[CanonicalRecord] {
        self.state(domain)
            .and_then(LoadState::records)
            .unwrap_or_default()
    }

    pub fn rejected(&self, domain: Domain) -> &[RejectedRecord] {
        self.domains
            .get(&domain)
            .map(|load| load.rejected.as_slice())
            .unwrap_or_default()
    }

    /// Compositor input for the map screen.
    pub fn layer_collections(&self) -> LayerCollections {
        let state = |domain| self.state(domain).cloned().unwrap_or_default();
        LayerCollections {
            safety: state(Domain::SafetyZones),
            housing: state(Domain::Rentals),
            schools: state(Domain::Schools),
            essentials: state(Domain::Essentials),
        }
    }
}

pub fn dataset_path(data_dir: &Path, domain: Domain) -> PathBuf {
    data_dir.join(format!("{}.json", domain.dataset_name()))
}

fn load_domain(ctx: &NormalizeContext, domain: Domain, path: &Path) -> Result<NormalizedBatch> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    let raws = parse_records(&body)
        .with_context(|| format!("Failed to parse dataset: {}", path.display()))?;
    debug!("Parsed {} raw {} records", raws.len(), domain);
    Ok(normalize_with(ctx, domain, &raws))
}
