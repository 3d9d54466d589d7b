//! Relocation Directory Engine
//!
//! Normalizes heterogeneous backend records (rentals, essentials, schools,
//! transport, safety zones, alerts, events) into one canonical shape and
//! narrows them with composable facet filters.
//!
//! Pipeline:
//! - `classify/`: ordered rule tables mapping raw records to categories
//! - `normalize/`: raw record → canonical record, one submodule per domain
//! - `filter/`: validated predicates, conjunction, screen presets
//! - `spotlight`: bounded prefix slices for summary surfaces
//! - `layers`: map layers, per-collection load state, display projection
//!
//! `data` and `config` load a directory of JSON datasets; the engine itself
//! is pure and does no I/O.

pub mod classify;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod filter;
pub mod layers;
pub mod normalize;
pub mod spotlight;
pub mod types;

// Re-export commonly used types
pub use classify::classify;
pub use config::LoaderConfig;
pub use data::{parse_records, DirectoryData};
pub use domain::{facets, Domain};
pub use error::DirectoryError;
pub use filter::{apply_filters, FilterState, Predicate, PredicateKind};
pub use layers::{compose, markers, Composition, DisplayTuple, Layer, LayerCollections, LoadState, MapMarker};
pub use normalize::{normalize, normalize_record, normalize_strict, NormalizedBatch, RejectedRecord};
pub use spotlight::spotlight;
pub use types::{CanonicalRecord, Category, FacetValue, GeoPoint, RawRecord};
