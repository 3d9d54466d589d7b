//! Layer compositor for the map screen.
//!
//! One layer is active at a time. Each layer reads one collection, and each
//! collection carries its own [`LoadState`]; composing a layer projects the
//! ready records to [`DisplayTuple`]s (list rows) or [`MapMarker`]s (pins).
//!
//! ## Layer mapping
//!
//! | Layer      | Domain       | Subtitle                           | Badge          |
//! |------------|--------------|------------------------------------|----------------|
//! | Safety     | SafetyZones  | trend                              | risk level     |
//! | Housing    | Rentals      | `{neighborhood} · €{price}/mo`     | `{transit}m`   |
//! | Schools    | Schools      | `{curriculum} · {level}`           | `EN / IT`      |
//! | Essentials | Essentials   | `{category} · {km:.1}km`           | opening status |

use serde::{Deserialize, Serialize};

use crate::domain::facets::*;
use crate::domain::Domain;
use crate::types::{CanonicalRecord, Category, GeoPoint};

// ============================================================================
// Layers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Layer {
    #[default]
    Safety,
    Housing,
    Schools,
    Essentials,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Safety, Layer::Housing, Layer::Schools, Layer::Essentials];

    /// Switch the active layer. Synchronous; nothing is fetched.
    pub fn select(self, next: Layer) -> Layer {
        next
    }

    pub fn domain(&self) -> Domain {
        match self {
            Layer::Safety => Domain::SafetyZones,
            Layer::Housing => Domain::Rentals,
            Layer::Schools => Domain::Schools,
            Layer::Essentials => Domain::Essentials,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Layer::Safety => "Safety",
            Layer::Housing => "Housing",
            Layer::Schools => "Schools",
            Layer::Essentials => "Essentials",
        }
    }
}

// ============================================================================
// Load state
// ============================================================================

/// Fetch lifecycle of one collection.
///
/// `start` moves any state to `Loading`. `complete` and `fail` only settle a
/// `Loading` collection; results arriving at an idle or settled collection
/// are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(Vec<CanonicalRecord>),
    Failed(String),
}

impl LoadState {
    pub fn start(self) -> Self {
        LoadState::Loading
    }

    pub fn complete(self, records: Vec<CanonicalRecord>) -> Self {
        match self {
            LoadState::Loading => LoadState::Ready(records),
            settled => settled,
        }
    }

    pub fn fail(self, reason: impl Into<String>) -> Self {
        match self {
            LoadState::Loading => LoadState::Failed(reason.into()),
            settled => settled,
        }
    }

    pub fn records(&self) -> Option<&[CanonicalRecord]> {
        match self {
            LoadState::Ready(records) => Some(records),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Idle | LoadState::Loading)
    }
}

/// The four collections the map can show.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayerCollections {
    pub safety: LoadState,
    pub housing: LoadState,
    pub schools: LoadState,
    pub essentials: LoadState,
}

impl LayerCollections {
    pub fn get(&self, layer: Layer) -> &LoadState {
        match layer {
            Layer::Safety => &self.safety,
            Layer::Housing => &self.housing,
            Layer::Schools => &self.schools,
            Layer::Essentials => &self.essentials,
        }
    }

    /// New collections with `layer`'s state replaced by `f(old)`.
    pub fn update(mut self, layer: Layer, f: impl FnOnce(LoadState) -> LoadState) -> Self {
        let slot = match layer {
            Layer::Safety => &mut self.safety,
            Layer::Housing => &mut self.housing,
            Layer::Schools => &mut self.schools,
            Layer::Essentials => &mut self.essentials,
        };
        *slot = f(std::mem::take(slot));
        self
    }
}

// ============================================================================
// Composition
// ============================================================================

/// One list row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTuple {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub badge: Option<String>,
    pub location: Option<GeoPoint>,
}

/// `Pending` while the collection is idle or loading; distinct from an empty
/// `Ready`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Composition {
    Pending,
    Failed(String),
    Ready(Vec<DisplayTuple>),
}

impl Composition {
    pub fn rows(&self) -> &[DisplayTuple] {
        match self {
            Composition::Ready(rows) => rows,
            _ => &[],
        }
    }
}

/// Pin handed to the mapping collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    pub category: Category,
}

pub fn compose(layer: Layer, collections: &LayerCollections) -> Composition {
    match collections.get(layer) {
        LoadState::Idle | LoadState::Loading => Composition::Pending,
        LoadState::Failed(reason) => Composition::Failed(reason.clone()),
        LoadState::Ready(records) => Composition::Ready(
            records
                .iter()
                .filter(|record| record.domain == layer.domain())
                .map(|record| display_tuple(layer, record))
                .collect(),
        ),
    }
}

/// Located records of the active layer. Empty unless the collection is ready.
pub fn markers(layer: Layer, collections: &LayerCollections) -> Vec<MapMarker> {
    collections
        .get(layer)
        .records()
        .unwrap_or_default()
        .iter()
        .filter(|record| record.domain == layer.domain())
        .filter_map(|record| {
            let point = record.location?;
            Some(MapMarker {
                lat: point.lat,
                lng: point.lng,
                label: record.title.clone(),
                category: record.category,
            })
        })
        .collect()
}

fn display_tuple(layer: Layer, record: &CanonicalRecord) -> DisplayTuple {
    let text = |facet: &str| record.text(facet).unwrap_or_default().to_string();
    let number = |facet: &str| record.numeric(facet).unwrap_or_default();

    let (subtitle, badge) = match layer {
        Layer::Safety => (text(TREND), Some(text(RISK_LEVEL))),
        Layer::Housing => (
            format!("{} · €{}/mo", text(NEIGHBORHOOD), format_euros(number(PRICE))),
            Some(format!("{}m", number(TRANSIT_DISTANCE_M).round())),
        ),
        Layer::Schools => (
            format!("{} · {}", text(CURRICULUM), text(LEVEL)),
            Some(record.languages.iter().map(String::as_str).collect::<Vec<_>>().join(" / ")),
        ),
        Layer::Essentials => (
            format!("{} · {:.1}km", record.category, number(DISTANCE_M) / 1000.0),
            Some(text(STATUS)),
        ),
    };

    DisplayTuple {
        id: record.id.clone(),
        title: record.title.clone(),
        subtitle,
        badge: badge.filter(|b| !b.is_empty()),
        location: record.location,
    }
}

/// Whole euros with thousands separators: 1250.0 → "1,250".
pub fn format_euros(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let raw = format!("{:.0}", rounded.abs());
    let mut grouped_reversed = String::with_capacity(raw.len() + raw.len() / 3);
    for (idx, ch) in raw.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped_reversed.push(',');
        }
        grouped_reversed.push(ch);
    }
    let grouped: String = grouped_reversed.chars().rev().collect();
    format!("{sign}{grouped}")
}
