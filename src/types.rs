//! Shared data types for the directory engine.
//!
//! Raw records are JSON objects straight from the backend; canonical records
//! are the uniform shape consumed by filtering and display code.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::Domain;

/// One backend element, exactly as received.
pub type RawRecord = Map<String, Value>;

// ============================================================================
// Raw field access
// ============================================================================

/// Extract a display string. Numbers and booleans are rendered; blank strings
/// count as absent.
pub fn get_text(data: &RawRecord, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Extract an f64 value.
/// Handles both numeric JSON values and string-encoded numbers.
pub fn get_f64(data: &RawRecord, key: &str) -> Option<f64> {
    data.get(key).and_then(|v| {
        v.as_f64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
    })
    .filter(|n| n.is_finite())
}

/// Extract a boolean. Accepts `true`/`false`, `"true"`/`"false"`, `"yes"`/`"no"`, `1`/`0`.
pub fn get_bool(data: &RawRecord, key: &str) -> Option<bool> {
    match data.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|x| x != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Extract a list of strings. A single string is split on commas.
pub fn get_str_list(data: &RawRecord, key: &str) -> Option<Vec<String>> {
    match data.get(key)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Value::String(s) => Some(
            s.split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

/// True when the field exists with a usable value (not null, not blank, not empty).
pub fn is_present(data: &RawRecord, key: &str) -> bool {
    match data.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
        Some(_) => true,
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Closed category labels. Each domain admits the subset listed by
/// [`Domain::categories`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    // Alerts
    Strike,
    Event,
    Safety,
    // Essentials
    Pharmacy,
    Clinic,
    Electronics,
    Shopping,
    Services,
    // Transport
    Bus,
    Tram,
    Metro,
    Train,
    Taxi,
    Rideshare,
    Bike,
    Ferry,
    OtherTransport,
    // Event cost
    Free,
    Paid,
    // Rentals
    Studio,
    Apartment,
    House,
    // Schools
    EarlyYears,
    Primary,
    Secondary,
    AllThrough,
    // Safety zones
    LowRisk,
    MediumRisk,
    HighRisk,
}

impl Category {
    /// Display label, also the name matched by category membership predicates.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Strike => "Strike",
            Category::Event => "Event",
            Category::Safety => "Safety",
            Category::Pharmacy => "Pharmacy",
            Category::Clinic => "Clinic",
            Category::Electronics => "Electronics",
            Category::Shopping => "Shopping",
            Category::Services => "Services",
            Category::Bus => "Bus",
            Category::Tram => "Tram",
            Category::Metro => "Metro",
            Category::Train => "Train",
            Category::Taxi => "Taxi",
            Category::Rideshare => "Rideshare",
            Category::Bike => "Bike",
            Category::Ferry => "Ferry",
            Category::OtherTransport => "Other",
            Category::Free => "Free",
            Category::Paid => "Paid",
            Category::Studio => "Studio",
            Category::Apartment => "Apartment",
            Category::House => "House",
            Category::EarlyYears => "Early years",
            Category::Primary => "Primary",
            Category::Secondary => "Secondary",
            Category::AllThrough => "All-through",
            Category::LowRisk => "Low risk",
            Category::MediumRisk => "Medium risk",
            Category::HighRisk => "High risk",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening status derived from venue tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OpeningStatus {
    #[default]
    Open,
    Open24h,
}

impl OpeningStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OpeningStatus::Open => "Open now",
            OpeningStatus::Open24h => "Open 24h",
        }
    }
}

// ============================================================================
// Canonical records
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Operand for equality predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Number(f64),
    Text(String),
}

impl From<f64> for FacetValue {
    fn from(value: f64) -> Self {
        FacetValue::Number(value)
    }
}

impl From<u32> for FacetValue {
    fn from(value: u32) -> Self {
        FacetValue::Number(f64::from(value))
    }
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self {
        FacetValue::Text(value.to_string())
    }
}

/// Domain-normalized view record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub id: String,
    pub domain: Domain,
    pub title: String,
    pub category: Category,
    pub numeric_facets: BTreeMap<String, f64>,
    pub flag_facets: BTreeMap<String, bool>,
    pub text_facets: BTreeMap<String, String>,
    pub tags: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub location: Option<GeoPoint>,
}

impl CanonicalRecord {
    /// Empty record for `domain`; normalizers fill the facets.
    pub fn new(domain: Domain, id: String, title: String, category: Category) -> Self {
        Self {
            id,
            domain,
            title,
            category,
            numeric_facets: BTreeMap::new(),
            flag_facets: BTreeMap::new(),
            text_facets: BTreeMap::new(),
            tags: BTreeSet::new(),
            languages: BTreeSet::new(),
            location: None,
        }
    }

    pub fn numeric(&self, facet: &str) -> Option<f64> {
        self.numeric_facets.get(facet).copied()
    }

    pub fn flag(&self, facet: &str) -> Option<bool> {
        self.flag_facets.get(facet).copied()
    }

    pub fn text(&self, facet: &str) -> Option<&str> {
        self.text_facets.get(facet).map(String::as_str)
    }

    pub(crate) fn set_numeric(&mut self, facet: &str, value: f64) {
        self.numeric_facets.insert(facet.to_string(), value);
    }

    pub(crate) fn set_flag(&mut self, facet: &str, value: bool) {
        self.flag_facets.insert(facet.to_string(), value);
    }

    pub(crate) fn set_text(&mut self, facet: &str, value: impl Into<String>) {
        self.text_facets.insert(facet.to_string(), value.into());
    }
}
