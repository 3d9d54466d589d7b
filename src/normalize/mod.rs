//! Normalizer: raw backend records → canonical records.
//!
//! One submodule per domain, each a pure function of a single raw record.
//! A record missing a required field is rejected and reported; it never gets
//! a fabricated identity.
//!
//! ## Domains
//! - `rentals` - housing listings (price, bedrooms, amenity flags)
//! - `essentials` - pharmacies, clinics, shops and services
//! - `schools` - school directory
//! - `transport` - transport providers
//! - `safety` - neighborhood safety zones
//! - `alerts` - live utility / transport / safety alerts
//! - `events` - cultural events

pub mod defaults;

mod alerts;
mod essentials;
mod events;
mod rentals;
mod safety;
mod schools;
mod transport;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::domain::Domain;
use crate::error::DirectoryError;
use crate::types::{get_f64, get_str_list, get_text, CanonicalRecord, GeoPoint, RawRecord};

pub use defaults::*;

/// Caller-supplied context. Only affects fields the backend leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeContext {
    pub city: String,
}

impl Default for NormalizeContext {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
        }
    }
}

/// A raw record excluded from a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    /// Position in the input batch.
    pub index: usize,
    /// Identity, when the record had one.
    pub id: Option<String>,
    #[serde(serialize_with = "serialize_error")]
    pub error: DirectoryError,
}

fn serialize_error<S: serde::Serializer>(error: &DirectoryError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.to_string())
}

/// Output of [`normalize`]: accepted records in input order plus rejections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedBatch {
    pub domain: Domain,
    pub records: Vec<CanonicalRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl NormalizedBatch {
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Normalize a batch, excluding (and reporting) records that fail validation.
pub fn normalize(domain: Domain, raws: &[RawRecord]) -> NormalizedBatch {
    normalize_with(&NormalizeContext::default(), domain, raws)
}

pub fn normalize_with(ctx: &NormalizeContext, domain: Domain, raws: &[RawRecord]) -> NormalizedBatch {
    let mut records = Vec::with_capacity(raws.len());
    let mut rejected = Vec::new();

    for (index, raw) in raws.iter().enumerate() {
        match normalize_record_with(ctx, domain, raw) {
            Ok(record) => records.push(record),
            Err(error) => rejected.push(RejectedRecord {
                index,
                id: get_text(raw, "id"),
                error,
            }),
        }
    }

    NormalizedBatch {
        domain,
        records,
        rejected,
    }
}

/// Normalize a batch, failing on the first invalid record.
pub fn normalize_strict(domain: Domain, raws: &[RawRecord]) -> Result<Vec<CanonicalRecord>, DirectoryError> {
    let ctx = NormalizeContext::default();
    raws.iter()
        .map(|raw| normalize_record_with(&ctx, domain, raw))
        .collect()
}

pub fn normalize_record(domain: Domain, raw: &RawRecord) -> Result<CanonicalRecord, DirectoryError> {
    normalize_record_with(&NormalizeContext::default(), domain, raw)
}

pub fn normalize_record_with(
    ctx: &NormalizeContext,
    domain: Domain,
    raw: &RawRecord,
) -> Result<CanonicalRecord, DirectoryError> {
    match domain {
        Domain::Rentals => rentals::normalize_rental(raw),
        Domain::Essentials => essentials::normalize_essential(ctx, raw),
        Domain::Schools => schools::normalize_school(raw),
        Domain::Transport => transport::normalize_transport(raw),
        Domain::SafetyZones => safety::normalize_safety_zone(raw),
        Domain::Alerts => alerts::normalize_alert(raw),
        Domain::Events => events::normalize_event(raw),
    }
}

// ============================================================================
// Required field readers
// ============================================================================

fn missing(domain: Domain, field: &'static str) -> DirectoryError {
    DirectoryError::MissingRequiredField { domain, field }
}

fn require_text(domain: Domain, raw: &RawRecord, field: &'static str) -> Result<String, DirectoryError> {
    get_text(raw, field).ok_or_else(|| missing(domain, field))
}

fn require_f64(domain: Domain, raw: &RawRecord, field: &'static str) -> Result<f64, DirectoryError> {
    get_f64(raw, field).ok_or_else(|| missing(domain, field))
}

fn require_list(domain: Domain, raw: &RawRecord, field: &'static str) -> Result<Vec<String>, DirectoryError> {
    get_str_list(raw, field)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| missing(domain, field))
}

// ============================================================================
// Shared derivations
// ============================================================================

fn text_or(raw: &RawRecord, field: &str, default: &str) -> String {
    get_text(raw, field).unwrap_or_else(|| default.to_string())
}

fn lowercase_tags(raw: &RawRecord) -> impl Iterator<Item = String> {
    get_str_list(raw, "tags")
        .unwrap_or_default()
        .into_iter()
        .map(|tag| tag.to_lowercase())
}

/// Upper-case first character, as shown in list subtitles.
fn capitalise(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Two-letter code for common language names; anything else upper-cased.
fn language_code(language: &str) -> String {
    match language.trim().to_lowercase().as_str() {
        "english" | "en" => "EN".to_string(),
        "italian" | "italiano" | "it" => "IT".to_string(),
        "french" | "fr" => "FR".to_string(),
        "german" | "de" => "DE".to_string(),
        "spanish" | "es" => "ES".to_string(),
        other => other.to_uppercase(),
    }
}

fn point_from(value: &Value) -> Option<GeoPoint> {
    let lat = value.get("lat")?.as_f64()?;
    let lng = value.get("lng").or_else(|| value.get("lon"))?.as_f64()?;
    (lat.is_finite() && lng.is_finite()).then_some(GeoPoint { lat, lng })
}

/// `coordinates {lat,lng}`, then top-level `lat`/`lng`, then polygon centroid.
fn read_location(raw: &RawRecord) -> Option<GeoPoint> {
    if let Some(point) = raw.get("coordinates").and_then(point_from) {
        return Some(point);
    }
    if let (Some(lat), Some(lng)) = (get_f64(raw, "lat"), get_f64(raw, "lng")) {
        return Some(GeoPoint { lat, lng });
    }
    let vertices: Vec<GeoPoint> = raw
        .get("polygon")?
        .as_array()?
        .iter()
        .filter_map(point_from)
        .collect();
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    Some(GeoPoint {
        lat: vertices.iter().map(|p| p.lat).sum::<f64>() / n,
        lng: vertices.iter().map(|p| p.lng).sum::<f64>() / n,
    })
}

/// Unix seconds for RFC 3339 timestamps, naive date-times (UTC) or bare dates.
fn parse_timestamp(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp() as f64);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().timestamp() as f64);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp() as f64)
}

fn timestamp_or_unknown(raw: &RawRecord, field: &str) -> f64 {
    get_text(raw, field)
        .and_then(|s| parse_timestamp(&s))
        .unwrap_or(UNKNOWN_TIMESTAMP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_capitalise() {
        assert_eq!(capitalise("pharmacy"), "Pharmacy");
        assert_eq!(capitalise(""), "");
        assert_eq!(capitalise("élite"), "Élite");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(language_code("English"), "EN");
        assert_eq!(language_code("it"), "IT");
        assert_eq!(language_code("Arabic"), "ARABIC");
    }

    #[test]
    fn test_location_sources() {
        let nested = raw(json!({"coordinates": {"lat": 38.1, "lng": 13.3}}));
        assert_eq!(read_location(&nested), Some(GeoPoint { lat: 38.1, lng: 13.3 }));

        let flat = raw(json!({"lat": 38.2, "lng": "13.4"}));
        assert_eq!(read_location(&flat), Some(GeoPoint { lat: 38.2, lng: 13.4 }));

        let polygon = raw(json!({"polygon": [
            {"lat": 38.0, "lng": 13.0},
            {"lat": 38.2, "lng": 13.2}
        ]}));
        let centroid = read_location(&polygon).unwrap();
        approx::assert_relative_eq!(centroid.lat, 38.1, epsilon = 1e-9);
        approx::assert_relative_eq!(centroid.lng, 13.1, epsilon = 1e-9);

        assert_eq!(read_location(&raw(json!({}))), None);
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400.0));
        assert_eq!(parse_timestamp("1970-01-01T00:01:00Z"), Some(60.0));
        assert_eq!(parse_timestamp("1970-01-01T01:00:00+01:00"), Some(0.0));
        assert_eq!(parse_timestamp("1970-01-01T00:00:30"), Some(30.0));
        assert_eq!(parse_timestamp("next friday"), None);
    }

    #[test]
    fn test_rejections_are_reported_with_index() {
        let raws = vec![
            raw(json!({"id": "t1", "mode": "bus", "provider": "AMAT"})),
            raw(json!({"mode": "taxi", "provider": "Radio Taxi"})),
            raw(json!({"id": "t3", "mode": "ferry"})),
        ];
        let batch = normalize(Domain::Transport, &raws);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].id, "t1");
        assert!(!batch.is_complete());
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(batch.rejected[0].index, 1);
        assert_eq!(batch.rejected[0].id, None);
        assert_eq!(
            batch.rejected[0].error,
            DirectoryError::MissingRequiredField { domain: Domain::Transport, field: "id" }
        );
        assert_eq!(batch.rejected[1].id.as_deref(), Some("t3"));
        assert_eq!(
            batch.rejected[1].error,
            DirectoryError::MissingRequiredField { domain: Domain::Transport, field: "provider" }
        );
    }

    #[test]
    fn test_strict_fails_the_batch() {
        let raws = vec![
            raw(json!({"id": "t1", "mode": "bus", "provider": "AMAT"})),
            raw(json!({"id": "t2", "provider": "AMAT"})),
        ];
        assert_eq!(
            normalize_strict(Domain::Transport, &raws),
            Err(DirectoryError::MissingRequiredField { domain: Domain::Transport, field: "mode" })
        );
    }
}
