//! Documented fallbacks for facets the backend may omit.
//!
//! One fixed value per facet, so tests can assert exact numbers.
//!
//! Rental prices and bedroom counts are rounded to whole numbers on
//! normalization (half away from zero), matching the whole-euro edges of the
//! housing price bands.

/// Distance to the nearest transit stop for a rental without one (metres).
pub const DEFAULT_TRANSIT_DISTANCE_M: f64 = 400.0;

/// Walking distance for an essential venue or school without one (metres).
pub const DEFAULT_DISTANCE_M: f64 = 1200.0;

/// City used to complete essentials addresses when neither the record nor the
/// caller names one.
pub const DEFAULT_CITY: &str = "Palermo";

/// Tuition for schools reporting `null` (treated as free / state school).
pub const DEFAULT_TUITION_EUR: f64 = 0.0;

/// Rating for schools without one.
pub const DEFAULT_RATING: f64 = 0.0;

pub const DEFAULT_SEVERITY: &str = "info";

/// Rank for `info`/`low` or unrecognised severities.
pub const DEFAULT_SEVERITY_RANK: f64 = 1.0;

/// Unix timestamp used when a date is absent or cannot be parsed.
pub const UNKNOWN_TIMESTAMP: f64 = 0.0;
