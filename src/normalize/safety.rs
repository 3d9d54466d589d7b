//! Neighborhood safety zones.
//!
//! Zones arrive as polygons; the canonical record is located at the vertex
//! centroid. `risk_score` orders zones low (1) to high (3).

use super::*;
use crate::classify::classify;
use crate::domain::facets::*;
use crate::types::Category;

fn risk_score(category: Category) -> f64 {
    match category {
        Category::HighRisk => 3.0,
        Category::MediumRisk => 2.0,
        _ => 1.0,
    }
}

pub(super) fn normalize_safety_zone(raw: &RawRecord) -> Result<CanonicalRecord, DirectoryError> {
    let domain = Domain::SafetyZones;
    let id = require_text(domain, raw, "id")?;
    let neighborhood = require_text(domain, raw, "neighborhood")?;
    let risk_level = require_text(domain, raw, "risk_level")?;

    let category = classify(domain, raw)?;
    let mut record = CanonicalRecord::new(domain, id, neighborhood, category);
    record.tags.extend(lowercase_tags(raw));

    record.set_numeric(RISK_SCORE, risk_score(category));
    record.set_text(RISK_LEVEL, risk_level.to_lowercase());
    record.set_text(TREND, text_or(raw, "trend", ""));
    record.set_text(DESCRIPTION, text_or(raw, "description", ""));
    record.set_text(UPDATED_AT, text_or(raw, "updated_at", ""));
    record.location = read_location(raw);

    Ok(record)
}
