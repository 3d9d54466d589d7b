//! Live alerts (utility outages, transport strikes, safety notices).

use super::*;
use crate::classify::classify;
use crate::domain::facets::*;

/// 3 for high/critical, 2 for medium, otherwise the default rank.
fn severity_rank(severity: &str) -> f64 {
    match severity {
        "high" | "critical" | "severe" => 3.0,
        "medium" | "moderate" | "warning" => 2.0,
        _ => DEFAULT_SEVERITY_RANK,
    }
}

pub(super) fn normalize_alert(raw: &RawRecord) -> Result<CanonicalRecord, DirectoryError> {
    let domain = Domain::Alerts;
    let id = require_text(domain, raw, "id")?;
    let source_category = require_text(domain, raw, "category")?;
    let message = require_text(domain, raw, "message")?;
    let published_at = require_text(domain, raw, "published_at")?;

    let category = classify(domain, raw)?;
    let mut record = CanonicalRecord::new(domain, id, message, category);
    record.tags.extend(lowercase_tags(raw));

    let severity = get_text(raw, "severity")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| DEFAULT_SEVERITY.to_string());

    record.set_numeric(PUBLISHED_TS, timestamp_or_unknown(raw, "published_at"));
    record.set_numeric(SEVERITY_RANK, severity_rank(&severity));
    record.set_text(PUBLISHED_AT, published_at);
    record.set_text(SEVERITY, severity);
    record.set_text(SOURCE_CATEGORY, source_category.to_lowercase());
    record.location = read_location(raw);

    Ok(record)
}
