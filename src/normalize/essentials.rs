//! Essential venues: pharmacies, clinics, shops and everyday services.

use super::*;
use crate::classify::{classify, opening_status, spoken_languages};
use crate::domain::facets::*;
use crate::types::OpeningStatus;

pub(super) fn normalize_essential(
    ctx: &NormalizeContext,
    raw: &RawRecord,
) -> Result<CanonicalRecord, DirectoryError> {
    let domain = Domain::Essentials;
    let id = require_text(domain, raw, "id")?;
    let name = require_text(domain, raw, "name")?;
    let source_type = require_text(domain, raw, "type")?;
    let neighborhood = require_text(domain, raw, "neighborhood")?;

    let category = classify(domain, raw)?;
    let status = opening_status(raw);
    let mut record = CanonicalRecord::new(domain, id, name, category);

    // Explicit languages win over the tag heuristic.
    record.languages = match get_str_list(raw, "languages").filter(|l| !l.is_empty()) {
        Some(languages) => languages.iter().map(|l| language_code(l)).collect(),
        None => spoken_languages(raw).iter().map(|l| l.to_string()).collect(),
    };
    record.tags.extend(lowercase_tags(raw));

    record.set_numeric(
        DISTANCE_M,
        get_f64(raw, "distance_m").unwrap_or(DEFAULT_DISTANCE_M),
    );
    record.set_flag(OPEN_24H, status == OpeningStatus::Open24h);
    let english = record.languages.contains("EN");
    record.set_flag(ENGLISH_SPEAKING, english);

    let address = get_text(raw, "address").unwrap_or_else(|| {
        let city = get_text(raw, "city").unwrap_or_else(|| ctx.city.clone());
        format!("{neighborhood}, {city}")
    });
    record.set_text(ADDRESS, address);
    record.set_text(NEIGHBORHOOD, neighborhood);
    record.set_text(STATUS, status.label());
    record.set_text(SOURCE_TYPE, capitalise(&source_type));
    record.location = read_location(raw);

    Ok(record)
}
