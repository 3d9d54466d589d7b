//! Rental listings.

use super::*;
use crate::classify::classify;
use crate::domain::facets::*;
use crate::types::get_bool;

pub(super) fn normalize_rental(raw: &RawRecord) -> Result<CanonicalRecord, DirectoryError> {
    let domain = Domain::Rentals;
    let id = require_text(domain, raw, "id")?;
    let title = require_text(domain, raw, "title")?;
    let price = require_f64(domain, raw, "price_eur")?;
    let bedrooms = require_f64(domain, raw, "bedrooms")?;
    let neighborhood = require_text(domain, raw, "neighborhood")?;

    let category = classify(domain, raw)?;
    let mut record = CanonicalRecord::new(domain, id, title, category);

    // price bands have whole-euro edges
    record.set_numeric(PRICE, price.round());
    record.set_numeric(BEDROOMS, bedrooms.round());
    record.set_numeric(
        TRANSIT_DISTANCE_M,
        get_f64(raw, "distance_to_transit_m").unwrap_or(DEFAULT_TRANSIT_DISTANCE_M),
    );

    // kid_friendly is the backend name for the family-friendly toggle
    let flags = [
        (FURNISHED, get_bool(raw, "furnished"), "furnished"),
        (
            FAMILY_FRIENDLY,
            get_bool(raw, "kid_friendly").or_else(|| get_bool(raw, "family_friendly")),
            "family-friendly",
        ),
        (PET_FRIENDLY, get_bool(raw, "pet_friendly"), "pet-friendly"),
        (VERIFIED, get_bool(raw, "verified"), "verified"),
    ];
    for (facet, value, tag) in flags {
        let value = value.unwrap_or(false);
        record.set_flag(facet, value);
        if value {
            record.tags.insert(tag.to_string());
        }
    }
    record.tags.extend(lowercase_tags(raw));

    record.set_text(NEIGHBORHOOD, neighborhood);
    record.set_text(CONTACT, text_or(raw, "contact", ""));
    record.set_text(URL, text_or(raw, "url", ""));
    record.location = read_location(raw);

    Ok(record)
}
