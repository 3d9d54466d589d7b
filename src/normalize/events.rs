//! Cultural events. Category is the cost class (Free / Paid).

use super::*;
use crate::classify::classify;
use crate::domain::facets::*;
use crate::types::Category;

pub(super) fn normalize_event(raw: &RawRecord) -> Result<CanonicalRecord, DirectoryError> {
    let domain = Domain::Events;
    let id = require_text(domain, raw, "id")?;
    let name = require_text(domain, raw, "name")?;
    let venue = require_text(domain, raw, "venue")?;
    let start_time = require_text(domain, raw, "start_time")?;

    let category = classify(domain, raw)?;
    let ticketed = category == Category::Paid;
    let mut record = CanonicalRecord::new(domain, id, name, category);

    record.tags.extend(lowercase_tags(raw));
    // the backend's own event category (music, theatre, ...) is kept as a tag
    if let Some(kind) = get_text(raw, "category") {
        record.tags.insert(kind.to_lowercase());
    }

    record.set_numeric(START_TS, timestamp_or_unknown(raw, "start_time"));
    record.set_numeric(END_TS, timestamp_or_unknown(raw, "end_time"));
    record.set_flag(TICKETED, ticketed);

    record.set_text(VENUE, venue);
    record.set_text(START_TIME, start_time);
    record.set_text(END_TIME, text_or(raw, "end_time", ""));
    record.set_text(SUMMARY, text_or(raw, "summary", ""));
    record.set_text(TICKET_URL, text_or(raw, "ticket_url", ""));
    record.set_text(COST, if ticketed { "Ticketed" } else { "Free" });
    record.location = read_location(raw);

    Ok(record)
}
