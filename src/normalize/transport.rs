//! Transport providers (buses, taxis, ride-hailing, ferries).

use super::*;
use crate::classify::classify;
use crate::domain::facets::*;

const ROUND_THE_CLOCK: &[&str] = &["24/7", "24h", "24 hours", "24 ore"];

pub(super) fn normalize_transport(raw: &RawRecord) -> Result<CanonicalRecord, DirectoryError> {
    let domain = Domain::Transport;
    let id = require_text(domain, raw, "id")?;
    let mode = require_text(domain, raw, "mode")?;
    let provider = require_text(domain, raw, "provider")?;

    let category = classify(domain, raw)?;
    let mut record = CanonicalRecord::new(domain, id, provider.clone(), category);
    record.tags.extend(lowercase_tags(raw));

    let availability = text_or(raw, "availability", "");
    let lowered = availability.to_lowercase();
    record.set_flag(
        AVAILABLE_24H,
        ROUND_THE_CLOCK.iter().any(|marker| lowered.contains(marker)),
    );
    record.set_flag(HAS_CONTACT, get_text(raw, "contact").is_some());

    record.set_text(MODE, mode);
    record.set_text(PROVIDER, provider);
    record.set_text(DESCRIPTION, text_or(raw, "description", ""));
    record.set_text(AVAILABILITY, availability);
    record.set_text(SAFETY_NOTES, text_or(raw, "safety_notes", ""));
    record.location = read_location(raw);

    Ok(record)
}
