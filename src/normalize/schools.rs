//! School directory entries.

use super::*;
use crate::classify::classify;
use crate::domain::facets::*;

pub(super) fn normalize_school(raw: &RawRecord) -> Result<CanonicalRecord, DirectoryError> {
    let domain = Domain::Schools;
    let id = require_text(domain, raw, "id")?;
    let name = require_text(domain, raw, "name")?;
    let curriculum = require_text(domain, raw, "curriculum")?;
    let level = require_text(domain, raw, "level")?;
    let languages = require_list(domain, raw, "language")?;

    let category = classify(domain, raw)?;
    let mut record = CanonicalRecord::new(domain, id, name, category);

    record.languages = languages.iter().map(|l| language_code(l)).collect();
    record.tags.extend(lowercase_tags(raw));

    // null tuition means a state school
    record.set_numeric(
        TUITION_EUR,
        get_f64(raw, "tuition_eur").unwrap_or(DEFAULT_TUITION_EUR),
    );
    record.set_numeric(RATING, get_f64(raw, "rating").unwrap_or(DEFAULT_RATING));
    record.set_numeric(
        DISTANCE_M,
        get_f64(raw, "distance_m").unwrap_or(DEFAULT_DISTANCE_M),
    );

    let english = record.languages.contains("EN");
    record.set_flag(ENGLISH_TAUGHT, english);

    record.set_text(CURRICULUM, curriculum);
    record.set_text(LEVEL, capitalise(&level));
    record.set_text(ADDRESS, text_or(raw, "address", ""));
    record.location = read_location(raw);

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use serde_json::json;

    #[test]
    fn test_international_school() {
        let raw = json!({
            "id": "s1",
            "name": "Palermo International School",
            "curriculum": "IB",
            "level": "primary",
            "language": ["English", "Italian"],
            "rating": 4.6,
            "tuition_eur": 9800,
            "address": "Via Libertà 12"
        });
        let record = normalize_school(raw.as_object().unwrap()).unwrap();

        assert_eq!(record.category, Category::Primary);
        assert_eq!(record.text(LEVEL), Some("Primary"));
        assert_eq!(record.flag(ENGLISH_TAUGHT), Some(true));
        assert_eq!(record.numeric(TUITION_EUR), Some(9800.0));
        assert_eq!(record.numeric(RATING), Some(4.6));
        assert_eq!(record.numeric(DISTANCE_M), Some(DEFAULT_DISTANCE_M));
        assert_eq!(record.languages.iter().collect::<Vec<_>>(), vec!["EN", "IT"]);
    }

    #[test]
    fn test_state_school_null_tuition() {
        let raw = json!({
            "id": "s2",
            "name": "Liceo Garibaldi",
            "curriculum": "Italian national",
            "level": "liceo",
            "language": "Italian",
            "tuition_eur": null
        });
        let record = normalize_school(raw.as_object().unwrap()).unwrap();

        assert_eq!(record.category, Category::Secondary);
        assert_eq!(record.numeric(TUITION_EUR), Some(0.0));
        assert_eq!(record.numeric(RATING), Some(0.0));
        assert_eq!(record.flag(ENGLISH_TAUGHT), Some(false));
        assert_eq!(record.text(ADDRESS), Some(""));
    }

    #[test]
    fn test_empty_language_list_is_missing() {
        let raw = json!({
            "id": "s3",
            "name": "Scuola",
            "curriculum": "Montessori",
            "level": "nursery",
            "language": []
        });
        assert_eq!(
            normalize_school(raw.as_object().unwrap()),
            Err(DirectoryError::MissingRequiredField { domain: Domain::Schools, field: "language" })
        );
    }
}
