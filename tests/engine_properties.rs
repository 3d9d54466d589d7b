//! Engine Property Tests
//!
//! End-to-end checks over the public API: raw JSON → normalize → filter →
//! spotlight / compose.

use relocation_directory::facets::*;
use relocation_directory::filter::{BedroomChoice, EssentialsTab, HousingFilters, PriceBand};
use relocation_directory::spotlight::{ESSENTIALS_SPOTLIGHT, HOUSING_SPOTLIGHT};
use relocation_directory::{
    apply_filters, classify, compose, normalize, parse_records, spotlight, CanonicalRecord,
    Category, Composition, Domain, Layer, LayerCollections, LoadState, Predicate, RawRecord,
};
use serde_json::json;

fn raws(value: serde_json::Value) -> Vec<RawRecord> {
    parse_records(&value.to_string()).unwrap()
}

fn ids(records: &[CanonicalRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

fn sample_rentals() -> Vec<RawRecord> {
    raws(json!([
        {"id": "r1", "title": "Studio in Kalsa", "price_eur": 800, "bedrooms": 1,
         "furnished": true, "neighborhood": "Kalsa"},
        {"id": "r2", "title": "Family apartment", "price_eur": 1300, "bedrooms": 2,
         "kid_friendly": true, "neighborhood": "Libertà"},
        {"id": "r3", "title": "Townhouse near the sea", "price_eur": 1650, "bedrooms": 3,
         "furnished": true, "kid_friendly": true, "neighborhood": "Mondello"},
        {"id": "r4", "title": "Bright apartment", "price_eur": 1100, "bedrooms": 2,
         "furnished": true, "neighborhood": "Politeama"},
        {"id": "r5", "title": "Missing price", "bedrooms": 2, "neighborhood": "Zisa"},
        {"id": "r6", "title": "Cosy loft", "price_eur": 950, "bedrooms": 1,
         "neighborhood": "Ballarò", "pet_friendly": true}
    ]))
}

fn sample_predicate_sets() -> Vec<Vec<Predicate>> {
    let price = |min, max| Predicate::range(Domain::Rentals, PRICE, min, max).unwrap();
    vec![
        vec![],
        vec![price(Some(900.0), Some(1200.0))],
        vec![Predicate::flag_true(Domain::Rentals, FURNISHED).unwrap()],
        vec![
            price(None, Some(1500.0)),
            Predicate::equals(Domain::Rentals, BEDROOMS, 2u32).unwrap(),
        ],
        vec![Predicate::membership_any(Domain::Rentals, TAGS, ["pet-friendly", "family-friendly"]).unwrap()],
        vec![Predicate::membership_any(Domain::Rentals, CATEGORY, ["Studio", "House"]).unwrap()],
    ]
}

// ============================================================================
// Normalizer
// ============================================================================

#[test]
fn test_normalize_is_idempotent() {
    let input = sample_rentals();
    assert_eq!(normalize(Domain::Rentals, &input), normalize(Domain::Rentals, &input));
}

#[test]
fn test_normalize_preserves_order_and_reports_rejections() {
    let batch = normalize(Domain::Rentals, &sample_rentals());
    assert_eq!(ids(&batch.records), vec!["r1", "r2", "r3", "r4", "r6"]);
    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.rejected[0].index, 4);
    assert_eq!(batch.rejected[0].id.as_deref(), Some("r5"));
}

#[test]
fn test_every_schema_facet_is_present() {
    let inputs = [
        (Domain::Rentals, json!({"id": "r", "title": "Flat", "price_eur": 900, "bedrooms": 1, "neighborhood": "Kalsa"})),
        (Domain::Essentials, json!({"id": "e", "name": "Coop", "type": "supermarket", "neighborhood": "Centro"})),
        (Domain::Schools, json!({"id": "s", "name": "Scuola", "curriculum": "National", "level": "primary", "language": ["Italian"]})),
        (Domain::Transport, json!({"id": "t", "mode": "bus", "provider": "AMAT"})),
        (Domain::SafetyZones, json!({"id": "z", "neighborhood": "Kalsa", "risk_level": "low"})),
        (Domain::Alerts, json!({"id": "a", "category": "utilities", "message": "Outage", "published_at": "2024-05-20"})),
        (Domain::Events, json!({"id": "ev", "name": "Concert", "venue": "Teatro", "start_time": "2024-06-01T20:00:00Z"})),
    ];

    for (domain, raw) in inputs {
        let batch = normalize(domain, &raws(json!([raw])));
        assert!(batch.is_complete(), "{domain}: {:?}", batch.rejected);
        let record = &batch.records[0];
        let schema = domain.facet_schema();
        for facet in schema.numeric {
            assert!(record.numeric(facet).is_some(), "{domain} missing numeric {facet}");
        }
        for facet in schema.flags {
            assert!(record.flag(facet).is_some(), "{domain} missing flag {facet}");
        }
        for facet in schema.text {
            assert!(record.text(facet).is_some(), "{domain} missing text {facet}");
        }
        assert!(domain.categories().contains(&record.category));
    }
}

// ============================================================================
// Classifier
// ============================================================================

#[test]
fn test_alert_scenario_classifies_as_strike() {
    let alert = raws(json!([{
        "id": "a1",
        "category": "transport",
        "message": "AMAT bus strike Friday",
        "published_at": "2024-05-20"
    }]));
    let batch = normalize(Domain::Alerts, &alert);
    assert_eq!(batch.records[0].category, Category::Strike);
}

#[test]
fn test_classifier_is_deterministic() {
    let batch = raws(json!([{
        "id": "a2",
        "category": "safety",
        "message": "Metro strike: police advise alternative routes",
        "published_at": "2024-05-21"
    }]));
    let alert = &batch[0];
    let first = classify(Domain::Alerts, alert).unwrap();
    assert_eq!(first, Category::Strike);
    for _ in 0..20 {
        assert_eq!(classify(Domain::Alerts, alert).unwrap(), first);
    }
}

// ============================================================================
// Filter engine
// ============================================================================

#[test]
fn test_rental_filter_scenario() {
    let records = normalize(
        Domain::Rentals,
        &raws(json!([
            {"id": "r1", "title": "Studio", "price_eur": 800, "bedrooms": 1, "neighborhood": "Kalsa"},
            {"id": "r2", "title": "Apartment", "price_eur": 1300, "bedrooms": 2, "neighborhood": "Libertà"}
        ])),
    )
    .records;

    let mid_band = Predicate::range(Domain::Rentals, PRICE, Some(900.0), Some(1200.0)).unwrap();
    assert!(apply_filters(&records, &[mid_band]).is_empty());

    let under_1000 = Predicate::range(Domain::Rentals, PRICE, Some(0.0), Some(1000.0)).unwrap();
    let one_bed = Predicate::range(Domain::Rentals, BEDROOMS, Some(1.0), Some(1.0)).unwrap();
    assert_eq!(ids(&apply_filters(&records, &[under_1000, one_bed])), vec!["r1"]);

    let two_beds = Predicate::equals(Domain::Rentals, BEDROOMS, 2u32).unwrap();
    assert_eq!(ids(&apply_filters(&records, &[two_beds])), vec!["r2"]);
}

#[test]
fn test_empty_predicates_are_identity() {
    let records = normalize(Domain::Rentals, &sample_rentals()).records;
    assert_eq!(apply_filters(&records, &[]), records);
}

#[test]
fn test_filter_output_is_ordered_subsequence() {
    let records = normalize(Domain::Rentals, &sample_rentals()).records;
    for predicates in sample_predicate_sets() {
        let output = apply_filters(&records, &predicates);
        let mut cursor = records.iter();
        for kept in &output {
            assert!(cursor.any(|r| r == kept), "{:?} broke input order", kept.id);
        }
    }
}

#[test]
fn test_adding_a_predicate_never_grows_the_result() {
    let records = normalize(Domain::Rentals, &sample_rentals()).records;
    let extra = Predicate::flag_true(Domain::Rentals, FAMILY_FRIENDLY).unwrap();
    for predicates in sample_predicate_sets() {
        let before = apply_filters(&records, &predicates);
        let mut extended = predicates.clone();
        extended.push(extra.clone());
        let after = apply_filters(&records, &extended);
        assert!(after.len() <= before.len());
        assert!(after.iter().all(|r| before.contains(r)));
    }
}

#[test]
fn test_housing_presets_end_to_end() {
    let records = normalize(Domain::Rentals, &sample_rentals()).records;
    let filters = HousingFilters {
        price: PriceBand::Over1500,
        bedrooms: BedroomChoice::AtLeast(3),
        furnished_only: true,
        family_friendly_only: true,
    };
    let state = filters.to_filter_state().unwrap();
    assert_eq!(ids(&state.apply(&records)), vec!["r3"]);
}

// ============================================================================
// Spotlight and compositor
// ============================================================================

#[test]
fn test_essentials_spotlight_of_ten() {
    let venues: Vec<serde_json::Value> = (1..=10)
        .map(|i| json!({"id": format!("e{i}"), "name": format!("Farmacia {i}"), "type": "pharmacy", "neighborhood": "Kalsa"}))
        .collect();
    let records = normalize(Domain::Essentials, &raws(json!(venues))).records;
    let health = EssentialsTab::Health.to_filter_state().unwrap().apply(&records);
    assert_eq!(health.len(), 10);

    let shown = spotlight(&health, ESSENTIALS_SPOTLIGHT);
    assert_eq!(ids(shown), vec!["e1", "e2", "e3", "e4", "e5", "e6"]);
}

#[test]
fn test_spotlight_bound() {
    let records = normalize(Domain::Rentals, &sample_rentals()).records;
    for n in 0..10 {
        let shown = spotlight(&records, n);
        assert_eq!(shown.len(), n.min(records.len()));
        assert_eq!(shown, &records[..shown.len()]);
    }
    assert_eq!(spotlight(&records, HOUSING_SPOTLIGHT).len(), 3);
}

#[test]
fn test_housing_layer_composition() {
    let records = normalize(Domain::Rentals, &sample_rentals()).records;
    let collections = LayerCollections::default();
    assert_eq!(compose(Layer::Housing, &collections), Composition::Pending);

    let collections = collections.update(Layer::Housing, |s| s.start().complete(records));
    let composition = compose(Layer::Housing, &collections);
    let rows = composition.rows();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[1].subtitle, "Libertà · €1,300/mo");
    assert_eq!(rows[1].badge.as_deref(), Some("400m"));

    // a late failure does not replace loaded data
    let collections = collections.update(Layer::Housing, |s| s.fail("timeout"));
    assert!(matches!(collections.housing, LoadState::Ready(_)));
}
