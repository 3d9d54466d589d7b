use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relocation_directory::filter::{BedroomChoice, HousingFilters, PriceBand};
use relocation_directory::{apply_filters, normalize, Domain, RawRecord};
use serde_json::json;

const NEIGHBORHOODS: [&str; 4] = ["Kalsa", "Politeama", "Libertà", "Ballarò"];

fn build_rentals(n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| {
            let title = if i % 5 == 0 { "Studio in centro" } else { "Two-bed apartment" };
            let neighborhood = NEIGHBORHOODS[i % NEIGHBORHOODS.len()];
            let raw = json!({
                "id": format!("r{i}"),
                "title": title,
                "price_eur": 600 + (i % 20) * 75,
                "bedrooms": 1 + i % 4,
                "furnished": i % 2 == 0,
                "kid_friendly": i % 3 == 0,
                "neighborhood": neighborhood,
                "distance_to_transit_m": 100 + (i % 9) * 90
            });
            raw.as_object().cloned().unwrap()
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let raws = build_rentals(5_000);
    c.bench_function("normalize_rentals_5k", |b| {
        b.iter(|| black_box(normalize(Domain::Rentals, black_box(&raws)).records.len()))
    });
}

fn bench_filters(c: &mut Criterion) {
    let records = normalize(Domain::Rentals, &build_rentals(5_000)).records;
    let state = HousingFilters {
        price: PriceBand::From900To1200,
        bedrooms: BedroomChoice::AtLeast(2),
        furnished_only: true,
        family_friendly_only: false,
    }
    .to_filter_state()
    .unwrap();

    c.bench_function("housing_filters_5k", |b| {
        b.iter(|| black_box(apply_filters(black_box(&records), state.predicates()).len()))
    });
}

criterion_group!(benches, bench_normalize, bench_filters);
criterion_main!(benches);
