//! Filter engine: order-preserving conjunction of predicates.
//!
//! ```text
//! records ──► [p1 ∧ p2 ∧ … ∧ pn] ──► subsequence of records, same order
//! ```
//!
//! The empty predicate list is the identity. Records are never reordered,
//! deduplicated or modified.

pub mod predicate;
pub mod state;

use crate::types::CanonicalRecord;

pub use predicate::{Predicate, PredicateKind};
pub use state::{BedroomChoice, EssentialsTab, FilterState, HousingFilters, PriceBand};

/// Keep the records satisfying every predicate, in input order.
pub fn apply_filters(records: &[CanonicalRecord], predicates: &[Predicate]) -> Vec<CanonicalRecord> {
    filter_refs(records, predicates).cloned().collect()
}

/// Borrowing variant of [`apply_filters`].
pub fn filter_refs<'a>(
    records: &'a [CanonicalRecord],
    predicates: &'a [Predicate],
) -> impl Iterator<Item = &'a CanonicalRecord> + 'a {
    records
        .iter()
        .filter(move |record| predicates.iter().all(|p| p.matches(record)))
}
