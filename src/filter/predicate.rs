//! Validated filter predicates.
//!
//! A predicate is checked against its domain's facet schema when it is built,
//! so evaluation never fails: a record without the facet (or from another
//! domain) simply does not match.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::facets::{CATEGORY, LANGUAGES, TAGS};
use crate::domain::{Domain, FacetKind};
use crate::error::DirectoryError;
use crate::types::{CanonicalRecord, FacetValue};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PredicateKind {
    /// Inclusive bounds; `None` leaves that side open.
    Range { min: Option<f64>, max: Option<f64> },
    Equals(FacetValue),
    FlagTrue,
    /// Candidates as given; compared case-insensitively except for `category`.
    MembershipAny(BTreeSet<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predicate {
    domain: Domain,
    facet: String,
    kind: PredicateKind,
}

impl Predicate {
    pub fn range(
        domain: Domain,
        facet: &str,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<Self, DirectoryError> {
        expect_kind(domain, facet, FacetKind::Numeric)?;
        if min.is_none() && max.is_none() {
            return Err(DirectoryError::invalid_predicate(domain, facet, "range needs at least one bound"));
        }
        if min.is_some_and(f64::is_nan) || max.is_some_and(f64::is_nan) {
            return Err(DirectoryError::invalid_predicate(domain, facet, "range bound is NaN"));
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(DirectoryError::invalid_predicate(
                    domain,
                    facet,
                    format!("min {lo} is greater than max {hi}"),
                ));
            }
        }
        Ok(Self::build(domain, facet, PredicateKind::Range { min, max }))
    }

    /// Numeric equality on numeric facets, case-insensitive text equality on
    /// text facets.
    pub fn equals(
        domain: Domain,
        facet: &str,
        value: impl Into<FacetValue>,
    ) -> Result<Self, DirectoryError> {
        let value = value.into();
        let schema = domain.facet_schema();
        match (schema.kind_of(facet), &value) {
            (Some(FacetKind::Numeric), FacetValue::Number(n)) if n.is_nan() => {
                Err(DirectoryError::invalid_predicate(domain, facet, "equality operand is NaN"))
            }
            (Some(FacetKind::Numeric), FacetValue::Number(_))
            | (Some(FacetKind::Text), FacetValue::Text(_)) => {
                Ok(Self::build(domain, facet, PredicateKind::Equals(value)))
            }
            (None, _) => Err(unknown_facet(domain, facet)),
            (Some(kind), _) => Err(DirectoryError::invalid_predicate(
                domain,
                facet,
                format!("{kind:?} facet cannot be compared with {value:?}"),
            )),
        }
    }

    pub fn flag_true(domain: Domain, facet: &str) -> Result<Self, DirectoryError> {
        expect_kind(domain, facet, FacetKind::Flag)?;
        Ok(Self::build(domain, facet, PredicateKind::FlagTrue))
    }

    pub fn membership_any<I, S>(
        domain: Domain,
        facet: &str,
        candidates: I,
    ) -> Result<Self, DirectoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        expect_kind(domain, facet, FacetKind::Set)?;
        let candidates: BTreeSet<String> = candidates
            .into_iter()
            .map(|c| {
                let c: String = c.into();
                c.trim().to_string()
            })
            .filter(|c| !c.is_empty())
            .collect();
        if candidates.is_empty() {
            return Err(DirectoryError::invalid_predicate(domain, facet, "empty candidate set"));
        }
        Ok(Self::build(domain, facet, PredicateKind::MembershipAny(candidates)))
    }

    fn build(domain: Domain, facet: &str, kind: PredicateKind) -> Self {
        Self {
            domain,
            facet: facet.to_string(),
            kind,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn facet(&self) -> &str {
        &self.facet
    }

    pub fn kind(&self) -> &PredicateKind {
        &self.kind
    }

    /// Total evaluation against one record.
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        if record.domain != self.domain {
            return false;
        }
        match &self.kind {
            PredicateKind::Range { min, max } => record.numeric(&self.facet).is_some_and(|v| {
                min.map_or(true, |lo| v >= lo) && max.map_or(true, |hi| v <= hi)
            }),
            PredicateKind::Equals(FacetValue::Number(n)) => record.numeric(&self.facet) == Some(*n),
            PredicateKind::Equals(FacetValue::Text(s)) => record
                .text(&self.facet)
                .is_some_and(|t| t.trim().to_lowercase() == s.trim().to_lowercase()),
            PredicateKind::FlagTrue => record.flag(&self.facet) == Some(true),
            PredicateKind::MembershipAny(candidates) => match self.facet.as_str() {
                CATEGORY => candidates.contains(record.category.as_str()),
                TAGS => intersects_ignore_case(&record.tags, candidates),
                LANGUAGES => intersects_ignore_case(&record.languages, candidates),
                _ => false,
            },
        }
    }
}

fn unknown_facet(domain: Domain, facet: &str) -> DirectoryError {
    DirectoryError::invalid_predicate(domain, facet, format!("unknown facet for {domain}"))
}

fn expect_kind(domain: Domain, facet: &str, wanted: FacetKind) -> Result<(), DirectoryError> {
    match domain.facet_schema().kind_of(facet) {
        Some(kind) if kind == wanted => Ok(()),
        Some(kind) => Err(DirectoryError::invalid_predicate(
            domain,
            facet,
            format!("expected a {wanted:?} facet, found {kind:?}"),
        )),
        None => Err(unknown_facet(domain, facet)),
    }
}

fn intersects_ignore_case(values: &BTreeSet<String>, candidates: &BTreeSet<String>) -> bool {
    values
        .iter()
        .any(|v| candidates.iter().any(|c| c.to_lowercase() == v.to_lowercase()))
}
