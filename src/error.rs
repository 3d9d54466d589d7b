//! Engine error taxonomy.
//!
//! Every variant is deterministic for a given input, so callers never retry.

use thiserror::Error;

use crate::domain::Domain;
use crate::types::Category;

/// Errors raised by the pure directory engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectoryError {
    /// A raw record lacks a field its domain requires. Fatal to that record only.
    #[error("{domain} record is missing required field '{field}'")]
    MissingRequiredField { domain: Domain, field: &'static str },

    /// A predicate could not be built against the domain's facet schema.
    #[error("invalid {domain} predicate on '{facet}': {reason}")]
    InvalidPredicate {
        domain: Domain,
        facet: String,
        reason: String,
    },

    /// The classifier produced a category outside the domain's closed set.
    /// Indicates a rule-table defect rather than bad input.
    #[error("classifier produced {category:?}, which is not a {domain} category")]
    UnknownCategory { domain: Domain, category: Category },
}

impl DirectoryError {
    pub(crate) fn invalid_predicate(
        domain: Domain,
        facet: &str,
        reason: impl Into<String>,
    ) -> Self {
        DirectoryError::InvalidPredicate {
            domain,
            facet: facet.to_string(),
            reason: reason.into(),
        }
    }
}
