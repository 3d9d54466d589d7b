//! Rule-driven classification of raw records.
//!
//! Every axis is an ordered [`RuleTable`]: the first matching rule's outcome
//! wins, otherwise the table default. Classification reads only the record's
//! own fields.

pub mod rules;

use serde_json::Value;

use crate::domain::Domain;
use crate::error::DirectoryError;
use crate::types::{Category, OpeningStatus, RawRecord};

pub use rules::*;

/// Pattern test over a raw record.
#[derive(Debug, Clone, Copy)]
pub enum RuleTest {
    /// Any keyword appears as a whole word (plural suffix tolerated) in any of
    /// the fields, case-insensitively. String arrays are searched element-wise.
    KeywordsIn {
        fields: &'static [&'static str],
        keywords: &'static [&'static str],
    },
    /// The tag list field contains `tag`, ignoring case and `-`/`_` spacing.
    HasTag {
        field: &'static str,
        tag: &'static str,
    },
    /// The field exists and is not null or blank.
    Present(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Rule<T: 'static> {
    pub test: RuleTest,
    pub outcome: T,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleTable<T: 'static> {
    pub rules: &'static [Rule<T>],
    pub default: T,
}

impl<T: Copy> RuleTable<T> {
    /// Index of the first rule matching `record`.
    pub fn first_match(&self, record: &RawRecord) -> Option<usize> {
        self.rules.iter().position(|rule| rule.test.matches(record))
    }

    pub fn evaluate(&self, record: &RawRecord) -> T {
        self.first_match(record)
            .map(|idx| self.rules[idx].outcome)
            .unwrap_or(self.default)
    }

    /// Every outcome the table can produce, default included.
    pub fn outcomes(&self) -> impl Iterator<Item = T> + '_ {
        self.rules
            .iter()
            .map(|rule| rule.outcome)
            .chain(std::iter::once(self.default))
    }
}

impl RuleTest {
    pub fn matches(&self, record: &RawRecord) -> bool {
        match *self {
            RuleTest::KeywordsIn { fields, keywords } => fields.iter().any(|field| {
                field_texts(record, field)
                    .iter()
                    .any(|text| keywords.iter().any(|kw| contains_keyword(text, kw)))
            }),
            RuleTest::HasTag { field, tag } => {
                let wanted = normalize_tag(tag);
                field_texts(record, field)
                    .iter()
                    .any(|candidate| normalize_tag(candidate) == wanted)
            }
            RuleTest::Present(field) => crate::types::is_present(record, field),
        }
    }
}

/// Category table for a domain.
pub fn category_table(domain: Domain) -> &'static RuleTable<Category> {
    match domain {
        Domain::Rentals => &RENTAL_RULES,
        Domain::Essentials => &ESSENTIAL_RULES,
        Domain::Schools => &SCHOOL_RULES,
        Domain::Transport => &TRANSPORT_RULES,
        Domain::SafetyZones => &SAFETY_RULES,
        Domain::Alerts => &ALERT_RULES,
        Domain::Events => &EVENT_COST_RULES,
    }
}

/// Classify a raw record into its domain's closed category set.
pub fn classify(domain: Domain, record: &RawRecord) -> Result<Category, DirectoryError> {
    let category = category_table(domain).evaluate(record);
    if domain.categories().contains(&category) {
        Ok(category)
    } else {
        Err(DirectoryError::UnknownCategory { domain, category })
    }
}

/// Opening status from the record's tags.
pub fn opening_status(record: &RawRecord) -> OpeningStatus {
    OPENING_STATUS_RULES.evaluate(record)
}

/// Spoken languages from the record's tags.
pub fn spoken_languages(record: &RawRecord) -> &'static [&'static str] {
    LANGUAGE_RULES.evaluate(record)
}

// ============================================================================
// Matching helpers
// ============================================================================

fn field_texts(record: &RawRecord, field: &str) -> Vec<String> {
    match record.get(field) {
        Some(Value::String(s)) => vec![s.to_lowercase()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
}

/// Whole-word match of a lower-case keyword inside lower-cased text.
/// A trailing "s" or "es" on the matched word is tolerated.
fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(start, _)| {
        let starts_word = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        if !starts_word {
            return false;
        }
        let rest = &text[start + keyword.len()..];
        let ends_word = |tail: &str| tail.chars().next().map_or(true, |c| !c.is_alphanumeric());
        ends_word(rest)
            || rest.strip_prefix('s').is_some_and(ends_word)
            || rest.strip_prefix("es").is_some_and(ends_word)
    })
}
