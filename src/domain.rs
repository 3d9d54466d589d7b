//! Backend domains and their static contracts.
//!
//! Each domain carries its endpoint, dataset name, required raw fields,
//! closed category set, and the facet schema its canonical records expose.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Category;

/// Facet names shared by normalizers, predicates and the compositor.
pub mod facets {
    // Numeric
    pub const PRICE: &str = "price";
    pub const BEDROOMS: &str = "bedrooms";
    pub const TRANSIT_DISTANCE_M: &str = "transit_distance_m";
    pub const DISTANCE_M: &str = "distance_m";
    pub const TUITION_EUR: &str = "tuition_eur";
    pub const RATING: &str = "rating";
    pub const RISK_SCORE: &str = "risk_score";
    pub const PUBLISHED_TS: &str = "published_ts";
    pub const SEVERITY_RANK: &str = "severity_rank";
    pub const START_TS: &str = "start_ts";
    pub const END_TS: &str = "end_ts";

    // Flags
    pub const FURNISHED: &str = "furnished";
    pub const FAMILY_FRIENDLY: &str = "family_friendly";
    pub const PET_FRIENDLY: &str = "pet_friendly";
    pub const VERIFIED: &str = "verified";
    pub const OPEN_24H: &str = "open_24h";
    pub const ENGLISH_SPEAKING: &str = "english_speaking";
    pub const ENGLISH_TAUGHT: &str = "english_taught";
    pub const HAS_CONTACT: &str = "has_contact";
    pub const AVAILABLE_24H: &str = "available_24h";
    pub const TICKETED: &str = "ticketed";

    // Text
    pub const NEIGHBORHOOD: &str = "neighborhood";
    pub const CONTACT: &str = "contact";
    pub const URL: &str = "url";
    pub const ADDRESS: &str = "address";
    pub const STATUS: &str = "status";
    pub const SOURCE_TYPE: &str = "source_type";
    pub const CURRICULUM: &str = "curriculum";
    pub const LEVEL: &str = "level";
    pub const MODE: &str = "mode";
    pub const PROVIDER: &str = "provider";
    pub const DESCRIPTION: &str = "description";
    pub const AVAILABILITY: &str = "availability";
    pub const SAFETY_NOTES: &str = "safety_notes";
    pub const RISK_LEVEL: &str = "risk_level";
    pub const TREND: &str = "trend";
    pub const UPDATED_AT: &str = "updated_at";
    pub const PUBLISHED_AT: &str = "published_at";
    pub const SEVERITY: &str = "severity";
    pub const SOURCE_CATEGORY: &str = "source_category";
    pub const VENUE: &str = "venue";
    pub const START_TIME: &str = "start_time";
    pub const END_TIME: &str = "end_time";
    pub const SUMMARY: &str = "summary";
    pub const TICKET_URL: &str = "ticket_url";
    pub const COST: &str = "cost";

    // Sets
    pub const TAGS: &str = "tags";
    pub const LANGUAGES: &str = "languages";
    pub const CATEGORY: &str = "category";
}

use facets::*;

/// Set-valued facets available on every domain.
pub const SET_FACETS: &[&str] = &[TAGS, LANGUAGES, CATEGORY];

/// Facet names a domain's canonical records always carry.
#[derive(Debug, Clone, Copy)]
pub struct FacetSchema {
    pub numeric: &'static [&'static str],
    pub flags: &'static [&'static str],
    pub text: &'static [&'static str],
}

/// What kind of value a facet holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Numeric,
    Flag,
    Text,
    Set,
}

impl FacetSchema {
    pub fn kind_of(&self, facet: &str) -> Option<FacetKind> {
        if self.numeric.contains(&facet) {
            Some(FacetKind::Numeric)
        } else if self.flags.contains(&facet) {
            Some(FacetKind::Flag)
        } else if self.text.contains(&facet) {
            Some(FacetKind::Text)
        } else if SET_FACETS.contains(&facet) {
            Some(FacetKind::Set)
        } else {
            None
        }
    }
}

/// One backend collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Rentals,
    Essentials,
    Schools,
    Transport,
    SafetyZones,
    Alerts,
    Events,
}

impl Domain {
    pub const ALL: [Domain; 7] = [
        Domain::Rentals,
        Domain::Essentials,
        Domain::Schools,
        Domain::Transport,
        Domain::SafetyZones,
        Domain::Alerts,
        Domain::Events,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Rentals => "rentals",
            Domain::Essentials => "essentials",
            Domain::Schools => "schools",
            Domain::Transport => "transport",
            Domain::SafetyZones => "safety_zones",
            Domain::Alerts => "alerts",
            Domain::Events => "events",
        }
    }

    /// Backend endpoint the network collaborator fetches this domain from.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Domain::Rentals => "/api/housing/rentals",
            Domain::Essentials => "/api/shopping/essentials",
            Domain::Schools => "/api/schools/directory",
            Domain::Transport => "/api/transport/options",
            Domain::SafetyZones => "/api/safety/zones",
            Domain::Alerts => "/api/utilities/alerts",
            Domain::Events => "/api/culture/events",
        }
    }

    /// File stem of the static dataset (`{data_dir}/{dataset}.json`).
    pub fn dataset_name(&self) -> &'static str {
        match self {
            Domain::Rentals => "rentals",
            Domain::Essentials => "essentials",
            Domain::Schools => "schools",
            Domain::Transport => "transport",
            Domain::SafetyZones => "safety",
            Domain::Alerts => "alerts",
            Domain::Events => "events",
        }
    }

    /// Raw fields checked, in this order, before a record is normalized.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Domain::Rentals => &["id", "title", "price_eur", "bedrooms", "neighborhood"],
            Domain::Essentials => &["id", "name", "type", "neighborhood"],
            Domain::Schools => &["id", "name", "curriculum", "level", "language"],
            Domain::Transport => &["id", "mode", "provider"],
            Domain::SafetyZones => &["id", "neighborhood", "risk_level"],
            Domain::Alerts => &["id", "category", "message", "published_at"],
            Domain::Events => &["id", "name", "venue", "start_time"],
        }
    }

    /// Closed category set for the domain.
    pub fn categories(&self) -> &'static [Category] {
        use Category::*;
        match self {
            Domain::Rentals => &[Studio, Apartment, House],
            Domain::Essentials => &[Pharmacy, Clinic, Electronics, Shopping, Services],
            Domain::Schools => &[EarlyYears, Primary, Secondary, AllThrough],
            Domain::Transport => &[Bus, Tram, Metro, Train, Taxi, Rideshare, Bike, Ferry, OtherTransport],
            Domain::SafetyZones => &[LowRisk, MediumRisk, HighRisk],
            Domain::Alerts => &[Strike, Event, Safety],
            Domain::Events => &[Free, Paid],
        }
    }

    pub fn facet_schema(&self) -> FacetSchema {
        match self {
            Domain::Rentals => FacetSchema {
                numeric: &[PRICE, BEDROOMS, TRANSIT_DISTANCE_M],
                flags: &[FURNISHED, FAMILY_FRIENDLY, PET_FRIENDLY, VERIFIED],
                text: &[NEIGHBORHOOD, CONTACT, URL],
            },
            Domain::Essentials => FacetSchema {
                numeric: &[DISTANCE_M],
                flags: &[OPEN_24H, ENGLISH_SPEAKING],
                text: &[NEIGHBORHOOD, ADDRESS, STATUS, SOURCE_TYPE],
            },
            Domain::Schools => FacetSchema {
                numeric: &[TUITION_EUR, RATING, DISTANCE_M],
                flags: &[ENGLISH_TAUGHT],
                text: &[CURRICULUM, LEVEL, ADDRESS],
            },
            Domain::Transport => FacetSchema {
                numeric: &[],
                flags: &[HAS_CONTACT, AVAILABLE_24H],
                text: &[MODE, PROVIDER, DESCRIPTION, AVAILABILITY, SAFETY_NOTES],
            },
            Domain::SafetyZones => FacetSchema {
                numeric: &[RISK_SCORE],
                flags: &[],
                text: &[RISK_LEVEL, TREND, DESCRIPTION, UPDATED_AT],
            },
            Domain::Alerts => FacetSchema {
                numeric: &[PUBLISHED_TS, SEVERITY_RANK],
                flags: &[],
                text: &[PUBLISHED_AT, SEVERITY, SOURCE_CATEGORY],
            },
            Domain::Events => FacetSchema {
                numeric: &[START_TS, END_TS],
                flags: &[TICKETED],
                text: &[VENUE, START_TIME, END_TIME, SUMMARY, TICKET_URL, COST],
            },
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_start_with_id() {
        for domain in Domain::ALL {
            assert_eq!(domain.required_fields()[0], "id", "{domain}");
        }
    }

    #[test]
    fn test_facet_kind_lookup() {
        let schema = Domain::Rentals.facet_schema();
        assert_eq!(schema.kind_of(PRICE), Some(FacetKind::Numeric));
        assert_eq!(schema.kind_of(FURNISHED), Some(FacetKind::Flag));
        assert_eq!(schema.kind_of(NEIGHBORHOOD), Some(FacetKind::Text));
        assert_eq!(schema.kind_of(TAGS), Some(FacetKind::Set));
        assert_eq!(schema.kind_of("open_24h"), None);
    }

    #[test]
    fn test_schema_names_are_unique_per_domain() {
        for domain in Domain::ALL {
            let schema = domain.facet_schema();
            let mut names: Vec<&str> = schema
                .numeric
                .iter()
                .chain(schema.flags)
                .chain(schema.text)
                .chain(SET_FACETS)
                .copied()
                .collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate facet in {domain}");
        }
    }
}
