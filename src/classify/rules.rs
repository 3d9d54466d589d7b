//! Ordered rule tables, one per classification axis.
//!
//! Order is priority: the first matching rule wins. Keywords are lower-case.

use super::{Rule, RuleTable, RuleTest};
use crate::types::{Category, OpeningStatus};

const fn keywords(fields: &'static [&'static str], words: &'static [&'static str], outcome: Category) -> Rule<Category> {
    Rule {
        test: RuleTest::KeywordsIn { fields, keywords: words },
        outcome,
    }
}

// ============================================================================
// Alerts
// ============================================================================

/// A strike mentioned anywhere outranks a safety keyword; transport or
/// mobility feeds without either keyword are treated as service disruptions.
pub static ALERT_RULES: RuleTable<Category> = RuleTable {
    rules: &[
        keywords(&["message", "category"], &["strike", "sciopero", "walkout"], Category::Strike),
        keywords(
            &["category", "message"],
            &["safety", "police", "theft", "pickpocket", "security", "emergency"],
            Category::Safety,
        ),
        keywords(&["category"], &["transport", "mobility"], Category::Strike),
    ],
    default: Category::Event,
};

// ============================================================================
// Essentials
// ============================================================================

/// Pharmacy before shopping so "pharmacy shop" stays a pharmacy; electronics
/// before shopping so "electronics store" stays electronics.
pub static ESSENTIAL_RULES: RuleTable<Category> = RuleTable {
    rules: &[
        keywords(
            &["type", "name", "tags"],
            &["pharmacy", "pharmacies", "farmacia", "parafarmacia", "chemist"],
            Category::Pharmacy,
        ),
        keywords(
            &["type", "name", "tags"],
            &["clinic", "hospital", "doctor", "medical", "urgent care", "guardia medica", "dentist"],
            Category::Clinic,
        ),
        keywords(
            &["type", "name", "tags"],
            &["electronics", "sim", "phone", "mobile", "telecom", "computer"],
            Category::Electronics,
        ),
        keywords(
            &["type", "name", "tags"],
            &["shopping", "grocery", "groceries", "supermarket", "market", "store", "shop", "mall"],
            Category::Shopping,
        ),
        keywords(
            &["type", "name", "tags"],
            &["service", "bank", "post", "laundry", "legal", "coworking"],
            Category::Services,
        ),
    ],
    default: Category::Services,
};

// ============================================================================
// Transport
// ============================================================================

pub static TRANSPORT_RULES: RuleTable<Category> = RuleTable {
    rules: &[
        keywords(&["mode", "provider"], &["bus", "amat"], Category::Bus),
        keywords(&["mode", "provider"], &["tram"], Category::Tram),
        keywords(&["mode", "provider"], &["metro", "subway", "underground"], Category::Metro),
        keywords(&["mode", "provider"], &["train", "rail", "trenitalia"], Category::Train),
        keywords(&["mode", "provider"], &["taxi", "cab"], Category::Taxi),
        keywords(
            &["mode", "provider"],
            &["rideshare", "ride-hail", "ride hailing", "uber", "bolt", "free now"],
            Category::Rideshare,
        ),
        keywords(&["mode", "provider"], &["bike", "bicycle", "scooter"], Category::Bike),
        keywords(&["mode", "provider"], &["ferry", "boat", "hydrofoil"], Category::Ferry),
    ],
    default: Category::OtherTransport,
};

// ============================================================================
// Events (cost)
// ============================================================================

pub static EVENT_COST_RULES: RuleTable<Category> = RuleTable {
    rules: &[Rule {
        test: RuleTest::Present("ticket_url"),
        outcome: Category::Paid,
    }],
    default: Category::Free,
};

// ============================================================================
// Rentals
// ============================================================================

pub static RENTAL_RULES: RuleTable<Category> = RuleTable {
    rules: &[
        keywords(&["title"], &["studio", "monolocale"], Category::Studio),
        keywords(&["title"], &["villa", "house", "townhouse", "cottage"], Category::House),
    ],
    default: Category::Apartment,
};

// ============================================================================
// Schools
// ============================================================================

pub static SCHOOL_RULES: RuleTable<Category> = RuleTable {
    rules: &[
        keywords(
            &["level"],
            &["nursery", "kindergarten", "preschool", "infant", "early years"],
            Category::EarlyYears,
        ),
        keywords(&["level"], &["primary", "elementary"], Category::Primary),
        keywords(
            &["level"],
            &["secondary", "high school", "middle", "lyceum", "liceo"],
            Category::Secondary,
        ),
    ],
    default: Category::AllThrough,
};

// ============================================================================
// Safety zones
// ============================================================================

pub static SAFETY_RULES: RuleTable<Category> = RuleTable {
    rules: &[
        keywords(&["risk_level"], &["high"], Category::HighRisk),
        keywords(&["risk_level"], &["medium", "moderate"], Category::MediumRisk),
    ],
    default: Category::LowRisk,
};

// ============================================================================
// Auxiliary tag rules
// ============================================================================

pub static OPENING_STATUS_RULES: RuleTable<OpeningStatus> = RuleTable {
    rules: &[Rule {
        test: RuleTest::HasTag { field: "tags", tag: "24h" },
        outcome: OpeningStatus::Open24h,
    }],
    default: OpeningStatus::Open,
};

/// Spoken languages at a venue. Italian is always assumed.
pub static LANGUAGE_RULES: RuleTable<&'static [&'static str]> = RuleTable {
    rules: &[
        Rule {
            test: RuleTest::HasTag { field: "tags", tag: "english-speaking" },
            outcome: &["IT", "EN"],
        },
        Rule {
            test: RuleTest::HasTag { field: "tags", tag: "english" },
            outcome: &["IT", "EN"],
        },
    ],
    default: &["IT"],
};
