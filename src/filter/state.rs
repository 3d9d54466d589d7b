//! Immutable filter state and the presets behind the housing and essentials
//! screens.

use serde::{Deserialize, Serialize};

use crate::domain::facets::{BEDROOMS, CATEGORY, FAMILY_FRIENDLY, FURNISHED, PRICE};
use crate::domain::Domain;
use crate::error::DirectoryError;
use crate::types::{CanonicalRecord, Category};

use super::{apply_filters, Predicate};

// ============================================================================
// FilterState
// ============================================================================

/// Ordered predicate list. Builders return a new state; nothing mutates in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterState {
    predicates: Vec<Predicate>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// New state with `predicate` appended.
    pub fn with(&self, predicate: Predicate) -> Self {
        let mut predicates = self.predicates.clone();
        predicates.push(predicate);
        Self { predicates }
    }

    /// New state with every predicate on `facet` removed.
    pub fn without(&self, facet: &str) -> Self {
        Self {
            predicates: self
                .predicates
                .iter()
                .filter(|p| p.facet() != facet)
                .cloned()
                .collect(),
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn apply(&self, records: &[CanonicalRecord]) -> Vec<CanonicalRecord> {
        apply_filters(records, &self.predicates)
    }
}

impl FromIterator<Predicate> for FilterState {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self {
            predicates: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Housing presets
// ============================================================================

/// Monthly rent bands offered by the housing screen (whole euros).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceBand {
    #[default]
    Any,
    Under900,
    From900To1200,
    From1200To1500,
    Over1500,
}

impl PriceBand {
    pub const ALL: [PriceBand; 5] = [
        PriceBand::Any,
        PriceBand::Under900,
        PriceBand::From900To1200,
        PriceBand::From1200To1500,
        PriceBand::Over1500,
    ];

    pub fn bounds(&self) -> Option<(Option<f64>, Option<f64>)> {
        match self {
            PriceBand::Any => None,
            PriceBand::Under900 => Some((None, Some(899.0))),
            PriceBand::From900To1200 => Some((Some(900.0), Some(1200.0))),
            PriceBand::From1200To1500 => Some((Some(1200.0), Some(1500.0))),
            PriceBand::Over1500 => Some((Some(1501.0), None)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBand::Any => "Any",
            PriceBand::Under900 => "< €900",
            PriceBand::From900To1200 => "€900–€1,200",
            PriceBand::From1200To1500 => "€1,200–€1,500",
            PriceBand::Over1500 => "> €1,500",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BedroomChoice {
    #[default]
    Any,
    Exactly(u32),
    /// "3+" on the housing screen.
    AtLeast(u32),
}

/// Housing screen controls. Toggles that are off add no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HousingFilters {
    pub price: PriceBand,
    pub bedrooms: BedroomChoice,
    pub furnished_only: bool,
    pub family_friendly_only: bool,
}

impl HousingFilters {
    pub fn to_filter_state(&self) -> Result<FilterState, DirectoryError> {
        let domain = Domain::Rentals;
        let mut state = FilterState::new();

        if let Some((min, max)) = self.price.bounds() {
            state = state.with(Predicate::range(domain, PRICE, min, max)?);
        }
        match self.bedrooms {
            BedroomChoice::Any => {}
            BedroomChoice::Exactly(n) => {
                state = state.with(Predicate::equals(domain, BEDROOMS, n)?);
            }
            BedroomChoice::AtLeast(n) => {
                state = state.with(Predicate::range(domain, BEDROOMS, Some(f64::from(n)), None)?);
            }
        }
        if self.furnished_only {
            state = state.with(Predicate::flag_true(domain, FURNISHED)?);
        }
        if self.family_friendly_only {
            state = state.with(Predicate::flag_true(domain, FAMILY_FRIENDLY)?);
        }
        Ok(state)
    }
}

// ============================================================================
// Essentials tabs
// ============================================================================

/// Tabs of the essentials screen. Schools and Transport switch the source
/// collection rather than filtering essentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EssentialsTab {
    #[default]
    Health,
    Schools,
    Transport,
    Shopping,
    Services,
}

impl EssentialsTab {
    pub const ALL: [EssentialsTab; 5] = [
        EssentialsTab::Health,
        EssentialsTab::Schools,
        EssentialsTab::Transport,
        EssentialsTab::Shopping,
        EssentialsTab::Services,
    ];

    pub fn source_domain(&self) -> Domain {
        match self {
            EssentialsTab::Schools => Domain::Schools,
            EssentialsTab::Transport => Domain::Transport,
            _ => Domain::Essentials,
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        match self {
            EssentialsTab::Health => &[Category::Pharmacy, Category::Clinic],
            EssentialsTab::Shopping => &[Category::Shopping, Category::Electronics],
            EssentialsTab::Services => &[Category::Services],
            EssentialsTab::Schools | EssentialsTab::Transport => &[],
        }
    }

    pub fn to_filter_state(&self) -> Result<FilterState, DirectoryError> {
        let categories = self.categories();
        if categories.is_empty() {
            return Ok(FilterState::new());
        }
        let predicate = Predicate::membership_any(
            Domain::Essentials,
            CATEGORY,
            categories.iter().map(Category::as_str),
        )?;
        Ok(FilterState::new().with(predicate))
    }
}
