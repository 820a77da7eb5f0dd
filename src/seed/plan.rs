use super::canonical::{CANONICAL_RESTAURANTS, CanonicalRestaurant, GREEN_GARDEN};
use std::collections::BTreeSet;

/// Size of the canonical baseline. A store holding at least this many restaurants is
/// left alone.
pub const BASELINE_SIZE: usize = CANONICAL_RESTAURANTS.len();

/// Which canonical restaurants a reconciliation has to insert.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InsertPlan {
    restaurants: Vec<&'static CanonicalRestaurant>,
}

impl InsertPlan {
    pub fn nothing() -> Self {
        Self::default()
    }

    pub fn baseline() -> Self {
        Self {
            restaurants: CANONICAL_RESTAURANTS.iter().collect(),
        }
    }

    pub fn green_garden() -> Self {
        Self {
            restaurants: vec![CanonicalRestaurant::green_garden()],
        }
    }

    pub fn restaurants(&self) -> &[&'static CanonicalRestaurant] {
        &self.restaurants
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.restaurants.iter().map(|r| r.name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

/// Decide what to insert given the names currently in the store.
///
/// An empty store receives the whole baseline. A store with fewer than
/// [`BASELINE_SIZE`] restaurants receives "The Green Garden" unless it already has it;
/// the other canonical restaurants are not checked for in that case.
pub fn plan_inserts(existing: &BTreeSet<String>) -> InsertPlan {
    match existing.len() {
        0 => InsertPlan::baseline(),
        n if n < BASELINE_SIZE && !existing.contains(GREEN_GARDEN) => InsertPlan::green_garden(),
        _ => InsertPlan::nothing(),
    }
}
