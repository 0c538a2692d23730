use serde::Serialize;

use super::model::columns::{CUISINES, LOCATION, ONLINE_ORDER};
use super::model::{Listing, ListingTable};
use super::summary::Summary;

// ---------------------------------------------------------------------------
// Filter criteria: one optional constraint per dimension
// ---------------------------------------------------------------------------

/// User-chosen filter criteria. `None` is the wildcard ("no constraint"),
/// so the default value matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    /// Exact, case-sensitive match on `location`.
    pub location: Option<String>,
    /// Case-insensitive substring match on `cuisines`.
    pub cuisine: Option<String>,
    /// Exact match on `online_order` (usually "Yes" or "No").
    pub online_order: Option<String>,
}

impl FilterCriteria {
    /// Whether every dimension is the wildcard.
    pub fn is_unconstrained(&self) -> bool {
        self.location.is_none() && self.cuisine.is_none() && self.online_order.is_none()
    }

    /// Whether one listing passes all active constraints. A row with a
    /// missing value never matches an active constraint on that column.
    pub fn matches(&self, row: &Listing) -> bool {
        if let Some(want) = &self.location {
            match row.text(LOCATION) {
                Some(loc) if loc.as_ref() == want => {}
                _ => return false,
            }
        }
        if let Some(want) = &self.cuisine {
            let needle = want.to_lowercase();
            match row.text(CUISINES) {
                Some(cuisines) if cuisines.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }
        if let Some(want) = &self.online_order {
            match row.text(ONLINE_ORDER) {
                Some(flag) if flag.as_ref() == want => {}
                _ => return false,
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Filter application
// ---------------------------------------------------------------------------

/// Indices of rows that pass all active criteria, in table order. For
/// presentation layers that keep the full table in place and only need to
/// know which rows to draw.
pub fn matching_indices(table: &ListingTable, criteria: &FilterCriteria) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| criteria.matches(row))
        .map(|(i, _)| i)
        .collect()
}

/// Apply the criteria and derive the display statistics in one step.
///
/// Returns a fresh table holding only the matching rows (all-wildcard
/// criteria reproduce the input content in a new table) plus the summary
/// computed over exactly those rows. The input table is never mutated.
pub fn apply_filters(table: &ListingTable, criteria: &FilterCriteria) -> (ListingTable, Summary) {
    let rows: Vec<Listing> = table
        .rows
        .iter()
        .filter(|row| criteria.matches(row))
        .cloned()
        .collect();
    let filtered = ListingTable::new(table.columns.clone(), rows);
    let summary = Summary::of(&filtered);
    (filtered, summary)
}
