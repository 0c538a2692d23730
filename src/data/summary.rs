use std::collections::HashMap;

use serde::Serialize;

use super::model::columns::{COST_FOR_TWO, CUISINES, LOCATION, NAME, ONLINE_ORDER, RATE};
use super::model::{Listing, ListingTable};

/// How many entries a frequency table keeps.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Summary – the display statistics bundle
// ---------------------------------------------------------------------------

/// One entry of a top-N frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// Descriptive statistics over a (usually filtered) table. Every field is
/// well-defined for an empty table: counts are zero, means are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of rows summarized.
    pub rows: usize,
    /// Mean rating, rounded to 2 decimals. `None` without numeric ratings.
    pub mean_rate: Option<f64>,
    /// Mean cost for two, rounded to the nearest rupee. `None` when every
    /// cost is missing.
    pub mean_cost: Option<i64>,
    /// Share of "Yes" among rows with a known `online_order`, in percent.
    /// 0 when the column is absent or entirely missing.
    pub online_pct: f64,
    pub top_cuisines: Vec<FrequencyEntry>,
    pub top_locations: Vec<FrequencyEntry>,
    pub top_names: Vec<FrequencyEntry>,
}

impl Summary {
    /// Summarize a whole table.
    pub fn of(table: &ListingTable) -> Summary {
        Self::of_rows(table.rows.iter())
    }

    /// Summarize any row selection, e.g. the rows behind a set of filter
    /// indices. Order of the iterator decides frequency tie-breaks.
    pub fn of_rows<'a, I>(rows: I) -> Summary
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        let rows: Vec<&Listing> = rows.into_iter().collect();

        let mut yes = 0usize;
        let mut online_known = 0usize;
        for row in &rows {
            if let Some(flag) = row.text(ONLINE_ORDER) {
                online_known += 1;
                if flag.as_ref() == "Yes" {
                    yes += 1;
                }
            }
        }
        let online_pct = if online_known == 0 {
            0.0
        } else {
            yes as f64 * 100.0 / online_known as f64
        };

        Summary {
            rows: rows.len(),
            mean_rate: column_mean(&rows, RATE).map(round2),
            mean_cost: column_mean(&rows, COST_FOR_TWO).map(|m| m.round() as i64),
            online_pct,
            top_cuisines: top_frequencies(&rows, CUISINES, TOP_N),
            top_locations: top_frequencies(&rows, LOCATION, TOP_N),
            top_names: top_frequencies(&rows, NAME, TOP_N),
        }
    }
}

// ---------------------------------------------------------------------------
// Column statistics
// ---------------------------------------------------------------------------

fn column_mean(rows: &[&Listing], column: &str) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in rows {
        if let Some(v) = row.number(column) {
            sum += v;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Count the textual values of one column and keep the `limit` most common.
/// Sorted by descending count; equal counts keep first-appearance order, so
/// the result never depends on hash-map iteration order. Missing cells are
/// not counted.
fn top_frequencies(rows: &[&Listing], column: &str, limit: usize) -> Vec<FrequencyEntry> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (idx, row) in rows.iter().enumerate() {
        let Some(text) = row.text(column) else {
            continue;
        };
        let entry = counts.entry(text.into_owned()).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.truncate(limit);
    ranked
        .into_iter()
        .map(|(value, (count, _))| FrequencyEntry { value, count })
        .collect()
}
