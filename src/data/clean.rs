use thiserror::Error;

use super::model::columns::{COST_FOR_TWO, RATE};
use super::model::{Listing, ListingTable, Value};

// ---------------------------------------------------------------------------
// Column repair: "4.1/5" ratings and "1,200" costs into plain numbers
// ---------------------------------------------------------------------------

/// Textual ratings that mean "no rating yet", distinct from garbage but
/// treated the same way.
pub const RATE_SENTINELS: [&str; 3] = ["NEW", "-", "Not Rated"];

/// A column a consumer declared mandatory is absent from the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required column `{0}` is missing from the dataset")]
pub struct MissingColumn(pub String);

/// Check that every named column exists. [`normalize`] itself skips repairs
/// whose source column is absent; consumers that cannot display anything
/// without a rating column call this first and surface the error.
pub fn require_columns(table: &ListingTable, names: &[&str]) -> Result<(), MissingColumn> {
    for name in names {
        if !table.has_column(name) {
            return Err(MissingColumn((*name).to_string()));
        }
    }
    Ok(())
}

/// Produce a cleaned copy of the table. The input is left untouched.
///
/// * `rate`: strip the `/5` suffix, turn sentinel strings into missing,
///   parse the rest as floats, then replace every missing entry with the
///   mean of the parsed values. When nothing parsed at all the mean is
///   undefined and missing entries simply stay missing.
/// * `approx_cost(for two people)`: drop thousands-separator commas and
///   parse as floats. Unparseable entries become missing; no imputation.
/// * Every other column is copied through unchanged.
///
/// Either repair is skipped when its source column does not exist.
pub fn normalize(table: &ListingTable) -> ListingTable {
    let mut rows = table.rows.clone();
    if table.has_column(RATE) {
        normalize_rate(&mut rows);
    }
    if table.has_column(COST_FOR_TWO) {
        normalize_cost(&mut rows);
    }
    ListingTable::new(table.columns.clone(), rows)
}

fn normalize_rate(rows: &mut [Listing]) {
    // Parse first, then impute: the mean is computed once over the whole
    // column, not incrementally while filling.
    let parsed: Vec<Option<f64>> = rows.iter().map(|row| parse_rate(row.get(RATE))).collect();
    let mean = mean_of(parsed.iter().flatten().copied());

    for (row, value) in rows.iter_mut().zip(parsed) {
        let repaired = value.or(mean);
        row.fields.insert(
            RATE.to_string(),
            repaired.map(Value::Number).unwrap_or(Value::Null),
        );
    }
}

fn normalize_cost(rows: &mut [Listing]) {
    for row in rows.iter_mut() {
        let repaired = parse_cost(row.get(COST_FOR_TWO));
        row.fields.insert(
            COST_FOR_TWO.to_string(),
            repaired.map(Value::Number).unwrap_or(Value::Null),
        );
    }
}

/// One rating cell → parsed value, or `None` for anything unusable.
/// Already-numeric cells skip the text round-trip, which also makes the
/// repair idempotent.
fn parse_rate(cell: Option<&Value>) -> Option<f64> {
    let cell = cell?;
    if let Some(n) = cell.as_f64() {
        return finite(n);
    }
    match cell {
        Value::Null => None,
        other => {
            let text = other.to_string().replace("/5", "");
            let text = text.trim();
            if RATE_SENTINELS.contains(&text) {
                return None;
            }
            text.parse::<f64>().ok().and_then(finite)
        }
    }
}

/// One cost cell → parsed value. Removes every comma, not just the first,
/// so "1,00,000"-style grouping parses too.
fn parse_cost(cell: Option<&Value>) -> Option<f64> {
    let cell = cell?;
    if let Some(n) = cell.as_f64() {
        return finite(n);
    }
    match cell {
        Value::Null => None,
        other => {
            let text: String = other.to_string().chars().filter(|&c| c != ',').collect();
            text.trim().parse::<f64>().ok().and_then(finite)
        }
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn mean_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<(&str, Value)>>) -> ListingTable {
        let columns: Vec<String> = rows
            .first()
            .map(|r| r.iter().map(|(c, _)| c.to_string()).collect())
            .unwrap_or_default();
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(|(c, v)| (c.to_string(), v)).collect())
            .collect();
        ListingTable::new(columns, rows)
    }

    fn rate_cells(t: &ListingTable) -> Vec<Value> {
        t.rows.iter().map(|r| r.get(RATE).unwrap().clone()).collect()
    }

    #[test]
    fn missing_ratings_get_the_column_mean() {
        let raw = table(vec![
            vec![("rate", Value::Text("4.1/5".into()))],
            vec![("rate", Value::Text("NEW".into()))],
            vec![("rate", Value::Text("3.5/5".into()))],
        ]);
        let cleaned = normalize(&raw);
        assert_eq!(
            rate_cells(&cleaned),
            vec![
                Value::Number(4.1),
                Value::Number(3.8),
                Value::Number(3.5),
            ]
        );
    }

    #[test]
    fn every_sentinel_and_parse_failure_is_imputed() {
        let raw = table(vec![
            vec![("rate", Value::Text("-".into()))],
            vec![("rate", Value::Text("Not Rated".into()))],
            vec![("rate", Value::Text("4.0/5".into()))],
            vec![("rate", Value::Text("garbage".into()))],
            vec![("rate", Value::Null)],
            vec![("rate", Value::Text("2.0/5".into()))],
        ]);
        let cleaned = normalize(&raw);
        // Mean of 4.0 and 2.0; nothing left missing.
        assert_eq!(
            rate_cells(&cleaned),
            vec![
                Value::Number(3.0),
                Value::Number(3.0),
                Value::Number(4.0),
                Value::Number(3.0),
                Value::Number(3.0),
                Value::Number(2.0),
            ]
        );
    }

    #[test]
    fn all_unparseable_ratings_stay_missing() {
        let raw = table(vec![
            vec![("rate", Value::Text("NEW".into()))],
            vec![("rate", Value::Null)],
        ]);
        let cleaned = normalize(&raw);
        assert_eq!(rate_cells(&cleaned), vec![Value::Null, Value::Null]);
    }

    #[test]
    fn cost_commas_are_all_removed() {
        let raw = table(vec![
            vec![("approx_cost(for two people)", Value::Text("1,200".into()))],
            vec![("approx_cost(for two people)", Value::Text("1,00,000".into()))],
            vec![("approx_cost(for two people)", Value::Integer(800))],
            vec![("approx_cost(for two people)", Value::Text("abc".into()))],
            vec![("approx_cost(for two people)", Value::Null)],
        ]);
        let cleaned = normalize(&raw);
        let cells: Vec<Value> = cleaned
            .rows
            .iter()
            .map(|r| r.get(COST_FOR_TWO).unwrap().clone())
            .collect();
        // No imputation on cost: failures stay missing.
        assert_eq!(
            cells,
            vec![
                Value::Number(1200.0),
                Value::Number(100_000.0),
                Value::Number(800.0),
                Value::Null,
                Value::Null,
            ]
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = table(vec![
            vec![
                ("rate", Value::Text("4.1/5".into())),
                ("approx_cost(for two people)", Value::Text("1,200".into())),
            ],
            vec![
                ("rate", Value::Text("NEW".into())),
                ("approx_cost(for two people)", Value::Null),
            ],
            vec![
                ("rate", Value::Text("3.5/5".into())),
                ("approx_cost(for two people)", Value::Text("600".into())),
            ],
        ]);
        let once = normalize(&raw);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn input_table_is_not_mutated() {
        let raw = table(vec![vec![("rate", Value::Text("4.1/5".into()))]]);
        let before = raw.clone();
        let _ = normalize(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn absent_columns_skip_their_repair() {
        let raw = table(vec![
            vec![("name", Value::Text("Jalsa".into())), ("votes", Value::Integer(775))],
            vec![("name", Value::Text("Onesta".into())), ("votes", Value::Null)],
        ]);
        let cleaned = normalize(&raw);
        // No rate or cost column: the table passes through unchanged.
        assert_eq!(cleaned, raw);
    }

    #[test]
    fn other_columns_pass_through_unchanged() {
        let raw = table(vec![vec![
            ("name", Value::Text("Caf\u{e9} Thulp".into())),
            ("rate", Value::Text("4.0/5".into())),
            ("votes", Value::Integer(900)),
        ]]);
        let cleaned = normalize(&raw);
        assert_eq!(cleaned.rows[0].get("name"), raw.rows[0].get("name"));
        assert_eq!(cleaned.rows[0].get("votes"), raw.rows[0].get("votes"));
        assert_eq!(cleaned.rows[0].get(RATE), Some(&Value::Number(4.0)));
    }

    #[test]
    fn required_columns_are_enforced() {
        let raw = table(vec![vec![("name", Value::Text("Jalsa".into()))]]);
        assert_eq!(require_columns(&raw, &["name"]), Ok(()));
        assert_eq!(
            require_columns(&raw, &["name", RATE]),
            Err(MissingColumn(RATE.to_string()))
        );
    }
}
