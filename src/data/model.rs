use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Well-known column names of the restaurant listings dataset
// ---------------------------------------------------------------------------

/// Column names the cleaning and filtering stages care about. Any other
/// column rides along untouched.
pub mod columns {
    pub const NAME: &str = "name";
    pub const LOCATION: &str = "location";
    pub const CUISINES: &str = "cuisines";
    pub const ONLINE_ORDER: &str = "online_order";
    pub const RATE: &str = "rate";
    pub const COST_FOR_TWO: &str = "approx_cost(for two people)";
    pub const VOTES: &str = "votes";
}

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. `Null` marks a missing entry; an absent
/// key in a row means the same thing.
/// Using `BTreeMap` / `BTreeSet` downstream so `Value` must be `Ord`.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet. Floats compare by
// `total_cmp`, and equality follows the same order so set and map lookups
// stay consistent even for NaN. --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Number(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Number(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Number(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Textual view of the cell. `None` for missing entries.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Text(s) => Some(Cow::Borrowed(s)),
            Value::Integer(i) => Some(Cow::Owned(i.to_string())),
            Value::Number(v) => Some(Cow::Owned(v.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Null => None,
        }
    }

    /// Whether the cell counts as missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the table
// ---------------------------------------------------------------------------

/// A single restaurant listing (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Dynamic columns: column_name → value.
    pub fields: BTreeMap<String, Value>,
}

impl Listing {
    /// Raw cell lookup.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Textual form of a cell, `None` when missing. An absent key and a
    /// stored `Null` are both missing.
    pub fn text(&self, column: &str) -> Option<Cow<'_, str>> {
        self.fields.get(column).and_then(Value::as_text)
    }

    /// Finite numeric form of a cell, `None` when missing or non-numeric.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.fields
            .get(column)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }
}

impl FromIterator<(String, Value)> for Listing {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Listing {
            fields: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed column indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingTable {
    /// All listings (rows).
    pub rows: Vec<Listing>,
    /// Column names in first-encountered order (header order for CSV).
    pub columns: Vec<String>,
    /// For each column the sorted set of values seen in the table.
    pub unique_values: BTreeMap<String, BTreeSet<Value>>,
}

impl ListingTable {
    /// Build the table and its column indices. Columns found only in rows
    /// are appended after the declared ones, in first-encountered order.
    pub fn new(mut columns: Vec<String>, rows: Vec<Listing>) -> Self {
        let mut seen: BTreeSet<String> = columns.iter().cloned().collect();
        let mut unique_values: BTreeMap<String, BTreeSet<Value>> = BTreeMap::new();

        for row in &rows {
            for (col, val) in &row.fields {
                if seen.insert(col.clone()) {
                    columns.push(col.clone());
                }
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        ListingTable {
            rows,
            columns,
            unique_values,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a column of this name exists anywhere in the table.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Non-null unique values of one column in textual form, set order.
    /// Used to populate choice widgets.
    pub fn unique_texts(&self, column: &str) -> Vec<String> {
        self.unique_values
            .get(column)
            .map(|vals| {
                vals.iter()
                    .filter_map(|v| v.as_text().map(Cow::into_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_order_and_dedup_in_sets() {
        let mut set = BTreeSet::new();
        set.insert(Value::Text("BTM".into()));
        set.insert(Value::Text("BTM".into()));
        set.insert(Value::Text("Indiranagar".into()));
        set.insert(Value::Null);
        assert_eq!(set.len(), 3);
        // Null sorts before any concrete value.
        assert_eq!(set.iter().next(), Some(&Value::Null));
    }

    #[test]
    fn number_equality_is_total() {
        assert_eq!(Value::Number(1200.0), Value::Number(1200.0));
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_ne!(Value::Number(800.0), Value::Integer(800));
    }

    #[test]
    fn listing_accessors_treat_null_as_missing() {
        let row: Listing = [
            ("name".to_string(), Value::Text("Onesta".into())),
            ("votes".to_string(), Value::Integer(2556)),
            ("location".to_string(), Value::Null),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.text("name").as_deref(), Some("Onesta"));
        assert_eq!(row.number("votes"), Some(2556.0));
        assert_eq!(row.text("location"), None);
        assert_eq!(row.text("cuisines"), None);
    }

    #[test]
    fn table_collects_columns_and_unique_values() {
        let rows = vec![
            [("city".to_string(), Value::Text("BTM".into()))]
                .into_iter()
                .collect::<Listing>(),
            [
                ("city".to_string(), Value::Text("HSR".into())),
                ("extra".to_string(), Value::Integer(1)),
            ]
            .into_iter()
            .collect::<Listing>(),
        ];
        let table = ListingTable::new(vec!["city".into()], rows);

        assert_eq!(table.columns, vec!["city".to_string(), "extra".to_string()]);
        assert_eq!(table.unique_texts("city"), vec!["BTM", "HSR"]);
        assert!(table.has_column("extra"));
        assert!(!table.has_column("rate"));
        assert_eq!(table.len(), 2);
    }
}
