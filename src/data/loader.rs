use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Listing, ListingTable, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a restaurant listings table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-separated text with a header row (the native format
///   of the dataset; tolerates Latin-1 bytes, see [`load_csv_reader`])
/// * `.json`    – `[{ "name": ..., "rate": ..., ...columns }, ...]`
/// * `.parquet` – flat scalar columns (strings, ints, floats, bools)
pub fn load_file(path: &Path) -> Result<ListingTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ListingTable> {
    let file = std::fs::File::open(path).context("opening CSV file")?;
    load_csv_reader(file)
}

/// Read a CSV table from any byte stream.
///
/// The source dataset is exported in a Western European encoding, so cells
/// are decoded one at a time: valid UTF-8 is kept as-is and anything else is
/// recovered byte-for-byte as Latin-1. Decoding therefore never fails; only
/// a structurally broken file (ragged quoting, unreadable stream) aborts
/// the load.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<ListingTable> {
    let mut reader = csv::Reader::from_reader(reader);

    let columns: Vec<String> = reader
        .byte_headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| decode_cell(h).trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut fields = BTreeMap::new();
        for (col_idx, raw) in record.iter().enumerate() {
            let Some(column) = columns.get(col_idx) else {
                continue;
            };
            fields.insert(column.clone(), sniff_value(&decode_cell(raw)));
        }
        rows.push(Listing { fields });
    }

    Ok(ListingTable::new(columns, rows))
}

/// Decode one raw CSV cell: UTF-8 when valid, Latin-1 otherwise.
fn decode_cell(raw: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(raw) {
        Ok(s) => Cow::Borrowed(s),
        // Latin-1 maps every byte to the code point of the same value.
        Err(_) => Cow::Owned(raw.iter().map(|&b| b as char).collect()),
    }
}

/// Guess the type of a textual cell. Empty cells are missing; integers are
/// kept apart from floats so vote counts stay exact. NaN and infinities
/// never enter a table from here.
fn sniff_value(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() {
            return Value::Number(f);
        }
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "name": "Jalsa",
///     "location": "Banashankari",
///     "rate": "4.1/5",
///     "approx_cost(for two people)": "800"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ListingTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
            fields.insert(key.clone(), json_to_value(val));
        }
        rows.push(Listing { fields });
    }

    Ok(ListingTable::new(columns, rows))
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Number(f)
            } else {
                Value::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing a listings table.
///
/// Every column must be a flat scalar (Utf8, Int, Float, Bool); there are no
/// nested columns in this dataset. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<ListingTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if columns.is_empty() {
            columns = schema.fields().iter().map(|f| f.name().clone()).collect();
        }

        for row in 0..batch.num_rows() {
            let mut fields = BTreeMap::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_value(batch.column(col_idx), row)
                    .with_context(|| format!("Row {row}: failed to read '{}'", field.name()))?;
                fields.insert(field.name().clone(), value);
            }
            rows.push(Listing { fields });
        }
    }

    Ok(ListingTable::new(columns, rows))
}

/// Extract a single scalar value from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Result<Value> {
    if col.is_null(row) {
        return Ok(Value::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                Value::Text(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                Value::Text(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Value::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Value::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Value::Number(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Value::Number(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("expected BooleanArray")?;
            Value::Bool(arr.value(row))
        }
        other => bail!("Unsupported parquet column type {other:?}"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::columns;

    #[test]
    fn sniffing_keeps_dirty_columns_textual() {
        assert_eq!(sniff_value(""), Value::Null);
        assert_eq!(sniff_value("775"), Value::Integer(775));
        assert_eq!(sniff_value("4.1"), Value::Number(4.1));
        assert_eq!(sniff_value("4.1/5"), Value::Text("4.1/5".into()));
        assert_eq!(sniff_value("1,200"), Value::Text("1,200".into()));
        assert_eq!(sniff_value("Yes"), Value::Text("Yes".into()));
        // Textual NaN must not turn into a float cell.
        assert_eq!(sniff_value("NaN"), Value::Text("NaN".into()));
    }

    #[test]
    fn decode_recovers_latin1_bytes() {
        assert_eq!(decode_cell(b"Jalsa"), "Jalsa");
        // "Café" with a Latin-1 0xE9.
        assert_eq!(decode_cell(b"Caf\xe9"), "Caf\u{e9}");
    }

    #[test]
    fn csv_reader_types_cells_and_keeps_header_order() {
        let data = b"name,online_order,rate,votes,location,cuisines,approx_cost(for two people)\n\
            Jalsa,Yes,4.1/5,775,Banashankari,\"North Indian, Chinese\",800\n\
            Caf\xe9 Thulp,No,NEW,,BTM,Burger,\"1,200\"\n";
        let table = load_csv_reader(&data[..]).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.columns,
            vec![
                "name",
                "online_order",
                "rate",
                "votes",
                "location",
                "cuisines",
                "approx_cost(for two people)",
            ]
        );
        assert_eq!(
            table.rows[0].get(columns::VOTES),
            Some(&Value::Integer(775))
        );
        assert_eq!(
            table.rows[0].get(columns::COST_FOR_TWO),
            Some(&Value::Integer(800))
        );
        assert_eq!(
            table.rows[1].text(columns::NAME).as_deref(),
            Some("Caf\u{e9} Thulp")
        );
        assert_eq!(table.rows[1].get(columns::VOTES), Some(&Value::Null));
        assert_eq!(
            table.rows[1].get(columns::COST_FOR_TWO),
            Some(&Value::Text("1,200".into()))
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("listings.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
