use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use log::{debug, info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::RowRejection;
use super::model::{Catalog, MetadataValue, RawRow};
use super::schema::ColumnSchema;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Result of reading a catalog file: the parsed rows and the rows dropped.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub rejected: Vec<RowRejection>,
}

/// Load a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma-separated, header row, `#` comment lines skipped
/// * `.tsv`          – tab-separated, otherwise as CSV
/// * `.json`         – `[{ "kepid": 10797460, "koi_steff": 5455, ... }, ...]`
/// * `.parquet`      – flat table with one column per field
///
/// A missing required column fails with a [`SchemaError`](super::error::SchemaError)
/// (reachable through `downcast_ref`). Rows that cannot be lifted into a
/// record are dropped and listed in [`LoadedCatalog::rejected`].
pub fn load_file(path: &Path) -> Result<LoadedCatalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (headers, rows) = match ext.as_str() {
        "csv" | "txt" => read_delimited(path, b',')?,
        "tsv" => read_delimited(path, b'\t')?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    debug!("{}: {} columns, {} rows", path.display(), headers.len(), rows.len());

    let loaded = build_catalog(&headers, rows)?;
    info!(
        "loaded {} records from {} ({} rejected)",
        loaded.catalog.len(),
        path.display(),
        loaded.rejected.len()
    );
    Ok(loaded)
}

/// Resolve the schema and lift every row, dropping the ones that fail.
pub fn build_catalog(headers: &[String], rows: Vec<RawRow>) -> Result<LoadedCatalog> {
    let schema = ColumnSchema::resolve(headers)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();
    for (row_no, row) in rows.into_iter().enumerate() {
        match schema.record_from_row(row) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!("dropping row {row_no}: {error}");
                rejected.push(RowRejection { row: row_no, error });
            }
        }
    }

    let catalog = Catalog {
        records,
        extra_columns: schema.passthrough.clone(),
    };
    Ok(LoadedCatalog { catalog, rejected })
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line.  Every cell is typed
/// by [`guess_metadata_type`]; the schema decides later which cells must be
/// numeric.
fn read_delimited(path: &Path, delimiter: u8) -> Result<(Vec<String>, Vec<RawRow>)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .context("opening delimited file")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("row {row_no}"))?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(col_idx, name)| {
                let value = guess_metadata_type(record.get(col_idx).unwrap_or(""));
                (name.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok((headers, rows))
}

fn guess_metadata_type(s: &str) -> MetadataValue {
    if s.is_empty() {
        return MetadataValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return MetadataValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return if f.is_nan() {
            MetadataValue::Null
        } else {
            MetadataValue::Float(f)
        };
    }
    if s == "true" || s == "false" {
        return MetadataValue::Bool(s == "true");
    }
    MetadataValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "kepid": 10797460, "koi_steff": 5455, "koi_slogg": 4.467, "koi_srad": 0.927 },
///   ...
/// ]
/// ```
///
/// The header is the union of keys: each object's keys in sorted order
/// (`serde_json::Map` is a `BTreeMap`), new keys appended as later rows
/// introduce them.
fn read_json(path: &Path) -> Result<(Vec<String>, Vec<RawRow>)> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = RawRow::new();
        for (key, val) in obj {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
            row.insert(key.clone(), json_to_metadata(val));
        }
        rows.push(row);
    }

    Ok((headers, rows))
}

fn json_to_metadata(val: &JsonValue) -> MetadataValue {
    match val {
        JsonValue::String(s) => MetadataValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                MetadataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                MetadataValue::Float(f)
            } else {
                MetadataValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => MetadataValue::Bool(*b),
        JsonValue::Null => MetadataValue::Null,
        other => MetadataValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Flat Parquet table, one scalar column per field.  Works with files written
/// by both **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<(Vec<String>, Vec<RawRow>)> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let raw: RawRow = headers
                .iter()
                .zip(batch.columns())
                .map(|(name, col)| (name.clone(), extract_metadata_value(col, row)))
                .collect();
            rows.push(raw);
        }
    }

    Ok((headers, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_metadata_value(col: &ArrayRef, row: usize) -> MetadataValue {
    if col.is_null(row) {
        return MetadataValue::Null;
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| MetadataValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map(|a| MetadataValue::String(a.value(row).to_string())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| MetadataValue::Integer(i64::from(a.value(row)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| MetadataValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| MetadataValue::Float(f64::from(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| MetadataValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| MetadataValue::Bool(a.value(row))),
        _ => None,
    };
    value.unwrap_or_else(|| MetadataValue::String(format!("{:?}", col.data_type())))
}
