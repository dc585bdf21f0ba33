use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field as ArrowField, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;

use super::model::{Catalog, MetadataValue, StarRecord};
use super::schema::Field;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Numeric columns in export order, after `star_id`.
const NUMERIC_COLUMNS: [(&str, fn(&StarRecord) -> Option<f64>); 7] = [
    ("effective_temperature", |r| r.effective_temperature),
    ("surface_gravity_log", |r| r.surface_gravity_log),
    ("stellar_radius", |r| r.stellar_radius),
    ("kepler_magnitude", |r| r.kepler_magnitude),
    ("orbital_period", |r| r.orbital_period),
    ("estimated_mass", |r| r.estimated_mass),
    ("estimated_lifespan", |r| r.estimated_lifespan),
];

/// Write a catalog to a file.  Dispatch by extension, mirroring
/// [`load_file`](super::loader::load_file).
///
/// Column order: `star_id`, the measured fields, the derived fields,
/// `category`, then passthrough columns.
pub fn write_file(catalog: &Catalog, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => write_delimited(catalog, path, b',')?,
        "tsv" => write_delimited(catalog, path, b'\t')?,
        "json" => write_json(catalog, path)?,
        "parquet" | "pq" => write_parquet(catalog, path)?,
        other => bail!("Unsupported file extension: .{other}"),
    }
    info!("wrote {} records to {}", catalog.len(), path.display());
    Ok(())
}

fn header(catalog: &Catalog) -> Vec<String> {
    std::iter::once(Field::StarId.canonical())
        .chain(NUMERIC_COLUMNS.iter().map(|(name, _)| *name))
        .chain(std::iter::once("category"))
        .map(str::to_string)
        .chain(catalog.extra_columns.iter().cloned())
        .collect()
}

fn category_label(record: &StarRecord) -> Option<&'static str> {
    record.category.map(|c| c.label())
}

// ---------------------------------------------------------------------------
// Delimited text
// ---------------------------------------------------------------------------

fn write_delimited(catalog: &Catalog, path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .context("creating delimited file")?;
    writer
        .write_record(header(catalog))
        .context("writing header")?;

    for record in &catalog.records {
        let mut cells: Vec<String> = Vec::with_capacity(9 + catalog.extra_columns.len());
        cells.push(record.star_id.clone());
        for (_, get) in NUMERIC_COLUMNS {
            cells.push(get(record).map(|v| v.to_string()).unwrap_or_default());
        }
        cells.push(category_label(record).unwrap_or_default().to_string());
        for col in &catalog.extra_columns {
            cells.push(record.extra.get(col).map(|v| v.to_string()).unwrap_or_default());
        }
        writer
            .write_record(&cells)
            .with_context(|| format!("writing record {}", record.star_id))?;
    }
    writer.flush().context("flushing delimited file")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented array; missing values are `null`.
fn write_json(catalog: &Catalog, path: &Path) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(BufWriter::new(file), &catalog.records)
        .context("writing JSON")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Numeric fields as nullable Float64, everything else as nullable Utf8.
fn write_parquet(catalog: &Catalog, path: &Path) -> Result<()> {
    let records = &catalog.records;

    let mut fields = vec![ArrowField::new(Field::StarId.canonical(), DataType::Utf8, false)];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from(
        records.iter().map(|r| r.star_id.as_str()).collect::<Vec<_>>(),
    ))];

    for (name, get) in NUMERIC_COLUMNS {
        fields.push(ArrowField::new(name, DataType::Float64, true));
        columns.push(Arc::new(Float64Array::from(
            records.iter().map(get).collect::<Vec<Option<f64>>>(),
        )));
    }

    fields.push(ArrowField::new("category", DataType::Utf8, true));
    columns.push(Arc::new(StringArray::from(
        records.iter().map(category_label).collect::<Vec<_>>(),
    )));

    for col in &catalog.extra_columns {
        fields.push(ArrowField::new(col.as_str(), DataType::Utf8, true));
        let values: Vec<Option<String>> = records
            .iter()
            .map(|r| match r.extra.get(col) {
                None | Some(MetadataValue::Null) => None,
                Some(v) => Some(v.to_string()),
            })
            .collect();
        columns.push(Arc::new(StringArray::from(values)));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
