use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use log::{debug, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{SpectralTable, TableColumn};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a wavelength table from a file.  Dispatch by extension.
///
/// In every format the first column is the wavelength and the remaining
/// columns are numeric values. Missing cells become NaN.
///
/// Supported formats:
/// * `.csv`     – rows of numbers, optionally preceded by a header row
/// * `.json`    – `[[380, 0.0002, ...], ...]` or `{ "columns": [...], "rows": [[...]] }`
/// * `.parquet` – one numeric column per quantity, wavelength first
pub fn load_file(path: &Path) -> Result<SpectralTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    debug!(
        "{}: {} rows, columns {:?}",
        path.display(),
        table.len(),
        table.column_names()
    );
    Ok(table)
}

/// Turn parsed rows into columns. Short rows are padded with NaN.
fn assemble(header: Option<Vec<String>>, rows: Vec<Vec<f64>>) -> Result<SpectralTable> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let n_values = width - 1;

    let names: Vec<String> = (0..n_values)
        .map(|i| {
            header
                .as_ref()
                .and_then(|h| h.get(i + 1))
                .filter(|name| !name.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("col{}", i + 1))
        })
        .collect();

    let mut wavelengths = Vec::with_capacity(rows.len());
    let mut columns: Vec<TableColumn> = names
        .into_iter()
        .map(|name| TableColumn {
            name,
            values: Vec::with_capacity(rows.len()),
        })
        .collect();

    let mut padded = 0;
    for (row_no, row) in rows.iter().enumerate() {
        let wavelength = row.first().copied().unwrap_or(f64::NAN);
        if wavelength.is_nan() {
            bail!("Row {row_no}: missing wavelength");
        }
        if row.len() < width {
            padded += 1;
        }
        wavelengths.push(wavelength);
        for (i, column) in columns.iter_mut().enumerate() {
            column.values.push(row.get(i + 1).copied().unwrap_or(f64::NAN));
        }
    }
    if padded > 0 {
        warn!("{padded} short rows padded with NaN");
    }

    Ok(SpectralTable {
        wavelengths,
        columns,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: one row per wavelength, `wavelength,value,value,...`.
/// If the first field of the first row is not a number, that row is taken as
/// the column names.
fn load_csv(path: &Path) -> Result<SpectralTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let mut header = None;
    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        if row_no == 0 && record.get(0).is_some_and(|f| f.parse::<f64>().is_err()) {
            header = Some(record.iter().map(str::to_string).collect());
            continue;
        }

        let row = record
            .iter()
            .enumerate()
            .map(|(j, field)| {
                parse_cell(field).with_context(|| format!("CSV row {row_no}, column {j}"))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    assemble(header, rows)
}

fn parse_cell(s: &str) -> Result<f64> {
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("'{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema, either bare rows:
///
/// ```json
/// [[380, 0.0002], [385, 0.0004], ...]
/// ```
///
/// or rows with column names:
///
/// ```json
/// { "columns": ["wavelength", "V"], "rows": [[380, 0.0002], ...] }
/// ```
///
/// `null` cells become NaN.
fn load_json(path: &Path) -> Result<SpectralTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let (header, rows_json) = match &root {
        JsonValue::Array(rows) => (None, rows),
        JsonValue::Object(obj) => {
            let header = obj
                .get("columns")
                .and_then(|c| c.as_array())
                .map(|names| {
                    names
                        .iter()
                        .map(|n| n.as_str().unwrap_or_default().to_string())
                        .collect::<Vec<String>>()
                });
            let rows = obj
                .get("rows")
                .and_then(|r| r.as_array())
                .context("Expected a 'rows' array")?;
            (header, rows)
        }
        _ => bail!("Expected top-level JSON array or object"),
    };

    let rows = rows_json
        .iter()
        .enumerate()
        .map(|(i, row)| json_row_to_f64(row, i))
        .collect::<Result<Vec<_>>>()?;

    assemble(header, rows)
}

fn json_row_to_f64(row: &JsonValue, i: usize) -> Result<Vec<f64>> {
    let arr = row
        .as_array()
        .with_context(|| format!("Row {i} is not a JSON array"))?;

    arr.iter()
        .enumerate()
        .map(|(j, v)| match v {
            JsonValue::Null => Ok(f64::NAN),
            other => other
                .as_f64()
                .with_context(|| format!("Row {i}[{j}]: not a number")),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding a wavelength table.
///
/// Expected schema:
/// - first column: wavelength (Float64, Float32, Int64 or Int32)
/// - every further numeric column becomes a value column under its field name
/// - non-numeric columns are skipped with a warning
fn load_parquet(path: &Path) -> Result<SpectralTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        if batch.num_columns() == 0 {
            bail!("Parquet file has no columns");
        }

        // Numeric columns in schema order; the wavelength must be one of them.
        let mut names = Vec::new();
        let mut columns = Vec::new();
        for (i, field) in schema.fields().iter().enumerate() {
            match extract_f64_column(batch.column(i)) {
                Some(values) => {
                    names.push(field.name().clone());
                    columns.push(values);
                }
                None if i == 0 => bail!(
                    "Wavelength column '{}' has non-numeric type {:?}",
                    field.name(),
                    field.data_type()
                ),
                None => warn!(
                    "skipping non-numeric column '{}' ({:?})",
                    field.name(),
                    field.data_type()
                ),
            }
        }

        for row in 0..batch.num_rows() {
            rows.push(columns.iter().map(|c| c[row]).collect());
        }
        if header.is_none() {
            header = Some(names);
        }
    }

    assemble(header, rows)
}

// -- Parquet / Arrow helpers --

/// All values of a numeric column as `f64`, nulls as NaN. `None` for other types.
fn extract_f64_column(col: &Arc<dyn Array>) -> Option<Vec<f64>> {
    let values = match col.data_type() {
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>()?;
            arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>()?;
            arr.iter().map(|v| v.map_or(f64::NAN, f64::from)).collect()
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>()?;
            arr.iter().map(|v| v.map_or(f64::NAN, |i| i as f64)).collect()
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>()?;
            arr.iter().map(|v| v.map_or(f64::NAN, f64::from)).collect()
        }
        _ => return None,
    };
    Some(values)
}
