use std::collections::BTreeSet;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Gender, InducteeDataset, InducteeRecord, RecordError, parse_year};

const CATEGORY: &str = "category";
const CLASS_YEAR: &str = "class_year";
const GENDER: &str = "gender";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an inductee dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `category`, `class_year`, `gender` columns
/// * `.json`    – `[{ "category": ..., "class_year": ..., "gender": ... }, ...]`
/// * `.parquet` – the same three columns
pub fn load_file(path: &Path) -> Result<InducteeDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    if dataset.skipped_rows > 0 {
        log::warn!(
            "Skipped {} rows with an unrecognised gender in {}",
            dataset.skipped_rows,
            path.display()
        );
    }
    Ok(dataset)
}

/// Where a row came from, as reported in errors.
#[derive(Debug, Clone, Copy)]
enum RowRef {
    /// 1-based line in a text file (the header is line 1).
    Line(u64),
    /// 1-based record index.
    Row(usize),
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRef::Line(line) => write!(f, "Line {line}"),
            RowRef::Row(row) => write!(f, "Row {row}"),
        }
    }
}

/// Accumulates parsed rows. Rows with an unknown gender are counted and
/// dropped since they belong to no chart series; their category is still
/// listed.
#[derive(Default)]
struct RecordSink {
    records: Vec<InducteeRecord>,
    categories: Vec<String>,
    seen: BTreeSet<String>,
    skipped: usize,
}

impl RecordSink {
    fn push(
        &mut self,
        row: RowRef,
        category: &str,
        year: Result<i32, RecordError>,
        gender: &str,
    ) -> Result<()> {
        let class_year = year.with_context(|| format!("{row}: bad '{CLASS_YEAR}'"))?;
        if !self.seen.contains(category) {
            self.seen.insert(category.to_string());
            self.categories.push(category.to_string());
        }
        match gender.parse::<Gender>() {
            Ok(gender) => self
                .records
                .push(InducteeRecord::new(category, class_year, gender)),
            Err(e) => {
                log::debug!("{row}: {e}");
                self.skipped += 1;
            }
        }
        Ok(())
    }

    fn finish(self) -> InducteeDataset {
        InducteeDataset::with_categories(self.records, self.categories, self.skipped)
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<InducteeDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// CSV layout: header row with column names. Only `category`, `class_year`
/// and `gender` are read; any other columns are ignored.
pub fn read_csv<R: Read>(input: R) -> Result<InducteeDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let category_idx = column(CATEGORY)?;
    let year_idx = column(CLASS_YEAR)?;
    let gender_idx = column(GENDER)?;

    let mut sink = RecordSink::default();
    for (index, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV record {}", index + 1))?;
        // header is line 1, so the first record is line 2 when unquoted
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);
        sink.push(
            RowRef::Line(line),
            record.get(category_idx).unwrap_or(""),
            parse_year(record.get(year_idx).unwrap_or("")),
            record.get(gender_idx).unwrap_or(""),
        )?;
    }

    Ok(sink.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "category": "Performers", "class_year": 1986, "gender": "male" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<InducteeDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<InducteeDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut sink = RecordSink::default();
    for (index, row) in rows.iter().enumerate() {
        let i = index + 1;
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let category = obj
            .get(CATEGORY)
            .and_then(JsonValue::as_str)
            .with_context(|| format!("Row {i}: missing or invalid '{CATEGORY}'"))?;
        let year = match obj.get(CLASS_YEAR) {
            Some(JsonValue::Number(n)) => n
                .as_i64()
                .and_then(|y| i32::try_from(y).ok())
                .ok_or_else(|| RecordError::InvalidYear(n.to_string())),
            Some(JsonValue::String(s)) => parse_year(s),
            Some(other) => Err(RecordError::InvalidYear(other.to_string())),
            None => bail!("Row {i}: missing '{CLASS_YEAR}'"),
        };
        let gender = obj.get(GENDER).and_then(JsonValue::as_str).unwrap_or("");

        sink.push(RowRef::Row(i), category, year, gender)?;
    }

    Ok(sink.finish())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with `category` (utf8), `class_year` (int32, int64 or
/// utf8) and `gender` (utf8) columns. Works with files written by both
/// **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<InducteeDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut sink = RecordSink::default();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx))
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let category_col = column(CATEGORY)?;
        let year_col = column(CLASS_YEAR)?;
        let gender_col = column(GENDER)?;

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row + 1;
            let category = extract_string(category_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{CATEGORY}'"))?;
            let gender = extract_string(gender_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{GENDER}'"))?;
            let year = extract_year(year_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{CLASS_YEAR}'"))?;
            sink.push(RowRef::Row(row_no), &category, year, &gender)?;
        }
        row_offset += batch.num_rows();
    }

    Ok(sink.finish())
}

// -- Parquet / Arrow helpers --

/// Read a Utf8 or LargeUtf8 cell. Nulls read as the empty string.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

/// Read a class year from an integer or string column.
fn extract_year(col: &Arc<dyn Array>, row: usize) -> Result<Result<i32, RecordError>> {
    if col.is_null(row) {
        return Ok(Err(RecordError::InvalidYear("<null>".to_string())));
    }
    let year = match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row))
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            let v = arr.value(row);
            i32::try_from(v).map_err(|_| RecordError::InvalidYear(v.to_string()))
        }
        DataType::Utf8 | DataType::LargeUtf8 => parse_year(&extract_string(col, row)?),
        other => bail!("Expected an integer or string column, got {other:?}"),
    };
    Ok(year)
}
