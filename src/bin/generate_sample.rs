use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FIRST_CLASS: i32 = 1986;
const LAST_CLASS: i32 = 2024;

/// (category, inductees per class, share female, share mixed)
const CATEGORIES: [(&str, u32, f64, f64); 5] = [
    ("Performers", 6, 0.12, 0.25),
    ("Early Influences", 2, 0.25, 0.10),
    ("Non-Performers", 1, 0.10, 0.0),
    ("Musical Excellence", 2, 0.15, 0.20),
    ("Ahmet Ertegun Award", 1, 0.05, 0.0),
];

/// splitmix64; deterministic so the sample is stable between runs.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `0..=max`.
    fn upto(&mut self, max: u32) -> u32 {
        (self.unit() * f64::from(max + 1)) as u32
    }
}

struct Row {
    name: String,
    category: &'static str,
    class_year: i32,
    gender: &'static str,
}

fn generate(rng: &mut SampleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in FIRST_CLASS..=LAST_CLASS {
        for &(category, per_class, female, mixed) in &CATEGORIES {
            // Later classes induct slightly more women.
            let drift = f64::from(year - FIRST_CLASS) / f64::from(LAST_CLASS - FIRST_CLASS) * 0.1;
            let count = rng.upto(per_class);
            for _ in 0..count {
                let roll = rng.unit();
                let gender = if roll < female + drift {
                    "female"
                } else if roll < female + drift + mixed {
                    "mixed"
                } else {
                    "male"
                };
                rows.push(Row {
                    name: format!("Inductee {}", rows.len() + 1),
                    category,
                    class_year: year,
                    gender,
                });
            }
        }
    }
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["name", "category", "class_year", "gender"])?;
    for row in rows {
        writer.write_record([
            row.name.as_str(),
            row.category,
            &row.class_year.to_string(),
            row.gender,
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("class_year", DataType::Int32, false),
        Field::new("gender", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.name.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.category))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.class_year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.gender))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let rows = generate(&mut rng);

    write_csv("sample_inductees.csv", &rows)?;
    write_parquet("sample_inductees.parquet", &rows)?;

    println!(
        "Wrote {} inductees ({FIRST_CLASS}–{LAST_CLASS}) to sample_inductees.csv and sample_inductees.parquet",
        rows.len()
    );
    Ok(())
}
