use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Value-level parse errors
// ---------------------------------------------------------------------------

/// Errors raised while interpreting a single cell of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("unknown gender '{0}' (expected male, female or mixed)")]
    UnknownGender(String),
    #[error("'{0}' is not a valid class year")]
    InvalidYear(String),
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Gender of an inductee as recorded in the dataset.
///
/// `Mixed` covers group inductions with members of more than one gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    Male,
    Female,
    Mixed,
}

impl Gender {
    /// All genders in legend order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Mixed];

    /// Lowercase key as it appears in the data file.
    pub fn key(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Mixed => "mixed",
        }
    }

    /// Capitalised label for legends and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Gender::ALL
            .into_iter()
            .find(|g| g.key() == key)
            .ok_or_else(|| RecordError::UnknownGender(s.to_string()))
    }
}

/// Parse a class year cell. Accepts surrounding whitespace and a trailing
/// `.0` as written by spreadsheet exports.
pub fn parse_year(s: &str) -> Result<i32, RecordError> {
    let trimmed = s.trim();
    let digits = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    digits
        .parse::<i32>()
        .map_err(|_| RecordError::InvalidYear(s.to_string()))
}

// ---------------------------------------------------------------------------
// InducteeRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single honoree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InducteeRecord {
    pub category: String,
    pub class_year: i32,
    pub gender: Gender,
}

impl InducteeRecord {
    pub fn new(category: impl Into<String>, class_year: i32, gender: Gender) -> Self {
        Self {
            category: category.into(),
            class_year,
            gender,
        }
    }
}

// ---------------------------------------------------------------------------
// InducteeDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Never mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct InducteeDataset {
    /// All records (rows).
    pub records: Vec<InducteeRecord>,
    /// Distinct categories in the order they first appear in the file.
    pub categories: Vec<String>,
    /// Rows dropped by the loader because their gender was unrecognised.
    pub skipped_rows: usize,
}

impl InducteeDataset {
    /// Build the category index from the loaded records.
    pub fn from_records(records: Vec<InducteeRecord>, skipped_rows: usize) -> Self {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut categories = Vec::new();
        for rec in &records {
            if seen.insert(rec.category.as_str()) {
                categories.push(rec.category.clone());
            }
        }
        Self::with_categories(records, categories, skipped_rows)
    }

    /// Use a category list gathered from every raw row, including rows the
    /// loader skipped, so no category drops out of the selector.
    pub fn with_categories(
        records: Vec<InducteeRecord>,
        categories: Vec<String>,
        skipped_rows: usize,
    ) -> Self {
        InducteeDataset {
            records,
            categories,
            skipped_rows,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
