use std::fmt;

use super::model::InducteeRecord;

// ---------------------------------------------------------------------------
// Category filter: which inductees feed the chart
// ---------------------------------------------------------------------------

/// Category selection for the chart.
///
/// `All` means no filter, `Only` keeps records whose category is exactly
/// equal to the given name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Interpret a selection string. `"all"` (any case) is the no-filter
    /// sentinel used by older dropdowns.
    #[allow(dead_code)]
    pub fn from_selection(selection: &str) -> Self {
        if selection.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(selection.to_string())
        }
    }

    pub fn matches(&self, record: &InducteeRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => record.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Iterate the records passing `filter`, in file order.
pub fn filter_records<'a>(
    records: &'a [InducteeRecord],
    filter: &'a CategoryFilter,
) -> impl Iterator<Item = &'a InducteeRecord> + 'a {
    records.iter().filter(move |rec| filter.matches(rec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Gender;

    fn records() -> Vec<InducteeRecord> {
        vec![
            InducteeRecord::new("Performers", 1986, Gender::Male),
            InducteeRecord::new("Non-Performers", 1986, Gender::Female),
            InducteeRecord::new("Performers", 1990, Gender::Mixed),
        ]
    }

    #[test]
    fn test_from_selection_accepts_all_sentinel() {
        assert_eq!(CategoryFilter::from_selection("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_selection("All"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_selection("Performers"),
            CategoryFilter::Only("Performers".to_string())
        );
    }

    #[test]
    fn test_filter_records_by_category() {
        let recs = records();
        let filter = CategoryFilter::Only("Performers".to_string());
        let years: Vec<i32> = filter_records(&recs, &filter).map(|r| r.class_year).collect();
        assert_eq!(years, vec![1986, 1990]);
    }

    #[test]
    fn test_all_keeps_everything() {
        let recs = records();
        assert_eq!(filter_records(&recs, &CategoryFilter::All).count(), 3);
    }

    #[test]
    fn test_category_match_is_exact() {
        let recs = records();
        let filter = CategoryFilter::Only("performers".to_string());
        assert_eq!(filter_records(&recs, &filter).count(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(CategoryFilter::All.to_string(), "All");
        assert_eq!(
            CategoryFilter::Only("Early Influences".into()).to_string(),
            "Early Influences"
        );
    }
}
