use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::{CategoryFilter, filter_records};
use super::model::{Gender, InducteeRecord};

// ---------------------------------------------------------------------------
// Per-year gender counts
// ---------------------------------------------------------------------------

/// Gender counts for one induction year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearAggregate {
    pub year: i32,
    pub male: u32,
    pub female: u32,
    pub mixed: u32,
}

impl YearAggregate {
    pub fn count(&self, gender: Gender) -> u32 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Mixed => self.mixed,
        }
    }

    fn add(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
            Gender::Mixed => self.mixed += 1,
        }
    }
}

/// Group the records passing `filter` by class year and count genders.
///
/// Returns one entry per distinct year in ascending order. Genders absent
/// from a year are reported as 0.
pub fn aggregate(records: &[InducteeRecord], filter: &CategoryFilter) -> Vec<YearAggregate> {
    let mut by_year: BTreeMap<i32, YearAggregate> = BTreeMap::new();
    for rec in filter_records(records, filter) {
        by_year
            .entry(rec.class_year)
            .or_insert_with(|| YearAggregate {
                year: rec.class_year,
                ..Default::default()
            })
            .add(rec.gender);
    }
    by_year.into_values().collect()
}

// ---------------------------------------------------------------------------
// Stacking
// ---------------------------------------------------------------------------

/// One `[lower, upper]` bar segment. Magnitudes only: the renderer decides
/// which side of the axis a group grows towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackInterval {
    pub year: i32,
    pub lower: u32,
    pub upper: u32,
}

impl StackInterval {
    pub fn height(&self) -> u32 {
        self.upper - self.lower
    }
}

/// Stacked segments of one gender across all years.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSeries {
    pub key: Gender,
    pub intervals: Vec<StackInterval>,
}

/// Stack `keys` on top of each other per year, in the given order.
fn stack(aggregates: &[YearAggregate], keys: &[Gender]) -> Vec<StackSeries> {
    let mut series: Vec<StackSeries> = keys
        .iter()
        .map(|&key| StackSeries {
            key,
            intervals: Vec::with_capacity(aggregates.len()),
        })
        .collect();

    for agg in aggregates {
        let mut base = 0;
        for s in &mut series {
            let top = base + agg.count(s.key);
            s.intervals.push(StackInterval {
                year: agg.year,
                lower: base,
                upper: top,
            });
            base = top;
        }
    }
    series
}

/// The upward group: male, `[0, male]` per year.
pub fn stack_positive(aggregates: &[YearAggregate]) -> Vec<StackSeries> {
    stack(aggregates, &[Gender::Male])
}

/// The downward group: female `[0, female]` with mixed stacked on it as
/// `[female, female + mixed]`.
pub fn stack_negative(aggregates: &[YearAggregate]) -> Vec<StackSeries> {
    stack(aggregates, &[Gender::Female, Gender::Mixed])
}

// ---------------------------------------------------------------------------
// Summary statistic
// ---------------------------------------------------------------------------

/// Male/female totals of a selection. Mixed inductions are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_male: u32,
    pub total_female: u32,
    /// Share of women among men + women, in percent, rounded to 2 places.
    pub percent_female: f64,
}

pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a InducteeRecord>,
{
    let mut total_male = 0;
    let mut total_female = 0;
    for rec in records {
        match rec.gender {
            Gender::Male => total_male += 1,
            Gender::Female => total_female += 1,
            Gender::Mixed => {}
        }
    }

    let total = total_male + total_female;
    let percent_female = if total == 0 {
        0.0
    } else {
        let raw = f64::from(total_female) / f64::from(total) * 100.0;
        (raw * 100.0).round() / 100.0
    };

    Summary {
        total_male,
        total_female,
        percent_female,
    }
}

/// The annotation shown next to the chart.
pub fn annotation_text(selection: &CategoryFilter, summary: &Summary) -> String {
    format!(
        "In the {selection} category:\n\
         Number of men inducted: {}\n\
         Number of women inducted: {}\n\
         Percentage of women inductees: {:.2}%",
        summary.total_male, summary.total_female, summary.percent_female
    )
}

// ---------------------------------------------------------------------------
// Axis extent
// ---------------------------------------------------------------------------

/// Fixed value range of the chart, computed from the unfiltered data so the
/// axes do not jump between categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueExtent {
    pub min: f64,
    pub max: f64,
}

/// `max` is the largest `male + max(female, mixed)`; `min` is `-min_negative`
/// unless a female + mixed stack reaches further down.
pub fn value_extent(aggregates: &[YearAggregate], min_negative: f64) -> ValueExtent {
    let max = aggregates
        .iter()
        .map(|a| a.male + a.female.max(a.mixed))
        .max()
        .unwrap_or(0);
    let deepest = aggregates
        .iter()
        .map(|a| a.female + a.mixed)
        .max()
        .unwrap_or(0);
    ValueExtent {
        min: -(f64::from(deepest).max(min_negative)),
        max: f64::from(max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(category: &str, year: i32, gender: Gender) -> InducteeRecord {
        InducteeRecord::new(category, year, gender)
    }

    fn sample() -> Vec<InducteeRecord> {
        vec![
            rec("Performers", 1986, Gender::Male),
            rec("Performers", 1986, Gender::Male),
            rec("Early Influences", 1986, Gender::Female),
            rec("Performers", 1987, Gender::Mixed),
            rec("Performers", 1987, Gender::Female),
            rec("Non-Performers", 1987, Gender::Male),
            rec("Performers", 1989, Gender::Female),
            rec("Performers", 1989, Gender::Mixed),
            rec("Performers", 1989, Gender::Mixed),
        ]
    }

    #[test]
    fn test_aggregate_single_year_example() {
        let records = vec![
            rec("Performers", 2000, Gender::Male),
            rec("Performers", 2000, Gender::Female),
            rec("Performers", 2000, Gender::Mixed),
        ];
        assert_eq!(
            aggregate(&records, &CategoryFilter::All),
            vec![YearAggregate {
                year: 2000,
                male: 1,
                female: 1,
                mixed: 1
            }]
        );
        let summary = summarize(&records);
        assert_eq!(summary.total_male, 1);
        assert_eq!(summary.total_female, 1);
        assert_eq!(summary.percent_female, 50.0);
    }

    #[test]
    fn test_aggregate_reports_zero_counts() {
        let aggs = aggregate(&sample(), &CategoryFilter::All);
        let y1989 = aggs.iter().find(|a| a.year == 1989).unwrap();
        assert_eq!(y1989.male, 0);
        assert_eq!(y1989.female, 1);
        assert_eq!(y1989.mixed, 2);
    }

    #[test]
    fn test_aggregate_one_entry_per_year() {
        let aggs = aggregate(&sample(), &CategoryFilter::All);
        let years: Vec<i32> = aggs.iter().map(|a| a.year).collect();
        assert_eq!(years, vec![1986, 1987, 1989]);
    }

    #[test]
    fn test_aggregate_counts_sum_to_filtered_records() {
        let records = sample();
        let filters = [
            CategoryFilter::All,
            CategoryFilter::Only("Performers".into()),
            CategoryFilter::Only("Early Influences".into()),
            CategoryFilter::Only("Non-Performers".into()),
            CategoryFilter::Only("Sidemen".into()),
        ];
        for filter in &filters {
            let total: u32 = aggregate(&records, filter)
                .iter()
                .map(|a| a.male + a.female + a.mixed)
                .sum();
            let expected = records.iter().filter(|r| filter.matches(r)).count();
            assert_eq!(total as usize, expected, "filter {filter}");
        }
    }

    #[test]
    fn test_filter_matching_every_record_equals_no_filter() {
        let records: Vec<InducteeRecord> = sample()
            .into_iter()
            .map(|r| InducteeRecord {
                category: "Performers".into(),
                ..r
            })
            .collect();
        assert_eq!(
            aggregate(&records, &CategoryFilter::Only("Performers".into())),
            aggregate(&records, &CategoryFilter::All)
        );
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[], &CategoryFilter::All).is_empty());
        assert!(stack_positive(&[])[0].intervals.is_empty());
    }

    #[test]
    fn test_stack_positive() {
        let aggs = aggregate(&sample(), &CategoryFilter::All);
        let series = stack_positive(&aggs);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].key, Gender::Male);
        let tops: Vec<(u32, u32)> = series[0]
            .intervals
            .iter()
            .map(|i| (i.lower, i.upper))
            .collect();
        assert_eq!(tops, vec![(0, 2), (0, 1), (0, 0)]);
    }

    #[test]
    fn test_stack_negative_has_no_gap() {
        let aggs = aggregate(&sample(), &CategoryFilter::All);
        let series = stack_negative(&aggs);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].key, Gender::Female);
        assert_eq!(series[1].key, Gender::Mixed);

        for (female, mixed) in series[0].intervals.iter().zip(&series[1].intervals) {
            assert_eq!(female.year, mixed.year);
            assert_eq!(female.lower, 0);
            assert_eq!(mixed.lower, female.upper);
        }

        let y1989 = series[1].intervals.iter().find(|i| i.year == 1989).unwrap();
        assert_eq!((y1989.lower, y1989.upper), (1, 3));
        assert_eq!(y1989.height(), 2);
    }

    #[test]
    fn test_summarize_empty_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.percent_female, 0.0);
    }

    #[test]
    fn test_summarize_only_mixed_is_zero() {
        let records = vec![rec("Performers", 1990, Gender::Mixed)];
        assert_eq!(summarize(&records).percent_female, 0.0);
    }

    #[test]
    fn test_summarize_rounds_to_two_places() {
        let records = vec![
            rec("Performers", 1990, Gender::Female),
            rec("Performers", 1990, Gender::Male),
            rec("Performers", 1990, Gender::Male),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.percent_female, 33.33);
    }

    #[test]
    fn test_annotation_text() {
        let summary = Summary {
            total_male: 3,
            total_female: 1,
            percent_female: 25.0,
        };
        let text = annotation_text(&CategoryFilter::Only("Performers".into()), &summary);
        assert_eq!(
            text,
            "In the Performers category:\n\
             Number of men inducted: 3\n\
             Number of women inducted: 1\n\
             Percentage of women inductees: 25.00%"
        );
    }

    #[test]
    fn test_value_extent() {
        let aggs = aggregate(&sample(), &CategoryFilter::All);
        let extent = value_extent(&aggs, 10.0);
        // 1986: 2 male + max(1, 0)
        assert_eq!(extent.max, 3.0);
        assert_eq!(extent.min, -10.0);

        let deep = vec![YearAggregate {
            year: 2000,
            male: 1,
            female: 8,
            mixed: 5,
        }];
        assert_eq!(value_extent(&deep, 10.0).min, -13.0);
    }
}
