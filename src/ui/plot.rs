use std::collections::BTreeMap;
use std::time::Instant;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Corner, HLine, Legend, Plot};

use crate::color::{gender_color, outline_color};
use crate::data::aggregate::{StackSeries, YearAggregate};
use crate::data::model::Gender;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Diverging bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart in the central panel: male bars grow up from zero,
/// female and mixed bars are stacked downwards.
pub fn diverging_plot(ui: &mut Ui, state: &AppState, now: Instant) {
    let (Some(view), Some(domain)) = (&state.view, &state.domain) else {
        let message = placeholder(state).unwrap_or_default();
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(message);
        });
        return;
    };

    let progress = f64::from(ease_cubic_in_out(state.transition_progress(now)));
    let width = state.config.bar_width;
    let by_year: BTreeMap<i32, YearAggregate> =
        view.aggregates.iter().map(|a| (a.year, *a)).collect();

    let first_year = domain.first_year;
    let stride = state.config.year_tick_stride;

    Plot::new("diverging_plot")
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label("Class year")
        .y_axis_label("Inductees")
        .x_axis_formatter(move |mark, _range| year_label(mark.value, first_year, stride))
        .y_axis_formatter(|mark, _range| count_label(mark.value))
        .include_x(f64::from(domain.first_year) - 1.0)
        .include_x(f64::from(domain.last_year) + 1.0)
        .include_y(domain.values.min)
        .include_y(domain.values.max)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for series in &view.positive {
                plot_ui.bar_chart(series_chart(series, 1.0, progress, width, &by_year));
            }
            for series in &view.negative {
                plot_ui.bar_chart(series_chart(series, -1.0, progress, width, &by_year));
            }
            plot_ui.hline(HLine::new(0.0).color(Color32::BLACK).width(1.0));
        });
}

/// Text shown instead of the chart when there is nothing to plot.
pub fn placeholder(state: &AppState) -> Option<&'static str> {
    if state.dataset.is_none() {
        Some("Open a file to view inductees  (File → Open…)")
    } else if state.domain.is_none() {
        Some("No inductees in this dataset.")
    } else {
        None
    }
}

/// One gender's bars. `direction` flips the negative group below the axis;
/// `progress` scales heights during the grow-in.
fn series_chart(
    series: &StackSeries,
    direction: f64,
    progress: f64,
    width: f64,
    by_year: &BTreeMap<i32, YearAggregate>,
) -> BarChart {
    let fill = gender_color(series.key);
    let stroke = Stroke::new(1.0, outline_color(fill));

    let bars: Vec<Bar> = series
        .intervals
        .iter()
        .filter(|iv| iv.height() > 0)
        .map(|iv| {
            Bar::new(
                f64::from(iv.year),
                direction * f64::from(iv.height()) * progress,
            )
            .base_offset(direction * f64::from(iv.lower) * progress)
            .width(width)
            .fill(fill)
            .stroke(stroke)
        })
        .collect();

    let key = series.key;
    let lookup = by_year.clone();
    BarChart::new(bars)
        .name(key.label())
        .color(fill)
        .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
            let year = bar.argument.round() as i32;
            lookup
                .get(&year)
                .map(|agg| tooltip_text(key, agg))
                .unwrap_or_default()
        }))
}

/// Hover text: the male group shows its own count, the stacked group shows
/// both of its counts.
pub fn tooltip_text(key: Gender, agg: &YearAggregate) -> String {
    match key {
        Gender::Male => format!("Year: {}\nMale: {}", agg.year, agg.male),
        Gender::Female | Gender::Mixed => format!(
            "Year: {}\nFemale: {}\nMixed: {}",
            agg.year, agg.female, agg.mixed
        ),
    }
}

/// Integer year labels on every `stride`-th year counted from `first_year`.
pub fn year_label(value: f64, first_year: i32, stride: i32) -> String {
    if value.fract() != 0.0 {
        return String::new();
    }
    let year = value as i32;
    if (year - first_year).rem_euclid(stride.max(1)) == 0 {
        year.to_string()
    } else {
        String::new()
    }
}

/// Counts below the axis are labelled by magnitude.
pub fn count_label(value: f64) -> String {
    let v = value.abs();
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

/// Cubic in-out easing on `[0, 1]`.
pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_distinguishes_empty_dataset() {
        use crate::config::ChartConfig;
        use crate::data::model::{InducteeDataset, InducteeRecord};

        let now = Instant::now();
        let mut state = AppState::new(ChartConfig::default());
        assert_eq!(
            placeholder(&state),
            Some("Open a file to view inductees  (File → Open…)")
        );

        state.set_dataset(InducteeDataset::default(), now);
        assert_eq!(placeholder(&state), Some("No inductees in this dataset."));

        let records = vec![InducteeRecord::new("Performers", 1986, Gender::Male)];
        state.set_dataset(InducteeDataset::from_records(records, 0), now);
        assert_eq!(placeholder(&state), None);
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(2.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
    }

    #[test]
    fn test_year_label_every_other_year() {
        assert_eq!(year_label(1986.0, 1986, 2), "1986");
        assert_eq!(year_label(1987.0, 1986, 2), "");
        assert_eq!(year_label(1988.0, 1986, 2), "1988");
        assert_eq!(year_label(1986.5, 1986, 2), "");
    }

    #[test]
    fn test_year_label_counts_calendar_years() {
        // labels do not skip over empty years
        assert_eq!(year_label(1990.0, 1986, 2), "1990");
        assert_eq!(year_label(1991.0, 1986, 2), "");
    }

    #[test]
    fn test_count_label_drops_sign() {
        assert_eq!(count_label(-4.0), "4");
        assert_eq!(count_label(12.0), "12");
        assert_eq!(count_label(-2.5), "2.5");
    }

    #[test]
    fn test_tooltip_text() {
        let agg = YearAggregate {
            year: 1995,
            male: 6,
            female: 2,
            mixed: 1,
        };
        assert_eq!(tooltip_text(Gender::Male, &agg), "Year: 1995\nMale: 6");
        assert_eq!(
            tooltip_text(Gender::Mixed, &agg),
            "Year: 1995\nFemale: 2\nMixed: 1"
        );
    }
}
