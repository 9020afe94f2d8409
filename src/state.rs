use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::ChartConfig;
use crate::data::aggregate::{
    StackSeries, Summary, ValueExtent, YearAggregate, aggregate, stack_negative, stack_positive,
    summarize, value_extent,
};
use crate::data::filter::{CategoryFilter, filter_records};
use crate::data::model::InducteeDataset;
use crate::walkthrough::{Step, Walkthrough};

/// Header shown once the walkthrough has handed control to the user.
pub const EXPLORE_HEADER: &str =
    "Explore the data by selecting a category and hovering over the bars:";

// ---------------------------------------------------------------------------
// Derived chart data
// ---------------------------------------------------------------------------

/// Everything the plot needs for the current selection. Rebuilt from
/// scratch on every selection change.
#[derive(Debug, Clone)]
pub struct ChartView {
    pub aggregates: Vec<YearAggregate>,
    pub positive: Vec<StackSeries>,
    pub negative: Vec<StackSeries>,
    pub summary: Summary,
    /// When this view replaced the previous one; drives the grow-in.
    pub drawn_at: Instant,
}

impl ChartView {
    pub fn build(dataset: &InducteeDataset, selection: &CategoryFilter, now: Instant) -> Self {
        let aggregates = aggregate(&dataset.records, selection);
        log::debug!("Aggregated {selection}: {aggregates:?}");
        ChartView {
            positive: stack_positive(&aggregates),
            negative: stack_negative(&aggregates),
            summary: summarize(filter_records(&dataset.records, selection)),
            aggregates,
            drawn_at: now,
        }
    }
}

/// Axis domain shared by every selection, from the unfiltered data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDomain {
    pub first_year: i32,
    pub last_year: i32,
    pub values: ValueExtent,
}

#[derive(Serialize)]
struct SummaryExport<'a> {
    category: String,
    summary: &'a Summary,
    years: &'a [YearAggregate],
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ChartConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<InducteeDataset>,

    /// Category currently charted.
    pub selection: CategoryFilter,

    /// Derived data for `selection` (cached).
    pub view: Option<ChartView>,

    pub domain: Option<ChartDomain>,

    /// Text above the category selector.
    pub header: String,

    /// Running walkthrough; `None` or finished means the user is in control.
    pub walkthrough: Option<Walkthrough>,

    /// Whether the per-year table is shown.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            dataset: None,
            selection: CategoryFilter::All,
            view: None,
            domain: None,
            header: String::new(),
            walkthrough: None,
            show_table: false,
            status_message: None,
        }
    }

    /// Load a dataset from disk. Failures are logged and shown in the
    /// status bar; the previous dataset (if any) stays on screen.
    pub fn load_path(&mut self, path: &Path, now: Instant) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} inductees in {} categories from {}",
                    dataset.len(),
                    dataset.categories.len(),
                    path.display()
                );
                self.set_dataset(dataset, now);
            }
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, fix the axis domain and start the
    /// walkthrough from the unfiltered view.
    pub fn set_dataset(&mut self, dataset: InducteeDataset, now: Instant) {
        if dataset.is_empty() {
            log::warn!("Dataset has no inductees with a known gender");
        }
        let all = aggregate(&dataset.records, &CategoryFilter::All);
        self.domain = match (all.first(), all.last()) {
            (Some(first), Some(last)) => Some(ChartDomain {
                first_year: first.year,
                last_year: last.year,
                values: value_extent(&all, self.config.min_negative_extent),
            }),
            _ => None,
        };

        self.walkthrough = Some(Walkthrough::start(
            dataset.categories.len(),
            self.config.walkthrough_interval,
            now,
        ));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.select(CategoryFilter::All, now);
    }

    /// Chart another category.
    pub fn select(&mut self, selection: CategoryFilter, now: Instant) {
        self.header = format!("Category: {selection}");
        self.selection = selection;
        self.recompute(now);
    }

    fn recompute(&mut self, now: Instant) {
        self.view = self
            .dataset
            .as_ref()
            .map(|ds| ChartView::build(ds, &self.selection, now));
    }

    /// Advance the walkthrough if a step is due.
    pub fn tick(&mut self, now: Instant) {
        let Some(step) = self.walkthrough.as_mut().and_then(|wt| wt.poll(now)) else {
            return;
        };
        match step {
            Step::Show(index) => {
                let category = self
                    .dataset
                    .as_ref()
                    .and_then(|ds| ds.categories.get(index))
                    .cloned();
                if let Some(category) = category {
                    log::info!("Walkthrough: {category}");
                    self.select(CategoryFilter::Only(category), now);
                }
            }
            Step::Finished => {
                log::info!("Walkthrough finished");
                self.header = EXPLORE_HEADER.to_string();
            }
        }
    }

    /// Stop the walkthrough and let the user choose.
    pub fn skip_walkthrough(&mut self) {
        if let Some(wt) = &mut self.walkthrough {
            if wt.is_running() {
                wt.skip();
                self.header = EXPLORE_HEADER.to_string();
            }
        }
    }

    pub fn walkthrough_running(&self) -> bool {
        self.walkthrough.as_ref().is_some_and(Walkthrough::is_running)
    }

    /// The selector is locked while the walkthrough runs.
    pub fn selector_enabled(&self) -> bool {
        self.dataset.is_some() && !self.walkthrough_running()
    }

    /// Grow-in progress of the current view in `[0, 1]`.
    pub fn transition_progress(&self, now: Instant) -> f32 {
        let Some(view) = &self.view else {
            return 1.0;
        };
        let total = self.config.transition.as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        (now.saturating_duration_since(view.drawn_at).as_secs_f32() / total).min(1.0)
    }

    /// How soon the UI must repaint without user input, if at all.
    pub fn next_repaint(&self, now: Instant) -> Option<Duration> {
        let animating = self.transition_progress(now) < 1.0;
        let frame = animating.then_some(Duration::from_millis(16));
        let step = self
            .walkthrough
            .as_ref()
            .and_then(|wt| wt.time_until_next(now));
        match (frame, step) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// The current selection's summary and per-year counts as pretty JSON.
    pub fn summary_json(&self) -> Result<String> {
        let view = self.view.as_ref().context("No dataset loaded")?;
        let export = SummaryExport {
            category: self.selection.to_string(),
            summary: &view.summary,
            years: &view.aggregates,
        };
        serde_json::to_string_pretty(&export).context("serializing summary")
    }

    pub fn export_summary(&self, path: &Path) -> Result<()> {
        let json = self.summary_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported summary to {}", path.display());
        Ok(())
    }
}
