use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// Per-year counts of the current selection.
pub fn year_table(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.label("No dataset loaded.");
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(60.0), 4)
        .header(20.0, |mut header| {
            for title in ["Year", "Male", "Female", "Mixed", "Total"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, view.aggregates.len(), |mut row| {
                let agg = view.aggregates[row.index()];
                let cells = [
                    agg.year.to_string(),
                    agg.male.to_string(),
                    agg.female.to_string(),
                    agg.mixed.to_string(),
                    (agg.male + agg.female + agg.mixed).to_string(),
                ];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
