use std::time::Instant;

use eframe::egui::{self, Color32, RichText, Sense, Ui};

use crate::color::gender_color;
use crate::data::aggregate::annotation_text;
use crate::data::filter::CategoryFilter;
use crate::data::model::Gender;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – category selector, legend, annotation
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, now: Instant) {
    ui.heading("Inductees by gender");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.label(RichText::new(&state.header).strong());
    ui.add_space(4.0);

    let mut options = vec![CategoryFilter::All];
    options.extend(dataset.categories.iter().cloned().map(CategoryFilter::Only));

    let mut picked: Option<CategoryFilter> = None;
    ui.add_enabled_ui(state.selector_enabled(), |ui: &mut Ui| {
        egui::ComboBox::from_id_salt("category_select")
            .selected_text(state.selection.to_string())
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                for option in options {
                    let label = option.to_string();
                    if ui
                        .selectable_label(state.selection == option, label)
                        .clicked()
                    {
                        picked = Some(option);
                    }
                }
            });
    });
    if let Some(selection) = picked {
        state.select(selection, now);
    }

    ui.separator();
    legend(ui);
    ui.separator();

    if let Some(view) = &state.view {
        egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
            for line in annotation_text(&state.selection, &view.summary).lines() {
                ui.label(line);
            }
        });
    }
}

/// Colour swatch per gender.
fn legend(ui: &mut Ui) {
    for gender in Gender::ALL {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), Sense::hover());
            ui.painter().rect_filled(rect, 0.0, gender_color(gender));
            ui.label(gender.label());
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, now: Instant) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state, now);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.view.is_some(), egui::Button::new("Export summary…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let mut text = format!(
                "{} inductees, {} categories",
                ds.len(),
                ds.categories.len()
            );
            if ds.skipped_rows > 0 {
                text.push_str(&format!(", {} rows skipped", ds.skipped_rows));
            }
            ui.label(text);
        }

        ui.separator();

        if ui.selectable_label(state.show_table, "Data table").clicked() {
            state.show_table = !state.show_table;
        }

        if state.walkthrough_running() && ui.button("Skip walkthrough").clicked() {
            state.skip_walkthrough();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, now: Instant) {
    let file = rfd::FileDialog::new()
        .set_title("Open inductee data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path, now);
    }
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .set_file_name("summary.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_summary(&path) {
            log::error!("Failed to export summary: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
