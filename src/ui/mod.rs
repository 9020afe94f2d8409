//! egui widgets: top bar, side panel, chart and data table.

pub mod panels;
pub mod plot;
pub mod table;
