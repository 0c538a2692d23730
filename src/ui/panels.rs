use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::FilterCriteria;
use crate::data::model::columns;
use crate::data::summary::Summary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    let source_name = state
        .source
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned());
    if let Some(name) = source_name {
        ui.label(RichText::new(name).weak().small());
    }
    ui.separator();

    // Clone the option lists up front so the widgets below can mutate state.
    let (locations, online_options) = match &state.table {
        Some(table) => (
            table.unique_texts(columns::LOCATION),
            table.unique_texts(columns::ONLINE_ORDER),
        ),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Location");
            changed |= choice_combo(
                ui,
                "location_filter",
                &mut state.criteria.location,
                &locations,
            );
            ui.add_space(8.0);

            ui.strong("Cuisine contains");
            let mut cuisine = state.criteria.cuisine.clone().unwrap_or_default();
            if ui.text_edit_singleline(&mut cuisine).changed() {
                state.criteria.cuisine = if cuisine.trim().is_empty() {
                    None
                } else {
                    Some(cuisine)
                };
                changed = true;
            }
            ui.add_space(8.0);

            ui.strong("Online ordering");
            changed |= choice_combo(
                ui,
                "online_order_filter",
                &mut state.criteria.online_order,
                &online_options,
            );
            ui.add_space(12.0);

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });

    if changed {
        state.refilter();
    }
}

/// A dropdown over `options` with a leading wildcard entry. Returns whether
/// the selection changed.
fn choice_combo(
    ui: &mut Ui,
    id: &str,
    selection: &mut Option<String>,
    options: &[String],
) -> bool {
    let mut changed = false;
    let selected_text = selection.clone().unwrap_or_else(|| "All".to_string());

    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selection.is_none(), "All").clicked() {
                changed |= selection.take().is_some();
            }
            for option in options {
                let is_selected = selection.as_deref() == Some(option.as_str());
                if ui.selectable_label(is_selected, option).clicked() && !is_selected {
                    *selection = Some(option.clone());
                    changed = true;
                }
            }
        });
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.summary.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export summary…"))
                .clicked()
            {
                export_summary_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} listings loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open restaurant listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

fn export_summary_dialog(state: &mut AppState) {
    let Some(summary) = state.summary.clone() else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .set_file_name("summary.json")
        .add_filter("JSON", &["json"])
        .save_file();
    let Some(path) = file else {
        return;
    };

    match export_summary(&path, &state.criteria, &summary) {
        Ok(()) => {
            log::info!("Exported summary to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export summary: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

/// Write the current criteria and statistics as pretty JSON.
fn export_summary(
    path: &Path,
    criteria: &FilterCriteria,
    summary: &Summary,
) -> anyhow::Result<()> {
    let bundle = serde_json::json!({
        "criteria": criteria,
        "summary": summary,
    });
    let text = serde_json::to_string_pretty(&bundle).context("serializing summary")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}
