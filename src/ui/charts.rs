use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot, Points};

use crate::color::ColorMap;
use crate::data::model::{columns, ListingTable, Value};
use crate::data::summary::{FrequencyEntry, Summary};
use crate::state::AppState;

const PREVIEW_ROWS: usize = 10;
const HISTOGRAM_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Central panel – the dashboard
// ---------------------------------------------------------------------------

/// Render the metrics, charts and preview for the current selection.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let (Some(table), Some(summary)) = (&state.table, &state.summary) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to explore listings  (File → Open…)");
        });
        return;
    };

    metrics_row(ui, summary);
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols: &mut [Ui]| {
                frequency_chart(&mut cols[0], "top_cuisines", "Top cuisines", &summary.top_cuisines);
                frequency_chart(
                    &mut cols[1],
                    "top_locations",
                    "Top locations",
                    &summary.top_locations,
                );
            });
            ui.add_space(12.0);

            ui.columns(2, |cols: &mut [Ui]| {
                rating_histogram(&mut cols[0], table, &state.visible_indices);
                cost_rating_scatter(&mut cols[1], table, &state.visible_indices);
            });
            ui.add_space(12.0);

            preview_table(ui, table, &state.visible_indices);
        });
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

fn metrics_row(ui: &mut Ui, summary: &Summary) {
    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Listings", summary.rows.to_string());
        metric(
            ui,
            "Avg rating",
            summary
                .mean_rate
                .map(|m| format!("{m:.2} / 5"))
                .unwrap_or_else(|| "–".to_string()),
        );
        metric(
            ui,
            "Avg cost for two",
            summary
                .mean_cost
                .map(|c| format!("₹{c}"))
                .unwrap_or_else(|| "–".to_string()),
        );
        metric(ui, "Online ordering", format!("{:.1}%", summary.online_pct));
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak().small());
        ui.heading(value);
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Bar chart of a top-N frequency table, one colour per category, with a
/// swatch legend underneath (bar positions are just ranks).
fn frequency_chart(ui: &mut Ui, id: &str, title: &str, entries: &[FrequencyEntry]) {
    ui.strong(title);
    if entries.is_empty() {
        ui.label("No data in the current selection.");
        return;
    }

    let color_map = ColorMap::new(entries.iter().map(|e| e.value.clone()));
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Bar::new(i as f64, entry.count as f64)
                .fill(color_map.color_for(&entry.value))
                .name(&entry.value)
        })
        .collect();

    Plot::new(id)
        .height(200.0)
        .show_axes([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, color) in color_map.legend_entries() {
            ui.colored_label(*color, format!("■ {label}"));
        }
    });
}

fn rating_histogram(ui: &mut Ui, table: &ListingTable, visible: &[usize]) {
    ui.strong("Rating distribution");

    let bin_width = 5.0 / HISTOGRAM_BINS as f64;
    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for &idx in visible {
        if let Some(rate) = table.rows[idx].number(columns::RATE) {
            let bin = (rate / bin_width).floor() as isize;
            let bin = bin.clamp(0, HISTOGRAM_BINS as isize - 1) as usize;
            counts[bin] += 1;
        }
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new((i as f64 + 0.5) * bin_width, count as f64).width(bin_width * 0.9)
        })
        .collect();

    Plot::new("rating_histogram")
        .height(200.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

fn cost_rating_scatter(ui: &mut Ui, table: &ListingTable, visible: &[usize]) {
    ui.strong("Cost for two vs rating");

    let points: Vec<[f64; 2]> = visible
        .iter()
        .filter_map(|&idx| {
            let row = &table.rows[idx];
            let cost = row.number(columns::COST_FOR_TWO)?;
            let rate = row.number(columns::RATE)?;
            Some([cost, rate])
        })
        .collect();

    Plot::new("cost_rating_scatter")
        .height(200.0)
        .x_axis_label("Cost for two")
        .y_axis_label("Rating")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(2.0)
                    .color(Color32::LIGHT_GREEN)
                    .name("listing"),
            );
        });
}

// ---------------------------------------------------------------------------
// Preview grid
// ---------------------------------------------------------------------------

fn preview_table(ui: &mut Ui, table: &ListingTable, visible: &[usize]) {
    ui.strong(format!("Preview (first {PREVIEW_ROWS} visible listings)"));

    let preferred = [
        columns::NAME,
        columns::LOCATION,
        columns::CUISINES,
        columns::ONLINE_ORDER,
        columns::RATE,
        columns::COST_FOR_TWO,
        columns::VOTES,
    ];
    let cols: Vec<&str> = preferred
        .iter()
        .copied()
        .filter(|c| table.has_column(c))
        .collect();
    if cols.is_empty() {
        ui.label("No recognized columns to preview.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), cols.len())
        .header(20.0, |mut header| {
            for col in &cols {
                header.col(|ui: &mut Ui| {
                    ui.strong(*col);
                });
            }
        })
        .body(|mut body| {
            for &idx in visible.iter().take(PREVIEW_ROWS) {
                let listing = &table.rows[idx];
                body.row(18.0, |mut row| {
                    for col in &cols {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell_text(col, listing.get(col)));
                        });
                    }
                });
            }
        });
}

/// Grid rendering of one cell. Repaired numeric columns get fixed-point
/// formatting; missing cells stay blank.
fn cell_text(col: &str, value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Number(v)) if col == columns::RATE => format!("{v:.2}"),
        Some(Value::Number(v)) if col == columns::COST_FOR_TWO => format!("{v:.0}"),
        Some(v) => v.to_string(),
    }
}
