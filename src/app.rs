use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ForkloreApp {
    pub state: AppState,
}

impl ForkloreApp {
    /// Start with a dataset already loaded, e.g. from a CLI argument.
    /// A load failure still produces a running app; the error lands in the
    /// status bar like any other failed open.
    pub fn with_dataset(path: &Path) -> Self {
        let mut state = AppState::default();
        state.load_path(path);
        Self { state }
    }

    /// Datasets can be dropped onto the window; the last dropped file with
    /// a usable path wins.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().rev().find_map(|f| f.path) {
            self.state.load_path(&path);
        }
    }
}

impl eframe::App for ForkloreApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &self.state);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_dataset_preloads_and_primes_the_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        std::fs::write(&path, "name,rate\nJalsa,4.1/5\nOnesta,3.5/5\n").unwrap();

        let app = ForkloreApp::with_dataset(&path);
        let table = app.state.table.as_ref().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(app.state.visible_indices, vec![0, 1]);
        assert!(app.state.status_message.is_none());
    }

    #[test]
    fn with_dataset_keeps_running_on_a_bad_path() {
        let app = ForkloreApp::with_dataset(Path::new("no-such-file.csv"));
        assert!(app.state.table.is_none());
        assert!(app.state.status_message.is_some());
    }
}
