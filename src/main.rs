use std::path::PathBuf;

use eframe::egui;
use forklore::app::ForkloreApp;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path: `forklore listings.csv` preloads the file,
    // otherwise the user opens one from the File menu.
    let preload: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Forklore – Restaurant Listings Explorer",
        options,
        Box::new(move |_cc| {
            let app = match preload {
                Some(path) => ForkloreApp::with_dataset(&path),
                None => ForkloreApp::default(),
            };
            Ok(Box::new(app))
        }),
    )
}
