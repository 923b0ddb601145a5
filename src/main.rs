use eframe::egui;

use graph_sketchpad::gui::frontend::SketchApp;

fn main() -> eframe::Result {
    env_logger::init();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 780.0])
            // Keep the canvas and side panel usable on small screens
            .with_min_inner_size([640.0, 480.0])
            .with_resizable(true),
        ..Default::default()
    };
    eframe::run_native(
        "Graph Sketchpad",
        options,
        Box::new(|_cc| Ok(Box::new(SketchApp::new()) as Box<dyn eframe::App>)),
    )
}
