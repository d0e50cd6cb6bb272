#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod handlers;
mod logger;
mod views;
mod worker;

fn main() -> eframe::Result<()> {
    let app_logger = logger::AppLogger::new(500);
    if let Err(e) = app_logger.clone().init() {
        eprintln!("Failed to install logger: {e}");
    }

    let runtime = tokio::runtime::Runtime::new().expect("Failed to start tokio runtime");
    let tokio_handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("PDF Stapler"),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Stapler",
        options,
        Box::new(move |cc| Ok(Box::new(app::StaplerApp::new(cc, tokio_handle, app_logger)))),
    )
}
