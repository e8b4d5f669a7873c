#![warn(clippy::all, rust_2018_idioms)]

use pumpkin_garden::{AppConfig, PumpkinApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = AppConfig::load();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Pumpkin Garden")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "pumpkin_garden",
        native_options,
        Box::new(move |cc| Ok(Box::new(PumpkinApp::new(cc, config)))),
    )
}
