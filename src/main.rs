#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;

use crate::app::{
    SpringboardApp, APP_DISPLAY_NAME, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WINDOW_HEIGHT,
    WINDOW_WIDTH,
};
use eframe::egui;
use springboard::BoardConfig;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let startup_size = load_startup_window_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(startup_size)
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT])
            .with_resizable(true)
            .with_visible(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_DISPLAY_NAME,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(SpringboardApp::new(cc)))
        }),
    )
}

fn load_startup_window_size() -> [f32; 2] {
    let config = BoardConfig::load();
    if let Some((w, h)) = config.last_size {
        [
            sanitize_dimension(w, WINDOW_WIDTH, MIN_WINDOW_WIDTH),
            sanitize_dimension(h, WINDOW_HEIGHT, MIN_WINDOW_HEIGHT),
        ]
    } else {
        [WINDOW_WIDTH, WINDOW_HEIGHT]
    }
}

fn sanitize_dimension(value: f32, fallback: f32, min: f32) -> f32 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, 4096.0)
}
