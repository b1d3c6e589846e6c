#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use pixel_grid_paint::{GridConfig, PixelGridApp};

/// Environment variable naming an optional JSON config file
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "PIXEL_GRID_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> GridConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return GridConfig::default();
    };
    match GridConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path);
            config
        }
        Err(err) => {
            log::error!("Ignoring config {}: {}", path, err);
            GridConfig::default()
        }
    }
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([320.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Pixel Grid",
        native_options,
        Box::new(|cc| Ok(Box::new(PixelGridApp::new(cc, config)?))),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(canvas) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("the_canvas_id"))
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("Failed to find the_canvas_id");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(PixelGridApp::new(cc, GridConfig::default())?))),
            )
            .await;

        if let Err(err) = start_result {
            log::error!("Failed to start eframe: {:?}", err);
        }
    });
}
