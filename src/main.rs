// =============================================================================
// VULKAN LESSONS - window, instance, validation and device bring-up
// =============================================================================
//
// Each lesson builds on the previous one:
// 1. `window`  - open a window and poll events until it is closed
// 2. `device`  - also create an instance, register the debug messenger,
//                pick a GPU with a graphics queue and create a logical device
//
// Setup failures release what was already created (see backend::session) and
// exit with a non-zero code.
//
// =============================================================================

mod app;
mod backend;
mod config;
mod error;
mod logging;

use app::App;
use config::Config;
use error::{SetupError, SetupResult};
use std::process::ExitCode;
use winit::event_loop::EventLoop;

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> ExitCode {
    // Load configuration from config.toml
    let (config, load_error) = Config::load();

    // Initialize logging
    logging::init(&config);
    if let Some(e) = load_error {
        log::warn!("Failed to load config.toml: {:#}. Using defaults.", e);
    }
    log::info!("Starting lesson: {:?}", config.app.lesson);
    log::info!(
        "Window: {}x{} \"{}\"",
        config.window.width,
        config.window.height,
        config.window.title
    );

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Lesson aborted: {}", e);
            ExitCode::from(&e)
        }
    }
}

fn run(config: Config) -> SetupResult<()> {
    let event_loop = EventLoop::new().map_err(SetupError::WindowInitFailed)?;
    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(SetupError::WindowInitFailed)?;
    app.finish()
}
