//! `pullcord` - Desktop host for the pull-cord theme toggle
//!
//! Opens a window with the hero title, the seasonal snow layer and the
//! pull cord. The chosen theme persists between runs.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use gui::GuiController;
use pullcord::{
    PullcordError,
    config::ConfigManager,
    error::get_user_friendly_error,
    storage::{JsonFileStore, Preferences},
    utils,
};
use tracing::{error, info};

// Include Slint-generated code
slint::include_modules!();

fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("pullcord v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = ConfigManager::load().context("Failed to load application configuration")?;
    info!(
        "Configuration loaded with {} themed images",
        config.themed_images.len()
    );

    let preferences = Preferences::new(JsonFileStore::new(ConfigManager::get_preferences_path()));

    let gui_controller = match GuiController::new(config, preferences)
        .context("Failed to initialize the window")
    {
        Ok(controller) => controller,
        Err(e) => {
            error!("Failed to initialize GUI: {:#}", e);
            let message = e.downcast_ref::<PullcordError>().map_or_else(
                || format!("{e:#}"),
                get_user_friendly_error,
            );
            show_error_and_exit(&format!("Failed to start pullcord:\n\n{message}"));
        }
    };

    info!("Starting GUI event loop");
    gui_controller
        .run()
        .context("GUI event loop terminated with error")?;

    info!("pullcord shutting down");

    Ok(())
}

/// Report a fatal startup error and exit
fn show_error_and_exit(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
