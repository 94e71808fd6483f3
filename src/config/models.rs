//! Configuration data models
//!
//! This module defines the data structures used for application configuration.

use crate::snow::SnowSettings;
use crate::theme::ThemedImage;
use crate::toggle::ToggleSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pull-cord toggle geometry and physics
    pub toggle: ToggleSettings,
    /// Hero title and snow effect
    pub hero: HeroConfig,
    /// Images that swap source with the theme
    pub themed_images: Vec<ThemedImage>,
    /// Window state for persistence
    pub window_state: WindowState,
}

/// Hero area settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Title text shown in the hero area
    pub title: String,
    /// Whether snow may fall at all (still limited to the season)
    pub snow_enabled: bool,
    /// RGBA raster of the title used as the snow collision mask
    pub title_mask: Option<PathBuf>,
    /// Snow tunables
    pub snow: SnowSettings,
}

/// Window state for position and size persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    /// Window width
    pub width: u32,
    /// Window height
    pub height: u32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "KMS".to_string(),
            snow_enabled: true,
            title_mask: None,
            snow: SnowSettings::default(),
        }
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: 720,
            height: 420,
        }
    }
}
