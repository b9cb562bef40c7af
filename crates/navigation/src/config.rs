use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tour::join_asset_path;

use crate::style::ButtonStyleSet;

pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome to the dome explorer! \n Use the mouse to look around and click on a target to move to another view point. ";

/// Viewer settings. Every field has a default, so a partial JSON document
/// (or none at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Prefix for every relative asset path.
    pub asset_root: String,
    pub dome_diameter: f64,
    /// Button distance from the viewer, as a fraction of the dome diameter.
    pub button_distance_ratio: f64,
    /// Button edge length, as a fraction of the dome diameter.
    pub button_size_ratio: f64,
    /// Horizontal camera field of view in radians.
    pub fov_horizontal: f64,
    pub button_texture: String,
    pub button_active_texture: String,
    /// Tooltip caption size in pixels; bubble width is `chars * caption_size`.
    pub caption_size: f64,
    pub tooltip_offset_y: f64,
    pub welcome_message: String,
    pub welcome_duration_ms: u32,
    pub welcome_delay_ms: u32,
    /// Shown instead of raw error detail when a panorama fails to load.
    pub load_failure_message: String,
    pub notice_duration_ms: u32,
    /// "Did you know?" texts rotated on the loading screen.
    pub loading_tips: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_root: "./".to_string(),
            dome_diameter: 1000.0,
            button_distance_ratio: 0.45,
            button_size_ratio: 0.1,
            fov_horizontal: PI * 0.33,
            button_texture: "textures/UI/button.png".to_string(),
            button_active_texture: "textures/UI/buttonActive.png".to_string(),
            caption_size: 18.0,
            tooltip_offset_y: -192.0,
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            welcome_duration_ms: 8000,
            welcome_delay_ms: 1000,
            load_failure_message: "This view could not be loaded. You can keep exploring."
                .to_string(),
            notice_duration_ms: 4000,
            loading_tips: vec![
                "The panoramas are projected onto the inside of a sphere.".to_string(),
                "Drag with the mouse to look around.".to_string(),
                "Hover a marker to see where it leads.".to_string(),
            ],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ViewerConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dome_diameter.is_finite() && self.dome_diameter > 0.0) {
            return Err(ConfigError::Invalid {
                field: "dome_diameter",
                reason: "must be positive",
            });
        }
        // Buttons must sit inside the dome to be visible.
        if !(self.button_distance_ratio > 0.0 && self.button_distance_ratio < 0.5) {
            return Err(ConfigError::Invalid {
                field: "button_distance_ratio",
                reason: "must lie in (0, 0.5)",
            });
        }
        if !(self.button_size_ratio > 0.0 && self.button_size_ratio.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "button_size_ratio",
                reason: "must be positive",
            });
        }
        if !(self.fov_horizontal > 0.0 && self.fov_horizontal < PI) {
            return Err(ConfigError::Invalid {
                field: "fov_horizontal",
                reason: "must lie in (0, pi)",
            });
        }
        Ok(())
    }

    pub fn button_distance(&self) -> f64 {
        self.dome_diameter * self.button_distance_ratio
    }

    pub fn button_size(&self) -> f64 {
        self.dome_diameter * self.button_size_ratio
    }

    pub fn asset(&self, path: &str) -> String {
        join_asset_path(&self.asset_root, path)
    }

    pub fn button_style(&self) -> ButtonStyleSet {
        ButtonStyleSet {
            default_texture: self.asset(&self.button_texture),
            active_texture: self.asset(&self.button_active_texture),
            size: self.button_size(),
            caption_size: self.caption_size,
            tooltip_offset_y: self.tooltip_offset_y,
        }
    }
}
