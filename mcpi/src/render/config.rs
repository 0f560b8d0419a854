//! Renderer configuration

use serde::{Deserialize, Serialize};

/// Configuration for the PNG renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width and height of the square image in pixels (20cm at 96dpi)
    #[serde(rename = "size-px")]
    pub size_px: u32,

    /// Radius of a plotted point in pixels (0 draws a single pixel)
    #[serde(rename = "point-radius-px")]
    pub point_radius_px: u32,

    /// Margin between the image border and the plot area in pixels
    #[serde(rename = "margin-px")]
    pub margin_px: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size_px: 756,
            point_radius_px: 1,
            margin_px: 24,
        }
    }
}
