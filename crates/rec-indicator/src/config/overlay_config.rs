use crate::{
    config::{default_margin, default_opacity},
    overlay::Corner,
};

use serde::{Deserialize, Serialize};

/// Overlay window placement and look.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Screen corner the overlay sits in.
    #[serde(default)]
    pub corner: Corner,
    /// Gap between the overlay and the screen edges, in physical pixels.
    #[serde(default = "default_margin")]
    pub margin: u32,
    /// Overlay opacity, 0.0 to 1.0.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            corner: Corner::default(),
            margin: default_margin(),
            opacity: default_opacity(),
        }
    }
}
