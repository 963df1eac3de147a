//! Histogram surface settings.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(default)]
#[validate(schema(function = validation::validate_plot_area))]
pub struct RenderConfig {
    /// Surface width in pixels.
    #[validate(range(min = 100, max = 10_000))]
    pub width: u32,

    /// Surface height in pixels.
    #[validate(range(min = 100, max = 10_000))]
    pub height: u32,

    /// Margin kept free on every edge.
    pub padding: u32,

    #[validate(custom(function = validation::validate_hex_color))]
    pub bar_color: String,

    #[validate(custom(function = validation::validate_hex_color))]
    pub label_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            padding: 40,
            bar_color: "#0000ff".into(),
            label_color: "#000000".into(),
        }
    }
}
