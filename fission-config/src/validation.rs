//! Custom validation functions for configuration.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::render::RenderConfig;
use crate::simulation::ProbabilityConfig;

/// Tolerance when checking that reaction probabilities add up to one.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-9;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new("^#[0-9a-fA-F]{6}$").unwrap();
}

/// Absorbed, fission and escape must cover the whole unit interval.
pub fn validate_probability_sum(p: &ProbabilityConfig) -> Result<(), ValidationError> {
    let sum = p.absorbed + p.fission + p.escape;
    if (sum - 1.0).abs() <= PROBABILITY_SUM_TOLERANCE {
        Ok(())
    } else {
        let mut err = ValidationError::new("probability_sum");
        err.message = Some(format!("reaction probabilities sum to {sum}, expected 1.0").into());
        Err(err)
    }
}

/// Colours are `#rrggbb`.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR.is_match(color) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_hex_color"))
    }
}

/// Padding on both sides must leave room to draw.
pub fn validate_plot_area(render: &RenderConfig) -> Result<(), ValidationError> {
    let reserved = render.padding.saturating_mul(2);
    if reserved < render.width && reserved < render.height {
        Ok(())
    } else {
        Err(ValidationError::new("padding_exceeds_surface"))
    }
}
