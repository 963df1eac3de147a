//! ## fission-render::histogram
//! **Generation histogram**
//!
//! Linear mapping from neutron counts to bar heights. The tallest
//! generation fills the plot area; every other generation gets at least a
//! one pixel sliver so it stays visible.

use tracing::debug;

use crate::surface::{Color, Surface};

pub const DEFAULT_PADDING: u32 = 40;
pub const X_AXIS_LABEL: &str = "Generation";
pub const Y_AXIS_LABEL: &str = "Neutrons";

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramStyle {
    pub padding: u32,
    pub bar_color: Color,
    pub label_color: Color,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            bar_color: Color::BLUE,
            label_color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Bar geometry for one surface size.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramLayout {
    pub bar_width: f64,
    pub available_height: u32,
    pub max_value: u64,
    pub bars: Vec<Bar>,
}

/// Computes bar placement, or `None` when there is nothing to draw
/// (no generations, or every generation is zero).
pub fn layout(counts: &[u64], width: u32, height: u32, padding: u32) -> Option<HistogramLayout> {
    if counts.is_empty() {
        return None;
    }
    let max_value = counts.iter().copied().max().unwrap_or(0);
    if max_value == 0 {
        return None;
    }

    let reserved = padding.saturating_mul(2);
    let available_width = width.saturating_sub(reserved);
    let available_height = height.saturating_sub(reserved);
    let bar_width = f64::from(available_width) / counts.len() as f64;
    let baseline = i64::from(height) - i64::from(padding);

    let bars = counts
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let scaled = (value as f64 / max_value as f64 * f64::from(available_height)).round();
            let bar_height = (scaled as u32).max(1);
            Bar {
                x: (f64::from(padding) + i as f64 * bar_width) as i32,
                y: (baseline - i64::from(bar_height)) as i32,
                width: bar_width.max(1.0) as u32,
                height: bar_height,
            }
        })
        .collect();

    Some(HistogramLayout {
        bar_width,
        available_height,
        max_value,
        bars,
    })
}

/// Draws the histogram with the default style.
pub fn render<S: Surface + ?Sized>(surface: &mut S, counts: &[u64], width: u32, height: u32) {
    render_with_style(surface, counts, width, height, &HistogramStyle::default());
}

/// Draws one bar per generation plus the two axis labels.
///
/// Nothing at all is drawn for an empty or all-zero sequence.
pub fn render_with_style<S: Surface + ?Sized>(
    surface: &mut S,
    counts: &[u64],
    width: u32,
    height: u32,
    style: &HistogramStyle,
) {
    debug!(width, height, bars = counts.len(), "rendering histogram");

    let Some(layout) = layout(counts, width, height, style.padding) else {
        return;
    };
    debug!(
        bar_width = layout.bar_width,
        available_height = layout.available_height,
        max_value = layout.max_value,
        "histogram geometry"
    );

    for bar in &layout.bars {
        surface.fill_rect(bar.x, bar.y, bar.width, bar.height, style.bar_color);
    }

    let (w, h, p) = (width as i32, height as i32, style.padding as i32);
    surface.draw_text(w / 2 - 30, h - 10, X_AXIS_LABEL, style.label_color);
    surface.draw_text(10, p - 10, Y_AXIS_LABEL, style.label_color);
}
