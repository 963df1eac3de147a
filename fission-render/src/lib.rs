//! # fission-render
//!
//! Draws a generation record as a bar histogram onto any [`Surface`].
//!
//! The renderer never owns the data: it borrows the frozen counts on every
//! call, so redrawing after a resize is just calling [`render`] again with
//! the new dimensions.

pub mod error;
pub mod histogram;
pub mod surface;

pub use error::RenderError;
pub use histogram::{layout, render, render_with_style, HistogramLayout, HistogramStyle};
pub use surface::{Color, DrawCommand, RecordingSurface, Surface, SvgSurface};
