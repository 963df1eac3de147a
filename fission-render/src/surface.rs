//! ## fission-render::surface
//! **Drawing targets**
//!
//! The histogram only ever needs two primitives, so that is all a
//! [`Surface`] has to provide. Two implementations ship here: an SVG
//! document builder and a recorder that keeps the calls for inspection.

use std::fmt::Write;
use std::str::FromStr;

use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = RenderError;

    /// Parses `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RenderError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Minimal 2D drawing target, in pixel coordinates with y growing downward.
pub trait Surface {
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color);

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        (**self).fill_rect(x, y, width, height, color)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        (**self).draw_text(x, y, text, color)
    }
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    FillRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
    },
}

#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::FillRect { .. } => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }
}

/// SVG document builder.
pub struct SvgSurface {
    pub width: u32,
    pub height: u32,
    background: Color,
    content: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
            content: String::with_capacity(16_384),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Completes the document.
    pub fn finish(&self) -> String {
        let mut svg = String::with_capacity(self.content.len() + 256);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        let _ = writeln!(
            svg,
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.width,
            self.height,
            self.background.to_hex()
        );
        svg.push_str(&self.content);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let _ = writeln!(
            self.content,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            x,
            y,
            width,
            height,
            color.to_hex()
        );
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        let _ = writeln!(
            self.content,
            r#"  <text x="{}" y="{}" fill="{}" font-family="sans-serif" font-size="12">{}</text>"#,
            x,
            y,
            color.to_hex(),
            escape_xml(text)
        );
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse() {
        assert_eq!("#0000ff".parse::<Color>().unwrap(), Color::BLUE);
        assert_eq!("#FFFFFF".parse::<Color>().unwrap(), Color::WHITE);
        assert!("0000ff".parse::<Color>().is_err());
        assert!("#00f".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert_eq!(Color::rgb(1, 2, 255).to_hex(), "#0102ff");
    }

    #[test]
    fn test_svg_surface_emits_elements() {
        let mut svg = SvgSurface::new(200, 100);
        svg.fill_rect(10, 20, 5, 30, Color::BLUE);
        svg.draw_text(3, 4, "a < b", Color::BLACK);
        let doc = svg.finish();

        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert!(doc.contains(r##"<rect x="10" y="20" width="5" height="30" fill="#0000ff"/>"##));
        assert!(doc.contains("a &lt; b"));
    }

    #[test]
    fn test_recording_surface_as_trait_object() {
        let mut recorder = RecordingSurface::new();
        {
            let surface: &mut dyn Surface = &mut recorder;
            surface.fill_rect(0, 0, 1, 1, Color::BLACK);
            surface.draw_text(0, 0, "hi", Color::BLACK);
        }
        assert_eq!(recorder.rects().count(), 1);
        assert_eq!(recorder.texts().collect::<Vec<_>>(), vec!["hi"]);
    }
}
