//! Drawing surface contract for the confetti layer.
//!
//! The core never talks to a canvas directly. The web crate implements this
//! trait on top of `CanvasRenderingContext2d`; tests use a recording surface.

use std::fmt;

/// HSL colour, rendered as a CSS `hsl()` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees [0, 360).
    pub hue: f32,
    /// Saturation in percent.
    pub saturation: f32,
    /// Lightness in percent.
    pub lightness: f32,
}

impl Hsl {
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self { hue, saturation, lightness }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Immediate-mode 2D surface, mirroring the subset of Canvas2D the confetti uses.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> f32;

    /// Surface height in pixels.
    fn height(&self) -> f32;

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    /// Set the fill colour for subsequent rects.
    fn set_fill(&mut self, color: Hsl);

    /// Set the global opacity for subsequent draws.
    fn set_alpha(&mut self, alpha: f32);

    /// Fill an axis-aligned rect.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
}

/// A surface that records every call, for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<DrawCall>,
    alpha: f32,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Fill(Hsl),
    Alpha(f32),
    Rect { x: f32, y: f32, size: f32, alpha: f32 },
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, calls: Vec::new(), alpha: 1.0 }
    }

    /// Rects drawn since the last clear.
    pub fn rects_since_clear(&self) -> Vec<&DrawCall> {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .map_or(0, |i| i + 1);
        self.calls[start..]
            .iter()
            .filter(|c| matches!(c, DrawCall::Rect { .. }))
            .collect()
    }

    pub fn current_alpha(&self) -> f32 {
        self.alpha
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn set_fill(&mut self, color: Hsl) {
        self.calls.push(DrawCall::Fill(color));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.calls.push(DrawCall::Alpha(alpha));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, _h: f32) {
        self.calls.push(DrawCall::Rect { x, y, size: w, alpha: self.alpha });
    }
}
