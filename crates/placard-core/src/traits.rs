//! The contracts between layout, fonts and raster backends
//!
//! - [`Face`] - A source of glyph outlines and advances
//! - [`TextContext`] - A raster context that can select a font and measure text
//! - [`Exporter`] - Turns finished pixels into file bytes
//!
//! The layout engine only ever talks to a [`TextContext`], so it can run
//! against a real raster surface or a test double with fixed metrics.

use crate::{error::Result, BitmapData, FontSpec, TextMetrics};
use kurbo::BezPath;

/// One character's outline, scaled to pixels
///
/// The path is in font orientation: origin on the baseline at the pen
/// position, y pointing up.
#[derive(Debug, Clone)]
pub struct GlyphOutline {
    pub advance: f32,
    pub path: BezPath,
}

impl GlyphOutline {
    /// Outline with no ink, only an advance (spaces and friends)
    pub fn blank(advance: f32) -> Self {
        Self {
            advance,
            path: BezPath::new(),
        }
    }
}

/// A loaded typeface
///
/// ```ignore
/// struct MyFace;
///
/// impl Face for MyFace {
///     fn family(&self) -> &str { "My Face" }
///     fn weight(&self) -> u16 { 700 }
///     fn glyph(&self, ch: char, size: f32) -> Option<GlyphOutline> {
///         // None sends the lookup to the next face in the chain
///         None
///     }
/// }
/// ```
pub trait Face: Send + Sync {
    /// Family name used to match a [`FontSpec`]
    fn family(&self) -> &str;

    /// CSS-style weight class (400 regular, 700 bold)
    fn weight(&self) -> u16;

    /// Outline for `ch` at `size` pixels
    ///
    /// Returns None when the face has no glyph mapped for this character.
    fn glyph(&self, ch: char, size: f32) -> Option<GlyphOutline>;
}

/// A drawing context that can measure text in its current font
///
/// Mirrors the small part of a raster context that layout needs: font
/// selection, letter spacing and tight-box measurement. Letter spacing is
/// persistent context state, so use [`with_letter_spacing`] rather than
/// setting it by hand.
pub trait TextContext {
    /// Select the active font
    fn set_font(&mut self, font: &FontSpec);

    /// The active font
    fn font(&self) -> &FontSpec;

    /// Extra pixels inserted between consecutive characters
    fn letter_spacing(&self) -> f32;

    fn set_letter_spacing(&mut self, spacing: f32);

    /// Tight ink box of `text` in the active font and letter spacing
    fn measure_text(&self, text: &str) -> TextMetrics;
}

/// Run `f` with `spacing` applied, then reset the context to zero spacing
pub fn with_letter_spacing<C, R>(ctx: &mut C, spacing: f32, f: impl FnOnce(&mut C) -> R) -> R
where
    C: TextContext + ?Sized,
{
    ctx.set_letter_spacing(spacing);
    let result = f(ctx);
    ctx.set_letter_spacing(0.0);
    result
}

/// Encodes a finished surface for saving
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>>;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}
