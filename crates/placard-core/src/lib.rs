//! Placard Core: from preset rows to pixel geometry
//!
//! A preset is a handful of rows, each row a few text or placeholder
//! segments with relative sizes. This crate turns that description, plus
//! the user's placeholder substitutions, into absolute pixel geometry that a
//! raster backend can paint.
//!
//! ## The Pieces
//!
//! 1. **Model** - [`preset`] holds presets, rows, segments and substitutions
//! 2. **Fonts** - [`traits::Face`] supplies outlines, [`FontBook`] picks one
//! 3. **Metrics** - [`metrics::measure`] asks a [`traits::TextContext`] for a tight ink box
//! 4. **Layout** - [`Layout::compute`] scales, measures and justifies every row
//!
//! ## Laying Out a Preset
//!
//! ```rust,no_run
//! use placard_core::{Layout, LayoutOptions, Preset, Substitutions};
//! # use placard_core::traits::TextContext;
//! # fn context() -> Box<dyn TextContext> { unimplemented!() }
//! # fn preset() -> Preset { unimplemented!() }
//!
//! let mut ctx = context();
//! let mut subs = Substitutions::new();
//! subs.insert("oshi", "Mio");
//!
//! let layout = Layout::compute(&preset(), &subs, &LayoutOptions::default(), ctx.as_mut())?;
//! println!("canvas {}x{}", layout.width, layout.height);
//! # Ok::<(), placard_core::PlacardError>(())
//! ```

pub mod error;
pub mod font_book;
pub mod layout;
pub mod metrics;
pub mod preset;
pub mod traits;

pub use error::{PlacardError, Result};
pub use font_book::FontBook;
pub use layout::{Layout, LayoutOptions, RowLayout, SegmentKind, SegmentLayout};
pub use preset::{Preset, Row, Segment, Substitutions};
pub use traits::{Exporter, Face, GlyphOutline, TextContext};

/// Family of the bold display face presets are designed for
pub const DEFAULT_FAMILY: &str = "Meiryo";

/// Bold weight class
pub const BOLD: u16 = 700;

/// A typeface request without a size
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceSpec {
    pub family: String,
    pub weight: u16,
}

impl FaceSpec {
    pub fn new(family: impl Into<String>, weight: u16) -> Self {
        Self {
            family: family.into(),
            weight,
        }
    }

    /// Attach a pixel size
    pub fn at(&self, size: f32) -> FontSpec {
        FontSpec {
            family: self.family.clone(),
            weight: self.weight,
            size,
        }
    }
}

impl Default for FaceSpec {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILY, BOLD)
    }
}

/// The font selected on a text context: family, weight and pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub weight: u16,
    pub size: f32,
}

impl FontSpec {
    pub fn face(&self) -> FaceSpec {
        FaceSpec::new(self.family.clone(), self.weight)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        FaceSpec::default().at(16.0)
    }
}

/// Tight ink box of a measured string
///
/// Horizontal extents are measured from the pen origin, vertical extents
/// from the baseline. Each is positive in its own direction, so the box
/// spans `[-left, right]` by `[-ascent, descent]` in y-down coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub left: f32,
    pub right: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl TextMetrics {
    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }

    /// True for strings that put no ink on the surface
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Axis-aligned rectangle in surface pixels (y down)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

/// Raw pixels handed to the export collaborator
///
/// Always straight (non-premultiplied) RGBA, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl BitmapData {
    /// True if no pixel has any coverage
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }
}
