//! A tiny-skia surface that behaves like a 2D text canvas

use kurbo::{BezPath, PathEl};
use placard_core::{
    error::{RenderError, Result},
    metrics::ink_box,
    traits::TextContext,
    BitmapData, Color, FontBook, FontSpec, Rect, TextMetrics,
};
use tiny_skia::{BlendMode, FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Largest surface edge we agree to allocate
pub const MAX_SIZE: u32 = 16384;

/// How new paint combines with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over
    #[default]
    SourceOver,
    /// Erase wherever the new paint lands
    DestinationOut,
    /// Keep only where exactly one of old and new has coverage
    Xor,
}

impl CompositeMode {
    fn blend_mode(self) -> BlendMode {
        match self {
            Self::SourceOver => BlendMode::SourceOver,
            Self::DestinationOut => BlendMode::DestinationOut,
            Self::Xor => BlendMode::Xor,
        }
    }
}

/// Raster surface with a selected font and letter spacing
///
/// Font and spacing are sticky state, like on a browser canvas; the
/// painter scopes spacing with [`placard_core::traits::with_letter_spacing`].
pub struct Canvas {
    pixmap: Pixmap,
    book: FontBook,
    font: FontSpec,
    letter_spacing: f32,
}

impl Canvas {
    /// A transparent canvas drawing with `book`
    pub fn new(book: FontBook, width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            pixmap: new_pixmap(width, height)?,
            book,
            font: FontSpec::default(),
            letter_spacing: 0.0,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Swap the faces text is drawn with; the surface is left alone
    pub fn set_book(&mut self, book: FontBook) {
        self.book = book;
    }

    /// Reallocate the surface
    ///
    /// Always clears, even when the size does not change.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.pixmap = new_pixmap(width, height)?;
        Ok(())
    }

    /// Flood the whole surface with `color`
    pub fn fill(&mut self, color: Color) {
        self.pixmap.fill(tiny_skia::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    /// Fill a rectangle; empty or inverted rectangles draw nothing
    pub fn fill_rect(&mut self, rect: Rect, color: Color, mode: CompositeMode) {
        let Some(r) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            log::debug!("Canvas: skipped degenerate rect {:?}", rect);
            return;
        };
        self.pixmap
            .fill_rect(r, &paint(color, mode), Transform::identity(), None);
    }

    /// Draw `text` with its pen starting at `(x, baseline)`
    ///
    /// Uses the selected font and letter spacing: each character moves the
    /// pen by its advance plus the spacing.
    pub fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        baseline: f32,
        color: Color,
        mode: CompositeMode,
    ) -> Result<()> {
        let face = self.font.face();
        let paint = paint(color, mode);
        let mut pen = x;

        for ch in text.chars() {
            let glyph = self.book.glyph(&face, ch, self.font.size);
            if !glyph.path.elements().is_empty() {
                let path = to_skia_path(&glyph.path)?;
                // Outlines are y-up; flip onto the y-down surface at the pen
                let transform = Transform::from_row(1.0, 0.0, 0.0, -1.0, pen, baseline);
                self.pixmap
                    .fill_path(&path, &paint, FillRule::Winding, transform, None);
            }
            pen += glyph.advance + self.letter_spacing;
        }

        Ok(())
    }

    /// Straight-alpha color of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(px.red(), px.green(), px.blue(), px.alpha()))
    }

    /// True if no pixel has any coverage
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|px| px.alpha() == 0)
    }

    /// Copy the surface out as straight RGBA
    pub fn to_bitmap(&self) -> BitmapData {
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        BitmapData {
            width: self.pixmap.width(),
            height: self.pixmap.height(),
            data,
        }
    }
}

impl TextContext for Canvas {
    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
    }

    fn font(&self) -> &FontSpec {
        &self.font
    }

    fn letter_spacing(&self) -> f32 {
        self.letter_spacing
    }

    fn set_letter_spacing(&mut self, spacing: f32) {
        self.letter_spacing = spacing;
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        ink_box(&self.book, &self.font, text, self.letter_spacing)
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("font", &self.font)
            .field("letter_spacing", &self.letter_spacing)
            .finish()
    }
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    if width == 0 || height == 0 || width > MAX_SIZE || height > MAX_SIZE {
        return Err(RenderError::InvalidDimensions { width, height }.into());
    }
    Ok(Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?)
}

fn paint(color: Color, mode: CompositeMode) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: true,
        blend_mode: mode.blend_mode(),
        ..Default::default()
    };
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint
}

/// Translate kurbo's path format into tiny-skia's
fn to_skia_path(path: &BezPath) -> Result<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder
        .finish()
        .ok_or_else(|| RenderError::PathBuildingFailed.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use placard_core::{traits::Face, GlyphOutline};
    use std::sync::Arc;

    /// Fills the whole em box above the baseline
    struct Solid;

    impl Face for Solid {
        fn family(&self) -> &str {
            "Solid"
        }

        fn weight(&self) -> u16 {
            700
        }

        fn glyph(&self, _ch: char, size: f32) -> Option<GlyphOutline> {
            let s = size as f64;
            let mut path = BezPath::new();
            path.move_to((0.0, 0.0));
            path.line_to((s, 0.0));
            path.line_to((s, s));
            path.line_to((0.0, s));
            path.close_path();
            Some(GlyphOutline {
                advance: size,
                path,
            })
        }
    }

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas::new(FontBook::new(Arc::new(Solid)), width, height).unwrap()
    }

    #[test]
    fn test_resize_clears_and_validates() {
        let mut c = canvas(4, 4);
        c.fill(Color::black());
        assert!(!c.is_blank());
        c.resize(4, 4).unwrap();
        assert!(c.is_blank());
        assert!(c.resize(0, 4).is_err());
        assert!(c.resize(MAX_SIZE + 1, 1).is_err());
    }

    #[test]
    fn test_text_sits_on_baseline() {
        let mut c = canvas(20, 20);
        c.set_font(&FontSpec {
            family: "Solid".into(),
            weight: 700,
            size: 10.0,
        });
        c.fill_text("a", 0.0, 15.0, Color::black(), CompositeMode::SourceOver)
            .unwrap();
        assert_eq!(c.pixel(5, 10).map(|p| p.a), Some(255));
        assert_eq!(c.pixel(5, 17).map(|p| p.a), Some(0));
        assert_eq!(c.pixel(5, 3).map(|p| p.a), Some(0));
    }

    #[test]
    fn test_letter_spacing_moves_pen() {
        let mut c = canvas(40, 10);
        c.set_font(&FontSpec {
            family: "Solid".into(),
            weight: 700,
            size: 10.0,
        });
        c.set_letter_spacing(10.0);
        c.fill_text("ab", 0.0, 10.0, Color::black(), CompositeMode::SourceOver)
            .unwrap();
        assert_eq!(c.pixel(15, 5).map(|p| p.a), Some(0));
        assert_eq!(c.pixel(25, 5).map(|p| p.a), Some(255));
    }

    #[test]
    fn test_composite_modes_cut_out() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        let mut c = canvas(10, 10);
        c.fill_rect(rect, Color::black(), CompositeMode::SourceOver);
        c.fill_rect(rect, Color::white(), CompositeMode::DestinationOut);
        assert!(c.is_blank());

        let mut c = canvas(10, 10);
        c.fill_rect(rect, Color::black(), CompositeMode::SourceOver);
        c.fill_rect(rect, Color::black(), CompositeMode::Xor);
        assert!(c.is_blank());
    }

    #[test]
    fn test_bitmap_is_straight_alpha() {
        let mut c = canvas(2, 1);
        c.fill(Color::rgba(255, 0, 0, 128));
        let bitmap = c.to_bitmap();
        assert_eq!(bitmap.width, 2);
        assert_eq!(bitmap.data.len(), 8);
        assert_eq!(bitmap.data[0], 255);
        assert_eq!(bitmap.data[3], 128);
    }
}
