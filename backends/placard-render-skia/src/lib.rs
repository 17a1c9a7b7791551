//! Skia Renderer - paints Placard layouts with tiny-skia
//!
//! Geometry arrives fully decided in a [`placard_core::Layout`]; this crate
//! only turns it into pixels:
//!
//! 1. Size the [`Canvas`] to the layout (which clears it)
//! 2. Flood the background, if the style has one
//! 3. Paint text rows with their justification spacing
//! 4. Paint each placeholder as a solid box with its text cut out
//!
//! The cut-out text is painted in the background color when there is one.
//! Without a background it is XORed out of the box, or erased outright when
//! transparent placeholders are requested, so the surface shows through.

mod canvas;

pub use canvas::{Canvas, CompositeMode, MAX_SIZE};

use placard_core::{
    error::Result,
    traits::{with_letter_spacing, TextContext},
    Color, Layout, SegmentLayout,
};

/// Colors and cut-out behavior for one paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintStyle {
    pub foreground: Color,
    /// None leaves the surface transparent behind the text
    pub background: Option<Color>,
    /// Erase placeholder text to full transparency, even over a background
    pub transparent_placeholder: bool,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            foreground: Color::black(),
            background: None,
            transparent_placeholder: false,
        }
    }
}

impl PaintStyle {
    /// How placeholder text is cut out of its box
    fn cutout(&self) -> (Color, CompositeMode) {
        match (self.transparent_placeholder, self.background) {
            (true, _) => (self.foreground, CompositeMode::DestinationOut),
            (false, Some(background)) => (background, CompositeMode::SourceOver),
            (false, None) => (self.foreground, CompositeMode::Xor),
        }
    }
}

/// Paints layouts onto a [`Canvas`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SkiaRenderer;

impl SkiaRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "skia"
    }

    /// Paint `layout` from scratch
    ///
    /// Same layout and style in, same pixels out: the canvas is resized
    /// (and so cleared) every time, and letter spacing is reset after each
    /// segment.
    pub fn paint(&self, canvas: &mut Canvas, layout: &Layout, style: &PaintStyle) -> Result<()> {
        let (width, height) = layout.pixel_size();
        canvas.resize(width, height)?;
        if let Some(background) = style.background {
            canvas.fill(background);
        }

        let (cutout_color, cutout_mode) = style.cutout();
        for row in &layout.rows {
            canvas.set_font(&row.font);
            for segment in &row.segments {
                match segment.redaction {
                    Some(rect) => {
                        canvas.fill_rect(rect, style.foreground, CompositeMode::SourceOver);
                        draw_segment(canvas, segment, cutout_color, cutout_mode)?;
                    },
                    None => {
                        draw_segment(canvas, segment, style.foreground, CompositeMode::SourceOver)?
                    },
                }
            }
        }

        log::debug!(
            "Skia: painted {} rows onto {}x{}",
            layout.rows.len(),
            width,
            height
        );
        Ok(())
    }
}

fn draw_segment(
    canvas: &mut Canvas,
    segment: &SegmentLayout,
    color: Color,
    mode: CompositeMode,
) -> Result<()> {
    // Layout positions the ink edge; the pen sits `left` further in
    let pen = segment.x + segment.metrics.left;
    with_letter_spacing(canvas, segment.letter_spacing, |c| {
        c.fill_text(&segment.text, pen, segment.y, color, mode)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutout_selection() {
        let fg = Color::black();
        let bg = Color::white();
        let style = |background, transparent_placeholder| PaintStyle {
            foreground: fg,
            background,
            transparent_placeholder,
        };

        assert_eq!(style(None, false).cutout(), (fg, CompositeMode::Xor));
        assert_eq!(
            style(Some(bg), false).cutout(),
            (bg, CompositeMode::SourceOver)
        );
        assert_eq!(
            style(Some(bg), true).cutout(),
            (fg, CompositeMode::DestinationOut)
        );
        assert_eq!(style(None, true).cutout().1, CompositeMode::DestinationOut);
    }

    #[test]
    fn test_renderer_name() {
        assert_eq!(SkiaRenderer::new().name(), "skia");
    }
}
