//! Text metrics: tight ink boxes instead of advance widths
//!
//! Layout packs segments by what is actually inked, not by the font's
//! advance metrics, so side bearings never show up as stray gaps.

use kurbo::{Affine, Shape};

use crate::{
    traits::{with_letter_spacing, TextContext},
    FontBook, FontSpec, TextMetrics,
};

/// Measure `text` in `font` on `ctx`
///
/// Selects the font first, then measures with letter spacing scoped to
/// zero so leftover context state never leaks into layout.
pub fn measure<C>(ctx: &mut C, text: &str, font: &FontSpec) -> TextMetrics
where
    C: TextContext + ?Sized,
{
    ctx.set_font(font);
    with_letter_spacing(ctx, 0.0, |ctx| ctx.measure_text(text))
}

/// Number of characters justification distributes spacing between
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Union of glyph outline boxes laid along the pen
///
/// Each character advances the pen by its advance plus `letter_spacing`.
/// Characters without ink only move the pen. Returns an empty box when the
/// whole string is uninked.
pub fn ink_box(book: &FontBook, font: &FontSpec, text: &str, letter_spacing: f32) -> TextMetrics {
    let face = font.face();
    let mut pen = 0.0f64;
    let mut bounds: Option<kurbo::Rect> = None;

    for ch in text.chars() {
        let glyph = book.glyph(&face, ch, font.size);
        if !glyph.path.elements().is_empty() {
            let placed = Affine::translate((pen, 0.0)) * glyph.path;
            let bbox = placed.bounding_box();
            if bbox.width() > 0.0 || bbox.height() > 0.0 {
                bounds = Some(match bounds {
                    Some(acc) => acc.union(bbox),
                    None => bbox,
                });
            }
        }
        pen += glyph.advance as f64 + letter_spacing as f64;
    }

    match bounds {
        // Outlines are y-up: ascent is the top edge, descent the bottom
        Some(b) => TextMetrics {
            left: -b.x0 as f32,
            right: b.x1 as f32,
            ascent: b.y1 as f32,
            descent: -b.y0 as f32,
        },
        None => TextMetrics::default(),
    }
}
