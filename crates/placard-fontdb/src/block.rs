//! The face of last resort

use kurbo::BezPath;
use placard_core::{traits::Face, GlyphOutline};

/// Draws every visible character as a solid block
///
/// Maps every character, so a font book ending in a `BlockFace` never
/// drops text: glyph boxes are 1em wide with ink from 0.05em to 0.95em,
/// rising 0.88em above the baseline and 0.12em below it. Whitespace and
/// control characters advance half an em without ink.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFace;

impl BlockFace {
    pub const FAMILY: &'static str = "Placard Block";
}

impl Face for BlockFace {
    fn family(&self) -> &str {
        Self::FAMILY
    }

    fn weight(&self) -> u16 {
        placard_core::BOLD
    }

    fn glyph(&self, ch: char, size: f32) -> Option<GlyphOutline> {
        if ch.is_whitespace() || ch.is_control() {
            return Some(GlyphOutline::blank(size * 0.5));
        }

        let s = size as f64;
        let mut path = BezPath::new();
        path.move_to((0.05 * s, -0.12 * s));
        path.line_to((0.95 * s, -0.12 * s));
        path.line_to((0.95 * s, 0.88 * s));
        path.line_to((0.05 * s, 0.88 * s));
        path.close_path();

        Some(GlyphOutline {
            advance: size,
            path,
        })
    }
}
