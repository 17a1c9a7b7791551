//! Layout engine: preset rows to absolute pixel geometry
//!
//! Every row is scaled relative to the smallest segment size in the
//! preset, measured by ink, and then justified so that all rows share one
//! edge-to-edge width:
//!
//! - rows of plain text spread the leftover width as letter spacing
//!   between every pair of characters
//! - rows with a placeholder hand the leftover width to the placeholder's
//!   redaction box, and justify the replacement text inside the box
//!
//! Geometry depends only on the preset, the substitutions, the options and
//! the fonts. Colors never reach this module.

use crate::{
    error::{ConfigError, Result},
    metrics::{self, char_count},
    preset::{Preset, Segment, Substitutions},
    traits::TextContext,
    FaceSpec, FontSpec, Rect, TextMetrics,
};

/// Padding between segments and between rows, as a fraction of font size
pub const DEFAULT_PADDING_RATIO: f32 = 0.08;

/// Margin around placeholder text inside its box, as a fraction of font size
pub const DEFAULT_BOX_PADDING_RATIO: f32 = 0.08;

/// How a preset should be laid out
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Pixel size of the smallest row; None renders relative sizes 1:1
    pub base_size: Option<f32>,
    pub padding_ratio: f32,
    pub box_padding_ratio: f32,
    /// Display face every row is set in
    pub face: FaceSpec,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            base_size: None,
            padding_ratio: DEFAULT_PADDING_RATIO,
            box_padding_ratio: DEFAULT_BOX_PADDING_RATIO,
            face: FaceSpec::default(),
        }
    }
}

impl LayoutOptions {
    pub fn with_base_size(mut self, base_size: f32) -> Self {
        self.base_size = Some(base_size);
        self
    }
}

/// What a laid-out segment came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Placeholder { key: String },
}

/// One segment, positioned
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLayout {
    pub kind: SegmentKind,
    /// Text actually painted, after substitution
    pub text: String,
    /// Ink box of `text` without letter spacing
    pub metrics: TextMetrics,
    /// Measured width, including the box margin for placeholders
    pub natural_width: f32,
    /// Horizontal space the segment occupies once the row is justified
    pub width: f32,
    /// Left edge of the first character's ink
    pub x: f32,
    /// Baseline
    pub y: f32,
    /// Spacing to apply between this segment's characters while painting
    pub letter_spacing: f32,
    /// Filled box behind placeholder text
    pub redaction: Option<Rect>,
}

impl SegmentLayout {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, SegmentKind::Placeholder { .. })
    }

    /// Ink width once letter spacing is applied
    pub fn drawn_width(&self) -> f32 {
        let gaps = char_count(&self.text).saturating_sub(1) as f32;
        self.metrics.width() + gaps * self.letter_spacing
    }
}

/// One row, positioned
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub font: FontSpec,
    pub top: f32,
    pub height: f32,
    pub baseline: f32,
    /// Gap between segments, and below this row when another follows
    pub padding: f32,
    /// Margin inside redaction boxes
    pub box_padding: f32,
    /// Justification spacing for rows without a placeholder
    pub letter_spacing: f32,
    pub has_placeholder: bool,
    pub segments: Vec<SegmentLayout>,
}

impl RowLayout {
    /// Width before justification: measured segments plus padding
    pub fn natural_width(&self) -> f32 {
        natural_width(self.segments.iter().map(|s| s.natural_width), self.padding)
    }
}

/// Absolute geometry for one preset under one set of substitutions
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub rows: Vec<RowLayout>,
}

impl Layout {
    /// Lay out `preset`, measuring through `ctx`
    ///
    /// Fails only on malformed presets; measurement itself cannot fail.
    pub fn compute<C>(
        preset: &Preset,
        substitutions: &Substitutions,
        options: &LayoutOptions,
        ctx: &mut C,
    ) -> Result<Self>
    where
        C: TextContext + ?Sized,
    {
        let min_size = preset.min_size()?;
        let base_size = options.base_size.unwrap_or(min_size);
        if !base_size.is_finite() || base_size <= 0.0 {
            return Err(ConfigError::InvalidBaseSize(base_size).into());
        }

        // Pass 1: measure every segment at its row's size
        let mut measured = Vec::with_capacity(preset.rows.len());
        for (row_index, row) in preset.rows.iter().enumerate() {
            let relative = row.size().ok_or(ConfigError::EmptyRow { row: row_index })?;
            let font = options.face.at(relative / min_size * base_size);
            let padding = font.size * options.padding_ratio;
            let box_padding = font.size * options.box_padding_ratio;

            let segments = row
                .segments
                .iter()
                .map(|segment| {
                    let text = segment.resolve(substitutions).to_string();
                    let metrics = metrics::measure(&mut *ctx, &text, &font);
                    let natural = match segment {
                        Segment::Text { .. } => metrics.width(),
                        Segment::Placeholder { .. } => metrics.width() + 2.0 * box_padding,
                    };
                    Measured {
                        kind: match segment {
                            Segment::Text { .. } => SegmentKind::Text,
                            Segment::Placeholder { key, .. } => {
                                SegmentKind::Placeholder { key: key.clone() }
                            },
                        },
                        text,
                        metrics,
                        natural,
                    }
                })
                .collect::<Vec<_>>();

            measured.push(MeasuredRow {
                font,
                padding,
                box_padding,
                segments,
            });
        }

        // Pass 2: the widest row sets the canvas width
        let width = measured
            .iter()
            .map(|row| natural_width(row.segments.iter().map(|s| s.natural), row.padding))
            .fold(0.0f32, f32::max);

        // Pass 3: place rows top to bottom and justify each one
        let mut rows = Vec::with_capacity(measured.len());
        let mut top = 0.0f32;
        let last = measured.len().saturating_sub(1);
        for (index, row) in measured.into_iter().enumerate() {
            let placed = row.place(top, width);
            top += placed.height;
            if index < last {
                top += placed.padding;
            }
            rows.push(placed);
        }

        let layout = Layout {
            width,
            height: top,
            rows,
        };
        log::debug!(
            "Layout: {} rows, {:.2}x{:.2} (base size {})",
            layout.rows.len(),
            layout.width,
            layout.height,
            base_size
        );
        Ok(layout)
    }

    /// Surface size in whole pixels, never smaller than 1x1
    ///
    /// Rounds up, ignoring float noise of a thousandth of a pixel.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |v: f32| ((v - 1e-3).ceil().max(1.0)) as u32;
        (px(self.width), px(self.height))
    }

    /// Every placeholder segment, in reading order
    pub fn placeholders(&self) -> impl Iterator<Item = &SegmentLayout> {
        self.rows
            .iter()
            .flat_map(|row| row.segments.iter())
            .filter(|s| s.is_placeholder())
    }
}

struct Measured {
    kind: SegmentKind,
    text: String,
    metrics: TextMetrics,
    natural: f32,
}

struct MeasuredRow {
    font: FontSpec,
    padding: f32,
    box_padding: f32,
    segments: Vec<Measured>,
}

fn natural_width(widths: impl ExactSizeIterator<Item = f32>, padding: f32) -> f32 {
    let gaps = widths.len().saturating_sub(1) as f32;
    widths.sum::<f32>() + padding * gaps
}

impl MeasuredRow {
    fn place(self, top: f32, canvas_width: f32) -> RowLayout {
        let has_placeholder = self
            .segments
            .iter()
            .any(|s| matches!(s.kind, SegmentKind::Placeholder { .. }));
        let ascent = self
            .segments
            .iter()
            .map(|s| s.metrics.ascent)
            .fold(0.0f32, f32::max);
        let descent = self
            .segments
            .iter()
            .map(|s| s.metrics.descent)
            .fold(0.0f32, f32::max);

        let inset = if has_placeholder { self.box_padding } else { 0.0 };
        let height = ascent + descent + 2.0 * inset;
        let baseline = top + inset + ascent;

        let (letter_spacing, segments) = if has_placeholder {
            (0.0, self.place_with_placeholder(top, height, baseline, canvas_width))
        } else {
            self.place_justified(baseline, canvas_width)
        };

        RowLayout {
            font: self.font,
            top,
            height,
            baseline,
            padding: self.padding,
            box_padding: self.box_padding,
            letter_spacing,
            has_placeholder,
            segments,
        }
    }

    /// Spread the row's leftover width between every pair of characters
    fn place_justified(&self, baseline: f32, canvas_width: f32) -> (f32, Vec<SegmentLayout>) {
        let glyph_width: f32 = self.segments.iter().map(|s| s.metrics.width()).sum();
        let chars: usize = self.segments.iter().map(|s| char_count(&s.text)).sum();

        // A lone character has no gap to stretch
        if chars < 2 {
            let mut x = 0.0;
            let placed = self
                .segments
                .iter()
                .map(|s| {
                    let seg = self.segment(s, x, baseline, 0.0, None);
                    x += s.natural + self.padding;
                    seg
                })
                .collect();
            return (0.0, placed);
        }

        let spacing = (canvas_width - glyph_width) / (chars - 1) as f32;
        let mut x = 0.0;
        let placed = self
            .segments
            .iter()
            .map(|s| {
                let mut seg = self.segment(s, x, baseline, spacing, None);
                seg.width = seg.drawn_width();
                // The gap after a segment's last character is a letter gap too
                x += s.metrics.width() + char_count(&s.text) as f32 * spacing;
                seg
            })
            .collect();
        (spacing, placed)
    }

    /// Give the leftover width to the placeholder boxes
    ///
    /// Each box keeps its natural width and takes an equal share of what
    /// the row leaves over, so no box is ever narrower than its text.
    fn place_with_placeholder(
        &self,
        top: f32,
        height: f32,
        baseline: f32,
        canvas_width: f32,
    ) -> Vec<SegmentLayout> {
        let natural: f32 = self.segments.iter().map(|s| s.natural).sum();
        let gaps = self.segments.len().saturating_sub(1) as f32;
        let boxes = self
            .segments
            .iter()
            .filter(|s| s.kind != SegmentKind::Text)
            .count()
            .max(1) as f32;
        let share = ((canvas_width - natural - self.padding * gaps) / boxes).max(0.0);

        let mut x = 0.0;
        self.segments
            .iter()
            .map(|s| {
                let seg = match s.kind {
                    SegmentKind::Text => {
                        let seg = self.segment(s, x, baseline, 0.0, None);
                        x += s.natural;
                        seg
                    },
                    SegmentKind::Placeholder { .. } => {
                        let flex = s.natural + share;
                        let chars = char_count(&s.text);
                        let spacing = if chars < 2 {
                            0.0
                        } else {
                            (flex - s.metrics.width() - 2.0 * self.box_padding)
                                / (chars - 1) as f32
                        };
                        let redaction = Rect::new(x, top, flex, height);
                        let mut seg = self.segment(
                            s,
                            x + self.box_padding,
                            baseline,
                            spacing,
                            Some(redaction),
                        );
                        seg.width = flex;
                        x += flex;
                        seg
                    },
                };
                x += self.padding;
                seg
            })
            .collect()
    }

    fn segment(
        &self,
        s: &Measured,
        x: f32,
        y: f32,
        letter_spacing: f32,
        redaction: Option<Rect>,
    ) -> SegmentLayout {
        SegmentLayout {
            kind: s.kind.clone(),
            text: s.text.clone(),
            metrics: s.metrics,
            natural_width: s.natural,
            width: s.natural,
            x,
            y,
            letter_spacing,
            redaction,
        }
    }
}
