//! Layout geometry against a face with fixed, predictable boxes

use std::sync::Arc;

use kurbo::BezPath;
use placard_core::{
    error::ConfigError,
    metrics::ink_box,
    traits::{with_letter_spacing, Face, TextContext},
    FontBook, FontSpec, GlyphOutline, Layout, LayoutOptions, PlacardError, Preset, Row, Segment,
    SegmentKind, Substitutions, TextMetrics,
};
use proptest::prelude::*;

const EPS: f32 = 1e-3;

/// Every inked character is the same box: 1em advance, ink from 0.05em to
/// 0.95em horizontally and from 0.12em below to 0.88em above the baseline
struct Blocks;

impl Face for Blocks {
    fn family(&self) -> &str {
        "Blocks"
    }

    fn weight(&self) -> u16 {
        700
    }

    fn glyph(&self, ch: char, size: f32) -> Option<GlyphOutline> {
        if ch.is_whitespace() {
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

struct BlockContext {
    book: FontBook,
    font: FontSpec,
    spacing: f32,
}

impl BlockContext {
    fn new() -> Self {
        Self {
            book: FontBook::new(Arc::new(Blocks)),
            font: FontSpec::default(),
            spacing: 0.0,
        }
    }
}

impl TextContext for BlockContext {
    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
    }

    fn font(&self) -> &FontSpec {
        &self.font
    }

    fn letter_spacing(&self) -> f32 {
        self.spacing
    }

    fn set_letter_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        ink_box(&self.book, &self.font, text, self.spacing)
    }
}

fn scenario() -> Preset {
    Preset::new(
        "AB C<X>",
        vec![
            Row::new(vec![Segment::text("AB", 100.0)]),
            Row::new(vec![
                Segment::text("C", 50.0),
                Segment::placeholder("X", "DEF", 50.0),
            ]),
        ],
    )
}

fn layout(preset: &Preset, subs: &Substitutions, options: &LayoutOptions) -> Layout {
    let mut ctx = BlockContext::new();
    Layout::compute(preset, subs, options, &mut ctx).unwrap()
}

fn assert_close(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}

/// Distance from the first ink to the last ink of a row, re-measuring each
/// segment with the spacing it is painted with
fn drawn_span(row: &placard_core::RowLayout) -> f32 {
    let mut ctx = BlockContext::new();
    ctx.set_font(&row.font);
    let right = row
        .segments
        .iter()
        .map(|s| {
            let m = with_letter_spacing(&mut ctx, s.letter_spacing, |c| c.measure_text(&s.text));
            s.x + m.width()
        })
        .fold(f32::MIN, f32::max);
    right - row.segments[0].x
}

#[test]
fn test_scenario_default_placeholder() {
    let options = LayoutOptions::default().with_base_size(50.0);
    let layout = layout(&scenario(), &Substitutions::new(), &options);

    assert_eq!(layout.rows.len(), 2);
    assert_close(layout.rows[0].font.size, 100.0, "row 1 font");
    assert_close(layout.rows[1].font.size, 50.0, "row 2 font");

    // "C" 45 + padding 4 + ("DEF" 145 + 2 * 4 box padding)
    assert_close(layout.width, 202.0, "canvas width");

    let first = &layout.rows[0];
    assert!(!first.has_placeholder);
    assert_close(first.letter_spacing, 12.0, "row 1 spacing");

    let second = &layout.rows[1];
    let placeholder = &second.segments[1];
    assert_eq!(placeholder.text, "DEF");
    assert_eq!(
        placeholder.kind,
        SegmentKind::Placeholder { key: "X".into() }
    );
    let rect = placeholder.redaction.unwrap();
    assert_close(rect.x, 49.0, "box x");
    assert_close(rect.width, 153.0, "box width");
    assert_close(rect.y, second.top, "box top");
    assert_close(rect.height, second.height, "box height");
    assert_close(placeholder.x, 53.0, "text x");
    assert_close(placeholder.letter_spacing, 0.0, "text spacing");
    assert_close(rect.right(), layout.width, "box reaches the right edge");
}

#[test]
fn test_scenario_single_character_substitution() {
    let options = LayoutOptions::default().with_base_size(50.0);
    let subs: Substitutions = [("X", "Y")].into_iter().collect();
    let layout = layout(&scenario(), &subs, &options);

    assert_close(layout.width, 190.0, "canvas width follows the widest row");
    let placeholder = &layout.rows[1].segments[1];
    assert_eq!(placeholder.text, "Y");
    assert_eq!(placeholder.letter_spacing, 0.0);

    let flex = layout.width - layout.rows[1].segments[0].natural_width - layout.rows[1].padding;
    assert_close(placeholder.redaction.unwrap().width, flex, "box spans flex space");
}

#[test]
fn test_vertical_geometry() {
    let options = LayoutOptions::default().with_base_size(50.0);
    let layout = layout(&scenario(), &Substitutions::new(), &options);

    let first = &layout.rows[0];
    assert_close(first.top, 0.0, "row 1 top");
    assert_close(first.height, 100.0, "row 1 height");
    assert_close(first.baseline, 88.0, "row 1 baseline");

    let second = &layout.rows[1];
    assert_close(second.top, 108.0, "row 2 top");
    assert_close(second.height, 58.0, "row 2 height includes the box margin");
    assert_close(second.baseline, 156.0, "row 2 baseline");

    let padded: f32 = layout.rows[..layout.rows.len() - 1]
        .iter()
        .map(|r| r.padding)
        .sum();
    let heights: f32 = layout.rows.iter().map(|r| r.height).sum();
    assert_close(layout.height, heights + padded, "canvas height");
    assert_eq!(layout.pixel_size(), (202, 166));
}

#[test]
fn test_base_size_defaults_to_one_to_one() {
    let layout = layout(&scenario(), &Substitutions::new(), &LayoutOptions::default());
    assert_close(layout.rows[0].font.size, 100.0, "row 1 font");
    assert_close(layout.rows[1].font.size, 50.0, "row 2 font");
}

#[test]
fn test_empty_substitution_matches_no_substitution() {
    let options = LayoutOptions::default().with_base_size(50.0);
    let none = layout(&scenario(), &Substitutions::new(), &options);
    let empty = layout(&scenario(), &[("X", "")].into_iter().collect(), &options);
    assert_eq!(none, empty);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let options = LayoutOptions::default().with_base_size(50.0);
    let none = layout(&scenario(), &Substitutions::new(), &options);
    let other = layout(&scenario(), &[("nobody", "zzz")].into_iter().collect(), &options);
    assert_eq!(none, other);
}

#[test]
fn test_justified_rows_fill_the_canvas() {
    let preset = Preset::new(
        "x",
        vec![
            Row::new(vec![Segment::text("日本語は", 1070.0)]),
            Row::new(vec![
                Segment::text("全て", 680.0),
                Segment::placeholder("oshi", "女性声優", 680.0),
            ]),
            Row::new(vec![Segment::text("から", 980.0), Segment::text("学んだ", 980.0)]),
        ],
    );
    let options = LayoutOptions::default().with_base_size(50.0);
    let layout = layout(&preset, &Substitutions::new(), &options);

    for row in layout.rows.iter().filter(|r| !r.has_placeholder) {
        assert_close(drawn_span(row), layout.width, "drawn span");
        let last = row.segments.last().unwrap();
        assert_close(last.x + last.width, layout.width, "last segment ends at edge");
        assert_close(row.segments[0].x, 0.0, "first segment starts at edge");
    }
}

#[test]
fn test_single_character_row_keeps_natural_width() {
    let preset = Preset::new(
        "x",
        vec![
            Row::new(vec![Segment::text("W", 10.0)]),
            Row::new(vec![Segment::text("wide row", 10.0)]),
        ],
    );
    let layout = layout(&preset, &Substitutions::new(), &LayoutOptions::default());
    let single = &layout.rows[0];
    assert_eq!(single.letter_spacing, 0.0);
    assert_close(single.segments[0].width, 9.0, "natural width");
}

#[test]
fn test_placeholders_share_flex_space() {
    let preset = Preset::new(
        "<a><b>",
        vec![
            Row::new(vec![Segment::text("ABCDEFGHIJ", 10.0)]),
            Row::new(vec![
                Segment::placeholder("a", "x", 10.0),
                Segment::placeholder("b", "yy", 10.0),
            ]),
        ],
    );
    let layout = layout(&preset, &Substitutions::new(), &LayoutOptions::default());
    let row = &layout.rows[1];
    let a = row.segments[0].redaction.unwrap();
    let b = row.segments[1].redaction.unwrap();
    // Equal shares on top of each box's own width
    assert_close(
        b.width - a.width,
        row.segments[1].natural_width - row.segments[0].natural_width,
        "equal shares",
    );
    assert_close(b.right(), layout.width, "second box reaches the edge");
    assert_close(b.x - a.right(), row.padding, "padding between boxes");
}

#[test]
fn test_long_placeholder_keeps_its_width() {
    let preset = Preset::new(
        "<a><b>",
        vec![
            Row::new(vec![Segment::text("ABCDEFGHIJKLMNOPQRST", 10.0)]),
            Row::new(vec![
                Segment::placeholder("a", "AAAAAAAA", 10.0),
                Segment::placeholder("b", "B", 10.0),
            ]),
        ],
    );
    let layout = layout(&preset, &Substitutions::new(), &LayoutOptions::default());
    let row = &layout.rows[1];

    for seg in &row.segments {
        let rect = seg.redaction.unwrap();
        assert!(
            rect.width + EPS >= seg.natural_width,
            "{:?} box {} narrower than its text {}",
            seg.kind,
            rect.width,
            seg.natural_width
        );
        assert!(seg.letter_spacing >= 0.0, "spacing {}", seg.letter_spacing);
        assert!(seg.x + seg.drawn_width() <= rect.right() - row.box_padding + EPS);
    }

    let long = &row.segments[0];
    assert!(long.letter_spacing > 0.0);
    assert_close(
        long.drawn_width(),
        long.redaction.unwrap().width - 2.0 * row.box_padding,
        "long text justified inside its box",
    );
    assert_close(
        row.segments[1].redaction.unwrap().right(),
        layout.width,
        "last box reaches the edge",
    );
}

#[test]
fn test_invalid_presets_are_config_errors() {
    let mut ctx = BlockContext::new();
    let zero = Preset::new("x", vec![Row::new(vec![Segment::text("x", 0.0)])]);
    let err = Layout::compute(&zero, &Substitutions::new(), &LayoutOptions::default(), &mut ctx)
        .unwrap_err();
    assert!(matches!(
        err,
        PlacardError::Config(ConfigError::InvalidSize { .. })
    ));

    let err = Layout::compute(
        &scenario(),
        &Substitutions::new(),
        &LayoutOptions::default().with_base_size(-1.0),
        &mut ctx,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PlacardError::Config(ConfigError::InvalidBaseSize(_))
    ));
}

#[test]
fn test_layout_leaves_context_unspaced() {
    let mut ctx = BlockContext::new();
    ctx.set_letter_spacing(7.0);
    let layout = Layout::compute(
        &scenario(),
        &Substitutions::new(),
        &LayoutOptions::default(),
        &mut ctx,
    )
    .unwrap();
    assert_eq!(ctx.letter_spacing(), 0.0);
    // Stale spacing must not have widened any measurement
    assert_close(layout.rows[0].segments[0].metrics.width(), 190.0, "AB width");
}

fn arb_row() -> impl Strategy<Value = Row> {
    (
        prop::collection::vec("[A-Za-z]{1,6}", 1..4),
        1u32..20,
        any::<bool>(),
    )
        .prop_map(|(words, size, with_placeholder)| {
            let size = size as f32 * 10.0;
            let mut segments: Vec<Segment> =
                words.into_iter().map(|w| Segment::text(w, size)).collect();
            if with_placeholder {
                segments.push(Segment::placeholder("p", "slot", size));
            }
            Row::new(segments)
        })
}

proptest! {
    #[test]
    fn prop_canvas_width_is_widest_row(rows in prop::collection::vec(arb_row(), 1..5)) {
        let preset = Preset::new("p", rows);
        let layout = layout(&preset, &Substitutions::new(), &LayoutOptions::default());
        let widest = layout
            .rows
            .iter()
            .map(|r| r.natural_width())
            .fold(0.0f32, f32::max);
        prop_assert!((layout.width - widest).abs() < EPS);
    }

    #[test]
    fn prop_rows_span_the_canvas(rows in prop::collection::vec(arb_row(), 1..5), sub in "[a-z]{0,8}") {
        let preset = Preset::new("p", rows);
        let subs: Substitutions = [("p", sub)].into_iter().collect();
        let layout = layout(&preset, &subs, &LayoutOptions::default());
        let tolerance = layout.width * 1e-5 + EPS;

        for row in &layout.rows {
            if row.has_placeholder {
                let last = row.segments.last().unwrap();
                let right = last.redaction.map(|r| r.right()).unwrap_or(last.x + last.width);
                prop_assert!((right - layout.width).abs() < tolerance);
            } else {
                let chars: usize = row.segments.iter().map(|s| s.text.chars().count()).sum();
                if chars > 1 {
                    prop_assert!((drawn_span(row) - layout.width).abs() < tolerance);
                }
            }
        }
    }
}
