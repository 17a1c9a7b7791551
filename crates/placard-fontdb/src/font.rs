//! Outline faces parsed from font files

use std::{fmt, fs, io, path::Path, sync::Arc};

use kurbo::BezPath;
use placard_core::{error::FontLoadError, traits::Face, GlyphOutline};
use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::{
    instance::{LocationRef, Size},
    outline::DrawSettings,
    string::StringId,
    GlyphId, MetadataProvider,
};

use crate::LoadResult;

/// A font file in memory, drawn through skrifa
///
/// Stores the raw bytes and parses on demand; the family and weight are
/// read from the `name` and `OS/2` tables once at load time.
#[derive(Clone)]
pub struct Font {
    data: Arc<Vec<u8>>,
    face_index: u32,
    family: String,
    weight: u16,
}

impl Font {
    pub fn from_file(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FontLoadError::FileNotFound(path.display().to_string()),
            _ => FontLoadError::ReadFailed(format!("{}: {}", path.display(), e)),
        })?;
        Self::from_data(data)
    }

    pub fn from_data(data: Vec<u8>) -> LoadResult<Self> {
        Self::from_data_index(data, 0)
    }

    /// Parse one face of a file (collections hold several)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> LoadResult<Self> {
        let font =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font
            .head()
            .map(|head| head.units_per_em())
            .map_err(|_| FontLoadError::InvalidData)?;
        let weight = font
            .os2()
            .map(|os2| os2.us_weight_class())
            .unwrap_or(placard_core::BOLD);
        let family = font
            .localized_strings(StringId::TYPOGRAPHIC_FAMILY_NAME)
            .english_or_first()
            .or_else(|| font.localized_strings(StringId::FAMILY_NAME).english_or_first())
            .map(|name| name.to_string())
            .unwrap_or_default();

        log::debug!(
            "Font: parsed {:?} weight {} ({} units/em)",
            family,
            weight,
            units_per_em
        );

        Ok(Self {
            data: Arc::new(data),
            face_index,
            family,
            weight,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }
}

impl Face for Font {
    fn family(&self) -> &str {
        &self.family
    }

    fn weight(&self) -> u16 {
        self.weight
    }

    fn glyph(&self, ch: char, size: f32) -> Option<GlyphOutline> {
        let font = self.font_ref()?;
        let gid = font
            .charmap()
            .map(ch)
            .filter(|gid| *gid != GlyphId::NOTDEF)?;

        let size = Size::new(size);
        let location = LocationRef::default();
        let advance = font
            .glyph_metrics(size, location)
            .advance_width(gid)
            .unwrap_or(0.0);

        let mut path = BezPath::new();
        if let Some(outline) = font.outline_glyphs().get(gid) {
            let mut pen = PathPen { path: &mut path };
            if outline
                .draw(DrawSettings::unhinted(size, location), &mut pen)
                .is_err()
            {
                log::warn!("Font: failed to draw {:?} from {}", ch, self.family);
                path = BezPath::new();
            }
        }

        Some(GlyphOutline { advance, path })
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family)
            .field("weight", &self.weight)
            .field("face_index", &self.face_index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Collects skrifa's drawing commands into a kurbo path
///
/// skrifa already scales to the requested pixel size, so coordinates pass
/// straight through, still y-up.
struct PathPen<'a> {
    path: &'a mut BezPath,
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path
            .quad_to((cx0 as f64, cy0 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
