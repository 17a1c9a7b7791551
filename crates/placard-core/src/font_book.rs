//! Face selection and per-character fallback

use std::sync::Arc;

use crate::{traits::Face, FaceSpec, GlyphOutline};

/// The faces a context can draw with, in preference order
///
/// Lookups walk the chain: the face that best matches the requested
/// family and weight first, then every other registered face, then the
/// last-resort face. A character is drawn by the first face that maps it.
#[derive(Clone)]
pub struct FontBook {
    faces: Vec<Arc<dyn Face>>,
    last_resort: Arc<dyn Face>,
}

impl FontBook {
    /// A book that only knows its last-resort face
    pub fn new(last_resort: Arc<dyn Face>) -> Self {
        Self {
            faces: Vec::new(),
            last_resort,
        }
    }

    /// Register a face ahead of the last resort
    ///
    /// A face with the same family and weight as an existing one replaces it.
    pub fn register(&mut self, face: Arc<dyn Face>) {
        self.faces
            .retain(|f| !(f.family() == face.family() && f.weight() == face.weight()));
        log::debug!("FontBook: registered {} ({})", face.family(), face.weight());
        self.faces.push(face);
    }

    pub fn faces(&self) -> &[Arc<dyn Face>] {
        &self.faces
    }

    pub fn last_resort(&self) -> &Arc<dyn Face> {
        &self.last_resort
    }

    /// Best face for a request: exact match, then same family, then the
    /// first registered face, then the last resort
    pub fn resolve(&self, spec: &FaceSpec) -> Arc<dyn Face> {
        let exact = self
            .faces
            .iter()
            .find(|f| f.family() == spec.family && f.weight() == spec.weight);
        let family = || self.faces.iter().find(|f| f.family() == spec.family);

        exact
            .or_else(family)
            .or_else(|| self.faces.first())
            .unwrap_or(&self.last_resort)
            .clone()
    }

    /// Outline for `ch`, falling through the chain until a face maps it
    ///
    /// The last resort is expected to map everything; if even it declines,
    /// the character is skipped with a zero advance.
    pub fn glyph(&self, spec: &FaceSpec, ch: char, size: f32) -> GlyphOutline {
        let preferred = self.resolve(spec);
        if let Some(glyph) = preferred.glyph(ch, size) {
            return glyph;
        }

        let others = self
            .faces
            .iter()
            .filter(|f| !Arc::ptr_eq(*f, &preferred))
            .chain(std::iter::once(&self.last_resort));
        for face in others {
            if let Some(glyph) = face.glyph(ch, size) {
                log::trace!("FontBook: {:?} drawn with fallback {}", ch, face.family());
                return glyph;
            }
        }

        log::warn!("FontBook: no face maps {:?}", ch);
        GlyphOutline::blank(0.0)
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field(
                "faces",
                &self
                    .faces
                    .iter()
                    .map(|face| (face.family().to_string(), face.weight()))
                    .collect::<Vec<_>>(),
            )
            .field("last_resort", &self.last_resort.family())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named {
        family: &'static str,
        weight: u16,
        covers: fn(char) -> bool,
    }

    impl Face for Named {
        fn family(&self) -> &str {
            self.family
        }

        fn weight(&self) -> u16 {
            self.weight
        }

        fn glyph(&self, ch: char, size: f32) -> Option<GlyphOutline> {
            // Advance encodes which face answered
            (self.covers)(ch).then(|| GlyphOutline::blank(size * self.weight as f32))
        }
    }

    fn face(family: &'static str, weight: u16, covers: fn(char) -> bool) -> Arc<dyn Face> {
        Arc::new(Named {
            family,
            weight,
            covers,
        })
    }

    #[test]
    fn test_resolve_prefers_exact_then_family() {
        let mut book = FontBook::new(face("last", 1, |_| true));
        book.register(face("Meiryo", 400, |_| true));
        book.register(face("Meiryo", 700, |_| true));
        book.register(face("Other", 700, |_| true));

        assert_eq!(book.resolve(&FaceSpec::new("Meiryo", 700)).weight(), 700);
        assert_eq!(book.resolve(&FaceSpec::new("Meiryo", 900)).weight(), 400);
        assert_eq!(book.resolve(&FaceSpec::new("Missing", 700)).family(), "Meiryo");
    }

    #[test]
    fn test_empty_book_uses_last_resort() {
        let book = FontBook::new(face("last", 1, |_| true));
        assert_eq!(book.resolve(&FaceSpec::default()).family(), "last");
    }

    #[test]
    fn test_glyph_falls_through_chain() {
        let mut book = FontBook::new(face("last", 1, |_| true));
        book.register(face("Latin", 2, |c| c.is_ascii()));
        book.register(face("Digits", 3, |c| c.is_ascii_digit() || c == 'é'));

        let spec = FaceSpec::new("Latin", 2);
        assert_eq!(book.glyph(&spec, 'a', 1.0).advance, 2.0);
        assert_eq!(book.glyph(&spec, 'é', 1.0).advance, 3.0);
        assert_eq!(book.glyph(&spec, '語', 1.0).advance, 1.0);
    }

    #[test]
    fn test_register_replaces_same_identity() {
        let mut book = FontBook::new(face("last", 1, |_| true));
        book.register(face("Meiryo", 700, |_| false));
        book.register(face("Meiryo", 700, |_| true));
        assert_eq!(book.faces().len(), 1);
        assert_eq!(book.glyph(&FaceSpec::default(), 'x', 1.0).advance, 700.0);
    }
}
