//! System font discovery through fontdb

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use placard_core::error::FontLoadError;

use crate::{font::Font, LoadResult};

/// Every font installed on the machine, scanned once per process
static SYSTEM_FONTS: Lazy<Database> = Lazy::new(|| {
    let mut db = Database::new();
    db.load_system_fonts();
    log::debug!("System fonts: {} faces", db.len());
    db
});

/// Load an installed face by family name and weight
///
/// `"sans-serif"`, `"serif"` and `"monospace"` select the generic families.
pub fn find(family: &str, weight: u16) -> LoadResult<Font> {
    let families = [match family {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        name => Family::Name(name),
    }];
    let query = Query {
        families: &families,
        weight: Weight(weight),
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = SYSTEM_FONTS
        .query(&query)
        .ok_or_else(|| FontLoadError::SystemFontNotFound(family.to_string()))?;

    SYSTEM_FONTS
        .with_face_data(id, |data, face_index| {
            Font::from_data_index(data.to_vec(), face_index)
        })
        .ok_or_else(|| FontLoadError::SystemFontNotFound(family.to_string()))?
}

/// The bold sans-serif the loader falls back to
pub fn sans_bold() -> LoadResult<Font> {
    find("sans-serif", Weight::BOLD.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_family() {
        assert!(matches!(
            find("No Such Family Placard", 700),
            Err(FontLoadError::SystemFontNotFound(_))
        ));
    }
}
