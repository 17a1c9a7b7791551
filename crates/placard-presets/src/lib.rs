//! The preset catalog
//!
//! Presets are static data: a built-in table compiled into the binary, or a
//! catalog file with the same shape. Every preset is validated when the
//! catalog loads, so layout never sees a malformed one.
//!
//! ```rust
//! use placard_presets::Catalog;
//! use placard_core::Substitutions;
//!
//! let catalog = Catalog::builtin()?;
//! for (index, preset) in catalog.iter().enumerate() {
//!     println!("{}: {}", index, preset.render_display_text(&Substitutions::new()));
//! }
//! # Ok::<(), placard_core::PlacardError>(())
//! ```

mod raw;

use std::path::Path;

use placard_core::{error::ConfigError, Preset, Result};

use crate::raw::RawCatalog;

/// Catalog format version this crate reads
pub const CATALOG_VERSION: u32 = 1;

const BUILTIN: &str = include_str!("../data/presets.json");

/// An ordered, immutable list of presets, addressed by position
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    presets: Vec<Preset>,
}

impl Catalog {
    /// The presets shipped with Placard
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN)
    }

    /// Parse and validate a catalog document
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCatalog =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        if raw.version != CATALOG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: raw.version,
                expected: CATALOG_VERSION,
            }
            .into());
        }

        let presets = raw
            .presets
            .into_iter()
            .map(|p| {
                let preset = p.into_preset()?;
                preset.validate()?;
                Ok(preset)
            })
            .collect::<std::result::Result<Vec<_>, ConfigError>>()?;

        log::debug!("Catalog: loaded {} presets", presets.len());
        Ok(Self { presets })
    }

    /// Read a catalog file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Catalog: reading {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_presets(presets: Vec<Preset>) -> Result<Self> {
        for preset in &presets {
            preset.validate()?;
        }
        Ok(Self { presets })
    }

    pub fn get(&self, index: usize) -> Result<&Preset> {
        self.presets.get(index).ok_or_else(|| {
            ConfigError::PresetOutOfRange {
                index,
                len: self.presets.len(),
            }
            .into()
        })
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Preset;
    type IntoIter = std::slice::Iter<'a, Preset>;

    fn into_iter(self) -> Self::IntoIter {
        self.presets.iter()
    }
}
