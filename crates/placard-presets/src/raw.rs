//! On-disk catalog shape
//!
//! Mirrors the JSON exactly; conversion into core types happens in one
//! place so the rest of the workspace never sees optional fields.

use placard_core::{error::ConfigError, Preset, Row, Segment};
use serde::Deserialize;

/// Top-level catalog document
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCatalog {
    /// Format version, checked against [`crate::CATALOG_VERSION`]
    pub version: u32,
    pub presets: Vec<RawPreset>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPreset {
    /// Display template with `<key>` tokens
    pub text: String,
    #[serde(alias = "data")]
    pub rows: Vec<Vec<RawSegment>>,
}

/// Either `{"text", "size"}` or `{"placeholder": {...}, "size"}`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawSegment {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub placeholder: Option<RawPlaceholder>,
    pub size: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPlaceholder {
    pub key: String,
    pub default: String,
}

impl RawPreset {
    pub fn into_preset(self) -> Result<Preset, ConfigError> {
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(RawSegment::into_segment)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Row::new)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Preset::new(self.text, rows))
    }
}

impl RawSegment {
    fn into_segment(self) -> Result<Segment, ConfigError> {
        match (self.text, self.placeholder) {
            (Some(text), None) => Ok(Segment::text(text, self.size)),
            (None, Some(p)) => Ok(Segment::placeholder(p.key, p.default, self.size)),
            (Some(text), Some(p)) => Err(ConfigError::MalformedSegment(format!(
                "segment is both text {:?} and placeholder <{}>",
                text, p.key
            ))),
            (None, None) => Err(ConfigError::MalformedSegment(
                "segment has neither text nor placeholder".into(),
            )),
        }
    }
}
