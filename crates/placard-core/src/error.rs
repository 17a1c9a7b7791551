//! Error types for Placard

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlacardError>;

/// Main error type for Placard
#[derive(Debug, Error)]
pub enum PlacardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Rendering failed: {0}")]
    RenderingFailed(#[from] RenderError),

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed preset data
///
/// Presets are trusted static data, so any of these means the catalog
/// itself is broken rather than the user doing something wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Preset has no rows")]
    EmptyPreset,

    #[error("Row {row} has no segments")]
    EmptyRow { row: usize },

    #[error("Segment {segment} of row {row} has invalid relative size {size}")]
    InvalidSize { row: usize, segment: usize, size: f32 },

    #[error("Segment {segment} of row {row} has an empty placeholder key")]
    EmptyPlaceholderKey { row: usize, segment: usize },

    #[error("Invalid base size: {0}")]
    InvalidBaseSize(f32),

    #[error("Preset index {index} out of range (catalog has {len})")]
    PresetOutOfRange { index: usize, len: usize },

    #[error("Unsupported catalog version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Malformed segment: {0}")]
    MalformedSegment(String),

    #[error("Malformed catalog: {0}")]
    Malformed(String),
}

/// Font loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Could not read font file: {0}")]
    ReadFailed(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("System font not found: {0}")]
    SystemFontNotFound(String),

    #[error("Font loader thread stopped before finishing")]
    Interrupted,
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Display face is still loading")]
    FontNotReady,
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Surface has no visible content")]
    EmptySurface,

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
