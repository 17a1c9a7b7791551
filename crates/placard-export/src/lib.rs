//! Getting finished placards out of the process
//!
//! Encoding goes through [`PngExporter`]; [`export_file_name`] names the
//! file after the phrase it shows, and [`write_png`] puts it on disk.
//! Export failures come back as errors and never touch the paint path.

use std::{
    fs,
    path::{Path, PathBuf},
};

use placard_core::{
    error::{ExportError, Result},
    Preset, Substitutions,
};

pub mod png;

pub use png::{encode_bitmap_to_png, PngExporter};

/// Characters that cannot appear in file names on common filesystems
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// File name for an export: the filled-in display text plus `.png`
///
/// Path separators, reserved punctuation and control characters become
/// `_`; an empty result falls back to `placard`.
pub fn export_file_name(preset: &Preset, substitutions: &Substitutions) -> String {
    let text = preset.render_display_text(substitutions);
    let stem: String = text
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        "placard.png".to_string()
    } else {
        format!("{}.png", stem)
    }
}

/// Write encoded bytes as `dir/name`, returning the full path
pub fn write_png(dir: impl AsRef<Path>, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.as_ref().join(name);
    fs::write(&path, bytes).map_err(|e| {
        log::warn!("Export: could not write {}: {}", path.display(), e);
        ExportError::WriteFailed(format!("{}: {}", path.display(), e))
    })?;
    log::debug!("Export: wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
