//! Render command implementation
//!
//! Lays out one preset, waits for the display face and writes the PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use placard::{
    core::LayoutOptions,
    export::write_png,
    fontdb::{FontSource, LoadState},
    Studio, StudioConfig,
};

use crate::cli::RenderArgs;
use crate::commands::presets::load_catalog;

pub fn run(args: &RenderArgs) -> Result<()> {
    if !args.quiet {
        eprintln!("Placard v{}", env!("CARGO_PKG_VERSION"));
    }

    let catalog = load_catalog(args.catalog.as_deref())?;
    let config = StudioConfig {
        layout: LayoutOptions {
            base_size: Some(args.base_size),
            ..LayoutOptions::default()
        },
        theme: args.theme.into(),
        background: args.background,
        transparent_placeholder: args.transparent_placeholder,
        ..StudioConfig::default()
    };
    let mut studio = Studio::new(catalog, config)?;
    studio.select_preset(args.preset)?;
    for (key, value) in &args.set {
        studio.set_substitution(key.as_str(), value.as_str());
    }

    log::debug!(
        "Render: preset {} with {} substitutions at base size {}",
        args.preset,
        args.set.len(),
        args.base_size
    );

    let source = match &args.font_file {
        Some(path) => FontSource::file(path),
        None => {
            let face = &studio.config().layout.face;
            FontSource::system(face.family.clone(), face.weight)
        },
    };
    studio.load_font(source);
    let state = pollster::block_on(studio.font_settled())?;
    if let LoadState::Failed(e) = &state {
        if !args.quiet {
            eprintln!("Display face unavailable ({}), using fallback", e);
        }
    }

    let bytes = studio.export_png().context("Failed to export PNG")?;
    let name = studio.export_file_name()?;
    let (dir, name) = output_target(args.output.as_deref(), name);
    log::debug!("Render: writing {} into {}", name, dir.display());
    let path = write_png(&dir, &name, &bytes)?;

    if !args.quiet {
        let (width, height) = (studio.canvas().width(), studio.canvas().height());
        eprintln!("Wrote {} ({}x{})", path.display(), width, height);
    }
    Ok(())
}

/// Split the output flag into a directory and a file name
///
/// No flag or an existing directory keeps the phrase-derived name.
fn output_target(output: Option<&Path>, default_name: String) -> (PathBuf, String) {
    match output {
        None => (PathBuf::from("."), default_name),
        Some(path) if path.is_dir() => (path.to_path_buf(), default_name),
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(default_name);
            (dir, name)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target() {
        assert_eq!(
            output_target(None, "a.png".into()),
            (PathBuf::from("."), "a.png".to_string())
        );
        assert_eq!(
            output_target(Some(Path::new("out/b.png")), "a.png".into()),
            (PathBuf::from("out"), "b.png".to_string())
        );
        assert_eq!(
            output_target(Some(Path::new("b.png")), "a.png".into()),
            (PathBuf::from("."), "b.png".to_string())
        );

        let dir = std::env::temp_dir();
        assert_eq!(
            output_target(Some(&dir), "a.png".into()),
            (dir.clone(), "a.png".to_string())
        );
    }
}
