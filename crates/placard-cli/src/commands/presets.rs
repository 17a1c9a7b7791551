//! Presets command implementation
//!
//! Lists the catalog with each phrase as it reads with default fills.

use anyhow::{Context, Result};
use placard::{
    core::{Segment, Substitutions},
    presets::Catalog,
};

use crate::cli::PresetsArgs;

pub fn run(args: &PresetsArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let defaults = Substitutions::new();

    for (index, preset) in catalog.iter().enumerate() {
        println!("{:>3}  {}", index, preset.render_display_text(&defaults));
        if args.verbose {
            for (row_index, row) in preset.rows.iter().enumerate() {
                let size = row.size().unwrap_or_default();
                println!("       row {}: size {}", row_index, size);
            }
            for segment in preset.placeholders() {
                if let Segment::Placeholder {
                    key, default_text, ..
                } = segment
                {
                    println!("       <{}> defaults to \"{}\"", key, default_text);
                }
            }
        }
    }
    Ok(())
}

/// Built-in catalog unless a file is given
pub fn load_catalog(path: Option<&std::path::Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to read catalog {}", path.display())),
        None => Catalog::builtin().context("Built-in catalog is invalid"),
    }
}
