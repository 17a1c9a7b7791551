//! Placard - justified phrase placards with redaction boxes
//!
//! A placard is a short phrase set in a few rows of bold type. Every row is
//! stretched to the same width, and placeholder slots become solid boxes
//! with the user's text cut out of them. The result is exported as PNG.
//!
//! The pieces:
//!
//! 1. Presets and substitutions ([`presets`], [`core::preset`])
//! 2. Layout: scale, measure and justify rows ([`core::Layout`])
//! 3. Fonts: display face, system fallback, block last resort ([`fontdb`])
//! 4. Painting onto a tiny-skia canvas ([`render`])
//! 5. PNG export ([`export`])
//!
//! [`Studio`] ties them into one editing session.
//!
//! # Example
//!
//! ```no_run
//! use placard::prelude::*;
//!
//! let mut studio = Studio::builtin(StudioConfig::default())?;
//! studio.set_substitution("oshi", "Mio");
//! studio.set_base_size(Some(64.0));
//! let path = studio.save_png(".")?;
//! println!("wrote {}", path.display());
//! # Ok::<(), placard::PlacardError>(())
//! ```

mod studio;
mod theme;

pub use placard_core as core;
pub use placard_core::{error, Color, PlacardError, Result};
pub use placard_export as export;
pub use placard_fontdb as fontdb;
pub use placard_presets as presets;
pub use placard_render_skia as render;

pub use studio::{Studio, StudioConfig, DEFAULT_DEBOUNCE};
pub use theme::{Theme, ThemeColors};

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{Studio, StudioConfig, Theme};
    pub use placard_core::{
        error::{PlacardError, Result},
        traits::{Exporter, Face, TextContext},
        Color, Layout, LayoutOptions, Preset, Row, Segment, Substitutions,
    };
    pub use placard_fontdb::{FontSource, LoadState};
    pub use placard_presets::Catalog;
    pub use placard_render_skia::{Canvas, PaintStyle, SkiaRenderer};
}
