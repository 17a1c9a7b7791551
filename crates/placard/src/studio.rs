//! An editing session around one canvas
//!
//! Every setter records a change and bumps the revision; nothing is laid
//! out or painted until [`Studio::repaint_if_due`] sees a quiet debounce
//! window, or [`Studio::repaint`] forces it. Painting needs `&mut self`, so
//! two paints can never overlap, and each paint reads the latest state.

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use placard_core::{
    error::{RenderError, Result},
    traits::Exporter,
    Layout, LayoutOptions, Preset, Substitutions,
};
use placard_export::{export_file_name, write_png, PngExporter};
use placard_fontdb::{FontLoader, FontSource, LoadState};
use placard_presets::Catalog;
use placard_render_skia::{Canvas, PaintStyle, SkiaRenderer};

use crate::theme::Theme;

/// Quiet time after the last change before a repaint is due
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(120);

/// Session settings
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub layout: LayoutOptions,
    pub theme: Theme,
    /// Paint the theme background instead of leaving the surface transparent
    pub background: bool,
    pub transparent_placeholder: bool,
    pub debounce: Duration,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            theme: Theme::default(),
            background: false,
            transparent_placeholder: false,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// The composing session: preset choice, substitutions, look, and the
/// canvas they are painted on
pub struct Studio {
    catalog: Catalog,
    selected: usize,
    substitutions: Substitutions,
    config: StudioConfig,
    loader: FontLoader,
    canvas: Canvas,
    renderer: SkiaRenderer,
    exporter: PngExporter,
    layout: Option<Layout>,
    revision: u64,
    painted_revision: Option<u64>,
    last_change: Option<Instant>,
}

impl Studio {
    /// Start a session on the first preset of `catalog`
    pub fn new(catalog: Catalog, config: StudioConfig) -> Result<Self> {
        catalog.get(0)?;
        let loader = FontLoader::new();
        let canvas = Canvas::new(loader.font_book(), 1, 1)?;
        Ok(Self {
            catalog,
            selected: 0,
            substitutions: Substitutions::new(),
            config,
            loader,
            canvas,
            renderer: SkiaRenderer::new(),
            exporter: PngExporter::new(),
            layout: None,
            revision: 0,
            painted_revision: None,
            last_change: None,
        })
    }

    /// A session over the built-in presets
    pub fn builtin(config: StudioConfig) -> Result<Self> {
        Self::new(Catalog::builtin()?, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn preset(&self) -> Result<&Preset> {
        self.catalog.get(self.selected)
    }

    pub fn substitutions(&self) -> &Substitutions {
        &self.substitutions
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Geometry of the last paint
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Counts changes since the session started
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn painted_revision(&self) -> Option<u64> {
        self.painted_revision
    }

    /// True when the canvas does not show the latest state
    pub fn is_dirty(&self) -> bool {
        self.painted_revision != Some(self.revision)
    }

    pub fn font_state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn select_preset(&mut self, index: usize) -> Result<()> {
        self.catalog.get(index)?;
        self.selected = index;
        self.touch();
        Ok(())
    }

    /// Fill a placeholder; an empty value restores its default
    pub fn set_substitution(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.substitutions.insert(key, value);
        self.touch();
    }

    pub fn clear_substitution(&mut self, key: &str) {
        self.substitutions.remove(key);
        self.touch();
    }

    /// Pixel size of the smallest row; None renders relative sizes 1:1
    pub fn set_base_size(&mut self, base_size: Option<f32>) {
        self.config.layout.base_size = base_size;
        self.touch();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
        self.touch();
    }

    pub fn set_background(&mut self, background: bool) {
        self.config.background = background;
        self.touch();
    }

    pub fn set_transparent_placeholder(&mut self, transparent: bool) {
        self.config.transparent_placeholder = transparent;
        self.touch();
    }

    /// Begin loading the display face; paints wait until it settles
    pub fn load_font(&mut self, source: FontSource) {
        self.loader.load(source);
        self.touch();
    }

    /// Wait for the display face, install it (or the fallback) and repaint
    pub async fn font_settled(&mut self) -> Result<LoadState> {
        let state = self.loader.settled().await;
        if let LoadState::Failed(e) = &state {
            log::warn!("Studio: display face unavailable ({}), using fallback", e);
        }
        self.repaint()?;
        Ok(state)
    }

    /// Repaint if something changed and the debounce window has passed
    ///
    /// Returns whether a paint happened. While the display face is still
    /// loading the surface stays dirty and nothing is painted.
    pub fn repaint_if_due(&mut self, now: Instant) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        if self.loader.is_loading() {
            log::debug!("Studio: repaint deferred until the font settles");
            return Ok(false);
        }
        if let Some(changed) = self.last_change {
            if now.saturating_duration_since(changed) < self.config.debounce {
                return Ok(false);
            }
        }
        self.repaint()?;
        Ok(true)
    }

    /// Lay out and paint the current state now
    ///
    /// Paints with whatever faces are available; while the display face is
    /// loading the surface stays dirty, so it is painted again once the
    /// face settles.
    pub fn repaint(&mut self) -> Result<()> {
        self.canvas.set_book(self.loader.font_book());
        let style = self.paint_style();

        let preset = self.catalog.get(self.selected)?;
        let layout = Layout::compute(
            preset,
            &self.substitutions,
            &self.config.layout,
            &mut self.canvas,
        )?;
        self.renderer.paint(&mut self.canvas, &layout, &style)?;

        log::debug!(
            "Studio: painted revision {} ({}x{})",
            self.revision,
            self.canvas.width(),
            self.canvas.height()
        );
        self.layout = Some(layout);
        // A paint made with a face still loading is provisional
        if !self.loader.is_loading() {
            self.painted_revision = Some(self.revision);
        }
        Ok(())
    }

    /// Colors and cut-out mode for the current theme and flags
    pub fn paint_style(&self) -> PaintStyle {
        let colors = self.config.theme.colors();
        PaintStyle {
            foreground: colors.foreground,
            background: self.config.background.then_some(colors.background),
            transparent_placeholder: self.config.transparent_placeholder,
        }
    }

    /// Encode the current state as PNG, repainting first if needed
    ///
    /// Refuses while the display face is loading rather than exporting
    /// the fallback by accident.
    pub fn export_png(&mut self) -> Result<Vec<u8>> {
        if self.loader.is_loading() {
            return Err(RenderError::FontNotReady.into());
        }
        if self.is_dirty() {
            self.repaint()?;
        }
        self.exporter.export(&self.canvas.to_bitmap())
    }

    /// File name for the current preset and substitutions
    pub fn export_file_name(&self) -> Result<String> {
        Ok(export_file_name(self.preset()?, &self.substitutions))
    }

    /// Export into `dir` under [`Studio::export_file_name`]
    pub fn save_png(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let bytes = self.export_png()?;
        let name = self.export_file_name()?;
        write_png(dir, &name, &bytes)
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.last_change = Some(Instant::now());
    }
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("selected", &self.selected)
            .field("substitutions", &self.substitutions)
            .field("config", &self.config)
            .field("revision", &self.revision)
            .field("painted_revision", &self.painted_revision)
            .finish()
    }
}
