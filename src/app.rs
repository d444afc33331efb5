//! Application state for one glyphlab session.
//!
//! [`AppContext`] owns the settings, the font catalog, the current
//! [`FontInstance`] and the render options. Opening a font builds a new
//! instance and replaces the old one wholesale, which releases every cached
//! glyph of the previous font.

use crate::error::AppError;
use glyphlab_config::{Color, DebugOverlayConfig, OverlayColors, Settings, defaults};
use glyphlab_fonts::{FontCatalog, VariationAxis};
use glyphlab_render::{
    CanvasBackend, FontInstance, LayoutParams, RecordingBackend, RenderBackend, RenderMode,
    RenderStats, SurfaceSize, TextLayoutEngine,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Everything that shapes a render apart from the font itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub script: Option<String>,
    pub language: Option<String>,
    pub font_size: u32,
    pub axis_values: BTreeMap<VariationAxis, f32>,
    pub overlay: DebugOverlayConfig,
    pub overlay_colors: OverlayColors,
    pub foreground: Color,
    pub background: Color,
    pub surface: SurfaceSize,
}

impl RenderOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: RenderMode::default(),
            script: None,
            language: None,
            font_size: settings.font_size,
            axis_values: BTreeMap::new(),
            overlay: settings.debug_overlay,
            overlay_colors: OverlayColors::default(),
            foreground: settings.foreground,
            background: settings.background,
            surface: SurfaceSize::new(defaults::surface_width(), defaults::surface_height()),
        }
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            mode: self.mode,
            script: self.script.clone(),
            language: self.language.clone(),
            color: self.foreground,
            overlay: self.overlay,
            overlay_colors: self.overlay_colors,
        }
    }
}

pub struct AppContext {
    settings: Settings,
    /// Where settings are persisted; `None` disables saving.
    settings_path: Option<PathBuf>,
    catalog: FontCatalog,
    font: FontInstance,
    font_path: Option<PathBuf>,
    canvas: Option<CanvasBackend>,
    pub options: RenderOptions,
}

impl AppContext {
    /// Build the context and scan the configured font directory, falling
    /// back to `./fonts` when it no longer exists.
    pub fn new(settings: Settings, settings_path: Option<PathBuf>) -> Result<Self, AppError> {
        let catalog = FontCatalog::scan_or_fallback(&settings.font_dir, &defaults::font_dir())
            .map_err(|source| AppError::FontDir {
                path: settings.font_dir.clone(),
                source,
            })?;
        let options = RenderOptions::from_settings(&settings);
        Ok(Self {
            settings,
            settings_path,
            catalog,
            font: FontInstance::new(),
            font_path: None,
            canvas: None,
            options,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    pub fn font(&self) -> &FontInstance {
        &self.font
    }

    pub fn font_path(&self) -> Option<&Path> {
        self.font_path.as_deref()
    }

    pub fn canvas(&self) -> Option<&CanvasBackend> {
        self.canvas.as_ref()
    }

    pub fn save_settings(&self) -> Result<(), AppError> {
        if let Some(path) = &self.settings_path {
            self.settings.save_to(path)?;
        }
        Ok(())
    }

    /// Switch to another font directory and remember it in the settings.
    pub fn set_font_dir(&mut self, dir: &Path) -> Result<(), AppError> {
        let dir = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
        self.catalog = FontCatalog::scan(&dir).map_err(|source| AppError::FontDir {
            path: dir.clone(),
            source,
        })?;
        if self.settings.font_dir != dir {
            self.settings.font_dir = dir;
            self.save_settings()?;
        }
        Ok(())
    }

    /// A catalog entry by file name, stem or index, else an existing path.
    pub fn resolve_font(&self, name: &str) -> Result<PathBuf, AppError> {
        if let Some(entry) = self.catalog.find(name) {
            return Ok(entry.path.clone());
        }
        if let Ok(index) = name.parse::<usize>()
            && let Some(entry) = self.catalog.get(index)
        {
            return Ok(entry.path.clone());
        }
        let path = Path::new(name);
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        Err(AppError::FontNotFound {
            name: name.to_string(),
            dir: self.catalog.dir().to_path_buf(),
        })
    }

    /// Load a font and make it current with the current size and axes.
    ///
    /// On failure the previous font stays current.
    pub fn open_font(&mut self, name: &str) -> Result<(), AppError> {
        let path = self.resolve_font(name)?;
        let mut font = FontInstance::from_file(&path)?;
        font.set_pixel_size(self.options.font_size);
        if !self.options.axis_values.is_empty() {
            font.set_variation_values(&self.options.axis_values);
        }
        self.font = font;
        self.font_path = Some(path);
        Ok(())
    }

    /// Open the first loadable font in the catalog.
    pub fn open_first_font(&mut self) -> Result<(), AppError> {
        let paths: Vec<PathBuf> = self.catalog.entries().iter().map(|e| e.path.clone()).collect();
        for path in paths {
            match self.open_font(&path.to_string_lossy()) {
                Ok(()) => return Ok(()),
                Err(e) => log::warn!("Skipping {:?}: {}", path, e),
            }
        }
        Err(AppError::NoFonts(self.catalog.dir().to_path_buf()))
    }

    /// Set the pixel size, clamped to the selectable range.
    pub fn set_font_size(&mut self, size: u32) {
        let size = size.clamp(defaults::MIN_FONT_SIZE, defaults::MAX_FONT_SIZE);
        self.options.font_size = size;
        self.font.set_pixel_size(size);
    }

    pub fn set_axis_values(&mut self, values: BTreeMap<VariationAxis, f32>) -> bool {
        let applied = self.font.set_variation_values(&values);
        self.options.axis_values = values;
        applied
    }

    /// Resize the output surface. Cached glyphs are dropped with the old canvas.
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        let size = SurfaceSize::new(width, height);
        if size != self.options.surface {
            self.options.surface = size;
            self.drop_canvas();
        }
    }

    fn drop_canvas(&mut self) {
        self.font.release_textures();
        self.canvas = None;
    }

    /// Render `text` onto the canvas, clearing it to the background first.
    pub fn render(&mut self, text: &str) -> Result<RenderStats, AppError> {
        let canvas = match self.canvas.take() {
            Some(mut canvas) => {
                canvas.clear(self.options.background);
                canvas
            }
            None => CanvasBackend::new(
                self.options.surface.width,
                self.options.surface.height,
                self.options.background,
            )?,
        };
        let canvas = self.canvas.insert(canvas);
        let params = self.options.layout_params();
        Ok(TextLayoutEngine::new(&mut self.font, canvas).render(text, &params))
    }

    /// Render and write the canvas to `path` as PNG.
    pub fn render_to_png(&mut self, text: &str, path: &Path) -> Result<RenderStats, AppError> {
        let stats = self.render(text)?;
        if let Some(canvas) = &self.canvas {
            canvas.save_png(path)?;
        }
        Ok(stats)
    }

    /// Lay out `text` against a recording backend instead of the canvas.
    pub fn render_recorded(&mut self, text: &str) -> (RecordingBackend, RenderStats) {
        self.drop_canvas();
        let surface = self.options.surface;
        let mut backend = RecordingBackend::new(surface.width, surface.height);
        let params = self.options.layout_params();
        let stats = TextLayoutEngine::new(&mut self.font, &mut backend).render(text, &params);
        self.font.release_textures();
        backend.collect_released();
        (backend, stats)
    }
}
