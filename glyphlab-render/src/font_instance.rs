//! A loaded font at a pixel size, with its caches.
//!
//! [`FontInstance`] owns the parsed face exclusively, tracks the current
//! pixel size and variation values, and derives line metrics from them.
//! [`set_pixel_size`](FontInstance::set_pixel_size) and
//! [`set_variation_values`](FontInstance::set_variation_values) are the only
//! mutators after loading; both clear the glyph and shape caches so no
//! cached raster outlives the state it was produced for.

use crate::backend::RenderBackend;
use crate::glyph_cache::{CacheEntry, GlyphCache, GlyphKey};
use crate::shape_cache::ShapeCache;
use glyphlab_fonts::{
    AxisDescriptor, AxisInfo, FontError, FontExtents, FontFace, FontLoader, ShapedGlyph,
    ShapingOptions, SwashLoader, TextDirection, VariationAxis, VariationSetting,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Line metrics in pixels at the current size, y up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    /// Negative below the baseline.
    pub descent: f32,
    pub line_gap: f32,
    /// `(ascent - descent) + line_gap`
    pub line_height: f32,
}

pub struct FontInstance<L: FontLoader = SwashLoader> {
    loader: L,
    face: Option<L::Face>,
    family_name: String,
    sub_family_name: String,
    axes: Vec<AxisDescriptor>,
    pixel_size: Option<u32>,
    axis_values: BTreeMap<VariationAxis, f32>,
    metrics: FontMetrics,
    glyph_cache: GlyphCache,
    shape_cache: ShapeCache,
}

impl Default for FontInstance<SwashLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl FontInstance<SwashLoader> {
    /// An empty instance using the swash/rustybuzz backend.
    pub fn new() -> Self {
        Self::with_loader(SwashLoader)
    }

    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let mut instance = Self::new();
        instance.load_file(path)?;
        Ok(instance)
    }
}

impl<L: FontLoader> FontInstance<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            face: None,
            family_name: String::new(),
            sub_family_name: String::new(),
            axes: Vec::new(),
            pixel_size: None,
            axis_values: BTreeMap::new(),
            metrics: FontMetrics::default(),
            glyph_cache: GlyphCache::new(),
            shape_cache: ShapeCache::default(),
        }
    }

    /// Parse `data` and make it the current font.
    ///
    /// Any previous font and its cached glyphs are dropped first, so on
    /// failure the instance is left empty.
    pub fn load(&mut self, data: Vec<u8>) -> Result<(), FontError> {
        self.unload();
        let face = self.loader.load(data)?;

        self.family_name = face.family_name().unwrap_or_default();
        self.sub_family_name = face.sub_family_name().unwrap_or_default();
        self.axes = face.variation_axes();
        self.axis_values = self
            .axes
            .iter()
            .filter_map(|d| d.axis().map(|axis| (axis, d.info.default_value)))
            .collect();
        self.face = Some(face);

        log::info!(
            "Loaded font '{} {}' ({} variation axes)",
            self.family_name,
            self.sub_family_name,
            self.axes.len()
        );
        Ok(())
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), FontError> {
        let data = std::fs::read(path).map_err(|source| {
            self.unload();
            FontError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.load(data)
    }

    fn unload(&mut self) {
        self.invalidate_caches();
        self.face = None;
        self.family_name.clear();
        self.sub_family_name.clear();
        self.axes.clear();
        self.axis_values.clear();
        self.pixel_size = None;
        self.metrics = FontMetrics::default();
    }

    /// The font parsed successfully.
    pub fn is_loaded(&self) -> bool {
        self.face.is_some()
    }

    /// Loaded and a pixel size has been set; metrics are meaningful.
    pub fn is_valid(&self) -> bool {
        self.is_loaded() && self.pixel_size.is_some()
    }

    pub fn is_variable(&self) -> bool {
        !self.axes.is_empty()
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn sub_family_name(&self) -> &str {
        &self.sub_family_name
    }

    pub fn pixel_size(&self) -> Option<u32> {
        self.pixel_size
    }

    /// Current value of each recognized axis the font exposes.
    pub fn variation_values(&self) -> &BTreeMap<VariationAxis, f32> {
        &self.axis_values
    }

    /// Every axis in the font, including ones outside [`VariationAxis`].
    pub fn axes(&self) -> &[AxisDescriptor] {
        &self.axes
    }

    /// One entry per [`VariationAxis`] for variable fonts, `None` where the
    /// font lacks the axis. Empty for static fonts.
    pub fn axis_limits(&self) -> BTreeMap<VariationAxis, Option<AxisInfo>> {
        if !self.is_variable() {
            return BTreeMap::new();
        }
        VariationAxis::ALL
            .iter()
            .map(|&axis| {
                let info = self
                    .axes
                    .iter()
                    .find(|d| d.axis() == Some(axis))
                    .map(|d| d.info);
                (axis, info)
            })
            .collect()
    }

    /// Set the pixel size. Returns true if it changed.
    pub fn set_pixel_size(&mut self, size: u32) -> bool {
        let Some(face) = self.face.as_mut() else {
            log::debug!("set_pixel_size({}) ignored: no font loaded", size);
            return false;
        };
        if size == 0 || self.pixel_size == Some(size) {
            return false;
        }
        face.set_pixel_size(size);
        self.pixel_size = Some(size);
        self.refresh_metrics();
        self.invalidate_caches();
        log::debug!(
            "Pixel size {} -> line height {:.1}",
            size,
            self.metrics.line_height
        );
        true
    }

    /// Apply axis values. Axes the font exposes but `values` omits go back to
    /// their defaults; values outside an axis range are clamped.
    ///
    /// Returns false (and does nothing) for static or unloaded fonts.
    pub fn set_variation_values(&mut self, values: &BTreeMap<VariationAxis, f32>) -> bool {
        let Some(face) = self.face.as_mut() else {
            log::debug!("set_variation_values ignored: no font loaded");
            return false;
        };
        if self.axes.is_empty() {
            log::debug!("set_variation_values ignored: font is not variable");
            return false;
        }

        let mut applied = BTreeMap::new();
        let settings: Vec<VariationSetting> = self
            .axes
            .iter()
            .map(|descriptor| {
                let axis = descriptor.axis();
                let value = match axis.and_then(|a| values.get(&a)) {
                    Some(&requested) => {
                        let clamped = descriptor.info.clamp(requested);
                        if clamped != requested {
                            log::debug!(
                                "Axis {} value {} clamped to {}",
                                descriptor.tag_str(),
                                requested,
                                clamped
                            );
                        }
                        clamped
                    }
                    None => descriptor.info.default_value,
                };
                if let Some(axis) = axis {
                    applied.insert(axis, value);
                }
                VariationSetting {
                    tag: descriptor.tag,
                    value,
                }
            })
            .collect();

        face.set_variation_coordinates(&settings);
        self.axis_values = applied;
        self.refresh_metrics();
        self.invalidate_caches();
        true
    }

    fn refresh_metrics(&mut self) {
        let (Some(face), Some(_)) = (self.face.as_ref(), self.pixel_size) else {
            self.metrics = FontMetrics::default();
            return;
        };
        let m = face.metrics();
        let line_gap = m.height + m.descender - m.ascender;
        self.metrics = FontMetrics {
            ascent: m.ascender,
            descent: m.descender,
            line_gap,
            line_height: (m.ascender - m.descender) + line_gap,
        };
    }

    /// Zeroed when the instance is not valid.
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn invalidate_caches(&mut self) {
        self.glyph_cache.invalidate();
        self.shape_cache.clear();
    }

    /// Drop every cached raster, returning the textures to their backend.
    /// Switching backends does this on the next glyph lookup anyway.
    pub fn release_textures(&mut self) {
        self.glyph_cache.invalidate();
    }

    /// Cached raster for `key`, rasterizing on a miss. `None` when invalid.
    pub fn glyph<B>(&mut self, backend: &mut B, key: GlyphKey) -> Option<&CacheEntry>
    where
        B: RenderBackend + ?Sized,
    {
        if self.pixel_size.is_none() {
            return None;
        }
        let face = self.face.as_mut()?;
        Some(self.glyph_cache.get_or_rasterize(key, face, backend))
    }

    pub fn glyph_from_char<B>(&mut self, backend: &mut B, ch: char) -> Option<&CacheEntry>
    where
        B: RenderBackend + ?Sized,
    {
        self.glyph(backend, GlyphKey::Char(ch))
    }

    /// Shape one line, reusing a cached run when the same text was shaped
    /// with the same options since the last invalidation.
    pub fn shape_line(
        &mut self,
        text: &str,
        options: &ShapingOptions,
    ) -> Option<Arc<Vec<ShapedGlyph>>> {
        if self.pixel_size.is_none() {
            return None;
        }
        let face = self.face.as_ref()?;
        Some(
            self.shape_cache
                .get_or_shape(text, options, || face.shape(text, options)),
        )
    }

    pub fn extents_for_direction(&self, direction: TextDirection) -> Option<FontExtents> {
        self.pixel_size?;
        self.face
            .as_ref()
            .map(|face| face.extents_for_direction(direction))
    }

    pub fn glyph_cache(&self) -> &GlyphCache {
        &self.glyph_cache
    }

    pub fn shape_cache_len(&self) -> usize {
        self.shape_cache.len()
    }
}
