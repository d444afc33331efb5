//! Per-font glyph cache.
//!
//! Each entry owns the uploaded texture for one glyph together with its ink
//! bound and integer advance. Entries are only valid for the pixel size and
//! variation coordinates they were rasterized at; the owning
//! [`FontInstance`](crate::FontInstance) clears the cache whenever either
//! changes. Textures belong to the backend that uploaded them, so a lookup
//! through a different backend clears the cache as well.

use crate::backend::RenderBackend;
use crate::geometry::Rect;
use crate::texture::{ReleaseQueue, TextureHandle};
use glyphlab_fonts::FontFace;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// What a cache entry is keyed by.
///
/// Unshaped text looks glyphs up by character; shaped text by the glyph
/// index the shaper produced. The two never alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKey {
    Char(char),
    Index(u32),
}

/// Rasterized glyph ready for drawing.
#[derive(Debug)]
pub struct CacheEntry {
    /// `None` for glyphs without ink (spaces) and for failed rasterizations.
    pub texture: Option<TextureHandle>,
    /// Ink box relative to the pen on the baseline, y up:
    /// `(bearing_x, bearing_y - height, width, height)`.
    pub bound: Rect<i32>,
    /// Pen advance in whole pixels.
    pub advance: i32,
}

impl CacheEntry {
    /// Placeholder for a glyph that could not be rasterized.
    pub fn empty() -> Self {
        Self {
            texture: None,
            bound: Rect::default(),
            advance: 0,
        }
    }

    /// True when there is something to draw.
    pub fn is_drawable(&self) -> bool {
        self.texture.is_some() && !self.bound.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct GlyphCache {
    entries: HashMap<GlyphKey, CacheEntry>,
    /// Release queue of the backend the cached textures were uploaded to.
    owner: Option<ReleaseQueue>,
    hits: u64,
    misses: u64,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, rasterizing and uploading it on a miss.
    ///
    /// Rasterization failures are logged and cached as an empty, zero-advance
    /// entry so the glyph is skipped rather than retried every frame.
    pub fn get_or_rasterize<F, B>(
        &mut self,
        key: GlyphKey,
        face: &mut F,
        backend: &mut B,
    ) -> &CacheEntry
    where
        F: FontFace + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let queue = backend.release_queue();
        if self
            .owner
            .as_ref()
            .is_some_and(|owner| !owner.same_queue(queue))
        {
            log::debug!("Glyph cache used with a different backend");
            self.invalidate();
        }
        if self.owner.is_none() {
            self.owner = Some(queue.clone());
        }

        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(slot) => {
                self.misses += 1;
                slot.insert(rasterize_entry(key, face, backend))
            }
        }
    }

    pub fn get(&self, key: GlyphKey) -> Option<&CacheEntry> {
        self.entries.get(&key)
    }

    /// Drop every entry. Textures are queued for release as their handles drop.
    pub fn invalidate(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.owner = None;
        if count > 0 {
            log::debug!("Glyph cache invalidated ({} entries)", count);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

fn rasterize_entry<F, B>(key: GlyphKey, face: &mut F, backend: &mut B) -> CacheEntry
where
    F: FontFace + ?Sized,
    B: RenderBackend + ?Sized,
{
    let glyph_id = match key {
        GlyphKey::Char(ch) => face.glyph_index(ch),
        GlyphKey::Index(id) => id,
    };

    let glyph = match face.rasterize_glyph(glyph_id) {
        Ok(glyph) => glyph,
        Err(e) => {
            log::warn!("{} ({:?}); drawing nothing", e, key);
            return CacheEntry::empty();
        }
    };

    let bound = Rect::new(
        glyph.bearing_x,
        glyph.bearing_y - glyph.height as i32,
        glyph.width as i32,
        glyph.height as i32,
    );
    let texture = if glyph.is_empty() {
        None
    } else {
        match backend.upload_bitmap(glyph.width, glyph.height, &glyph.coverage) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("Texture upload failed for {:?}: {}", key, e);
                None
            }
        }
    };

    CacheEntry {
        texture,
        bound,
        advance: glyph.advance.round() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingBackend;
    use glyphlab_fonts::{
        AxisDescriptor, FaceMetrics, FontError, FontExtents, RasterizedGlyph, ShapedGlyph,
        ShapingOptions, TextDirection, VariationSetting,
    };

    /// Glyph 0 fails, glyph 32 is blank, everything else is a 3x4 box.
    struct BoxFace;

    impl FontFace for BoxFace {
        fn family_name(&self) -> Option<String> {
            None
        }
        fn sub_family_name(&self) -> Option<String> {
            None
        }
        fn variation_axes(&self) -> Vec<AxisDescriptor> {
            Vec::new()
        }
        fn set_pixel_size(&mut self, _pixel_size: u32) {}
        fn set_variation_coordinates(&mut self, _settings: &[VariationSetting]) {}
        fn glyph_index(&self, ch: char) -> u32 {
            ch as u32
        }
        fn rasterize_glyph(&mut self, glyph_id: u32) -> Result<RasterizedGlyph, FontError> {
            match glyph_id {
                0 => Err(FontError::Rasterization { glyph_id }),
                32 => Ok(RasterizedGlyph {
                    advance: 5.0,
                    ..Default::default()
                }),
                _ => Ok(RasterizedGlyph {
                    width: 3,
                    height: 4,
                    bearing_x: 1,
                    bearing_y: 3,
                    advance: 5.4,
                    coverage: vec![255; 12],
                }),
            }
        }
        fn metrics(&self) -> FaceMetrics {
            FaceMetrics::default()
        }
        fn shape(&self, _text: &str, _options: &ShapingOptions) -> Vec<ShapedGlyph> {
            Vec::new()
        }
        fn extents_for_direction(&self, _direction: TextDirection) -> FontExtents {
            FontExtents::default()
        }
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = GlyphCache::new();
        let mut backend = RecordingBackend::new(16, 16);
        let first = cache
            .get_or_rasterize(GlyphKey::Char('A'), &mut BoxFace, &mut backend)
            .texture
            .as_ref()
            .map(|t| t.id());
        let second = cache
            .get_or_rasterize(GlyphKey::Char('A'), &mut BoxFace, &mut backend)
            .texture
            .as_ref()
            .map(|t| t.id());
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(backend.uploaded_count(), 1);
    }

    #[test]
    fn test_bound_is_y_up() {
        let mut cache = GlyphCache::new();
        let mut backend = RecordingBackend::new(16, 16);
        let entry = cache.get_or_rasterize(GlyphKey::Index(65), &mut BoxFace, &mut backend);
        assert_eq!(entry.bound, Rect::new(1, -1, 3, 4));
        assert_eq!(entry.advance, 5);
    }

    #[test]
    fn test_char_and_index_keys_are_distinct() {
        let mut cache = GlyphCache::new();
        let mut backend = RecordingBackend::new(16, 16);
        cache.get_or_rasterize(GlyphKey::Char('A'), &mut BoxFace, &mut backend);
        cache.get_or_rasterize(GlyphKey::Index('A' as u32), &mut BoxFace, &mut backend);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_blank_glyph_has_advance_but_no_texture() {
        let mut cache = GlyphCache::new();
        let mut backend = RecordingBackend::new(16, 16);
        let entry = cache.get_or_rasterize(GlyphKey::Char(' '), &mut BoxFace, &mut backend);
        assert!(entry.texture.is_none());
        assert!(!entry.is_drawable());
        assert_eq!(entry.advance, 5);
        assert_eq!(backend.uploaded_count(), 0);
    }

    #[test]
    fn test_failed_rasterization_is_empty_entry() {
        let mut cache = GlyphCache::new();
        let mut backend = RecordingBackend::new(16, 16);
        let entry = cache.get_or_rasterize(GlyphKey::Index(0), &mut BoxFace, &mut backend);
        assert!(entry.bound.is_empty());
        assert_eq!(entry.advance, 0);
        assert!(entry.texture.is_none());
    }

    #[test]
    fn test_other_backend_clears_cache() {
        let mut cache = GlyphCache::new();
        let mut first = RecordingBackend::new(16, 16);
        let mut second = RecordingBackend::new(16, 16);
        cache.get_or_rasterize(GlyphKey::Char('A'), &mut BoxFace, &mut first);
        cache.get_or_rasterize(GlyphKey::Char('B'), &mut BoxFace, &mut first);

        cache.get_or_rasterize(GlyphKey::Char('A'), &mut BoxFace, &mut second);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.misses(), 3);
        assert_eq!(second.uploaded_count(), 1);
        assert_eq!(first.collect_released(), 2);
        assert_eq!(first.bad_releases(), 0);
    }

    #[test]
    fn test_invalidate_releases_textures() {
        let mut cache = GlyphCache::new();
        let mut backend = RecordingBackend::new(16, 16);
        cache.get_or_rasterize(GlyphKey::Char('A'), &mut BoxFace, &mut backend);
        cache.get_or_rasterize(GlyphKey::Char('B'), &mut BoxFace, &mut backend);
        assert_eq!(cache.invalidate(), 2);
        assert!(cache.is_empty());
        assert_eq!(backend.collect_released(), 2);
        assert_eq!(backend.live_textures(), 0);
    }
}
