//! LRU cache of shaped lines.
//!
//! Re-rendering the same text with the same font state skips the shaper.
//! Results depend on pixel size and variation coordinates, so the owning
//! [`FontInstance`](crate::FontInstance) clears this cache together with the
//! glyph cache.

use glyphlab_fonts::{ShapedGlyph, ShapingOptions};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default number of shaped lines kept.
pub const DEFAULT_SHAPE_CACHE_CAPACITY: usize = 256;

/// Cache key for shaped lines
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ShapeCacheKey {
    text: String,
    options: ShapingOptions,
}

pub struct ShapeCache {
    cache: LruCache<ShapeCacheKey, Arc<Vec<ShapedGlyph>>>,
}

impl Default for ShapeCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SHAPE_CACHE_CAPACITY)
    }
}

impl ShapeCache {
    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Return the cached run for `text`, calling `shape` on a miss.
    pub fn get_or_shape<F>(
        &mut self,
        text: &str,
        options: &ShapingOptions,
        shape: F,
    ) -> Arc<Vec<ShapedGlyph>>
    where
        F: FnOnce() -> Vec<ShapedGlyph>,
    {
        let key = ShapeCacheKey {
            text: text.to_string(),
            options: options.clone(),
        };
        if let Some(run) = self.cache.get(&key) {
            return Arc::clone(run);
        }
        let run = Arc::new(shape());
        self.cache.put(key, Arc::clone(&run));
        run
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
