//! Production [`FontFace`]: swash rasterizes and reports metrics, rustybuzz
//! shapes.

use crate::error::FontError;
use crate::face::{
    FaceMetrics, FontExtents, FontFace, FontLoader, RasterizedGlyph, ShapedGlyph, ShapingOptions,
};
use crate::text_shaper;
use crate::types::{AxisDescriptor, AxisInfo, FontData, TextDirection, VariationSetting};
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;
use swash::{NormalizedCoord, StringId};

/// Loads [`SwashFace`]s. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwashLoader;

impl FontLoader for SwashLoader {
    type Face = SwashFace;

    fn load(&self, data: Vec<u8>) -> Result<SwashFace, FontError> {
        SwashFace::from_bytes(data)
    }
}

pub struct SwashFace {
    font: FontData,
    scale_context: ScaleContext,
    pixel_size: f32,
    glyph_count: u16,
    variations: Vec<VariationSetting>,
    coords: Vec<NormalizedCoord>,
}

impl std::fmt::Debug for SwashFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwashFace")
            .field("font", &self.font)
            .field("pixel_size", &self.pixel_size)
            .field("variations", &self.variations)
            .finish()
    }
}

impl SwashFace {
    /// Parse `data` with both swash and rustybuzz.
    ///
    /// Both must accept the data: a font one backend rejects would render
    /// in one mode and silently draw nothing in the other.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let len = data.len();
        let font = FontData::new(data)
            .ok_or_else(|| FontError::Load(format!("unrecognized font data ({len} bytes)")))?;

        if rustybuzz::Face::from_slice(&font.data, font.face_index as u32).is_none() {
            return Err(FontError::Load(
                "font tables rejected by the shaper".to_string(),
            ));
        }

        let font_ref = font.font_ref;
        let glyph_count = font_ref.metrics(&[]).glyph_count;
        log::debug!("Loaded font: {} bytes, {} glyphs", len, glyph_count);

        Ok(Self {
            font,
            scale_context: ScaleContext::new(),
            pixel_size: 0.0,
            glyph_count,
            variations: Vec::new(),
            coords: Vec::new(),
        })
    }

    pub fn font_data(&self) -> &FontData {
        &self.font
    }

    fn name(&self, id: StringId) -> Option<String> {
        self.font
            .font_ref
            .localized_strings()
            .find_by_id(id, None)
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
    }
}

impl FontFace for SwashFace {
    fn family_name(&self) -> Option<String> {
        self.name(StringId::TypographicFamily)
            .or_else(|| self.name(StringId::Family))
    }

    fn sub_family_name(&self) -> Option<String> {
        self.name(StringId::TypographicSubFamily)
            .or_else(|| self.name(StringId::SubFamily))
    }

    fn variation_axes(&self) -> Vec<AxisDescriptor> {
        self.font
            .font_ref
            .variations()
            .map(|v| AxisDescriptor {
                tag: v.tag().to_be_bytes(),
                info: AxisInfo {
                    min: v.min_value(),
                    max: v.max_value(),
                    default_value: v.default_value(),
                },
            })
            .collect()
    }

    fn set_pixel_size(&mut self, pixel_size: u32) {
        self.pixel_size = pixel_size as f32;
    }

    fn set_variation_coordinates(&mut self, settings: &[VariationSetting]) {
        self.variations = settings.to_vec();
        self.coords = self
            .font
            .font_ref
            .variations()
            .normalized_coords(
                settings
                    .iter()
                    .map(|s| (swash::tag_from_bytes(&s.tag), s.value)),
            )
            .collect();
        log::debug!("Normalized variation coordinates: {:?}", self.coords);
    }

    fn glyph_index(&self, ch: char) -> u32 {
        self.font.font_ref.charmap().map(ch) as u32
    }

    fn rasterize_glyph(&mut self, glyph_id: u32) -> Result<RasterizedGlyph, FontError> {
        if glyph_id >= self.glyph_count as u32 {
            return Err(FontError::Rasterization { glyph_id });
        }
        let gid = glyph_id as swash::GlyphId;
        let font = self.font.font_ref;

        let advance = font
            .glyph_metrics(&self.coords)
            .scale(self.pixel_size)
            .advance_width(gid)
            .round();

        let mut scaler = self
            .scale_context
            .builder(font)
            .size(self.pixel_size)
            .hint(true)
            .normalized_coords(&self.coords)
            .build();

        let Some(image) = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, gid)
        else {
            // No outline (space, empty glyph): nothing to draw, advance still applies.
            log::trace!("Glyph {} has no outline", glyph_id);
            return Ok(RasterizedGlyph {
                advance,
                ..RasterizedGlyph::default()
            });
        };

        // Only outline sources are requested, so anything but a mask is a
        // backend surprise.
        if image.content != Content::Mask {
            return Err(FontError::Rasterization { glyph_id });
        }

        Ok(RasterizedGlyph {
            width: image.placement.width,
            height: image.placement.height,
            bearing_x: image.placement.left,
            bearing_y: image.placement.top,
            advance,
            coverage: image.data,
        })
    }

    fn metrics(&self) -> FaceMetrics {
        let font = self.font.font_ref;
        let m = font.metrics(&self.coords).scale(self.pixel_size);
        let ascender = m.ascent.round();
        let descender = -m.descent.round();
        FaceMetrics {
            ascender,
            descender,
            height: (m.ascent + m.descent + m.leading).round(),
        }
    }

    fn shape(&self, text: &str, options: &ShapingOptions) -> Vec<ShapedGlyph> {
        text_shaper::shape_text(
            &self.font,
            &self.variations,
            self.pixel_size,
            text,
            options,
        )
    }

    fn extents_for_direction(&self, direction: TextDirection) -> FontExtents {
        text_shaper::direction_extents(&self.font, &self.variations, self.pixel_size, direction)
    }
}
