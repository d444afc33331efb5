//! Deterministic stub font shared by the render integration tests.
//!
//! Every glyph is an 8x10 box sitting on the baseline (bearing 1, 10) with a
//! 10px advance, except `W` (20px) and space (no ink). Glyph `0xFFFF` fails
//! to rasterize. Line metrics: ascender 8, descender -2, height 12.
//! The variable flavor exposes `wght` (100..900, default 400), which widens
//! glyphs by one pixel per 100 units, plus an unregistered `GRAD` axis.

#![allow(dead_code)]

use glyphlab_fonts::{
    AxisDescriptor, AxisInfo, FaceMetrics, FontError, FontExtents, FontFace, FontLoader,
    RasterizedGlyph, ShapedGlyph, ShapingOptions, TextDirection, VariationSetting,
};
use glyphlab_render::FontInstance;
use std::cell::Cell;
use std::rc::Rc;

pub const STATIC_FONT: &[u8] = b"stub";
pub const VARIABLE_FONT: &[u8] = b"stub-var";
pub const FAILING_GLYPH: char = '\u{FFFF}';

pub const ASCENDER: f32 = 8.0;
pub const DESCENDER: f32 = -2.0;
pub const LINE_HEIGHT: f32 = 12.0;

#[derive(Default, Clone)]
pub struct StubLoader {
    pub shape_calls: Rc<Cell<usize>>,
}

impl FontLoader for StubLoader {
    type Face = StubFace;

    fn load(&self, data: Vec<u8>) -> Result<StubFace, FontError> {
        let variable = if data == STATIC_FONT {
            false
        } else if data == VARIABLE_FONT {
            true
        } else {
            return Err(FontError::Load("not a stub font".into()));
        };
        Ok(StubFace {
            variable,
            pixel_size: 0,
            weight: 400.0,
            shape_calls: Rc::clone(&self.shape_calls),
        })
    }
}

pub struct StubFace {
    variable: bool,
    pixel_size: u32,
    weight: f32,
    shape_calls: Rc<Cell<usize>>,
}

pub fn advance_for(glyph_id: u32) -> f32 {
    if glyph_id == 'W' as u32 { 20.0 } else { 10.0 }
}

impl FontFace for StubFace {
    fn family_name(&self) -> Option<String> {
        Some("Stub".into())
    }

    fn sub_family_name(&self) -> Option<String> {
        Some("Regular".into())
    }

    fn variation_axes(&self) -> Vec<AxisDescriptor> {
        if !self.variable {
            return Vec::new();
        }
        vec![
            AxisDescriptor {
                tag: *b"wght",
                info: AxisInfo {
                    min: 100.0,
                    max: 900.0,
                    default_value: 400.0,
                },
            },
            AxisDescriptor {
                tag: *b"GRAD",
                info: AxisInfo {
                    min: -100.0,
                    max: 100.0,
                    default_value: 0.0,
                },
            },
        ]
    }

    fn set_pixel_size(&mut self, pixel_size: u32) {
        self.pixel_size = pixel_size;
    }

    fn set_variation_coordinates(&mut self, settings: &[VariationSetting]) {
        for setting in settings {
            if &setting.tag == b"wght" {
                self.weight = setting.value;
            }
        }
    }

    fn glyph_index(&self, ch: char) -> u32 {
        ch as u32
    }

    fn rasterize_glyph(&mut self, glyph_id: u32) -> Result<RasterizedGlyph, FontError> {
        if glyph_id == FAILING_GLYPH as u32 {
            return Err(FontError::Rasterization { glyph_id });
        }
        if glyph_id == ' ' as u32 {
            return Ok(RasterizedGlyph {
                advance: 10.0,
                ..Default::default()
            });
        }
        let width = (8.0 + ((self.weight - 400.0) / 100.0).round()) as u32;
        Ok(RasterizedGlyph {
            width,
            height: 10,
            bearing_x: 1,
            bearing_y: 10,
            advance: advance_for(glyph_id),
            coverage: vec![255; (width * 10) as usize],
        })
    }

    fn metrics(&self) -> FaceMetrics {
        FaceMetrics {
            ascender: ASCENDER,
            descender: DESCENDER,
            height: LINE_HEIGHT,
        }
    }

    fn shape(&self, text: &str, options: &ShapingOptions) -> Vec<ShapedGlyph> {
        self.shape_calls.set(self.shape_calls.get() + 1);
        let vertical = options.direction == TextDirection::TopToBottom;
        text.char_indices()
            .map(|(cluster, ch)| {
                let glyph_id = ch as u32;
                ShapedGlyph {
                    glyph_id,
                    cluster: cluster as u32,
                    x_advance: if vertical { 0.0 } else { advance_for(glyph_id) },
                    y_advance: if vertical { -10.0 } else { 0.0 },
                    x_offset: if vertical { -5.0 } else { 0.0 },
                    y_offset: if vertical { -10.0 } else { 0.0 },
                }
            })
            .collect()
    }

    fn extents_for_direction(&self, direction: TextDirection) -> FontExtents {
        if direction.is_vertical() {
            FontExtents {
                ascender: 5.0,
                descender: -5.0,
                line_gap: 0.0,
            }
        } else {
            FontExtents {
                ascender: ASCENDER,
                descender: DESCENDER,
                line_gap: LINE_HEIGHT - ASCENDER + DESCENDER,
            }
        }
    }
}

/// A stub instance loaded from `data` at pixel size 10.
pub fn stub_instance(data: &[u8]) -> FontInstance<StubLoader> {
    stub_instance_with(StubLoader::default(), data)
}

pub fn stub_instance_with(loader: StubLoader, data: &[u8]) -> FontInstance<StubLoader> {
    let mut font = FontInstance::with_loader(loader);
    font.load(data.to_vec()).unwrap();
    font.set_pixel_size(10);
    font
}
