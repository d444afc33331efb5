/// Text shaping via rustybuzz (HarfBuzz port).
///
/// Shapes one line at a time for a given direction, script and language, and
/// reports direction-specific font extents. Results are scaled from font
/// units to pixels at the caller's pixel size.
///
/// # Vertical extents
///
/// For top-to-bottom text the `vhea` ascender/descender/line gap are used.
/// Fonts without vertical metrics get HarfBuzz's synthesized extents: half an
/// em on each side of the vertical baseline and no line gap.
use crate::face::{FontExtents, ShapedGlyph, ShapingOptions};
use crate::types::{FontData, TextDirection, VariationSetting};
use rustybuzz::ttf_parser::Tag;
use rustybuzz::{Face, GlyphBuffer, Language, Script, UnicodeBuffer, Variation};
use std::str::FromStr;

/// Build a rustybuzz face over `font` with the given variation coordinates.
fn make_face<'a>(font: &'a FontData, variations: &[VariationSetting]) -> Option<Face<'a>> {
    let mut face = Face::from_slice(&font.data, font.face_index as u32)?;
    if !variations.is_empty() {
        let variations: Vec<Variation> = variations
            .iter()
            .map(|v| Variation {
                tag: Tag::from_bytes(&v.tag),
                value: v.value,
            })
            .collect();
        face.set_variations(&variations);
    }
    Some(face)
}

/// Shape one line of text.
///
/// Returns an empty run if the face cannot be built or the text is empty.
pub fn shape_text(
    font: &FontData,
    variations: &[VariationSetting],
    pixel_size: f32,
    text: &str,
    options: &ShapingOptions,
) -> Vec<ShapedGlyph> {
    if text.is_empty() {
        return Vec::new();
    }

    let Some(face) = make_face(font, variations) else {
        log::warn!("Shaper could not parse font data");
        return Vec::new();
    };

    let mut unicode_buffer = UnicodeBuffer::new();
    unicode_buffer.push_str(text);
    unicode_buffer.set_direction(options.direction.to_rustybuzz());

    // Script hint: ISO 15924 tag, e.g. "Latn", "Arab", "Zyyy"
    if let Some(ref script_str) = options.script {
        match Script::from_str(script_str) {
            Ok(script) => unicode_buffer.set_script(script),
            Err(_) => log::warn!("Ignoring unknown script tag '{}'", script_str),
        }
    }

    // Language hint: BCP 47, e.g. "en-US", "ja-JP". Empty means unset.
    if let Some(ref lang_str) = options.language
        && !lang_str.is_empty()
    {
        match Language::from_str(lang_str) {
            Ok(lang) => unicode_buffer.set_language(lang),
            Err(_) => log::warn!("Ignoring invalid language tag '{}'", lang_str),
        }
    }

    let glyph_buffer = rustybuzz::shape(&face, &[], unicode_buffer);
    let scale = pixel_size / face.units_per_em() as f32;
    extract_shaped_glyphs(&glyph_buffer, scale)
}

/// Extract shaped glyphs from the glyph buffer, scaled to pixels.
fn extract_shaped_glyphs(buffer: &GlyphBuffer, scale: f32) -> Vec<ShapedGlyph> {
    buffer
        .glyph_infos()
        .iter()
        .zip(buffer.glyph_positions())
        .map(|(info, pos)| ShapedGlyph {
            glyph_id: info.glyph_id,
            cluster: info.cluster,
            x_advance: pos.x_advance as f32 * scale,
            y_advance: pos.y_advance as f32 * scale,
            x_offset: pos.x_offset as f32 * scale,
            y_offset: pos.y_offset as f32 * scale,
        })
        .collect()
}

/// Font extents for `direction`, in pixels.
pub fn direction_extents(
    font: &FontData,
    variations: &[VariationSetting],
    pixel_size: f32,
    direction: TextDirection,
) -> FontExtents {
    let Some(face) = make_face(font, variations) else {
        return FontExtents::default();
    };
    let upem = face.units_per_em() as f32;
    let scale = pixel_size / upem;

    let (ascender, descender, line_gap) = if direction.is_vertical() {
        match (face.vertical_ascender(), face.vertical_descender()) {
            (Some(ascender), Some(descender)) => (
                ascender as f32,
                descender as f32,
                face.vertical_line_gap().unwrap_or(0) as f32,
            ),
            _ => {
                let ascender = upem / 2.0;
                (ascender, ascender - upem, 0.0)
            }
        }
    } else {
        (
            face.ascender() as f32,
            face.descender() as f32,
            face.line_gap() as f32,
        )
    };

    FontExtents {
        ascender: ascender * scale,
        descender: descender * scale,
        line_gap: line_gap * scale,
    }
}
