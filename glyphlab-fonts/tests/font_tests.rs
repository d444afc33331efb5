//! Integration tests for glyphlab-fonts.

use glyphlab_fonts::{
    FontCatalog, FontData, FontError, FontFace, FontLoader, ShapingOptions, SwashLoader,
    TextDirection,
};
use std::fs;
use tempfile::TempDir;

/// Embedded DejaVu Sans for testing.
const TEST_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

fn load_face(size: u32) -> glyphlab_fonts::SwashFace {
    let mut face = SwashLoader.load(TEST_FONT.to_vec()).unwrap();
    face.set_pixel_size(size);
    face
}

#[test]
fn test_font_data_from_embedded() {
    let font_data = FontData::new(TEST_FONT.to_vec());
    assert!(font_data.is_some(), "Should load embedded font successfully");
}

#[test]
fn test_font_data_invalid_bytes() {
    assert!(FontData::new(vec![0u8; 100]).is_none());
    assert!(FontData::new(vec![]).is_none());
}

#[test]
fn test_font_data_debug() {
    let font_data = FontData::new(TEST_FONT.to_vec()).unwrap();
    let debug_str = format!("{:?}", font_data);
    assert!(debug_str.contains("FontData"));
    assert!(debug_str.contains("data_len"));
}

#[test]
fn test_loader_rejects_garbage() {
    let result = SwashLoader.load(b"definitely not a font".to_vec());
    assert!(matches!(result, Err(FontError::Load(_))));
}

#[test]
fn test_names() {
    let face = load_face(16);
    assert_eq!(face.family_name().as_deref(), Some("DejaVu Sans"));
    assert_eq!(face.sub_family_name().as_deref(), Some("Book"));
}

#[test]
fn test_static_font_has_no_axes() {
    let face = load_face(16);
    assert!(face.variation_axes().is_empty());
}

#[test]
fn test_glyph_index() {
    let face = load_face(16);
    assert_ne!(face.glyph_index('A'), 0);
    assert_ne!(face.glyph_index('A'), face.glyph_index('B'));
    assert_eq!(face.glyph_index('中'), 0, "DejaVu Sans has no CJK");
}

#[test]
fn test_rasterize_letter() {
    let mut face = load_face(32);
    let gid = face.glyph_index('A');
    let glyph = face.rasterize_glyph(gid).unwrap();
    assert!(!glyph.is_empty());
    assert_eq!(glyph.coverage.len(), (glyph.width * glyph.height) as usize);
    assert!(glyph.bearing_y > 0, "'A' sits on the baseline");
    assert!(glyph.advance > 0.0);
}

#[test]
fn test_advance_scales_with_size() {
    let mut face = load_face(32);
    let gid = face.glyph_index('H');
    let small = face.rasterize_glyph(gid).unwrap().advance;
    face.set_pixel_size(64);
    let large = face.rasterize_glyph(gid).unwrap().advance;
    assert!(
        (large - 2.0 * small).abs() <= 2.0,
        "doubling size should roughly double advance: {small} -> {large}"
    );
}

#[test]
fn test_rasterize_space_is_empty_with_advance() {
    let mut face = load_face(32);
    let gid = face.glyph_index(' ');
    let glyph = face.rasterize_glyph(gid).unwrap();
    assert!(glyph.is_empty());
    assert!(glyph.advance > 0.0);
}

#[test]
fn test_rasterize_out_of_range_glyph_fails() {
    let mut face = load_face(32);
    let result = face.rasterize_glyph(u16::MAX as u32 + 10);
    assert!(matches!(
        result,
        Err(FontError::Rasterization { .. })
    ));
}

#[test]
fn test_metrics_signs() {
    let face = load_face(64);
    let m = face.metrics();
    assert!(m.ascender > 0.0);
    assert!(m.descender < 0.0);
    assert!(m.height >= m.ascender - m.descender - 1.0);
}

#[test]
fn test_shape_ltr() {
    let face = load_face(32);
    let run = face.shape("AB", &ShapingOptions::new(TextDirection::LeftToRight));
    assert_eq!(run.len(), 2);
    assert_eq!(run[0].glyph_id, face.glyph_index('A'));
    assert_eq!(run[1].glyph_id, face.glyph_index('B'));
    assert!(run.iter().all(|g| g.x_advance > 0.0));
}

#[test]
fn test_shape_rtl_is_visual_order() {
    let face = load_face(32);
    let run = face.shape("AB", &ShapingOptions::new(TextDirection::RightToLeft));
    assert_eq!(run.len(), 2);
    assert_eq!(run[0].glyph_id, face.glyph_index('B'));
    assert_eq!(run[1].glyph_id, face.glyph_index('A'));
}

#[test]
fn test_shape_ttb_advances_down() {
    let face = load_face(32);
    let run = face.shape("AB", &ShapingOptions::new(TextDirection::TopToBottom));
    assert_eq!(run.len(), 2);
    assert!(run.iter().all(|g| g.y_advance < 0.0));
}

#[test]
fn test_shape_empty() {
    let face = load_face(32);
    assert!(face
        .shape("", &ShapingOptions::new(TextDirection::LeftToRight))
        .is_empty());
}

#[test]
fn test_shape_with_script_and_language() {
    let face = load_face(32);
    let options = ShapingOptions::new(TextDirection::LeftToRight)
        .with_script("Zyyy")
        .with_language("en-US");
    let run = face.shape("AV", &options);
    assert_eq!(run.len(), 2);
    assert_eq!(run[0].glyph_id, face.glyph_index('A'));
}

#[test]
fn test_extents() {
    let face = load_face(64);
    let horizontal = face.extents_for_direction(TextDirection::LeftToRight);
    assert!(horizontal.ascender > 0.0);
    assert!(horizontal.descender < 0.0);

    let vertical = face.extents_for_direction(TextDirection::TopToBottom);
    let line_width = -vertical.ascender + vertical.descender + vertical.line_gap;
    assert!(line_width < 0.0, "columns advance leftward");
}

#[test]
fn test_catalog_scan() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.ttf"), TEST_FONT).unwrap();
    fs::write(dir.path().join("a.OTF"), b"garbage").unwrap();
    fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
    fs::create_dir(dir.path().join("sub.ttf")).unwrap();

    let catalog = FontCatalog::scan(dir.path()).unwrap();
    let names: Vec<String> = catalog.entries().iter().map(|e| e.file_name()).collect();
    assert_eq!(names, vec!["a.OTF".to_string(), "b.ttf".to_string()]);
    assert_eq!(catalog.entries()[0].family, None);
    assert_eq!(catalog.entries()[1].family.as_deref(), Some("DejaVu Sans"));
    assert_eq!(catalog.find("b").map(|e| e.file_name()), Some("b.ttf".to_string()));
}

#[test]
fn test_catalog_missing_dir_is_empty() {
    let dir = TempDir::new().unwrap();
    let catalog = FontCatalog::scan(dir.path().join("missing")).unwrap();
    assert!(catalog.is_empty());

    let fallback = FontCatalog::scan_or_fallback(&dir.path().join("missing"), dir.path()).unwrap();
    assert_eq!(fallback.dir(), dir.path());
}
