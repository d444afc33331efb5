mod common;

use common::TestContext;
use glyphlab::AppError;
use glyphlab::cli::{DirectionArg, RenderArgs, apply_render_args};
use glyphlab_config::{Settings, defaults};
use glyphlab_fonts::{TextDirection, VariationAxis};
use glyphlab_render::Shaping;

#[test]
fn test_catalog_lists_font_dir() {
    let ctx = TestContext::new();
    let app = ctx.app();
    assert_eq!(app.catalog().len(), 1);
    assert_eq!(app.catalog().entries()[0].family.as_deref(), Some("DejaVu Sans"));
}

#[test]
fn test_set_font_dir_persists() {
    let ctx = TestContext::new();
    let mut app = ctx.app();

    let other = ctx.dir.path().join("other");
    std::fs::create_dir_all(&other).unwrap();
    app.set_font_dir(&other).unwrap();

    assert!(app.catalog().is_empty());
    let saved = Settings::read_from(&ctx.settings_path()).unwrap();
    assert_eq!(saved.font_dir, other);
}

#[test]
fn test_set_same_font_dir_does_not_write() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    app.set_font_dir(&ctx.font_dir()).unwrap();
    assert!(!ctx.settings_path().exists());
}

#[test]
fn test_open_font_by_stem() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    app.open_font("dejavusans").unwrap();

    assert_eq!(app.font().family_name(), "DejaVu Sans");
    assert_eq!(app.font().pixel_size(), Some(defaults::font_size()));
    assert!(app.font().is_valid());
    assert_eq!(app.font_path(), Some(ctx.font_dir().join("DejaVuSans.ttf").as_path()));
}

#[test]
fn test_open_missing_font_keeps_current() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    app.open_font("DejaVuSans.ttf").unwrap();

    let err = app.open_font("NoSuchFont").unwrap_err();
    assert!(matches!(err, AppError::FontNotFound { .. }));
    assert_eq!(app.font().family_name(), "DejaVu Sans");
}

#[test]
fn test_open_first_font_empty_dir() {
    let ctx = TestContext::new();
    let empty = ctx.dir.path().join("empty");
    std::fs::create_dir_all(&empty).unwrap();
    let mut app = ctx.app();
    app.set_font_dir(&empty).unwrap();

    let err = app.open_first_font().unwrap_err();
    assert!(matches!(err, AppError::NoFonts(_)));
}

#[test]
fn test_font_size_is_clamped() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    app.open_first_font().unwrap();

    app.set_font_size(500);
    assert_eq!(app.options.font_size, defaults::MAX_FONT_SIZE);
    assert_eq!(app.font().pixel_size(), Some(defaults::MAX_FONT_SIZE));
}

#[test]
fn test_render_to_png() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    app.set_surface_size(320, 120);
    app.set_font_size(24);
    app.open_first_font().unwrap();

    let out = ctx.dir.path().join("out.png");
    let stats = app.render_to_png("Hello\nglyphlab", &out).unwrap();
    assert_eq!(stats.lines, 2);
    assert!(stats.draws > 0);

    let image = image::open(&out).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (320, 120));
    let background = app.options.background.as_array();
    assert!(image.pixels().any(|p| p.0 != background));
}

#[test]
fn test_reopening_font_does_not_leak_textures() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    app.set_surface_size(320, 120);
    app.set_font_size(24);
    app.open_first_font().unwrap();

    app.render("abc").unwrap();
    let first = app.canvas().unwrap().texture_count();
    assert!(first > 0);

    app.open_first_font().unwrap();
    app.render("abc").unwrap();
    assert_eq!(app.canvas().unwrap().texture_count(), first);
}

#[test]
fn test_render_recorded_releases_everything() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    app.set_font_size(24);
    app.open_first_font().unwrap();

    let (backend, stats) = app.render_recorded("abc");
    assert_eq!(stats.glyphs, 3);
    assert_eq!(backend.count_quads(), 3);
    assert_eq!(backend.live_textures(), 0);
    assert_eq!(backend.bad_releases(), 0);
    assert!(app.canvas().is_none());
}

#[test]
fn test_apply_render_args() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    let args = RenderArgs {
        direction: DirectionArg::Ttb,
        script: Some("arabic".to_string()),
        language: Some("Japanese Japan".to_string()),
        axes: vec![(VariationAxis::Weight, 700.0)],
        debug: true,
        no_caret: true,
        width: Some(640),
        ..RenderArgs::default()
    };
    apply_render_args(&mut app, &args);

    let options = &app.options;
    assert_eq!(options.mode.shaping, Shaping::Shaped);
    assert_eq!(options.mode.direction, TextDirection::TopToBottom);
    assert_eq!(options.script.as_deref(), Some("Arab"));
    assert_eq!(options.language.as_deref(), Some("ja-JP"));
    assert_eq!(options.axis_values.get(&VariationAxis::Weight), Some(&700.0));
    assert!(options.overlay.enabled);
    assert!(!options.overlay.show_caret);
    assert!(options.overlay.show_baseline);
    assert_eq!(options.surface.width, 640);
    assert_eq!(options.surface.height, defaults::surface_height());
}

#[test]
fn test_open_font_by_index() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    app.open_font("0").unwrap();
    assert_eq!(app.font().family_name(), "DejaVu Sans");
    assert!(matches!(app.open_font("7"), Err(AppError::FontNotFound { .. })));
}

#[test]
fn test_zero_font_size_still_renders() {
    let ctx = TestContext::new();
    let mut app = ctx.app();
    app.set_font_size(0);
    app.open_first_font().unwrap();

    assert_eq!(app.options.font_size, defaults::MIN_FONT_SIZE);
    assert!(app.font().is_valid());
    let (_, stats) = app.render_recorded("abc");
    assert_eq!(stats.glyphs, 3);
}
