//! Shared integration test helpers for glyphlab.
//!
//! Include with `mod common;` at the top of a test file.

#![allow(dead_code)]

use glyphlab::AppContext;
use glyphlab_config::Settings;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Font shipped with the fonts crate for tests.
pub fn fixture_font() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("glyphlab-fonts/fonts/DejaVuSans.ttf")
}

/// A temp directory holding `fonts/DejaVuSans.ttf` and a settings path.
pub struct TestContext {
    pub dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let fonts = dir.path().join("fonts");
        std::fs::create_dir_all(&fonts).expect("create font dir");
        std::fs::copy(fixture_font(), fonts.join("DejaVuSans.ttf")).expect("copy fixture font");
        Self { dir }
    }

    pub fn font_dir(&self) -> PathBuf {
        self.dir.path().join("fonts")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.path().join("settings.json")
    }

    /// App over the temp font directory, persisting to the temp settings file.
    pub fn app(&self) -> AppContext {
        let settings = Settings::default().with_font_dir(self.font_dir());
        AppContext::new(settings, Some(self.settings_path())).expect("create app")
    }
}
