//! Value types shared by the settings file, the CLI and the renderer.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    0xFF
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00, 0xFF);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn as_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns a copy with the alpha channel scaled by `coverage / 255`.
    pub fn with_coverage(&self, coverage: u8) -> Self {
        let a = (self.a as u16 * coverage as u16 + 127) / 255;
        Self { a: a as u8, ..*self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidValue {
            field: "color",
            value: s.to_string(),
        };
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 0xFF };
        Ok(Color::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

/// Which debug geometry the layout engine emits alongside the glyphs.
///
/// `enabled` is the master switch; the individual flags only matter while it
/// is on. None of the flags affect glyph placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DebugOverlayConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "crate::defaults::bool_true")]
    pub show_glyph_bound: bool,
    #[serde(default = "crate::defaults::bool_true")]
    pub show_baseline: bool,
    #[serde(default = "crate::defaults::bool_true")]
    pub show_caret: bool,
    #[serde(default = "crate::defaults::bool_true")]
    pub show_ascend_band: bool,
    #[serde(default = "crate::defaults::bool_true")]
    pub show_descend_band: bool,
}

impl Default for DebugOverlayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            show_glyph_bound: true,
            show_baseline: true,
            show_caret: true,
            show_ascend_band: true,
            show_descend_band: true,
        }
    }
}

impl DebugOverlayConfig {
    /// All flags on, master switch on.
    pub fn all() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn glyph_bound(&self) -> bool {
        self.enabled && self.show_glyph_bound
    }

    pub fn baseline(&self) -> bool {
        self.enabled && self.show_baseline
    }

    pub fn caret(&self) -> bool {
        self.enabled && self.show_caret
    }

    pub fn ascend_band(&self) -> bool {
        self.enabled && self.show_ascend_band
    }

    pub fn descend_band(&self) -> bool {
        self.enabled && self.show_descend_band
    }
}

/// Colors used for the debug overlay geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayColors {
    pub glyph_bound: Color,
    pub baseline: Color,
    pub caret: Color,
    pub ascend: Color,
    pub descend: Color,
}

impl Default for OverlayColors {
    fn default() -> Self {
        Self {
            glyph_bound: Color::new(0xFF, 0xFF, 0x80, 0xFF),
            baseline: Color::new(0xFF, 0x00, 0x00, 0xFF),
            caret: Color::new(0x00, 0xFF, 0xFF, 0xFF),
            ascend: Color::new(0x40, 0x40, 0xFF, 0x80),
            descend: Color::new(0x40, 0xFF, 0x40, 0x80),
        }
    }
}

/// Log level for the glyphlab log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Off => "Off",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::all()
            .iter()
            .copied()
            .find(|level| level.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "log level",
                value: s.to_string(),
            })
    }
}
