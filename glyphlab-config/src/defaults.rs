//! Default values for persisted settings.

use crate::types::Color;
use std::path::PathBuf;

/// Smallest selectable pixel size.
pub const MIN_FONT_SIZE: u32 = 1;

/// Largest selectable pixel size.
pub const MAX_FONT_SIZE: u32 = 128;

pub fn font_size() -> u32 {
    64
}

/// `fonts` next to the working directory, made absolute.
pub fn font_dir() -> PathBuf {
    std::path::absolute("fonts").unwrap_or_else(|_| PathBuf::from("fonts"))
}

pub fn foreground() -> Color {
    Color::BLACK
}

pub fn background() -> Color {
    Color::new(0x80, 0x80, 0x80, 0xFF)
}

pub fn surface_width() -> u32 {
    1280
}

pub fn surface_height() -> u32 {
    720
}

pub fn sample_text() -> String {
    concat!(
        "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed non \n",
        "turpis justo. Etiam luctus vulputate ante ac congue. Nunc vitae \n",
        "ultricies turpis, eu mollis libero. Quisque eu faucibus neque. \n",
        "Aliquam risus urna, ullamcorper sit amet arcu id, feugiat semper \n",
        "dolor. Maecenas commodo turpis orci, vel laoreet felis placerat \n",
        "in. In nec metus tincidunt sem sagittis dapibus ut eget magna. \n",
        "Aenean efficitur felis sed metus mollis varius."
    )
    .to_string()
}

pub fn bool_true() -> bool {
    true
}
