//! Font data and variation axis types.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use swash::FontRef;

/// Stores font data with lifetime management.
///
/// Owns the font bytes and a `FontRef` borrowing them. The `FontRef` is
/// valid for the lifetime of this struct.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF)
    pub data: Arc<Vec<u8>>,
    /// Face index within the data (non-zero only for collections)
    pub face_index: usize,
    /// Swash font reference for glyph operations
    pub font_ref: FontRef<'static>,
}

impl fmt::Debug for FontData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes using face index 0.
    ///
    /// Returns `None` if swash cannot parse the data.
    pub fn new(data: Vec<u8>) -> Option<Self> {
        Self::new_with_index(data, 0)
    }

    /// Create a new FontData from bytes with a specific face index.
    pub fn new_with_index(data: Vec<u8>, face_index: usize) -> Option<Self> {
        let data_arc = Arc::new(data);

        // SAFETY: The bytes live in the Arc stored next to the FontRef, and
        // the Arc's heap allocation never moves. Both fields are dropped
        // together, so the FontRef never outlives the bytes it borrows.
        let font_ref = unsafe {
            let bytes = data_arc.as_slice();
            let static_bytes: &'static [u8] = std::mem::transmute(bytes);
            FontRef::from_index(static_bytes, face_index)?
        };

        Some(FontData {
            data: data_arc,
            face_index,
            font_ref,
        })
    }
}

/// The registered variation axes the test bench exposes controls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariationAxis {
    Italic,
    OpticalSize,
    Slant,
    Weight,
    Width,
}

impl VariationAxis {
    pub const ALL: [VariationAxis; 5] = [
        VariationAxis::Italic,
        VariationAxis::OpticalSize,
        VariationAxis::Slant,
        VariationAxis::Weight,
        VariationAxis::Width,
    ];

    /// OpenType registered axis tag.
    pub const fn tag(self) -> [u8; 4] {
        match self {
            VariationAxis::Italic => *b"ital",
            VariationAxis::OpticalSize => *b"opsz",
            VariationAxis::Slant => *b"slnt",
            VariationAxis::Weight => *b"wght",
            VariationAxis::Width => *b"wdth",
        }
    }

    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.tag() == tag)
    }

    pub fn label(self) -> &'static str {
        match self {
            VariationAxis::Italic => "Italic",
            VariationAxis::OpticalSize => "Optical size",
            VariationAxis::Slant => "Slant",
            VariationAxis::Weight => "Weight",
            VariationAxis::Width => "Width",
        }
    }
}

impl fmt::Display for VariationAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a four-letter tag (`wght`) or a label (`weight`, `optical-size`).
impl FromStr for VariationAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(tag) = <[u8; 4]>::try_from(s.as_bytes())
            && let Some(axis) = Self::from_tag(tag)
        {
            return Ok(axis);
        }
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|axis| {
                axis.label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(normalized.chars())
            })
            .ok_or_else(|| format!("unknown variation axis '{s}'"))
    }
}

/// Range and default of one axis, in user (design) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisInfo {
    pub min: f32,
    pub max: f32,
    pub default_value: f32,
}

impl AxisInfo {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min.min(self.max), self.max.max(self.min))
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One axis as declared by a font's `fvar` table, registered or not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDescriptor {
    pub tag: [u8; 4],
    pub info: AxisInfo,
}

impl AxisDescriptor {
    /// The registered axis this descriptor maps to, if any.
    pub fn axis(&self) -> Option<VariationAxis> {
        VariationAxis::from_tag(self.tag)
    }

    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

/// A user-space coordinate for one axis tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationSetting {
    pub tag: [u8; 4],
    pub value: f32,
}

/// Writing direction for shaping and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottom,
}

impl TextDirection {
    pub const ALL: [TextDirection; 3] = [
        TextDirection::LeftToRight,
        TextDirection::RightToLeft,
        TextDirection::TopToBottom,
    ];

    pub fn is_vertical(self) -> bool {
        self == TextDirection::TopToBottom
    }

    pub fn label(self) -> &'static str {
        match self {
            TextDirection::LeftToRight => "Left to right",
            TextDirection::RightToLeft => "Right to left",
            TextDirection::TopToBottom => "Top to bottom",
        }
    }

    pub(crate) fn to_rustybuzz(self) -> rustybuzz::Direction {
        match self {
            TextDirection::LeftToRight => rustybuzz::Direction::LeftToRight,
            TextDirection::RightToLeft => rustybuzz::Direction::RightToLeft,
            TextDirection::TopToBottom => rustybuzz::Direction::TopToBottom,
        }
    }
}
