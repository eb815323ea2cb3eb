//! Pencil and color lookup tables.
//!
//! Both tables are keyed by the integer codes stored in a `.rm` stroke record.
//! The code domains are fixed by the device format, so lookups are plain
//! `match` tables returning `None` for anything unknown.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PencilType
// ============================================================================

/// Drawing instrument of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PencilType {
    Ballpoint,
    Calligraphy,
    Highlighter,
    Paintbrush,
    MechanicalPencil,
    Pencil,
    Marker,
    Fineliner,
    Eraser,
}

impl PencilType {
    /// All pencil types, in device code order of appearance.
    pub const ALL: [PencilType; 9] = [
        Self::Ballpoint,
        Self::Calligraphy,
        Self::Highlighter,
        Self::Paintbrush,
        Self::MechanicalPencil,
        Self::Pencil,
        Self::Marker,
        Self::Fineliner,
        Self::Eraser,
    ];

    /// Resolve a stroke record's pencil code.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            15 => Some(Self::Ballpoint),
            21 => Some(Self::Calligraphy),
            18 => Some(Self::Highlighter),
            12 => Some(Self::Paintbrush),
            13 => Some(Self::MechanicalPencil),
            14 => Some(Self::Pencil),
            16 => Some(Self::Marker),
            17 => Some(Self::Fineliner),
            6 => Some(Self::Eraser),
            _ => None,
        }
    }

    /// Device code of this pencil.
    pub const fn code(self) -> i32 {
        match self {
            Self::Ballpoint => 15,
            Self::Calligraphy => 21,
            Self::Highlighter => 18,
            Self::Paintbrush => 12,
            Self::MechanicalPencil => 13,
            Self::Pencil => 14,
            Self::Marker => 16,
            Self::Fineliner => 17,
            Self::Eraser => 6,
        }
    }

    /// Base opacity multiplier applied to every polyline of the stroke.
    pub const fn opacity(self) -> f64 {
        match self {
            Self::Highlighter => 0.2,
            Self::Marker => 0.9,
            Self::Eraser => 0.0,
            _ => 1.0,
        }
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ballpoint => "Ballpoint pen",
            Self::Calligraphy => "Calligraphy pen",
            Self::Highlighter => "Highlighter",
            Self::Paintbrush => "Paintbrush",
            Self::MechanicalPencil => "Mechanical pencil",
            Self::Pencil => "Pencil",
            Self::Marker => "Marker",
            Self::Fineliner => "Fineliner",
            Self::Eraser => "Eraser",
        }
    }

    #[inline]
    pub const fn is_highlighter(self) -> bool {
        matches!(self, Self::Highlighter)
    }
}

impl fmt::Display for PencilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// StrokeColor
// ============================================================================

/// Palette slot of a stroke.
///
/// The device only stores the slot; the actual color value comes from
/// [`Palette`](crate::config::Palette).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeColor {
    Primary,
    Secondary,
    Background,
    Highlight,
}

impl StrokeColor {
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Secondary),
            2 => Some(Self::Background),
            3 => Some(Self::Highlight),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Background => 2,
            Self::Highlight => 3,
        }
    }
}
