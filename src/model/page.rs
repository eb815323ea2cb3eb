//! Decoded page tree: page → layers → strokes → segments.

use serde::Serialize;

use super::pencil::{PencilType, StrokeColor};

/// Device canvas width in pixels.
pub const DEFAULT_HORIZONTAL_WIDTH: u32 = 1404;
/// Device canvas height in pixels.
pub const DEFAULT_VERTICAL_WIDTH: u32 = 1872;

/// One decoded `.rm` page.
///
/// Built once by [`crate::lines::decode`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub page_number: u32,
    /// Format version from the header, `0` when the header is unrecognized.
    pub version: u8,
    pub horizontal_width: u32,
    pub vertical_width: u32,
    pub layers: Vec<Layer>,
}

impl Page {
    pub fn new(page_number: u32, version: u8, layers: Vec<Layer>) -> Self {
        Self {
            page_number,
            version,
            horizontal_width: DEFAULT_HORIZONTAL_WIDTH,
            vertical_width: DEFAULT_VERTICAL_WIDTH,
            layers,
        }
    }

    /// Iterate all strokes in layer-then-stroke order.
    pub fn strokes(&self) -> impl Iterator<Item = (&Layer, &Stroke)> {
        self.layers
            .iter()
            .flat_map(|layer| layer.strokes.iter().map(move |stroke| (layer, stroke)))
    }

    pub fn stroke_count(&self) -> usize {
        self.layers.iter().map(|l| l.strokes.len()).sum()
    }

    pub fn segment_count(&self) -> usize {
        self.strokes().map(|(_, s)| s.segments.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stroke_count() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub layer_number: u32,
    pub strokes: Vec<Stroke>,
}

impl Layer {
    pub const fn new(layer_number: u32) -> Self {
        Self {
            layer_number,
            strokes: Vec::new(),
        }
    }
}

/// One continuous pen gesture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub stroke_number: u32,
    /// Raw pencil code, see [`PencilType::from_code`].
    pub pencil_code: i32,
    /// Raw color code, see [`StrokeColor::from_code`].
    pub color_code: i32,
    pub pen_width: f32,
    pub segments: Vec<Segment>,
}

impl Stroke {
    #[inline]
    pub fn pencil(&self) -> Option<PencilType> {
        PencilType::from_code(self.pencil_code)
    }

    #[inline]
    pub fn color(&self) -> Option<StrokeColor> {
        StrokeColor::from_code(self.color_code)
    }

    #[inline]
    pub fn is_highlighter(&self) -> bool {
        self.pencil().is_some_and(PencilType::is_highlighter)
    }

    pub fn first_segment(&self) -> Option<&Segment> {
        self.segments.first()
    }
}

/// One sampled point of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// 1-based position within the stroke.
    pub index: u32,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Tilt / stroke direction.
    pub direction: f32,
    pub width: f32,
    pub pressure: f32,
}
