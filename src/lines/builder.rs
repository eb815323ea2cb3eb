//! Test helper that writes `.rm` buffers.

use super::header::HEADER_PREFIX;

/// Raw stroke record: pencil code, color code, pen width, segments.
///
/// Each segment is `[x, y, speed, direction, width, pressure]`.
#[derive(Debug, Clone)]
pub struct StrokeSpec {
    pub pencil: i32,
    pub color: i32,
    pub width: f32,
    pub segments: Vec<[f32; 6]>,
}

#[derive(Debug, Clone)]
pub struct PageBuilder {
    header: Vec<u8>,
    layers: Vec<Vec<StrokeSpec>>,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuilder {
    /// Version 5 header padded with spaces, like device files.
    pub fn new() -> Self {
        Self {
            header: format!("{HEADER_PREFIX}5          ").into_bytes(),
            layers: Vec::new(),
        }
    }

    pub fn header(mut self, header: &str) -> Self {
        self.header = header.as_bytes().to_vec();
        self
    }

    pub fn layer(mut self) -> Self {
        self.layers.push(Vec::new());
        self
    }

    /// Append a stroke to the last layer, opening one if needed.
    pub fn stroke(mut self, pencil: i32, color: i32, segments: Vec<[f32; 6]>) -> Self {
        if self.layers.is_empty() {
            self.layers.push(Vec::new());
        }
        let width = segments.first().map_or(2.0, |s| s[4]);
        self.layers.last_mut().unwrap().push(StrokeSpec {
            pencil,
            color,
            width,
            segments,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.header.clone();
        push_i32(&mut out, self.layers.len() as i32);
        for layer in &self.layers {
            push_i32(&mut out, layer.len() as i32);
            for stroke in layer {
                push_i32(&mut out, stroke.pencil);
                push_i32(&mut out, stroke.color);
                push_i32(&mut out, 0);
                out.extend_from_slice(&stroke.width.to_le_bytes());
                push_i32(&mut out, 0);
                push_i32(&mut out, stroke.segments.len() as i32);
                for segment in &stroke.segments {
                    for value in segment {
                        out.extend_from_slice(&value.to_le_bytes());
                    }
                }
            }
        }
        out
    }
}

fn push_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// `count` distinct segments along a diagonal.
pub fn segments(count: usize) -> Vec<[f32; 6]> {
    (1..=count)
        .map(|i| {
            let i = i as f32;
            [i * 10.0, i * 20.0, 0.5, 0.25, 2.0, 0.8]
        })
        .collect()
}
