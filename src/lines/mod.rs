//! Decoder for `.rm` stroke pages ("lines" files).
//!
//! # Layout
//!
//! ```text
//! header   ASCII "reMarkable .lines file, version=N", ends at first byte < 32
//! i32      number of layers
//!   i32    number of strokes
//!     i32  pencil code
//!     i32  color code
//!     i32  (reserved)
//!     f32  pen width
//!     i32  (reserved)
//!     i32  number of segments
//!       f32 × 6  x, y, speed, direction, width, pressure
//! ```
//!
//! All numbers are little-endian. There is no length prefix or checksum;
//! the declared counts must consume the buffer.

mod error;
mod header;
mod reader;

#[cfg(test)]
pub mod builder;

pub use error::DecodeError;
pub use header::{HEADER_PREFIX, Header, parse_header};

use crate::debug;
use crate::model::{Layer, Page, Segment, Stroke};
use reader::ByteReader;

/// Bytes of a stroke record before its segments.
const STROKE_HEADER_LEN: usize = 24;
/// Bytes of one segment record.
const SEGMENT_LEN: usize = 24;

/// Decode a page buffer as page number `0`.
pub fn decode(bytes: &[u8]) -> Result<Page, DecodeError> {
    decode_page(0, bytes)
}

/// Decode a page buffer.
///
/// Fails with [`DecodeError::Malformed`] on an empty buffer and with
/// [`DecodeError::Truncated`] when a declared record runs past the end.
pub fn decode_page(page_number: u32, bytes: &[u8]) -> Result<Page, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Malformed);
    }

    let header = parse_header(bytes);
    let mut reader = ByteReader::new(bytes, header.len);

    let layer_count = reader.read_count()?;
    let mut layers = Vec::with_capacity(bounded(layer_count, reader.remaining(), 4));

    for layer_number in 1..=layer_count {
        layers.push(read_layer(&mut reader, layer_number)?);
    }

    if reader.remaining() > 0 {
        debug!("decode"; "page {}: {} trailing bytes ignored", page_number, reader.remaining());
    }

    Ok(Page::new(page_number, header.version, layers))
}

fn read_layer(reader: &mut ByteReader<'_>, layer_number: u32) -> Result<Layer, DecodeError> {
    let stroke_count = reader.read_count()?;
    let mut layer = Layer::new(layer_number);
    layer.strokes = Vec::with_capacity(bounded(
        stroke_count,
        reader.remaining(),
        STROKE_HEADER_LEN,
    ));

    for stroke_number in 1..=stroke_count {
        layer.strokes.push(read_stroke(reader, stroke_number)?);
    }
    Ok(layer)
}

fn read_stroke(reader: &mut ByteReader<'_>, stroke_number: u32) -> Result<Stroke, DecodeError> {
    let pencil_code = reader.read_i32()?;
    let color_code = reader.read_i32()?;
    let _ = reader.read_i32()?;
    let pen_width = reader.read_f32()?;
    let _ = reader.read_i32()?;
    let segment_count = reader.read_count()?;

    let mut segments = Vec::with_capacity(bounded(segment_count, reader.remaining(), SEGMENT_LEN));
    for index in 1..=segment_count {
        segments.push(Segment {
            index,
            x: reader.read_f32()?,
            y: reader.read_f32()?,
            speed: reader.read_f32()?,
            direction: reader.read_f32()?,
            width: reader.read_f32()?,
            pressure: reader.read_f32()?,
        });
    }

    Ok(Stroke {
        stroke_number,
        pencil_code,
        color_code,
        pen_width,
        segments,
    })
}

/// Cap a declared record count by what the remaining bytes could hold,
/// so a corrupt count cannot trigger a huge allocation.
#[inline]
fn bounded(count: u32, remaining: usize, record_len: usize) -> usize {
    (count as usize).min(remaining / record_len)
}
