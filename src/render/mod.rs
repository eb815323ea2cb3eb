//! Vector stroke renderer: [`Page`] → foreground SVG.
//!
//! # Output
//!
//! ```text
//! <svg viewBox=…>
//!   <g id="<uuid>" style="display:inline" [transform=…]>
//!     highlighter polylines     pass 1, palette highlight color
//!     other polylines           pass 2, palette color by code
//!     <rect …/>                 transparent full-page canvas
//!   </g>
//! </svg>
//! ```
//!
//! Highlighters go first so that ink drawn later stays on top of them
//! regardless of layer order.
//!
//! # Width and opacity variation
//!
//! A stroke is split into polylines of at most eight segments. Each new
//! polyline restarts at the last point of the previous one (the boundary
//! point is written twice) and takes its width from the segment's width and
//! speed and its opacity from the pencil opacity scaled by pressure.

mod document;
mod geometry;
pub mod optimize;

pub use document::SvgDocument;
pub use geometry::PageGeometry;

use crate::config::Palette;
use crate::model::{CodeKind, Orientation, Page, PencilType, Segment, Stroke, Warning};
use std::fmt::Write;
use uuid::Uuid;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Segments per polyline before a split.
pub const SPLIT_EVERY: usize = 8;

pub struct Renderer<'a> {
    palette: &'a Palette,
}

impl<'a> Renderer<'a> {
    pub const fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    /// Render a page with a fresh random group id.
    pub fn render(&self, page: &Page, orientation: Orientation) -> SvgDocument {
        self.render_with_id(page, orientation, &Uuid::new_v4().to_string())
    }

    /// Render a page with a fixed group id.
    pub fn render_with_id(&self, page: &Page, orientation: Orientation, group_id: &str) -> SvgDocument {
        let geometry = PageGeometry::for_page(page, orientation);
        let mut out = String::with_capacity(256 + page.segment_count() * 16);

        let _ = write!(
            out,
            r#"<svg xmlns="{SVG_NS}" height="100%" width="100%" viewBox="{}">"#,
            geometry.view_box()
        );
        let _ = write!(out, r#"<g id="{group_id}" style="display:inline""#);
        if let Some(transform) = geometry.transform() {
            let _ = write!(out, r#" transform="{transform}""#);
        }
        out.push_str(">\n");

        for (_, stroke) in page.strokes().filter(|(_, s)| s.is_highlighter()) {
            write_stroke(&mut out, stroke, &self.palette.highlight);
        }
        for (_, stroke) in page.strokes().filter(|(_, s)| !s.is_highlighter()) {
            write_stroke(&mut out, stroke, self.palette.color(stroke.color()));
        }

        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}" fill-opacity="0"/>"#,
            page.horizontal_width, page.vertical_width
        );
        out.push_str("</g></svg>\n");

        SvgDocument::new(out)
    }

    /// Unknown pencil and color codes on a page, in stroke order.
    pub fn unknown_codes(page: &Page) -> Vec<Warning> {
        let mut warnings = Vec::new();
        for (layer, stroke) in page.strokes() {
            let unknown = [
                (CodeKind::Pencil, stroke.pencil_code, stroke.pencil().is_none()),
                (CodeKind::Color, stroke.color_code, stroke.color().is_none()),
            ];
            for (kind, code, missing) in unknown {
                if missing {
                    warnings.push(Warning::UnknownCode {
                        kind,
                        code,
                        layer: layer.layer_number,
                        stroke: stroke.stroke_number,
                    });
                }
            }
        }
        warnings
    }
}

/// Write one stroke as one or more polylines; strokes without segments are skipped.
fn write_stroke(out: &mut String, stroke: &Stroke, color: &str) {
    let Some(first) = stroke.first_segment() else {
        return;
    };
    let base_opacity = stroke.pencil().map_or(1.0, PencilType::opacity);
    let last = stroke.segments.len();

    open_polyline(out, color, f64::from(first.width), base_opacity);
    for (i, segment) in stroke.segments.iter().enumerate() {
        write_point(out, segment);

        let position = i + 1;
        if position % SPLIT_EVERY == 0 && position < last {
            close_polyline(out);
            open_polyline(
                out,
                color,
                f64::from(split_width(segment) as f32),
                split_opacity(base_opacity, segment),
            );
            write_point(out, segment);
        }
    }
    close_polyline(out);
}

fn open_polyline(out: &mut String, color: &str, width: f64, opacity: f64) {
    let _ = write!(
        out,
        r#"<polyline fill="none" stroke="{color}" stroke-width="{}" opacity="{}" stroke-linejoin="round" stroke-linecap="round" shape-rendering="geometricPrecision" points=""#,
        fixed2(width),
        fixed2(opacity),
    );
}

fn write_point(out: &mut String, segment: &Segment) {
    let _ = write!(
        out,
        "{}, {} ",
        fixed2(f64::from(segment.x)),
        fixed2(f64::from(segment.y))
    );
}

/// Two decimals, ties rounded away from zero (`2.125` → `2.13`).
///
/// Rounds the shortest decimal form of `value` digit by digit, so exact
/// ties are not lost to binary multiplication.
pub fn fixed2(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value:.2}");
    }
    let shortest = format!("{}", value.abs());
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((&shortest, ""));
    let frac = frac_part.as_bytes();

    // Integer part followed by two fraction digits, as decimal digits
    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    digits.extend((0..2).map(|i| frac.get(i).map_or(0, |b| b - b'0')));

    if frac.get(2).is_some_and(|&b| b >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let (int_digits, frac_digits) = digits.split_at(digits.len() - 2);
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(int_digits.iter().map(|d| char::from(b'0' + d)));
    out.push('.');
    out.extend(frac_digits.iter().map(|d| char::from(b'0' + d)));
    out
}

fn close_polyline(out: &mut String) {
    out.push_str("\"/>\n");
}

/// Width of a polyline opened at `segment`.
pub fn split_width(segment: &Segment) -> f64 {
    0.9 * (f64::from(segment.width) + 0.6 * f64::from(segment.speed))
}

/// Opacity of a polyline opened at `segment`, rounded to two decimals.
pub fn split_opacity(base_opacity: f64, segment: &Segment) -> f64 {
    let opacity = (base_opacity * f64::from(segment.pressure) * 100.0).round() / 100.0;
    // Avoid "-0.00" for zero opacity with negative pressure
    if opacity > 0.0 { opacity } else { 0.0 }
}

/// Number of polylines a stroke with `segments` segments renders to.
pub const fn polyline_count(segments: usize) -> usize {
    if segments == 0 {
        0
    } else {
        1 + (segments - 1) / SPLIT_EVERY
    }
}
