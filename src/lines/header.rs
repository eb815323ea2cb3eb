//! Text header of a `.rm` page.
//!
//! ```text
//! reMarkable .lines file, version=5          <binary payload…>
//! └──────────────── header ────────────────┘└─ first byte < 32
//! ```

/// Literal that precedes the version digit.
pub const HEADER_PREFIX: &str = "reMarkable .lines file, version=";

/// The header never extends past this many bytes.
const SCAN_LIMIT: usize = 100;

/// Parsed header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header text with surrounding whitespace trimmed.
    pub text: String,
    /// Version digit, `0` for unrecognized headers.
    pub version: u8,
    /// Offset where the binary payload starts.
    pub len: usize,
}

/// Scan the header and parse its version.
///
/// Only printable ASCII counts as header text; the first control or
/// non-ASCII byte ends it. A missing or foreign header yields version `0`
/// and the payload is still decoded from `len`.
pub fn parse_header(bytes: &[u8]) -> Header {
    let len = bytes
        .iter()
        .take(SCAN_LIMIT)
        .position(|&b| !is_header_byte(b))
        .unwrap_or_else(|| bytes.len().min(SCAN_LIMIT));

    // Header bytes are ASCII by construction
    let text = String::from_utf8_lossy(&bytes[..len]).trim().to_string();
    let version = parse_version(&text);

    Header { text, version, len }
}

#[inline]
fn is_header_byte(b: u8) -> bool {
    (32..128).contains(&b)
}

fn parse_version(text: &str) -> u8 {
    if !text.starts_with(HEADER_PREFIX) {
        return 0;
    }
    text.chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .map_or(0, |d| d as u8)
}
