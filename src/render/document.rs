//! Serialized SVG document passed between pipeline stages.

use std::fmt;

/// An SVG document as text.
///
/// Stages hand documents over by value; nothing re-parses a document
/// except the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument(String);

impl SvgDocument {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SvgDocument {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}
