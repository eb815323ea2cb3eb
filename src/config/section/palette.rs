//! `[palette]` section: stroke colors by color code.
//!
//! # Example
//!
//! ```toml
//! [palette]
//! primary = "black"
//! secondary = "#b93059"
//! background = "white"
//! highlight = "#76b72a"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::model::StrokeColor;
use serde::{Deserialize, Serialize};

/// Colors used when rendering strokes.
///
/// Values are written verbatim into SVG attributes, so any CSS color
/// (`black`, `#b93059`, `rgb(…)`) works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    /// Used for every highlighter stroke regardless of its color code.
    pub highlight: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "black".into(),
            secondary: "#b93059".into(),
            background: "white".into(),
            highlight: "#76b72a".into(),
        }
    }
}

pub struct PaletteFields {
    pub primary: FieldPath,
    pub secondary: FieldPath,
    pub background: FieldPath,
    pub highlight: FieldPath,
}

impl Palette {
    pub const FIELDS: PaletteFields = PaletteFields {
        primary: FieldPath::new("palette.primary"),
        secondary: FieldPath::new("palette.secondary"),
        background: FieldPath::new("palette.background"),
        highlight: FieldPath::new("palette.highlight"),
    };

    /// Resolve a stroke color, falling back to primary for unknown codes.
    pub fn color(&self, color: Option<StrokeColor>) -> &str {
        match color {
            Some(StrokeColor::Primary) | None => &self.primary,
            Some(StrokeColor::Secondary) => &self.secondary,
            Some(StrokeColor::Background) => &self.background,
            Some(StrokeColor::Highlight) => &self.highlight,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let fields = [
            (Self::FIELDS.primary, &self.primary),
            (Self::FIELDS.secondary, &self.secondary),
            (Self::FIELDS.background, &self.background),
            (Self::FIELDS.highlight, &self.highlight),
        ];
        for (field, value) in fields {
            validate_color(field, value, diag);
        }
    }
}

/// Reject values that cannot be embedded in an attribute or a CSS declaration.
pub fn validate_color(field: FieldPath, value: &str, diag: &mut ConfigDiagnostics) {
    if value.trim().is_empty() {
        diag.error(field, "color must not be empty");
    } else if value.contains(['"', '<', '&', ';']) {
        diag.error_with_hint(
            field,
            format!("invalid color `{value}`"),
            "use a CSS color name, `#rrggbb` or `rgb(r, g, b)`",
        );
    }
}
