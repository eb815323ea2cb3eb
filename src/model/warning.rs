//! Non-fatal diagnostics raised while rendering or compositing.

use std::fmt;

/// Which lookup table missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Pencil,
    Color,
}

/// A problem that degrades output but never stops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A stroke carries a pencil or color code outside the known tables.
    UnknownCode {
        kind: CodeKind,
        code: i32,
        layer: u32,
        stroke: u32,
    },
    /// The page names a template that is not present in the template directory.
    MissingTemplate { name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCode {
                kind,
                code,
                layer,
                stroke,
            } => {
                let kind = match kind {
                    CodeKind::Pencil => "pencil",
                    CodeKind::Color => "color",
                };
                write!(
                    f,
                    "unknown {kind} code {code} (layer {layer}, stroke {stroke})"
                )
            }
            Self::MissingTemplate { name } => write!(f, "template `{name}` not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = Warning::UnknownCode {
            kind: CodeKind::Pencil,
            code: 42,
            layer: 1,
            stroke: 3,
        };
        assert_eq!(w.to_string(), "unknown pencil code 42 (layer 1, stroke 3)");

        let w = Warning::MissingTemplate {
            name: "Dots".into(),
        };
        assert_eq!(w.to_string(), "template `Dots` not found");
    }
}
