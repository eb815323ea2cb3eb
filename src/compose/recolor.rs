//! Grid recolor for template styles.
//!
//! Templates draw their grid in black. Every black stroke declaration,
//! inside `<style>` text or a `style` attribute, is rewritten to the
//! configured grid color.

use std::borrow::Cow;

/// Black stroke declarations as they appear in device templates.
pub const BLACK_STROKES: [&str; 2] = ["stroke:#000000", "stroke:rgb(0%,0%,0%)"];

/// Replace black stroke declarations in a CSS fragment.
///
/// Borrows the input when nothing matches.
pub fn recolor_strokes<'a>(css: &'a str, grid: &str) -> Cow<'a, str> {
    if !BLACK_STROKES.iter().any(|black| css.contains(black)) {
        return Cow::Borrowed(css);
    }

    let replacement = format!("stroke:{grid}");
    let mut out = css.to_owned();
    for black in BLACK_STROKES {
        out = out.replace(black, &replacement);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recolor_hex() {
        assert_eq!(
            recolor_strokes("fill:none;stroke:#000000;stroke-width:1", "gray"),
            "fill:none;stroke:gray;stroke-width:1"
        );
    }

    #[test]
    fn test_recolor_rgb() {
        let css = ".a{stroke:rgb(0%,0%,0%)} .b{stroke:#000000}";
        assert_eq!(recolor_strokes(css, "#ccc"), ".a{stroke:#ccc} .b{stroke:#ccc}");
    }

    #[test]
    fn test_untouched_is_borrowed() {
        let css = "stroke:#000001;fill:#000000";
        assert!(matches!(recolor_strokes(css, "gray"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_spaced_declaration_not_matched() {
        // Only the exact device spelling is rewritten
        assert_eq!(recolor_strokes("stroke: #000000", "gray"), "stroke: #000000");
    }
}
