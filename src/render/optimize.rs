//! SVG optimization using usvg.
//!
//! Re-serializes a page through usvg, which resolves transforms and drops
//! invisible elements such as eraser polylines and the transparent canvas
//! rect.

use super::SvgDocument;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("failed to parse SVG for optimization")]
    Parse(#[from] usvg::Error),
}

/// Options for SVG optimization
#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// DPI for unit conversion.
    pub dpi: f32,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self { dpi: 96.0 }
    }
}

/// Optimize an SVG document with usvg.
pub fn optimize_svg(
    document: &SvgDocument,
    options: &OptimizeOptions,
) -> Result<SvgDocument, OptimizeError> {
    let usvg_options = usvg::Options {
        dpi: options.dpi,
        ..Default::default()
    };

    let tree = usvg::Tree::from_data(document.as_bytes(), &usvg_options)?;

    let write_options = usvg::WriteOptions {
        indent: usvg::Indent::None,
        ..Default::default()
    };

    Ok(SvgDocument::new(tree.to_string(&write_options)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_page() {
        let doc = SvgDocument::new(concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1404" height="1872" viewBox="0 0 1404 1872">"#,
            r#"<polyline fill="none" stroke="black" stroke-width="2" points="10, 20 30, 40 "/>"#,
            r#"</svg>"#,
        ));
        let optimized = optimize_svg(&doc, &OptimizeOptions::default()).unwrap();
        assert!(optimized.as_str().starts_with("<svg"));
        assert!(optimized.as_str().contains(r#"width="1404""#));
        assert!(optimized.as_str().contains(r#"height="1872""#));
    }

    #[test]
    fn test_optimize_rejects_garbage() {
        let doc = SvgDocument::new("not svg");
        assert!(optimize_svg(&doc, &OptimizeOptions::default()).is_err());
    }
}
