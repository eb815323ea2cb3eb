//! `inspect` command: decode one page and describe it.

use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{InspectArgs, counted};
use crate::lines::{Header, decode, parse_header};
use crate::log;
use crate::model::{Page, Stroke};
use crate::render::Renderer;

/// JSON shape of `inspect --json`.
#[derive(Debug, Serialize)]
struct Inspection<'a> {
    header: &'a str,
    #[serde(flatten)]
    page: &'a Page,
    warnings: Vec<String>,
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let header = parse_header(&bytes);
    let page = decode(&bytes).with_context(|| format!("Failed to decode {}", args.file.display()))?;
    let warnings: Vec<String> = Renderer::unknown_codes(&page)
        .iter()
        .map(ToString::to_string)
        .collect();

    if args.json {
        let inspection = Inspection {
            header: &header.text,
            page: &page,
            warnings,
        };
        let json = if args.pretty {
            serde_json::to_string_pretty(&inspection)?
        } else {
            serde_json::to_string(&inspection)?
        };
        println!("{json}");
        return Ok(());
    }

    print!("{}", describe(&header, &page));
    for warning in &warnings {
        log!("warning"; "{}", warning);
    }
    Ok(())
}

/// Human-readable page outline.
fn describe(header: &Header, page: &Page) -> String {
    let mut out = String::new();
    let version = match page.version {
        0 => "unknown".to_owned(),
        v => v.to_string(),
    };
    writeln!(out, "header   {:?}", header.text).ok();
    writeln!(out, "version  {version}").ok();
    writeln!(
        out,
        "canvas   {}x{}",
        page.horizontal_width, page.vertical_width
    )
    .ok();
    writeln!(
        out,
        "content  {}, {}, {}",
        counted(page.layers.len(), "layer"),
        counted(page.stroke_count(), "stroke"),
        counted(page.segment_count(), "segment")
    )
    .ok();

    for layer in &page.layers {
        writeln!(
            out,
            "layer {}: {}",
            layer.layer_number,
            counted(layer.strokes.len(), "stroke")
        )
        .ok();
        for stroke in &layer.strokes {
            writeln!(out, "  {}", describe_stroke(stroke)).ok();
        }
    }
    out
}

fn describe_stroke(stroke: &Stroke) -> String {
    let pencil = stroke
        .pencil()
        .map_or_else(|| format!("pencil#{}", stroke.pencil_code), |p| p.to_string());
    let color = stroke.color().map_or_else(
        || format!("color#{}", stroke.color_code),
        |c| format!("{c:?}").to_lowercase(),
    );
    format!(
        "#{} {} {} width {:.2}, {}",
        stroke.stroke_number,
        pencil,
        color,
        stroke.pen_width,
        counted(stroke.segments.len(), "segment")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::builder::{PageBuilder, segments};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample() -> Vec<u8> {
        PageBuilder::new()
            .layer()
            .stroke(15, 0, segments(3))
            .stroke(99, 7, segments(1))
            .layer()
            .stroke(18, 3, segments(2))
            .build()
    }

    #[test]
    fn test_describe() {
        let bytes = sample();
        let text = describe(&parse_header(&bytes), &decode(&bytes).unwrap());

        assert!(text.contains("version  5\n"));
        assert!(text.contains("canvas   1404x1872\n"));
        assert!(text.contains("content  2 layers, 3 strokes, 6 segments\n"));
        assert!(text.contains("layer 1: 2 strokes\n"));
        assert!(text.contains("layer 2: 1 stroke\n"));
        assert!(text.contains("pencil#99 color#7"));
        assert!(text.contains("1 segment\n"));
    }

    #[test]
    fn test_describe_unknown_version() {
        let bytes = PageBuilder::new().header("hello").build();
        let text = describe(&parse_header(&bytes), &decode(&bytes).unwrap());
        assert!(text.contains("version  unknown\n"));
        assert!(text.contains("content  0 layers"));
    }

    #[test]
    fn test_json_shape() {
        let bytes = sample();
        let header = parse_header(&bytes);
        let page = decode(&bytes).unwrap();
        let inspection = Inspection {
            header: &header.text,
            page: &page,
            warnings: Renderer::unknown_codes(&page)
                .iter()
                .map(ToString::to_string)
                .collect(),
        };

        let json = serde_json::to_value(&inspection).unwrap();
        assert_eq!(json["version"], 5);
        assert_eq!(json["layers"].as_array().unwrap().len(), 2);
        assert_eq!(json["layers"][0]["strokes"][0]["pencil_code"], 15);
        assert_eq!(json["warnings"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_run_inspect() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("0.rm");
        fs::write(&file, sample()).unwrap();

        let args = InspectArgs {
            file,
            json: true,
            pretty: false,
        };
        assert!(run_inspect(&args).is_ok());

        let missing = InspectArgs {
            file: PathBuf::from("/nonexistent/0.rm"),
            json: false,
            pretty: false,
        };
        assert!(run_inspect(&missing).is_err());
    }
}
