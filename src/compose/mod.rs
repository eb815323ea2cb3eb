//! Template compositor: background template + rendered page → one SVG.
//!
//! The template is streamed through `quick-xml` and re-serialized with three
//! edits:
//!
//! - the `<title>` text becomes the page title, when the template has
//!   exactly one `<title>`
//! - black stroke declarations in `<style>` text and `style` attributes are
//!   rewritten to the grid color (see [`recolor`])
//! - the foreground's document element is appended as the last child of
//!   the template root
//!
//! Everything else (prolog, comments, entity references) passes through
//! untouched.

mod error;
pub mod recolor;
mod template;

pub use error::ComposeError;
pub use template::{Template, TemplateStore};

use crate::render::SvgDocument;
use quick_xml::{
    Reader, Writer,
    events::{BytesCData, BytesEnd, BytesStart, BytesText, Event},
};
use recolor::{BLACK_STROKES, recolor_strokes};
use std::io::Cursor;

pub struct Compositor<'a> {
    grid: &'a str,
}

impl<'a> Compositor<'a> {
    pub const fn new(grid: &'a str) -> Self {
        Self { grid }
    }

    /// Merge `foreground` over `template`.
    ///
    /// Without a template, or with a blank one, the foreground is returned
    /// unchanged.
    pub fn composite(
        &self,
        foreground: &SvgDocument,
        template: Option<&Template>,
        title: &str,
    ) -> Result<SvgDocument, ComposeError> {
        let Some(template) = template.filter(|t| !t.is_blank()) else {
            return Ok(foreground.clone());
        };

        let content = document_element(foreground.as_str())?;
        let markup = template.content();
        let replace_title = count_titles(markup)? == 1;

        let mut reader = Reader::from_str(markup);
        let mut writer = Writer::new(Cursor::new(Vec::with_capacity(
            markup.len() + foreground.len(),
        )));

        let mut depth = 0usize;
        let mut in_style = false;
        // Depth of the `<title>` whose children are being replaced
        let mut skip_until: Option<usize> = None;
        let mut merged = false;

        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Start(elem) => {
                    depth += 1;
                    if skip_until.is_some() {
                        continue;
                    }
                    let is_title = replace_title && elem.name().as_ref() == b"title";
                    in_style |= is_style(&elem);
                    writer.write_event(Event::Start(self.recolor_attrs(elem)?))?;
                    if is_title {
                        writer.write_event(Event::Text(BytesText::new(title)))?;
                        skip_until = Some(depth);
                    }
                }
                Event::End(elem) => {
                    match skip_until {
                        Some(level) if level == depth => skip_until = None,
                        Some(_) => {
                            depth -= 1;
                            continue;
                        }
                        None => {}
                    }
                    if depth == 1 {
                        write_all(&mut writer, &content)?;
                        merged = true;
                    }
                    depth = depth.saturating_sub(1);
                    if elem.name().as_ref().eq_ignore_ascii_case(b"style") {
                        in_style = false;
                    }
                    writer.write_event(Event::End(elem))?;
                }
                Event::Empty(elem) => {
                    if skip_until.is_some() {
                        continue;
                    }
                    let name = std::str::from_utf8(elem.name().as_ref())?.to_owned();
                    let is_title = replace_title && name == "title";
                    let elem = self.recolor_attrs(elem)?;

                    if depth == 0 {
                        writer.write_event(Event::Start(elem))?;
                        write_all(&mut writer, &content)?;
                        writer.write_event(Event::End(BytesEnd::new(name)))?;
                        merged = true;
                    } else if is_title {
                        writer.write_event(Event::Start(elem))?;
                        writer.write_event(Event::Text(BytesText::new(title)))?;
                        writer.write_event(Event::End(BytesEnd::new(name)))?;
                    } else {
                        writer.write_event(Event::Empty(elem))?;
                    }
                }
                Event::Text(text) if skip_until.is_none() => {
                    let raw = std::str::from_utf8(&text)?;
                    if in_style {
                        let css = recolor_strokes(raw, self.grid).into_owned();
                        writer.write_event(Event::Text(BytesText::from_escaped(css)))?;
                    } else {
                        writer.write_event(Event::Text(text))?;
                    }
                }
                Event::CData(data) if skip_until.is_none() => {
                    let raw = std::str::from_utf8(&data)?;
                    if in_style {
                        let css = recolor_strokes(raw, self.grid).into_owned();
                        writer.write_event(Event::CData(BytesCData::new(css)))?;
                    } else {
                        writer.write_event(Event::CData(data))?;
                    }
                }
                event => {
                    if skip_until.is_none() {
                        writer.write_event(event)?;
                    }
                }
            }
        }

        if !merged {
            return Err(ComposeError::NoRoot("template"));
        }

        let bytes = writer.into_inner().into_inner();
        let markup = String::from_utf8(bytes).map_err(|e| e.utf8_error())?;
        Ok(SvgDocument::new(markup))
    }

    /// Rewrite `style` attributes holding black strokes, keep others as-is.
    fn recolor_attrs<'b>(&self, elem: BytesStart<'b>) -> Result<BytesStart<'b>, ComposeError> {
        let mut needs_recolor = false;
        for attr in elem.attributes() {
            let attr = attr?;
            if attr.key.as_ref().eq_ignore_ascii_case(b"style") {
                let value = std::str::from_utf8(&attr.value)?;
                needs_recolor |= BLACK_STROKES.iter().any(|black| value.contains(black));
            }
        }
        if !needs_recolor {
            return Ok(elem);
        }

        let name = std::str::from_utf8(elem.name().as_ref())?.to_owned();
        let mut out = BytesStart::new(name);
        for attr in elem.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let value = quick_xml::escape::unescape(std::str::from_utf8(&attr.value)?)?;
            if key.eq_ignore_ascii_case("style") {
                out.push_attribute((key, recolor_strokes(&value, self.grid).as_ref()));
            } else {
                out.push_attribute((key, value.as_ref()));
            }
        }
        Ok(out)
    }
}

fn is_style(elem: &BytesStart<'_>) -> bool {
    elem.name().as_ref().eq_ignore_ascii_case(b"style")
}

fn write_all(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    events: &[Event<'static>],
) -> Result<(), ComposeError> {
    for event in events {
        writer.write_event(event.borrow())?;
    }
    Ok(())
}

/// Number of `<title>` elements anywhere in the document.
fn count_titles(markup: &str) -> Result<usize, ComposeError> {
    let mut reader = Reader::from_str(markup);
    let mut count = 0;
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"title" => count += 1,
            Event::Eof => return Ok(count),
            _ => {}
        }
    }
}

/// Events of the document element, prolog and trailing misc dropped.
fn document_element(markup: &str) -> Result<Vec<Event<'static>>, ComposeError> {
    let mut reader = Reader::from_str(markup);
    let mut events = Vec::new();
    let mut depth = 0usize;

    loop {
        let event = reader.read_event()?;
        match event {
            Event::Eof => break,
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Empty(_) => {}
            _ if depth == 0 => continue,
            _ => {}
        }
        let closes_root = depth == 0;
        events.push(event.into_owned());
        if closes_root {
            return Ok(events);
        }
    }
    Err(ComposeError::NoRoot("foreground"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Palette;
    use crate::lines::builder::{PageBuilder, segments};
    use crate::lines::decode;
    use crate::model::Orientation;
    use crate::render::Renderer;

    const FOREGROUND: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1404 1872"><g id="fg"><polyline points="1, 2 "/></g></svg>"#;

    fn foreground() -> SvgDocument {
        SvgDocument::new(FOREGROUND)
    }

    fn compose(template: &str, title: &str) -> String {
        let template = Template::new("T", template);
        Compositor::new("gray")
            .composite(&foreground(), Some(&template), title)
            .unwrap()
            .to_string()
    }

    /// Names of the root's direct child elements.
    fn root_children(markup: &str) -> Vec<String> {
        let mut reader = Reader::from_str(markup);
        let mut depth = 0;
        let mut names = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    if depth == 1 {
                        names.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
                    }
                    depth += 1;
                }
                Event::Empty(e) if depth == 1 => {
                    names.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
                }
                Event::End(_) => depth -= 1,
                Event::Eof => return names,
                _ => {}
            }
        }
    }

    #[test]
    fn test_no_template_is_identity() {
        let fg = foreground();
        let out = Compositor::new("gray").composite(&fg, None, "x").unwrap();
        assert_eq!(out, fg);
    }

    #[test]
    fn test_blank_template_is_identity() {
        let fg = foreground();
        let blank = Template::blank("Blank");
        let out = Compositor::new("gray").composite(&fg, Some(&blank), "x").unwrap();
        assert_eq!(out.as_bytes(), fg.as_bytes());
    }

    #[test]
    fn test_foreground_appended_last() {
        let out = compose(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><defs/><rect width="10"/></svg>"#,
            "t",
        );
        assert_eq!(root_children(&out), ["defs", "rect", "svg"]);
        assert!(out.ends_with(r#"<g id="fg"><polyline points="1, 2 "/></g></svg></svg>"#));
    }

    #[test]
    fn test_empty_root_template() {
        let out = compose(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1404"/>"#, "t");
        assert!(out.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1404">"#));
        assert_eq!(root_children(&out), ["svg"]);
    }

    #[test]
    fn test_single_title_replaced() {
        let out = compose("<svg><title>Template <b>old</b></title><g/></svg>", "Notes & Ideas - Page 003");
        assert!(out.contains("<title>Notes &amp; Ideas - Page 003</title>"));
        assert!(!out.contains("old"));
    }

    #[test]
    fn test_empty_title_replaced() {
        let out = compose("<svg><title/></svg>", "Notes - Page 001");
        assert!(out.contains("<title>Notes - Page 001</title>"));
    }

    #[test]
    fn test_multiple_titles_untouched() {
        let out = compose("<svg><title>a</title><g><title>b</title></g></svg>", "new");
        assert!(out.contains("<title>a</title>"));
        assert!(out.contains("<title>b</title>"));
        assert!(!out.contains("new"));
    }

    #[test]
    fn test_style_element_recolored() {
        let out = compose(
            "<svg><defs><style>.a{stroke:#000000} .b{stroke:rgb(0%,0%,0%)}</style></defs></svg>",
            "t",
        );
        assert!(out.contains("<style>.a{stroke:gray} .b{stroke:gray}</style>"));
    }

    #[test]
    fn test_style_cdata_recolored() {
        let out = compose("<svg><style><![CDATA[.a{stroke:#000000}]]></style></svg>", "t");
        assert!(out.contains("<![CDATA[.a{stroke:gray}]]>"));
    }

    #[test]
    fn test_style_attribute_recolored_at_depth() {
        let out = compose(
            r##"<svg><g><g><path d="M0 0" style="fill:none;stroke:#000000" stroke="#000000"/></g></g></svg>"##,
            "t",
        );
        assert!(out.contains(r#"style="fill:none;stroke:gray""#));
        // Presentation attributes are left alone
        assert!(out.contains(r##"stroke="#000000""##));
    }

    #[test]
    fn test_text_outside_style_untouched() {
        let out = compose("<svg><text>stroke:#000000 &amp; more</text></svg>", "t");
        assert!(out.contains("<text>stroke:#000000 &amp; more</text>"));
    }

    #[test]
    fn test_prolog_preserved() {
        let out = compose(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- grid --><svg></svg>",
            "t",
        );
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(out.contains("<!-- grid -->"));
    }

    #[test]
    fn test_malformed_template() {
        let template = Template::new("Broken", "<svg><g></svg>");
        let result = Compositor::new("gray").composite(&foreground(), Some(&template), "t");
        assert!(matches!(result, Err(ComposeError::Xml(_))));
    }

    #[test]
    fn test_template_without_root() {
        let template = Template::new("Empty", "<!-- nothing -->");
        let result = Compositor::new("gray").composite(&foreground(), Some(&template), "t");
        assert!(matches!(result, Err(ComposeError::NoRoot("template"))));
    }

    #[test]
    fn test_rendered_page_over_template() {
        let page = decode(&PageBuilder::new().stroke(15, 0, segments(10)).build()).unwrap();
        let palette = Palette::default();
        let fg = Renderer::new(&palette).render(&page, Orientation::Landscape);

        let template = Template::new(
            "Grid",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1404 1872"><title>Grid</title><style>line{stroke:#000000}</style></svg>"#,
        );
        let out = Compositor::new("#aaaaaa")
            .composite(&fg, Some(&template), "Journal - Page 000")
            .unwrap();

        assert_eq!(root_children(out.as_str()), ["title", "style", "svg"]);
        assert!(out.as_str().contains("line{stroke:#aaaaaa}"));
        assert!(out.as_str().contains("rotate(90 702 936) translate(-234 -234)"));
        assert_eq!(out.as_str().matches("<polyline ").count(), 2);
    }
}
