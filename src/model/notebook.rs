//! Notebook: the owner of decoded pages plus the sibling metadata
//! (orientation, template names, folder chain) needed to render them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::page::Page;

/// Page layout of a notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Parse the `orientation` value of a `.content` file.
    ///
    /// Anything other than `"landscape"` renders as portrait.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("landscape") {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Landscape)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => f.write_str("portrait"),
            Self::Landscape => f.write_str("landscape"),
        }
    }
}

/// A notebook and its pages.
#[derive(Debug, Clone, Default)]
pub struct Notebook {
    pub id: String,
    /// Visible name, used for output directories and page titles.
    pub name: String,
    pub orientation: Orientation,
    /// Template name per page number; the last entry is the notebook default.
    pub template_names: Vec<String>,
    /// Parent folder names, root first.
    pub folders: Vec<String>,
    pages: Vec<Page>,
}

impl Notebook {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a page, keeping pages ordered by page number.
    ///
    /// A page with an already present number replaces the old one.
    pub fn add_page(&mut self, page: Page) {
        match self
            .pages
            .binary_search_by_key(&page.page_number, |p| p.page_number)
        {
            Ok(pos) => self.pages[pos] = page,
            Err(pos) => self.pages.insert(pos, page),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The last template line, used when a page has no template of its own.
    pub fn default_template(&self) -> Option<&str> {
        self.template_names.last().map(String::as_str)
    }

    /// Template name for a page number.
    pub fn template_name(&self, page_number: u32) -> Option<&str> {
        self.template_names
            .get(page_number as usize)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .or_else(|| self.default_template())
    }

    /// Title written into composited pages.
    pub fn page_title(&self, page_number: u32) -> String {
        format!("{} - Page {:03}", self.name, page_number)
    }
}

/// File stem of an exported page, e.g. `Page_007`.
pub fn page_file_stem(page_number: u32) -> String {
    format!("Page_{page_number:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_parse() {
        assert_eq!(Orientation::parse("landscape"), Orientation::Landscape);
        assert_eq!(Orientation::parse(" Landscape\n"), Orientation::Landscape);
        assert_eq!(Orientation::parse("portrait"), Orientation::Portrait);
        assert_eq!(Orientation::parse(""), Orientation::Portrait);
        assert_eq!(Orientation::parse("unknown"), Orientation::Portrait);
    }

    #[test]
    fn test_add_page_keeps_order() {
        let mut nb = Notebook::new("id", "Notes");
        nb.add_page(Page::new(2, 5, Vec::new()));
        nb.add_page(Page::new(0, 5, Vec::new()));
        nb.add_page(Page::new(1, 3, Vec::new()));
        nb.add_page(Page::new(1, 5, Vec::new()));

        let numbers: Vec<_> = nb.pages().iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert_eq!(nb.pages()[1].version, 5);
    }

    #[test]
    fn test_template_name_fallback() {
        let mut nb = Notebook::new("id", "Notes");
        assert_eq!(nb.template_name(0), None);

        nb.template_names = vec!["Lined".into(), "".into(), "Grid small".into()];
        assert_eq!(nb.template_name(0), Some("Lined"));
        assert_eq!(nb.template_name(1), Some("Grid small"));
        assert_eq!(nb.template_name(9), Some("Grid small"));
    }

    #[test]
    fn test_page_title_and_stem() {
        let nb = Notebook::new("id", "Meeting");
        assert_eq!(nb.page_title(4), "Meeting - Page 004");
        assert_eq!(page_file_stem(12), "Page_012");
    }
}
