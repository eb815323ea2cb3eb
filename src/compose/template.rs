//! Background templates and their lookup directory.

use super::ComposeError;
use crate::config::TemplateConfig;
use std::fs;
use std::path::{Path, PathBuf};

pub const TEMPLATE_EXT: &str = ".svg";

/// A background template.
///
/// A blank template carries no markup; compositing with it is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub path: Option<PathBuf>,
    content: String,
    blank: bool,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            content: content.into(),
            blank: false,
        }
    }

    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            content: String::new(),
            blank: true,
        }
    }

    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self, ComposeError> {
        let content =
            fs::read_to_string(path).map_err(|err| ComposeError::Io(path.to_path_buf(), err))?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::new(name, content)
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn is_blank(&self) -> bool {
        self.blank
    }
}

/// Resolves template names to files in the template directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
    blank: String,
}

impl TemplateStore {
    pub fn new(config: &TemplateConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            blank: config.blank.clone(),
        }
    }

    pub fn is_blank(&self, name: &str) -> bool {
        name.trim().eq_ignore_ascii_case(&self.blank)
    }

    /// Find the file for `name`.
    ///
    /// Only files listed in the template directory are candidates, so a
    /// name can never point outside it. `<name>.svg` wins; otherwise the
    /// first file (by name) ending in `<name>.svg`, which matches device
    /// files such as `P Grid small.svg` for `Grid small`.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return None;
        }
        let file_name = format!("{name}{TEMPLATE_EXT}");

        let mut candidates: Vec<(String, PathBuf)> = fs::read_dir(&self.dir)
            .ok()?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter_map(|e| {
                let entry_name = e.file_name().into_string().ok()?;
                entry_name
                    .ends_with(&file_name)
                    .then(|| (entry_name, e.path()))
            })
            .collect();
        candidates.sort();

        let exact = candidates.iter().position(|(n, _)| *n == file_name);
        let index = exact.unwrap_or(0);
        (index < candidates.len()).then(|| candidates.swap_remove(index).1)
    }

    /// Load the template for `name`.
    ///
    /// Returns `Ok(None)` when no file matches; blank names never touch
    /// the filesystem.
    pub fn load(&self, name: &str) -> Result<Option<Template>, ComposeError> {
        if self.is_blank(name) {
            return Ok(Some(Template::blank(name)));
        }
        self.find(name)
            .map(|path| Template::load(name, &path))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> TemplateStore {
        TemplateStore::new(&TemplateConfig {
            dir: dir.path().to_path_buf(),
            ..TemplateConfig::default()
        })
    }

    #[test]
    fn test_exact_match_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Grid small.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("P Grid small.svg"), "<svg/>").unwrap();

        let found = store(&dir).find("Grid small").unwrap();
        assert_eq!(found, dir.path().join("Grid small.svg"));
    }

    #[test]
    fn test_suffix_match() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("P Lines medium.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("Lines medium.png"), "").unwrap();

        let found = store(&dir).find("Lines medium").unwrap();
        assert_eq!(found, dir.path().join("P Lines medium.svg"));
    }

    #[test]
    fn test_missing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(store.find("Dots"), None);
        assert_eq!(store.find(""), None);
        assert_eq!(store.load("Dots").unwrap(), None);
    }

    #[test]
    fn test_missing_directory() {
        let store = TemplateStore::new(&TemplateConfig {
            dir: PathBuf::from("/nonexistent/templates"),
            ..TemplateConfig::default()
        });
        assert_eq!(store.find("Dots"), None);
    }

    #[test]
    fn test_load_content() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Dots.svg"), "<svg><title>t</title></svg>").unwrap();

        let template = store(&dir).load("Dots").unwrap().unwrap();
        assert_eq!(template.name, "Dots");
        assert_eq!(template.content(), "<svg><title>t</title></svg>");
        assert_eq!(template.path, Some(dir.path().join("Dots.svg")));
        assert!(!template.is_blank());
    }

    #[test]
    fn test_blank_needs_no_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(store.is_blank("Blank"));
        assert!(store.is_blank(" BLANK "));
        assert!(!store.is_blank("P Lines small"));

        let template = store.load("blank").unwrap().unwrap();
        assert!(template.is_blank());
        assert!(template.content().is_empty());
    }

    #[test]
    fn test_names_stay_inside_template_dir() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.svg"), "<svg/>").unwrap();
        let dir = TempDir::new().unwrap();
        let inner = dir.path().join("inner");
        fs::create_dir(&inner).unwrap();
        let store = TemplateStore::new(&TemplateConfig {
            dir: inner.clone(),
            ..TemplateConfig::default()
        });
        fs::write(dir.path().join("up.svg"), "<svg/>").unwrap();

        let absolute = outside.path().join("secret");
        assert_eq!(store.find(absolute.to_str().unwrap()), None);
        assert_eq!(store.find("../up"), None);
        assert_eq!(store.find(".."), None);
        assert_eq!(store.load("../up").unwrap(), None);
    }
}
