use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or merging a template.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid escape sequence")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("document is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error when reading template `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to serialize composed document")]
    Write(#[from] std::io::Error),

    #[error("{0} has no root element")]
    NoRoot(&'static str),
}
