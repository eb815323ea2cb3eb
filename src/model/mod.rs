//! Document model shared by the decoder, renderer and exporter.
//!
//! | Module     | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `page`     | Page / Layer / Stroke / Segment tree           |
//! | `pencil`   | Pencil and color code lookup tables            |
//! | `notebook` | Notebook, orientation, template name lookup    |
//! | `warning`  | Non-fatal render diagnostics                   |

mod notebook;
mod page;
mod pencil;
mod warning;

pub use notebook::{Notebook, Orientation, page_file_stem};
pub use page::{Layer, Page, Segment, Stroke};
pub use pencil::{PencilType, StrokeColor};
pub use warning::{CodeKind, Warning};
