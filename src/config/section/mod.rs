//! Configuration section definitions.
//!
//! Each module corresponds to a section in `rmsvg.toml`:
//!
//! | Module     | TOML Section   | Purpose                               |
//! |------------|----------------|---------------------------------------|
//! | `palette`  | `[palette]`    | Stroke colors by color code           |
//! | `template` | `[template]`   | Template directory, grid color, blank |
//! | `output`   | `[output]`     | Export directory and optimizer        |

mod output;
mod palette;
mod template;

pub use output::OutputConfig;
pub use palette::Palette;
pub use template::TemplateConfig;
