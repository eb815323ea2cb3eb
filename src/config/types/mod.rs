//! Configuration utility types.
//!
//! | Module   | Purpose                         |
//! |----------|---------------------------------|
//! | `error`  | Errors and collected diagnostics |
//! | `field`  | Dotted config field paths        |

mod error;
mod field;

pub use error::{ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
