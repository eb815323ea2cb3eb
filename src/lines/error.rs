//! Decoder error types.

use thiserror::Error;

/// Reasons a `.rm` buffer cannot become a [`Page`](crate::model::Page).
///
/// Either error abandons the whole page; no partially decoded tree escapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("page buffer is empty")]
    Malformed,

    #[error("page truncated at byte {offset}: need {needed} bytes, buffer has {len}")]
    Truncated {
        /// Absolute offset of the field that could not be read.
        offset: usize,
        /// Size of that field.
        needed: usize,
        /// Total buffer length.
        len: usize,
    },
}
