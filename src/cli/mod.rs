//! Command-line interface module.

mod args;
pub mod export;
pub mod inspect;

pub use args::{Cli, Commands, ExportArgs, InspectArgs};

/// `1 page`, `3 pages`
fn counted(count: usize, noun: &str) -> String {
    match count {
        1 => format!("1 {noun}"),
        n => format!("{n} {noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counted() {
        assert_eq!(counted(0, "page"), "0 pages");
        assert_eq!(counted(1, "notebook"), "1 notebook");
        assert_eq!(counted(12, "page"), "12 pages");
    }
}
