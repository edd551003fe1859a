//! Source [`Location`] of a step definition.

use std::panic;

use derive_more::with_trait::Display;

/// Place in the source code where a [`StepDefinition`] is declared.
///
/// [`StepDefinition`]: super::StepDefinition
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{path}:{line}:{column}")]
pub struct Location {
    /// Path to the file declaring the [`StepDefinition`].
    ///
    /// [`StepDefinition`]: super::StepDefinition
    pub path: &'static str,

    /// Line of the declaration.
    pub line: u32,

    /// Column of the declaration.
    pub column: u32,
}

impl Location {
    /// Creates a new [`Location`].
    #[must_use]
    pub const fn new(path: &'static str, line: u32, column: u32) -> Self {
        Self { path, line, column }
    }

    /// Returns the [`Location`] of the caller of a `#[track_caller]`
    /// function.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(panic::Location::caller())
    }
}

impl From<&'static panic::Location<'static>> for Location {
    fn from(loc: &'static panic::Location<'static>) -> Self {
        Self::new(loc.file(), loc.line(), loc.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_path_line_column() {
        let loc = Location::new("src/steps.rs", 42, 10);
        assert_eq!(loc.to_string(), "src/steps.rs:42:10");
    }

    #[test]
    fn caller_points_to_this_file() {
        let loc = Location::caller();
        assert!(loc.path.ends_with("location.rs"));
        assert!(loc.line > 0);
    }

    #[test]
    fn orders_by_path_then_line() {
        let a = Location::new("a.rs", 2, 1);
        let b = Location::new("a.rs", 10, 1);
        let c = Location::new("b.rs", 1, 1);
        assert!(a < b);
        assert!(b < c);
    }
}
