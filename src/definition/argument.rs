//! Captured [`Argument`]s of a matched step definition.

use derive_more::with_trait::Display;

/// Piece of a [`Step`] text captured by a [`StepDefinition`] pattern.
///
/// [`Step`]: crate::Step
/// [`StepDefinition`]: super::StepDefinition
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("{value}")]
pub struct Argument {
    /// Captured text.
    ///
    /// Empty if the capture group didn't participate in the match.
    value: String,

    /// Byte offset of the captured text inside the [`Step`] text.
    ///
    /// [`Step`]: crate::Step
    offset: Option<usize>,

    /// Name of the capture group, if any.
    name: Option<String>,
}

impl Argument {
    /// Creates a new [`Argument`] captured at the given byte `offset`.
    #[must_use]
    pub fn new(value: impl Into<String>, offset: usize) -> Self {
        Self { value: value.into(), offset: Some(offset), name: None }
    }

    /// Creates an [`Argument`] of a capture group that didn't participate in
    /// the match.
    #[must_use]
    pub const fn unmatched() -> Self {
        Self { value: String::new(), offset: None, name: None }
    }

    /// Names this [`Argument`] after its capture group.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the captured text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Indicates whether the capture group of this [`Argument`] participated
    /// in the match.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.offset.is_some()
    }

    /// Returns the byte offset of the captured text, if it was captured.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// Returns the name of the capture group, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_value_and_offset() {
        let arg = Argument::new("3", 7);
        assert_eq!(arg.value(), "3");
        assert_eq!(arg.offset(), Some(7));
        assert_eq!(arg.name(), None);
        assert_eq!(arg.to_string(), "3");
    }

    #[test]
    fn unmatched_has_no_offset() {
        let arg = Argument::unmatched();
        assert!(!arg.is_matched());
        assert_eq!(arg.value(), "");
        assert_eq!(arg.offset(), None);
    }

    #[test]
    fn named_argument() {
        let arg = Argument::new("green", 14).named("color");
        assert_eq!(arg.name(), Some("color"));
    }
}
