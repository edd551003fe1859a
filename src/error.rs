// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of resolving and running [`Step`]s.
//!
//! Only ambiguity is an error of resolving: undefined [`Step`]s are a normal
//! outcome recorded by the [`Runtime`].
//!
//! [`Runtime`]: crate::Runtime

use std::fmt;

use derive_more::with_trait::{Display, Error, From};

use crate::{matched::StepDefinitionMatch, Step};

/// Error of a [`Step`] matching more than one [`StepDefinition`] across all
/// the [`Backend`]s of a [`Runtime`].
///
/// This is never resolved automatically: overlapping patterns are a defect of
/// the step definitions, so every colliding candidate is reported.
///
/// [`Backend`]: crate::Backend
/// [`Runtime`]: crate::Runtime
/// [`StepDefinition`]: crate::StepDefinition
#[derive(Clone, Debug, Error)]
pub struct AmbiguousStepDefinitions {
    /// [`Step`] being resolved.
    step: Step,

    /// Location hint supplied by the caller of [`Runtime::resolve()`].
    ///
    /// [`Runtime::resolve()`]: crate::Runtime::resolve
    location_hint: String,

    /// All the matching candidates, in [`Backend`] registration order, then in
    /// [`StepDefinition`] order of each [`Backend`].
    ///
    /// [`Backend`]: crate::Backend
    /// [`StepDefinition`]: crate::StepDefinition
    matches: Vec<StepDefinitionMatch>,
}

impl AmbiguousStepDefinitions {
    /// Creates a new [`AmbiguousStepDefinitions`] error.
    #[must_use]
    pub fn new(
        step: Step,
        location_hint: impl Into<String>,
        matches: Vec<StepDefinitionMatch>,
    ) -> Self {
        Self { step, location_hint: location_hint.into(), matches }
    }

    /// Returns the ambiguous [`Step`].
    #[must_use]
    pub const fn step(&self) -> &Step {
        &self.step
    }

    /// Returns the location hint supplied by the caller.
    #[must_use]
    pub fn location_hint(&self) -> &str {
        &self.location_hint
    }

    /// Returns all the conflicting candidates.
    #[must_use]
    pub fn matches(&self) -> &[StepDefinitionMatch] {
        &self.matches
    }

    /// Consumes this error returning all the conflicting candidates.
    #[must_use]
    pub fn into_matches(self) -> Vec<StepDefinitionMatch> {
        self.matches
    }
}

impl fmt::Display for AmbiguousStepDefinitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ambiguous match of \"{}\" ({}), possible matches:",
            self.step, self.location_hint,
        )?;
        for m in &self.matches {
            write!(f, "\n  {}", m.pattern())?;
            if let Some(loc) = m.location() {
                write!(f, " --> {loc}")?;
            }
            write!(f, " [{}]", m.backend())?;
        }
        Ok(())
    }
}

/// Error of converting a captured [`Argument`] into a typed value.
///
/// [`Argument`]: crate::Argument
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum TransformError {
    /// No conversion is registered for the requested type.
    #[display("No transformer registered for `{type_name}`")]
    Unsupported {
        /// Name of the requested type.
        #[error(not(source))]
        type_name: &'static str,
    },

    /// Conversion failed.
    #[display("Cannot transform \"{value}\" into `{type_name}`: {reason}")]
    Invalid {
        /// Text being converted.
        value: String,

        /// Name of the requested type.
        type_name: &'static str,

        /// Reason of the failure.
        reason: String,
    },
}

/// Error of taking a value out of [`Parameters`].
///
/// [`Parameters`]: crate::Parameters
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum ParameterError {
    /// There are no parameters left.
    #[display("Missing parameter #{index}")]
    Missing {
        /// Index of the missing parameter.
        #[error(not(source))]
        index: usize,
    },

    /// Parameter belongs to a capture group not participating in the match.
    #[display("Parameter #{index} was not captured")]
    Unmatched {
        /// Index of the parameter.
        #[error(not(source))]
        index: usize,
    },

    /// Parameter has another type.
    #[display("Parameter #{index} is not a `{expected}`")]
    Type {
        /// Index of the parameter.
        index: usize,

        /// Name of the requested type.
        expected: &'static str,
    },
}

/// Error of building a pattern of a [`RegexStepDefinition`].
///
/// [`RegexStepDefinition`]: crate::RegexStepDefinition
#[derive(Clone, Debug, Display, Error)]
#[display("Invalid step pattern `{pattern}`: {reason}")]
pub struct PatternError {
    /// Pattern failed to build.
    pub pattern: String,

    /// Reason of the failure.
    pub reason: String,
}

/// Error of [running][`StepDefinitionMatch::run()`] a matched step
/// definition.
#[derive(Debug, Display, Error, From)]
pub enum StepError {
    /// Number of captured [`Argument`]s differs from the number of parameters
    /// declared by the step definition.
    ///
    /// [`Argument`]: crate::Argument
    #[display(
        "Step definition `{pattern}` declares {expected} parameters, \
         but {actual} were captured"
    )]
    #[from(ignore)]
    Arity {
        /// Pattern of the step definition.
        pattern: String,

        /// Number of declared parameters.
        expected: usize,

        /// Number of captured [`Argument`]s.
        ///
        /// [`Argument`]: crate::Argument
        actual: usize,
    },

    /// Captured [`Argument`] cannot be converted.
    ///
    /// [`Argument`]: crate::Argument
    #[display("{_0}")]
    Transform(TransformError),

    /// Step definition body failed.
    #[display("Step definition `{pattern}` failed: {error:#}")]
    #[from(ignore)]
    Execution {
        /// Pattern of the step definition.
        pattern: String,

        /// Error returned by the body.
        #[error(not(source))]
        error: anyhow::Error,
    },
}
