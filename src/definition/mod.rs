// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`StepDefinition`] capability and the values flowing through it.
//!
//! - [`argument`]: text captured from a [`Step`] by a [`StepDefinition`]
//! - [`location`]: source location of a [`StepDefinition`]
//! - [`regex`]: [`Regex`]-based [`StepDefinition`] implementation
//!
//! [`Regex`]: ::regex::Regex

pub mod argument;
pub mod location;
pub mod regex;

use std::{
    any::{self, Any, TypeId},
    collections::VecDeque,
    fmt,
};

use derive_more::with_trait::Display;
use futures::future::BoxFuture;

use crate::{error::ParameterError, transformers::Value, Step};

pub use self::{
    argument::Argument, location::Location, regex::RegexStepDefinition,
};

/// Single binding of a pattern to the code executing [`Step`]s matching it.
///
/// Every [`StepDefinition`] is owned by exactly one [`Backend`], and is never
/// mutated by a [`Runtime`].
///
/// [`Backend`]: crate::Backend
/// [`Runtime`]: crate::Runtime
pub trait StepDefinition: fmt::Debug + Send + Sync {
    /// Matches the given [`Step`] text against this [`StepDefinition`].
    ///
    /// Returns [`None`] if this [`StepDefinition`] doesn't apply to the
    /// [`Step`], or the ordered captured [`Argument`]s otherwise.
    fn matched_arguments(&self, step: &Step) -> Option<Vec<Argument>>;

    /// Returns the source text of the pattern of this [`StepDefinition`].
    fn pattern(&self) -> &str;

    /// Returns the [`Location`] this [`StepDefinition`] is declared at, if
    /// known.
    fn location(&self) -> Option<Location> {
        None
    }

    /// Returns the types the captured [`Argument`]s are converted into before
    /// [executing][`StepDefinition::execute()`].
    fn parameter_types(&self) -> &[ParameterType];

    /// Executes the body of this [`StepDefinition`] with already converted
    /// [`Parameters`].
    fn execute(
        &self,
        parameters: Parameters,
    ) -> BoxFuture<'_, anyhow::Result<()>>;
}

/// Type a captured [`Argument`] is converted into.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{name}")]
pub struct ParameterType {
    /// [`TypeId`] of the type.
    id: TypeId,

    /// Human-readable name of the type.
    name: &'static str,
}

impl ParameterType {
    /// Returns the [`ParameterType`] of `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self { id: TypeId::of::<T>(), name: any::type_name::<T>() }
    }

    /// Returns the [`TypeId`] of this [`ParameterType`].
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the name of this [`ParameterType`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Converted [`Argument`]s passed to [`StepDefinition::execute()`].
///
/// Values are taken in the order of the captured [`Argument`]s. An
/// [`Argument`] of a capture group not participating in the match has no
/// value, and is taken with [`Parameters::next_optional()`].
#[derive(Debug, Default)]
pub struct Parameters {
    /// Values not taken yet.
    values: VecDeque<Option<Value>>,

    /// Number of already taken values.
    taken: usize,
}

impl Parameters {
    /// Takes the next value, which has to be of type `T`.
    ///
    /// # Errors
    ///
    /// If there are no values left, the next [`Argument`] wasn't captured, or
    /// the next value is not a `T`.
    pub fn next<T: Any>(&mut self) -> Result<T, ParameterError> {
        let index = self.taken;
        self.next_optional()?.ok_or(ParameterError::Unmatched { index })
    }

    /// Takes the next value, which has to be of type `T`, or [`None`] if its
    /// [`Argument`] wasn't captured.
    ///
    /// # Errors
    ///
    /// If there are no values left, or the next value is not a `T`.
    pub fn next_optional<T: Any>(
        &mut self,
    ) -> Result<Option<T>, ParameterError> {
        let index = self.taken;
        let value = self
            .values
            .pop_front()
            .ok_or(ParameterError::Missing { index })?;
        self.taken += 1;
        value
            .map(|v| {
                v.downcast::<T>().map(|v| *v).map_err(|_| {
                    ParameterError::Type {
                        index,
                        expected: any::type_name::<T>(),
                    }
                })
            })
            .transpose()
    }

    /// Returns the number of values left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Indicates whether all the values have been taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Value>> for Parameters {
    fn from(values: Vec<Value>) -> Self {
        Self { values: values.into_iter().map(Some).collect(), taken: 0 }
    }
}

impl From<Vec<Option<Value>>> for Parameters {
    fn from(values: Vec<Option<Value>>) -> Self {
        Self { values: values.into(), taken: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_type_names_the_type() {
        let ty = ParameterType::of::<u32>();
        assert_eq!(ty.name(), "u32");
        assert_eq!(ty.id(), TypeId::of::<u32>());
        assert_ne!(ty, ParameterType::of::<i32>());
    }

    #[test]
    fn parameters_are_taken_in_order() {
        let mut params = Parameters::from(vec![
            Box::new(3_u32) as Value,
            Box::new(true) as Value,
        ]);
        assert_eq!(params.len(), 2);
        assert_eq!(params.next::<u32>().unwrap(), 3);
        assert!(params.next::<bool>().unwrap());
        assert!(params.is_empty());
    }

    #[test]
    fn reports_missing_parameter() {
        let mut params = Parameters::default();
        assert!(matches!(
            params.next::<u32>(),
            Err(ParameterError::Missing { index: 0 }),
        ));
    }

    #[test]
    fn reports_wrong_type() {
        let mut params = Parameters::from(vec![Box::new(3_u32) as Value]);
        let err = params.next::<String>().unwrap_err();
        assert!(matches!(err, ParameterError::Type { index: 0, .. }));
        assert!(err.to_string().contains("String"));
    }

    #[test]
    fn takes_uncaptured_parameter_as_none() {
        let mut params = Parameters::from(vec![
            None,
            Some(Box::new(2_u8) as Value),
            None,
        ]);
        assert_eq!(params.next_optional::<u32>().unwrap(), None);
        assert_eq!(params.next_optional::<u8>().unwrap(), Some(2));
        assert!(matches!(
            params.next::<u32>(),
            Err(ParameterError::Unmatched { index: 2 }),
        ));
    }
}
