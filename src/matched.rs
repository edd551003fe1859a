// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`StepDefinitionMatch`] binding a [`Step`] to a [`StepDefinition`].

use std::sync::Arc;

use tracing::debug;

use crate::{
    definition::{Argument, Location, Parameters, StepDefinition},
    error::StepError,
    transformers::{Transformers, Value},
    Step,
};

/// [`Step`] matched against a single [`StepDefinition`].
///
/// Keeps the [`Transformers`] registry current at the moment of matching, so
/// replacing the registry of a [`Runtime`] later doesn't affect it.
///
/// [`Runtime`]: crate::Runtime
#[derive(Clone, Debug)]
pub struct StepDefinitionMatch {
    /// Captured [`Argument`]s.
    arguments: Vec<Argument>,

    /// Matched [`StepDefinition`].
    definition: Arc<dyn StepDefinition>,

    /// Name of the [`Backend`] owning the [`StepDefinition`].
    ///
    /// [`Backend`]: crate::Backend
    backend: Arc<str>,

    /// Matched [`Step`].
    step: Arc<Step>,

    /// Registry to convert the [`Argument`]s with.
    transformers: Arc<Transformers>,
}

impl StepDefinitionMatch {
    /// Creates a new [`StepDefinitionMatch`].
    #[must_use]
    pub fn new(
        arguments: Vec<Argument>,
        definition: Arc<dyn StepDefinition>,
        backend: Arc<str>,
        step: Arc<Step>,
        transformers: Arc<Transformers>,
    ) -> Self {
        Self { arguments, definition, backend, step, transformers }
    }

    /// Returns the captured [`Argument`]s.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Returns the matched [`StepDefinition`].
    #[must_use]
    pub fn definition(&self) -> &Arc<dyn StepDefinition> {
        &self.definition
    }

    /// Returns the name of the [`Backend`] owning the matched
    /// [`StepDefinition`].
    ///
    /// [`Backend`]: crate::Backend
    #[must_use]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Returns the matched [`Step`].
    #[must_use]
    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Returns the [`Transformers`] registry of this match.
    #[must_use]
    pub fn transformers(&self) -> &Arc<Transformers> {
        &self.transformers
    }

    /// Returns the pattern of the matched [`StepDefinition`].
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.definition.pattern()
    }

    /// Returns the [`Location`] of the matched [`StepDefinition`], if known.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.definition.location()
    }

    /// Converts the captured [`Argument`]s into the parameter types declared
    /// by the [`StepDefinition`].
    ///
    /// [`Argument`]s of capture groups not participating in the match are not
    /// converted, and become [`None`] for [`Parameters::next_optional()`].
    ///
    /// # Errors
    ///
    /// - [`StepError::Arity`] if the number of [`Argument`]s doesn't match the
    ///   number of declared parameters.
    /// - [`StepError::Transform`] if any [`Argument`] cannot be converted.
    pub fn parameters(&self) -> Result<Parameters, StepError> {
        let types = self.definition.parameter_types();
        if types.len() != self.arguments.len() {
            return Err(StepError::Arity {
                pattern: self.pattern().to_owned(),
                expected: types.len(),
                actual: self.arguments.len(),
            });
        }

        types
            .iter()
            .zip(&self.arguments)
            .map(|(ty, arg)| {
                arg.is_matched()
                    .then(|| self.transformers.transform_to(*ty, arg.value()))
                    .transpose()
            })
            .collect::<Result<Vec<Option<Value>>, _>>()
            .map(Parameters::from)
            .map_err(StepError::from)
    }

    /// Converts the captured [`Argument`]s and executes the matched
    /// [`StepDefinition`] with them.
    ///
    /// # Errors
    ///
    /// If [converting][`StepDefinitionMatch::parameters()`] fails, or the
    /// [`StepDefinition`] body returns an error.
    pub async fn run(&self) -> Result<(), StepError> {
        let params = self.parameters()?;
        debug!(
            step = %self.step,
            pattern = self.pattern(),
            backend = %self.backend,
            "running step definition"
        );
        self.definition.execute(params).await.map_err(|error| {
            StepError::Execution { pattern: self.pattern().to_owned(), error }
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::future::BoxFuture;

    use super::*;
    use crate::definition::ParameterType;

    #[derive(Debug)]
    struct Sum {
        types: Vec<ParameterType>,
    }

    impl StepDefinition for Sum {
        fn matched_arguments(&self, _: &Step) -> Option<Vec<Argument>> {
            None
        }

        fn pattern(&self) -> &str {
            "^(\\d+) plus (\\d+) is (\\d+)$"
        }

        fn parameter_types(&self) -> &[ParameterType] {
            &self.types
        }

        fn execute(
            &self,
            mut params: Parameters,
        ) -> BoxFuture<'_, anyhow::Result<()>> {
            Box::pin(async move {
                let (a, b, c) = (
                    params.next::<u32>()?,
                    params.next::<u32>()?,
                    params.next::<u32>()?,
                );
                anyhow::ensure!(a + b == c, "{a} + {b} != {c}");
                Ok(())
            })
        }
    }

    fn matched(args: &[&str], types: usize) -> StepDefinitionMatch {
        StepDefinitionMatch::new(
            args.iter()
                .enumerate()
                .map(|(i, a)| Argument::new(*a, i * 2))
                .collect(),
            Arc::new(Sum { types: vec![ParameterType::of::<u32>(); types] }),
            "test".into(),
            Arc::new(Step::new("Then", "1 plus 2 is 3", "a.feature:1:1")),
            Arc::new(Transformers::new()),
        )
    }

    #[tokio::test]
    async fn runs_with_converted_parameters() {
        matched(&["1", "2", "3"], 3).run().await.unwrap();
    }

    #[tokio::test]
    async fn reports_failed_body() {
        let err = matched(&["1", "2", "4"], 3).run().await.unwrap_err();
        assert!(matches!(err, StepError::Execution { .. }));
        assert!(err.to_string().contains("1 + 2 != 4"));
    }

    #[test]
    fn reports_arity_mismatch() {
        let err = matched(&["1", "2"], 3).parameters().unwrap_err();
        assert!(matches!(
            err,
            StepError::Arity { expected: 3, actual: 2, .. },
        ));
    }

    #[test]
    fn reports_unconvertible_argument() {
        let err = matched(&["1", "two", "3"], 3).parameters().unwrap_err();
        assert!(matches!(err, StepError::Transform(_)));
    }

    #[test]
    fn skips_conversion_of_uncaptured_arguments() {
        let m = StepDefinitionMatch::new(
            vec![Argument::new("1", 0), Argument::unmatched()],
            Arc::new(Sum { types: vec![ParameterType::of::<u32>(); 2] }),
            "test".into(),
            Arc::new(Step::new("Then", "1 plus", "a.feature:1:1")),
            Arc::new(Transformers::new()),
        );
        let mut params = m.parameters().unwrap();
        assert_eq!(params.next::<u32>().unwrap(), 1);
        assert_eq!(params.next_optional::<u32>().unwrap(), None);
    }

    #[test]
    fn keeps_its_own_transformers() {
        let m = matched(&["1"], 1);
        let other = Arc::new(Transformers::empty());
        assert!(!Arc::ptr_eq(m.transformers(), &other));
        assert_eq!(m.parameters().unwrap().len(), 1);
    }
}
