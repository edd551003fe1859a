// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Runtime`] resolving [`Step`]s into [`StepDefinitionMatch`]es.

pub mod undefined;

use std::sync::{Arc, PoisonError, RwLock};

use itertools::Itertools as _;
use tracing::{debug, trace, warn};

use crate::{
    backend::Backend, error::AmbiguousStepDefinitions,
    matched::StepDefinitionMatch, transformers::Transformers, world::World,
    Step,
};

pub use self::undefined::{UndefinedSteps, UndefinedStepsLog};

/// Matching and dispatching engine of a run.
///
/// Every [`Step`] is matched against every [`StepDefinition`] of every
/// [`Backend`], so a [`Step`] resolves into either:
/// - exactly one [`StepDefinitionMatch`];
/// - nothing, in which case the [`Step`] is recorded as undefined;
/// - [`AmbiguousStepDefinitions`], if more than one [`StepDefinition`]
///   matches.
///
/// [`Runtime`] is [`Sync`], so a single instance may be shared between
/// concurrently executed scenarios.
///
/// [`StepDefinition`]: crate::StepDefinition
#[derive(Debug)]
pub struct Runtime {
    /// [`Backend`]s in registration order.
    backends: Vec<Arc<dyn Backend>>,

    /// Registry [`StepDefinitionMatch`]es are created with.
    transformers: RwLock<Arc<Transformers>>,

    /// Storage of the [`Step`]s nothing matched.
    undefined: Arc<dyn UndefinedSteps>,
}

impl Runtime {
    /// Creates a new [`Runtime`] of the given [`Backend`]s with the default
    /// [`Transformers`] and an empty [`UndefinedStepsLog`].
    ///
    /// The order of [`Backend`]s determines the order of reported
    /// [`AmbiguousStepDefinitions`] candidates and of [snippets].
    ///
    /// [snippets]: Runtime::snippets
    #[must_use]
    pub fn new(backends: Vec<Arc<dyn Backend>>) -> Self {
        Self {
            backends,
            transformers: RwLock::new(Arc::new(Transformers::new())),
            undefined: Arc::new(UndefinedStepsLog::new()),
        }
    }

    /// Uses the given [`Transformers`] instead of the default ones.
    #[must_use]
    pub fn with_transformers(
        self,
        transformers: impl Into<Arc<Transformers>>,
    ) -> Self {
        Self { transformers: RwLock::new(transformers.into()), ..self }
    }

    /// Records undefined [`Step`]s into the given [`UndefinedSteps`].
    #[must_use]
    pub fn with_undefined_steps(
        self,
        undefined: Arc<dyn UndefinedSteps>,
    ) -> Self {
        Self { undefined, ..self }
    }

    /// Returns the [`Backend`]s of this [`Runtime`].
    #[must_use]
    pub fn backends(&self) -> &[Arc<dyn Backend>] {
        &self.backends
    }

    /// Resolves the given [`Step`] into the single [`StepDefinitionMatch`].
    ///
    /// Returns [`None`] if nothing matches the [`Step`], recording it as
    /// undefined.
    ///
    /// # Errors
    ///
    /// If the [`Step`] matches more than one [`StepDefinition`]. The
    /// `location_hint` is reported along with all the candidates, and nothing
    /// is recorded.
    ///
    /// [`StepDefinition`]: crate::StepDefinition
    pub fn resolve(
        &self,
        location_hint: &str,
        step: &Step,
    ) -> Result<Option<StepDefinitionMatch>, AmbiguousStepDefinitions> {
        let mut matches = self.step_definition_matches(step);
        match matches.len() {
            0 => {
                debug!(%step, location = %step.location, "undefined step");
                self.undefined.record(step.clone());
                Ok(None)
            }
            1 => {
                trace!(%step, "step resolved");
                Ok(matches.pop())
            }
            n => {
                warn!(%step, location_hint, candidates = n, "ambiguous step");
                Err(AmbiguousStepDefinitions::new(
                    step.clone(),
                    location_hint,
                    matches,
                ))
            }
        }
    }

    /// Collects all the [`StepDefinitionMatch`]es of the given [`Step`] in
    /// [`Backend`] order, then in [`StepDefinition`] order of each
    /// [`Backend`].
    ///
    /// [`StepDefinition`]: crate::StepDefinition
    fn step_definition_matches(&self, step: &Step) -> Vec<StepDefinitionMatch> {
        let transformers = self.transformers();
        let step = Arc::new(step.clone());

        let mut matches = Vec::new();
        for backend in &self.backends {
            let name: Arc<str> = backend.name().into();
            for def in backend.step_definitions() {
                if let Some(args) = def.matched_arguments(&step) {
                    matches.push(StepDefinitionMatch::new(
                        args,
                        Arc::clone(def),
                        Arc::clone(&name),
                        Arc::clone(&step),
                        Arc::clone(&transformers),
                    ));
                }
            }
        }
        matches
    }

    /// Returns all the [`Step`]s recorded as undefined, in recording order.
    #[must_use]
    pub fn undefined_steps(&self) -> Vec<Step> {
        self.undefined.steps()
    }

    /// Generates code snippets implementing all the undefined [`Step`]s.
    ///
    /// [`Step`]s are ordered by their keyword and then by their text, and
    /// every [`Backend`] proposes a snippet for each of them. Repeated snippets
    /// are reported only once, at their first position.
    #[must_use]
    pub fn snippets(&self) -> Vec<String> {
        let snippets = self
            .undefined
            .steps()
            .into_iter()
            .sorted_by(|a, b| {
                a.keyword.cmp(&b.keyword).then_with(|| a.name.cmp(&b.name))
            })
            .flat_map(|step| {
                self.backends.iter().map(move |b| b.snippet(&step))
            })
            .unique()
            .collect_vec();
        debug!(count = snippets.len(), "snippets generated");
        snippets
    }

    /// Creates a new [`World`] of this [`Runtime`].
    #[must_use]
    pub fn new_world(&self) -> World<'_> {
        World::new(self)
    }

    /// Returns the current [`Transformers`] registry.
    #[must_use]
    pub fn transformers(&self) -> Arc<Transformers> {
        Arc::clone(
            &self.transformers.read().unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Replaces the [`Transformers`] registry.
    ///
    /// Already created [`StepDefinitionMatch`]es keep using the previous one.
    pub fn set_transformers(&self, transformers: impl Into<Arc<Transformers>>) {
        *self.transformers.write().unwrap_or_else(PoisonError::into_inner) =
            transformers.into();
        debug!("transformers replaced");
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;
    use crate::{RegexBackend, RegexStepDefinition};

    fn runtime() -> Runtime {
        let backend = RegexBackend::new("rust").definition(
            RegexStepDefinition::new(
                Regex::new(r"^I have (\d+) cucumbers$").unwrap(),
                |_| async { Ok(()) },
            ),
        );
        Runtime::new(vec![Arc::new(backend)])
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Runtime>();
    }

    #[test]
    fn transformers_are_stable_until_replaced() {
        let rt = runtime();
        let first = rt.transformers();
        assert!(Arc::ptr_eq(&first, &rt.transformers()));

        rt.set_transformers(Transformers::empty());
        let second = rt.transformers();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&second, &rt.transformers()));
    }

    #[test]
    fn uses_supplied_transformers() {
        let custom = Arc::new(Transformers::empty().register::<u8>());
        let rt = runtime().with_transformers(Arc::clone(&custom));
        assert!(Arc::ptr_eq(&rt.transformers(), &custom));
    }

    #[test]
    fn match_keeps_transformers_of_its_creation() {
        let rt = runtime();
        let step = Step::new("Given", "I have 3 cucumbers", "a.feature:1:1");
        let matched = rt.resolve("a.feature:1", &step).unwrap().unwrap();
        let before = rt.transformers();

        rt.set_transformers(Transformers::empty());
        assert!(Arc::ptr_eq(matched.transformers(), &before));
        assert!(matched.parameters().is_ok());
    }

    #[test]
    fn records_into_supplied_accumulator() {
        let log = Arc::new(UndefinedStepsLog::new());
        let rt = runtime().with_undefined_steps(log.clone());
        let step = Step::new("Then", "the cucumber is green", "a.feature:2:1");
        assert!(rt.resolve("a.feature:2", &step).unwrap().is_none());
        assert_eq!(log.steps(), vec![step]);
    }
}
