// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Accumulation of undefined [`Step`]s.

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use crate::Step;

/// Storage of [`Step`]s no [`StepDefinition`] matched during a run.
///
/// Appended to by [`Runtime::resolve()`], and read once [snippets] are
/// requested.
///
/// [`Runtime::resolve()`]: crate::Runtime::resolve
/// [`StepDefinition`]: crate::StepDefinition
/// [snippets]: crate::Runtime::snippets
pub trait UndefinedSteps: fmt::Debug + Send + Sync {
    /// Records the given undefined [`Step`].
    ///
    /// Every occurrence is recorded, even if an equal [`Step`] has been
    /// recorded already.
    fn record(&self, step: Step);

    /// Returns all the recorded [`Step`]s in recording order.
    fn steps(&self) -> Vec<Step>;
}

/// Default in-memory [`UndefinedSteps`].
#[derive(Debug, Default)]
pub struct UndefinedStepsLog(Mutex<Vec<Step>>);

impl UndefinedStepsLog {
    /// Creates a new empty [`UndefinedStepsLog`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recorded [`Step`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Indicates whether no [`Step`]s have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UndefinedSteps for UndefinedStepsLog {
    fn record(&self, step: Step) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(step);
    }

    fn steps(&self) -> Vec<Step> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
