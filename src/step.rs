// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Step`] consumed by a [`Runtime`].
//!
//! [`Runtime`]: crate::Runtime

use std::path::Path;

use derive_more::with_trait::Display;
use gherkin::StepType;

/// Single line of a [scenario][0] to be resolved into a step definition.
///
/// [`Step`]s are produced by a [Gherkin] parser and are never mutated by a
/// [`Runtime`].
///
/// [`Runtime`]: crate::Runtime
/// [0]: https://cucumber.io/docs/gherkin/reference#example
/// [Gherkin]: https://cucumber.io/docs/gherkin/reference
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("{keyword} {name}")]
pub struct Step {
    /// Keyword of this [`Step`] (`Given`, `When`, `Then`, `And`, `But`, `*`).
    pub keyword: String,

    /// Text of this [`Step`] following its keyword.
    pub name: String,

    /// Source location of this [`Step`], usually `path:line:column`.
    pub location: String,
}

impl Step {
    /// Creates a new [`Step`].
    #[must_use]
    pub fn new(
        keyword: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            location: location.into(),
        }
    }

    /// Converts a parsed [`gherkin::Step`] located in the file at `path`.
    ///
    /// `And`/`But` keywords are already resolved by the parser into the
    /// [`StepType`] of the preceding [`Step`], so the keyword is taken from
    /// there.
    #[must_use]
    pub fn from_gherkin(step: &gherkin::Step, path: Option<&Path>) -> Self {
        let keyword = match step.ty {
            StepType::Given => "Given",
            StepType::When => "When",
            StepType::Then => "Then",
        };
        let location = match path {
            Some(p) => format!(
                "{}:{}:{}",
                p.display(),
                step.position.line,
                step.position.col,
            ),
            None => format!("{}:{}", step.position.line, step.position.col),
        };
        Self::new(keyword, step.value.clone(), location)
    }

    /// Returns the keyword with surrounding whitespace trimmed.
    #[must_use]
    pub fn trimmed_keyword(&self) -> &str {
        self.keyword.trim()
    }
}
