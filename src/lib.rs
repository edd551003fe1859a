// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(missing_docs)]

//! Step matching core of a [Cucumber] runner.
//!
//! Given a [`Step`] taken from a [Gherkin] document, the [`Runtime`] asks every
//! registered [`Backend`] for its [`StepDefinition`]s and resolves the [`Step`]
//! into exactly one [`StepDefinitionMatch`]. [`Step`]s nothing matches are
//! remembered, so [snippets][`Runtime::snippets()`] can be proposed for them
//! once the run is over, while [`Step`]s matching several definitions are
//! reported as [`AmbiguousStepDefinitions`].
//!
//! ```rust
//! # use std::sync::Arc;
//! # use cucumber_runtime::{RegexBackend, RegexStepDefinition, Runtime, Step};
//! # use regex::Regex;
//! let backend = RegexBackend::new("rust").definition(RegexStepDefinition::new(
//!     Regex::new(r"^I have (\d+) cucumbers$").unwrap(),
//!     |_| async { Ok(()) },
//! ));
//! let runtime = Runtime::new(vec![Arc::new(backend)]);
//!
//! let step = Step::new("Given", "I have 3 cucumbers", "a.feature:3:5");
//! let matched = runtime.resolve("a.feature:3", &step).unwrap().unwrap();
//! assert_eq!(matched.arguments()[0].value(), "3");
//!
//! let step = Step::new("Then", "the cucumber is green", "a.feature:4:5");
//! assert!(runtime.resolve("a.feature:4", &step).unwrap().is_none());
//! assert_eq!(runtime.undefined_steps().len(), 1);
//! ```
//!
//! [Cucumber]: https://cucumber.io
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

pub mod backend;
pub mod cli;
pub mod definition;
pub mod error;
pub mod matched;
pub mod runtime;
pub mod snippet;
pub mod step;
pub mod transformers;
pub mod world;

#[doc(inline)]
pub use self::{
    backend::{Backend, RegexBackend},
    cli::Cli,
    definition::{
        Argument, Location, ParameterType, Parameters, RegexStepDefinition,
        StepDefinition,
    },
    error::{
        AmbiguousStepDefinitions, ParameterError, PatternError, StepError,
        TransformError,
    },
    matched::StepDefinitionMatch,
    runtime::{Runtime, UndefinedSteps, UndefinedStepsLog},
    snippet::{Snippet, SnippetSyntax},
    step::Step,
    transformers::{Transformers, Value},
    world::{World, WorldId},
};
