// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Backend`] capability providing [`StepDefinition`]s of one implementation
//! language.

use std::{any, fmt, sync::Arc};

use crate::{
    cli::Cli,
    definition::{RegexStepDefinition, StepDefinition},
    snippet::{Snippet, SnippetSyntax},
    Step,
};

/// Provider of [`StepDefinition`]s written in one language or ecosystem.
///
/// [`Backend`]s are registered in a [`Runtime`] once and are treated as
/// read-only afterwards.
///
/// [`Runtime`]: crate::Runtime
pub trait Backend: fmt::Debug + Send + Sync {
    /// Returns the name of this [`Backend`], used in reports.
    fn name(&self) -> &str {
        any::type_name::<Self>()
    }

    /// Returns all the [`StepDefinition`]s of this [`Backend`].
    ///
    /// The order has to be stable during a run.
    fn step_definitions(&self) -> &[Arc<dyn StepDefinition>];

    /// Generates a code template implementing the given undefined [`Step`].
    ///
    /// Has to return the same template for the same [`Step`] during a run.
    fn snippet(&self, step: &Step) -> String;
}

/// [`Backend`] of [`RegexStepDefinition`]s, proposing Rust [`Snippet`]s.
#[derive(Debug)]
pub struct RegexBackend {
    /// Name of this [`Backend`].
    name: String,

    /// Registered [`StepDefinition`]s in registration order.
    definitions: Vec<Arc<dyn StepDefinition>>,

    /// Syntax of the generated [`Snippet`]s.
    syntax: SnippetSyntax,
}

impl RegexBackend {
    /// Creates a new empty [`RegexBackend`] with the given `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
            syntax: SnippetSyntax::default(),
        }
    }

    /// Registers the given [`RegexStepDefinition`].
    #[must_use]
    pub fn definition(self, def: RegexStepDefinition) -> Self {
        self.step_definition(Arc::new(def))
    }

    /// Registers an arbitrary [`StepDefinition`].
    #[must_use]
    pub fn step_definition(mut self, def: Arc<dyn StepDefinition>) -> Self {
        self.definitions.push(def);
        self
    }

    /// Sets the syntax of the generated [`Snippet`]s.
    #[must_use]
    pub fn snippet_syntax(mut self, syntax: SnippetSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Applies the given [`Cli`] options.
    #[must_use]
    pub fn with_cli(self, cli: &Cli) -> Self {
        self.snippet_syntax(cli.snippet_syntax())
    }

    /// Returns the syntax of the generated [`Snippet`]s.
    #[must_use]
    pub const fn syntax(&self) -> SnippetSyntax {
        self.syntax
    }
}

impl Backend for RegexBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn step_definitions(&self) -> &[Arc<dyn StepDefinition>] {
        &self.definitions
    }

    fn snippet(&self, step: &Step) -> String {
        Snippet::new(step, self.syntax).to_string()
    }
}
