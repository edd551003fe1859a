// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options of step matching.
//!
//! The [`Runtime`] itself has no command line: [`Cli`] is meant to be
//! flattened into the CLI of whatever drives the run, and then applied to the
//! [`Backend`]s.
//!
//! ```rust
//! # use clap::Parser as _;
//! # use cucumber_runtime::{Cli, RegexBackend, SnippetSyntax};
//! #[derive(clap::Parser)]
//! struct Opts {
//!     #[command(flatten)]
//!     steps: Cli,
//! }
//!
//! let opts = Opts::parse_from([
//!     "runner",
//!     "--snippet-syntax",
//!     "expression",
//! ]);
//! let backend = RegexBackend::new("rust").with_cli(&opts.steps);
//! assert_eq!(backend.syntax(), SnippetSyntax::Expression);
//! ```
//!
//! [`Backend`]: crate::Backend
//! [`Runtime`]: crate::Runtime

use crate::snippet::SnippetSyntax;

/// CLI options of step matching.
#[derive(Clone, Debug, Default, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Syntax of the snippets proposed for undefined steps.
    #[arg(long, value_name = "syntax", value_enum, global = true)]
    pub snippet_syntax: Option<SnippetSyntax>,
}

impl Cli {
    /// Returns the requested [`SnippetSyntax`], or the default one.
    #[must_use]
    pub fn snippet_syntax(&self) -> SnippetSyntax {
        self.snippet_syntax.unwrap_or_default()
    }
}
