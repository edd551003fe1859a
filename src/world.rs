// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-scenario [`World`] execution context.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use derive_more::with_trait::Display;
use tracing::debug;

use crate::{backend::Backend, runtime::Runtime};

/// Identifier of a [`World`], unique during the whole process.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct WorldId(pub u64);

impl WorldId {
    /// Creates a new unique [`WorldId`].
    #[must_use]
    pub fn new() -> Self {
        /// [`AtomicU64`] ID.
        static ID: AtomicU64 = AtomicU64::new(0);

        Self(ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

/// Isolated execution context of a single scenario.
///
/// Created by [`Runtime::new_world()`] and never reused, so state of one
/// scenario never leaks into another. Scenario-local state of a particular
/// language lives in its [`Backend`], while a [`World`] only gives access to
/// the [`Backend`]s and the [`Runtime`] that created it.
#[derive(Clone, Copy, Debug)]
pub struct World<'r> {
    /// Unique ID of this [`World`].
    id: WorldId,

    /// [`Runtime`] this [`World`] was created by.
    runtime: &'r Runtime,
}

impl<'r> World<'r> {
    /// Creates a new [`World`] of the given [`Runtime`].
    pub(crate) fn new(runtime: &'r Runtime) -> Self {
        let id = WorldId::new();
        debug!(world = %id, "world created");
        Self { id, runtime }
    }

    /// Returns the [`WorldId`] of this [`World`].
    #[must_use]
    pub const fn id(&self) -> WorldId {
        self.id
    }

    /// Returns the [`Backend`]s this [`World`] sees.
    ///
    /// These are always the [`Backend`]s of the creating [`Runtime`].
    #[must_use]
    pub fn backends(&self) -> &'r [Arc<dyn Backend>] {
        self.runtime.backends()
    }

    /// Returns the [`Runtime`] this [`World`] was created by.
    #[must_use]
    pub const fn runtime(&self) -> &'r Runtime {
        self.runtime
    }
}
