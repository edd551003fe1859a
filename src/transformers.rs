// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Transformers`] registry converting captured [`Argument`]s into typed
//! values.
//!
//! [`Argument`]: crate::Argument

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt::Display,
    str::FromStr,
    sync::Arc,
};

use derive_more::with_trait::Debug;
use itertools::Itertools as _;

use crate::{definition::ParameterType, error::TransformError};

/// Type-erased converted value of an [`Argument`].
///
/// [`Argument`]: crate::Argument
pub type Value = Box<dyn Any + Send>;

/// Alias for a type-erased conversion of a text into a [`Value`].
type Convert = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// Registry of conversions from captured text into typed values.
///
/// Built once and then only ever replaced as a whole, so every
/// [`StepDefinitionMatch`] keeps converting its arguments with the registry
/// current at the moment it was created.
///
/// [`StepDefinitionMatch`]: crate::StepDefinitionMatch
#[derive(Clone, Debug)]
pub struct Transformers {
    /// Conversions by the [`TypeId`] of their output.
    #[debug(
        "{:?}",
        conversions.values().map(|(ty, _)| ty.name()).sorted().collect_vec()
    )]
    conversions: HashMap<TypeId, (ParameterType, Convert)>,
}

impl Default for Transformers {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformers {
    /// Creates a new [`Transformers`] registry converting into primitive
    /// types, [`String`] and [`Duration`].
    ///
    /// [`Duration`]s are parsed in a human-readable format like `1min 30s`.
    ///
    /// [`Duration`]: std::time::Duration
    #[must_use]
    pub fn new() -> Self {
        Self::empty()
            .register::<i8>()
            .register::<i16>()
            .register::<i32>()
            .register::<i64>()
            .register::<i128>()
            .register::<isize>()
            .register::<u8>()
            .register::<u16>()
            .register::<u32>()
            .register::<u64>()
            .register::<u128>()
            .register::<usize>()
            .register::<f32>()
            .register::<f64>()
            .register::<bool>()
            .register::<char>()
            .register::<String>()
            .register_with(humantime::parse_duration)
    }

    /// Creates a new [`Transformers`] registry without any conversions.
    #[must_use]
    pub fn empty() -> Self {
        Self { conversions: HashMap::new() }
    }

    /// Registers a conversion into `T` via its [`FromStr`] implementation,
    /// replacing any previous conversion into `T`.
    #[must_use]
    pub fn register<T>(self) -> Self
    where
        T: FromStr + Any + Send,
        T::Err: Display,
    {
        self.register_with(str::parse::<T>)
    }

    /// Registers the given conversion into `T`, replacing any previous
    /// conversion into `T`.
    #[must_use]
    pub fn register_with<T, E, F>(mut self, f: F) -> Self
    where
        T: Any + Send,
        E: Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let ty = ParameterType::of::<T>();
        let convert: Convert = Arc::new(move |s: &str| {
            f(s).map(|v| Box::new(v) as Value).map_err(|e| e.to_string())
        });
        _ = self.conversions.insert(ty.id(), (ty, convert));
        self
    }

    /// Indicates whether this registry converts into the given
    /// [`ParameterType`].
    #[must_use]
    pub fn supports(&self, ty: ParameterType) -> bool {
        self.conversions.contains_key(&ty.id())
    }

    /// Returns all the [`ParameterType`]s this registry converts into, ordered
    /// by name.
    pub fn types(&self) -> impl Iterator<Item = ParameterType> + '_ {
        self.conversions
            .values()
            .map(|(ty, _)| *ty)
            .sorted_by_key(ParameterType::name)
    }

    /// Converts the given `text` into a [`Value`] of the given
    /// [`ParameterType`].
    ///
    /// # Errors
    ///
    /// If there is no conversion into the [`ParameterType`], or the conversion
    /// fails.
    pub fn transform_to(
        &self,
        ty: ParameterType,
        text: &str,
    ) -> Result<Value, TransformError> {
        let (_, convert) = self
            .conversions
            .get(&ty.id())
            .ok_or(TransformError::Unsupported { type_name: ty.name() })?;
        convert(text).map_err(|reason| TransformError::Invalid {
            value: text.to_owned(),
            type_name: ty.name(),
            reason,
        })
    }

    /// Converts the given `text` into `T`.
    ///
    /// # Errors
    ///
    /// If there is no conversion into `T`, or the conversion fails.
    pub fn transform<T: Any + Send>(
        &self,
        text: &str,
    ) -> Result<T, TransformError> {
        let ty = ParameterType::of::<T>();
        self.transform_to(ty, text)?
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| TransformError::Unsupported { type_name: ty.name() })
    }
}
