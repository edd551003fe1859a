//! [`Regex`]-based [`StepDefinition`].

use std::{fmt, future::Future, sync::Arc};

use cucumber_expressions::Expression;
use derive_more::with_trait::Debug;
use futures::{future::BoxFuture, FutureExt as _};
use regex::Regex;

use super::{Argument, Location, ParameterType, Parameters, StepDefinition};
use crate::{error::PatternError, Step};

/// Alias for a type-erased body of a [`RegexStepDefinition`].
type Body = Arc<
    dyn Fn(Parameters) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync,
>;

/// [`StepDefinition`] matching the whole [`Step`] text with a [`Regex`].
///
/// Every capture group of the [`Regex`] becomes an [`Argument`], so the
/// [`Regex`] is usually anchored with `^` and `$`.
#[derive(Clone, Debug)]
pub struct RegexStepDefinition {
    /// [`Regex`] to match [`Step`]s with.
    regex: Regex,

    /// Source text of the pattern, either a [`Regex`] or a
    /// [Cucumber Expression][0].
    ///
    /// [0]: https://github.com/cucumber/cucumber-expressions#readme
    pattern: String,

    /// Declared types of the captured [`Argument`]s.
    types: Vec<ParameterType>,

    /// [`Location`] this definition is declared at.
    location: Option<Location>,

    /// Body executing matched [`Step`]s.
    #[debug("{:p}", body)]
    body: Body,
}

impl RegexStepDefinition {
    /// Creates a new [`RegexStepDefinition`] from the given [`Regex`], with
    /// every capture group passed to the `body` as a [`String`].
    #[must_use]
    #[track_caller]
    pub fn new<F, Fut>(regex: Regex, body: F) -> Self
    where
        F: Fn(Parameters) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let types = vec![
            ParameterType::of::<String>();
            regex.captures_len().saturating_sub(1)
        ];
        Self {
            pattern: regex.as_str().to_owned(),
            regex,
            types,
            location: Some(Location::caller()),
            body: Arc::new(move |params| body(params).boxed()),
        }
    }

    /// Creates a new [`RegexStepDefinition`] from the given
    /// [Cucumber Expression][0], with every parameter passed to the `body` as
    /// a [`String`].
    ///
    /// # Errors
    ///
    /// If the `expression` is not a valid [Cucumber Expression][0].
    ///
    /// [0]: https://github.com/cucumber/cucumber-expressions#readme
    #[track_caller]
    pub fn expression<F, Fut>(
        expression: &str,
        body: F,
    ) -> Result<Self, PatternError>
    where
        F: Fn(Parameters) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let regex = Expression::regex(expression).map_err(|e| PatternError {
            pattern: expression.to_owned(),
            reason: e.to_string(),
        })?;
        let mut def = Self::new(regex, body);
        def.pattern = expression.to_owned();
        Ok(def)
    }

    /// Declares the types the captured [`Argument`]s are converted into.
    #[must_use]
    pub fn with_parameter_types(
        mut self,
        types: impl IntoIterator<Item = ParameterType>,
    ) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Overrides the [`Location`] of this definition.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the [`Regex`] of this definition.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl StepDefinition for RegexStepDefinition {
    fn matched_arguments(&self, step: &Step) -> Option<Vec<Argument>> {
        let captures = self.regex.captures(&step.name)?;
        let args = self
            .regex
            .capture_names()
            .zip(captures.iter())
            .skip(1)
            .map(|(name, group)| {
                let arg = group.map_or_else(Argument::unmatched, |m| {
                    Argument::new(m.as_str(), m.start())
                });
                match name {
                    Some(n) => arg.named(n),
                    None => arg,
                }
            })
            .collect();
        Some(args)
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn location(&self) -> Option<Location> {
        self.location
    }

    fn parameter_types(&self) -> &[ParameterType] {
        &self.types
    }

    fn execute(
        &self,
        parameters: Parameters,
    ) -> BoxFuture<'_, anyhow::Result<()>> {
        (self.body)(parameters)
    }
}

impl fmt::Display for RegexStepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} --> {loc}", self.pattern),
            None => write!(f, "{}", self.pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn cucumbers() -> RegexStepDefinition {
        RegexStepDefinition::new(
            Regex::new(r"^I have (\d+) cucumbers$").unwrap(),
            |_| async { Ok(()) },
        )
    }

    #[test]
    fn captures_arguments_with_offsets() {
        let step = Step::new("Given", "I have 3 cucumbers", "");
        let args = cucumbers().matched_arguments(&step).unwrap();
        assert_eq!(args, vec![Argument::new("3", 7)]);
    }

    #[test]
    fn does_not_match_other_text() {
        let step = Step::new("Given", "the cucumber is green", "");
        assert!(cucumbers().matched_arguments(&step).is_none());
    }

    #[test]
    fn names_arguments_and_skips_unmatched_groups() {
        let def = RegexStepDefinition::new(
            Regex::new(r"^the (?P<color>\w+) cucumber( is ripe)?$").unwrap(),
            |_| async { Ok(()) },
        );
        let step = Step::new("Then", "the green cucumber", "");
        let args = def.matched_arguments(&step).unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name(), Some("color"));
        assert_eq!(args[0].value(), "green");
        assert_eq!(args[1], Argument::unmatched());
    }

    #[test]
    fn defaults_parameter_types_to_strings() {
        let def = cucumbers();
        assert_eq!(def.parameter_types(), &[ParameterType::of::<String>()]);
        let def = def.with_parameter_types([ParameterType::of::<u32>()]);
        assert_eq!(def.parameter_types(), &[ParameterType::of::<u32>()]);
    }

    #[test]
    fn tracks_declaration_location() {
        let loc = cucumbers().location().unwrap();
        assert!(loc.path.ends_with("regex.rs"));
        assert!(cucumbers().to_string().contains(" --> "));
    }

    #[test]
    fn builds_from_cucumber_expression() {
        let def = RegexStepDefinition::expression(
            "I have {int} cucumbers",
            |_| async { Ok(()) },
        )
        .unwrap();
        assert_eq!(def.pattern(), "I have {int} cucumbers");
        let step = Step::new("Given", "I have 42 cucumbers", "");
        let args = def.matched_arguments(&step).unwrap();
        assert_eq!(args[0].value(), "42");
    }

    #[test]
    fn rejects_invalid_cucumber_expression() {
        let err = RegexStepDefinition::expression("I have {int", |_| async {
            Ok(())
        })
        .unwrap_err();
        assert_eq!(err.pattern, "I have {int");
    }

    #[tokio::test]
    async fn executes_body() {
        static CALLS: AtomicU32 = AtomicU32::new(0);

        let def = RegexStepDefinition::new(
            Regex::new(r"^I eat (\d+) cucumbers$").unwrap(),
            |mut params| async move {
                let n: String = params.next()?;
                _ = CALLS.fetch_add(n.parse()?, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(())
            },
        );
        def.execute(Parameters::from(vec![
            Box::new(String::from("2")) as crate::Value,
        ]))
        .await
        .unwrap();
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }
}
