// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Snippet`]s proposing an implementation of an undefined [`Step`].

use std::fmt;

use derive_more::with_trait::Display;
use inflector::cases::snakecase::to_snake_case;
use itertools::Itertools as _;

use crate::Step;

/// Syntax of the pattern in a generated [`Snippet`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, clap::ValueEnum,
)]
pub enum SnippetSyntax {
    /// [Regular expression][0] pattern: `#[given(regex = r"^...$")]`.
    ///
    /// [0]: https://docs.rs/regex
    #[default]
    #[display("regex")]
    Regex,

    /// [Cucumber Expression][0] pattern: `#[given(expr = "...")]`.
    ///
    /// [0]: https://github.com/cucumber/cucumber-expressions#readme
    #[display("expression")]
    Expression,
}

/// Rust keywords, which cannot name a function as is.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const",
    "continue", "do", "dyn", "else", "enum", "extern", "false", "final", "fn",
    "for", "gen", "if", "impl", "in", "let", "loop", "macro", "match", "mod",
    "move", "mut", "override", "priv", "pub", "ref", "return", "static",
    "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords which cannot be used as raw identifiers either.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "super"];

/// Kind of a value recognized in a [`Step`] text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Param {
    /// Double-quoted text.
    Str,

    /// Decimal number.
    Float,

    /// Integer number.
    Int,
}

impl Param {
    /// Returns the pattern capturing this [`Param`] in the given syntax.
    const fn pattern(self, syntax: SnippetSyntax) -> &'static str {
        match (self, syntax) {
            (Self::Str, SnippetSyntax::Regex) => r#""([^"]*)""#,
            (Self::Float, SnippetSyntax::Regex) => r"(-?\d+\.\d+)",
            (Self::Int, SnippetSyntax::Regex) => r"(-?\d+)",
            (Self::Str, SnippetSyntax::Expression) => "{string}",
            (Self::Float, SnippetSyntax::Expression) => "{float}",
            (Self::Int, SnippetSyntax::Expression) => "{int}",
        }
    }

    /// Returns the Rust type of this [`Param`].
    const fn ty(self) -> &'static str {
        match self {
            Self::Str => "String",
            Self::Float => "f64",
            Self::Int => "i64",
        }
    }
}

/// Piece of a [`Step`] text.
#[derive(Clone, Copy, Debug)]
enum Chunk<'s> {
    /// Text taken as is.
    Literal(&'s str),

    /// Value turned into a parameter.
    Param(Param),
}

/// Code template of a step function implementing an undefined [`Step`].
///
/// Quoted text and numbers of the [`Step`] become parameters of the generated
/// function:
/// ```text
/// #[given(regex = r#"^I have (-?\d+) cucumbers$"#)]
/// async fn i_have_cucumbers(world: &mut World, arg1: i64) {
///     todo!("implement me")
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Snippet<'s> {
    /// [`Step`] to generate the [`Snippet`] for.
    step: &'s Step,

    /// Syntax of the pattern.
    syntax: SnippetSyntax,
}

impl<'s> Snippet<'s> {
    /// Creates a new [`Snippet`] of the given [`Step`].
    #[must_use]
    pub const fn new(step: &'s Step, syntax: SnippetSyntax) -> Self {
        Self { step, syntax }
    }

    /// Splits the [`Step`] text into literals and parameters.
    fn chunks(&self) -> Vec<Chunk<'s>> {
        let step: &'s Step = self.step;
        let text = step.name.as_str();
        let mut chunks = Vec::new();
        let mut last = 0;
        let values = lazy_regex::regex!(r#""[^"]*"|(-?\d+\.\d+)|(-?\d+)"#);
        for caps in values.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                chunks.push(Chunk::Literal(&text[last..whole.start()]));
            }
            let param = if caps.get(1).is_some() {
                Param::Float
            } else if caps.get(2).is_some() {
                Param::Int
            } else {
                Param::Str
            };
            chunks.push(Chunk::Param(param));
            last = whole.end();
        }
        if last < text.len() {
            chunks.push(Chunk::Literal(&text[last..]));
        }
        chunks
    }

    /// Returns the pattern matching the [`Step`] text.
    #[must_use]
    pub fn pattern(&self) -> String {
        let body = self
            .chunks()
            .into_iter()
            .map(|chunk| match chunk {
                Chunk::Literal(s) => match self.syntax {
                    SnippetSyntax::Regex => regex::escape(s),
                    SnippetSyntax::Expression => escape_expression(s),
                },
                Chunk::Param(p) => p.pattern(self.syntax).to_owned(),
            })
            .join("");
        match self.syntax {
            SnippetSyntax::Regex => format!("^{body}$"),
            SnippetSyntax::Expression => body,
        }
    }

    /// Returns the name of the generated function.
    ///
    /// Words of the [`Step`] text are snake-cased and joined. Keywords are
    /// turned into raw identifiers, or prefixed with `step_` where a raw
    /// identifier is not allowed.
    #[must_use]
    pub fn function_name(&self) -> String {
        let name = self
            .chunks()
            .into_iter()
            .filter_map(|chunk| match chunk {
                Chunk::Literal(s) => Some(s),
                Chunk::Param(_) => None,
            })
            .flat_map(|s| {
                s.split(|c: char| !(c.is_alphabetic() || c.is_ascii_digit()))
            })
            .filter(|w| !w.is_empty())
            .map(|w| {
                if w.is_ascii() {
                    to_snake_case(w)
                } else {
                    w.to_lowercase()
                }
            })
            .join("_");
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("step_{name}").trim_end_matches('_').to_owned()
        } else if NON_RAW_KEYWORDS.contains(&name.as_str()) {
            format!("step_{name}")
        } else if KEYWORDS.contains(&name.as_str()) {
            format!("r#{name}")
        } else {
            name
        }
    }

    /// Returns the attribute of the generated function.
    ///
    /// Keywords other than `Given`, `When` and `Then` fall back to `given`.
    #[must_use]
    pub fn attribute(&self) -> &'static str {
        match self.step.trimmed_keyword().to_lowercase().as_str() {
            "when" => "when",
            "then" => "then",
            _ => "given",
        }
    }

    /// Returns the `(name, type)` parameters of the generated function.
    #[must_use]
    pub fn parameters(&self) -> Vec<(String, &'static str)> {
        self.chunks()
            .into_iter()
            .filter_map(|chunk| match chunk {
                Chunk::Param(p) => Some(p.ty()),
                Chunk::Literal(_) => None,
            })
            .enumerate()
            .map(|(i, ty)| (format!("arg{}", i + 1), ty))
            .collect()
    }
}

impl fmt::Display for Snippet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.syntax {
            SnippetSyntax::Regex => "regex",
            SnippetSyntax::Expression => "expr",
        };
        let params = self
            .parameters()
            .into_iter()
            .map(|(name, ty)| format!(", {name}: {ty}"))
            .join("");
        writeln!(
            f,
            "#[{}({key} = {})]",
            self.attribute(),
            raw_string(&self.pattern()),
        )?;
        writeln!(
            f,
            "async fn {}(world: &mut World{params}) {{",
            self.function_name(),
        )?;
        writeln!(f, "    todo!(\"implement me\")")?;
        write!(f, "}}")
    }
}

/// Escapes the characters having a special meaning in a
/// [Cucumber Expression][0].
///
/// [0]: https://github.com/cucumber/cucumber-expressions#readme
fn escape_expression(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '(' | '{' | '/') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wraps the given `s` into a raw string literal with enough `#`s.
fn raw_string(s: &str) -> String {
    let hashes = (1..)
        .find(|n| !s.contains(&format!("\"{}", "#".repeat(*n))))
        .unwrap_or(1);
    let hashes = "#".repeat(hashes);
    format!("r{hashes}\"{s}\"{hashes}")
}

#[cfg(test)]
mod tests {
    use ::regex::Regex;

    use super::*;

    fn snippet(keyword: &str, name: &str, syntax: SnippetSyntax) -> String {
        let step = Step::new(keyword, name, "a.feature:1:1");
        Snippet::new(&step, syntax).to_string()
    }

    #[test]
    fn renders_regex_snippet() {
        assert_eq!(
            snippet("Given", "I have 3 cucumbers", SnippetSyntax::Regex),
            "#[given(regex = r#\"^I have (-?\\d+) cucumbers$\"#)]\n\
             async fn i_have_cucumbers(world: &mut World, arg1: i64) {\n    \
                 todo!(\"implement me\")\n\
             }",
        );
    }

    #[test]
    fn renders_expression_snippet() {
        assert_eq!(
            snippet(
                "When",
                "I eat 1.5 \"green\" cucumbers",
                SnippetSyntax::Expression,
            ),
            "#[when(expr = r#\"I eat {float} {string} cucumbers\"#)]\n\
             async fn i_eat_cucumbers(\
                 world: &mut World, arg1: f64, arg2: String\
             ) {\n    \
                 todo!(\"implement me\")\n\
             }",
        );
    }

    #[test]
    fn captures_quoted_text_in_regex() {
        let step = Step::new("Then", "it is \"ripe\"", "");
        let s = Snippet::new(&step, SnippetSyntax::Regex);
        assert_eq!(s.pattern(), r#"^it is "([^"]*)"$"#);
        assert_eq!(s.parameters(), vec![("arg1".to_owned(), "String")]);
        assert!(Regex::new(&s.pattern()).unwrap().is_match(&step.name));
    }

    #[test]
    fn escapes_special_characters() {
        let step = Step::new("Given", "a (big) cucumber.", "");
        assert_eq!(
            Snippet::new(&step, SnippetSyntax::Regex).pattern(),
            r"^a \(big\) cucumber\.$",
        );
        assert_eq!(
            Snippet::new(&step, SnippetSyntax::Expression).pattern(),
            r"a \(big) cucumber.",
        );
    }

    #[test]
    fn falls_back_to_given_attribute() {
        for keyword in ["And ", "But", "*"] {
            let step = Step::new(keyword, "x", "");
            let s = Snippet::new(&step, SnippetSyntax::Regex);
            assert_eq!(s.attribute(), "given");
        }
        let step = Step::new("Then ", "x", "");
        assert_eq!(Snippet::new(&step, SnippetSyntax::Regex).attribute(), "then");
    }

    #[test]
    fn names_function_without_words() {
        let step = Step::new("Given", "42", "");
        assert_eq!(
            Snippet::new(&step, SnippetSyntax::Regex).function_name(),
            "step",
        );
    }

    #[test]
    fn escapes_keyword_function_names() {
        let name = |text: &str| {
            let step = Step::new("Given", text, "");
            Snippet::new(&step, SnippetSyntax::Regex).function_name()
        };
        assert_eq!(name("match"), "r#match");
        assert_eq!(name("type"), "r#type");
        assert_eq!(name("self"), "step_self");
        assert_eq!(name("super 1"), "step_super");
        assert_eq!(name("match it"), "match_it");

        let step = Step::new("Given", "match", "");
        assert!(Snippet::new(&step, SnippetSyntax::Regex)
            .to_string()
            .contains("async fn r#match(world: &mut World) {"));
    }

    #[test]
    fn keeps_non_ascii_words_whole() {
        let step = Step::new("Given", "café ünïcode 3", "");
        let s = Snippet::new(&step, SnippetSyntax::Regex);
        assert_eq!(s.function_name(), "café_ünïcode");

        let step = Step::new("Given", "Ärger mit Gurken", "");
        let s = Snippet::new(&step, SnippetSyntax::Regex);
        assert_eq!(s.function_name(), "ärger_mit_gurken");
    }

    #[test]
    fn snake_cases_mixed_case_words() {
        let step = Step::new("When", "I eat greenCucumbers", "");
        let s = Snippet::new(&step, SnippetSyntax::Regex);
        assert_eq!(s.function_name(), "i_eat_green_cucumbers");
    }

    #[test]
    fn adds_hashes_to_raw_strings() {
        assert_eq!(raw_string("a"), "r#\"a\"#");
        assert_eq!(raw_string("\"#"), "r##\"\"#\"##");
    }

    #[test]
    fn is_deterministic() {
        let a = snippet("Given", "I have 3 cucumbers", SnippetSyntax::Regex);
        let b = snippet("Given", "I have 3 cucumbers", SnippetSyntax::Regex);
        assert_eq!(a, b);
    }
}
