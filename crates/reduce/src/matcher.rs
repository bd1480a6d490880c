//! Column matchers.
//!
//! A matcher is a predicate over a column, the frame that owns it and every
//! frame in the invocation. Matchers are built from a serializable
//! [`MatcherConfig`] through a [`MatcherRegistry`].

use crate::display::display_name;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tally_core::pattern::NamePattern;
use tally_core::{Column, Error, FieldType, Frame, Result};

/// Column selection predicate. `column` must be borrowed from `frame`.
pub type Matcher = Box<dyn Fn(&Column, &Frame, &[Frame]) -> bool>;

/// Builds a matcher from its configuration. Receives the registry so
/// combinators can resolve nested configs.
pub type MatcherFactory = fn(&MatcherConfig, &MatcherRegistry) -> Result<Matcher>;

/// Ids of the built-in matchers.
pub mod ids {
    pub const BY_NAME: &str = "byName";
    pub const BY_NAMES: &str = "byNames";
    pub const BY_REGEXP: &str = "byRegexp";
    pub const BY_TYPE: &str = "byType";
    pub const NUMERIC: &str = "numeric";
    pub const TIME: &str = "time";
    pub const FIRST: &str = "first";
    pub const FIRST_TIME_FIELD: &str = "firstTimeField";
    pub const ALWAYS: &str = "alwaysMatch";
    pub const NEVER: &str = "neverMatch";
    pub const NOT_TIME: &str = "notTime";
    pub const INVERT: &str = "invert";
    pub const ANY: &str = "anyMatch";
    pub const ALL: &str = "allMatch";
}

/// Options carried by a matcher configuration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum MatcherOptions {
    /// No options.
    #[default]
    None,
    /// A single display name.
    Name(String),
    /// A list of display names.
    Names(Vec<String>),
    /// A name pattern.
    Pattern(String),
    /// A field type.
    Type(FieldType),
    /// One nested matcher.
    Config(Box<MatcherConfig>),
    /// Several nested matchers.
    Configs(Vec<MatcherConfig>),
}

/// Serializable matcher selection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatcherConfig {
    /// Registered matcher id.
    pub id: String,
    /// Matcher specific options.
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: MatcherOptions,
}

impl MatcherConfig {
    /// Creates a config for `id` with `options`.
    pub fn new(id: impl Into<String>, options: MatcherOptions) -> Self {
        Self {
            id: id.into(),
            options,
        }
    }

    /// Matches columns whose display name equals `name`.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self::new(ids::BY_NAME, MatcherOptions::Name(name.into()))
    }

    /// Matches columns whose display name is one of `names`.
    pub fn by_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            ids::BY_NAMES,
            MatcherOptions::Names(names.into_iter().map(Into::into).collect()),
        )
    }

    /// Matches columns whose display name matches `pattern`.
    pub fn by_regexp(pattern: impl Into<String>) -> Self {
        Self::new(ids::BY_REGEXP, MatcherOptions::Pattern(pattern.into()))
    }

    /// Matches columns of type `field_type`.
    pub fn by_type(field_type: FieldType) -> Self {
        Self::new(ids::BY_TYPE, MatcherOptions::Type(field_type))
    }

    /// Negates `inner`.
    pub fn invert(inner: MatcherConfig) -> Self {
        Self::new(ids::INVERT, MatcherOptions::Config(Box::new(inner)))
    }

    /// Matches when any of `inner` matches.
    pub fn any(inner: Vec<MatcherConfig>) -> Self {
        Self::new(ids::ANY, MatcherOptions::Configs(inner))
    }

    /// Matches when all of `inner` match.
    pub fn all(inner: Vec<MatcherConfig>) -> Self {
        Self::new(ids::ALL, MatcherOptions::Configs(inner))
    }
}

/// Matcher that selects every column.
pub fn always_matcher() -> Matcher {
    Box::new(|_: &Column, _: &Frame, _: &[Frame]| true)
}

/// Matcher that selects every column that is not time-typed.
pub fn not_time_matcher() -> Matcher {
    Box::new(|column: &Column, _: &Frame, _: &[Frame]| column.field_type() != FieldType::Time)
}

/// Resolves matcher configurations by id.
#[derive(Clone, Default)]
pub struct MatcherRegistry {
    factories: HashMap<String, MatcherFactory>,
}

impl core::fmt::Debug for MatcherRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

impl MatcherRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in matcher.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(ids::BY_NAME, by_name);
        registry.register(ids::BY_NAMES, by_names);
        registry.register(ids::BY_REGEXP, by_regexp);
        registry.register(ids::BY_TYPE, by_type);
        registry.register(ids::NUMERIC, |_, _| Ok(type_matcher(FieldType::Number)));
        registry.register(ids::TIME, |_, _| Ok(type_matcher(FieldType::Time)));
        registry.register(ids::FIRST, |_, _| {
            Ok(Box::new(|column: &Column, frame: &Frame, _: &[Frame]| {
                frame
                    .columns()
                    .first()
                    .is_some_and(|c| core::ptr::eq(c, column))
            }))
        });
        registry.register(ids::FIRST_TIME_FIELD, |_, _| {
            Ok(Box::new(|column: &Column, frame: &Frame, _: &[Frame]| {
                frame
                    .columns()
                    .iter()
                    .find(|c| c.field_type() == FieldType::Time)
                    .is_some_and(|c| core::ptr::eq(c, column))
            }))
        });
        registry.register(ids::ALWAYS, |_, _| Ok(always_matcher()));
        registry.register(ids::NEVER, |_, _| Ok(Box::new(|_: &Column, _: &Frame, _: &[Frame]| false)));
        registry.register(ids::NOT_TIME, |_, _| Ok(not_time_matcher()));
        registry.register(ids::INVERT, invert);
        registry.register(ids::ANY, any_match);
        registry.register(ids::ALL, all_match);
        registry
    }

    /// Registers `factory` under `id`, replacing any previous one.
    pub fn register(&mut self, id: impl Into<String>, factory: MatcherFactory) {
        self.factories.insert(id.into(), factory);
    }

    /// Returns whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Builds the matcher described by `config`.
    pub fn get(&self, config: &MatcherConfig) -> Result<Matcher> {
        let factory = self
            .factories
            .get(config.id.as_str())
            .ok_or_else(|| Error::matcher_not_found(config.id.as_str()))?;
        factory(config, self)
    }
}

fn type_matcher(field_type: FieldType) -> Matcher {
    Box::new(move |column: &Column, _: &Frame, _: &[Frame]| column.field_type() == field_type)
}

fn wrong_options(config: &MatcherConfig, expected: &str) -> Error {
    Error::invalid_matcher_options(
        config.id.as_str(),
        alloc::format!("expected {}, got {:?}", expected, config.options),
    )
}

fn by_name(config: &MatcherConfig, _: &MatcherRegistry) -> Result<Matcher> {
    let MatcherOptions::Name(name) = &config.options else {
        return Err(wrong_options(config, "a name"));
    };
    let name = name.clone();
    Ok(Box::new(move |column: &Column, frame: &Frame, all: &[Frame]| {
        display_name(column, frame, all) == name
    }))
}

fn by_names(config: &MatcherConfig, _: &MatcherRegistry) -> Result<Matcher> {
    let MatcherOptions::Names(names) = &config.options else {
        return Err(wrong_options(config, "a list of names"));
    };
    let names = names.clone();
    Ok(Box::new(move |column: &Column, frame: &Frame, all: &[Frame]| {
        let display = display_name(column, frame, all);
        names.iter().any(|n| *n == display)
    }))
}

fn by_regexp(config: &MatcherConfig, _: &MatcherRegistry) -> Result<Matcher> {
    let MatcherOptions::Pattern(pattern) = &config.options else {
        return Err(wrong_options(config, "a pattern"));
    };
    let pattern = NamePattern::parse(pattern)?;
    Ok(Box::new(move |column: &Column, frame: &Frame, all: &[Frame]| {
        pattern.is_match(&display_name(column, frame, all))
    }))
}

fn by_type(config: &MatcherConfig, _: &MatcherRegistry) -> Result<Matcher> {
    let MatcherOptions::Type(field_type) = config.options else {
        return Err(wrong_options(config, "a field type"));
    };
    Ok(type_matcher(field_type))
}

fn invert(config: &MatcherConfig, registry: &MatcherRegistry) -> Result<Matcher> {
    let MatcherOptions::Config(inner) = &config.options else {
        return Err(wrong_options(config, "a nested matcher"));
    };
    let inner = registry.get(inner)?;
    Ok(Box::new(move |column: &Column, frame: &Frame, all: &[Frame]| !inner(column, frame, all)))
}

fn nested(config: &MatcherConfig, registry: &MatcherRegistry) -> Result<Vec<Matcher>> {
    let MatcherOptions::Configs(inner) = &config.options else {
        return Err(wrong_options(config, "a list of nested matchers"));
    };
    inner.iter().map(|c| registry.get(c)).collect()
}

fn any_match(config: &MatcherConfig, registry: &MatcherRegistry) -> Result<Matcher> {
    let inner = nested(config, registry)?;
    Ok(Box::new(move |column: &Column, frame: &Frame, all: &[Frame]| {
        inner.iter().any(|m| m(column, frame, all))
    }))
}

fn all_match(config: &MatcherConfig, registry: &MatcherRegistry) -> Result<Matcher> {
    let inner = nested(config, registry)?;
    Ok(Box::new(move |column: &Column, frame: &Frame, all: &[Frame]| {
        inner.iter().all(|m| m(column, frame, all))
    }))
}
