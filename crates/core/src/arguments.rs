//! The argument map handed to handlers.
//!
//! Keys are canonical lowercase tags. Lookups through [`Arguments`] lowercase
//! the requested tag, so handlers may use any casing.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Value stored for a flag given without a value, e.g. `-verbose`.
pub const FLAG_VALUE: &str = "true";

/// Parsed `-tag value` pairs. Later duplicates overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: IndexMap<String, String>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, lowercasing the tag. Returns the previous value, if any.
    pub fn insert(&mut self, tag: &str, value: &str) -> Option<String> {
        self.values.insert(tag.to_lowercase(), value.to_string())
    }

    pub fn remove(&mut self, tag: &str) -> Option<String> {
        self.values.shift_remove(&tag.to_lowercase())
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.values.get(&tag.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.values.contains_key(&tag.to_lowercase())
    }

    /// True if the flag was given, or its value is `true` in any casing.
    pub fn flag(&self, tag: &str) -> bool {
        self.get(tag)
            .is_some_and(|value| value.eq_ignore_ascii_case(FLAG_VALUE))
    }

    /// Parses the value as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentValue`] if the value is present but is
    /// not an integer.
    pub fn int(&self, tag: &str) -> Result<Option<i64>> {
        self.parse_as(tag, "integer")
    }

    /// Parses the value with [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentValue`] if the value is present but
    /// does not parse.
    pub fn parse<T: FromStr>(&self, tag: &str) -> Result<Option<T>> {
        self.parse_as(tag, std::any::type_name::<T>())
    }

    fn parse_as<T: FromStr>(&self, tag: &str, expected: &'static str) -> Result<Option<T>> {
        match self.get(tag) {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| Error::invalid_argument_value(tag, value, expected)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(tag, value)| (tag.as_str(), value.as_str()))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut arguments = Self::new();
        for (tag, value) in iter {
            arguments.insert(tag.as_ref(), value.as_ref());
        }
        arguments
    }
}

/// Renders as the operator would type it: `-aa 1 -flag`.
impl Display for Arguments {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, (tag, value)) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str(" ")?;
            }

            if value == FLAG_VALUE {
                write!(formatter, "-{tag}")?;
            } else {
                write!(formatter, "-{tag} {value}")?;
            }
        }

        Ok(())
    }
}
