use serde::{Deserialize, Serialize};

use super::ReaderError;

/// Explicit choice between a single field and an ordered tuple of fields
///
/// Used both for configuration (field names, naming patterns) and for served
/// data: a reader configured with [`Fields::Single`] serves one array per item,
/// one configured with [`Fields::Tuple`] serves a tuple in the configured order,
/// even when that tuple has length one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fields<T> {
    /// Exactly one field
    Single(T),
    /// An ordered tuple of fields
    Tuple(Vec<T>),
}

impl<T> Fields<T> {
    /// Number of fields
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Tuple(values) => values.len(),
        }
    }

    /// Whether this is an empty tuple
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is the single-field form
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Values in order
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Tuple(values) => values,
        }
    }

    /// Iterate over values in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Borrow every value, keeping the shape
    pub fn borrowed(&self) -> Fields<&T> {
        match self {
            Self::Single(value) => Fields::Single(value),
            Self::Tuple(values) => Fields::Tuple(values.iter().collect()),
        }
    }

    /// Transform every value, keeping the shape
    pub fn map<U, F>(self, mut f: F) -> Fields<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Self::Single(value) => Fields::Single(f(value)),
            Self::Tuple(values) => Fields::Tuple(values.into_iter().map(f).collect()),
        }
    }

    /// Fallible [`Fields::map`]; stops at the first error
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<Fields<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        match self {
            Self::Single(value) => Ok(Fields::Single(f(value)?)),
            Self::Tuple(values) => Ok(Fields::Tuple(
                values.into_iter().map(f).collect::<Result<_, _>>()?,
            )),
        }
    }

    /// Values in order as a vector
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Single(value) => vec![value],
            Self::Tuple(values) => values,
        }
    }

    /// The value of the single-field form
    pub fn into_single(self) -> Option<T> {
        match self {
            Self::Single(value) => Some(value),
            Self::Tuple(_) => None,
        }
    }
}

impl<T: PartialEq> Fields<T> {
    /// Reject empty tuples and repeated values
    pub(crate) fn validate(&self, what: &str) -> Result<(), ReaderError> {
        let values = self.as_slice();
        if values.is_empty() {
            return Err(ReaderError::Schema(format!("at least one {} is required", what)));
        }
        for (i, value) in values.iter().enumerate() {
            if values[..i].contains(value) {
                return Err(ReaderError::Schema(format!(
                    "{} at position {} is repeated",
                    what, i
                )));
            }
        }
        Ok(())
    }
}

impl From<&str> for Fields<String> {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for Fields<String> {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for Fields<String> {
    fn from(values: Vec<String>) -> Self {
        Self::Tuple(values)
    }
}

impl From<Vec<&str>> for Fields<String> {
    fn from(values: Vec<&str>) -> Self {
        Self::Tuple(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Fields<String> {
    fn from(values: [&str; N]) -> Self {
        Self::Tuple(values.iter().map(|v| v.to_string()).collect())
    }
}
