//! Ordered sequences that validate every inserted element.

use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{MetadataError, Result};
use crate::raw::{FromRaw, IntoValidated, deserialize_validated, expect_array};

use super::creator::Creator;
use super::date::DateStamp;

/// Creators of a component, in listing order.
pub type ListOfCreators = RestrictedList<Creator>;

/// Modification dates of a component, in the order they were recorded.
pub type ModifiedHistory = RestrictedList<DateStamp>;

/// A `Vec` wrapper whose mutators only accept validated elements.
///
/// Reads go through `Deref<Target = [T]>`, so indexing, slicing and iteration
/// work as on a slice. Every write path (`append`, `insert`, `set`, and
/// construction from plain data) validates before committing, and a rejected
/// write leaves the list untouched. Elements are never reordered or
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RestrictedList<T> {
    items: Vec<T>,
}

impl<T> RestrictedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a list from typed or plain elements; all-or-nothing.
    pub fn try_from_iter<I, V>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: IntoValidated<T>,
    {
        let items = items
            .into_iter()
            .map(IntoValidated::into_validated)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { items })
    }

    /// Add an element at the end.
    pub fn append(&mut self, item: impl IntoValidated<T>) -> Result<()> {
        let item = item.into_validated()?;
        self.items.push(item);
        Ok(())
    }

    /// Insert an element at `index`, shifting later elements right.
    ///
    /// `index` may equal the current length (append).
    pub fn insert(&mut self, index: usize, item: impl IntoValidated<T>) -> Result<()> {
        self.check_bounds(index, self.items.len() + 1)?;
        let item = item.into_validated()?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, item: impl IntoValidated<T>) -> Result<T> {
        self.check_bounds(index, self.items.len())?;
        let item = item.into_validated()?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    /// Remove and return the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_bounds(index, self.items.len())?;
        Ok(self.items.remove(index))
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consume the list, returning the elements.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    fn check_bounds(&self, index: usize, limit: usize) -> Result<()> {
        if index < limit {
            Ok(())
        } else {
            Err(MetadataError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl<T> Default for RestrictedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for RestrictedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a RestrictedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for RestrictedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T> From<Vec<T>> for RestrictedList<T> {
    /// Typed elements are already validated.
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: FromRaw> FromRaw for RestrictedList<T> {
    /// Build from a plain list; the first invalid element fails the whole list.
    fn from_raw(value: &Value) -> Result<Self> {
        let raw = expect_array(value, "list")?;
        let mut items = Vec::with_capacity(raw.len());
        for (index, element) in raw.iter().enumerate() {
            let item = T::from_raw(element).map_err(|err| match err {
                MetadataError::TypeMismatch {
                    context,
                    expected,
                    found,
                } => MetadataError::TypeMismatch {
                    context: format!("{context} at index {index}"),
                    expected,
                    found,
                },
                other => other,
            })?;
            items.push(item);
        }
        Ok(Self { items })
    }
}

impl<T> IntoValidated<RestrictedList<T>> for RestrictedList<T> {
    fn into_validated(self) -> Result<RestrictedList<T>> {
        Ok(self)
    }
}

impl<T> IntoValidated<RestrictedList<T>> for Vec<T> {
    fn into_validated(self) -> Result<RestrictedList<T>> {
        Ok(RestrictedList::from(self))
    }
}

impl<'de, T: FromRaw> Deserialize<'de> for RestrictedList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_validated(deserializer)
    }
}
