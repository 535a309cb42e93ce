//! Immutable `(key, value)` tuple with positional access.
//!
//! [`Buffer::first`](crate::Buffer::first) and [`Buffer::last`](crate::Buffer::last)
//! hand out `Item<&K, &V>` views. Position `0` is the key, position `1` is the
//! value; any other position is out of bounds.

use crate::error::{Result, StreamError};
use serde::Serialize;

/// An immutable `(key, value)` pair.
///
/// # Example
/// ```
/// use datastream::{Field, Item};
///
/// let item = Item::new("a", 2);
/// assert_eq!(item.key(), &"a");
/// assert!(matches!(item.get(1), Ok(Field::Value(&2))));
/// assert!(item.get(2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Item<K, V> {
    key: K,
    value: V,
}

/// One position of an [`Item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field<'i, K, V> {
    /// Position 0.
    Key(&'i K),
    /// Position 1.
    Value(&'i V),
}

impl<K, V> Item<K, V> {
    /// Create a new item.
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// The key (position 0).
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// The value (position 1).
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Whether `index` is a valid position.
    #[must_use]
    pub const fn has(&self, index: usize) -> bool {
        index < 2
    }

    /// Positional access.
    ///
    /// # Errors
    /// Returns [`StreamError::OutOfBounds`] for any index other than 0 or 1.
    pub fn get(&self, index: usize) -> Result<Field<'_, K, V>> {
        match index {
            0 => Ok(Field::Key(&self.key)),
            1 => Ok(Field::Value(&self.value)),
            _ => Err(StreamError::out_of_bounds(
                index,
                format!("Item tuple does not have offset \"{index}\"."),
            )),
        }
    }

    /// Split into the underlying pair.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: Clone, V: Clone> Item<&K, &V> {
    /// Clone a borrowed view into an owned item.
    #[must_use]
    pub fn cloned(&self) -> Item<K, V> {
        Item::new(self.key.clone(), self.value.clone())
    }
}

impl<K, V> From<(K, V)> for Item<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K, V> From<Item<K, V>> for (K, V) {
    fn from(item: Item<K, V>) -> Self {
        item.into_pair()
    }
}
