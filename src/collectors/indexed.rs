use super::Collector;
use crate::aggregator::Aggregated;
use crate::error::{Result, StreamError};
use crate::stream::Stream;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// A scalar key: compared by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKey {
    /// Any integer key.
    Int(i128),
    /// Any string key.
    Str(String),
}

impl fmt::Display for ScalarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// How a key is indexed: by value, or by the identity of a shared allocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyRef {
    /// Compared by value.
    Scalar(ScalarKey),
    /// Compared by address of the pointee (`Rc` / `Arc` keys).
    Identity(usize),
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(key) => key.fmt(f),
            Self::Identity(addr) => write!(f, "<identity {addr:#x}>"),
        }
    }
}

/// Keys usable by [`IndexedCollector`] and [`Stream::left_join`](crate::Stream::left_join).
///
/// Integers and strings index by value; `Rc` and `Arc` index by identity, so
/// two clones of the same `Rc` match while equal but distinct allocations do
/// not.
pub trait IndexKey {
    /// Classify this key.
    ///
    /// # Errors
    /// [`StreamError::Unsupported`] for keys that are neither scalar nor
    /// identity keys.
    fn index_key(&self) -> Result<KeyRef>;
}

macro_rules! int_index_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl IndexKey for $t {
                fn index_key(&self) -> Result<KeyRef> {
                    Ok(KeyRef::Scalar(ScalarKey::Int(i128::from(*self))))
                }
            }
        )*
    };
}

int_index_key!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl IndexKey for usize {
    fn index_key(&self) -> Result<KeyRef> {
        Ok(KeyRef::Scalar(ScalarKey::Int(*self as i128)))
    }
}

impl IndexKey for isize {
    fn index_key(&self) -> Result<KeyRef> {
        Ok(KeyRef::Scalar(ScalarKey::Int(*self as i128)))
    }
}

impl IndexKey for str {
    fn index_key(&self) -> Result<KeyRef> {
        Ok(KeyRef::Scalar(ScalarKey::Str(self.to_string())))
    }
}

impl IndexKey for String {
    fn index_key(&self) -> Result<KeyRef> {
        self.as_str().index_key()
    }
}

impl<T: IndexKey + ?Sized> IndexKey for &T {
    fn index_key(&self) -> Result<KeyRef> {
        (**self).index_key()
    }
}

impl<T: ?Sized> IndexKey for Rc<T> {
    fn index_key(&self) -> Result<KeyRef> {
        Ok(KeyRef::Identity(Rc::as_ptr(self).cast::<()>().addr()))
    }
}

impl<T: ?Sized> IndexKey for Arc<T> {
    fn index_key(&self) -> Result<KeyRef> {
        Ok(KeyRef::Identity(Arc::as_ptr(self).cast::<()>().addr()))
    }
}

impl IndexKey for serde_json::Value {
    fn index_key(&self) -> Result<KeyRef> {
        use serde_json::Value;
        match self {
            Value::String(s) => s.index_key(),
            Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .map(|i| KeyRef::Scalar(ScalarKey::Int(i)))
                .ok_or_else(unsupported),
            _ => Err(unsupported()),
        }
    }
}

fn unsupported() -> StreamError {
    StreamError::unsupported("Only identity, string and integer keys are supported.")
}

/// Entries in order plus positions grouped by key.
///
/// Identity keys stay valid because the entries, keys included, are owned by
/// the index for as long as it lives.
pub(crate) struct Index<K, V> {
    entries: Vec<(K, V)>,
    scalar: HashMap<ScalarKey, Vec<usize>>,
    identity: HashMap<usize, Vec<usize>>,
}

impl<K: IndexKey, V> Index<K, V> {
    pub(crate) fn build<I>(source: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<(K, V)>>,
    {
        let mut index = Self {
            entries: Vec::new(),
            scalar: HashMap::new(),
            identity: HashMap::new(),
        };
        for entry in source {
            let (key, value) = entry?;
            let position = index.entries.len();
            match key.index_key()? {
                KeyRef::Scalar(scalar) => index.scalar.entry(scalar).or_default().push(position),
                KeyRef::Identity(addr) => index.identity.entry(addr).or_default().push(position),
            }
            index.entries.push((key, value));
        }
        Ok(index)
    }

    fn positions(&self, key: &KeyRef) -> Option<&[usize]> {
        match key {
            KeyRef::Scalar(scalar) => self.scalar.get(scalar),
            KeyRef::Identity(addr) => self.identity.get(addr),
        }
        .map(Vec::as_slice)
    }

    /// Values stored under `key`, in insertion order; empty when absent.
    pub(crate) fn lookup<Q: IndexKey + ?Sized>(&self, key: &Q) -> Result<impl Iterator<Item = &V>> {
        let positions = self.positions(&key.index_key()?).unwrap_or_default();
        Ok(positions.iter().map(|&position| &self.entries[position].1))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Drains a stream on construction, keeping every entry in order and a
/// multi-valued index by key.
///
/// # Example
/// ```
/// use datastream::collectors::IndexedCollector;
/// use datastream::Stream;
///
/// # fn main() -> datastream::Result<()> {
/// let index = Stream::from_entries(vec![("a", 1), ("b", 2), ("a", 3)]).collect(IndexedCollector::new)?;
///
/// assert_eq!(index.get("a")?, vec![&1, &3]);
/// assert!(!index.contains("z")?);
/// assert!(index.get("z").is_err());
/// # Ok(())
/// # }
/// ```
pub struct IndexedCollector<'a, K, V> {
    index: Index<K, V>,
    source: Stream<'a, K, V>,
}

impl<'a, K: IndexKey + 'a, V: 'a> IndexedCollector<'a, K, V> {
    /// Drain `source` and index it.
    ///
    /// # Errors
    /// The first stage error, or [`StreamError::Unsupported`] for a key that
    /// cannot be indexed.
    pub fn new(mut source: Stream<'a, K, V>) -> Result<Self> {
        let index = Index::build(source.iter()?)?;
        Ok(Self { index, source })
    }

    /// Whether some entry has this key.
    ///
    /// # Errors
    /// [`StreamError::Unsupported`] if `key` cannot be indexed.
    pub fn contains<Q: IndexKey + ?Sized>(&self, key: &Q) -> Result<bool> {
        Ok(self.index.positions(&key.index_key()?).is_some())
    }

    /// Every value stored under `key`, in stream order.
    ///
    /// # Errors
    /// [`StreamError::OutOfBounds`] if no entry has this key,
    /// [`StreamError::Unsupported`] if `key` cannot be indexed.
    pub fn get<Q: IndexKey + ?Sized>(&self, key: &Q) -> Result<Vec<&V>> {
        let key = key.index_key()?;
        let positions = self.index.positions(&key).ok_or_else(|| {
            StreamError::out_of_bounds(&key, format!("Key \"{key}\" does not exist in collection."))
        })?;
        Ok(positions.iter().map(|&p| &self.index.entries[p].1).collect())
    }

    /// Number of collected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.entries.is_empty()
    }

    /// Collected entries in stream order.
    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.index.entries.iter()
    }
}

impl<'a, K: IndexKey + 'a, V: 'a> Collector for IndexedCollector<'a, K, V> {
    type Value<'c>
        = &'c [(K, V)]
    where
        Self: 'c;

    fn value(&self) -> &[(K, V)] {
        &self.index.entries
    }

    fn aggregated(&self) -> Result<Aggregated> {
        self.source.aggregated()
    }

    fn is_closed(&self) -> bool {
        self.source.is_closed()
    }
}
