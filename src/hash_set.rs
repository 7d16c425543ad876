use std::{
    collections::HashMap,
    fmt::{self, Debug, Display},
};

use tracing::trace;

use crate::hash_key::{hash_string, HashKey};

/// A set keyed by the integer hash of its values.
///
/// Two values are the same element iff their [`HashKey`]s are equal. Iteration
/// is in ascending key order, not insertion order.
#[derive(Clone)]
pub struct HashSet<T> {
    data: HashMap<i64, T>,
    size: usize,
}

impl<T> Default for HashSet<T> {
    fn default() -> Self {
        HashSet {
            data: HashMap::new(),
            size: 0,
        }
    }
}

impl<T> HashSet<T> {
    pub fn new() -> HashSet<T> {
        HashSet::default()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.size = 0;
    }

    pub fn contains_key(&self, hash: i64) -> bool {
        self.data.contains_key(&hash)
    }

    /// All stored hashes, ascending.
    pub fn keys(&self) -> Vec<i64> {
        let mut keys: Vec<i64> = self.data.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Values in the same order as [`HashSet::keys`].
    pub fn values(&self) -> Vec<&T> {
        self.keys().into_iter().map(|key| &self.data[&key]).collect()
    }

    pub fn iter(&self) -> std::vec::IntoIter<&T> {
        self.values().into_iter()
    }

    pub fn for_each(&self, mut callback: impl FnMut(&T)) -> &Self {
        for value in self.iter() {
            callback(value);
        }
        self
    }

    /// A single key for the whole set: the decimal keys concatenated with no
    /// separator, then hashed with djb2.
    ///
    /// Distinct key lists can concatenate to the same string (`[1, 23]` and
    /// `[123]`), and then share a combined key.
    pub fn to_hash_key(&self) -> i64 {
        let combined: String = self.keys().iter().map(i64::to_string).collect();
        hash_string(&combined)
    }

    pub fn hash_string(value: &str) -> i64 {
        hash_string(value)
    }
}

impl<T: HashKey> HashSet<T> {
    pub fn from_values(values: impl IntoIterator<Item = T>) -> HashSet<T> {
        let mut set = HashSet::new();
        for value in values {
            set.add(value);
        }
        set
    }

    pub fn hash(value: &T) -> i64 {
        value.hash_key()
    }

    /// Returns false and keeps the stored value if the hash is already taken.
    pub fn add(&mut self, value: T) -> bool {
        let hash = Self::hash(&value);
        if self.data.contains_key(&hash) {
            trace!(hash, "hash already present, add ignored");
            return false;
        }
        self.data.insert(hash, value);
        self.size += 1;
        true
    }

    pub fn remove(&mut self, value: &T) -> bool {
        if self.data.remove(&Self::hash(value)).is_some() {
            self.size -= 1;
            true
        } else {
            false
        }
    }

    pub fn has(&self, value: &T) -> bool {
        self.data.contains_key(&Self::hash(value))
    }

    /// The stored value sharing `value`'s hash, which may be a different value.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.data.get(&Self::hash(value))
    }
}

impl<T: HashKey + Clone> HashSet<T> {
    /// Values of `self` whose hash is absent from `other`.
    pub fn difference(&self, other: &HashSet<T>) -> HashSet<T> {
        let result: HashSet<T> = self
            .iter()
            .filter(|value| !other.has(value))
            .cloned()
            .collect();
        trace!(left = self.size, right = other.size, result = result.size, "difference");
        result
    }

    /// On a shared hash the value from `self` is kept.
    pub fn union(&self, other: &HashSet<T>) -> HashSet<T> {
        let result: HashSet<T> = self.iter().chain(other.iter()).cloned().collect();
        trace!(left = self.size, right = other.size, result = result.size, "union");
        result
    }

    pub fn intersection(&self, other: &HashSet<T>) -> HashSet<T> {
        let result: HashSet<T> = self
            .iter()
            .filter(|value| other.has(value))
            .cloned()
            .collect();
        trace!(left = self.size, right = other.size, result = result.size, "intersection");
        result
    }
}

impl<T> HashKey for HashSet<T> {
    fn hash_key(&self) -> i64 {
        self.to_hash_key()
    }
}

impl<T> PartialEq for HashSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.data.keys().all(|key| other.data.contains_key(key))
    }
}

impl<T> Eq for HashSet<T> {}

impl<T: HashKey> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        HashSet::from_values(iter)
    }
}

impl<T: HashKey> Extend<T> for HashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: HashKey> From<Vec<T>> for HashSet<T> {
    fn from(values: Vec<T>) -> Self {
        HashSet::from_values(values)
    }
}

impl<T: HashKey, const N: usize> From<[T; N]> for HashSet<T> {
    fn from(values: [T; N]) -> Self {
        HashSet::from_values(values)
    }
}

impl<'a, T> IntoIterator for &'a HashSet<T> {
    type Item = &'a T;
    type IntoIter = std::vec::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Display> Display for HashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "}}")
    }
}

impl<T: Debug> Debug for HashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
