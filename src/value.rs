use std::fmt::{self, Display};

use crate::{hash_key::hash_string, HashKey, HashSet};

/// An element read from a set literal: an integer, a string or a nested set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Set(HashSet<Value>),
}

impl HashKey for Value {
    fn hash_key(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Str(s) => hash_string(s),
            Value::Set(set) => set.to_hash_key(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Set(set) => write!(f, "{}", set),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<HashSet<Value>> for Value {
    fn from(set: HashSet<Value>) -> Self {
        Value::Set(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_plain_types() {
        assert_eq!(Value::Int(7).hash_key(), 7);
        assert_eq!(Value::from("a").hash_key(), "a".hash_key());
        let inner = HashSet::from([Value::Int(0), Value::Int(1)]);
        assert_eq!(Value::Set(inner).hash_key(), HashSet::from([0, 1]).to_hash_key());
    }

    #[test]
    fn mixed_set() {
        let set = HashSet::from([
            Value::from("a"),
            Value::Int(3),
            Value::Set(HashSet::from([Value::Int(1)])),
        ]);
        // "1" hashes to 177622
        assert_eq!(set.keys(), vec![3, 177622, 177670]);
        assert_eq!(set.to_string(), "{3, {1}, a}");
    }

    #[test]
    fn string_and_integer_can_share_a_key() {
        let mut set = HashSet::new();
        assert!(set.add(Value::Int(177670)));
        assert!(!set.add(Value::from("a")));
        assert_eq!(set.len(), 1);
    }
}
