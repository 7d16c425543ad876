//! A set container keyed by the integer hash of its values.
//!
//! Values are deduplicated by their [`HashKey`], so two values with the same
//! hash are the same element. A [`HashSet`] is itself a [`HashKey`] and can be
//! stored inside another set.

mod command;
mod hash_key;
mod hash_set;
mod parse;
mod value;

pub use command::{run, Command, Operation};
pub use hash_key::{hash_string, Displayed, HashKey};
pub use hash_set::HashSet;
pub use parse::parse_set;
pub use value::Value;
