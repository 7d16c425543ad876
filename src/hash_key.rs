use std::{borrow::Cow, fmt::Display, rc::Rc, sync::Arc};

const DJB2_SEED: i64 = 5381;

/// A value that knows its own integer hash key.
///
/// Integers use themselves, strings go through [`hash_string`]. Implement this
/// for your own types to control how they are keyed inside a
/// [`HashSet`](crate::HashSet).
pub trait HashKey {
    fn hash_key(&self) -> i64;
}

///
/// djb2 over the UTF-16 code units of `value`.
///
/// Only the shift is truncated to 32 bits on every step, the additions are not,
/// so long strings can leave the i32 range.
///
/// ```
/// assert_eq!(hashkey_set::hash_string("0"), 177621);
/// ```
pub fn hash_string(value: &str) -> i64 {
    value.encode_utf16().fold(DJB2_SEED, |hash, c| {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        shifted.wrapping_add(hash).wrapping_add(c as i64)
    })
}

macro_rules! integer_hash_key {
    ($($t:ty),*) => {
        $(
            impl HashKey for $t {
                fn hash_key(&self) -> i64 {
                    *self as i64
                }
            }
        )*
    };
}

integer_hash_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_hash_key {
    ($($t:ty),*) => {
        $(
            impl HashKey for $t {
                fn hash_key(&self) -> i64 {
                    let value = *self as f64;
                    // integral values are plain numbers
                    if value.is_finite()
                        && value.fract() == 0.0
                        && value >= i64::MIN as f64
                        && value < i64::MAX as f64
                    {
                        value as i64
                    } else if value == f64::INFINITY {
                        hash_string("Infinity")
                    } else if value == f64::NEG_INFINITY {
                        hash_string("-Infinity")
                    } else {
                        hash_string(&self.to_string())
                    }
                }
            }
        )*
    };
}

float_hash_key!(f32, f64);

impl HashKey for str {
    fn hash_key(&self) -> i64 {
        hash_string(self)
    }
}

impl HashKey for String {
    fn hash_key(&self) -> i64 {
        hash_string(self)
    }
}

impl HashKey for Cow<'_, str> {
    fn hash_key(&self) -> i64 {
        hash_string(self)
    }
}

impl HashKey for char {
    fn hash_key(&self) -> i64 {
        let mut buf = [0; 4];
        hash_string(self.encode_utf8(&mut buf))
    }
}

impl HashKey for bool {
    fn hash_key(&self) -> i64 {
        hash_string(if *self { "true" } else { "false" })
    }
}

impl<T: HashKey + ?Sized> HashKey for &T {
    fn hash_key(&self) -> i64 {
        (**self).hash_key()
    }
}

impl<T: HashKey + ?Sized> HashKey for Box<T> {
    fn hash_key(&self) -> i64 {
        (**self).hash_key()
    }
}

impl<T: HashKey + ?Sized> HashKey for Rc<T> {
    fn hash_key(&self) -> i64 {
        (**self).hash_key()
    }
}

impl<T: HashKey + ?Sized> HashKey for Arc<T> {
    fn hash_key(&self) -> i64 {
        (**self).hash_key()
    }
}

/// Keys any [`Display`] type by the djb2 hash of its rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Displayed<T>(pub T);

impl<T: Display> HashKey for Displayed<T> {
    fn hash_key(&self) -> i64 {
        hash_string(&self.0.to_string())
    }
}

impl<T: Display> Display for Displayed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn djb2_reference_values() {
        assert_eq!(hash_string(""), 5381);
        assert_eq!(hash_string("0"), 177621);
        assert_eq!(hash_string("a"), 177670);
        assert_eq!(hash_string("hello"), 261238937);
        assert_eq!(hash_string("hello world"), 894552257);
        assert_eq!(hash_string("123"), 193432059);
        assert_eq!(hash_string("-1"), 5861443);
    }

    #[test]
    fn djb2_leaves_i32_range() {
        // the shift wraps, the running sum does not
        assert_eq!(hash_string("abcdefghij"), 3079683036);
        assert_eq!(hash_string("1234567890"), -276485134);
        assert_eq!(hash_string("The quick brown fox"), -1748763400);
    }

    #[test]
    fn djb2_uses_utf16_code_units() {
        assert_eq!(hash_string("é"), 177806);
        // surrogate pair, two code units
        assert_eq!(hash_string("😀"), 7743522);
    }

    #[test]
    fn integers_are_their_own_key() {
        assert_eq!(0u8.hash_key(), 0);
        assert_eq!((-42i32).hash_key(), -42);
        assert_eq!(7usize.hash_key(), 7);
        assert_eq!(i64::MAX.hash_key(), i64::MAX);
    }

    #[test]
    fn strings_hash_through_djb2() {
        assert_eq!("0".hash_key(), 177621);
        assert_eq!(String::from("0").hash_key(), 177621);
        assert_eq!('0'.hash_key(), 177621);
        assert_eq!(Cow::Borrowed("0").hash_key(), 177621);
        assert_eq!(true.hash_key(), 2090770405);
        assert_eq!(Displayed(1.5).hash_key(), 193431929);
    }

    #[test]
    fn floats() {
        assert_eq!(2.0f64.hash_key(), 2);
        assert_eq!((-3.0f32).hash_key(), -3);
        assert_eq!(1.5f64.hash_key(), hash_string("1.5"));
        assert_eq!(f64::NAN.hash_key(), hash_string("NaN"));
    }

    #[test]
    fn infinite_floats_use_js_spelling() {
        assert_eq!(f64::INFINITY.hash_key(), hash_string("Infinity"));
        assert_eq!(f64::NEG_INFINITY.hash_key(), hash_string("-Infinity"));
        assert_eq!(f32::INFINITY.hash_key(), hash_string("Infinity"));
        assert_ne!(f64::INFINITY.hash_key(), hash_string("inf"));
    }

    #[test]
    fn smart_pointers_forward() {
        assert_eq!(Box::new(5).hash_key(), 5);
        assert_eq!(Rc::new("a").hash_key(), 177670);
        assert_eq!(Arc::new(String::from("a")).hash_key(), 177670);
        assert_eq!((&&9).hash_key(), 9);
    }
}
