// Pair - a named string value with typed views

use std::fmt;

use crate::coerce;

/// A value that can be stored in a [`Pair`].
///
/// Every typed setter funnels into one canonical string: integers in decimal,
/// floats with six fixed decimals, booleans as `"1"` / `"0"`.
pub trait PairValue {
    fn into_pair_string(self) -> String;
}

impl PairValue for &str {
    fn into_pair_string(self) -> String {
        self.to_string()
    }
}

impl PairValue for String {
    fn into_pair_string(self) -> String {
        self
    }
}

impl PairValue for &String {
    fn into_pair_string(self) -> String {
        self.clone()
    }
}

impl PairValue for i32 {
    fn into_pair_string(self) -> String {
        self.to_string()
    }
}

impl PairValue for u32 {
    fn into_pair_string(self) -> String {
        self.to_string()
    }
}

impl PairValue for f32 {
    fn into_pair_string(self) -> String {
        coerce::format_float(self)
    }
}

impl PairValue for bool {
    fn into_pair_string(self) -> String {
        let encoded = if self { "1" } else { "0" };
        encoded.to_string()
    }
}

/// A single named value inside a box.
///
/// The name is fixed at construction. The value is always stored as a string;
/// the `as_*` views coerce it on every call and never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    name: String,
    value: String,
}

impl Pair {
    /// Create a pair with an empty value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the value with the canonical string form of `value`.
    pub fn set<V: PairValue>(&mut self, value: V) -> &mut Self {
        self.value = value.into_pair_string();
        self
    }

    pub fn set_str(&mut self, value: &str) -> &mut Self {
        self.set(value)
    }

    pub fn set_i32(&mut self, value: i32) -> &mut Self {
        self.set(value)
    }

    pub fn set_u32(&mut self, value: u32) -> &mut Self {
        self.set(value)
    }

    pub fn set_f32(&mut self, value: f32) -> &mut Self {
        self.set(value)
    }

    pub fn set_bool(&mut self, value: bool) -> &mut Self {
        self.set(value)
    }

    /// The stored value, verbatim.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Leading decimal integer of the value, truncated to 32 bits. Zero if none.
    pub fn as_i32(&self) -> i32 {
        coerce::parse_long(&self.value) as i32
    }

    /// Same parse as [`Pair::as_i32`], reinterpreted as unsigned (`"-1"` is `u32::MAX`).
    pub fn as_u32(&self) -> u32 {
        coerce::parse_long(&self.value) as u32
    }

    pub fn as_f32(&self) -> f32 {
        coerce::parse_double(&self.value) as f32
    }

    /// True iff the value starts with `'1'`. An empty value is false.
    pub fn as_bool(&self) -> bool {
        self.value.as_bytes().first() == Some(&b'1')
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
