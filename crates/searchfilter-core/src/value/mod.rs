mod coercion;
mod compare;
mod tag;

#[cfg(test)]
mod tests;

pub use coercion::{to_bool, to_int64, to_number};
pub use compare::{compare, contains, equals};
pub use tag::{ValueTag, canonical_tag};

use derive_more::From;
use std::{cmp::Ordering, fmt};

///
/// Value
///
/// Runtime value of the query language.
/// Objects keep their attributes in insertion order.
///

#[derive(Clone, Debug, From, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Self>),
    Object(Vec<(String, Self)>),
    Range(Range),
}

impl Value {
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        canonical_tag(self)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.tag().is_scalar()
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Object attribute lookup. Non-objects have no attributes.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Object(entries) => entries.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Positional lookup; negative offsets count from the end.
    #[must_use]
    pub fn at(&self, offset: i64) -> Option<Self> {
        let len = i64::try_from(self.sequence_len()).ok()?;
        let index = if offset < 0 { len + offset } else { offset };
        usize::try_from(index).ok().and_then(|i| self.sequence_get(i))
    }

    pub(crate) fn sequence_len(&self) -> usize {
        match self {
            Self::Array(items) => items.len(),
            Self::Range(range) => usize::try_from(range.len()).unwrap_or(usize::MAX),
            _ => 0,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn sequence_get(&self, index: usize) -> Option<Self> {
        match self {
            Self::Array(items) => items.get(index).cloned(),
            Self::Range(range) => {
                let offset = u64::try_from(index).ok()?;
                (offset < range.len()).then(|| Self::Number(range.nth(offset) as f64))
            }
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl fmt::Display for Value {
    #[expect(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Range(range) => write!(f, "{range}"),
        }
    }
}

///
/// Range
///
/// Inclusive integer range produced by `lo..hi`.
/// `low` may exceed `high`; the range then counts downwards.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Range {
    pub low: i64,
    pub high: i64,
}

impl Range {
    /// Most members a range may be expanded into.
    pub const EXPANSION_LIMIT: u64 = 1 << 20;

    #[must_use]
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    /// Whether the members fit under [`Self::EXPANSION_LIMIT`].
    #[must_use]
    pub const fn is_expandable(&self) -> bool {
        self.len() <= Self::EXPANSION_LIMIT
    }

    /// Member-wise order of the expansions, without expanding.
    ///
    /// Members step by one, so two ranges agreeing on their first two
    /// members agree up to the shorter length.
    #[must_use]
    pub fn cmp_members(&self, other: &Self) -> Ordering {
        self.low
            .cmp(&other.low)
            .then_with(|| {
                if self.len() > 1 && other.len() > 1 {
                    self.nth(1).cmp(&other.nth(1))
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| self.len().cmp(&other.len()))
    }

    #[must_use]
    pub const fn min(&self) -> i64 {
        if self.low <= self.high { self.low } else { self.high }
    }

    #[must_use]
    pub const fn max(&self) -> i64 {
        if self.low <= self.high { self.high } else { self.low }
    }

    /// Number of members; never zero.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.low.abs_diff(self.high).saturating_add(1)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The only member when `low == high`.
    #[must_use]
    pub const fn single(&self) -> Option<i64> {
        if self.low == self.high { Some(self.low) } else { None }
    }

    const fn nth(&self, offset: u64) -> i64 {
        if self.low <= self.high {
            self.low.wrapping_add_unsigned(offset)
        } else {
            self.low.wrapping_sub_unsigned(offset)
        }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn contains_number(&self, n: f64) -> bool {
        n.fract() == 0.0 && n >= self.min() as f64 && n <= self.max() as f64
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.low, self.high)
    }
}
