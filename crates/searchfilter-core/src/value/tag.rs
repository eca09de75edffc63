use crate::value::Value;
use std::fmt;

///
/// ValueTag
///
/// Stable value-variant tag used by diagnostics and type ordering.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Null = 1,
    Bool = 2,
    Number = 3,
    String = 4,
    Array = 5,
    Object = 6,
    Range = 7,
}

impl ValueTag {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Range => "range",
        }
    }

    /// Rank in the cross-type comparison order.
    /// Ranges compare as the arrays they expand to.
    #[must_use]
    pub const fn type_rank(self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool => 1,
            Self::Number => 2,
            Self::String => 3,
            Self::Array | Self::Range => 4,
            Self::Object => 5,
        }
    }

    /// Scalars are the only values an index term can be built from.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Null | Self::Bool | Self::Number | Self::String)
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable canonical variant tag for one runtime value.
#[must_use]
pub const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Null => ValueTag::Null,
        Value::Bool(_) => ValueTag::Bool,
        Value::Number(_) => ValueTag::Number,
        Value::String(_) => ValueTag::String,
        Value::Array(_) => ValueTag::Array,
        Value::Object(_) => ValueTag::Object,
        Value::Range(_) => ValueTag::Range,
    }
}
