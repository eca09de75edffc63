use crate::{
    analyzer::Analyzer,
    encode::{
        FieldName, full_precision_term, mangle_bool, mangle_null, mangle_numeric, mangle_string,
    },
    value::Value,
};

pub const TRUE_TERM: [u8; 1] = [0xFF];
pub const FALSE_TERM: [u8; 1] = [0x00];

///
/// EncodedTerm
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodedTerm {
    pub field: FieldName,
    pub term: Vec<u8>,
}

///
/// TermEncoder
///
/// Maps a scalar value at an attribute path to its exact-match index term.
/// The analyzer only affects string fields.
///

#[derive(Clone, Copy, Debug)]
pub struct TermEncoder<'a> {
    analyzer: &'a dyn Analyzer,
}

impl<'a> TermEncoder<'a> {
    #[must_use]
    pub const fn new(analyzer: &'a dyn Analyzer) -> Self {
        Self { analyzer }
    }

    /// `None` for arrays, objects and ranges.
    #[must_use]
    pub fn encode(&self, path: &str, value: &Value) -> Option<EncodedTerm> {
        let (field, term) = match value {
            Value::Null => (mangle_null(path), Vec::new()),
            Value::Bool(b) => (mangle_bool(path), Self::bool_term(*b).to_vec()),
            Value::Number(n) => (mangle_numeric(path), full_precision_term(*n)),
            Value::String(s) => (mangle_string(path, self.analyzer), s.as_bytes().to_vec()),
            Value::Array(_) | Value::Object(_) | Value::Range(_) => return None,
        };

        Some(EncodedTerm { field, term })
    }

    #[must_use]
    pub const fn bool_term(value: bool) -> [u8; 1] {
        if value { TRUE_TERM } else { FALSE_TERM }
    }
}
