use crate::analyzer::Analyzer;
use derive_more::Deref;
use std::fmt;

/// Separates an attribute path from a type suffix.
const TYPE_DELIMITER: char = '\0';

/// Separates an attribute path from an analyzer name.
pub const ANALYZER_DELIMITER: char = '\x01';

pub const NULL_SUFFIX: &str = "\0_n";
pub const BOOL_SUFFIX: &str = "\0_b";
pub const NUMERIC_SUFFIX: &str = "\0_d";
pub const STRING_SUFFIX: &str = "\0_s";

///
/// FieldName
///
/// Mangled index field: attribute path plus a type or analyzer suffix.
///

#[derive(Clone, Debug, Deref, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FieldName(String);

impl FieldName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Attribute path without its suffix.
    #[must_use]
    pub fn path(&self) -> &str {
        self.0
            .find([TYPE_DELIMITER, ANALYZER_DELIMITER])
            .map_or(self.0.as_str(), |end| &self.0[..end])
    }

    fn suffixed(path: &str, suffix: &str) -> Self {
        let mut name = String::with_capacity(path.len() + suffix.len());
        name.push_str(path);
        name.push_str(suffix);
        Self(name)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                TYPE_DELIMITER => f.write_str("\\0")?,
                ANALYZER_DELIMITER => f.write_str("\\x01")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

#[must_use]
pub fn mangle_null(path: &str) -> FieldName {
    FieldName::suffixed(path, NULL_SUFFIX)
}

#[must_use]
pub fn mangle_bool(path: &str) -> FieldName {
    FieldName::suffixed(path, BOOL_SUFFIX)
}

#[must_use]
pub fn mangle_numeric(path: &str) -> FieldName {
    FieldName::suffixed(path, NUMERIC_SUFFIX)
}

/// String fields are keyed by analyzer; the identity analyzer keeps the
/// plain string suffix.
#[must_use]
pub fn mangle_string(path: &str, analyzer: &dyn Analyzer) -> FieldName {
    if !analyzer.requires_mangling() {
        return FieldName::suffixed(path, STRING_SUFFIX);
    }

    let name = analyzer.name();
    let mut field = String::with_capacity(path.len() + 1 + name.len());
    field.push_str(path);
    field.push(ANALYZER_DELIMITER);
    field.push_str(name);
    FieldName(field)
}
