//! Module: index
//! Responsibility: flatten documents into mangled fields and terms.
//! Does not own: storage, posting lists, or scoring.
//! Boundary: the write-path counterpart of `compile`; both sides mangle
//! through `encode`, so a filter field always names an indexed field.


use crate::{
    analyzer::{Analyzer, AnalyzerProvider, IdentityAnalyzer},
    encode::{FieldName, TermEncoder, granular_terms, mangle_numeric, mangle_string},
    error::CompileError,
    options::IndexOptions,
    value::Value,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

///
/// IndexedDocument
///
/// One document's source value and its inverted-index terms per field.
///

#[derive(Clone, Debug, PartialEq)]
pub struct IndexedDocument {
    source: Value,
    fields: BTreeMap<FieldName, BTreeSet<Vec<u8>>>,
}

impl IndexedDocument {
    #[must_use]
    pub const fn source(&self) -> &Value {
        &self.source
    }

    #[must_use]
    pub fn has_term(&self, field: &FieldName, term: &[u8]) -> bool {
        self.fields.get(field).is_some_and(|terms| terms.contains(term))
    }

    pub fn terms(&self, field: &FieldName) -> impl Iterator<Item = &[u8]> {
        self.fields
            .get(field)
            .into_iter()
            .flat_map(|terms| terms.iter().map(Vec::as_slice))
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldName> {
        self.fields.keys()
    }

    fn insert(&mut self, field: FieldName, term: Vec<u8>) {
        self.fields.entry(field).or_default().insert(term);
    }
}

///
/// DocumentIndexer
///

#[derive(Clone, Debug)]
pub struct DocumentIndexer {
    analyzers: Vec<Arc<dyn Analyzer>>,
    track_list_positions: bool,
}

impl DocumentIndexer {
    pub fn new(
        options: &IndexOptions,
        provider: &dyn AnalyzerProvider,
    ) -> Result<Self, CompileError> {
        let analyzers = options
            .analyzers
            .iter()
            .map(|name| provider.get(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            analyzers,
            track_list_positions: options.track_list_positions,
        })
    }

    /// Only objects have attributes; any other root indexes nothing.
    #[must_use]
    pub fn index(&self, document: &Value) -> IndexedDocument {
        let mut indexed = IndexedDocument {
            source: document.clone(),
            fields: BTreeMap::new(),
        };

        if let Value::Object(entries) = document {
            for (name, value) in entries {
                self.walk(&mut indexed, name.clone(), value);
            }
        }

        indexed
    }

    fn walk(&self, out: &mut IndexedDocument, path: String, value: &Value) {
        match value {
            Value::Object(entries) => {
                for (name, child) in entries {
                    let mut child_path = path.clone();
                    child_path.push('.');
                    child_path.push_str(name);
                    self.walk(out, child_path, child);
                }
            }
            Value::Range(range) if !range.is_expandable() => {
                tracing::warn!(path = %path, %range, "range too large to index, skipped");
            }
            Value::Array(_) | Value::Range(_) => {
                for offset in 0..value.sequence_len() {
                    let Some(item) = value.sequence_get(offset) else {
                        break;
                    };
                    let item_path = if self.track_list_positions {
                        format!("{path}[{offset}]")
                    } else {
                        path.clone()
                    };
                    self.walk(out, item_path, &item);
                }
            }
            Value::String(s) => {
                for analyzer in &self.analyzers {
                    let field = mangle_string(&path, analyzer.as_ref());
                    for token in analyzer.tokens(s) {
                        out.insert(field.clone(), token.into_bytes());
                    }
                }
            }
            Value::Number(n) => {
                let field = mangle_numeric(&path);
                for term in granular_terms(*n) {
                    out.insert(field.clone(), term);
                }
            }
            Value::Null | Value::Bool(_) => {
                if let Some(encoded) = TermEncoder::new(&IdentityAnalyzer).encode(&path, value) {
                    out.insert(encoded.field, encoded.term);
                }
            }
        }
    }
}
