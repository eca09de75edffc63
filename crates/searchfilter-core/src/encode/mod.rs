//! Module: encode
//! Responsibility: field-name mangling and index-term bytes.
//! Does not own: attribute path resolution or analyzer lookup.
//! Boundary: the document indexer and the filter compiler both encode
//! through this module, so read and write paths agree byte-for-byte.

mod mangle;
mod numeric;
mod term;


pub use mangle::{
    ANALYZER_DELIMITER, BOOL_SUFFIX, FieldName, NULL_SUFFIX, NUMERIC_SUFFIX, STRING_SUFFIX,
    mangle_bool, mangle_null, mangle_numeric, mangle_string,
};
pub use numeric::{
    NUMERIC_MAGIC, PRECISION_STEP, decode_full_precision, full_precision_term, granular_terms,
    term_at_shift,
};
pub use term::{EncodedTerm, FALSE_TERM, TRUE_TERM, TermEncoder};
