//! Core of searchfilter: compiles `attr IN list` and `attr IN lo..hi`
//! predicates into inverted-index filter trees, with per-document
//! expression fallback where the index cannot answer on its own.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod analyzer;
pub mod ast;
pub mod compile;
pub mod encode;
pub mod error;
pub mod expr;
pub mod filter;
pub mod index;
pub mod options;
pub mod value;

pub use compile::{compile, is_supported, probe};

///
/// Prelude
///
/// Vocabulary needed to build a predicate, compile it, and run it.
///

pub mod prelude {
    pub use crate::{
        analyzer::{AnalyzerCache, AnalyzerProvider},
        ast::{AstNode, Variable},
        compile::{QueryContext, compile, is_supported, probe},
        error::CompileError,
        expr::{Bindings, ScanContext},
        filter::{Boost, FilterNode},
        index::DocumentIndexer,
        value::Value,
    };
}
