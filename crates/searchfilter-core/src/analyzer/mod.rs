//! Module: analyzer
//! Responsibility: text analyzers and the registry that resolves them by name.
//! Does not own: field mangling (see `encode`).
//! Boundary: the compiler only asks for an analyzer by name and for its
//! mangling rule; tokenization is used on the write path.

#[cfg(test)]
mod tests;

use crate::error::CompileError;
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// Name of the built-in pass-through analyzer.
pub const IDENTITY: &str = "identity";

///
/// Analyzer
///
/// Splits string values into index tokens.
///

pub trait Analyzer: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Whether string fields carry this analyzer's name in their mangled form.
    fn requires_mangling(&self) -> bool {
        true
    }

    fn tokens(&self, input: &str) -> Vec<String>;
}

///
/// IdentityAnalyzer
///
/// Emits the whole input as a single token.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityAnalyzer;

impl Analyzer for IdentityAnalyzer {
    fn name(&self) -> &str {
        IDENTITY
    }

    fn requires_mangling(&self) -> bool {
        false
    }

    fn tokens(&self, input: &str) -> Vec<String> {
        vec![input.to_string()]
    }
}

///
/// DelimiterAnalyzer
///
/// Splits on a fixed delimiter, dropping empty pieces.
///

#[derive(Clone, Debug)]
pub struct DelimiterAnalyzer {
    name: String,
    delimiter: String,
}

impl DelimiterAnalyzer {
    #[must_use]
    pub fn new(name: impl Into<String>, delimiter: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delimiter: delimiter.into(),
        }
    }
}

impl Analyzer for DelimiterAnalyzer {
    fn name(&self) -> &str {
        &self.name
    }

    fn tokens(&self, input: &str) -> Vec<String> {
        if self.delimiter.is_empty() {
            return vec![input.to_string()];
        }

        input
            .split(self.delimiter.as_str())
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect()
    }
}

///
/// NormAnalyzer
///
/// Case-folds the whole input into one token.
///

#[derive(Clone, Debug)]
pub struct NormAnalyzer {
    name: String,
}

impl NormAnalyzer {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Analyzer for NormAnalyzer {
    fn name(&self) -> &str {
        &self.name
    }

    fn tokens(&self, input: &str) -> Vec<String> {
        vec![input.to_lowercase()]
    }
}

///
/// AnalyzerProvider
///
/// Name-based analyzer lookup used during compilation.
///

pub trait AnalyzerProvider: Send + Sync {
    fn get(&self, name: &str) -> Result<Arc<dyn Analyzer>, CompileError>;
}

///
/// AnalyzerCache
///
/// Thread-safe in-process analyzer registry; `identity` is always present.
///

#[derive(Debug)]
pub struct AnalyzerCache {
    analyzers: RwLock<HashMap<String, Arc<dyn Analyzer>>>,
}

impl AnalyzerCache {
    #[must_use]
    pub fn new() -> Self {
        let identity: Arc<dyn Analyzer> = Arc::new(IdentityAnalyzer);
        let analyzers = HashMap::from([(IDENTITY.to_string(), identity)]);

        Self {
            analyzers: RwLock::new(analyzers),
        }
    }

    /// Register or replace an analyzer under its own name.
    pub fn register(&self, analyzer: Arc<dyn Analyzer>) {
        let name = analyzer.name().to_string();
        tracing::debug!(analyzer = %name, "registering analyzer");
        self.analyzers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, analyzer);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.analyzers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

impl Default for AnalyzerCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerProvider for AnalyzerCache {
    fn get(&self, name: &str) -> Result<Arc<dyn Analyzer>, CompileError> {
        self.analyzers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| CompileError::AnalyzerNotFound {
                name: name.to_string(),
            })
    }
}
