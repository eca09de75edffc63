//! TOML configuration for searchfilter: compile defaults, write-path
//! options, and analyzer definitions.

mod analyzer;
mod error;


pub use analyzer::{AnalyzerConfig, AnalyzerKind};
pub use error::ConfigError;

use searchfilter_core::{
    analyzer::{AnalyzerCache, IDENTITY},
    ast::Variable,
    compile::QueryContext,
    index::DocumentIndexer,
    options::{CompileOptions, IndexOptions},
};
use serde::Deserialize;
use std::{collections::BTreeSet, path::Path, sync::Arc};

///
/// Config
///
/// Root of a configuration file:
///
/// ```toml
/// [compile]
/// default_analyzer = "identity"
///
/// [index]
/// analyzers = ["identity", "csv"]
///
/// [[analyzers]]
/// name = "csv"
/// kind = "delimiter"
/// delimiter = ","
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub compile: CompileOptions,
    pub index: IndexOptions,
    pub analyzers: Vec<AnalyzerConfig>,
}

impl Config {
    /// Parse and validate configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            origin: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            analyzers = config.analyzers.len(),
            "loaded config"
        );

        Ok(config)
    }

    /// Reject settings that would only fail later, at compile or index time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut known = BTreeSet::from([IDENTITY]);
        for analyzer in &self.analyzers {
            analyzer.validate()?;
            if !known.insert(analyzer.name.as_str()) {
                return Err(ConfigError::DuplicateAnalyzer {
                    name: analyzer.name.clone(),
                });
            }
        }

        let referenced = std::iter::once(&self.compile.default_analyzer)
            .chain(&self.index.analyzers);
        for name in referenced {
            if !known.contains(name.as_str()) {
                return Err(ConfigError::UndefinedAnalyzer { name: name.clone() });
            }
        }

        let boost = self.compile.default_boost;
        if !boost.is_finite() || boost < 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "compile.default_boost must be a finite non-negative number, got {boost}"
                ),
            });
        }

        Ok(())
    }

    /// Analyzer registry holding `identity` plus every configured analyzer.
    #[must_use]
    pub fn analyzer_cache(&self) -> AnalyzerCache {
        let cache = AnalyzerCache::new();
        for analyzer in &self.analyzers {
            cache.register(analyzer.build());
        }
        cache
    }

    /// Query context filtering `variable` under this configuration.
    #[must_use]
    pub fn query_context(&self, variable: Variable) -> QueryContext {
        QueryContext::new(variable)
            .with_analyzers(Arc::new(self.analyzer_cache()))
            .with_options(self.compile.clone())
    }

    /// Document indexer matching this configuration's write path.
    pub fn indexer(&self) -> Result<DocumentIndexer, ConfigError> {
        DocumentIndexer::new(&self.index, &self.analyzer_cache()).map_err(|err| {
            ConfigError::Invalid {
                reason: err.to_string(),
            }
        })
    }
}
