use crate::ConfigError;
use searchfilter_core::analyzer::{Analyzer, DelimiterAnalyzer, IdentityAnalyzer, NormAnalyzer};
use serde::Deserialize;
use std::sync::Arc;

///
/// AnalyzerKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalyzerKind {
    Identity,
    Delimiter { delimiter: String },
    Norm,
}

///
/// AnalyzerConfig
///
/// One `[[analyzers]]` table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct AnalyzerConfig {
    pub name: String,
    #[serde(flatten)]
    pub kind: AnalyzerKind,
}

impl AnalyzerConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "analyzer name must not be empty".to_string(),
            });
        }
        if let AnalyzerKind::Delimiter { delimiter } = &self.kind
            && delimiter.is_empty()
        {
            return Err(ConfigError::Invalid {
                reason: format!("analyzer '{}' has an empty delimiter", self.name),
            });
        }

        Ok(())
    }

    // An identity-kind entry under another name still mangles by that name.
    pub(crate) fn build(&self) -> Arc<dyn Analyzer> {
        match &self.kind {
            AnalyzerKind::Identity => Arc::new(NamedIdentity(self.name.clone())),
            AnalyzerKind::Delimiter { delimiter } => {
                Arc::new(DelimiterAnalyzer::new(&self.name, delimiter))
            }
            AnalyzerKind::Norm => Arc::new(NormAnalyzer::new(&self.name)),
        }
    }
}

#[derive(Debug)]
struct NamedIdentity(String);

impl Analyzer for NamedIdentity {
    fn name(&self) -> &str {
        &self.0
    }

    fn tokens(&self, input: &str) -> Vec<String> {
        IdentityAnalyzer.tokens(input)
    }
}
