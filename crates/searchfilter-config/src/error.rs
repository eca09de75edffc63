use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("analyzer '{name}' is defined more than once")]
    DuplicateAnalyzer { name: String },

    #[error("analyzer '{name}' is referenced but not defined")]
    UndefinedAnalyzer { name: String },

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}
