use crate::analyzer::IDENTITY;
use serde::{Deserialize, Serialize};

///
/// CompileOptions
///
/// Defaults applied to the root compile context.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    pub default_analyzer: String,
    pub default_boost: f32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            default_analyzer: IDENTITY.to_string(),
            default_boost: 1.0,
        }
    }
}

///
/// IndexOptions
///
/// Write-path settings. Filters only match documents indexed with settings
/// that produce the fields they reference.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexOptions {
    /// Index array members under `name[i]` instead of `name`.
    pub track_list_positions: bool,

    /// Analyzers applied to every string value.
    pub analyzers: Vec<String>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            track_list_positions: false,
            analyzers: vec![IDENTITY.to_string()],
        }
    }
}
