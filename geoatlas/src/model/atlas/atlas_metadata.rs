use super::AtlasSize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// descriptive data carried alongside the entities of an atlas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasMetadata {
    pub size: AtlasSize,
    /// false for atlases derived from another atlas (extraction, composition)
    pub original: bool,
    pub code_version: String,
    pub data_version: String,
    pub country: Option<String>,
    pub shard_name: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl AtlasMetadata {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(country: Option<&str>, shard_name: Option<&str>) -> AtlasMetadata {
        AtlasMetadata {
            country: country.map(String::from),
            shard_name: shard_name.map(String::from),
            ..Default::default()
        }
    }

    /// copy of this metadata describing an atlas derived from this one
    pub fn derived(&self) -> AtlasMetadata {
        AtlasMetadata {
            original: false,
            ..self.clone()
        }
    }

    pub fn with_size(mut self, size: AtlasSize) -> AtlasMetadata {
        self.size = size;
        self
    }
}

impl Default for AtlasMetadata {
    fn default() -> Self {
        Self {
            size: AtlasSize::default(),
            original: true,
            code_version: String::from(env!("CARGO_PKG_VERSION")),
            data_version: String::from(Self::UNKNOWN),
            country: None,
            shard_name: None,
            tags: HashMap::new(),
        }
    }
}
