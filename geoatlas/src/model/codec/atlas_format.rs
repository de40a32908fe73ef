use crate::model::AtlasError;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, path::Path};

/// file formats an atlas can be written to and read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtlasFormat {
    /// human-readable, pretty-printed JSON
    Json,
    /// gzip-compressed JSON
    JsonGz,
}

impl AtlasFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AtlasFormat::Json => ".json",
            AtlasFormat::JsonGz => ".json.gz",
        }
    }
}

impl TryFrom<&Path> for AtlasFormat {
    type Error = AtlasError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let filename = path.to_string_lossy();
        if filename.ends_with(AtlasFormat::JsonGz.extension()) {
            Ok(AtlasFormat::JsonGz)
        } else if filename.ends_with(AtlasFormat::Json.extension()) {
            Ok(AtlasFormat::Json)
        } else {
            Err(AtlasError::UnsupportedFormat(filename.to_string()))
        }
    }
}

impl Display for AtlasFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtlasFormat::Json => write!(f, "json"),
            AtlasFormat::JsonGz => write!(f, "json.gz"),
        }
    }
}
