use super::AtlasError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("atlas operation failed: {source}")]
    AtlasError {
        #[from]
        source: AtlasError,
    },
    #[error("failure reading input: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
