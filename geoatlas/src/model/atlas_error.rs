use super::entity::{EntityId, EntityKind, EntityRef};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("{referrer} references {missing} which is not present in atlas '{atlas}'")]
    IntegrityViolation {
        atlas: String,
        referrer: EntityRef,
        missing: EntityRef,
    },
    #[error("geometry of edge '{0}' does not match its endpoints: {1}")]
    InvalidEdgeGeometry(EntityId, String),
    #[error("{0} '{1}' was added to the atlas more than once")]
    DuplicateEntity(EntityKind, EntityId),
    #[error("edge '{0}' has no reverse identifier")]
    IrreversibleEdge(EntityId),
    #[error("{0} '{1}' has empty geometry")]
    EmptyGeometry(EntityKind, EntityId),
    #[error("atlas '{0}' is a view and cannot be saved directly, materialize it with PackedAtlas::from_atlas first")]
    UnsupportedSave(String),
    #[error("unsupported atlas file type: {0}")]
    UnsupportedFormat(String),
    #[error("failure reading or writing atlas file {0}: {1}")]
    IoError(String, std::io::Error),
    #[error("failure decoding atlas file {0}: {1}")]
    DecodeError(String, serde_json::Error),
    #[error("failure encoding atlas to {0}: {1}")]
    EncodeError(String, serde_json::Error),
    #[error("{0}")]
    InternalError(String),
}
