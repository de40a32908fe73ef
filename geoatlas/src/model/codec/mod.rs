mod atlas_format;
pub mod codec_ops;
mod packed_atlas_serializable;

pub use atlas_format::AtlasFormat;
pub use packed_atlas_serializable::PackedAtlasSerializable;
