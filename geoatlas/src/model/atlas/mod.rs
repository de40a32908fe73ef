mod atlas_trait;
mod atlas_metadata;
mod atlas_size;
pub mod equality_ops;
mod packed_atlas;
mod packed_atlas_builder;
pub mod relation_ops;
pub mod spatial_query_ops;

pub use atlas_trait::{Atlas, Records};
pub use atlas_metadata::AtlasMetadata;
pub use atlas_size::AtlasSize;
pub use packed_atlas::PackedAtlas;
pub use packed_atlas_builder::PackedAtlasBuilder;
