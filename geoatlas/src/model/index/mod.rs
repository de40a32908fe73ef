mod spatial_index;
mod spatial_indices;

pub use spatial_index::{IndexEntry, SpatialIndex};
pub use spatial_indices::SpatialIndices;
