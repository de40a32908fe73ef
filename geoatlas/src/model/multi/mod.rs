mod multi_atlas;

pub use multi_atlas::MultiAtlas;
