mod sub_atlas;

pub use sub_atlas::SubAtlasConfiguration;
