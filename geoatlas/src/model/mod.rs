pub mod atlas;
mod atlas_cli_error;
mod atlas_error;
pub mod codec;
pub mod entity;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod index;
pub mod multi;

pub use atlas_cli_error::AtlasCliError;
pub use atlas_error::AtlasError;
