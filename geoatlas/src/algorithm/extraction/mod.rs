mod cut_type;
mod entity_selector;
mod entity_set;
pub mod sub_atlas_ops;

pub use cut_type::CutType;
pub use entity_selector::EntitySelector;
pub use entity_set::EntitySet;
