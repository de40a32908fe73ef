mod area_record;
mod edge_record;
mod entity_variant;
mod entity_id;
mod entity_kind;
mod entity_ref;
mod line_record;
mod node_record;
mod osm_id;
mod point_record;
mod relation_record;

pub use area_record::AreaRecord;
pub use edge_record::EdgeRecord;
pub use entity_variant::Entity;
pub use entity_id::EntityId;
pub use entity_kind::EntityKind;
pub use entity_ref::EntityRef;
pub use line_record::LineRecord;
pub use node_record::NodeRecord;
pub use osm_id::OsmId;
pub use point_record::PointRecord;
pub use relation_record::{RelationMember, RelationRecord};

use std::collections::HashMap;

/// key/value tags attached to every entity. ordering carries no meaning.
pub type Tags = HashMap<String, String>;
