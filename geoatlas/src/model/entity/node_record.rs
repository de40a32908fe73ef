use super::{EntityId, OsmId, Tags};
use crate::model::geometry::{self, Location, Rectangle};
use serde::{Deserialize, Serialize};

/// a navigable graph vertex. the in/out edge lists are derived from the edges of
/// the atlas that owns this node and are recomputed whenever an atlas is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: EntityId,
    pub osm_id: OsmId,
    pub location: Location,
    pub tags: Tags,
    #[serde(skip)]
    pub in_edges: Vec<EntityId>,
    #[serde(skip)]
    pub out_edges: Vec<EntityId>,
}

impl NodeRecord {
    pub fn new(id: i64, location: Location) -> NodeRecord {
        let id = EntityId(id);
        NodeRecord {
            id,
            osm_id: OsmId::from(id),
            location,
            tags: Tags::new(),
            in_edges: vec![],
            out_edges: vec![],
        }
    }

    pub fn with_osm_id(mut self, osm_id: OsmId) -> NodeRecord {
        self.osm_id = osm_id;
        self
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> NodeRecord {
        self.tags.insert(String::from(key), String::from(value));
        self
    }

    pub fn bounds(&self) -> Rectangle {
        geometry::location_bounds(&self.location)
    }
}
