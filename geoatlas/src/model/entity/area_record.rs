use super::{EntityId, OsmId, Tags};
use crate::model::geometry::{self, Polygon, Rectangle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    pub id: EntityId,
    pub osm_id: OsmId,
    pub polygon: Polygon,
    pub tags: Tags,
}

impl AreaRecord {
    pub fn new(id: i64, polygon: Polygon) -> AreaRecord {
        let id = EntityId(id);
        AreaRecord {
            id,
            osm_id: OsmId::from(id),
            polygon,
            tags: Tags::new(),
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> AreaRecord {
        self.tags.insert(String::from(key), String::from(value));
        self
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        geometry::polygon_bounds(&self.polygon)
    }
}
