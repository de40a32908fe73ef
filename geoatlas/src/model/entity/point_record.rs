use super::{EntityId, OsmId, Tags};
use crate::model::geometry::{self, Location, Rectangle};
use serde::{Deserialize, Serialize};

/// a bare location with tags and no connectivity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub id: EntityId,
    pub osm_id: OsmId,
    pub location: Location,
    pub tags: Tags,
}

impl PointRecord {
    pub fn new(id: i64, location: Location) -> PointRecord {
        let id = EntityId(id);
        PointRecord {
            id,
            osm_id: OsmId::from(id),
            location,
            tags: Tags::new(),
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> PointRecord {
        self.tags.insert(String::from(key), String::from(value));
        self
    }

    pub fn bounds(&self) -> Rectangle {
        geometry::location_bounds(&self.location)
    }
}
