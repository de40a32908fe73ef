use super::{EntityId, OsmId, Tags};
use crate::model::geometry::{self, PolyLine, Rectangle};
use serde::{Deserialize, Serialize};

/// an open polyline which is not part of the navigable graph (rivers, power lines, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: EntityId,
    pub osm_id: OsmId,
    pub polyline: PolyLine,
    pub tags: Tags,
}

impl LineRecord {
    pub fn new(id: i64, polyline: PolyLine) -> LineRecord {
        let id = EntityId(id);
        LineRecord {
            id,
            osm_id: OsmId::from(id),
            polyline,
            tags: Tags::new(),
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> LineRecord {
        self.tags.insert(String::from(key), String::from(value));
        self
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        geometry::polyline_bounds(&self.polyline)
    }
}
