use super::{EntityId, OsmId, Tags};
use crate::model::geometry::{self, PolyLine, Rectangle};
use serde::{Deserialize, Serialize};

/// a directed segment of the navigable road graph. the start and end nodes are held
/// as identifiers and resolved through whichever atlas is reading this edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: EntityId,
    pub osm_id: OsmId,
    pub polyline: PolyLine,
    pub start_node: EntityId,
    pub end_node: EntityId,
    pub tags: Tags,
}

impl EdgeRecord {
    pub fn new(id: i64, polyline: PolyLine, start_node: i64, end_node: i64) -> EdgeRecord {
        let id = EntityId(id);
        EdgeRecord {
            id,
            osm_id: OsmId::from(id),
            polyline,
            start_node: EntityId(start_node),
            end_node: EntityId(end_node),
            tags: Tags::new(),
        }
    }

    pub fn with_osm_id(mut self, osm_id: OsmId) -> EdgeRecord {
        self.osm_id = osm_id;
        self
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> EdgeRecord {
        self.tags.insert(String::from(key), String::from(value));
        self
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        geometry::polyline_bounds(&self.polyline)
    }

    /// the opposite direction of this edge: negated identifier, swapped
    /// endpoints and reversed geometry. tags are shared. `None` when the identifier
    /// has no negation.
    pub fn reversed(&self) -> Option<EdgeRecord> {
        let id = self.id.reversed()?;
        let mut coords = self.polyline.0.clone();
        coords.reverse();
        Some(EdgeRecord {
            id,
            osm_id: self.osm_id,
            polyline: PolyLine::new(coords),
            start_node: self.end_node,
            end_node: self.start_node,
            tags: self.tags.clone(),
        })
    }
}
