use super::Location;
use crate::model::entity::EntityId;
use std::cmp::Ordering;

/// the result of snapping a location onto the nearest point of an edge
#[derive(Debug, Clone, PartialEq)]
pub struct SnappedEdge {
    pub edge_id: EntityId,
    pub origin: Location,
    pub snapped: Location,
    pub distance: f64,
}

impl SnappedEdge {
    /// ordering by snap distance, ties broken by edge identifier
    pub fn compare(&self, other: &SnappedEdge) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.edge_id.cmp(&other.edge_id))
    }
}
