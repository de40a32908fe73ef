use crate::model::entity::EntityKind;
use serde::{Deserialize, Serialize};

/// per-kind entity counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasSize {
    pub nodes: usize,
    pub edges: usize,
    pub areas: usize,
    pub lines: usize,
    pub points: usize,
    pub relations: usize,
}

impl AtlasSize {
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Node => self.nodes,
            EntityKind::Edge => self.edges,
            EntityKind::Area => self.areas,
            EntityKind::Line => self.lines,
            EntityKind::Point => self.points,
            EntityKind::Relation => self.relations,
        }
    }

    pub fn total(&self) -> usize {
        EntityKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl std::fmt::Display for AtlasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes, {} edges, {} areas, {} lines, {} points, {} relations",
            self.nodes, self.edges, self.areas, self.lines, self.points, self.relations
        )
    }
}
