use super::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a (kind, identifier) pair. entities refer to each other only through these
/// references, which are resolved against whichever atlas is currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: EntityId) -> EntityRef {
        EntityRef { kind, id }
    }

    pub fn node(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::Node, EntityId(id))
    }

    pub fn edge(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::Edge, EntityId(id))
    }

    pub fn area(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::Area, EntityId(id))
    }

    pub fn line(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::Line, EntityId(id))
    }

    pub fn point(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::Point, EntityId(id))
    }

    pub fn relation(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::Relation, EntityId(id))
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.kind, self.id)
    }
}
