use super::{
    AreaRecord, EdgeRecord, EntityId, EntityKind, EntityRef, LineRecord, NodeRecord, OsmId,
    PointRecord, RelationRecord, Tags,
};

/// borrowed view of any atlas entity. the shared capabilities (identifiers, tags)
/// are available on every variant; kind-specific data is reached by matching.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Node(&'a NodeRecord),
    Edge(&'a EdgeRecord),
    Area(&'a AreaRecord),
    Line(&'a LineRecord),
    Point(&'a PointRecord),
    Relation(&'a RelationRecord),
}

impl<'a> Entity<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Node(_) => EntityKind::Node,
            Entity::Edge(_) => EntityKind::Edge,
            Entity::Area(_) => EntityKind::Area,
            Entity::Line(_) => EntityKind::Line,
            Entity::Point(_) => EntityKind::Point,
            Entity::Relation(_) => EntityKind::Relation,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Entity::Node(r) => r.id,
            Entity::Edge(r) => r.id,
            Entity::Area(r) => r.id,
            Entity::Line(r) => r.id,
            Entity::Point(r) => r.id,
            Entity::Relation(r) => r.id,
        }
    }

    pub fn osm_id(&self) -> OsmId {
        match self {
            Entity::Node(r) => r.osm_id,
            Entity::Edge(r) => r.osm_id,
            Entity::Area(r) => r.osm_id,
            Entity::Line(r) => r.osm_id,
            Entity::Point(r) => r.osm_id,
            Entity::Relation(r) => r.osm_id,
        }
    }

    pub fn tags(&self) -> &'a Tags {
        match self {
            Entity::Node(r) => &r.tags,
            Entity::Edge(r) => &r.tags,
            Entity::Area(r) => &r.tags,
            Entity::Line(r) => &r.tags,
            Entity::Point(r) => &r.tags,
            Entity::Relation(r) => &r.tags,
        }
    }

    pub fn tag(&self, key: &str) -> Option<&'a str> {
        self.tags().get(key).map(|v| v.as_str())
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.kind(), self.id())
    }
}
