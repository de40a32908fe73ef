use super::{EntityId, EntityKind, EntityRef, OsmId, Tags};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationMember {
    pub entity: EntityRef,
    pub role: String,
}

impl RelationMember {
    pub fn new(entity: EntityRef, role: &str) -> RelationMember {
        RelationMember {
            entity,
            role: String::from(role),
        }
    }
}

/// an ordered list of (entity, role) members. members may be relations themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub id: EntityId,
    pub osm_id: OsmId,
    pub members: Vec<RelationMember>,
    pub tags: Tags,
}

impl RelationRecord {
    pub fn new(id: i64, members: Vec<RelationMember>) -> RelationRecord {
        let id = EntityId(id);
        RelationRecord {
            id,
            osm_id: OsmId::from(id),
            members,
            tags: Tags::new(),
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> RelationRecord {
        self.tags.insert(String::from(key), String::from(value));
        self
    }

    /// identifiers of the members which are relations themselves
    pub fn relation_member_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.members
            .iter()
            .filter(|m| m.entity.kind == EntityKind::Relation)
            .map(|m| m.entity.id)
    }

    pub fn has_relation_members(&self) -> bool {
        self.relation_member_ids().next().is_some()
    }
}
