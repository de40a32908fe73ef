use super::Atlas;
use crate::model::entity::{Entity, EntityKind, EntityRef};
use itertools::Itertools;

/// every (kind, identifier) pair on which two atlases disagree: present in only one of
/// them, or present in both with different tags or geometry/members. derived
/// connectivity and metadata are not compared.
pub fn differences<A, B>(a: &A, b: &B) -> Vec<EntityRef>
where
    A: Atlas + ?Sized,
    B: Atlas + ?Sized,
{
    let mut result = vec![];
    for kind in EntityKind::ALL {
        for entity in a.entities(kind) {
            match b.entity(entity.id(), kind) {
                Some(other) if same_entity(&entity, &other) => {}
                _ => result.push(entity.entity_ref()),
            }
        }
        for entity in b.entities(kind) {
            if a.entity(entity.id(), kind).is_none() {
                result.push(entity.entity_ref());
            }
        }
    }
    result.into_iter().sorted().dedup().collect()
}

pub fn equals<A, B>(a: &A, b: &B) -> bool
where
    A: Atlas + ?Sized,
    B: Atlas + ?Sized,
{
    a.size() == b.size() && differences(a, b).is_empty()
}

fn same_entity(a: &Entity<'_>, b: &Entity<'_>) -> bool {
    if a.tags() != b.tags() {
        return false;
    }
    match (a, b) {
        (Entity::Node(x), Entity::Node(y)) => x.location == y.location,
        (Entity::Point(x), Entity::Point(y)) => x.location == y.location,
        (Entity::Edge(x), Entity::Edge(y)) => {
            x.polyline == y.polyline && x.start_node == y.start_node && x.end_node == y.end_node
        }
        (Entity::Line(x), Entity::Line(y)) => x.polyline == y.polyline,
        (Entity::Area(x), Entity::Area(y)) => x.polygon == y.polygon,
        (Entity::Relation(x), Entity::Relation(y)) => x.members == y.members,
        _ => false,
    }
}
