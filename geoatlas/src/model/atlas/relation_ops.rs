use super::Atlas;
use crate::model::{
    entity::{Entity, EntityKind, EntityRef, RelationRecord},
    geometry::{self, Polygon, Rectangle},
};
use geo::Intersects;
use std::collections::HashSet;

/// every entity reachable downward from a relation through its members, sub-relation
/// members included. each entity appears once, cycles are followed only once, and
/// members that cannot be resolved in `atlas` are skipped.
pub fn flattened_members<'a, A: Atlas + ?Sized>(
    atlas: &'a A,
    relation: &'a RelationRecord,
) -> Vec<Entity<'a>> {
    let mut visited: HashSet<EntityRef> = HashSet::from([EntityRef::new(
        EntityKind::Relation,
        relation.id,
    )]);
    let mut frontier: Vec<&RelationRecord> = vec![relation];
    let mut result = vec![];
    while let Some(next) = frontier.pop() {
        for member in next.members.iter() {
            if !visited.insert(member.entity) {
                continue;
            }
            let Some(entity) = atlas.resolve(&member.entity) else {
                continue;
            };
            if let Entity::Relation(sub) = entity {
                frontier.push(sub);
            }
            result.push(entity);
        }
    }
    result
}

/// union of the bounds of every non-relation entity beneath a relation
pub fn relation_bounds<A: Atlas + ?Sized>(atlas: &A, relation: &RelationRecord) -> Option<Rectangle> {
    flattened_members(atlas, relation)
        .into_iter()
        .filter(|e| e.kind() != EntityKind::Relation)
        .filter_map(|e| atlas.bounds(&e))
        .reduce(|acc, b| geometry::combine(&acc, &b))
}

/// true when any non-relation entity beneath the relation overlaps the polygon
pub fn relation_intersects<A: Atlas + ?Sized>(
    atlas: &A,
    relation: &RelationRecord,
    polygon: &Polygon,
) -> bool {
    flattened_members(atlas, relation)
        .into_iter()
        .any(|entity| match entity {
            Entity::Node(n) => geometry::polygon_encloses_location(polygon, &n.location),
            Entity::Point(p) => geometry::polygon_encloses_location(polygon, &p.location),
            Entity::Edge(e) => polygon.intersects(&e.polyline),
            Entity::Line(l) => polygon.intersects(&l.polyline),
            Entity::Area(a) => polygon.intersects(&a.polygon),
            Entity::Relation(_) => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{entity::EntityId, fixtures};
    use geo::{Coord, Rect};
    use itertools::Itertools;

    #[test]
    fn test_flattened_members_follows_nesting_once() {
        let atlas = fixtures::neighborhood_atlas();
        let outer = atlas.relation(EntityId(52)).expect("fixture relation");
        let found = flattened_members(&atlas, outer)
            .into_iter()
            .map(|e| e.entity_ref())
            .sorted()
            .collect_vec();
        let expected = vec![
            EntityRef::node(2),
            EntityRef::edge(10),
            EntityRef::edge(11),
            EntityRef::area(21),
            EntityRef::point(41),
            EntityRef::relation(50),
            EntityRef::relation(51),
        ]
        .into_iter()
        .sorted()
        .collect_vec();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_cyclic_relation_terminates() {
        let atlas = fixtures::neighborhood_atlas();
        let cyclic = atlas.relation(EntityId(53)).expect("fixture relation");
        let found = flattened_members(&atlas, cyclic);
        assert_eq!(found.len(), 3, "relation 54, line 31 and point 41");
        let bounds = relation_bounds(&atlas, cyclic).expect("relation has geometry");
        assert_eq!(bounds, Rect::new(Coord { x: 8.0, y: 8.0 }, Coord { x: 9.0, y: 9.0 }));
    }

    #[test]
    fn test_relation_intersects_through_members() {
        let atlas = fixtures::neighborhood_atlas();
        let relation = atlas.relation(EntityId(51)).expect("fixture relation");
        let near = Rect::new(Coord { x: 5.5, y: 5.5 }, Coord { x: 7.0, y: 7.0 }).to_polygon();
        let far = Rect::new(Coord { x: 20.0, y: 20.0 }, Coord { x: 21.0, y: 21.0 }).to_polygon();
        assert!(relation_intersects(&atlas, relation, &near));
        assert!(!relation_intersects(&atlas, relation, &far));
    }
}
