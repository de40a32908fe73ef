use crate::model::entity::{EntityId, RelationRecord};
use std::collections::HashSet;

/// number of passes over nested relations before giving up on resolving their order
pub const DEFAULT_RELATION_PASS_CEILING: usize = 500;

/// relations arranged so that every relation follows the relations it contains
#[derive(Debug)]
pub struct RelationOrdering<'a> {
    pub relations: Vec<&'a RelationRecord>,
    /// count of trailing relations whose order could not be resolved within the
    /// pass ceiling (cyclic or too deeply nested), appended in their original order
    pub unresolved: usize,
}

/// orders relations lower-order first.
///
/// the first pass emits every relation without relation members. each following pass
/// scans the remaining relations in their original order and emits those whose relation
/// members have all been emitted. relation members not found among `relations` do not
/// hold anything back. stops after `pass_ceiling` passes, or earlier when a pass emits
/// nothing, and appends whatever remains.
pub fn lower_order_first<'a>(
    relations: impl Iterator<Item = &'a RelationRecord>,
    pass_ceiling: usize,
) -> RelationOrdering<'a> {
    let all: Vec<&RelationRecord> = relations.collect();
    let known: HashSet<EntityId> = all.iter().map(|r| r.id).collect();
    let mut emitted: HashSet<EntityId> = HashSet::with_capacity(all.len());
    let mut ordered: Vec<&RelationRecord> = Vec::with_capacity(all.len());

    let (flat, mut staged): (Vec<_>, Vec<_>) =
        all.into_iter().partition(|r| !r.has_relation_members());
    for relation in flat {
        emitted.insert(relation.id);
        ordered.push(relation);
    }

    let mut passes = 1;
    while !staged.is_empty() && passes < pass_ceiling {
        passes += 1;
        let before = staged.len();
        let mut waiting = Vec::with_capacity(staged.len());
        for relation in staged.into_iter() {
            let ready = relation
                .relation_member_ids()
                .all(|id| emitted.contains(&id) || !known.contains(&id));
            if ready {
                emitted.insert(relation.id);
                ordered.push(relation);
            } else {
                waiting.push(relation);
            }
        }
        staged = waiting;
        if staged.len() == before {
            break;
        }
    }

    let unresolved = staged.len();
    if unresolved > 0 {
        log::warn!(
            "{unresolved} relations could not be ordered after {passes} passes, likely cyclic or nested deeper than {pass_ceiling}; appending them unordered: [{}]",
            staged.iter().map(|r| r.id.to_string()).collect::<Vec<_>>().join(", ")
        );
        ordered.extend(staged);
    }
    RelationOrdering {
        relations: ordered,
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        atlas::Atlas,
        entity::{EntityRef, RelationMember},
        fixtures,
    };
    use itertools::Itertools;

    /// relation 1 holds a point, each relation n + 1 holds relation n. listed deepest first.
    fn chain(depth: i64) -> Vec<RelationRecord> {
        (1..=depth)
            .rev()
            .map(|id| {
                let member = if id == 1 {
                    EntityRef::point(1)
                } else {
                    EntityRef::relation(id - 1)
                };
                RelationRecord::new(id, vec![RelationMember::new(member, "")])
            })
            .collect()
    }

    fn assert_lower_order_first(ordering: &RelationOrdering) {
        let resolved = ordering.relations.len() - ordering.unresolved;
        for (i, relation) in ordering.relations.iter().take(resolved).enumerate() {
            for member in relation.relation_member_ids() {
                let position = ordering.relations.iter().position(|r| r.id == member);
                if let Some(position) = position {
                    assert!(position < i, "relation {} precedes member {member}", relation.id);
                }
            }
        }
    }

    #[test]
    fn test_nested_and_cyclic_relations() {
        let atlas = fixtures::neighborhood_atlas();
        let ordering = lower_order_first(atlas.relations(), DEFAULT_RELATION_PASS_CEILING);
        let ids = ordering.relations.iter().map(|r| r.id.0).collect_vec();
        assert_eq!(ids, vec![50, 51, 52, 53, 54]);
        assert_eq!(ordering.unresolved, 2);
        assert_lower_order_first(&ordering);
    }

    #[test]
    fn test_deep_chain_within_ceiling() {
        let relations = chain(6);
        let ordering = lower_order_first(relations.iter(), DEFAULT_RELATION_PASS_CEILING);
        let ids = ordering.relations.iter().map(|r| r.id.0).collect_vec();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(ordering.unresolved, 0);
        assert_lower_order_first(&ordering);
    }

    #[test]
    fn test_ceiling_stops_resolution() {
        let relations = chain(4);
        let ordering = lower_order_first(relations.iter(), 2);
        let ids = ordering.relations.iter().map(|r| r.id.0).collect_vec();
        assert_eq!(ids, vec![1, 2, 4, 3]);
        assert_eq!(ordering.unresolved, 2);
        assert_lower_order_first(&ordering);
    }

    #[test]
    fn test_unknown_relation_members_do_not_block() {
        let relations = vec![RelationRecord::new(
            7,
            vec![RelationMember::new(EntityRef::relation(99), "subarea")],
        )];
        let ordering = lower_order_first(relations.iter(), DEFAULT_RELATION_PASS_CEILING);
        assert_eq!(ordering.relations.len(), 1);
        assert_eq!(ordering.unresolved, 0);
    }
}
