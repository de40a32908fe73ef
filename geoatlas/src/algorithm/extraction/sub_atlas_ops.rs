use super::{CutType, EntitySelector, EntitySet};
use crate::algorithm::ordering;
use crate::config::SubAtlasConfiguration;
use crate::model::{
    atlas::{relation_ops, Atlas, PackedAtlas, PackedAtlasBuilder},
    entity::{Entity, EntityId, EntityKind, EntityRef, RelationMember, RelationRecord},
    geometry::Polygon,
    AtlasError,
};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// builds the sub-atlas of the entities picked by `selector` under the configured cut.
///
/// returns `Ok(None)` when the cut keeps no entity at all. the result holds the kept
/// records unchanged (apart from trimmed relation member lists under
/// [`CutType::HardCutRelationsOnly`]) and metadata marked as derived.
///
/// # Errors
///
/// fails with [`AtlasError::IntegrityViolation`] if the kept entities reference an
/// entity that was not kept, which indicates an inconsistent source atlas.
pub fn extract<A: Atlas + ?Sized>(
    atlas: &A,
    selector: &EntitySelector<'_>,
    config: &SubAtlasConfiguration,
) -> Result<Option<PackedAtlas>, AtlasError> {
    let matched = match selector {
        EntitySelector::Boundary(boundary) => match_boundary(atlas, boundary),
        EntitySelector::Predicate(predicate) => match_predicate(atlas, *predicate),
    };
    log::debug!(
        "{} entities of atlas '{}' match {selector:?}",
        matched.len(),
        atlas.name()
    );

    let ceiling = config.relation_pass_ceiling;
    let (kept, trimmed) = match config.cut_type {
        CutType::SoftCut => (soft_cut(atlas, &matched, ceiling), HashMap::new()),
        CutType::HardCutAll => (hard_cut_all(atlas, &matched, ceiling), HashMap::new()),
        CutType::HardCutRelationsOnly => hard_cut_relations_only(atlas, &matched, ceiling),
    };

    if kept.is_empty() {
        log::info!(
            "{} of atlas '{}' selected no entities, no sub-atlas created",
            config.cut_type,
            atlas.name()
        );
        return Ok(None);
    }
    let sub_atlas = materialize(atlas, &kept, trimmed)?;
    log::info!(
        "{} of atlas '{}' kept {}",
        config.cut_type,
        atlas.name(),
        sub_atlas.size()
    );
    Ok(Some(sub_atlas))
}

fn match_boundary<A: Atlas + ?Sized>(atlas: &A, boundary: &Polygon) -> EntitySet {
    let nodes = atlas.nodes_within(boundary).into_iter().map(|r| r.id);
    let edges = atlas.edges_intersecting(boundary).into_iter().map(|r| r.id);
    let areas = atlas.areas_intersecting(boundary).into_iter().map(|r| r.id);
    let lines = atlas.lines_intersecting(boundary).into_iter().map(|r| r.id);
    let points = atlas.points_within(boundary).into_iter().map(|r| r.id);
    let relations = atlas.relations_intersecting(boundary).into_iter().map(|r| r.id);

    let mut matched = EntitySet::new();
    matched.extend(nodes.map(|id| EntityRef::new(EntityKind::Node, id)));
    matched.extend(edges.map(|id| EntityRef::new(EntityKind::Edge, id)));
    matched.extend(areas.map(|id| EntityRef::new(EntityKind::Area, id)));
    matched.extend(lines.map(|id| EntityRef::new(EntityKind::Line, id)));
    matched.extend(points.map(|id| EntityRef::new(EntityKind::Point, id)));
    matched.extend(relations.map(|id| EntityRef::new(EntityKind::Relation, id)));
    matched
}

fn match_predicate<A: Atlas + ?Sized>(
    atlas: &A,
    predicate: &(dyn Fn(Entity<'_>) -> bool + Sync),
) -> EntitySet {
    EntityKind::ALL
        .iter()
        .flat_map(|kind| {
            let entities = atlas.entities(*kind).collect_vec();
            entities
                .into_par_iter()
                .filter(|entity| predicate(*entity))
                .map(|entity| entity.entity_ref())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// adds the start and end node of every kept edge
fn add_edge_endpoints<A: Atlas + ?Sized>(atlas: &A, kept: &mut EntitySet) {
    let endpoints = kept
        .ids(EntityKind::Edge)
        .filter_map(|id| atlas.edge(id))
        .flat_map(|e| [e.start_node, e.end_node])
        .collect_vec();
    kept.extend(endpoints.into_iter().map(|id| EntityRef::new(EntityKind::Node, id)));
}

/// the relations above `seeds`, following parent relations level by level.
/// stops after `ceiling` levels.
fn reach_parents<A: Atlas + ?Sized>(
    atlas: &A,
    seeds: impl Iterator<Item = EntityRef>,
    ceiling: usize,
) -> HashSet<EntityId> {
    let mut reached: HashSet<EntityId> = HashSet::new();
    let mut frontier = seeds.collect_vec();
    let mut level = 0;
    while !frontier.is_empty() && level < ceiling {
        level += 1;
        frontier = frontier
            .iter()
            .flat_map(|member| atlas.parent_relation_ids(member))
            .filter(|id| reached.insert(*id))
            .map(|id| EntityRef::new(EntityKind::Relation, id))
            .collect_vec();
    }
    if !frontier.is_empty() {
        log::warn!(
            "stopped following parent relations of atlas '{}' after {ceiling} levels with {} relations left",
            atlas.name(),
            frontier.len()
        );
    }
    reached
}

fn non_relations(matched: &EntitySet) -> EntitySet {
    matched
        .iter()
        .filter(|e| e.kind != EntityKind::Relation)
        .copied()
        .collect()
}

fn soft_cut<A: Atlas + ?Sized>(atlas: &A, matched: &EntitySet, ceiling: usize) -> EntitySet {
    // relations above the matched entities, and the matched relations themselves.
    // endpoints added for a matched edge do not bring in their own parent relations.
    let matched_relations = matched.ids(EntityKind::Relation).collect_vec();
    let relations = reach_parents(atlas, matched.iter().copied(), ceiling)
        .into_iter()
        .chain(matched_relations)
        .collect::<HashSet<_>>();

    let mut kept = non_relations(matched);
    // every member beneath a kept relation is kept
    for id in relations.iter() {
        kept.insert(EntityRef::new(EntityKind::Relation, *id));
        if let Some(relation) = atlas.relation(*id) {
            kept.extend(
                relation_ops::flattened_members(atlas, relation)
                    .iter()
                    .map(|e| e.entity_ref()),
            );
        }
    }
    add_edge_endpoints(atlas, &mut kept);
    kept
}

fn hard_cut_all<A: Atlas + ?Sized>(atlas: &A, matched: &EntitySet, ceiling: usize) -> EntitySet {
    let mut kept = EntitySet::new();
    for entity in matched.iter() {
        match entity.kind {
            EntityKind::Edge => {
                let endpoints_kept = atlas.edge(entity.id).is_some_and(|e| {
                    matched.contains_id(EntityKind::Node, e.start_node)
                        && matched.contains_id(EntityKind::Node, e.end_node)
                });
                if endpoints_kept {
                    kept.insert(*entity);
                }
            }
            EntityKind::Relation => {}
            _ => {
                kept.insert(*entity);
            }
        }
    }
    // sub-relations are decided before the relations containing them
    let ordering = ordering::lower_order_first(atlas.relations(), ceiling);
    for relation in ordering.relations {
        let referrer = EntityRef::new(EntityKind::Relation, relation.id);
        let keep = matched.contains(&referrer)
            && !relation.members.is_empty()
            && relation.members.iter().all(|m| kept.contains(&m.entity));
        if keep {
            kept.insert(referrer);
        }
    }
    kept
}

/// relations whose member list shrinks under the relations-only hard cut
type TrimmedRelations = HashMap<EntityId, Vec<RelationMember>>;

fn hard_cut_relations_only<A: Atlas + ?Sized>(
    atlas: &A,
    matched: &EntitySet,
    ceiling: usize,
) -> (EntitySet, TrimmedRelations) {
    let mut kept = non_relations(matched);
    add_edge_endpoints(atlas, &mut kept);

    let mut trimmed = TrimmedRelations::new();
    let ordering = ordering::lower_order_first(atlas.relations(), ceiling);
    for relation in ordering.relations {
        let members = relation
            .members
            .iter()
            .filter(|m| kept.contains(&m.entity))
            .cloned()
            .collect_vec();
        if members.is_empty() {
            continue;
        }
        kept.insert(EntityRef::new(EntityKind::Relation, relation.id));
        if members.len() < relation.members.len() {
            trimmed.insert(relation.id, members);
        }
    }
    (kept, trimmed)
}

/// copies the kept records, in the source atlas iteration order, into a new atlas
fn materialize<A: Atlas + ?Sized>(
    atlas: &A,
    kept: &EntitySet,
    mut trimmed: TrimmedRelations,
) -> Result<PackedAtlas, AtlasError> {
    let mut builder = PackedAtlasBuilder::new().with_metadata(atlas.metadata().derived());
    for node in atlas.nodes().filter(|r| kept.contains_id(EntityKind::Node, r.id)) {
        builder.add_node(node.clone())?;
    }
    for edge in atlas.edges().filter(|r| kept.contains_id(EntityKind::Edge, r.id)) {
        builder.add_edge(edge.clone())?;
    }
    for area in atlas.areas().filter(|r| kept.contains_id(EntityKind::Area, r.id)) {
        builder.add_area(area.clone())?;
    }
    for line in atlas.lines().filter(|r| kept.contains_id(EntityKind::Line, r.id)) {
        builder.add_line(line.clone())?;
    }
    for point in atlas.points().filter(|r| kept.contains_id(EntityKind::Point, r.id)) {
        builder.add_point(point.clone())?;
    }
    for relation in atlas
        .relations()
        .filter(|r| kept.contains_id(EntityKind::Relation, r.id))
    {
        let record = match trimmed.remove(&relation.id) {
            Some(members) => RelationRecord {
                members,
                ..relation.clone()
            },
            None => relation.clone(),
        };
        builder.add_relation(record)?;
    }
    builder.build()
}
