use super::{AtlasMetadata, AtlasSize, PackedAtlas};
use crate::model::{
    entity::{
        AreaRecord, EdgeRecord, EntityId, EntityKind, EntityRef, LineRecord, NodeRecord,
        PointRecord, RelationRecord,
    },
    index::SpatialIndices,
    AtlasError,
};
use indexmap::IndexMap;
use std::collections::HashMap;

/// collects entity records and assembles them into an immutable [`PackedAtlas`].
///
/// records are stored in insertion order, which becomes the iteration order of the
/// built atlas. derived connectivity (node in/out edges, parent relations) and size
/// counters are computed in [`PackedAtlasBuilder::build`], after the integrity checks.
#[derive(Debug, Default)]
pub struct PackedAtlasBuilder {
    metadata: AtlasMetadata,
    nodes: IndexMap<EntityId, NodeRecord>,
    edges: IndexMap<EntityId, EdgeRecord>,
    areas: IndexMap<EntityId, AreaRecord>,
    lines: IndexMap<EntityId, LineRecord>,
    points: IndexMap<EntityId, PointRecord>,
    relations: IndexMap<EntityId, RelationRecord>,
}

impl PackedAtlasBuilder {
    pub fn new() -> PackedAtlasBuilder {
        PackedAtlasBuilder::default()
    }

    pub fn with_metadata(mut self, metadata: AtlasMetadata) -> PackedAtlasBuilder {
        self.metadata = metadata;
        self
    }

    pub fn add_node(&mut self, node: NodeRecord) -> Result<(), AtlasError> {
        insert_unique(&mut self.nodes, EntityKind::Node, node.id, node)
    }

    pub fn add_edge(&mut self, edge: EdgeRecord) -> Result<(), AtlasError> {
        insert_unique(&mut self.edges, EntityKind::Edge, edge.id, edge)
    }

    /// adds an edge along with its reverse direction
    pub fn add_bidirectional_edge(&mut self, edge: EdgeRecord) -> Result<(), AtlasError> {
        let reversed = edge
            .reversed()
            .ok_or(AtlasError::IrreversibleEdge(edge.id))?;
        self.add_edge(edge)?;
        self.add_edge(reversed)
    }

    pub fn add_area(&mut self, area: AreaRecord) -> Result<(), AtlasError> {
        insert_unique(&mut self.areas, EntityKind::Area, area.id, area)
    }

    pub fn add_line(&mut self, line: LineRecord) -> Result<(), AtlasError> {
        insert_unique(&mut self.lines, EntityKind::Line, line.id, line)
    }

    pub fn add_point(&mut self, point: PointRecord) -> Result<(), AtlasError> {
        insert_unique(&mut self.points, EntityKind::Point, point.id, point)
    }

    pub fn add_relation(&mut self, relation: RelationRecord) -> Result<(), AtlasError> {
        insert_unique(&mut self.relations, EntityKind::Relation, relation.id, relation)
    }

    fn contains(&self, entity: &EntityRef) -> bool {
        match entity.kind {
            EntityKind::Node => self.nodes.contains_key(&entity.id),
            EntityKind::Edge => self.edges.contains_key(&entity.id),
            EntityKind::Area => self.areas.contains_key(&entity.id),
            EntityKind::Line => self.lines.contains_key(&entity.id),
            EntityKind::Point => self.points.contains_key(&entity.id),
            EntityKind::Relation => self.relations.contains_key(&entity.id),
        }
    }

    fn atlas_name(&self) -> String {
        self.metadata
            .shard_name
            .clone()
            .unwrap_or_else(|| String::from(AtlasMetadata::UNKNOWN))
    }

    fn integrity_violation(&self, referrer: EntityRef, missing: EntityRef) -> AtlasError {
        AtlasError::IntegrityViolation {
            atlas: self.atlas_name(),
            referrer,
            missing,
        }
    }

    fn validate(&self) -> Result<(), AtlasError> {
        for edge in self.edges.values() {
            let referrer = EntityRef::new(EntityKind::Edge, edge.id);
            let start = self.nodes.get(&edge.start_node).ok_or_else(|| {
                self.integrity_violation(referrer, EntityRef::new(EntityKind::Node, edge.start_node))
            })?;
            let end = self.nodes.get(&edge.end_node).ok_or_else(|| {
                self.integrity_violation(referrer, EntityRef::new(EntityKind::Node, edge.end_node))
            })?;
            let (Some(first), Some(last)) = (edge.polyline.0.first(), edge.polyline.0.last()) else {
                return Err(AtlasError::EmptyGeometry(EntityKind::Edge, edge.id));
            };
            if *first != start.location.0 {
                return Err(AtlasError::InvalidEdgeGeometry(
                    edge.id,
                    format!(
                        "first location ({}, {}) is not the location of start node '{}'",
                        first.x, first.y, start.id
                    ),
                ));
            }
            if *last != end.location.0 {
                return Err(AtlasError::InvalidEdgeGeometry(
                    edge.id,
                    format!(
                        "last location ({}, {}) is not the location of end node '{}'",
                        last.x, last.y, end.id
                    ),
                ));
            }
        }
        if let Some(area) = self.areas.values().find(|a| a.polygon.exterior().0.is_empty()) {
            return Err(AtlasError::EmptyGeometry(EntityKind::Area, area.id));
        }
        if let Some(line) = self.lines.values().find(|l| l.polyline.0.is_empty()) {
            return Err(AtlasError::EmptyGeometry(EntityKind::Line, line.id));
        }
        for relation in self.relations.values() {
            let referrer = EntityRef::new(EntityKind::Relation, relation.id);
            if let Some(missing) = relation.members.iter().find(|m| !self.contains(&m.entity)) {
                return Err(self.integrity_violation(referrer, missing.entity));
            }
        }
        Ok(())
    }

    /// validates the collected records and assembles the atlas.
    ///
    /// # Errors
    ///
    /// an [`AtlasError::IntegrityViolation`] when an edge or relation references an
    /// entity that was never added, [`AtlasError::InvalidEdgeGeometry`] when an edge
    /// polyline does not run from its start node to its end node, and
    /// [`AtlasError::EmptyGeometry`] for edges, lines or areas without coordinates.
    pub fn build(mut self) -> Result<PackedAtlas, AtlasError> {
        self.validate()?;

        for node in self.nodes.values_mut() {
            node.in_edges.clear();
            node.out_edges.clear();
        }
        for edge in self.edges.values() {
            if let Some(start) = self.nodes.get_mut(&edge.start_node) {
                start.out_edges.push(edge.id);
            }
            if let Some(end) = self.nodes.get_mut(&edge.end_node) {
                end.in_edges.push(edge.id);
            }
        }

        let mut parents: HashMap<EntityRef, Vec<EntityId>> = HashMap::new();
        for relation in self.relations.values() {
            for member in relation.members.iter() {
                let entry = parents.entry(member.entity).or_default();
                if !entry.contains(&relation.id) {
                    entry.push(relation.id);
                }
            }
        }

        let size = AtlasSize {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            areas: self.areas.len(),
            lines: self.lines.len(),
            points: self.points.len(),
            relations: self.relations.len(),
        };
        Ok(PackedAtlas {
            metadata: self.metadata.with_size(size),
            nodes: self.nodes,
            edges: self.edges,
            areas: self.areas,
            lines: self.lines,
            points: self.points,
            relations: self.relations,
            parents,
            indices: SpatialIndices::default(),
        })
    }
}

fn insert_unique<T>(
    records: &mut IndexMap<EntityId, T>,
    kind: EntityKind,
    id: EntityId,
    record: T,
) -> Result<(), AtlasError> {
    if records.contains_key(&id) {
        return Err(AtlasError::DuplicateEntity(kind, id));
    }
    records.insert(id, record);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        atlas::Atlas,
        entity::{LineRecord, RelationMember},
        fixtures,
    };
    use geo::{line_string, point};

    #[test]
    fn test_duplicate_identifier_is_rejected() {
        let mut builder = PackedAtlasBuilder::new();
        builder
            .add_node(NodeRecord::new(1, point!(x: 0.0, y: 0.0)))
            .expect("first node");
        let result = builder.add_node(NodeRecord::new(1, point!(x: 1.0, y: 1.0)));
        assert!(matches!(
            result,
            Err(AtlasError::DuplicateEntity(EntityKind::Node, EntityId(1)))
        ));
    }

    #[test]
    fn test_edge_with_missing_node_is_rejected() {
        let mut builder = PackedAtlasBuilder::new();
        builder
            .add_node(NodeRecord::new(1, point!(x: 0.0, y: 0.0)))
            .expect("node");
        builder
            .add_edge(EdgeRecord::new(
                10,
                line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
                1,
                2,
            ))
            .expect("edge");
        match builder.build() {
            Err(AtlasError::IntegrityViolation {
                referrer, missing, ..
            }) => {
                assert_eq!(referrer, EntityRef::edge(10));
                assert_eq!(missing, EntityRef::node(2));
            }
            other => panic!("expected integrity violation, found {other:?}"),
        }
    }

    #[test]
    fn test_relation_with_missing_member_is_rejected() {
        let mut builder = PackedAtlasBuilder::new();
        builder
            .add_line(LineRecord::new(1, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]))
            .expect("line");
        builder
            .add_relation(RelationRecord::new(
                5,
                vec![
                    RelationMember::new(EntityRef::line(1), "outer"),
                    RelationMember::new(EntityRef::area(9), "inner"),
                ],
            ))
            .expect("relation");
        let error = builder.build().expect_err("should fail");
        assert!(error.to_string().contains("area '9'"));
    }

    #[test]
    fn test_edge_geometry_must_meet_its_nodes() {
        let mut builder = PackedAtlasBuilder::new();
        builder
            .add_node(NodeRecord::new(1, point!(x: 0.0, y: 0.0)))
            .expect("node");
        builder
            .add_node(NodeRecord::new(2, point!(x: 1.0, y: 0.0)))
            .expect("node");
        builder
            .add_edge(EdgeRecord::new(
                10,
                line_string![(x: 0.0, y: 0.0), (x: 0.5, y: 0.0)],
                1,
                2,
            ))
            .expect("edge");
        assert!(matches!(
            builder.build(),
            Err(AtlasError::InvalidEdgeGeometry(EntityId(10), _))
        ));
    }

    #[test]
    fn test_connectivity_is_derived() {
        let atlas = fixtures::neighborhood_atlas();
        assert_eq!(atlas.node_out_edge_ids(EntityId(2)), vec![EntityId(-10), EntityId(11)]);
        assert_eq!(atlas.node_in_edge_ids(EntityId(2)), vec![EntityId(10), EntityId(-11)]);
        assert_eq!(
            atlas.parent_relation_ids(&EntityRef::relation(50)),
            vec![EntityId(52)]
        );
        assert_eq!(atlas.size().edges, 6);
        assert_eq!(atlas.size().relations, 5);
    }

    #[test]
    fn test_extreme_identifiers() {
        let mut builder = PackedAtlasBuilder::new();
        builder
            .add_node(NodeRecord::new(i64::MIN, point!(x: 0.0, y: 0.0)))
            .expect("node");
        builder
            .add_node(NodeRecord::new(i64::MAX, point!(x: 1.0, y: 0.0)))
            .expect("node");
        let geometry = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        let result = builder.add_bidirectional_edge(EdgeRecord::new(
            i64::MIN,
            geometry.clone(),
            i64::MIN,
            i64::MAX,
        ));
        assert!(matches!(result, Err(AtlasError::IrreversibleEdge(EntityId(i64::MIN)))));
        builder
            .add_edge(EdgeRecord::new(i64::MIN, geometry, i64::MIN, i64::MAX))
            .expect("one-way edge");

        let atlas = builder.build().expect("atlas");
        let edge = atlas.edge(EntityId(i64::MIN)).expect("edge");
        assert!(atlas.reversed_edge(edge).is_none());
        assert_eq!(atlas.node_out_edge_ids(EntityId(i64::MIN)), vec![EntityId(i64::MIN)]);
        assert_eq!(atlas.node_in_edge_ids(EntityId(i64::MAX)), vec![EntityId(i64::MIN)]);
    }
}
