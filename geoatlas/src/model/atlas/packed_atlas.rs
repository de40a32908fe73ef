use super::{equality_ops, Atlas, AtlasMetadata, PackedAtlasBuilder, Records};
use crate::model::{
    codec::{codec_ops, AtlasFormat},
    entity::{
        AreaRecord, EdgeRecord, EntityId, EntityRef, LineRecord, NodeRecord, PointRecord,
        RelationRecord,
    },
    index::SpatialIndices,
    AtlasError,
};
use indexmap::IndexMap;
use kdam::{Bar, BarExt};
use std::{collections::HashMap, path::Path};

/// concrete in-memory atlas storage. entity records are owned in per-kind tables
/// keyed by identifier, in insertion order. built once by [`PackedAtlasBuilder`]
/// and never mutated afterwards, apart from lazily built spatial indices.
#[derive(Debug)]
pub struct PackedAtlas {
    pub(super) metadata: AtlasMetadata,
    pub(super) nodes: IndexMap<EntityId, NodeRecord>,
    pub(super) edges: IndexMap<EntityId, EdgeRecord>,
    pub(super) areas: IndexMap<EntityId, AreaRecord>,
    pub(super) lines: IndexMap<EntityId, LineRecord>,
    pub(super) points: IndexMap<EntityId, PointRecord>,
    pub(super) relations: IndexMap<EntityId, RelationRecord>,
    pub(super) parents: HashMap<EntityRef, Vec<EntityId>>,
    pub(super) indices: SpatialIndices,
}

impl PackedAtlas {
    /// copies every entity of another atlas (usually a composed or derived view)
    /// into concrete storage that can be saved. metadata is carried over as-is.
    pub fn from_atlas(atlas: &dyn Atlas) -> Result<PackedAtlas, AtlasError> {
        let name = atlas.name();
        let mut builder = PackedAtlasBuilder::new().with_metadata(atlas.metadata().clone());
        let mut bar = Bar::builder()
            .desc(format!("materialize {name}"))
            .total(atlas.size().total())
            .build()
            .map_err(AtlasError::InternalError)?;
        for node in atlas.nodes() {
            let _ = bar.update(1);
            builder.add_node(node.clone())?;
        }
        for edge in atlas.edges() {
            let _ = bar.update(1);
            builder.add_edge(edge.clone())?;
        }
        for area in atlas.areas() {
            let _ = bar.update(1);
            builder.add_area(area.clone())?;
        }
        for line in atlas.lines() {
            let _ = bar.update(1);
            builder.add_line(line.clone())?;
        }
        for point in atlas.points() {
            let _ = bar.update(1);
            builder.add_point(point.clone())?;
        }
        for relation in atlas.relations() {
            let _ = bar.update(1);
            builder.add_relation(relation.clone())?;
        }
        eprintln!();
        builder.build()
    }

    /// reads an atlas file, choosing the format from the file extension
    pub fn load(path: &Path) -> Result<PackedAtlas, AtlasError> {
        let format = AtlasFormat::try_from(path)?;
        codec_ops::read_atlas(path, format)
    }
}

impl Atlas for PackedAtlas {
    fn name(&self) -> String {
        self.metadata
            .shard_name
            .clone()
            .unwrap_or_else(|| String::from(AtlasMetadata::UNKNOWN))
    }

    fn metadata(&self) -> &AtlasMetadata {
        &self.metadata
    }

    fn node(&self, id: EntityId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    fn edge(&self, id: EntityId) -> Option<&EdgeRecord> {
        self.edges.get(&id)
    }

    fn area(&self, id: EntityId) -> Option<&AreaRecord> {
        self.areas.get(&id)
    }

    fn line(&self, id: EntityId) -> Option<&LineRecord> {
        self.lines.get(&id)
    }

    fn point(&self, id: EntityId) -> Option<&PointRecord> {
        self.points.get(&id)
    }

    fn relation(&self, id: EntityId) -> Option<&RelationRecord> {
        self.relations.get(&id)
    }

    fn nodes(&self) -> Records<'_, NodeRecord> {
        Box::new(self.nodes.values())
    }

    fn edges(&self) -> Records<'_, EdgeRecord> {
        Box::new(self.edges.values())
    }

    fn areas(&self) -> Records<'_, AreaRecord> {
        Box::new(self.areas.values())
    }

    fn lines(&self) -> Records<'_, LineRecord> {
        Box::new(self.lines.values())
    }

    fn points(&self) -> Records<'_, PointRecord> {
        Box::new(self.points.values())
    }

    fn relations(&self) -> Records<'_, RelationRecord> {
        Box::new(self.relations.values())
    }

    fn node_in_edge_ids(&self, node: EntityId) -> Vec<EntityId> {
        self.nodes
            .get(&node)
            .map(|n| n.in_edges.clone())
            .unwrap_or_default()
    }

    fn node_out_edge_ids(&self, node: EntityId) -> Vec<EntityId> {
        self.nodes
            .get(&node)
            .map(|n| n.out_edges.clone())
            .unwrap_or_default()
    }

    fn parent_relation_ids(&self, member: &EntityRef) -> Vec<EntityId> {
        self.parents.get(member).cloned().unwrap_or_default()
    }

    fn spatial_indices(&self) -> &SpatialIndices {
        &self.indices
    }

    fn save(&self, path: &Path, format: AtlasFormat) -> Result<(), AtlasError> {
        codec_ops::write_atlas(self, path, format)
    }
}

impl PartialEq for PackedAtlas {
    fn eq(&self, other: &Self) -> bool {
        equality_ops::equals(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        entity::{Entity, EntityKind},
        fixtures,
        geometry::Rectangle,
    };
    use geo::{point, polygon, Coord};
    use itertools::Itertools;

    #[test]
    fn test_lookup_and_iteration_order() {
        let atlas = fixtures::neighborhood_atlas();
        assert!(matches!(
            atlas.entity(EntityId(41), EntityKind::Point),
            Some(Entity::Point(_))
        ));
        assert!(atlas.entity(EntityId(41), EntityKind::Node).is_none());
        let first = atlas.edges().map(|e| e.id.0).collect_vec();
        let second = atlas.edges().map(|e| e.id.0).collect_vec();
        assert_eq!(first, vec![10, -10, 11, -11, 12, 13]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_edge_navigation() {
        let atlas = fixtures::neighborhood_atlas();
        let edge = atlas.edge(EntityId(10)).expect("edge 10");
        assert_eq!(atlas.start_node(edge).map(|n| n.id), Some(EntityId(1)));
        assert_eq!(atlas.end_node(edge).map(|n| n.id), Some(EntityId(2)));
        assert_eq!(atlas.reversed_edge(edge).map(|e| e.id), Some(EntityId(-10)));
        let twelve = atlas.edge(EntityId(12)).expect("edge 12");
        assert!(atlas.reversed_edge(twelve).is_none());
        let connected = atlas
            .connected_edges(EntityId(3))
            .into_iter()
            .map(|e| e.id.0)
            .sorted()
            .collect_vec();
        assert_eq!(connected, vec![-11, 11, 12]);
    }

    #[test]
    fn test_spatial_queries() {
        let atlas = fixtures::neighborhood_atlas();
        let boundary = fixtures::neighborhood_boundary();
        assert!(!atlas.spatial_indices().is_built(EntityKind::Node));
        let nodes = atlas.nodes_within(&boundary).iter().map(|n| n.id.0).sorted().collect_vec();
        assert_eq!(nodes, vec![1, 2]);
        assert!(atlas.spatial_indices().is_built(EntityKind::Node));
        assert!(!atlas.spatial_indices().is_built(EntityKind::Area));

        let edges = atlas
            .edges_intersecting(&boundary)
            .iter()
            .map(|e| e.id.0)
            .sorted()
            .collect_vec();
        assert_eq!(edges, vec![-11, -10, 10, 11]);
        let within = atlas.edges_within(&boundary).iter().map(|e| e.id.0).sorted().collect_vec();
        assert_eq!(within, vec![-10, 10]);

        let areas = atlas.areas_covering(&point!(x: 0.5, y: 0.5));
        assert_eq!(areas.iter().map(|a| a.id.0).collect_vec(), vec![20]);
        assert_eq!(atlas.points_at(&point!(x: 9.0, y: 9.0)).len(), 1);
        assert_eq!(atlas.nodes_at(&point!(x: 2.0, y: 0.0)).len(), 1);
        assert_eq!(atlas.lines_containing(&point!(x: 1.0, y: 1.0)).len(), 1);

        let relations = atlas
            .relations_intersecting(&boundary)
            .iter()
            .map(|r| r.id.0)
            .sorted()
            .collect_vec();
        assert_eq!(relations, vec![50, 52]);
    }

    #[test]
    fn test_non_rectangular_query_uses_precise_geometry() {
        let atlas = fixtures::neighborhood_atlas();
        // bounds cover point 40 at (0.5, 0.5), the triangle itself does not
        let triangle = geo::polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 0.8)];
        assert_eq!(atlas.points_within(&triangle).len(), 0);
        let rectangle = Rectangle::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        assert_eq!(atlas.points_within(&rectangle.to_polygon()).len(), 1);
    }

    #[test]
    fn test_snaps_are_sorted() {
        let atlas = fixtures::neighborhood_atlas();
        let snaps = atlas.snaps(&point!(x: 1.5, y: 0.2), 0.3);
        let ids = snaps.iter().map(|s| s.edge_id.0).collect_vec();
        assert_eq!(ids, vec![-11, 11]);
        assert!((snaps[0].distance - 0.2).abs() < 1e-9);
        let best = atlas.snapped(&point!(x: 1.5, y: 0.2), 0.3).expect("snap");
        assert_eq!(best.edge_id, EntityId(-11));
        assert!(atlas.snapped(&point!(x: 50.0, y: 50.0), 1.0).is_none());
    }

    #[test]
    fn test_packed_atlas_equality() {
        assert_eq!(fixtures::neighborhood_atlas(), fixtures::neighborhood_atlas());
        assert_ne!(fixtures::neighborhood_atlas(), fixtures::two_node_atlas());
    }
}
