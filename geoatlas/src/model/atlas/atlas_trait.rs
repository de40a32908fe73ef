use super::{equality_ops, relation_ops, spatial_query_ops, AtlasMetadata, AtlasSize, PackedAtlas};
use crate::algorithm::{
    extraction::{sub_atlas_ops, CutType, EntitySelector},
    ordering,
};
use crate::config::SubAtlasConfiguration;
use crate::model::{
    codec::AtlasFormat,
    entity::{
        AreaRecord, EdgeRecord, Entity, EntityId, EntityKind, EntityRef, LineRecord, NodeRecord,
        PointRecord, RelationRecord,
    },
    geometry::{Location, Polygon, Rectangle, SnappedEdge},
    index::{SpatialIndex, SpatialIndices},
    AtlasError,
};
use itertools::Itertools;
use std::path::Path;

pub type Records<'a, T> = Box<dyn Iterator<Item = &'a T> + 'a>;

/// read-only access to an immutable entity graph.
///
/// implementors provide storage lookups; every query, ordering and extraction
/// operation is built on top of those lookups, so a composed view and a concrete
/// atlas answer them the same way. iteration follows storage order and each call
/// returns a fresh iterator.
pub trait Atlas: Send + Sync {
    fn name(&self) -> String;

    fn metadata(&self) -> &AtlasMetadata;

    fn node(&self, id: EntityId) -> Option<&NodeRecord>;
    fn edge(&self, id: EntityId) -> Option<&EdgeRecord>;
    fn area(&self, id: EntityId) -> Option<&AreaRecord>;
    fn line(&self, id: EntityId) -> Option<&LineRecord>;
    fn point(&self, id: EntityId) -> Option<&PointRecord>;
    fn relation(&self, id: EntityId) -> Option<&RelationRecord>;

    fn nodes(&self) -> Records<'_, NodeRecord>;
    fn edges(&self) -> Records<'_, EdgeRecord>;
    fn areas(&self) -> Records<'_, AreaRecord>;
    fn lines(&self) -> Records<'_, LineRecord>;
    fn points(&self) -> Records<'_, PointRecord>;
    fn relations(&self) -> Records<'_, RelationRecord>;

    /// identifiers of the edges ending at a node
    fn node_in_edge_ids(&self, node: EntityId) -> Vec<EntityId>;

    /// identifiers of the edges starting at a node
    fn node_out_edge_ids(&self, node: EntityId) -> Vec<EntityId>;

    /// identifiers of the relations listing `member` as one of their members
    fn parent_relation_ids(&self, member: &EntityRef) -> Vec<EntityId>;

    fn spatial_indices(&self) -> &SpatialIndices;

    /// writes this atlas to a file. only concrete storage can be saved; views fail
    /// with [`AtlasError::UnsupportedSave`].
    fn save(&self, path: &Path, format: AtlasFormat) -> Result<(), AtlasError> {
        log::error!(
            "refusing to save atlas '{}' to {} as {format}",
            self.name(),
            path.to_string_lossy()
        );
        Err(AtlasError::UnsupportedSave(self.name()))
    }

    fn size(&self) -> AtlasSize {
        self.metadata().size
    }

    fn number_of_nodes(&self) -> usize {
        self.size().nodes
    }

    fn number_of_edges(&self) -> usize {
        self.size().edges
    }

    fn number_of_areas(&self) -> usize {
        self.size().areas
    }

    fn number_of_lines(&self) -> usize {
        self.size().lines
    }

    fn number_of_points(&self) -> usize {
        self.size().points
    }

    fn number_of_relations(&self) -> usize {
        self.size().relations
    }

    fn entity(&self, id: EntityId, kind: EntityKind) -> Option<Entity<'_>> {
        match kind {
            EntityKind::Node => self.node(id).map(Entity::Node),
            EntityKind::Edge => self.edge(id).map(Entity::Edge),
            EntityKind::Area => self.area(id).map(Entity::Area),
            EntityKind::Line => self.line(id).map(Entity::Line),
            EntityKind::Point => self.point(id).map(Entity::Point),
            EntityKind::Relation => self.relation(id).map(Entity::Relation),
        }
    }

    fn resolve(&self, entity: &EntityRef) -> Option<Entity<'_>> {
        self.entity(entity.id, entity.kind)
    }

    fn contains(&self, entity: &EntityRef) -> bool {
        self.resolve(entity).is_some()
    }

    fn entities(&self, kind: EntityKind) -> Box<dyn Iterator<Item = Entity<'_>> + '_> {
        match kind {
            EntityKind::Node => Box::new(self.nodes().map(Entity::Node)),
            EntityKind::Edge => Box::new(self.edges().map(Entity::Edge)),
            EntityKind::Area => Box::new(self.areas().map(Entity::Area)),
            EntityKind::Line => Box::new(self.lines().map(Entity::Line)),
            EntityKind::Point => Box::new(self.points().map(Entity::Point)),
            EntityKind::Relation => Box::new(self.relations().map(Entity::Relation)),
        }
    }

    fn in_edges(&self, node: EntityId) -> Vec<&EdgeRecord> {
        self.node_in_edge_ids(node)
            .into_iter()
            .filter_map(|id| self.edge(id))
            .collect()
    }

    fn out_edges(&self, node: EntityId) -> Vec<&EdgeRecord> {
        self.node_out_edge_ids(node)
            .into_iter()
            .filter_map(|id| self.edge(id))
            .collect()
    }

    /// in and out edges of a node, each listed once
    fn connected_edges(&self, node: EntityId) -> Vec<&EdgeRecord> {
        self.node_in_edge_ids(node)
            .into_iter()
            .chain(self.node_out_edge_ids(node))
            .unique()
            .filter_map(|id| self.edge(id))
            .collect()
    }

    fn start_node(&self, edge: &EdgeRecord) -> Option<&NodeRecord> {
        self.node(edge.start_node)
    }

    fn end_node(&self, edge: &EdgeRecord) -> Option<&NodeRecord> {
        self.node(edge.end_node)
    }

    /// the opposite direction of a two-way edge, if present
    fn reversed_edge(&self, edge: &EdgeRecord) -> Option<&EdgeRecord> {
        edge.id.reversed().and_then(|id| self.edge(id))
    }

    fn relations_containing(&self, member: &EntityRef) -> Vec<&RelationRecord> {
        self.parent_relation_ids(member)
            .into_iter()
            .filter_map(|id| self.relation(id))
            .collect()
    }

    /// resolved members of a relation paired with their role. unresolvable members are skipped.
    fn members<'a>(&'a self, relation: &'a RelationRecord) -> Vec<(Entity<'a>, &'a str)> {
        relation
            .members
            .iter()
            .filter_map(|m| self.resolve(&m.entity).map(|e| (e, m.role.as_str())))
            .collect()
    }

    /// bounds of any entity. relations are bounded by the union of their members.
    fn bounds(&self, entity: &Entity<'_>) -> Option<Rectangle> {
        match entity {
            Entity::Node(n) => Some(n.bounds()),
            Entity::Edge(e) => e.bounds(),
            Entity::Area(a) => a.bounds(),
            Entity::Line(l) => l.bounds(),
            Entity::Point(p) => Some(p.bounds()),
            Entity::Relation(r) => relation_ops::relation_bounds(self, r),
        }
    }

    /// the spatial index of one entity kind, built on first request
    fn spatial_index(&self, kind: EntityKind) -> &SpatialIndex {
        self.spatial_indices()
            .get_or_build(kind, || spatial_query_ops::build_index(self, kind))
    }

    fn nodes_within(&self, polygon: &Polygon) -> Vec<&NodeRecord> {
        spatial_query_ops::nodes_within(self, polygon)
    }

    fn nodes_at(&self, location: &Location) -> Vec<&NodeRecord> {
        spatial_query_ops::nodes_at(self, location)
    }

    fn points_within(&self, polygon: &Polygon) -> Vec<&PointRecord> {
        spatial_query_ops::points_within(self, polygon)
    }

    fn points_at(&self, location: &Location) -> Vec<&PointRecord> {
        spatial_query_ops::points_at(self, location)
    }

    fn edges_intersecting(&self, polygon: &Polygon) -> Vec<&EdgeRecord> {
        spatial_query_ops::edges_intersecting(self, polygon)
    }

    fn edges_within(&self, polygon: &Polygon) -> Vec<&EdgeRecord> {
        spatial_query_ops::edges_within(self, polygon)
    }

    fn edges_containing(&self, location: &Location) -> Vec<&EdgeRecord> {
        spatial_query_ops::edges_containing(self, location)
    }

    fn lines_intersecting(&self, polygon: &Polygon) -> Vec<&LineRecord> {
        spatial_query_ops::lines_intersecting(self, polygon)
    }

    fn lines_within(&self, polygon: &Polygon) -> Vec<&LineRecord> {
        spatial_query_ops::lines_within(self, polygon)
    }

    fn lines_containing(&self, location: &Location) -> Vec<&LineRecord> {
        spatial_query_ops::lines_containing(self, location)
    }

    fn areas_intersecting(&self, polygon: &Polygon) -> Vec<&AreaRecord> {
        spatial_query_ops::areas_intersecting(self, polygon)
    }

    fn areas_within(&self, polygon: &Polygon) -> Vec<&AreaRecord> {
        spatial_query_ops::areas_within(self, polygon)
    }

    fn areas_covering(&self, location: &Location) -> Vec<&AreaRecord> {
        spatial_query_ops::areas_covering(self, location)
    }

    fn relations_intersecting(&self, polygon: &Polygon) -> Vec<&RelationRecord> {
        spatial_query_ops::relations_intersecting(self, polygon)
    }

    /// every relation, emitted after all of its relation members
    fn relations_lower_order_first(&self) -> Vec<&RelationRecord> {
        ordering::lower_order_first(self.relations(), ordering::DEFAULT_RELATION_PASS_CEILING)
            .relations
    }

    /// the closest edge snap within `threshold` of `location`
    fn snapped(&self, location: &Location, threshold: f64) -> Option<SnappedEdge> {
        spatial_query_ops::snaps(self, location, threshold)
            .into_iter()
            .next()
    }

    /// every edge snap within `threshold` of `location`, by distance then edge identifier
    fn snaps(&self, location: &Location, threshold: f64) -> Vec<SnappedEdge> {
        spatial_query_ops::snaps(self, location, threshold)
    }

    /// extracts the entities matching a boundary. `Ok(None)` when nothing is selected.
    fn sub_atlas(
        &self,
        boundary: &Polygon,
        cut_type: CutType,
    ) -> Result<Option<PackedAtlas>, AtlasError> {
        let config = SubAtlasConfiguration::from(cut_type);
        sub_atlas_ops::extract(self, &EntitySelector::Boundary(boundary), &config)
    }

    /// extracts the entities matching a predicate. `Ok(None)` when nothing is selected.
    fn sub_atlas_matching(
        &self,
        predicate: &(dyn Fn(Entity<'_>) -> bool + Sync),
        cut_type: CutType,
    ) -> Result<Option<PackedAtlas>, AtlasError> {
        let config = SubAtlasConfiguration::from(cut_type);
        sub_atlas_ops::extract(self, &EntitySelector::Predicate(predicate), &config)
    }

    /// entity-by-entity comparison of identifiers, tags and geometry. expensive.
    fn same_entities_as(&self, other: &dyn Atlas) -> bool {
        equality_ops::differences(self, other).is_empty()
    }
}
