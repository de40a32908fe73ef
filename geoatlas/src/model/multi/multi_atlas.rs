use crate::model::{
    atlas::{Atlas, AtlasMetadata, AtlasSize, Records},
    entity::{
        AreaRecord, EdgeRecord, EntityId, EntityKind, EntityRef, LineRecord, NodeRecord,
        PointRecord, RelationRecord,
    },
    index::SpatialIndices,
};
use itertools::Itertools;
use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

static MULTI_ATLAS_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// a single logical atlas over several underlying atlases (usually one per shard),
/// without copying any entity data.
///
/// lookups scan the underlying atlases in order and return the first match. iteration
/// concatenates the underlying iterations in order, skipping an entity when an earlier
/// atlas already holds the same (kind, identifier) pair, so an entity repeated on a shard
/// border is seen once. node connectivity and parent relations are the union across all
/// underlying atlases, which lets an edge in one shard reach nodes and edges in another.
pub struct MultiAtlas {
    name: String,
    atlases: Vec<Arc<dyn Atlas>>,
    metadata: AtlasMetadata,
    indices: SpatialIndices,
}

impl MultiAtlas {
    pub fn new(atlases: Vec<Arc<dyn Atlas>>) -> MultiAtlas {
        let count = MULTI_ATLAS_COUNTER.fetch_add(1, Ordering::SeqCst);
        let name = format!("multi-atlas-{count}");
        let mut multi = MultiAtlas {
            metadata: merged_metadata(&atlases, &name),
            name,
            atlases,
            indices: SpatialIndices::default(),
        };
        let size = multi.count_entities();
        multi.metadata.size = size;
        log::debug!(
            "composed atlas '{}' over {} atlases: {size}",
            multi.name,
            multi.atlases.len()
        );
        multi
    }

    pub fn with_name(mut self, name: &str) -> MultiAtlas {
        self.set_name(name);
        self
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = String::from(name);
        self.metadata.shard_name = Some(String::from(name));
    }

    pub fn atlases(&self) -> &[Arc<dyn Atlas>] {
        &self.atlases
    }

    fn count_entities(&self) -> AtlasSize {
        AtlasSize {
            nodes: self.nodes().count(),
            edges: self.edges().count(),
            areas: self.areas().count(),
            lines: self.lines().count(),
            points: self.points().count(),
            relations: self.relations().count(),
        }
    }

    /// concatenated records of one kind, each identifier taken from the first atlas holding it
    fn first_occurrences<'a, T, F>(
        &'a self,
        kind: EntityKind,
        records: F,
        id_of: fn(&T) -> EntityId,
    ) -> Records<'a, T>
    where
        T: 'a,
        F: Fn(&'a dyn Atlas) -> Records<'a, T> + 'a,
    {
        let atlases = &self.atlases;
        Box::new(
            atlases
                .iter()
                .enumerate()
                .flat_map(move |(index, atlas)| {
                    let earlier = &atlases[..index];
                    records(atlas.as_ref()).filter(move |record| {
                        let id = id_of(record);
                        !earlier.iter().any(|a| a.entity(id, kind).is_some())
                    })
                }),
        )
    }

    fn first<'a, T>(&'a self, lookup: impl Fn(&'a dyn Atlas) -> Option<&'a T>) -> Option<&'a T> {
        self.atlases.iter().find_map(|a| lookup(a.as_ref()))
    }

    fn union(&self, ids: impl Fn(&dyn Atlas) -> Vec<EntityId>) -> Vec<EntityId> {
        self.atlases
            .iter()
            .flat_map(|a| ids(a.as_ref()))
            .unique()
            .collect()
    }
}

impl Atlas for MultiAtlas {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn metadata(&self) -> &AtlasMetadata {
        &self.metadata
    }

    fn node(&self, id: EntityId) -> Option<&NodeRecord> {
        self.first(|a| a.node(id))
    }

    fn edge(&self, id: EntityId) -> Option<&EdgeRecord> {
        self.first(|a| a.edge(id))
    }

    fn area(&self, id: EntityId) -> Option<&AreaRecord> {
        self.first(|a| a.area(id))
    }

    fn line(&self, id: EntityId) -> Option<&LineRecord> {
        self.first(|a| a.line(id))
    }

    fn point(&self, id: EntityId) -> Option<&PointRecord> {
        self.first(|a| a.point(id))
    }

    fn relation(&self, id: EntityId) -> Option<&RelationRecord> {
        self.first(|a| a.relation(id))
    }

    fn nodes(&self) -> Records<'_, NodeRecord> {
        self.first_occurrences(EntityKind::Node, |a| a.nodes(), |r| r.id)
    }

    fn edges(&self) -> Records<'_, EdgeRecord> {
        self.first_occurrences(EntityKind::Edge, |a| a.edges(), |r| r.id)
    }

    fn areas(&self) -> Records<'_, AreaRecord> {
        self.first_occurrences(EntityKind::Area, |a| a.areas(), |r| r.id)
    }

    fn lines(&self) -> Records<'_, LineRecord> {
        self.first_occurrences(EntityKind::Line, |a| a.lines(), |r| r.id)
    }

    fn points(&self) -> Records<'_, PointRecord> {
        self.first_occurrences(EntityKind::Point, |a| a.points(), |r| r.id)
    }

    fn relations(&self) -> Records<'_, RelationRecord> {
        self.first_occurrences(EntityKind::Relation, |a| a.relations(), |r| r.id)
    }

    fn node_in_edge_ids(&self, node: EntityId) -> Vec<EntityId> {
        self.union(|a| a.node_in_edge_ids(node))
    }

    fn node_out_edge_ids(&self, node: EntityId) -> Vec<EntityId> {
        self.union(|a| a.node_out_edge_ids(node))
    }

    fn parent_relation_ids(&self, member: &EntityRef) -> Vec<EntityId> {
        self.union(|a| a.parent_relation_ids(member))
    }

    fn spatial_indices(&self) -> &SpatialIndices {
        &self.indices
    }
}

impl Debug for MultiAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.atlases.iter().map(|a| a.name()).join(", ");
        write!(f, "MultiAtlas({}: [{}])", self.name, names)
    }
}

/// metadata of the composed view, which is never original. a value shared by every
/// underlying atlas is kept, differing values collapse to unknown. tags are merged,
/// earlier atlases winning.
fn merged_metadata(atlases: &[Arc<dyn Atlas>], name: &str) -> AtlasMetadata {
    let shared = |value: fn(&AtlasMetadata) -> Option<String>| -> Option<String> {
        let values = atlases.iter().map(|a| value(a.metadata())).unique().collect_vec();
        match values.as_slice() {
            [single] => single.clone(),
            _ => None,
        }
    };
    let mut tags = std::collections::HashMap::new();
    for atlas in atlases.iter() {
        for (k, v) in atlas.metadata().tags.iter() {
            tags.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
    AtlasMetadata {
        original: false,
        country: shared(|m| m.country.clone()),
        shard_name: Some(String::from(name)),
        data_version: shared(|m| Some(m.data_version.clone()))
            .unwrap_or_else(|| String::from(AtlasMetadata::UNKNOWN)),
        tags,
        ..AtlasMetadata::default()
    }
}
