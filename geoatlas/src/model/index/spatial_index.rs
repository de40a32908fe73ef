use crate::model::{
    entity::{EntityId, EntityKind},
    geometry::Rectangle,
};
use rstar::primitives::{GeomWithData, Rectangle as Envelope};
use rstar::{RTree, AABB};

/// an index row: the stored bounding rectangle of an entity and its identifier
pub type IndexEntry = GeomWithData<Envelope<[f64; 2]>, EntityId>;

/// bounding-rectangle filter over the entities of a single kind.
///
/// results are candidates whose stored bounds overlap the query bounds. callers
/// that need exact overlap apply a precise geometry test to each candidate.
pub struct SpatialIndex {
    kind: EntityKind,
    tree: RTree<IndexEntry>,
}

impl SpatialIndex {
    pub fn new(kind: EntityKind) -> SpatialIndex {
        SpatialIndex {
            kind,
            tree: RTree::new(),
        }
    }

    /// bulk loads a complete index from (bounds, identifier) rows
    pub fn build(
        kind: EntityKind,
        rows: impl IntoIterator<Item = (Rectangle, EntityId)>,
    ) -> SpatialIndex {
        let entries = rows
            .into_iter()
            .map(|(bounds, id)| entry(&bounds, id))
            .collect::<Vec<_>>();
        SpatialIndex {
            kind,
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn add(&mut self, bounds: &Rectangle, id: EntityId) {
        self.tree.insert(entry(bounds, id));
    }

    /// identifiers of every entity whose stored bounds overlap `bounds`, edges touching included
    pub fn get(&self, bounds: &Rectangle) -> Vec<EntityId> {
        let envelope = AABB::from_corners(
            [bounds.min().x, bounds.min().y],
            [bounds.max().x, bounds.max().y],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|row| row.data)
            .collect()
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

fn entry(bounds: &Rectangle, id: EntityId) -> IndexEntry {
    let rect = Envelope::from_corners(
        [bounds.min().x, bounds.min().y],
        [bounds.max().x, bounds.max().y],
    );
    GeomWithData::new(rect, id)
}
