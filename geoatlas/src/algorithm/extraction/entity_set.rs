use crate::model::entity::{EntityId, EntityKind, EntityRef};
use std::collections::HashSet;

/// a set of (kind, identifier) pairs
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntitySet(HashSet<EntityRef>);

impl EntitySet {
    pub fn new() -> EntitySet {
        EntitySet::default()
    }

    /// true if the entity was not yet present
    pub fn insert(&mut self, entity: EntityRef) -> bool {
        self.0.insert(entity)
    }

    pub fn contains(&self, entity: &EntityRef) -> bool {
        self.0.contains(entity)
    }

    pub fn contains_id(&self, kind: EntityKind, id: EntityId) -> bool {
        self.0.contains(&EntityRef::new(kind, id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.0.iter().filter(|e| e.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityRef> + '_ {
        self.0.iter()
    }

    /// identifiers of one kind, in no particular order
    pub fn ids(&self, kind: EntityKind) -> impl Iterator<Item = EntityId> + '_ {
        self.0.iter().filter(move |e| e.kind == kind).map(|e| e.id)
    }
}

impl Extend<EntityRef> for EntitySet {
    fn extend<T: IntoIterator<Item = EntityRef>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl FromIterator<EntityRef> for EntitySet {
    fn from_iter<T: IntoIterator<Item = EntityRef>>(iter: T) -> Self {
        EntitySet(iter.into_iter().collect())
    }
}
