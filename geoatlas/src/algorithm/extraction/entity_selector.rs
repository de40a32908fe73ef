use crate::model::{entity::Entity, geometry::Polygon};

/// the entities a sub-atlas starts from
#[derive(Clone, Copy)]
pub enum EntitySelector<'a> {
    /// nodes and points enclosed by the polygon (boundary included), edges, lines and
    /// areas overlapping it, and relations with any such entity beneath them
    Boundary(&'a Polygon),
    /// entities for which the predicate holds. evaluated in parallel.
    Predicate(&'a (dyn Fn(Entity<'_>) -> bool + Sync)),
}

impl std::fmt::Debug for EntitySelector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntitySelector::Boundary(polygon) => write!(f, "Boundary({polygon:?})"),
            EntitySelector::Predicate(_) => write!(f, "Predicate"),
        }
    }
}
