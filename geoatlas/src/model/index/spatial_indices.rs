use super::SpatialIndex;
use crate::model::entity::EntityKind;
use std::fmt::Debug;
use std::sync::OnceLock;

/// the six lazily built, per-kind spatial indices of an atlas.
///
/// every kind has its own one-time cell. a reader of a built cell takes no lock;
/// concurrent first readers of the same kind wait for a single build, which runs
/// into a local index that is only published once complete. building one kind
/// never blocks readers or builders of another kind.
#[derive(Default)]
pub struct SpatialIndices {
    nodes: OnceLock<SpatialIndex>,
    edges: OnceLock<SpatialIndex>,
    areas: OnceLock<SpatialIndex>,
    lines: OnceLock<SpatialIndex>,
    points: OnceLock<SpatialIndex>,
    relations: OnceLock<SpatialIndex>,
}

impl SpatialIndices {
    pub fn get_or_build(
        &self,
        kind: EntityKind,
        build: impl FnOnce() -> SpatialIndex,
    ) -> &SpatialIndex {
        self.cell(kind).get_or_init(build)
    }

    pub fn get(&self, kind: EntityKind) -> Option<&SpatialIndex> {
        self.cell(kind).get()
    }

    pub fn is_built(&self, kind: EntityKind) -> bool {
        self.get(kind).is_some()
    }

    fn cell(&self, kind: EntityKind) -> &OnceLock<SpatialIndex> {
        match kind {
            EntityKind::Node => &self.nodes,
            EntityKind::Edge => &self.edges,
            EntityKind::Area => &self.areas,
            EntityKind::Line => &self.lines,
            EntityKind::Point => &self.points,
            EntityKind::Relation => &self.relations,
        }
    }
}

impl Debug for SpatialIndices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let built = EntityKind::ALL
            .iter()
            .filter(|k| self.is_built(**k))
            .map(|k| k.to_string())
            .collect::<Vec<_>>();
        write!(f, "SpatialIndices(built: [{}])", built.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::EntityId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_concurrent_first_use_builds_once() {
        let indices = SpatialIndices::default();
        let builds = AtomicUsize::new(0);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let index = indices.get_or_build(EntityKind::Node, || {
                        builds.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(std::time::Duration::from_millis(20));
                        let mut index = SpatialIndex::new(EntityKind::Node);
                        for i in 0..100 {
                            let location = geo::Point::new(i as f64, i as f64);
                            index.add(&crate::model::geometry::location_bounds(&location), EntityId(i));
                        }
                        index
                    });
                    assert_eq!(index.len(), 100, "readers only ever see a complete index");
                });
            }
        });
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(indices.is_built(EntityKind::Node));
        assert!(!indices.is_built(EntityKind::Edge));
    }
}
