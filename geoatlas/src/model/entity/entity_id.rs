use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// identifier of an atlas entity. unique within one atlas for a given [`super::EntityKind`].
///
/// edges come in pairs: the reverse direction of edge `n` is edge `-n`, and the
/// positive identifier is considered the "main" edge.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct EntityId(pub i64);

impl EntityId {
    /// identifier of the opposite direction of an edge. `0` and `i64::MIN` have no
    /// distinct negation, so edges carrying them have no reverse.
    pub fn reversed(&self) -> Option<EntityId> {
        self.0
            .checked_neg()
            .filter(|negated| *negated != self.0)
            .map(EntityId)
    }

    pub fn is_main(&self) -> bool {
        self.0 > 0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId(value)
    }
}
