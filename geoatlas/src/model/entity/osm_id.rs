use super::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// identifier of the upstream OSM feature an entity was derived from. several
/// entities may share one [`OsmId`], for example when a way is sectioned into edges.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct OsmId(pub i64);

impl OsmId {
    /// sectioned identifiers carry a 6-digit sequence suffix after the OSM identifier
    pub const IDENTIFIER_PADDING: i64 = 1_000_000;
}

impl From<EntityId> for OsmId {
    fn from(id: EntityId) -> Self {
        let padded = id.0.unsigned_abs() / Self::IDENTIFIER_PADDING.unsigned_abs();
        // at most u64::MAX / 10^6, which fits an i64
        OsmId(padded as i64)
    }
}

impl Display for OsmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_is_removed() {
        assert_eq!(OsmId::from(EntityId(123_000_002)), OsmId(123));
        assert_eq!(OsmId::from(EntityId(-123_000_002)), OsmId(123));
        assert_eq!(OsmId::from(EntityId(42)), OsmId(0));
    }

    #[test]
    fn test_extreme_identifiers() {
        assert_eq!(OsmId::from(EntityId(i64::MIN)), OsmId(9_223_372_036_854));
        assert_eq!(OsmId::from(EntityId(i64::MAX)), OsmId(9_223_372_036_854));
    }
}
