use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// the six independent identifier namespaces of an atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Node,
    Edge,
    Area,
    Line,
    Point,
    Relation,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Node,
        EntityKind::Edge,
        EntityKind::Area,
        EntityKind::Line,
        EntityKind::Point,
        EntityKind::Relation,
    ];
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Node => write!(f, "node"),
            EntityKind::Edge => write!(f, "edge"),
            EntityKind::Area => write!(f, "area"),
            EntityKind::Line => write!(f, "line"),
            EntityKind::Point => write!(f, "point"),
            EntityKind::Relation => write!(f, "relation"),
        }
    }
}
