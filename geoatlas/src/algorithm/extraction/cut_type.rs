use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// how a sub-atlas extraction treats entities that reference something outside the selection
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutType {
    /// keeps every selected entity plus whatever it references: edge endpoints and,
    /// for each relation with a kept member, all of its members
    #[default]
    SoftCut,
    /// keeps only selected entities whose references are all kept as well. edges
    /// need both endpoints, relations need every member.
    HardCutAll,
    /// soft cut for everything but relations. a relation survives when at least one
    /// member is kept, and only its kept members remain in its member list.
    HardCutRelationsOnly,
}

impl Display for CutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CutType::SoftCut => write!(f, "soft cut"),
            CutType::HardCutAll => write!(f, "hard cut (all entities)"),
            CutType::HardCutRelationsOnly => write!(f, "hard cut (relations only)"),
        }
    }
}
