use crate::model::{
    atlas::{Atlas, AtlasMetadata, PackedAtlas, PackedAtlasBuilder},
    entity::{AreaRecord, EdgeRecord, LineRecord, NodeRecord, PointRecord, RelationRecord},
    AtlasError,
};
use kdam::tqdm;
use serde::{Deserialize, Serialize};

/// file representation of an atlas: its metadata and the records of each kind in
/// iteration order. derived connectivity is not stored and is rebuilt on load.
#[derive(Debug, Serialize, Deserialize)]
pub struct PackedAtlasSerializable {
    pub metadata: AtlasMetadata,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub areas: Vec<AreaRecord>,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
    #[serde(default)]
    pub points: Vec<PointRecord>,
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
}

impl PackedAtlasSerializable {
    pub fn from_atlas<A: Atlas + ?Sized>(atlas: &A) -> PackedAtlasSerializable {
        PackedAtlasSerializable {
            metadata: atlas.metadata().clone(),
            nodes: atlas.nodes().cloned().collect(),
            edges: atlas.edges().cloned().collect(),
            areas: atlas.areas().cloned().collect(),
            lines: atlas.lines().cloned().collect(),
            points: atlas.points().cloned().collect(),
            relations: atlas.relations().cloned().collect(),
        }
    }

    /// rebuilds the atlas, running every construction check again
    pub fn into_atlas(self) -> Result<PackedAtlas, AtlasError> {
        let mut builder = PackedAtlasBuilder::new().with_metadata(self.metadata);
        let total = self.nodes.len() + self.edges.len();
        let graph_iter = tqdm!(
            self.nodes
                .into_iter()
                .map(Record::Node)
                .chain(self.edges.into_iter().map(Record::Edge)),
            desc = "atlas graph",
            total = total
        );
        for record in graph_iter {
            match record {
                Record::Node(node) => builder.add_node(node)?,
                Record::Edge(edge) => builder.add_edge(edge)?,
            }
        }
        eprintln!();
        for area in self.areas.into_iter() {
            builder.add_area(area)?;
        }
        for line in self.lines.into_iter() {
            builder.add_line(line)?;
        }
        for point in self.points.into_iter() {
            builder.add_point(point)?;
        }
        for relation in self.relations.into_iter() {
            builder.add_relation(relation)?;
        }
        builder.build()
    }
}

enum Record {
    Node(NodeRecord),
    Edge(EdgeRecord),
}
