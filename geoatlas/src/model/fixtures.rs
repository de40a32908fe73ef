use super::{
    atlas::{PackedAtlas, PackedAtlasBuilder},
    entity::{
        AreaRecord, EdgeRecord, EntityRef, LineRecord, NodeRecord, PointRecord, RelationMember,
        RelationRecord,
    },
    geometry::{Polygon, Rectangle},
};
use geo::{line_string, point, Coord};

pub fn square(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Polygon {
    Rectangle::new(Coord { x: min_x, y: min_y }, Coord { x: max_x, y: max_y }).to_polygon()
}

/// edge 100 from node 1 at (0, 0) to node 2 at (1, 1), inside relation 200
pub fn two_node_atlas() -> PackedAtlas {
    let mut builder = PackedAtlasBuilder::new();
    builder
        .add_node(NodeRecord::new(1, point!(x: 0.0, y: 0.0)))
        .expect("node 1");
    builder
        .add_node(NodeRecord::new(2, point!(x: 1.0, y: 1.0)))
        .expect("node 2");
    builder
        .add_edge(
            EdgeRecord::new(100, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)], 1, 2)
                .with_tag("highway", "residential"),
        )
        .expect("edge 100");
    builder
        .add_relation(
            RelationRecord::new(200, vec![RelationMember::new(EntityRef::edge(100), "via")])
                .with_tag("type", "restriction"),
        )
        .expect("relation 200");
    builder.build().expect("two node atlas")
}

/// a small street with surroundings:
///
/// - nodes 1..4 along y = 0 at x = 0..3, node 5 at (10, 10)
/// - two-way edges 10 (1-2) and 11 (2-3), one-way edges 12 (3-4) and 13 (4-5)
/// - area 20 around (0.5, 0.5), area 21 at (5..6, 5..6)
/// - line 30 along y = 1 from x = 0 to 2, line 31 from (8, 8) to (9, 9)
/// - point 40 at (0.5, 0.5), point 41 at (9, 9)
/// - relation 50 [edge 10, node 2, edge 11], 51 [area 21, point 41], 52 [50, 51]
/// - relations 53 [54, line 31] and 54 [53, point 41] reference each other
pub fn neighborhood_atlas() -> PackedAtlas {
    let mut builder = PackedAtlasBuilder::new();
    let nodes = [(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0), (4, 3.0, 0.0), (5, 10.0, 10.0)];
    for (id, x, y) in nodes {
        builder
            .add_node(NodeRecord::new(id, point!(x: x, y: y)))
            .expect("node");
    }
    builder
        .add_bidirectional_edge(
            EdgeRecord::new(10, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)], 1, 2)
                .with_tag("highway", "residential"),
        )
        .expect("edge 10");
    builder
        .add_bidirectional_edge(
            EdgeRecord::new(11, line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)], 2, 3)
                .with_tag("highway", "residential"),
        )
        .expect("edge 11");
    builder
        .add_edge(
            EdgeRecord::new(12, line_string![(x: 2.0, y: 0.0), (x: 3.0, y: 0.0)], 3, 4)
                .with_tag("highway", "primary")
                .with_tag("oneway", "yes"),
        )
        .expect("edge 12");
    builder
        .add_edge(EdgeRecord::new(
            13,
            line_string![(x: 3.0, y: 0.0), (x: 6.0, y: 4.0), (x: 10.0, y: 10.0)],
            4,
            5,
        ))
        .expect("edge 13");
    builder
        .add_area(AreaRecord::new(20, square(0.2, 0.2, 0.8, 0.8)).with_tag("building", "yes"))
        .expect("area 20");
    builder
        .add_area(AreaRecord::new(21, square(5.0, 5.0, 6.0, 6.0)).with_tag("leisure", "park"))
        .expect("area 21");
    builder
        .add_line(LineRecord::new(30, line_string![(x: 0.0, y: 1.0), (x: 2.0, y: 1.0)]))
        .expect("line 30");
    builder
        .add_line(LineRecord::new(31, line_string![(x: 8.0, y: 8.0), (x: 9.0, y: 9.0)]))
        .expect("line 31");
    builder
        .add_point(PointRecord::new(40, point!(x: 0.5, y: 0.5)).with_tag("amenity", "cafe"))
        .expect("point 40");
    builder
        .add_point(PointRecord::new(41, point!(x: 9.0, y: 9.0)))
        .expect("point 41");

    let relations = [
        RelationRecord::new(
            50,
            vec![
                RelationMember::new(EntityRef::edge(10), "from"),
                RelationMember::new(EntityRef::node(2), "via"),
                RelationMember::new(EntityRef::edge(11), "to"),
            ],
        )
        .with_tag("type", "restriction"),
        RelationRecord::new(
            51,
            vec![
                RelationMember::new(EntityRef::area(21), "outer"),
                RelationMember::new(EntityRef::point(41), "label"),
            ],
        ),
        RelationRecord::new(
            52,
            vec![
                RelationMember::new(EntityRef::relation(50), ""),
                RelationMember::new(EntityRef::relation(51), ""),
            ],
        )
        .with_tag("type", "collection"),
        RelationRecord::new(
            53,
            vec![
                RelationMember::new(EntityRef::relation(54), ""),
                RelationMember::new(EntityRef::line(31), "outer"),
            ],
        ),
        RelationRecord::new(
            54,
            vec![
                RelationMember::new(EntityRef::relation(53), ""),
                RelationMember::new(EntityRef::point(41), "label"),
            ],
        ),
    ];
    for relation in relations {
        builder.add_relation(relation).expect("relation");
    }
    builder.build().expect("neighborhood atlas")
}

/// covers nodes 1 and 2, edge 10, area 20, line 30 and point 40, and part of edge 11
pub fn neighborhood_boundary() -> Polygon {
    square(-0.5, -0.5, 1.5, 1.5)
}
