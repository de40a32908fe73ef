use super::{relation_ops, Atlas};
use crate::model::{
    entity::{
        AreaRecord, EdgeRecord, EntityId, EntityKind, LineRecord, NodeRecord, PointRecord,
        RelationRecord,
    },
    geometry::{self, Location, Polygon, Rectangle, SnappedEdge},
    index::SpatialIndex,
};
use geo::Intersects;
use itertools::Itertools;

/// builds the index of one entity kind by iterating every entity of that kind.
/// entities without usable bounds (empty geometry, member-less relations) are not indexed.
pub fn build_index<A: Atlas + ?Sized>(atlas: &A, kind: EntityKind) -> SpatialIndex {
    let rows: Vec<(Rectangle, EntityId)> = match kind {
        EntityKind::Node => atlas.nodes().map(|n| (n.bounds(), n.id)).collect(),
        EntityKind::Edge => atlas
            .edges()
            .filter_map(|e| e.bounds().map(|b| (b, e.id)))
            .collect(),
        EntityKind::Area => atlas
            .areas()
            .filter_map(|a| a.bounds().map(|b| (b, a.id)))
            .collect(),
        EntityKind::Line => atlas
            .lines()
            .filter_map(|l| l.bounds().map(|b| (b, l.id)))
            .collect(),
        EntityKind::Point => atlas.points().map(|p| (p.bounds(), p.id)).collect(),
        EntityKind::Relation => atlas
            .relations()
            .filter_map(|r| relation_ops::relation_bounds(atlas, r).map(|b| (b, r.id)))
            .collect(),
    };
    log::debug!(
        "building {kind} spatial index of atlas '{}' over {} entities",
        atlas.name(),
        rows.len()
    );
    SpatialIndex::build(kind, rows)
}

/// the query shape of a polygon search: its bounds for the index stage, and the
/// rectangle it describes when it is one.
struct Query<'a> {
    polygon: &'a Polygon,
    bounds: Rectangle,
    rectangle: Option<Rectangle>,
}

impl<'a> Query<'a> {
    fn new(polygon: &'a Polygon) -> Option<Query<'a>> {
        let bounds = geometry::polygon_bounds(polygon)?;
        Some(Query {
            polygon,
            bounds,
            rectangle: geometry::as_rectangle(polygon),
        })
    }

    /// true when the candidate bounds sit inside a rectangular query, which
    /// settles both overlap and enclosure of the candidate without a precise test
    fn settled_by_bounds(&self, candidate: Option<Rectangle>) -> bool {
        match (self.rectangle, candidate) {
            (Some(rect), Some(bounds)) => geometry::encloses(&rect, &bounds),
            _ => false,
        }
    }
}

fn candidates<A: Atlas + ?Sized>(atlas: &A, kind: EntityKind, bounds: &Rectangle) -> Vec<EntityId> {
    atlas.spatial_index(kind).get(bounds)
}

pub fn nodes_within<'a, A: Atlas + ?Sized>(atlas: &'a A, polygon: &Polygon) -> Vec<&'a NodeRecord> {
    let Some(query) = Query::new(polygon) else {
        return vec![];
    };
    candidates(atlas, EntityKind::Node, &query.bounds)
        .into_iter()
        .filter_map(|id| atlas.node(id))
        .filter(|n| {
            query.rectangle.is_some()
                || geometry::polygon_encloses_location(query.polygon, &n.location)
        })
        .collect()
}

pub fn nodes_at<'a, A: Atlas + ?Sized>(atlas: &'a A, location: &Location) -> Vec<&'a NodeRecord> {
    candidates(atlas, EntityKind::Node, &geometry::location_bounds(location))
        .into_iter()
        .filter_map(|id| atlas.node(id))
        .filter(|n| n.location == *location)
        .collect()
}

pub fn points_within<'a, A: Atlas + ?Sized>(
    atlas: &'a A,
    polygon: &Polygon,
) -> Vec<&'a PointRecord> {
    let Some(query) = Query::new(polygon) else {
        return vec![];
    };
    candidates(atlas, EntityKind::Point, &query.bounds)
        .into_iter()
        .filter_map(|id| atlas.point(id))
        .filter(|p| {
            query.rectangle.is_some()
                || geometry::polygon_encloses_location(query.polygon, &p.location)
        })
        .collect()
}

pub fn points_at<'a, A: Atlas + ?Sized>(atlas: &'a A, location: &Location) -> Vec<&'a PointRecord> {
    candidates(atlas, EntityKind::Point, &geometry::location_bounds(location))
        .into_iter()
        .filter_map(|id| atlas.point(id))
        .filter(|p| p.location == *location)
        .collect()
}

pub fn edges_intersecting<'a, A: Atlas + ?Sized>(
    atlas: &'a A,
    polygon: &Polygon,
) -> Vec<&'a EdgeRecord> {
    let Some(query) = Query::new(polygon) else {
        return vec![];
    };
    candidates(atlas, EntityKind::Edge, &query.bounds)
        .into_iter()
        .filter_map(|id| atlas.edge(id))
        .filter(|e| {
            query.settled_by_bounds(e.bounds())
                || geometry::polygon_overlaps_polyline(query.polygon, &e.polyline)
        })
        .collect()
}

pub fn edges_within<'a, A: Atlas + ?Sized>(atlas: &'a A, polygon: &Polygon) -> Vec<&'a EdgeRecord> {
    let Some(query) = Query::new(polygon) else {
        return vec![];
    };
    candidates(atlas, EntityKind::Edge, &query.bounds)
        .into_iter()
        .filter_map(|id| atlas.edge(id))
        .filter(|e| geometry::polygon_encloses_polyline(query.polygon, &e.polyline))
        .collect()
}

pub fn edges_containing<'a, A: Atlas + ?Sized>(
    atlas: &'a A,
    location: &Location,
) -> Vec<&'a EdgeRecord> {
    candidates(atlas, EntityKind::Edge, &geometry::location_bounds(location))
        .into_iter()
        .filter_map(|id| atlas.edge(id))
        .filter(|e| e.polyline.intersects(location))
        .collect()
}

pub fn lines_intersecting<'a, A: Atlas + ?Sized>(
    atlas: &'a A,
    polygon: &Polygon,
) -> Vec<&'a LineRecord> {
    let Some(query) = Query::new(polygon) else {
        return vec![];
    };
    candidates(atlas, EntityKind::Line, &query.bounds)
        .into_iter()
        .filter_map(|id| atlas.line(id))
        .filter(|l| {
            query.settled_by_bounds(l.bounds())
                || geometry::polygon_overlaps_polyline(query.polygon, &l.polyline)
        })
        .collect()
}

pub fn lines_within<'a, A: Atlas + ?Sized>(atlas: &'a A, polygon: &Polygon) -> Vec<&'a LineRecord> {
    let Some(query) = Query::new(polygon) else {
        return vec![];
    };
    candidates(atlas, EntityKind::Line, &query.bounds)
        .into_iter()
        .filter_map(|id| atlas.line(id))
        .filter(|l| geometry::polygon_encloses_polyline(query.polygon, &l.polyline))
        .collect()
}

pub fn lines_containing<'a, A: Atlas + ?Sized>(
    atlas: &'a A,
    location: &Location,
) -> Vec<&'a LineRecord> {
    candidates(atlas, EntityKind::Line, &geometry::location_bounds(location))
        .into_iter()
        .filter_map(|id| atlas.line(id))
        .filter(|l| l.polyline.intersects(location))
        .collect()
}

pub fn areas_intersecting<'a, A: Atlas + ?Sized>(
    atlas: &'a A,
    polygon: &Polygon,
) -> Vec<&'a AreaRecord> {
    let Some(query) = Query::new(polygon) else {
        return vec![];
    };
    candidates(atlas, EntityKind::Area, &query.bounds)
        .into_iter()
        .filter_map(|id| atlas.area(id))
        .filter(|a| {
            query.settled_by_bounds(a.bounds())
                || geometry::polygon_overlaps_polygon(query.polygon, &a.polygon)
        })
        .collect()
}

pub fn areas_within<'a, A: Atlas + ?Sized>(atlas: &'a A, polygon: &Polygon) -> Vec<&'a AreaRecord> {
    let Some(query) = Query::new(polygon) else {
        return vec![];
    };
    candidates(atlas, EntityKind::Area, &query.bounds)
        .into_iter()
        .filter_map(|id| atlas.area(id))
        .filter(|a| geometry::polygon_encloses_polygon(query.polygon, &a.polygon))
        .collect()
}

pub fn areas_covering<'a, A: Atlas + ?Sized>(
    atlas: &'a A,
    location: &Location,
) -> Vec<&'a AreaRecord> {
    candidates(atlas, EntityKind::Area, &geometry::location_bounds(location))
        .into_iter()
        .filter_map(|id| atlas.area(id))
        .filter(|a| geometry::polygon_encloses_location(&a.polygon, location))
        .collect()
}

pub fn relations_intersecting<'a, A: Atlas + ?Sized>(
    atlas: &'a A,
    polygon: &Polygon,
) -> Vec<&'a RelationRecord> {
    let Some(query) = Query::new(polygon) else {
        return vec![];
    };
    candidates(atlas, EntityKind::Relation, &query.bounds)
        .into_iter()
        .filter_map(|id| atlas.relation(id))
        .filter(|r| relation_ops::relation_intersects(atlas, r, query.polygon))
        .collect()
}

/// snaps `location` onto every edge found within `threshold`, closest first
pub fn snaps<A: Atlas + ?Sized>(atlas: &A, location: &Location, threshold: f64) -> Vec<SnappedEdge> {
    let search = geometry::box_around(location, threshold);
    candidates(atlas, EntityKind::Edge, &search)
        .into_iter()
        .filter_map(|id| atlas.edge(id))
        .filter_map(|edge| {
            let (snapped, distance) = geometry::snap_to(location, &edge.polyline)?;
            (distance <= threshold).then(|| SnappedEdge {
                edge_id: edge.id,
                origin: *location,
                snapped,
                distance,
            })
        })
        .sorted_by(|a, b| a.compare(b))
        .collect()
}
