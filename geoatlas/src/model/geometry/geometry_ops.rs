use super::{Location, PolyLine, Polygon, Rectangle};
use geo::{BoundingRect, Closest, ClosestPoint, Contains, Coord, Intersects};
use itertools::Itertools;

/// degenerate rectangle sitting on a single location
pub fn location_bounds(location: &Location) -> Rectangle {
    Rectangle::new(location.0, location.0)
}

pub fn polyline_bounds(polyline: &PolyLine) -> Option<Rectangle> {
    polyline.bounding_rect()
}

pub fn polygon_bounds(polygon: &Polygon) -> Option<Rectangle> {
    polygon.bounding_rect()
}

/// smallest rectangle covering both inputs
pub fn combine(a: &Rectangle, b: &Rectangle) -> Rectangle {
    Rectangle::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

/// rectangle overlap, touching edges included
pub fn overlaps(a: &Rectangle, b: &Rectangle) -> bool {
    a.min().x <= b.max().x
        && b.min().x <= a.max().x
        && a.min().y <= b.max().y
        && b.min().y <= a.max().y
}

/// true when `inner` lies entirely inside `outer`, boundary included
pub fn encloses(outer: &Rectangle, inner: &Rectangle) -> bool {
    outer.min().x <= inner.min().x
        && outer.min().y <= inner.min().y
        && inner.max().x <= outer.max().x
        && inner.max().y <= outer.max().y
}

/// square box centered on `location` extended by `distance` in each direction
pub fn box_around(location: &Location, distance: f64) -> Rectangle {
    let d = distance.abs();
    Rectangle::new(
        Coord {
            x: location.x() - d,
            y: location.y() - d,
        },
        Coord {
            x: location.x() + d,
            y: location.y() + d,
        },
    )
}

/// returns the rectangle described by this polygon if it is an axis-aligned
/// rectangle without holes.
pub fn as_rectangle(polygon: &Polygon) -> Option<Rectangle> {
    if !polygon.interiors().is_empty() {
        return None;
    }
    let bounds = polygon.bounding_rect()?;
    let coords = polygon.exterior().0.iter().collect_vec();
    let corners = coords.iter().unique_by(|c| (c.x.to_bits(), c.y.to_bits())).count();
    if corners != 4 {
        return None;
    }
    let on_corner = |c: &Coord<f64>| {
        (c.x == bounds.min().x || c.x == bounds.max().x)
            && (c.y == bounds.min().y || c.y == bounds.max().y)
    };
    let axis_aligned = coords
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.x == b.x || a.y == b.y);
    if coords.iter().all(|c| on_corner(c)) && axis_aligned {
        Some(bounds)
    } else {
        None
    }
}

/// boundary-inclusive enclosure test for point-like entities
pub fn polygon_encloses_location(polygon: &Polygon, location: &Location) -> bool {
    polygon.intersects(location)
}

pub fn polygon_overlaps_polyline(polygon: &Polygon, polyline: &PolyLine) -> bool {
    polygon.intersects(polyline)
}

pub fn polygon_overlaps_polygon(polygon: &Polygon, other: &Polygon) -> bool {
    polygon.intersects(other)
}

pub fn polygon_encloses_polyline(polygon: &Polygon, polyline: &PolyLine) -> bool {
    polygon.contains(polyline)
}

pub fn polygon_encloses_polygon(polygon: &Polygon, other: &Polygon) -> bool {
    polygon.contains(other)
}

/// nearest location on `polyline` to `origin`, with the planar distance to it
pub fn snap_to(origin: &Location, polyline: &PolyLine) -> Option<(Location, f64)> {
    match polyline.closest_point(origin) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => Some((p, planar_distance(origin, &p))),
        Closest::Indeterminate => None,
    }
}

pub fn planar_distance(a: &Location, b: &Location) -> f64 {
    (a.x() - b.x()).hypot(a.y() - b.y())
}
