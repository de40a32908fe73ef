mod geometry_ops;
mod snapped_edge;

pub use geometry_ops::*;
pub use snapped_edge::SnappedEdge;

/// planar (longitude, latitude) position
pub type Location = geo::Point<f64>;
/// ordered, open sequence of locations
pub type PolyLine = geo::LineString<f64>;
/// closed ring with optional holes
pub type Polygon = geo::Polygon<f64>;
/// axis-aligned bounding box
pub type Rectangle = geo::Rect<f64>;
