//! In-memory geometry model.
//!
//! A [`GeometryCollection`] owns points, linestrings and polygons that all share one
//! [`Dimension`]. Coordinates live in flat [`CoordinateArray`] buffers and are read
//! and written through the parametric [`Vertex`] accessor.

mod collection;
mod coords;
mod dimension;
mod linestring;
mod mbr;
mod nodes;
mod point;
mod polygon;
mod sanitize;
mod toxic;
mod transform;
mod types;
mod wkt;

pub use collection::GeometryCollection;
pub use coords::{CoordinateArray, Vertices, VerticesMut};
pub use dimension::{Dimension, Vertex};
pub use linestring::{Linestring, Ring};
pub use mbr::Mbr;
pub use nodes::lines_cut_at_nodes;
pub use point::Point;
pub use polygon::{Polygon, PolygonMut};
pub use sanitize::sanitize;
pub use toxic::{is_toxic, toxic_reason, ToxicReason};
pub use types::GeometryType;
