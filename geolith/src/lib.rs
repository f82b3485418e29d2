//! # Geolith - Geometry Core for an Embedded Spatial Extension
//!
//! Geolith holds the in-memory geometry model used by the spatial extension and the
//! binary blob format those geometries are stored in. The relation and algorithm layer
//! that talks to GEOS lives in the `geolith_geos` crate and builds on the types here.
//!
//! ## Key Features
//!
//! - **Dimension Models**: XY, XYZ, XYM and XYZM geometries with one parametric vertex accessor
//! - **Geometry Collections**: points, linestrings and polygons kept in insertion order
//! - **Declared Types**: a nominal single/multi kind independent of element cardinality
//! - **Blob Codec**: self-describing binary encoding with a stable 46-byte signature prefix
//! - **Compressed Blobs**: optional delta-encoded vertices for linestrings and rings
//! - **Toxic Checks**: detection of degenerate geometries before they reach the engine
//! - **SQL Helpers**: name validation and quoting for dynamically built SQL
//!
//! ## Quick Start
//!
//! ```rust
//! use geolith::codec::{deserialize, serialize};
//! use geolith::geometry::{GeometryCollection, GeometryType, Vertex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut geom = GeometryCollection::new_xy();
//! geom.set_srid(4326);
//! geom.add_point_xy(10.0, 20.0)?;
//! geom.set_declared_type(GeometryType::MultiPoint);
//!
//! let blob = serialize(&geom)?;
//! let decoded = deserialize(&blob)?;
//! assert_eq!(decoded.declared_type(), GeometryType::MultiPoint);
//! assert_eq!(decoded.point(0)?.vertex(), Vertex::xy(10.0, 20.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`geometry`] - Geometry model, MBRs, measures, transforms and toxic checks
//! - [`codec`] - Blob serialization, header parsing and signatures
//! - [`config`] - Codec configuration
//! - [`errors`] - Error types and result definitions
//! - [`sql`] - SQL name validation and quoting helpers

pub mod codec;
pub mod common;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod sql;

pub use common::*;
pub use errors::{ErrorKind, GeoError, GeoResult};
