//! # Geolith GEOS - Spatial Relations for Geolith Geometries
//!
//! This crate evaluates spatial predicates, measures and derived geometries over
//! [`geolith`] collections using the GEOS engine.
//!
//! ## Key Features
//!
//! - **Tri-state Predicates**: every predicate answers true, false or unknown with a reason
//! - **Toxic Rejection**: degenerate operands never reach the engine
//! - **MBR Pre-checks**: bounding boxes settle most negative answers without GEOS
//! - **Prepared Cache**: repeated operands in a scan are prepared once and reused
//! - **Derived Geometries**: overlay, buffers, hulls, tessellations and line work
//! - **Per-connection State**: configuration, error collector and statistics live in one context
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geolith::geometry::GeometryCollection;
//! use geolith_geos::{RelationContext, Tristate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut a = GeometryCollection::new_xy();
//! a.add_point_xy(1.0, 1.0)?;
//! let mut b = GeometryCollection::new_xy();
//! b.add_point_xy(1.0, 1.0)?;
//!
//! let mut ctx = RelationContext::new();
//! assert_eq!(ctx.equals(&a, &b), Tristate::True);
//! let d = ctx.distance(&a, &b)?;
//! assert_eq!(d, Some(0.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`context`] - The relation context: predicates and measures
//! - [`operations`] - Derived geometries
//! - [`predicates`] - Predicate definitions and bounding-box pre-checks
//! - [`cache`] - Prepared-geometry cache
//! - [`bridge`] - Conversion to and from GEOS geometries
//! - [`config`] - Relation configuration
//! - [`stats`] - Relation statistics
//! - [`error`] - Engine error types

pub mod bridge;
pub mod cache;
pub mod collector;
pub mod config;
pub mod context;
pub mod error;
pub mod operations;
mod polygonize;
pub mod predicates;
pub mod prepared;
pub mod stats;
pub mod tristate;

pub use cache::{CacheLookup, PreparedCache, PreparedSide};
pub use collector::ErrorCollector;
pub use config::{CachePolicy, EndCap, Join, RelationConfig};
pub use context::RelationContext;
pub use error::{EngineError, EngineResult};
pub use geolith::geometry::lines_cut_at_nodes;
pub use operations::SharedPaths;
pub use stats::{RelationStats, RelationStatsSnapshot};
pub use tristate::{Tristate, UnknownReason};
