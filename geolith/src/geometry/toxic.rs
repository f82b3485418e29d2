//! Detection of geometries the engine must never see.

use std::fmt::{self, Display};

use super::collection::GeometryCollection;
use super::coords::Vertices;

/// Why a geometry was judged toxic.
#[derive(Debug, Clone, PartialEq)]
pub enum ToxicReason {
    Empty,
    ShortLinestring { index: usize, points: usize },
    ShortRing { polygon: usize, ring: usize, points: usize },
    NonFiniteCoordinate,
}

impl Display for ToxicReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToxicReason::Empty => write!(f, "toxic geometry: empty"),
            ToxicReason::ShortLinestring { index, points } => write!(
                f,
                "toxic linestring #{}: {} points, fewer than 2",
                index, points
            ),
            ToxicReason::ShortRing {
                polygon,
                ring,
                points,
            } => write!(
                f,
                "toxic ring #{} of polygon #{}: {} points, fewer than 4",
                ring, polygon, points
            ),
            ToxicReason::NonFiniteCoordinate => write!(f, "toxic geometry: non-finite coordinate"),
        }
    }
}

/// Returns the first reason `geom` is unusable, if any.
///
/// Ring 0 is the exterior, interior rings follow from 1.
pub fn toxic_reason(geom: &GeometryCollection) -> Option<ToxicReason> {
    if geom.is_empty() {
        return Some(ToxicReason::Empty);
    }
    for (index, line) in geom.linestrings().iter().enumerate() {
        if line.num_points() < 2 {
            return Some(ToxicReason::ShortLinestring {
                index,
                points: line.num_points(),
            });
        }
    }
    for (polygon, poly) in geom.polygons().iter().enumerate() {
        for (ring, r) in poly.rings().enumerate() {
            if r.num_points() < 4 {
                return Some(ToxicReason::ShortRing {
                    polygon,
                    ring,
                    points: r.num_points(),
                });
            }
        }
    }
    if geom.vertices().any(|v| !v.is_finite()) {
        return Some(ToxicReason::NonFiniteCoordinate);
    }
    None
}

pub fn is_toxic(geom: &GeometryCollection) -> bool {
    toxic_reason(geom).is_some()
}
