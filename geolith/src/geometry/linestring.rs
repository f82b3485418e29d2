use crate::errors::GeoResult;

use super::coords::{CoordinateArray, Vertices};
use super::dimension::{Dimension, Vertex};

/// An ordered run of vertices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Linestring {
    coords: CoordinateArray,
}

impl Linestring {
    /// Allocates `count` zero-filled vertices.
    pub fn new(dims: Dimension, count: usize) -> Self {
        Linestring {
            coords: CoordinateArray::new(dims, count),
        }
    }

    pub fn from_vertices(dims: Dimension, vertices: &[Vertex]) -> Self {
        Linestring {
            coords: CoordinateArray::from_vertices(dims, vertices),
        }
    }

    pub fn from_coords(coords: CoordinateArray) -> Self {
        Linestring { coords }
    }

    pub fn set_vertex(&mut self, index: usize, v: Vertex) -> GeoResult<()> {
        self.coords.set_vertex(index, v)
    }

    pub(crate) fn coords_mut(&mut self) -> &mut CoordinateArray {
        &mut self.coords
    }

    pub(crate) fn cast(&self, dims: Dimension) -> Linestring {
        Linestring::from_coords(self.coords.cast(dims))
    }
}

impl Vertices for Linestring {
    fn coords(&self) -> &CoordinateArray {
        &self.coords
    }
}

/// A polygon boundary. Closure is not enforced by the structure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring {
    coords: CoordinateArray,
}

impl Ring {
    pub fn new(dims: Dimension, count: usize) -> Self {
        Ring {
            coords: CoordinateArray::new(dims, count),
        }
    }

    pub fn from_vertices(dims: Dimension, vertices: &[Vertex]) -> Self {
        Ring {
            coords: CoordinateArray::from_vertices(dims, vertices),
        }
    }

    pub fn from_coords(coords: CoordinateArray) -> Self {
        Ring { coords }
    }

    /// True when the last vertex differs from the first (exact comparison, Z for
    /// Z models, M ignored). An empty ring counts as not closed.
    pub fn is_not_closed(&self) -> bool {
        !self.is_closed()
    }

    /// Shoelace area; positive for counter-clockwise rings. The closing edge is
    /// implied when the ring is open.
    pub fn signed_area(&self) -> f64 {
        let vertices = self.coords.to_vertices();
        let n = vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = &vertices[i];
            let b = &vertices[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Ring length including the implied closing edge of an open ring.
    pub fn perimeter(&self) -> f64 {
        let mut total = self.length();
        if let (Some(first), Some(last)) = (self.coords.first(), self.coords.last()) {
            if !first.same_position(&last, Dimension::Xy) {
                total += last.distance_2d(&first);
            }
        }
        total
    }

    pub fn set_vertex(&mut self, index: usize, v: Vertex) -> GeoResult<()> {
        self.coords.set_vertex(index, v)
    }

    pub(crate) fn coords_mut(&mut self) -> &mut CoordinateArray {
        &mut self.coords
    }

    pub(crate) fn cast(&self, dims: Dimension) -> Ring {
        Ring::from_coords(self.coords.cast(dims))
    }
}

impl Vertices for Ring {
    fn coords(&self) -> &CoordinateArray {
        &self.coords
    }
}
