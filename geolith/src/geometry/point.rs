use super::dimension::{Dimension, Vertex};

/// A single point owned by a [`GeometryCollection`](super::GeometryCollection).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    dims: Dimension,
    vertex: Vertex,
}

impl Point {
    pub fn new(dims: Dimension, vertex: Vertex) -> Self {
        Point {
            dims,
            vertex: vertex.restricted_to(dims),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dims
    }

    pub fn vertex(&self) -> Vertex {
        self.vertex
    }

    pub fn set_vertex(&mut self, vertex: Vertex) {
        self.vertex = vertex.restricted_to(self.dims);
    }

    pub fn x(&self) -> f64 {
        self.vertex.x
    }

    pub fn y(&self) -> f64 {
        self.vertex.y
    }

    /// Z ordinate, `None` unless the model carries Z.
    pub fn z(&self) -> Option<f64> {
        self.dims.has_z().then_some(self.vertex.z)
    }

    /// M ordinate, `None` unless the model carries M.
    pub fn m(&self) -> Option<f64> {
        self.dims.has_m().then_some(self.vertex.m)
    }

    pub(crate) fn cast(&self, dims: Dimension) -> Point {
        Point::new(dims, self.vertex)
    }
}
