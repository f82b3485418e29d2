use crate::errors::{ErrorKind, GeoError, GeoResult};

use super::dimension::{Dimension, Vertex};
use super::mbr::Mbr;

/// A flat, stride-addressed coordinate buffer.
///
/// Vertices are packed as `x, y[, z][, m]` according to the owning [`Dimension`].
/// Every indexed access is bounds-checked and the dimension-specific accessors
/// reject variants the buffer does not carry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateArray {
    dims: Dimension,
    values: Vec<f64>,
}

impl CoordinateArray {
    /// Creates a zero-filled buffer of `count` vertices.
    pub fn new(dims: Dimension, count: usize) -> Self {
        CoordinateArray {
            dims,
            values: vec![0.0; count * dims.stride()],
        }
    }

    pub fn from_vertices(dims: Dimension, vertices: &[Vertex]) -> Self {
        let mut values = Vec::with_capacity(vertices.len() * dims.stride());
        for v in vertices {
            push_vertex(&mut values, dims, v);
        }
        CoordinateArray { dims, values }
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dims
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len() / self.dims.stride()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw packed ordinates.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    fn offset(&self, index: usize) -> GeoResult<usize> {
        let len = self.len();
        if index >= len {
            return Err(GeoError::index_out_of_bounds("vertex", index, len));
        }
        Ok(index * self.dims.stride())
    }

    fn require(&self, wanted: Dimension) -> GeoResult<()> {
        if self.dims != wanted {
            return Err(GeoError::new(
                &format!("{} accessor used on {} coordinates", wanted, self.dims),
                ErrorKind::DimensionMismatch,
            ));
        }
        Ok(())
    }

    /// Reads vertex `index`; absent ordinates come back as 0.0.
    pub fn vertex(&self, index: usize) -> GeoResult<Vertex> {
        let at = self.offset(index)?;
        Ok(read_vertex(&self.values[at..at + self.dims.stride()], self.dims))
    }

    /// Writes vertex `index`; ordinates the model does not carry are ignored.
    pub fn set_vertex(&mut self, index: usize, v: Vertex) -> GeoResult<()> {
        let at = self.offset(index)?;
        let dims = self.dims;
        let slot = &mut self.values[at..at + dims.stride()];
        slot[0] = v.x;
        slot[1] = v.y;
        match dims {
            Dimension::Xy => {}
            Dimension::Xyz => slot[2] = v.z,
            Dimension::Xym => slot[2] = v.m,
            Dimension::Xyzm => {
                slot[2] = v.z;
                slot[3] = v.m;
            }
        }
        Ok(())
    }

    /// XY of any dimension model.
    pub fn xy(&self, index: usize) -> GeoResult<(f64, f64)> {
        let at = self.offset(index)?;
        Ok((self.values[at], self.values[at + 1]))
    }

    pub fn xyz(&self, index: usize) -> GeoResult<(f64, f64, f64)> {
        self.require(Dimension::Xyz)?;
        let v = self.vertex(index)?;
        Ok((v.x, v.y, v.z))
    }

    pub fn xym(&self, index: usize) -> GeoResult<(f64, f64, f64)> {
        self.require(Dimension::Xym)?;
        let v = self.vertex(index)?;
        Ok((v.x, v.y, v.m))
    }

    pub fn xyzm(&self, index: usize) -> GeoResult<(f64, f64, f64, f64)> {
        self.require(Dimension::Xyzm)?;
        let v = self.vertex(index)?;
        Ok((v.x, v.y, v.z, v.m))
    }

    pub fn set_xy(&mut self, index: usize, x: f64, y: f64) -> GeoResult<()> {
        self.require(Dimension::Xy)?;
        self.set_vertex(index, Vertex::xy(x, y))
    }

    pub fn set_xyz(&mut self, index: usize, x: f64, y: f64, z: f64) -> GeoResult<()> {
        self.require(Dimension::Xyz)?;
        self.set_vertex(index, Vertex::xyz(x, y, z))
    }

    pub fn set_xym(&mut self, index: usize, x: f64, y: f64, m: f64) -> GeoResult<()> {
        self.require(Dimension::Xym)?;
        self.set_vertex(index, Vertex::xym(x, y, m))
    }

    pub fn set_xyzm(&mut self, index: usize, x: f64, y: f64, z: f64, m: f64) -> GeoResult<()> {
        self.require(Dimension::Xyzm)?;
        self.set_vertex(index, Vertex::xyzm(x, y, z, m))
    }

    pub fn first(&self) -> Option<Vertex> {
        self.vertex(0).ok()
    }

    pub fn last(&self) -> Option<Vertex> {
        self.len().checked_sub(1).and_then(|i| self.vertex(i).ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = Vertex> + '_ {
        let dims = self.dims;
        self.values
            .chunks_exact(dims.stride())
            .map(move |chunk| read_vertex(chunk, dims))
    }

    pub fn to_vertices(&self) -> Vec<Vertex> {
        self.iter().collect()
    }

    pub fn envelope(&self) -> Option<Mbr> {
        Mbr::from_vertices(self.iter())
    }

    /// Applies `f` to every vertex in place.
    pub fn map_vertices(&mut self, mut f: impl FnMut(Vertex) -> Vertex) {
        let dims = self.dims;
        let mut rebuilt = Vec::with_capacity(self.values.len());
        for chunk in self.values.chunks_exact(dims.stride()) {
            push_vertex(&mut rebuilt, dims, &f(read_vertex(chunk, dims)));
        }
        self.values = rebuilt;
    }

    /// Re-packs the buffer for another dimension model, zero-filling new ordinates.
    pub fn cast(&self, dims: Dimension) -> CoordinateArray {
        let vertices: Vec<Vertex> = self.iter().map(|v| v.restricted_to(dims)).collect();
        CoordinateArray::from_vertices(dims, &vertices)
    }
}

fn read_vertex(chunk: &[f64], dims: Dimension) -> Vertex {
    match dims {
        Dimension::Xy => Vertex::xy(chunk[0], chunk[1]),
        Dimension::Xyz => Vertex::xyz(chunk[0], chunk[1], chunk[2]),
        Dimension::Xym => Vertex::xym(chunk[0], chunk[1], chunk[2]),
        Dimension::Xyzm => Vertex::xyzm(chunk[0], chunk[1], chunk[2], chunk[3]),
    }
}

fn push_vertex(values: &mut Vec<f64>, dims: Dimension, v: &Vertex) {
    values.push(v.x);
    values.push(v.y);
    if dims.has_z() {
        values.push(v.z);
    }
    if dims.has_m() {
        values.push(v.m);
    }
}

/// Shared behaviour of structures backed by a [`CoordinateArray`].
pub trait Vertices {
    fn coords(&self) -> &CoordinateArray;

    fn dimension(&self) -> Dimension {
        self.coords().dimension()
    }

    fn num_points(&self) -> usize {
        self.coords().len()
    }

    fn vertex(&self, index: usize) -> GeoResult<Vertex> {
        self.coords().vertex(index)
    }

    fn envelope(&self) -> Option<Mbr> {
        self.coords().envelope()
    }

    /// First and last vertex share a position (exact X/Y, plus Z for Z models).
    fn is_closed(&self) -> bool {
        let coords = self.coords();
        match (coords.first(), coords.last()) {
            (Some(first), Some(last)) => first.same_position(&last, coords.dimension()),
            _ => false,
        }
    }

    /// Planar 2D length.
    fn length(&self) -> f64 {
        let vertices = self.coords().to_vertices();
        vertices
            .windows(2)
            .map(|pair| pair[0].distance_2d(&pair[1]))
            .sum()
    }
}

/// Vertex-level write access to a linestring or ring held by a larger structure.
///
/// Individual vertices can be rewritten but the backing array, and with it the
/// dimension model, stays in place.
#[derive(Debug)]
pub struct VerticesMut<'a> {
    coords: &'a mut CoordinateArray,
}

impl<'a> VerticesMut<'a> {
    pub(crate) fn new(coords: &'a mut CoordinateArray) -> Self {
        VerticesMut { coords }
    }

    pub fn dimension(&self) -> Dimension {
        self.coords.dimension()
    }

    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    pub fn vertex(&self, index: usize) -> GeoResult<Vertex> {
        self.coords.vertex(index)
    }

    pub fn set_vertex(&mut self, index: usize, v: Vertex) -> GeoResult<()> {
        self.coords.set_vertex(index, v)
    }

    pub fn set_xy(&mut self, index: usize, x: f64, y: f64) -> GeoResult<()> {
        self.coords.set_xy(index, x, y)
    }

    pub fn set_xyz(&mut self, index: usize, x: f64, y: f64, z: f64) -> GeoResult<()> {
        self.coords.set_xyz(index, x, y, z)
    }

    pub fn set_xym(&mut self, index: usize, x: f64, y: f64, m: f64) -> GeoResult<()> {
        self.coords.set_xym(index, x, y, m)
    }

    pub fn set_xyzm(&mut self, index: usize, x: f64, y: f64, z: f64, m: f64) -> GeoResult<()> {
        self.coords.set_xyzm(index, x, y, z, m)
    }
}
