use crate::errors::{ErrorKind, GeoError, GeoResult};

use super::coords::{Vertices, VerticesMut};
use super::dimension::{Dimension, Vertex};
use super::linestring::Ring;
use super::mbr::Mbr;

/// One exterior ring plus a fixed number of interior rings.
///
/// The interior slots are allocated when the polygon is created and start out
/// empty; [`Polygon::add_interior_ring`] sizes a slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    dims: Dimension,
    exterior: Ring,
    interiors: Vec<Ring>,
}

impl Polygon {
    pub fn new(dims: Dimension, exterior_points: usize, interior_count: usize) -> Self {
        Polygon {
            dims,
            exterior: Ring::new(dims, exterior_points),
            interiors: (0..interior_count).map(|_| Ring::new(dims, 0)).collect(),
        }
    }

    /// Builds a polygon around an existing exterior ring.
    pub fn from_exterior(exterior: Ring, interior_count: usize) -> Self {
        let dims = exterior.dimension();
        Polygon {
            dims,
            exterior,
            interiors: (0..interior_count).map(|_| Ring::new(dims, 0)).collect(),
        }
    }

    pub fn from_rings(exterior: Ring, interiors: Vec<Ring>) -> GeoResult<Self> {
        let dims = exterior.dimension();
        if let Some(bad) = interiors.iter().find(|r| r.dimension() != dims) {
            return Err(dimension_mismatch(dims, bad.dimension()));
        }
        Ok(Polygon {
            dims,
            exterior,
            interiors,
        })
    }

    pub fn dimension(&self) -> Dimension {
        self.dims
    }

    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    pub fn exterior_mut(&mut self) -> VerticesMut<'_> {
        VerticesMut::new(self.exterior.coords_mut())
    }

    /// Replaces the exterior ring; `ring` must carry the polygon's dimension.
    pub fn set_exterior(&mut self, ring: Ring) -> GeoResult<()> {
        if ring.dimension() != self.dims {
            return Err(dimension_mismatch(self.dims, ring.dimension()));
        }
        self.exterior = ring;
        Ok(())
    }

    pub fn num_interiors(&self) -> usize {
        self.interiors.len()
    }

    pub fn interiors(&self) -> &[Ring] {
        &self.interiors
    }

    pub fn interior(&self, index: usize) -> GeoResult<&Ring> {
        let len = self.interiors.len();
        self.interiors
            .get(index)
            .ok_or_else(|| GeoError::index_out_of_bounds("interior ring", index, len))
    }

    pub fn interior_mut(&mut self, index: usize) -> GeoResult<VerticesMut<'_>> {
        Ok(VerticesMut::new(self.slot(index)?.coords_mut()))
    }

    /// Sizes interior slot `index` with `points` zero-filled vertices.
    pub fn add_interior_ring(&mut self, index: usize, points: usize) -> GeoResult<VerticesMut<'_>> {
        let dims = self.dims;
        let slot = self.slot(index)?;
        *slot = Ring::new(dims, points);
        Ok(VerticesMut::new(slot.coords_mut()))
    }

    /// Replaces interior slot `index` with `ring`.
    pub fn set_interior_ring(&mut self, index: usize, ring: Ring) -> GeoResult<()> {
        if ring.dimension() != self.dims {
            return Err(dimension_mismatch(self.dims, ring.dimension()));
        }
        *self.slot(index)? = ring;
        Ok(())
    }

    fn slot(&mut self, index: usize) -> GeoResult<&mut Ring> {
        let len = self.interiors.len();
        self.interiors
            .get_mut(index)
            .ok_or_else(|| GeoError::index_out_of_bounds("interior ring", index, len))
    }

    /// Convenience for filling an interior slot from vertices.
    pub fn set_interior_vertices(&mut self, index: usize, vertices: &[Vertex]) -> GeoResult<()> {
        let ring = Ring::from_vertices(self.dims, vertices);
        self.set_interior_ring(index, ring)
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Exterior area minus the holes.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.interiors.iter().map(Ring::area).sum();
        self.exterior.area() - holes
    }

    pub fn perimeter(&self) -> f64 {
        self.rings().map(Ring::perimeter).sum()
    }

    /// The polygon is bounded by its exterior ring.
    pub fn envelope(&self) -> Option<Mbr> {
        self.exterior.envelope()
    }

    pub(crate) fn cast(&self, dims: Dimension) -> Polygon {
        Polygon {
            dims,
            exterior: self.exterior.cast(dims),
            interiors: self.interiors.iter().map(|r| r.cast(dims)).collect(),
        }
    }

    pub(crate) fn rings_mut(&mut self) -> impl Iterator<Item = &mut Ring> {
        std::iter::once(&mut self.exterior).chain(self.interiors.iter_mut())
    }
}

/// Write access to a polygon owned by a [`GeometryCollection`](super::GeometryCollection).
///
/// Every replacement goes through the dimension-checked [`Polygon`] setters, so the
/// polygon keeps the collection's dimension model.
#[derive(Debug)]
pub struct PolygonMut<'a> {
    polygon: &'a mut Polygon,
}

impl<'a> PolygonMut<'a> {
    pub(crate) fn new(polygon: &'a mut Polygon) -> Self {
        PolygonMut { polygon }
    }

    pub fn get(&self) -> &Polygon {
        self.polygon
    }

    pub fn exterior_mut(&mut self) -> VerticesMut<'_> {
        self.polygon.exterior_mut()
    }

    pub fn set_exterior(&mut self, ring: Ring) -> GeoResult<()> {
        self.polygon.set_exterior(ring)
    }

    pub fn interior_mut(&mut self, index: usize) -> GeoResult<VerticesMut<'_>> {
        self.polygon.interior_mut(index)
    }

    pub fn add_interior_ring(&mut self, index: usize, points: usize) -> GeoResult<VerticesMut<'_>> {
        self.polygon.add_interior_ring(index, points)
    }

    pub fn set_interior_ring(&mut self, index: usize, ring: Ring) -> GeoResult<()> {
        self.polygon.set_interior_ring(index, ring)
    }

    pub fn set_interior_vertices(&mut self, index: usize, vertices: &[Vertex]) -> GeoResult<()> {
        self.polygon.set_interior_vertices(index, vertices)
    }
}

pub(crate) fn dimension_mismatch(expected: Dimension, found: Dimension) -> GeoError {
    GeoError::new(
        &format!("expected {} structure, found {}", expected, found),
        ErrorKind::DimensionMismatch,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64, offset: f64) -> Vec<Vertex> {
        vec![
            Vertex::xy(offset, offset),
            Vertex::xy(offset + size, offset),
            Vertex::xy(offset + size, offset + size),
            Vertex::xy(offset, offset + size),
            Vertex::xy(offset, offset),
        ]
    }

    #[test]
    fn interior_slots_are_fixed_at_creation() {
        let mut poly = Polygon::new(Dimension::Xy, 5, 2);
        assert_eq!(poly.num_interiors(), 2);
        assert_eq!(poly.interior(1).unwrap().num_points(), 0);
        poly.add_interior_ring(1, 4).unwrap();
        assert_eq!(poly.interior(1).unwrap().num_points(), 4);

        let err = poly.add_interior_ring(2, 4).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::IndexOutOfBounds);
    }

    #[test]
    fn area_subtracts_holes() {
        let mut poly = Polygon::from_exterior(Ring::from_vertices(Dimension::Xy, &square(10.0, 0.0)), 1);
        poly.set_interior_vertices(0, &square(2.0, 4.0)).unwrap();
        assert_eq!(poly.area(), 96.0);
        assert_eq!(poly.perimeter(), 48.0);
    }

    #[test]
    fn set_interior_ring_checks_dimension() {
        let mut poly = Polygon::new(Dimension::Xy, 4, 1);
        let ring = Ring::new(Dimension::Xyz, 4);
        let err = poly.set_interior_ring(0, ring).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DimensionMismatch);
    }

    #[test]
    fn replacing_exterior_with_other_dimension_is_rejected() {
        let mut poly = Polygon::from_exterior(Ring::from_vertices(Dimension::Xy, &square(2.0, 0.0)), 0);
        let zs: Vec<Vertex> = square(2.0, 0.0)
            .into_iter()
            .map(|v| Vertex::xyz(v.x, v.y, 7.0))
            .collect();
        let err = poly
            .set_exterior(Ring::from_vertices(Dimension::Xyz, &zs))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DimensionMismatch);
        assert_eq!(poly.exterior().dimension(), Dimension::Xy);
        assert_eq!(poly.area(), 4.0);

        poly.set_exterior(Ring::from_vertices(Dimension::Xy, &square(3.0, 0.0)))
            .unwrap();
        assert_eq!(poly.area(), 9.0);
    }

    #[test]
    fn ring_views_write_in_the_polygon_dimension() {
        let mut poly = Polygon::new(Dimension::Xy, 4, 1);
        let mut ext = poly.exterior_mut();
        assert_eq!(ext.dimension(), Dimension::Xy);
        ext.set_xy(1, 2.0, 0.0).unwrap();
        let err = ext.set_xyz(2, 2.0, 2.0, 7.0).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DimensionMismatch);
        assert_eq!(poly.exterior().vertex(1).unwrap(), Vertex::xy(2.0, 0.0));

        let mut hole = poly.add_interior_ring(0, 3).unwrap();
        hole.set_vertex(2, Vertex::xyz(1.0, 1.0, 9.0)).unwrap();
        assert_eq!(poly.interior(0).unwrap().vertex(2).unwrap(), Vertex::xy(1.0, 1.0));
        assert_eq!(poly.interior_mut(1).unwrap_err().kind(), &ErrorKind::IndexOutOfBounds);
    }

    #[test]
    fn from_rings_rejects_mixed_dimensions() {
        let ext = Ring::new(Dimension::Xy, 4);
        let hole = Ring::new(Dimension::Xym, 4);
        assert!(Polygon::from_rings(ext, vec![hole]).is_err());
    }

    #[test]
    fn envelope_follows_exterior() {
        let poly = Polygon::from_exterior(Ring::from_vertices(Dimension::Xy, &square(3.0, 1.0)), 0);
        assert_eq!(poly.envelope(), Some(Mbr::new(1.0, 1.0, 4.0, 4.0)));
    }
}
