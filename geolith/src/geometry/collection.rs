use crate::errors::{GeoError, GeoResult};

use super::coords::{Vertices, VerticesMut};
use super::dimension::{Dimension, Vertex};
use super::linestring::Linestring;
use super::mbr::Mbr;
use super::point::Point;
use super::polygon::{dimension_mismatch, Polygon, PolygonMut};
use super::types::GeometryType;

/// Root aggregate of the geometry model.
///
/// A collection owns its points, linestrings and polygons in insertion order. All
/// of them share the collection's [`Dimension`]. The cached MBR is cleared by any
/// mutation made through the collection and must be recomputed with
/// [`GeometryCollection::compute_mbr`] before [`GeometryCollection::mbr`] is trusted.
///
/// # Examples
///
/// ```rust
/// use geolith::geometry::{GeometryCollection, Mbr, Vertex};
///
/// # fn main() -> geolith::GeoResult<()> {
/// let mut geom = GeometryCollection::new_xy();
/// geom.add_linestring_from(&[Vertex::xy(0.0, 0.0), Vertex::xy(2.0, 3.0)])?;
/// assert!(geom.mbr().is_none());
/// geom.compute_mbr();
/// assert_eq!(geom.mbr(), Some(&Mbr::new(0.0, 0.0, 2.0, 3.0)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryCollection {
    srid: i32,
    dims: Dimension,
    declared_type: GeometryType,
    points: Vec<Point>,
    linestrings: Vec<Linestring>,
    polygons: Vec<Polygon>,
    #[cfg_attr(feature = "serde", serde(skip))]
    mbr: Option<Mbr>,
}

impl GeometryCollection {
    pub fn new(dims: Dimension) -> Self {
        GeometryCollection {
            srid: 0,
            dims,
            declared_type: GeometryType::Unknown,
            points: Vec::new(),
            linestrings: Vec::new(),
            polygons: Vec::new(),
            mbr: None,
        }
    }

    pub fn new_xy() -> Self {
        Self::new(Dimension::Xy)
    }

    pub fn new_xyz() -> Self {
        Self::new(Dimension::Xyz)
    }

    pub fn new_xym() -> Self {
        Self::new(Dimension::Xym)
    }

    pub fn new_xyzm() -> Self {
        Self::new(Dimension::Xyzm)
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn set_srid(&mut self, srid: i32) {
        self.srid = srid;
    }

    pub fn dimension(&self) -> Dimension {
        self.dims
    }

    pub fn declared_type(&self) -> GeometryType {
        self.declared_type
    }

    pub fn set_declared_type(&mut self, declared_type: GeometryType) {
        self.declared_type = declared_type;
    }

    /// Kind this collection exports as, from its content and declared type.
    pub fn geometry_type(&self) -> Option<GeometryType> {
        GeometryType::infer(
            self.points.len(),
            self.linestrings.len(),
            self.polygons.len(),
            self.declared_type,
        )
    }

    // Appending

    pub fn add_point(&mut self, vertex: Vertex) {
        self.mbr = None;
        self.points.push(Point::new(self.dims, vertex));
    }

    pub fn add_point_xy(&mut self, x: f64, y: f64) -> GeoResult<()> {
        self.require(Dimension::Xy)?;
        self.add_point(Vertex::xy(x, y));
        Ok(())
    }

    pub fn add_point_xyz(&mut self, x: f64, y: f64, z: f64) -> GeoResult<()> {
        self.require(Dimension::Xyz)?;
        self.add_point(Vertex::xyz(x, y, z));
        Ok(())
    }

    pub fn add_point_xym(&mut self, x: f64, y: f64, m: f64) -> GeoResult<()> {
        self.require(Dimension::Xym)?;
        self.add_point(Vertex::xym(x, y, m));
        Ok(())
    }

    pub fn add_point_xyzm(&mut self, x: f64, y: f64, z: f64, m: f64) -> GeoResult<()> {
        self.require(Dimension::Xyzm)?;
        self.add_point(Vertex::xyzm(x, y, z, m));
        Ok(())
    }

    /// Appends a linestring of `count` zero-filled vertices and hands back its
    /// vertices for filling.
    pub fn add_linestring(&mut self, count: usize) -> VerticesMut<'_> {
        self.mbr = None;
        self.linestrings.push(Linestring::new(self.dims, count));
        let last = self.linestrings.len() - 1;
        VerticesMut::new(self.linestrings[last].coords_mut())
    }

    pub fn add_linestring_from(&mut self, vertices: &[Vertex]) -> GeoResult<()> {
        self.insert_linestring(Linestring::from_vertices(self.dims, vertices))
    }

    pub fn insert_linestring(&mut self, line: Linestring) -> GeoResult<()> {
        if line.dimension() != self.dims {
            return Err(dimension_mismatch(self.dims, line.dimension()));
        }
        self.mbr = None;
        self.linestrings.push(line);
        Ok(())
    }

    /// Appends a polygon with an exterior of `exterior_points` vertices and
    /// `interiors` empty interior slots.
    pub fn add_polygon(&mut self, exterior_points: usize, interiors: usize) -> PolygonMut<'_> {
        self.mbr = None;
        self.polygons
            .push(Polygon::new(self.dims, exterior_points, interiors));
        let last = self.polygons.len() - 1;
        PolygonMut::new(&mut self.polygons[last])
    }

    pub fn insert_polygon(&mut self, polygon: Polygon) -> GeoResult<()> {
        if polygon.dimension() != self.dims {
            return Err(dimension_mismatch(self.dims, polygon.dimension()));
        }
        self.mbr = None;
        self.polygons.push(polygon);
        Ok(())
    }

    fn require(&self, wanted: Dimension) -> GeoResult<()> {
        if self.dims != wanted {
            return Err(dimension_mismatch(self.dims, wanted));
        }
        Ok(())
    }

    // Access

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn linestrings(&self) -> &[Linestring] {
        &self.linestrings
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_linestrings(&self) -> usize {
        self.linestrings.len()
    }

    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.linestrings.is_empty() && self.polygons.is_empty()
    }

    pub fn point(&self, index: usize) -> GeoResult<&Point> {
        let len = self.points.len();
        self.points
            .get(index)
            .ok_or_else(|| GeoError::index_out_of_bounds("point", index, len))
    }

    /// Moves point `index`; ordinates outside the collection's model are dropped.
    pub fn set_point(&mut self, index: usize, vertex: Vertex) -> GeoResult<()> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or_else(|| GeoError::index_out_of_bounds("point", index, len))?;
        point.set_vertex(vertex);
        self.mbr = None;
        Ok(())
    }

    pub fn linestring(&self, index: usize) -> GeoResult<&Linestring> {
        let len = self.linestrings.len();
        self.linestrings
            .get(index)
            .ok_or_else(|| GeoError::index_out_of_bounds("linestring", index, len))
    }

    pub fn linestring_mut(&mut self, index: usize) -> GeoResult<VerticesMut<'_>> {
        let len = self.linestrings.len();
        self.mbr = None;
        self.linestrings
            .get_mut(index)
            .map(|l| VerticesMut::new(l.coords_mut()))
            .ok_or_else(|| GeoError::index_out_of_bounds("linestring", index, len))
    }

    /// Swaps linestring `index` for `line`, which must share the collection's dimension.
    pub fn replace_linestring(&mut self, index: usize, line: Linestring) -> GeoResult<Linestring> {
        if line.dimension() != self.dims {
            return Err(dimension_mismatch(self.dims, line.dimension()));
        }
        let len = self.linestrings.len();
        let slot = self
            .linestrings
            .get_mut(index)
            .ok_or_else(|| GeoError::index_out_of_bounds("linestring", index, len))?;
        self.mbr = None;
        Ok(std::mem::replace(slot, line))
    }

    pub fn polygon(&self, index: usize) -> GeoResult<&Polygon> {
        let len = self.polygons.len();
        self.polygons
            .get(index)
            .ok_or_else(|| GeoError::index_out_of_bounds("polygon", index, len))
    }

    pub fn polygon_mut(&mut self, index: usize) -> GeoResult<PolygonMut<'_>> {
        let len = self.polygons.len();
        self.mbr = None;
        self.polygons
            .get_mut(index)
            .map(PolygonMut::new)
            .ok_or_else(|| GeoError::index_out_of_bounds("polygon", index, len))
    }

    /// Swaps polygon `index` for `polygon`, which must share the collection's dimension.
    pub fn replace_polygon(&mut self, index: usize, polygon: Polygon) -> GeoResult<Polygon> {
        if polygon.dimension() != self.dims {
            return Err(dimension_mismatch(self.dims, polygon.dimension()));
        }
        let len = self.polygons.len();
        let slot = self
            .polygons
            .get_mut(index)
            .ok_or_else(|| GeoError::index_out_of_bounds("polygon", index, len))?;
        self.mbr = None;
        Ok(std::mem::replace(slot, polygon))
    }

    /// Every vertex in encounter order: points, linestrings, then polygon rings.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        let points = self.points.iter().map(Point::vertex);
        let lines = self.linestrings.iter().flat_map(|l| l.coords().iter());
        let rings = self
            .polygons
            .iter()
            .flat_map(|p| p.rings())
            .flat_map(|r| r.coords().iter());
        points.chain(lines).chain(rings)
    }

    // Bounding box

    /// Cached MBR, `None` until [`GeometryCollection::compute_mbr`] ran after the
    /// last mutation.
    pub fn mbr(&self) -> Option<&Mbr> {
        self.mbr.as_ref()
    }

    pub fn compute_mbr(&mut self) -> Option<Mbr> {
        self.mbr = self.envelope();
        self.mbr
    }

    /// Fresh MBR over every vertex, ignoring the cache.
    pub fn envelope(&self) -> Option<Mbr> {
        Mbr::from_vertices(self.vertices())
    }

    /// Cached MBR when present, otherwise a fresh one.
    pub fn current_mbr(&self) -> Option<Mbr> {
        self.mbr.or_else(|| self.envelope())
    }

    // Measures

    /// Linear-only content where every linestring is closed.
    pub fn is_closed_geom(&self) -> bool {
        self.points.is_empty()
            && self.polygons.is_empty()
            && !self.linestrings.is_empty()
            && self.linestrings.iter().all(|l| l.is_closed())
    }

    /// Planar area of the polygons.
    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Planar length of the linestrings.
    pub fn length(&self) -> f64 {
        self.linestrings.iter().map(|l| l.length()).sum()
    }

    /// Planar length of every polygon ring.
    pub fn perimeter(&self) -> f64 {
        self.polygons.iter().map(Polygon::perimeter).sum()
    }

    /// Copy of this collection in another dimension model. Missing ordinates
    /// are zero-filled, extra ones dropped.
    pub fn clone_as(&self, dims: Dimension) -> GeometryCollection {
        GeometryCollection {
            srid: self.srid,
            dims,
            declared_type: self.declared_type,
            points: self.points.iter().map(|p| p.cast(dims)).collect(),
            linestrings: self.linestrings.iter().map(|l| l.cast(dims)).collect(),
            polygons: self.polygons.iter().map(|p| p.cast(dims)).collect(),
            mbr: None,
        }
    }

    /// Empty copy carrying the same SRID, dimension and declared type.
    pub fn empty_like(&self) -> GeometryCollection {
        let mut geom = GeometryCollection::new(self.dims);
        geom.srid = self.srid;
        geom.declared_type = self.declared_type;
        geom
    }

    pub(crate) fn for_each_vertex_mut(&mut self, mut f: impl FnMut(Vertex) -> Vertex) {
        self.mbr = None;
        for p in self.points.iter_mut() {
            p.set_vertex(f(p.vertex()));
        }
        for l in self.linestrings.iter_mut() {
            l.coords_mut().map_vertices(&mut f);
        }
        for poly in self.polygons.iter_mut() {
            for ring in poly.rings_mut() {
                ring.coords_mut().map_vertices(&mut f);
            }
        }
    }
}

impl PartialEq for GeometryCollection {
    fn eq(&self, other: &Self) -> bool {
        self.srid == other.srid
            && self.dims == other.dims
            && self.declared_type == other.declared_type
            && self.points == other.points
            && self.linestrings == other.linestrings
            && self.polygons == other.polygons
    }
}
