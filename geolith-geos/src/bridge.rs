//! Conversion between [`GeometryCollection`] and GEOS geometries.
//!
//! Export picks the engine kind from the element counts and the declared type, so
//! a single point declared MULTIPOINT becomes an engine MultiPoint. Rings are closed
//! on the way out when their last vertex does not repeat the first one. The engine
//! only carries X, Y and optionally Z: M is dropped on export and zero-filled on
//! import.

use geolith::geometry::{
    CoordinateArray, Dimension, GeometryCollection, GeometryType, Linestring, Point, Polygon,
    Ring, Vertex, Vertices,
};
use geos::{CoordSeq, GResult, Geom, Geometry, GeometryTypes};

use crate::error::{EngineError, EngineResult};

/// Which categories of a collection are handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    #[default]
    All,
    OnlyPoints,
    OnlyLinestrings,
    OnlyPolygons,
}

/// Builds the engine geometry for `geom`, restricted to the categories of `mode`.
///
/// Returns `None` when nothing is left to export.
pub fn to_engine(geom: &GeometryCollection, mode: ExportMode) -> EngineResult<Option<Geometry>> {
    let dims = geom.dimension();
    let (points, lines, polygons) = match mode {
        ExportMode::All => (geom.points(), geom.linestrings(), geom.polygons()),
        ExportMode::OnlyPoints => (geom.points(), &[][..], &[][..]),
        ExportMode::OnlyLinestrings => (&[][..], geom.linestrings(), &[][..]),
        ExportMode::OnlyPolygons => (&[][..], &[][..], geom.polygons()),
    };
    let Some(kind) = GeometryType::infer(
        points.len(),
        lines.len(),
        polygons.len(),
        geom.declared_type(),
    ) else {
        return Ok(None);
    };

    let engine = match kind {
        GeometryType::Point => point_to_engine(&points[0], dims)?,
        GeometryType::Linestring => linestring_to_engine(&lines[0], dims)?,
        GeometryType::Polygon => polygon_to_engine(&polygons[0], dims)?,
        GeometryType::MultiPoint => Geometry::create_multipoint(
            points
                .iter()
                .map(|p| point_to_engine(p, dims))
                .collect::<GResult<Vec<_>>>()?,
        )?,
        GeometryType::MultiLinestring => Geometry::create_multiline_string(
            lines
                .iter()
                .map(|l| linestring_to_engine(l, dims))
                .collect::<GResult<Vec<_>>>()?,
        )?,
        GeometryType::MultiPolygon => Geometry::create_multipolygon(
            polygons
                .iter()
                .map(|p| polygon_to_engine(p, dims))
                .collect::<GResult<Vec<_>>>()?,
        )?,
        GeometryType::GeometryCollection => {
            let mut parts = Vec::with_capacity(points.len() + lines.len() + polygons.len());
            for p in points {
                parts.push(point_to_engine(p, dims)?);
            }
            for l in lines {
                parts.push(linestring_to_engine(l, dims)?);
            }
            for p in polygons {
                parts.push(polygon_to_engine(p, dims)?);
            }
            Geometry::create_geometry_collection(parts)?
        }
        GeometryType::Unknown => return Ok(None),
    };
    Ok(Some(engine))
}

/// Converts an engine geometry back into a collection of model `dims`.
///
/// Nested collections are flattened in encounter order. The declared type follows
/// the engine kind, and the SRID is left at 0 for the caller to re-attach.
/// Returns `None` for empty engine geometries.
pub fn from_engine<G: Geom>(engine: &G, dims: Dimension) -> EngineResult<Option<GeometryCollection>> {
    if engine.is_empty()? {
        return Ok(None);
    }
    let mut out = GeometryCollection::new(dims);
    collect(engine, dims, &mut out)?;
    if out.is_empty() {
        return Ok(None);
    }
    out.set_declared_type(declared_type_of(engine.geometry_type())?);
    out.compute_mbr();
    Ok(Some(out))
}

/// Model kind matching an engine kind.
pub fn declared_type_of(kind: GeometryTypes) -> EngineResult<GeometryType> {
    match kind {
        GeometryTypes::Point => Ok(GeometryType::Point),
        GeometryTypes::LineString | GeometryTypes::LinearRing => Ok(GeometryType::Linestring),
        GeometryTypes::Polygon => Ok(GeometryType::Polygon),
        GeometryTypes::MultiPoint => Ok(GeometryType::MultiPoint),
        GeometryTypes::MultiLineString => Ok(GeometryType::MultiLinestring),
        GeometryTypes::MultiPolygon => Ok(GeometryType::MultiPolygon),
        GeometryTypes::GeometryCollection => Ok(GeometryType::GeometryCollection),
        #[allow(unreachable_patterns)]
        other => Err(EngineError::Unsupported(format!(
            "engine geometry kind {:?}",
            other
        ))),
    }
}

fn collect<G: Geom>(engine: &G, dims: Dimension, out: &mut GeometryCollection) -> EngineResult<()> {
    if engine.is_empty()? {
        return Ok(());
    }
    let read_z = dims.has_z() && engine.has_z()?;
    match engine.geometry_type() {
        GeometryTypes::Point => {
            let vertices = read_coords(&engine.get_coord_seq()?, read_z)?;
            if let Some(v) = vertices.first() {
                out.add_point(*v);
            }
        }
        GeometryTypes::LineString | GeometryTypes::LinearRing => {
            let vertices = read_coords(&engine.get_coord_seq()?, read_z)?;
            out.insert_linestring(Linestring::from_vertices(dims, &vertices))?;
        }
        GeometryTypes::Polygon => {
            let exterior = read_ring(&engine.get_exterior_ring()?, dims, read_z)?;
            let count = engine.get_num_interior_rings()?;
            let mut interiors = Vec::with_capacity(count);
            for i in 0..count {
                interiors.push(read_ring(&engine.get_interior_ring_n(i as _)?, dims, read_z)?);
            }
            out.insert_polygon(Polygon::from_rings(exterior, interiors)?)?;
        }
        GeometryTypes::MultiPoint
        | GeometryTypes::MultiLineString
        | GeometryTypes::MultiPolygon
        | GeometryTypes::GeometryCollection => {
            for i in 0..engine.get_num_geometries()? {
                collect(&engine.get_geometry_n(i)?, dims, out)?;
            }
        }
        #[allow(unreachable_patterns)]
        other => {
            return Err(EngineError::Unsupported(format!(
                "engine geometry kind {:?}",
                other
            )))
        }
    }
    Ok(())
}

fn read_ring<G: Geom>(ring: &G, dims: Dimension, read_z: bool) -> EngineResult<Ring> {
    let vertices = read_coords(&ring.get_coord_seq()?, read_z)?;
    Ok(Ring::from_vertices(dims, &vertices))
}

fn read_coords(seq: &CoordSeq, read_z: bool) -> EngineResult<Vec<Vertex>> {
    let size = seq.size()?;
    let mut vertices = Vec::with_capacity(size);
    for i in 0..size {
        let z = if read_z { seq.get_z(i)? } else { 0.0 };
        vertices.push(Vertex::xyz(seq.get_x(i)?, seq.get_y(i)?, z));
    }
    Ok(vertices)
}

fn coord_seq(vertices: impl Iterator<Item = Vertex>, dims: Dimension) -> GResult<CoordSeq> {
    let has_z = dims.has_z();
    let mut buffer = Vec::new();
    let mut count = 0;
    for v in vertices {
        buffer.push(v.x);
        buffer.push(v.y);
        if has_z {
            buffer.push(v.z);
        }
        count += 1;
    }
    CoordSeq::new_from_buffer(&buffer, count, has_z, false)
}

fn point_to_engine(point: &Point, dims: Dimension) -> GResult<Geometry> {
    Geometry::create_point(coord_seq(std::iter::once(point.vertex()), dims)?)
}

fn linestring_to_engine(line: &Linestring, dims: Dimension) -> GResult<Geometry> {
    Geometry::create_line_string(coord_seq(line.coords().iter(), dims)?)
}

fn ring_to_engine(ring: &Ring, dims: Dimension) -> GResult<Geometry> {
    let coords: &CoordinateArray = ring.coords();
    let closing = if ring.is_closed() { None } else { coords.first() };
    Geometry::create_linear_ring(coord_seq(coords.iter().chain(closing), dims)?)
}

fn polygon_to_engine(polygon: &Polygon, dims: Dimension) -> GResult<Geometry> {
    let exterior = ring_to_engine(polygon.exterior(), dims)?;
    let interiors = polygon
        .interiors()
        .iter()
        .map(|r| ring_to_engine(r, dims))
        .collect::<GResult<Vec<_>>>()?;
    Geometry::create_polygon(exterior, interiors)
}
