//! WKT rendering of the geometry model, used by `Display` and in logs.

use std::fmt::{self, Display, Formatter, Write};

use super::collection::GeometryCollection;
use super::coords::{CoordinateArray, Vertices};
use super::dimension::{Dimension, Vertex};
use super::polygon::Polygon;
use super::types::GeometryType;

fn dimension_tag(dims: Dimension) -> &'static str {
    match dims {
        Dimension::Xy => "",
        Dimension::Xyz => " Z",
        Dimension::Xym => " M",
        Dimension::Xyzm => " ZM",
    }
}

fn write_vertex(f: &mut impl Write, v: &Vertex, dims: Dimension) -> fmt::Result {
    write!(f, "{} {}", v.x, v.y)?;
    if dims.has_z() {
        write!(f, " {}", v.z)?;
    }
    if dims.has_m() {
        write!(f, " {}", v.m)?;
    }
    Ok(())
}

fn write_coords(f: &mut impl Write, coords: &CoordinateArray) -> fmt::Result {
    f.write_char('(')?;
    for (i, v) in coords.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_vertex(f, &v, coords.dimension())?;
    }
    f.write_char(')')
}

fn write_polygon(f: &mut impl Write, polygon: &Polygon) -> fmt::Result {
    f.write_char('(')?;
    for (i, ring) in polygon.rings().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_coords(f, ring.coords())?;
    }
    f.write_char(')')
}

impl Display for GeometryCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let dims = self.dimension();
        let tag = dimension_tag(dims);
        let Some(kind) = self.geometry_type() else {
            return write!(f, "GEOMETRYCOLLECTION{} EMPTY", tag);
        };
        write!(f, "{}{}", kind, tag)?;
        match kind {
            GeometryType::Point => {
                f.write_char('(')?;
                write_vertex(f, &self.points()[0].vertex(), dims)?;
                f.write_char(')')
            }
            GeometryType::Linestring => write_coords(f, self.linestrings()[0].coords()),
            GeometryType::Polygon => write_polygon(f, &self.polygons()[0]),
            GeometryType::MultiPoint => {
                f.write_char('(')?;
                for (i, p) in self.points().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_vertex(f, &p.vertex(), dims)?;
                }
                f.write_char(')')
            }
            GeometryType::MultiLinestring => {
                f.write_char('(')?;
                for (i, l) in self.linestrings().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_coords(f, l.coords())?;
                }
                f.write_char(')')
            }
            GeometryType::MultiPolygon => {
                f.write_char('(')?;
                for (i, p) in self.polygons().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_polygon(f, p)?;
                }
                f.write_char(')')
            }
            GeometryType::GeometryCollection | GeometryType::Unknown => {
                let mut parts: Vec<String> = Vec::new();
                for p in self.points() {
                    let mut s = format!("POINT{}(", tag);
                    write_vertex(&mut s, &p.vertex(), dims)?;
                    s.push(')');
                    parts.push(s);
                }
                for l in self.linestrings() {
                    let mut s = format!("LINESTRING{}", tag);
                    write_coords(&mut s, l.coords())?;
                    parts.push(s);
                }
                for p in self.polygons() {
                    let mut s = format!("POLYGON{}", tag);
                    write_polygon(&mut s, p)?;
                    parts.push(s);
                }
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}
