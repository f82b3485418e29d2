//! Repairs for structurally sloppy geometries.

use super::collection::GeometryCollection;
use super::coords::Vertices;
use super::dimension::{Dimension, Vertex};
use super::linestring::{Linestring, Ring};
use super::polygon::Polygon;

fn dedup(vertices: Vec<Vertex>, dims: Dimension) -> Vec<Vertex> {
    let mut out: Vec<Vertex> = Vec::with_capacity(vertices.len());
    for v in vertices {
        match out.last() {
            Some(prev) if prev.same_position(&v, dims) => {}
            _ => out.push(v),
        }
    }
    out
}

fn repaired_ring(ring: &Ring) -> Option<Ring> {
    let dims = ring.dimension();
    let mut vertices = dedup(ring.coords().to_vertices(), dims);
    if let (Some(first), Some(last)) = (vertices.first().copied(), vertices.last().copied()) {
        if !first.same_position(&last, dims) {
            vertices.push(first);
        }
    }
    (vertices.len() >= 4).then(|| Ring::from_vertices(dims, &vertices))
}

/// Removes repeated consecutive vertices, closes open rings and drops what is
/// left degenerate. Holes that cannot be repaired are dropped with their slot.
/// Returns `None` if nothing survives.
pub fn sanitize(geom: &GeometryCollection) -> Option<GeometryCollection> {
    let dims = geom.dimension();
    let mut out = geom.empty_like();
    for p in geom.points() {
        out.add_point(p.vertex());
    }
    for line in geom.linestrings() {
        let vertices = dedup(line.coords().to_vertices(), dims);
        if vertices.len() >= 2 {
            out.insert_linestring(Linestring::from_vertices(dims, &vertices))
                .ok()?;
        }
    }
    for poly in geom.polygons() {
        let Some(exterior) = repaired_ring(poly.exterior()) else {
            continue;
        };
        let holes: Vec<Ring> = poly.interiors().iter().filter_map(repaired_ring).collect();
        out.insert_polygon(Polygon::from_rings(exterior, holes).ok()?)
            .ok()?;
    }
    if out.is_empty() {
        return None;
    }
    out.compute_mbr();
    Some(out)
}
