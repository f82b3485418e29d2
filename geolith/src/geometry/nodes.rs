use log::debug;

use super::collection::GeometryCollection;
use super::coords::Vertices;
use super::dimension::Vertex;
use super::types::GeometryType;

fn is_node(v: &Vertex, nodes: &[Vertex], with_z: bool) -> bool {
    nodes
        .iter()
        .any(|n| n.x == v.x && n.y == v.y && (!with_z || n.z == v.z))
}

/// Splits every linestring of `lines` at interior vertices that coincide with a
/// point of `nodes`.
///
/// Coincidence is exact on X/Y, plus Z when both inputs carry Z. Endpoints never
/// split. The result is declared `MULTILINESTRING` with the SRID of `lines`.
/// Returns `None` when `lines` holds anything but linestrings, `nodes` anything
/// but points, or when no split happened.
pub fn lines_cut_at_nodes(
    lines: &GeometryCollection,
    nodes: &GeometryCollection,
) -> Option<GeometryCollection> {
    if lines.num_linestrings() == 0 || lines.num_points() > 0 || lines.num_polygons() > 0 {
        return None;
    }
    if nodes.num_points() == 0 || nodes.num_linestrings() > 0 || nodes.num_polygons() > 0 {
        return None;
    }
    let with_z = lines.dimension().has_z() && nodes.dimension().has_z();
    let node_vertices: Vec<Vertex> = nodes.points().iter().map(|p| p.vertex()).collect();

    let mut out = GeometryCollection::new(lines.dimension());
    out.set_srid(lines.srid());
    out.set_declared_type(GeometryType::MultiLinestring);
    let mut cuts = 0usize;
    for line in lines.linestrings() {
        let vertices = line.coords().to_vertices();
        let mut start = 0usize;
        for i in 1..vertices.len().saturating_sub(1) {
            if is_node(&vertices[i], &node_vertices, with_z) {
                out.add_linestring_from(&vertices[start..=i]).ok()?;
                start = i;
                cuts += 1;
            }
        }
        out.add_linestring_from(&vertices[start..]).ok()?;
    }
    if cuts == 0 {
        debug!("no node matched an interior vertex, nothing to cut");
        return None;
    }
    out.compute_mbr();
    Some(out)
}
