use geolith::geometry::{GeometryCollection, GeometryType, Ring, Vertices};
use log::{debug, error};

fn same_ring_shape(a: &Ring, b: &Ring) -> bool {
    a.num_points() == b.num_points() && a.envelope() == b.envelope()
}

/// Drops polygons that only fill a hole of another polygon.
///
/// Polygonizing a ring with a hole yields the holed polygon plus a second polygon
/// covering the hole. The second one is recognised by an exterior ring with the
/// same point count and bounding box as an interior ring of some other polygon.
pub(crate) fn drop_hole_fillers(geom: &GeometryCollection) -> GeometryCollection {
    let polygons = geom.polygons();
    let mut out = geom.empty_like();
    let mut dropped = 0usize;
    for (index, polygon) in polygons.iter().enumerate() {
        let fills_hole = polygons.iter().enumerate().any(|(other_index, other)| {
            other_index != index
                && other
                    .interiors()
                    .iter()
                    .any(|hole| same_ring_shape(hole, polygon.exterior()))
        });
        if fills_hole {
            dropped += 1;
            continue;
        }
        // same dimension as `geom`, cannot fail
        if let Err(err) = out.insert_polygon(polygon.clone()) {
            error!("Polygon lost while dropping hole fillers: {}", err);
        }
    }
    if dropped > 0 {
        debug!("Dropped {} polygonized hole filler(s)", dropped);
    }
    out
}

/// Declared type of a polygonize result.
pub(crate) fn polygonized_type(geom: &GeometryCollection, force_multi: bool) -> GeometryType {
    if force_multi || geom.num_polygons() > 1 {
        GeometryType::MultiPolygon
    } else {
        GeometryType::Polygon
    }
}
