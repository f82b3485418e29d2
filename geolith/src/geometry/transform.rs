//! Affine edits applied in place to every vertex of a collection.

use super::collection::GeometryCollection;
use super::dimension::Vertex;

impl GeometryCollection {
    pub fn shift(&mut self, dx: f64, dy: f64) {
        self.for_each_vertex_mut(|v| Vertex { x: v.x + dx, y: v.y + dy, ..v });
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.for_each_vertex_mut(|v| Vertex { x: v.x * sx, y: v.y * sy, ..v });
    }

    /// Rotates counter-clockwise around the origin.
    pub fn rotate(&mut self, angle_degrees: f64) {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        self.for_each_vertex_mut(|v| Vertex {
            x: v.x * cos - v.y * sin,
            y: v.x * sin + v.y * cos,
            ..v
        });
    }

    /// Mirrors X values when `x_axis` is set and Y values when `y_axis` is set.
    pub fn reflect(&mut self, x_axis: bool, y_axis: bool) {
        self.for_each_vertex_mut(|v| Vertex {
            x: if x_axis { -v.x } else { v.x },
            y: if y_axis { -v.y } else { v.y },
            ..v
        });
    }

    pub fn swap_xy(&mut self) {
        self.for_each_vertex_mut(|v| Vertex { x: v.y, y: v.x, ..v });
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{GeometryCollection, Mbr, Vertex};

    fn sample() -> GeometryCollection {
        let mut geom = GeometryCollection::new_xyzm();
        geom.add_point_xyzm(1.0, 2.0, 3.0, 4.0).unwrap();
        geom
    }

    #[test]
    fn shift_and_scale_keep_z_and_m() {
        let mut geom = sample();
        geom.shift(10.0, -1.0);
        geom.scale(2.0, 3.0);
        assert_eq!(geom.point(0).unwrap().vertex(), Vertex::xyzm(22.0, 3.0, 3.0, 4.0));
    }

    #[test]
    fn rotate_quarter_turn() {
        let mut geom = GeometryCollection::new_xy();
        geom.add_point_xy(1.0, 0.0).unwrap();
        geom.rotate(90.0);
        let v = geom.point(0).unwrap().vertex();
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn swap_and_reflect() {
        let mut geom = sample();
        geom.swap_xy();
        geom.reflect(true, false);
        assert_eq!(geom.point(0).unwrap().vertex(), Vertex::xyzm(-2.0, 1.0, 3.0, 4.0));
    }

    #[test]
    fn transforms_invalidate_mbr() {
        let mut geom = sample();
        geom.compute_mbr();
        geom.shift(1.0, 1.0);
        assert!(geom.mbr().is_none());
        assert_eq!(geom.compute_mbr(), Some(Mbr::new(2.0, 3.0, 2.0, 3.0)));
    }
}
