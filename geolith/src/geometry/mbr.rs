use std::fmt::{self, Display};

use super::dimension::Vertex;

/// Minimum bounding rectangle of a geometry.
///
/// `Mbr` is the axis-aligned box (min_x, min_y)-(max_x, max_y). Every test here is
/// inclusive, so boxes that only share an edge or a corner intersect.
///
/// # Examples
///
/// ```rust
/// use geolith::geometry::Mbr;
///
/// let a = Mbr::new(0.0, 0.0, 1.0, 1.0);
/// let b = Mbr::new(1.0, 0.0, 2.0, 1.0);
/// assert!(a.intersects(&b));
/// assert!(!a.contains(&b));
/// ```
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mbr {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Display for Mbr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mbr({}, {}, {}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

impl Mbr {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Mbr {
        Mbr {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Degenerate box covering a single vertex.
    pub fn from_vertex(v: &Vertex) -> Mbr {
        Mbr::new(v.x, v.y, v.x, v.y)
    }

    /// Builds the box enclosing every vertex, `None` for an empty iterator.
    pub fn from_vertices<I>(vertices: I) -> Option<Mbr>
    where
        I: IntoIterator<Item = Vertex>,
    {
        let mut iter = vertices.into_iter();
        let first = iter.next()?;
        let mut mbr = Mbr::from_vertex(&first);
        for v in iter {
            mbr.expand(&v);
        }
        Some(mbr)
    }

    /// Grows the box to include `v`.
    pub fn expand(&mut self, v: &Vertex) {
        self.min_x = self.min_x.min(v.x);
        self.min_y = self.min_y.min(v.y);
        self.max_x = self.max_x.max(v.x);
        self.max_y = self.max_y.max(v.y);
    }

    /// Returns a copy grown by `delta` on every side.
    pub fn expand_by(&self, delta: f64) -> Mbr {
        Mbr::new(
            self.min_x - delta,
            self.min_y - delta,
            self.max_x + delta,
            self.max_y + delta,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// True when `other` lies entirely inside this box.
    pub fn contains(&self, other: &Mbr) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    /// True when this box lies entirely inside `other`.
    pub fn within(&self, other: &Mbr) -> bool {
        other.contains(self)
    }

    pub fn intersects(&self, other: &Mbr) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    pub fn union(&self, other: &Mbr) -> Mbr {
        Mbr::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn intersection(&self, other: &Mbr) -> Option<Mbr> {
        if !self.intersects(other) {
            return None;
        }
        Some(Mbr::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        ))
    }

    pub fn is_point(&self) -> bool {
        self.min_x == self.max_x && self.min_y == self.max_y
    }
}
