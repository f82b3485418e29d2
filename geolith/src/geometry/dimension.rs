use std::fmt::{self, Display};

/// The dimension model shared by a collection and every structure it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    #[default]
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl Dimension {
    /// Number of doubles stored per vertex.
    #[inline]
    pub fn stride(self) -> usize {
        match self {
            Dimension::Xy => 2,
            Dimension::Xyz | Dimension::Xym => 3,
            Dimension::Xyzm => 4,
        }
    }

    #[inline]
    pub fn has_z(self) -> bool {
        matches!(self, Dimension::Xyz | Dimension::Xyzm)
    }

    #[inline]
    pub fn has_m(self) -> bool {
        matches!(self, Dimension::Xym | Dimension::Xyzm)
    }

    pub fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Dimension::Xy,
            (true, false) => Dimension::Xyz,
            (false, true) => Dimension::Xym,
            (true, true) => Dimension::Xyzm,
        }
    }

    /// Offset added to a base class code in the blob format.
    pub fn class_offset(self) -> i32 {
        match self {
            Dimension::Xy => 0,
            Dimension::Xyz => 1000,
            Dimension::Xym => 2000,
            Dimension::Xyzm => 3000,
        }
    }

    pub fn from_class_offset(offset: i32) -> Option<Self> {
        match offset {
            0 => Some(Dimension::Xy),
            1000 => Some(Dimension::Xyz),
            2000 => Some(Dimension::Xym),
            3000 => Some(Dimension::Xyzm),
            _ => None,
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Xy => write!(f, "XY"),
            Dimension::Xyz => write!(f, "XYZ"),
            Dimension::Xym => write!(f, "XYM"),
            Dimension::Xyzm => write!(f, "XYZM"),
        }
    }
}

/// One vertex with every ordinate spelled out.
///
/// Ordinates the dimension model does not carry are 0.0. This is the single
/// accessor shape used by the codec, the bridge and ring-closure checks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl Vertex {
    #[inline]
    pub fn xy(x: f64, y: f64) -> Self {
        Vertex { x, y, z: 0.0, m: 0.0 }
    }

    #[inline]
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Vertex { x, y, z, m: 0.0 }
    }

    #[inline]
    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Vertex { x, y, z: 0.0, m }
    }

    #[inline]
    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Vertex { x, y, z, m }
    }

    /// Exact comparison of X, Y and (for Z models) Z. M never takes part.
    #[inline]
    pub fn same_position(&self, other: &Vertex, dims: Dimension) -> bool {
        self.x == other.x && self.y == other.y && (!dims.has_z() || self.z == other.z)
    }

    /// Drops the ordinates `dims` does not carry.
    pub fn restricted_to(&self, dims: Dimension) -> Vertex {
        Vertex {
            x: self.x,
            y: self.y,
            z: if dims.has_z() { self.z } else { 0.0 },
            m: if dims.has_m() { self.m } else { 0.0 },
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.m.is_finite()
    }

    /// Planar distance in the XY plane.
    #[inline]
    pub fn distance_2d(&self, other: &Vertex) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
