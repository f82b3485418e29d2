use std::fmt::{self, Display};

/// Nominal geometry kind attached to a collection.
///
/// The declared type is independent of how many elements a collection actually
/// holds: a single point may still be declared [`GeometryType::MultiPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryType {
    #[default]
    Unknown,
    Point,
    Linestring,
    Polygon,
    MultiPoint,
    MultiLinestring,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// Base class code used by the blob format (0 for `Unknown`).
    pub fn code(self) -> i32 {
        match self {
            GeometryType::Unknown => 0,
            GeometryType::Point => 1,
            GeometryType::Linestring => 2,
            GeometryType::Polygon => 3,
            GeometryType::MultiPoint => 4,
            GeometryType::MultiLinestring => 5,
            GeometryType::MultiPolygon => 6,
            GeometryType::GeometryCollection => 7,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(GeometryType::Unknown),
            1 => Some(GeometryType::Point),
            2 => Some(GeometryType::Linestring),
            3 => Some(GeometryType::Polygon),
            4 => Some(GeometryType::MultiPoint),
            5 => Some(GeometryType::MultiLinestring),
            6 => Some(GeometryType::MultiPolygon),
            7 => Some(GeometryType::GeometryCollection),
            _ => None,
        }
    }

    pub fn is_multi(self) -> bool {
        matches!(
            self,
            GeometryType::MultiPoint
                | GeometryType::MultiLinestring
                | GeometryType::MultiPolygon
                | GeometryType::GeometryCollection
        )
    }

    /// The multi kind of a singular kind.
    pub fn to_multi(self) -> Self {
        match self {
            GeometryType::Point => GeometryType::MultiPoint,
            GeometryType::Linestring => GeometryType::MultiLinestring,
            GeometryType::Polygon => GeometryType::MultiPolygon,
            other => other,
        }
    }

    /// Resolves the kind a collection exports as.
    ///
    /// A single category holding exactly one element exports as its singular kind
    /// unless `declared` asks for the matching multi kind or a geometry
    /// collection. A single category holding several elements exports as its
    /// multi kind unless `declared` is a geometry collection. Mixed content is
    /// always a geometry collection. Returns `None` when nothing is present.
    pub fn infer(points: usize, lines: usize, polygons: usize, declared: GeometryType) -> Option<Self> {
        let single = |singular: GeometryType| match declared {
            GeometryType::GeometryCollection => GeometryType::GeometryCollection,
            d if d == singular.to_multi() => d,
            _ => singular,
        };
        let several = |multi: GeometryType| match declared {
            GeometryType::GeometryCollection => GeometryType::GeometryCollection,
            _ => multi,
        };
        match (points, lines, polygons) {
            (0, 0, 0) => None,
            (1, 0, 0) => Some(single(GeometryType::Point)),
            (_, 0, 0) => Some(several(GeometryType::MultiPoint)),
            (0, 1, 0) => Some(single(GeometryType::Linestring)),
            (0, _, 0) => Some(several(GeometryType::MultiLinestring)),
            (0, 0, 1) => Some(single(GeometryType::Polygon)),
            (0, 0, _) => Some(several(GeometryType::MultiPolygon)),
            _ => Some(GeometryType::GeometryCollection),
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryType::Unknown => "GEOMETRY",
            GeometryType::Point => "POINT",
            GeometryType::Linestring => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLinestring => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        };
        write!(f, "{}", name)
    }
}
