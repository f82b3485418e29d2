use crate::geometry::{Dimension, GeometryType};

pub const BLOB_START: u8 = 0x00;
pub const BLOB_MBR_END: u8 = 0x7C;
pub const BLOB_ENTITY: u8 = 0x69;
pub const BLOB_END: u8 = 0xFE;

/// Offset of the class type in the header.
pub const CLASS_OFFSET: usize = 39;
/// Header length: start, endian, srid, mbr, mbr end marker and class type.
pub const HEADER_LEN: usize = 43;
/// Length of the signature prefix compared by the prepared-geometry cache.
pub const SIGNATURE_LEN: usize = 46;
/// Smallest structurally complete blob: header, a 2D point and the end marker.
pub const MIN_BLOB_LEN: usize = HEADER_LEN + 16 + 1;

const COMPRESSED_OFFSET: i32 = 1_000_000;

/// Class type stored in a blob header or entity marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobClass {
    pub kind: GeometryType,
    pub dims: Dimension,
    pub compressed: bool,
}

impl BlobClass {
    pub fn new(kind: GeometryType, dims: Dimension, compressed: bool) -> Self {
        // only linestrings and polygons have compressed codes
        let compressed =
            compressed && matches!(kind, GeometryType::Linestring | GeometryType::Polygon);
        BlobClass {
            kind,
            dims,
            compressed,
        }
    }

    pub fn code(&self) -> i32 {
        let base = self.kind.code() + self.dims.class_offset();
        if self.compressed {
            base + COMPRESSED_OFFSET
        } else {
            base
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        let (compressed, rest) = if code >= COMPRESSED_OFFSET {
            (true, code - COMPRESSED_OFFSET)
        } else {
            (false, code)
        };
        if rest < 0 {
            return None;
        }
        let dims = Dimension::from_class_offset((rest / 1000) * 1000)?;
        let kind = GeometryType::from_code(rest % 1000)?;
        match kind {
            GeometryType::Unknown => None,
            GeometryType::Linestring | GeometryType::Polygon => Some(BlobClass {
                kind,
                dims,
                compressed,
            }),
            _ if compressed => None,
            _ => Some(BlobClass {
                kind,
                dims,
                compressed: false,
            }),
        }
    }

    /// Whether an entity of class `entity` may appear inside this class.
    pub fn accepts_entity(&self, entity: &BlobClass) -> bool {
        if entity.dims != self.dims {
            return false;
        }
        match self.kind {
            GeometryType::MultiPoint => entity.kind == GeometryType::Point,
            GeometryType::MultiLinestring => entity.kind == GeometryType::Linestring,
            GeometryType::MultiPolygon => entity.kind == GeometryType::Polygon,
            GeometryType::GeometryCollection => !entity.kind.is_multi(),
            _ => false,
        }
    }
}
