use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};

use super::class::{
    BlobClass, BLOB_END, BLOB_MBR_END, BLOB_START, CLASS_OFFSET, MIN_BLOB_LEN,
};
use crate::config::ByteOrder;
use crate::errors::{ErrorKind, GeoError, GeoResult};
use crate::geometry::{Dimension, GeometryType, Mbr};

/// Fixed-layout header of a geometry blob.
///
/// Parsing the header checks every structural marker, including the trailing
/// end marker, but does not look at the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobHeader {
    pub byte_order: ByteOrder,
    pub srid: i32,
    pub mbr: Mbr,
    pub class: BlobClass,
}

impl BlobHeader {
    pub fn parse(blob: &[u8]) -> GeoResult<BlobHeader> {
        if blob.len() < MIN_BLOB_LEN {
            return Err(GeoError::new(
                &format!(
                    "Blob of {} bytes is shorter than the minimal {} bytes",
                    blob.len(),
                    MIN_BLOB_LEN
                ),
                ErrorKind::TruncatedBlob,
            ));
        }
        if blob[0] != BLOB_START {
            return Err(malformed("missing start marker"));
        }
        let byte_order = ByteOrder::from_marker(blob[1])
            .ok_or_else(|| malformed(&format!("invalid endian marker 0x{:02X}", blob[1])))?;
        if blob[38] != BLOB_MBR_END {
            return Err(malformed("missing MBR end marker"));
        }
        if blob[blob.len() - 1] != BLOB_END {
            return Err(malformed("missing end marker"));
        }

        let (srid, mbr, code) = match byte_order {
            ByteOrder::LittleEndian => read_fields::<LittleEndian>(blob),
            ByteOrder::BigEndian => read_fields::<BigEndian>(blob),
        };
        let class = BlobClass::from_code(code).ok_or_else(|| {
            GeoError::new(
                &format!("Unknown geometry class {}", code),
                ErrorKind::UnknownTypeMarker,
            )
        })?;

        Ok(BlobHeader {
            byte_order,
            srid,
            mbr,
            class,
        })
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.class.kind
    }

    pub fn dimension(&self) -> Dimension {
        self.class.dims
    }

    pub fn is_compressed(&self) -> bool {
        self.class.compressed
    }
}

fn read_fields<E: Endian>(blob: &[u8]) -> (i32, Mbr, i32) {
    let srid = E::read_i32(&blob[2..6]);
    let mbr = Mbr {
        min_x: E::read_f64(&blob[6..14]),
        min_y: E::read_f64(&blob[14..22]),
        max_x: E::read_f64(&blob[22..30]),
        max_y: E::read_f64(&blob[30..38]),
    };
    let code = E::read_i32(&blob[CLASS_OFFSET..CLASS_OFFSET + 4]);
    (srid, mbr, code)
}

pub(crate) fn malformed(detail: &str) -> GeoError {
    GeoError::new(&format!("Malformed blob: {}", detail), ErrorKind::MalformedBlob)
}
