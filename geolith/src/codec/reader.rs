use std::io::Cursor;
use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian, ReadBytesExt};
use log::debug;

use super::class::{BlobClass, BLOB_ENTITY, HEADER_LEN};
use super::header::{malformed, BlobHeader};
use crate::config::ByteOrder;
use crate::errors::{ErrorKind, GeoError, GeoResult};
use crate::geometry::{
    CoordinateArray, Dimension, GeometryCollection, GeometryType, Linestring, Polygon, Ring,
    Vertex,
};

// marker + class + the smallest payload (a linestring count)
const MIN_ENTITY_LEN: usize = 1 + 4 + 4;

/// Decodes a geometry blob.
///
/// Every count is checked against the bytes that remain before anything is
/// allocated, and the payload must end exactly at the end marker. The returned
/// collection carries the header SRID, the header class as its declared type
/// and an MBR recomputed from the decoded vertices.
pub fn deserialize(blob: &[u8]) -> GeoResult<GeometryCollection> {
    decode(blob).inspect_err(|err| debug!("Rejected geometry blob: {}", err))
}

/// Whether `blob` decodes to a geometry.
pub fn is_valid_blob(blob: &[u8]) -> bool {
    decode(blob).is_ok()
}

fn decode(blob: &[u8]) -> GeoResult<GeometryCollection> {
    let header = BlobHeader::parse(blob)?;
    let payload = &blob[HEADER_LEN..blob.len() - 1];
    let mut geom = match header.byte_order {
        ByteOrder::LittleEndian => BlobReader::<LittleEndian>::new(payload, header.class.dims)
            .read(&header.class)?,
        ByteOrder::BigEndian => {
            BlobReader::<BigEndian>::new(payload, header.class.dims).read(&header.class)?
        }
    };
    geom.set_srid(header.srid);
    geom.set_declared_type(header.class.kind);
    geom.compute_mbr();
    Ok(geom)
}

struct BlobReader<'a, E: Endian> {
    cursor: Cursor<&'a [u8]>,
    dims: Dimension,
    geom: GeometryCollection,
    _order: PhantomData<E>,
}

impl<'a, E: Endian> BlobReader<'a, E> {
    fn new(payload: &'a [u8], dims: Dimension) -> Self {
        BlobReader {
            cursor: Cursor::new(payload),
            dims,
            geom: GeometryCollection::new(dims),
            _order: PhantomData,
        }
    }

    fn read(mut self, class: &BlobClass) -> GeoResult<GeometryCollection> {
        self.read_payload(class, true)?;
        let trailing = self.remaining();
        if trailing != 0 {
            return Err(malformed(&format!(
                "{} unread bytes before end marker",
                trailing
            )));
        }
        Ok(self.geom)
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len();
        len.saturating_sub(self.cursor.position() as usize)
    }

    fn ensure(&self, needed: Option<usize>, what: &str) -> GeoResult<()> {
        let remaining = self.remaining();
        match needed {
            Some(n) if n <= remaining => Ok(()),
            _ => Err(malformed(&format!(
                "{} need more than the {} remaining bytes",
                what, remaining
            ))),
        }
    }

    fn read_count(&mut self, what: &str) -> GeoResult<usize> {
        let raw = self.cursor.read_i32::<E>()?;
        usize::try_from(raw).map_err(|_| malformed(&format!("negative {} count {}", what, raw)))
    }

    fn read_payload(&mut self, class: &BlobClass, top_level: bool) -> GeoResult<()> {
        match class.kind {
            GeometryType::Point => {
                let v = self.read_vertex()?;
                self.geom.add_point(v);
            }
            GeometryType::Linestring => {
                let coords = self.read_coords(class.compressed)?;
                self.geom.insert_linestring(Linestring::from_coords(coords))?;
            }
            GeometryType::Polygon => {
                let polygon = self.read_polygon(class.compressed)?;
                self.geom.insert_polygon(polygon)?;
            }
            GeometryType::MultiPoint
            | GeometryType::MultiLinestring
            | GeometryType::MultiPolygon
            | GeometryType::GeometryCollection
                if top_level =>
            {
                let count = self.read_count("entity")?;
                self.ensure(count.checked_mul(MIN_ENTITY_LEN), "entities")?;
                for _ in 0..count {
                    self.read_entity(class)?;
                }
            }
            _ => return Err(malformed(&format!("unexpected {} entity", class.kind))),
        }
        Ok(())
    }

    fn read_entity(&mut self, parent: &BlobClass) -> GeoResult<()> {
        let marker = self.cursor.read_u8()?;
        if marker != BLOB_ENTITY {
            return Err(malformed(&format!("invalid entity marker 0x{:02X}", marker)));
        }
        let code = self.cursor.read_i32::<E>()?;
        let entity = BlobClass::from_code(code).ok_or_else(|| {
            GeoError::new(
                &format!("Unknown entity class {}", code),
                ErrorKind::UnknownTypeMarker,
            )
        })?;
        if !parent.accepts_entity(&entity) {
            return Err(malformed(&format!(
                "{} {} entity inside {} {}",
                entity.kind, entity.dims, parent.kind, parent.dims
            )));
        }
        self.read_payload(&entity, false)
    }

    fn read_vertex(&mut self) -> GeoResult<Vertex> {
        let x = self.cursor.read_f64::<E>()?;
        let y = self.cursor.read_f64::<E>()?;
        let z = if self.dims.has_z() {
            self.cursor.read_f64::<E>()?
        } else {
            0.0
        };
        let m = if self.dims.has_m() {
            self.cursor.read_f64::<E>()?
        } else {
            0.0
        };
        Ok(Vertex { x, y, z, m })
    }

    fn coords_len(&self, count: usize, compressed: bool) -> Option<usize> {
        let full = self.dims.stride() * 8;
        if !compressed || count <= 2 {
            return count.checked_mul(full);
        }
        let delta = 8 + if self.dims.has_z() { 4 } else { 0 } + if self.dims.has_m() { 8 } else { 0 };
        (count - 2).checked_mul(delta)?.checked_add(2 * full)
    }

    fn read_coords(&mut self, compressed: bool) -> GeoResult<CoordinateArray> {
        let count = self.read_count("vertex")?;
        self.ensure(self.coords_len(count, compressed), "vertices")?;

        let mut vertices = Vec::with_capacity(count);
        let mut last = Vertex::default();
        for i in 0..count {
            let v = if !compressed || i == 0 || i == count - 1 {
                self.read_vertex()?
            } else {
                let mut v = last;
                v.x += self.cursor.read_f32::<E>()? as f64;
                v.y += self.cursor.read_f32::<E>()? as f64;
                if self.dims.has_z() {
                    v.z += self.cursor.read_f32::<E>()? as f64;
                }
                if self.dims.has_m() {
                    v.m = self.cursor.read_f64::<E>()?;
                }
                v
            };
            vertices.push(v);
            last = v;
        }
        Ok(CoordinateArray::from_vertices(self.dims, &vertices))
    }

    fn read_polygon(&mut self, compressed: bool) -> GeoResult<Polygon> {
        let rings = self.read_count("ring")?;
        if rings == 0 {
            return Err(malformed("polygon without exterior ring"));
        }
        self.ensure(rings.checked_mul(4), "rings")?;
        let exterior = Ring::from_coords(self.read_coords(compressed)?);
        let mut interiors = Vec::with_capacity(rings - 1);
        for _ in 1..rings {
            interiors.push(Ring::from_coords(self.read_coords(compressed)?));
        }
        Polygon::from_rings(exterior, interiors)
    }
}
