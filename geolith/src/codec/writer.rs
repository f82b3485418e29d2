use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian, WriteBytesExt};

use super::class::{BlobClass, BLOB_END, BLOB_ENTITY, BLOB_MBR_END, BLOB_START};
use crate::config::{ByteOrder, CodecConfig};
use crate::errors::{ErrorKind, GeoError, GeoResult};
use crate::geometry::{
    CoordinateArray, Dimension, GeometryCollection, GeometryType, Linestring, Point, Polygon,
    Vertex, Vertices,
};

/// Serializes a geometry in little-endian, uncompressed form.
pub fn serialize(geom: &GeometryCollection) -> GeoResult<Vec<u8>> {
    serialize_with(geom, &CodecConfig::default())
}

/// Serializes a geometry with linestring and ring interiors stored as f32 deltas.
pub fn serialize_compressed(geom: &GeometryCollection) -> GeoResult<Vec<u8>> {
    serialize_with(geom, &CodecConfig::new().with_compressed(true))
}

/// Serializes a geometry with the byte order and compression of `config`.
///
/// Fails with [`ErrorKind::EmptyGeometry`] when the collection holds nothing.
/// The MBR written to the header is always recomputed from the vertices.
pub fn serialize_with(geom: &GeometryCollection, config: &CodecConfig) -> GeoResult<Vec<u8>> {
    let compressed = config.compressed();
    match config.byte_order() {
        order @ ByteOrder::LittleEndian => {
            BlobWriter::<LittleEndian>::new(geom, order, compressed).write()
        }
        order @ ByteOrder::BigEndian => BlobWriter::<BigEndian>::new(geom, order, compressed).write(),
    }
}

struct BlobWriter<'a, E: Endian> {
    geom: &'a GeometryCollection,
    dims: Dimension,
    order: ByteOrder,
    compressed: bool,
    buf: Vec<u8>,
    _order: PhantomData<E>,
}

impl<'a, E: Endian> BlobWriter<'a, E> {
    fn new(geom: &'a GeometryCollection, order: ByteOrder, compressed: bool) -> Self {
        BlobWriter {
            geom,
            dims: geom.dimension(),
            order,
            compressed,
            buf: Vec::with_capacity(Self::estimate_len(geom)),
            _order: PhantomData,
        }
    }

    fn estimate_len(geom: &GeometryCollection) -> usize {
        let stride = geom.dimension().stride() * 8;
        let vertices = geom.vertices().count();
        let parts = geom.num_points() + geom.num_linestrings() + geom.num_polygons();
        64 + vertices * stride + parts * 16
    }

    fn write(mut self) -> GeoResult<Vec<u8>> {
        let geom = self.geom;
        let kind = geom.geometry_type().ok_or_else(|| {
            GeoError::new("Cannot serialize an empty geometry", ErrorKind::EmptyGeometry)
        })?;
        let mbr = geom.envelope().ok_or_else(|| {
            GeoError::new("Cannot serialize an empty geometry", ErrorKind::EmptyGeometry)
        })?;

        self.buf.push(BLOB_START);
        self.buf.push(self.order.marker());
        self.buf.write_i32::<E>(geom.srid())?;
        self.buf.write_f64::<E>(mbr.min_x)?;
        self.buf.write_f64::<E>(mbr.min_y)?;
        self.buf.write_f64::<E>(mbr.max_x)?;
        self.buf.write_f64::<E>(mbr.max_y)?;
        self.buf.push(BLOB_MBR_END);
        self.write_class(kind)?;

        match kind {
            GeometryType::Point => self.write_point(&geom.points()[0])?,
            GeometryType::Linestring => self.write_linestring(&geom.linestrings()[0])?,
            GeometryType::Polygon => self.write_polygon(&geom.polygons()[0])?,
            GeometryType::MultiPoint
            | GeometryType::MultiLinestring
            | GeometryType::MultiPolygon
            | GeometryType::GeometryCollection => {
                let count = geom.num_points() + geom.num_linestrings() + geom.num_polygons();
                self.write_count(count)?;
                for point in geom.points() {
                    self.buf.push(BLOB_ENTITY);
                    self.write_class(GeometryType::Point)?;
                    self.write_point(point)?;
                }
                for line in geom.linestrings() {
                    self.buf.push(BLOB_ENTITY);
                    self.write_class(GeometryType::Linestring)?;
                    self.write_linestring(line)?;
                }
                for polygon in geom.polygons() {
                    self.buf.push(BLOB_ENTITY);
                    self.write_class(GeometryType::Polygon)?;
                    self.write_polygon(polygon)?;
                }
            }
            GeometryType::Unknown => {
                return Err(GeoError::new(
                    "Geometry kind could not be resolved",
                    ErrorKind::InternalError,
                ))
            }
        }

        self.buf.push(BLOB_END);
        Ok(self.buf)
    }

    fn write_class(&mut self, kind: GeometryType) -> GeoResult<()> {
        let class = BlobClass::new(kind, self.dims, self.compressed);
        self.buf.write_i32::<E>(class.code())?;
        Ok(())
    }

    fn write_count(&mut self, count: usize) -> GeoResult<()> {
        let count = i32::try_from(count).map_err(|_| {
            GeoError::new(
                &format!("Element count {} does not fit the blob format", count),
                ErrorKind::EncodingError,
            )
        })?;
        self.buf.write_i32::<E>(count)?;
        Ok(())
    }

    fn write_vertex(&mut self, v: &Vertex) -> GeoResult<()> {
        self.buf.write_f64::<E>(v.x)?;
        self.buf.write_f64::<E>(v.y)?;
        if self.dims.has_z() {
            self.buf.write_f64::<E>(v.z)?;
        }
        if self.dims.has_m() {
            self.buf.write_f64::<E>(v.m)?;
        }
        Ok(())
    }

    fn write_point(&mut self, point: &Point) -> GeoResult<()> {
        self.write_vertex(&point.vertex())
    }

    fn write_linestring(&mut self, line: &Linestring) -> GeoResult<()> {
        self.write_coords(line.coords())
    }

    fn write_polygon(&mut self, polygon: &Polygon) -> GeoResult<()> {
        self.write_count(1 + polygon.num_interiors())?;
        for ring in polygon.rings() {
            self.write_coords(ring.coords())?;
        }
        Ok(())
    }

    fn write_coords(&mut self, coords: &CoordinateArray) -> GeoResult<()> {
        let n = coords.len();
        self.write_count(n)?;
        if !self.compressed {
            for v in coords.iter() {
                self.write_vertex(&v)?;
            }
            return Ok(());
        }

        // deltas are taken from the previously decoded vertex so that
        // rounding does not accumulate along the run
        let mut last = Vertex::default();
        for (i, v) in coords.iter().enumerate() {
            if i == 0 || i == n - 1 {
                self.write_vertex(&v)?;
                last = v;
                continue;
            }
            let dx = (v.x - last.x) as f32;
            let dy = (v.y - last.y) as f32;
            self.buf.write_f32::<E>(dx)?;
            self.buf.write_f32::<E>(dy)?;
            last.x += dx as f64;
            last.y += dy as f64;
            if self.dims.has_z() {
                let dz = (v.z - last.z) as f32;
                self.buf.write_f32::<E>(dz)?;
                last.z += dz as f64;
            }
            if self.dims.has_m() {
                self.buf.write_f64::<E>(v.m)?;
                last.m = v.m;
            }
        }
        Ok(())
    }
}
