use geolith::codec::{
    deserialize, is_valid_blob, serialize, serialize_compressed, serialize_with, BlobHeader,
    CLASS_OFFSET,
};
use geolith::config::{ByteOrder, CodecConfig};
use geolith::errors::ErrorKind;
use geolith::geometry::{Dimension, GeometryCollection, GeometryType, Vertex, Vertices};
use geolith_int_test::test_util::{create_test_context, line_xy, run_test, square};

#[test]
fn test_big_endian_blob_round_trip() {
    run_test(create_test_context, |_ctx| {
        let mut geom = square(10.0, 20.0, 5.0);
        geom.set_srid(3857);
        let config = CodecConfig::new().with_byte_order(ByteOrder::BigEndian);
        let blob = serialize_with(&geom, &config)?;

        let header = BlobHeader::parse(&blob)?;
        assert_eq!(header.byte_order, ByteOrder::BigEndian);
        assert_eq!(header.srid, 3857);
        assert_eq!(header.geometry_type(), GeometryType::Polygon);
        assert_eq!((header.mbr.min_x, header.mbr.max_y), (10.0, 25.0));

        let decoded = deserialize(&blob)?;
        assert_eq!(decoded, geom);
        Ok(())
    });
}

#[test]
fn test_compressed_line_keeps_endpoints_exact() {
    run_test(create_test_context, |_ctx| {
        let mut geom = GeometryCollection::new_xyzm();
        let vertices: Vec<Vertex> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.37;
                Vertex::xyzm(1000.0 + t.cos(), 2000.0 + t.sin(), t, i as f64)
            })
            .collect();
        geom.add_linestring_from(&vertices)?;

        let plain = serialize(&geom)?;
        let compressed = serialize_compressed(&geom)?;
        assert!(compressed.len() < plain.len());
        assert!(BlobHeader::parse(&compressed)?.is_compressed());
        assert_eq!(BlobHeader::parse(&compressed)?.dimension(), Dimension::Xyzm);

        let decoded = deserialize(&compressed)?;
        let line = decoded.linestring(0)?;
        assert_eq!(line.num_points(), 200);
        assert_eq!(line.vertex(0)?, vertices[0]);
        assert_eq!(line.vertex(199)?, vertices[199]);
        for (i, original) in vertices.iter().enumerate() {
            let v = line.vertex(i)?;
            assert!((v.x - original.x).abs() < 1e-3);
            assert!((v.y - original.y).abs() < 1e-3);
            assert!((v.z - original.z).abs() < 1e-3);
            assert_eq!(v.m, original.m);
        }
        Ok(())
    });
}

#[test]
fn test_damaged_blobs_are_rejected() {
    run_test(create_test_context, |_ctx| {
        let blob = serialize(&line_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]))?;
        assert!(is_valid_blob(&blob));

        let err = deserialize(&blob[..30]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TruncatedBlob);

        let mut no_end = blob.clone();
        *no_end.last_mut().unwrap() = 0x00;
        assert_eq!(deserialize(&no_end).unwrap_err().kind(), &ErrorKind::MalformedBlob);
        assert!(!is_valid_blob(&no_end));

        let mut unknown_class = blob.clone();
        unknown_class[CLASS_OFFSET..CLASS_OFFSET + 4].copy_from_slice(&99i32.to_le_bytes());
        assert_eq!(
            deserialize(&unknown_class).unwrap_err().kind(),
            &ErrorKind::UnknownTypeMarker
        );

        let mut bad_count = blob.clone();
        bad_count[43..47].copy_from_slice(&1_000_000i32.to_le_bytes());
        assert!(deserialize(&bad_count).is_err());
        Ok(())
    });
}

#[test]
fn test_empty_collection_cannot_be_serialized() {
    run_test(create_test_context, |_ctx| {
        let err = serialize(&GeometryCollection::new_xy()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EmptyGeometry);
        Ok(())
    });
}
