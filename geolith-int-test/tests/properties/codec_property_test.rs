use geolith::codec::{deserialize, serialize, serialize_with, BlobHeader, BlobSignature};
use geolith::config::{ByteOrder, CodecConfig};
use geolith_int_test::test_util::{create_test_context, random_geometry, run_test, DIMENSIONS};

#[test]
fn test_random_geometries_survive_the_codec() {
    run_test(create_test_context, |ctx| {
        let big_endian = CodecConfig::new().with_byte_order(ByteOrder::BigEndian);
        for dims in DIMENSIONS {
            for _ in 0..50 {
                let geom = random_geometry(ctx.rng(), dims);

                let blob = serialize(&geom)?;
                assert_eq!(deserialize(&blob)?, geom);

                let swapped = serialize_with(&geom, &big_endian)?;
                assert_eq!(swapped.len(), blob.len());
                assert_eq!(deserialize(&swapped)?, geom);

                let header = BlobHeader::parse(&blob)?;
                assert_eq!(header.srid, geom.srid());
                assert_eq!(header.dimension(), dims);
                assert_eq!(header.geometry_type(), geom.declared_type());
                assert_eq!(Some(&header.mbr), geom.mbr());
            }
        }
        Ok(())
    });
}

#[test]
fn test_reserialization_is_stable() {
    run_test(create_test_context, |ctx| {
        for dims in DIMENSIONS {
            for _ in 0..25 {
                let geom = random_geometry(ctx.rng(), dims);
                let blob = serialize(&geom)?;
                let again = serialize(&deserialize(&blob)?)?;
                assert_eq!(again, blob);
                assert!(BlobSignature::of(&blob).matches(&again));
            }
        }
        Ok(())
    });
}
