use geolith::geometry::Dimension;
use geolith_geos::bridge::{from_engine, to_engine, ExportMode};
use geolith_int_test::test_util::{create_test_context, random_geometry, run_test, DIMENSIONS};

#[test]
fn test_engine_round_trip_keeps_geometry() {
    run_test(create_test_context, |ctx| {
        for dims in [Dimension::Xy, Dimension::Xyz] {
            for _ in 0..50 {
                let geom = random_geometry(ctx.rng(), dims);
                let engine = to_engine(&geom, ExportMode::All)?.expect("non-empty geometry");
                let mut back = from_engine(&engine, dims)?.expect("non-empty engine geometry");
                assert_eq!(back.srid(), 0);
                back.set_srid(geom.srid());
                assert_eq!(back, geom);
            }
        }
        Ok(())
    });
}

#[test]
fn test_engine_round_trip_drops_measures() {
    run_test(create_test_context, |ctx| {
        for dims in DIMENSIONS {
            for _ in 0..25 {
                let geom = random_geometry(ctx.rng(), dims);
                let engine = to_engine(&geom, ExportMode::All)?.expect("non-empty geometry");
                let back = from_engine(&engine, dims)?.expect("non-empty engine geometry");

                assert_eq!(back.dimension(), dims);
                assert_eq!(back.declared_type(), geom.declared_type());
                let pairs: Vec<_> = geom.vertices().zip(back.vertices()).collect();
                assert_eq!(pairs.len(), geom.vertices().count());
                for (original, restored) in pairs {
                    assert_eq!((restored.x, restored.y), (original.x, original.y));
                    assert_eq!(restored.z, original.z);
                    assert_eq!(restored.m, 0.0);
                }
            }
        }
        Ok(())
    });
}
