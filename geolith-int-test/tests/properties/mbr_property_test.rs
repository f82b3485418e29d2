use geolith_int_test::test_util::{
    create_test_context, random_geometry, random_vertex, run_test, DIMENSIONS,
};

#[test]
fn test_mbr_encloses_every_vertex() {
    run_test(create_test_context, |ctx| {
        for dims in DIMENSIONS {
            for _ in 0..50 {
                let geom = random_geometry(ctx.rng(), dims);
                let mbr = geom.mbr().expect("computed MBR");
                assert!(geom.vertices().all(|v| mbr.contains_point(v.x, v.y)));
                assert_eq!(geom.current_mbr().as_ref(), Some(mbr));
            }
        }
        Ok(())
    });
}

#[test]
fn test_adding_vertices_never_shrinks_the_mbr() {
    run_test(create_test_context, |ctx| {
        for dims in DIMENSIONS {
            let mut geom = random_geometry(ctx.rng(), dims);
            for _ in 0..30 {
                let before = geom.current_mbr().expect("non-empty");
                let v = random_vertex(ctx.rng(), dims);
                geom.add_point(v);
                let after = geom.current_mbr().expect("non-empty");
                assert!(after.contains(&before));
                assert!(after.contains_point(v.x, v.y));
            }
        }
        Ok(())
    });
}

#[test]
fn test_shift_moves_the_mbr() {
    run_test(create_test_context, |ctx| {
        let mut geom = random_geometry(ctx.rng(), DIMENSIONS[0]);
        let before = geom.current_mbr().expect("non-empty");
        geom.shift(100.0, -50.0);
        let after = geom.current_mbr().expect("non-empty");
        assert!((after.min_x - (before.min_x + 100.0)).abs() < 1e-9);
        assert!((after.max_y - (before.max_y - 50.0)).abs() < 1e-9);
        assert!((after.width() - before.width()).abs() < 1e-9);
        Ok(())
    });
}
