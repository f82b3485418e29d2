use geolith::geometry::GeometryCollection;
use geolith_geos::{RelationConfig, Tristate, UnknownReason};
use geolith_int_test::test_util::{
    create_test_context, create_test_context_with, line_xy, point_xy, run_test, square,
};

#[test]
fn test_overlapping_squares() {
    run_test(create_test_context, |ctx| {
        let a = square(0.0, 0.0, 4.0);
        let b = square(2.0, 2.0, 4.0);
        let rel = ctx.relations();

        assert_eq!(rel.intersects(&a, &b), Tristate::True);
        assert_eq!(rel.overlaps(&a, &b), Tristate::True);
        assert_eq!(rel.disjoint(&a, &b), Tristate::False);
        assert_eq!(rel.touches(&a, &b), Tristate::False);
        assert_eq!(rel.contains(&a, &b), Tristate::False);
        assert_eq!(rel.equals(&a, &b), Tristate::False);
        assert_eq!(rel.relate_matrix(&a, &b)?.as_deref(), Some("212101212"));
        Ok(())
    });
}

#[test]
fn test_containment_family() {
    run_test(create_test_context, |ctx| {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 3.0);
        let rel = ctx.relations();

        assert_eq!(rel.contains(&outer, &inner), Tristate::True);
        assert_eq!(rel.covers(&outer, &inner), Tristate::True);
        assert_eq!(rel.within(&inner, &outer), Tristate::True);
        assert_eq!(rel.covered_by(&inner, &outer), Tristate::True);
        assert_eq!(rel.within(&outer, &inner), Tristate::False);

        // a boundary point is covered but not contained
        let corner = point_xy(0.0, 0.0);
        assert_eq!(rel.covers(&outer, &corner), Tristate::True);
        assert_eq!(rel.contains(&outer, &corner), Tristate::False);
        Ok(())
    });
}

#[test]
fn test_crossing_lines() {
    run_test(create_test_context, |ctx| {
        let a = line_xy(&[(0.0, 0.0), (10.0, 10.0)]);
        let b = line_xy(&[(0.0, 10.0), (10.0, 0.0)]);
        let c = line_xy(&[(10.0, 10.0), (20.0, 10.0)]);
        let rel = ctx.relations();

        assert_eq!(rel.crosses(&a, &b), Tristate::True);
        assert_eq!(rel.touches(&a, &b), Tristate::False);
        assert_eq!(rel.touches(&a, &c), Tristate::True);
        assert_eq!(rel.relate(&a, &b, "0********"), Tristate::True);
        assert_eq!(rel.relate(&a, &c, "F0*******"), Tristate::False);
        Ok(())
    });
}

#[test]
fn test_disjoint_boxes_skip_engine() {
    run_test(create_test_context, |ctx| {
        let a = square(0.0, 0.0, 1.0);
        let b = square(100.0, 100.0, 1.0);
        let rel = ctx.relations();

        assert_eq!(rel.intersects(&a, &b), Tristate::False);
        assert_eq!(rel.disjoint(&a, &b), Tristate::True);
        assert_eq!(rel.contains(&a, &b), Tristate::False);
        assert_eq!(rel.equals(&a, &b), Tristate::False);
        assert_eq!(rel.stats().engine_calls(), 0);
        assert_eq!(rel.stats().mbr_short_circuits(), 4);
        Ok(())
    });
}

#[test]
fn test_precheck_can_be_disabled() {
    let config = RelationConfig::new().with_mbr_precheck(false);
    run_test(
        || create_test_context_with(config, 1),
        |ctx| {
            let a = square(0.0, 0.0, 1.0);
            let b = square(100.0, 100.0, 1.0);
            let rel = ctx.relations();
            assert_eq!(rel.intersects(&a, &b), Tristate::False);
            assert_eq!(rel.stats().engine_calls(), 1);
            assert_eq!(rel.stats().mbr_short_circuits(), 0);
            Ok(())
        },
    );
}

#[test]
fn test_toxic_operands_are_unknown() {
    run_test(create_test_context, |ctx| {
        let good = square(0.0, 0.0, 4.0);
        let empty = GeometryCollection::new_xy();
        let mut short = GeometryCollection::new_xy();
        short.add_linestring_from(&[geolith::geometry::Vertex::xy(1.0, 1.0)])?;
        let rel = ctx.relations();

        let answer = rel.intersects(&good, &empty);
        assert_eq!(answer, Tristate::Unknown(UnknownReason::ToxicInput));
        assert_eq!(answer.as_sql(), None);
        assert_eq!(answer.to_legacy_int(), -1);

        assert_eq!(
            rel.touches(&short, &good),
            Tristate::Unknown(UnknownReason::ToxicInput)
        );
        assert!(rel.errors().last_aux_error().is_some());
        assert_eq!(rel.stats().toxic_rejections(), 2);
        assert_eq!(rel.stats().engine_calls(), 0);
        Ok(())
    });
}

#[test]
fn test_invalid_relate_pattern() {
    run_test(create_test_context, |ctx| {
        let a = square(0.0, 0.0, 4.0);
        let rel = ctx.relations();
        assert_eq!(
            rel.relate(&a, &a, "T*F**F**"),
            Tristate::Unknown(UnknownReason::EngineFailure)
        );
        assert!(rel.errors().last_error().is_some());
        assert_eq!(rel.relate(&a, &a, "T*F**F***"), Tristate::True);
        assert!(rel.errors().last_error().is_none());
        assert_eq!(
            rel.relate(&a, &a, "t*f**f***"),
            Tristate::Unknown(UnknownReason::EngineFailure)
        );
        assert!(rel.errors().last_error().is_some());
        Ok(())
    });
}

#[test]
fn test_validity_checks() {
    run_test(create_test_context, |ctx| {
        let rel = ctx.relations();
        let bowtie = geolith_int_test::test_util::polygon_xy(&[
            (0.0, 0.0),
            (4.0, 4.0),
            (4.0, 0.0),
            (0.0, 4.0),
            (0.0, 0.0),
        ]);
        assert_eq!(rel.is_valid(&bowtie), Tristate::False);
        let reason = rel.is_valid_reason(&bowtie)?.unwrap_or_default();
        assert!(reason.contains("Self-intersection"), "{}", reason);
        assert_eq!(rel.is_valid(&square(0.0, 0.0, 1.0)), Tristate::True);

        let closed = line_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(rel.is_ring(&closed), Tristate::True);
        assert_eq!(rel.is_simple(&closed), Tristate::True);
        assert_eq!(
            rel.is_ring(&square(0.0, 0.0, 1.0)),
            Tristate::Unknown(UnknownReason::UnsupportedInput)
        );
        assert!(rel.errors().last_warning().is_some());
        Ok(())
    });
}

#[test]
fn test_measures() {
    run_test(create_test_context, |ctx| {
        let rel = ctx.relations();
        let a = square(0.0, 0.0, 4.0);
        let line = line_xy(&[(0.0, 0.0), (3.0, 4.0)]);

        assert_eq!(rel.area(&a)?, Some(16.0));
        assert_eq!(rel.perimeter(&a)?, Some(16.0));
        assert_eq!(rel.length(&line)?, Some(5.0));
        // a polygon has no linear components to measure
        assert_eq!(rel.length(&a)?, None);

        let far = point_xy(7.0, 4.0);
        assert_eq!(rel.distance(&a, &far)?, Some(3.0));
        let h = rel.hausdorff_distance(&a, &square(0.0, 0.0, 5.0))?.unwrap_or(0.0);
        assert!((h - 2.0f64.sqrt()).abs() < 1e-9);
        assert!(rel.hausdorff_distance_densify(&a, &far, 0.0).is_err());
        assert!(rel.hausdorff_distance_densify(&a, &far, 0.5)?.is_some());
        Ok(())
    });
}
