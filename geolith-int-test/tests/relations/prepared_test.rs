use geolith::codec::serialize;
use geolith_geos::{CachePolicy, RelationConfig, Tristate};
use geolith_int_test::test_util::{
    create_test_context, create_test_context_with, line_xy, random_polygon_in, run_test, square,
};

#[test]
fn test_fixed_operand_is_prepared_once() {
    run_test(create_test_context, |ctx| {
        let query = square(0.0, 0.0, 50.0);
        let query_blob = serialize(&query)?;
        let (rel, rng) = ctx.split();

        for _ in 0..20 {
            // rows stay inside the query box so none is settled by the pre-check
            let row = random_polygon_in(rng, 0.0, 50.0, 0.0, 50.0);
            let row_blob = serialize(&row)?;
            let prepared = rel.prepared_intersects(&query, &query_blob, &row, &row_blob);
            assert_eq!(prepared, rel.intersects(&query, &row));
        }

        // the first call fills the slots, every later one hits the query
        assert_eq!(rel.stats().cache_misses(), 1);
        assert_eq!(rel.stats().cache_hits(), 19);
        assert!(rel.cache().slot(0).is_some_and(|s| s.is_prepared()));
        Ok(())
    });
}

#[test]
fn test_prepared_answers_match_plain_answers() {
    run_test(create_test_context, |ctx| {
        let (rel, rng) = ctx.split();
        let query = random_polygon_in(rng, 20.0, 80.0, 20.0, 80.0);
        let query_blob = serialize(&query)?;

        for _ in 0..40 {
            let row = random_polygon_in(rng, 0.0, 100.0, 0.0, 100.0);
            let blob = serialize(&row)?;
            let (q, qb, r, rb) = (&query, &query_blob[..], &row, &blob[..]);

            assert_eq!(rel.prepared_intersects(q, qb, r, rb), rel.intersects(q, r));
            assert_eq!(rel.prepared_disjoint(q, qb, r, rb), rel.disjoint(q, r));
            assert_eq!(rel.prepared_overlaps(q, qb, r, rb), rel.overlaps(q, r));
            assert_eq!(rel.prepared_touches(q, qb, r, rb), rel.touches(q, r));
            assert_eq!(rel.prepared_crosses(q, qb, r, rb), rel.crosses(q, r));
            assert_eq!(rel.prepared_contains(q, qb, r, rb), rel.contains(q, r));
            assert_eq!(rel.prepared_within(q, qb, r, rb), rel.within(q, r));
            assert_eq!(rel.prepared_covers(q, qb, r, rb), rel.covers(q, r));
            assert_eq!(rel.prepared_covered_by(q, qb, r, rb), rel.covered_by(q, r));

            // the row side is the fixed one when the operands are swapped
            assert_eq!(rel.prepared_within(r, rb, q, qb), rel.within(r, q));
            assert_eq!(rel.prepared_contains(r, rb, q, qb), rel.contains(r, q));
        }
        assert!(rel.stats().cache_hits() > 0);
        Ok(())
    });
}

#[test]
fn test_lookalike_blobs_never_hit() {
    run_test(create_test_context, |ctx| {
        // same MBR, class, vertex count and first vertex
        let a = line_xy(&[(0.0, 0.0), (5.0, 1.0), (10.0, 10.0)]);
        let b = line_xy(&[(0.0, 0.0), (5.0, 9.0), (10.0, 10.0)]);
        let query = line_xy(&[(0.0, 5.0), (10.0, 5.0)]);
        let other = square(1.0, 1.0, 2.0);
        let (blob_a, blob_b) = (serialize(&a)?, serialize(&b)?);
        let (blob_query, blob_other) = (serialize(&query)?, serialize(&other)?);
        let rel = ctx.relations();

        rel.prepared_intersects(&a, &blob_a, &query, &blob_query);
        let answer = rel.prepared_crosses(&b, &blob_b, &other, &blob_other);
        assert_eq!(answer, rel.crosses(&b, &other));
        assert_eq!(rel.stats().cache_hits(), 0);
        assert_eq!(rel.stats().cache_misses(), 2);
        Ok(())
    });
}

#[test]
fn test_policy_change_rebuilds_cache() {
    let config = RelationConfig::new().with_cache_policy(CachePolicy::TwoSlot);
    run_test(
        || create_test_context_with(config, 9),
        |ctx| {
            let query = square(0.0, 0.0, 10.0);
            let query_blob = serialize(&query)?;
            let row = square(5.0, 5.0, 10.0);
            let row_blob = serialize(&row)?;
            let rel = ctx.relations();

            rel.prepared_intersects(&query, &query_blob, &row, &row_blob);
            assert_eq!(rel.cache().policy(), CachePolicy::TwoSlot);
            assert_eq!(rel.cache().len(), 2);

            rel.config().set_cache_policy(CachePolicy::Lru(4));
            let answer = rel.prepared_intersects(&query, &query_blob, &row, &row_blob);
            assert_eq!(answer, Tristate::True);
            assert_eq!(rel.cache().policy(), CachePolicy::Lru(4));
            // the rebuilt cache starts empty, so this was a miss
            assert_eq!(rel.stats().cache_hits(), 0);

            rel.reset_cache();
            assert!(rel.cache().is_empty());
            Ok(())
        },
    );
}
