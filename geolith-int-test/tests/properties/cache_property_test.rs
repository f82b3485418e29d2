use geolith::codec::serialize;
use geolith::geometry::GeometryCollection;
use geolith_geos::{CachePolicy, RelationConfig, RelationContext, Tristate};
use geolith_int_test::test_util::{
    create_test_context, random_polygon_in, run_test, square,
};

type Plain = fn(&mut RelationContext, &GeometryCollection, &GeometryCollection) -> Tristate;
type Prepared = fn(
    &mut RelationContext,
    &GeometryCollection,
    &[u8],
    &GeometryCollection,
    &[u8],
) -> Tristate;

fn predicates() -> [(&'static str, Plain, Prepared); 9] {
    [
        ("intersects", RelationContext::intersects, RelationContext::prepared_intersects),
        ("disjoint", RelationContext::disjoint, RelationContext::prepared_disjoint),
        ("overlaps", RelationContext::overlaps, RelationContext::prepared_overlaps),
        ("crosses", RelationContext::crosses, RelationContext::prepared_crosses),
        ("touches", RelationContext::touches, RelationContext::prepared_touches),
        ("within", RelationContext::within, RelationContext::prepared_within),
        ("contains", RelationContext::contains, RelationContext::prepared_contains),
        ("covers", RelationContext::covers, RelationContext::prepared_covers),
        ("covered_by", RelationContext::covered_by, RelationContext::prepared_covered_by),
    ]
}

/// Context that always reaches the cache.
fn cache_only(policy: CachePolicy) -> RelationContext {
    RelationContext::with_config(
        RelationConfig::new()
            .with_cache_policy(policy)
            .with_mbr_precheck(false),
    )
}

#[test]
fn test_cache_state_never_changes_answers() {
    run_test(create_test_context, |ctx| {
        let filler = square(-500.0, -500.0, 1.0);
        let filler_blob = serialize(&filler)?;
        let other_filler = square(500.0, 500.0, 1.0);
        let other_blob = serialize(&other_filler)?;
        let (rel, rng) = ctx.split();

        for _ in 0..15 {
            let a = random_polygon_in(rng, 0.0, 60.0, 0.0, 60.0);
            let b = random_polygon_in(rng, 30.0, 90.0, 30.0, 90.0);
            let (blob_a, blob_b) = (serialize(&a)?, serialize(&b)?);

            for policy in [CachePolicy::TwoSlot, CachePolicy::Lru(1), CachePolicy::Lru(3)] {
                for (name, plain, prepared) in predicates() {
                    let expected = plain(rel, &a, &b);

                    // cold, then with the first operand cached
                    let mut warm = cache_only(policy);
                    assert_eq!(prepared(&mut warm, &a, &blob_a, &b, &blob_b), expected, "{} cold", name);
                    assert_eq!(prepared(&mut warm, &a, &blob_a, &b, &blob_b), expected, "{} warm", name);
                    assert!(warm.stats().cache_hits() > 0, "{} under {:?}", name, policy);

                    // with only the second operand cached
                    let mut second = cache_only(policy);
                    prepared(&mut second, &filler, &filler_blob, &b, &blob_b);
                    assert_eq!(
                        prepared(&mut second, &a, &blob_a, &b, &blob_b),
                        expected,
                        "{} second side",
                        name
                    );

                    // with both slots holding unrelated geometries
                    let mut unrelated = cache_only(policy);
                    prepared(&mut unrelated, &filler, &filler_blob, &other_filler, &other_blob);
                    assert_eq!(
                        prepared(&mut unrelated, &a, &blob_a, &b, &blob_b),
                        expected,
                        "{} unrelated",
                        name
                    );
                }
            }
        }
        Ok(())
    });
}

#[test]
fn test_disjoint_regions_never_reach_the_engine() {
    run_test(create_test_context, |ctx| {
        let (rel, rng) = ctx.split();
        for _ in 0..30 {
            let a = random_polygon_in(rng, 0.0, 100.0, 0.0, 100.0);
            let b = random_polygon_in(rng, 200.0, 300.0, -50.0, 50.0);
            let (blob_a, blob_b) = (serialize(&a)?, serialize(&b)?);

            for (name, plain, prepared) in predicates() {
                let expected = if name == "disjoint" {
                    Tristate::True
                } else {
                    Tristate::False
                };
                assert_eq!(plain(rel, &a, &b), expected, "{}", name);
                assert_eq!(prepared(rel, &a, &blob_a, &b, &blob_b), expected, "{}", name);
            }
            assert_eq!(rel.equals(&a, &b), Tristate::False);
        }
        assert_eq!(rel.stats().engine_calls(), 0);
        assert!(rel.cache().is_empty());
        Ok(())
    });
}
