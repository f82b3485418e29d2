use geolith::codec::{deserialize, serialize, BlobHeader};
use geolith::geometry::{GeometryCollection, GeometryType, Vertex, Vertices};
use geolith::sql::dequoted_sql;
use geolith_geos::bridge::{from_engine, to_engine, ExportMode};
use geolith_geos::Tristate;
use geolith_int_test::test_util::{create_test_context, polygon_xy, run_test, square};

#[test]
fn test_square_polygon_measures() {
    run_test(create_test_context, |ctx| {
        let mut sq = square(0.0, 0.0, 4.0);
        sq.set_srid(4326);
        assert_eq!(sq.area(), 16.0);

        let mut ring_line = GeometryCollection::new_xy();
        let exterior = sq.polygon(0)?.exterior().coords().to_vertices();
        ring_line.add_linestring_from(&exterior)?;
        assert!(ring_line.is_closed_geom());

        let rel = ctx.relations();
        assert_eq!(rel.area(&sq)?, Some(16.0));
        let hull = rel.convex_hull(&sq)?.expect("hull of a square");
        assert_eq!(hull.srid(), 4326);
        assert_eq!(rel.equals(&hull, &sq), Tristate::True);
        Ok(())
    });
}

#[test]
fn test_squares_sharing_one_edge() {
    run_test(create_test_context, |ctx| {
        // rings as given, without a closing vertex
        let left = polygon_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let right = polygon_xy(&[(1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0)]);
        let rel = ctx.relations();

        assert_eq!(rel.touches(&left, &right), Tristate::True);
        assert_eq!(rel.overlaps(&left, &right), Tristate::False);
        assert_eq!(rel.intersects(&left, &right), Tristate::True);
        assert_eq!(rel.contains(&left, &right), Tristate::False);
        Ok(())
    });
}

#[test]
fn test_singleton_multipoint_keeps_its_kind() {
    run_test(create_test_context, |_ctx| {
        let mut geom = GeometryCollection::new_xy();
        geom.add_point(Vertex::xy(3.0, 4.0));
        geom.set_declared_type(GeometryType::MultiPoint);

        let blob = serialize(&geom)?;
        assert_eq!(
            BlobHeader::parse(&blob)?.geometry_type(),
            GeometryType::MultiPoint
        );

        let decoded = deserialize(&blob)?;
        assert_eq!(decoded.num_points(), 1);
        assert_eq!(decoded.declared_type(), GeometryType::MultiPoint);

        let engine = to_engine(&decoded, ExportMode::All)?.expect("one point to export");
        let back = from_engine(&engine, decoded.dimension())?.expect("one point back");
        assert_eq!(back.num_points(), 1);
        assert_eq!(back.declared_type(), GeometryType::MultiPoint);
        assert_eq!(back.point(0)?.vertex(), Vertex::xy(3.0, 4.0));
        Ok(())
    });
}

#[test]
fn test_dequoting_sql_values() {
    run_test(create_test_context, |_ctx| {
        assert_eq!(
            dequoted_sql(r#""it's ""quoted""""#).as_deref(),
            Some(r#"it's "quoted""#)
        );
        assert_eq!(dequoted_sql("'O''Brien'").as_deref(), Some("O'Brien"));
        // a lone inner quote is rejected rather than guessed at
        assert_eq!(dequoted_sql(r#""bad"quote""#), None);
        assert_eq!(dequoted_sql("plain").as_deref(), Some("plain"));
        Ok(())
    });
}
