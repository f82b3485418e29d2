use geolith::geometry::{GeometryCollection, GeometryType, Vertices};
use geolith_geos::{lines_cut_at_nodes, EngineError, Tristate};
use geolith_int_test::test_util::{create_test_context, line_xy, point_xy, run_test, square};

fn points(coords: &[(f64, f64)]) -> GeometryCollection {
    let mut geom = GeometryCollection::new_xy();
    for (x, y) in coords {
        geom.add_point_xy(*x, *y).expect("XY point");
    }
    geom.set_declared_type(GeometryType::MultiPoint);
    geom.compute_mbr();
    geom
}

#[test]
fn test_overlay_areas() {
    run_test(create_test_context, |ctx| {
        let mut a = square(0.0, 0.0, 4.0);
        a.set_srid(4326);
        let b = square(2.0, 2.0, 4.0);
        let rel = ctx.relations();

        let union = rel.union(&a, &b)?.expect("non-empty union");
        assert_eq!(union.srid(), 4326);
        assert!((union.area() - 28.0).abs() < 1e-9);

        let inter = rel.intersection(&a, &b)?.expect("squares overlap");
        assert!((inter.area() - 4.0).abs() < 1e-9);
        assert_eq!(inter.geometry_type(), Some(GeometryType::Polygon));

        let diff = rel.difference(&a, &b)?.expect("a is not covered by b");
        assert!((diff.area() - 12.0).abs() < 1e-9);
        let sym = rel.sym_difference(&a, &b)?.expect("squares differ");
        assert!((sym.area() - 24.0).abs() < 1e-9);

        // nothing left is an absent result, not an error
        assert!(rel.difference(&a, &a)?.is_none());
        Ok(())
    });
}

#[test]
fn test_multi_declaration_survives_overlay() {
    run_test(create_test_context, |ctx| {
        let mut a = square(0.0, 0.0, 4.0);
        a.set_declared_type(GeometryType::MultiPolygon);
        let b = square(1.0, 1.0, 1.0);
        let rel = ctx.relations();

        let diff = rel.difference(&a, &b)?.expect("holed square");
        assert_eq!(diff.declared_type(), GeometryType::MultiPolygon);
        assert_eq!(diff.polygon(0)?.num_interiors(), 1);

        let hull = rel.convex_hull(&a)?.expect("hull of a square");
        assert_eq!(hull.declared_type(), GeometryType::Polygon);
        Ok(())
    });
}

#[test]
fn test_unary_constructions() {
    run_test(create_test_context, |ctx| {
        let a = square(0.0, 0.0, 4.0);
        let rel = ctx.relations();

        let centroid = rel.centroid(&a)?.expect("centroid");
        let c = centroid.point(0)?;
        assert!((c.x() - 2.0).abs() < 1e-12 && (c.y() - 2.0).abs() < 1e-12);

        let inside = rel.point_on_surface(&a)?.expect("surface point");
        assert_eq!(rel.contains(&a, &inside), Tristate::True);

        let boundary = rel.boundary(&a)?.expect("boundary ring");
        assert_eq!(boundary.num_linestrings(), 1);
        assert!((boundary.length() - 16.0).abs() < 1e-9);

        let disc = rel.buffer(&point_xy(0.0, 0.0), 1.0, Some(64))?.expect("disc");
        assert!((disc.area() - std::f64::consts::PI).abs() < 1e-3);

        let wiggly = line_xy(&[(0.0, 0.0), (1.0, 0.01), (2.0, 0.0), (3.0, 0.01), (4.0, 0.0)]);
        let straight = rel.simplify(&wiggly, 0.1)?.expect("simplified line");
        assert_eq!(straight.linestring(0)?.num_points(), 2);
        let kept = rel.simplify_preserve_topology(&wiggly, 0.001)?.expect("line");
        assert_eq!(kept.linestring(0)?.num_points(), 5);
        Ok(())
    });
}

#[test]
fn test_polygonize_and_line_merge() {
    run_test(create_test_context, |ctx| {
        let mut edges = GeometryCollection::new_xy();
        for (from, to) in [
            ((0.0, 0.0), (4.0, 0.0)),
            ((4.0, 0.0), (4.0, 4.0)),
            ((4.0, 4.0), (0.0, 4.0)),
            ((0.0, 4.0), (0.0, 0.0)),
        ] {
            edges.add_linestring_from(&[
                geolith::geometry::Vertex::xy(from.0, from.1),
                geolith::geometry::Vertex::xy(to.0, to.1),
            ])?;
        }
        edges.set_declared_type(GeometryType::MultiLinestring);
        edges.compute_mbr();
        let rel = ctx.relations();

        let polygons = rel.polygonize(&edges, false)?.expect("one face");
        assert_eq!(polygons.num_polygons(), 1);
        assert_eq!(polygons.declared_type(), GeometryType::Polygon);
        assert!((polygons.area() - 16.0).abs() < 1e-9);
        let forced = rel.polygonize(&edges, true)?.expect("one face");
        assert_eq!(forced.declared_type(), GeometryType::MultiPolygon);

        let merged = rel.line_merge(&edges)?.expect("merged ring");
        assert_eq!(merged.num_linestrings(), 1);
        assert!(merged.is_closed_geom());

        let err = rel.polygonize(&square(0.0, 0.0, 1.0), false).unwrap_err();
        assert!(matches!(err, EngineError::Unsupported(_)));
        assert!(rel.errors().last_warning().is_some());
        Ok(())
    });
}

#[test]
fn test_tessellations() {
    run_test(create_test_context, |ctx| {
        let sites = points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let rel = ctx.relations();

        let triangles = rel.delaunay_triangulation(&sites, 0.0, false)?.expect("triangles");
        assert_eq!(triangles.num_polygons(), 2);
        assert_eq!(triangles.declared_type(), GeometryType::MultiPolygon);
        assert!((triangles.area() - 100.0).abs() < 1e-9);

        let edges = rel.delaunay_triangulation(&sites, 0.0, true)?.expect("edges");
        assert_eq!(edges.declared_type(), GeometryType::MultiLinestring);
        assert_eq!(edges.num_linestrings(), 5);

        let cells = rel.voronoi_diagram(&sites, 0.0, false)?.expect("cells");
        assert_eq!(cells.num_polygons(), 4);
        // clipped to the extent grown by 5 percent on each side
        let frame = cells.current_mbr().expect("cells have vertices");
        assert!((frame.min_x + 0.5).abs() < 1e-9 && (frame.max_y - 10.5).abs() < 1e-9);
        Ok(())
    });
}

#[test]
fn test_hulls_and_curves() {
    run_test(create_test_context, |ctx| {
        let sites = points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 2.0)]);
        let line = line_xy(&[(0.0, 0.0), (10.0, 0.0)]);
        let rel = ctx.relations();

        let hull = rel.concave_hull(&sites, 1.0, false)?.expect("hull");
        assert!((hull.area() - 100.0).abs() < 1e-9);
        assert!(matches!(
            rel.concave_hull(&sites, 1.5, false),
            Err(EngineError::InvalidArgument(_))
        ));

        let offset = rel.offset_curve(&line, 2.0, 8)?.expect("offset");
        let v = offset.linestring(0)?.vertex(0)?;
        assert!((v.y - 2.0).abs() < 1e-9);
        assert!(rel.offset_curve(&line, 2.0, 0).is_err());
        assert!(matches!(
            rel.offset_curve(&square(0.0, 0.0, 1.0), 1.0, 8),
            Err(EngineError::Unsupported(_))
        ));

        let left = rel.single_sided_buffer(&line, 1.0, 8, true)?.expect("strip");
        assert!((left.area() - 10.0).abs() < 1e-6);
        let bounds = left.current_mbr().expect("strip bounds");
        assert!(bounds.min_y >= -1e-9 && (bounds.max_y - 1.0).abs() < 1e-9);
        Ok(())
    });
}

#[test]
fn test_line_work_between_operands() {
    run_test(create_test_context, |ctx| {
        let mut a = square(0.0, 0.0, 2.0);
        a.set_srid(3003);
        let b = point_xy(5.0, 1.0);
        let rel = ctx.relations();

        let bridge = rel.shortest_line(&a, &b)?.expect("segment");
        assert_eq!(bridge.srid(), 3003);
        let segment = bridge.linestring(0)?;
        assert_eq!(segment.vertex(0)?.x, 2.0);
        assert_eq!(segment.vertex(1)?.x, 5.0);

        let near = line_xy(&[(0.0, 0.05), (2.0, 2.05)]);
        let snapped = rel.snap(&near, &a, 0.1)?.expect("snapped");
        assert_eq!(snapped.linestring(0)?.vertex(0)?.y, 0.0);

        let route = line_xy(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let other = line_xy(&[(10.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
        let shared = rel.shared_paths(&route, &other)?.expect("shared stretch");
        assert!(shared.same_direction.is_none());
        let opposite = shared.opposite_direction.expect("reverse stretch");
        assert!((opposite.length() - 5.0).abs() < 1e-9);
        Ok(())
    });
}

#[test]
fn test_lines_cut_at_nodes() {
    run_test(create_test_context, |_ctx| {
        let line = line_xy(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (15.0, 0.0)]);
        let nodes = points(&[(5.0, 0.0), (10.0, 0.0), (99.0, 99.0)]);

        let pieces = lines_cut_at_nodes(&line, &nodes).expect("two cuts");
        assert_eq!(pieces.num_linestrings(), 3);
        assert_eq!(pieces.declared_type(), GeometryType::MultiLinestring);

        // endpoints never split
        let ends = points(&[(0.0, 0.0), (15.0, 0.0)]);
        assert!(lines_cut_at_nodes(&line, &ends).is_none());
        Ok(())
    });
}
