use geolith::errors::GeoResult;
use geolith::geometry::{
    Dimension, GeometryCollection, GeometryType, Linestring, Polygon, Ring, Vertex,
};
use geolith_geos::{RelationConfig, RelationContext};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::backtrace::Backtrace;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

pub const DIMENSIONS: [Dimension; 4] = [
    Dimension::Xy,
    Dimension::Xyz,
    Dimension::Xym,
    Dimension::Xyzm,
];

/// Runs a test against a fresh context and reports failures with their error chain.
pub fn run_test<B, T>(before: B, test: T)
where
    B: FnOnce() -> GeoResult<TestContext>,
    T: FnOnce(&mut TestContext) -> GeoResult<()>,
{
    let start_time = Instant::now();
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        let backtrace = Backtrace::capture();
        match before() {
            Ok(mut ctx) => test(&mut ctx)
                .map_err(|e| (format!("Test failed: {:?}", e), backtrace.to_string())),
            Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
        }
    }));
    let elapsed = start_time.elapsed();

    let (error, backtrace) = match result {
        Ok(Ok(_)) => return,
        Ok(Err((e, bt))) => (e, bt),
        Err(panic_err) => {
            let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            (
                format!("Panic: {}", err_msg),
                Backtrace::capture().to_string(),
            )
        }
    };

    eprintln!("\n==================== TEST FAILED ====================");
    eprintln!("Failed after {:?}", elapsed);
    eprintln!("Error: {}", error);
    if !backtrace.is_empty() && !backtrace.contains("disabled") {
        eprintln!("\nBacktrace:\n{}", backtrace);
    }
    eprintln!("=====================================================\n");

    panic!("Test failed: {}", error);
}

pub struct TestContext {
    relations: RelationContext,
    rng: StdRng,
}

impl TestContext {
    pub fn relations(&mut self) -> &mut RelationContext {
        &mut self.relations
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Both halves at once, for generating inputs while evaluating them.
    pub fn split(&mut self) -> (&mut RelationContext, &mut StdRng) {
        (&mut self.relations, &mut self.rng)
    }
}

pub fn create_test_context() -> GeoResult<TestContext> {
    create_test_context_with(RelationConfig::default(), 0x6e0_1174)
}

pub fn create_test_context_with(config: RelationConfig, seed: u64) -> GeoResult<TestContext> {
    Ok(TestContext {
        relations: RelationContext::with_config(config),
        rng: StdRng::seed_from_u64(seed),
    })
}

/// Axis-aligned square polygon, closed, SRID 0.
pub fn square(x: f64, y: f64, size: f64) -> GeometryCollection {
    polygon_xy(&[
        (x, y),
        (x + size, y),
        (x + size, y + size),
        (x, y + size),
        (x, y),
    ])
}

/// Polygon from XY pairs, taken as given (no closing vertex added).
pub fn polygon_xy(exterior: &[(f64, f64)]) -> GeometryCollection {
    let mut geom = GeometryCollection::new_xy();
    let vertices: Vec<Vertex> = exterior.iter().map(|(x, y)| Vertex::xy(*x, *y)).collect();
    let ring = Ring::from_vertices(Dimension::Xy, &vertices);
    geom.insert_polygon(Polygon::from_exterior(ring, 0))
        .expect("XY polygon into XY collection");
    geom.set_declared_type(GeometryType::Polygon);
    geom.compute_mbr();
    geom
}

pub fn line_xy(vertices: &[(f64, f64)]) -> GeometryCollection {
    let mut geom = GeometryCollection::new_xy();
    let vertices: Vec<Vertex> = vertices.iter().map(|(x, y)| Vertex::xy(*x, *y)).collect();
    geom.add_linestring_from(&vertices)
        .expect("XY linestring into XY collection");
    geom.set_declared_type(GeometryType::Linestring);
    geom.compute_mbr();
    geom
}

pub fn point_xy(x: f64, y: f64) -> GeometryCollection {
    let mut geom = GeometryCollection::new_xy();
    geom.add_point_xy(x, y).expect("XY point into XY collection");
    geom.set_declared_type(GeometryType::Point);
    geom.compute_mbr();
    geom
}

pub fn random_vertex(rng: &mut StdRng, dims: Dimension) -> Vertex {
    Vertex::xyzm(
        rng.gen_range(-1000.0..1000.0),
        rng.gen_range(-1000.0..1000.0),
        rng.gen_range(-100.0..100.0),
        rng.gen_range(0.0..10_000.0),
    )
    .restricted_to(dims)
}

/// Closed star-shaped ring around (`cx`, `cy`); simple by construction.
pub fn random_ring(
    rng: &mut StdRng,
    dims: Dimension,
    cx: f64,
    cy: f64,
    radius: f64,
    points: usize,
) -> Ring {
    let mut vertices = Vec::with_capacity(points + 1);
    for i in 0..points {
        let angle = i as f64 / points as f64 * std::f64::consts::TAU;
        let r = radius * rng.gen_range(0.7..1.0);
        let v = Vertex::xyzm(
            cx + r * angle.cos(),
            cy + r * angle.sin(),
            rng.gen_range(-100.0..100.0),
            rng.gen_range(0.0..10_000.0),
        );
        vertices.push(v.restricted_to(dims));
    }
    vertices.push(vertices[0]);
    Ring::from_vertices(dims, &vertices)
}

/// Polygon with an optional hole well inside the exterior.
pub fn random_polygon(rng: &mut StdRng, dims: Dimension, cx: f64, cy: f64, radius: f64) -> Polygon {
    let points = rng.gen_range(3..24);
    let exterior = random_ring(rng, dims, cx, cy, radius, points);
    if rng.gen_bool(0.3) {
        let hole = random_ring(rng, dims, cx, cy, radius * 0.3, 6);
        Polygon::from_rings(exterior, vec![hole]).expect("hole shares the exterior dimension")
    } else {
        Polygon::from_exterior(exterior, 0)
    }
}

pub fn random_linestring(rng: &mut StdRng, dims: Dimension) -> Linestring {
    let count = rng.gen_range(2..32);
    let vertices: Vec<Vertex> = (0..count).map(|_| random_vertex(rng, dims)).collect();
    Linestring::from_vertices(dims, &vertices)
}

/// A random collection of any kind whose declared type is the kind the codec and
/// the bridge will report for it, including singleton multi kinds.
pub fn random_geometry(rng: &mut StdRng, dims: Dimension) -> GeometryCollection {
    let mut geom = GeometryCollection::new(dims);
    geom.set_srid(rng.gen_range(0..100_000));
    let kind = rng.gen_range(0..7);
    let (points, lines, polygons) = match kind {
        0 => (1, 0, 0),
        1 => (0, 1, 0),
        2 => (0, 0, 1),
        3 => (rng.gen_range(1..6), 0, 0),
        4 => (0, rng.gen_range(1..6), 0),
        5 => (0, 0, rng.gen_range(1..4)),
        _ => (rng.gen_range(1..4), rng.gen_range(1..4), rng.gen_range(1..3)),
    };
    for _ in 0..points {
        let v = random_vertex(rng, dims);
        geom.add_point(v);
    }
    for _ in 0..lines {
        let line = random_linestring(rng, dims);
        geom.insert_linestring(line).expect("same dimension");
    }
    for _ in 0..polygons {
        let (cx, cy) = (rng.gen_range(-900.0..900.0), rng.gen_range(-900.0..900.0));
        let radius = rng.gen_range(1.0..100.0);
        let polygon = random_polygon(rng, dims, cx, cy, radius);
        geom.insert_polygon(polygon).expect("same dimension");
    }

    let declared = if kind == 6 {
        GeometryType::GeometryCollection
    } else if kind >= 3 || rng.gen_bool(0.2) {
        // singular kinds are occasionally declared multi
        let single = match (points, lines) {
            (p, _) if p > 0 => GeometryType::Point,
            (_, l) if l > 0 => GeometryType::Linestring,
            _ => GeometryType::Polygon,
        };
        single.to_multi()
    } else {
        geom.geometry_type().unwrap_or(GeometryType::Unknown)
    };
    geom.set_declared_type(declared);
    geom.compute_mbr();
    geom
}

/// Simple XY polygon inside `[min_x, max_x] x [min_y, max_y]`.
pub fn random_polygon_in(
    rng: &mut StdRng,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
) -> GeometryCollection {
    let radius = ((max_x - min_x).min(max_y - min_y) / 4.0).max(0.5);
    let cx = rng.gen_range(min_x + radius..max_x - radius);
    let cy = rng.gen_range(min_y + radius..max_y - radius);
    let points = rng.gen_range(3..16);
    let ring = random_ring(rng, Dimension::Xy, cx, cy, radius, points);
    let mut geom = GeometryCollection::new_xy();
    geom.insert_polygon(Polygon::from_exterior(ring, 0))
        .expect("XY polygon into XY collection");
    geom.set_declared_type(GeometryType::Polygon);
    geom.compute_mbr();
    geom
}
