//! Derived geometries computed by the engine.
//!
//! Every operation returns `Ok(None)` when the engine produces an empty result
//! and an error for toxic input, unsupported input or engine failure. Results take
//! the SRID and dimension of the first operand.

use geolith::geometry::{
    Dimension, GeometryCollection, GeometryType, Mbr, Polygon, Ring, Vertex,
};
use geos::{BufferParams, Geom, Geometry};

use crate::bridge::{from_engine, to_engine, ExportMode};
use crate::context::RelationContext;
use crate::error::{EngineError, EngineResult};
use crate::polygonize::{drop_hole_fillers, polygonized_type};

/// Paths shared by two linear geometries, split by relative direction.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedPaths {
    pub same_direction: Option<GeometryCollection>,
    pub opposite_direction: Option<GeometryCollection>,
}

type OpResult = EngineResult<Option<GeometryCollection>>;

impl RelationContext {
    pub fn union(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> OpResult {
        self.binary_op("union", a, b, |ga, gb| ga.union(gb))
    }

    pub fn difference(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> OpResult {
        self.binary_op("difference", a, b, |ga, gb| ga.difference(gb))
    }

    pub fn sym_difference(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> OpResult {
        self.binary_op("sym_difference", a, b, |ga, gb| ga.sym_difference(gb))
    }

    pub fn intersection(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> OpResult {
        self.binary_op("intersection", a, b, |ga, gb| ga.intersection(gb))
    }

    /// Dissolves all components of `geom` into one geometry.
    pub fn unary_union(&mut self, geom: &GeometryCollection) -> OpResult {
        self.unary_op("unary_union", geom, true, |g| g.unary_union())
    }

    pub fn boundary(&mut self, geom: &GeometryCollection) -> OpResult {
        self.unary_op("boundary", geom, false, |g| g.boundary())
    }

    pub fn centroid(&mut self, geom: &GeometryCollection) -> OpResult {
        self.unary_op("centroid", geom, false, |g| g.get_centroid())
    }

    pub fn point_on_surface(&mut self, geom: &GeometryCollection) -> OpResult {
        self.unary_op("point_on_surface", geom, false, |g| g.point_on_surface())
    }

    pub fn convex_hull(&mut self, geom: &GeometryCollection) -> OpResult {
        self.unary_op("convex_hull", geom, false, |g| g.convex_hull())
    }

    /// Buffers `geom` by `radius` with the configured cap and join styles.
    ///
    /// `points` overrides the configured number of segments per quadrant.
    pub fn buffer(
        &mut self,
        geom: &GeometryCollection,
        radius: f64,
        points: Option<i32>,
    ) -> OpResult {
        let segments = points.unwrap_or_else(|| self.config().buffer_quadrant_segments());
        self.run("buffer", |ctx| {
            let params = ctx.buffer_params(segments, false)?;
            let Some(g) = ctx.input(geom, ExportMode::All)? else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let out = g.buffer_with_params(radius, &params)?;
            ctx.output(&out, geom, false)
        })
    }

    pub fn simplify(&mut self, geom: &GeometryCollection, tolerance: f64) -> OpResult {
        self.unary_op("simplify", geom, true, |g| g.simplify(tolerance))
    }

    pub fn simplify_preserve_topology(
        &mut self,
        geom: &GeometryCollection,
        tolerance: f64,
    ) -> OpResult {
        self.unary_op("simplify_preserve_topology", geom, true, |g| {
            g.topology_preserve_simplify(tolerance)
        })
    }

    /// Builds polygons from the linework of `geom`, which must hold only linestrings.
    ///
    /// A polygon that merely fills the hole of another one is discarded.
    pub fn polygonize(&mut self, geom: &GeometryCollection, force_multi: bool) -> OpResult {
        self.run("polygonize", |ctx| {
            require_only_linestrings(geom)?;
            let Some(g) = ctx.input(geom, ExportMode::OnlyLinestrings)? else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let out = Geometry::polygonize(&[&g])?;
            let Some(polygons) = ctx.output(&out, geom, false)? else {
                return Ok(None);
            };
            let mut result = drop_hole_fillers(&polygons);
            if result.is_empty() {
                return Ok(None);
            }
            result.set_declared_type(polygonized_type(&result, force_multi));
            result.compute_mbr();
            Ok(Some(result))
        })
    }

    pub fn line_merge(&mut self, geom: &GeometryCollection) -> OpResult {
        self.run("line_merge", |ctx| {
            let Some(g) = ctx.input(geom, ExportMode::OnlyLinestrings)? else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let out = g.line_merge()?;
            ctx.output(&out, geom, false)
        })
    }

    /// Paths shared by two linear geometries.
    pub fn shared_paths(
        &mut self,
        a: &GeometryCollection,
        b: &GeometryCollection,
    ) -> EngineResult<Option<SharedPaths>> {
        self.run("shared_paths", |ctx| {
            require_only_linestrings(a)?;
            require_only_linestrings(b)?;
            let (Some(ga), Some(gb)) = (
                ctx.input(a, ExportMode::OnlyLinestrings)?,
                ctx.input(b, ExportMode::OnlyLinestrings)?,
            ) else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let out = ga.shared_paths(&gb)?;
            if out.get_num_geometries()? < 2 {
                return Ok(None);
            }
            let direction = |n: usize| -> EngineResult<Option<GeometryCollection>> {
                let part = out.get_geometry_n(n)?;
                let Some(mut lines) = from_engine(&part, a.dimension())? else {
                    return Ok(None);
                };
                lines.set_srid(a.srid());
                lines.set_declared_type(GeometryType::MultiLinestring);
                Ok(Some(lines))
            };
            let paths = SharedPaths {
                same_direction: direction(0)?,
                opposite_direction: direction(1)?,
            };
            if paths.same_direction.is_none() && paths.opposite_direction.is_none() {
                return Ok(None);
            }
            Ok(Some(paths))
        })
    }

    /// Delaunay triangulation of the vertices of `geom`.
    ///
    /// Triangles are declared MULTIPOLYGON, edges MULTILINESTRING.
    pub fn delaunay_triangulation(
        &mut self,
        geom: &GeometryCollection,
        tolerance: f64,
        only_edges: bool,
    ) -> OpResult {
        self.run("delaunay_triangulation", |ctx| {
            let Some(g) = ctx.input(geom, ExportMode::All)? else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let out = g.delaunay_triangulation(tolerance, only_edges)?;
            Ok(ctx
                .output(&out, geom, false)?
                .map(|result| declare_tessellation(result, only_edges)))
        })
    }

    /// Voronoi diagram of the vertices of `geom`.
    ///
    /// The diagram is built inside the input extent grown by the configured
    /// frame percentage and clipped to that frame.
    pub fn voronoi_diagram(
        &mut self,
        geom: &GeometryCollection,
        tolerance: f64,
        only_edges: bool,
    ) -> OpResult {
        let percent = self.config().voronoi_extra_frame();
        self.run("voronoi_diagram", |ctx| {
            let Some(g) = ctx.input(geom, ExportMode::All)? else {
                return Ok(None);
            };
            let Some(extent) = geom.current_mbr() else {
                return Ok(None);
            };
            let frame = frame_polygon(&voronoi_frame(&extent, percent))?;
            ctx.record_engine_call();
            let diagram = g.voronoi(Some(&frame), tolerance, only_edges)?;

            // cells are clipped one by one, overlay does not take collections
            let mut result = GeometryCollection::new(geom.dimension());
            result.set_srid(geom.srid());
            for n in 0..diagram.get_num_geometries()? {
                let clipped = diagram.get_geometry_n(n)?.intersection(&frame)?;
                if let Some(piece) = from_engine(&clipped, geom.dimension())? {
                    for line in piece.linestrings() {
                        result.insert_linestring(line.clone())?;
                    }
                    for polygon in piece.polygons() {
                        result.insert_polygon(polygon.clone())?;
                    }
                }
            }
            if result.is_empty() {
                return Ok(None);
            }
            result.compute_mbr();
            Ok(Some(declare_tessellation(result, only_edges)))
        })
    }

    /// Concave hull; `ratio` in `[0, 1]` goes from tightest to the convex hull.
    pub fn concave_hull(
        &mut self,
        geom: &GeometryCollection,
        ratio: f64,
        allow_holes: bool,
    ) -> OpResult {
        self.run("concave_hull", |ctx| {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(EngineError::InvalidArgument(format!(
                    "concave hull ratio {} is outside [0, 1]",
                    ratio
                )));
            }
            let Some(g) = ctx.input(geom, ExportMode::All)? else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let out = g.concave_hull(ratio, allow_holes)?;
            ctx.output(&out, geom, false)
        })
    }

    /// Offset of a single linestring; positive `radius` offsets to the left.
    pub fn offset_curve(
        &mut self,
        geom: &GeometryCollection,
        radius: f64,
        points: i32,
    ) -> OpResult {
        let join = self.config().buffer_join();
        let mitre_limit = self.config().buffer_mitre_limit();
        self.run("offset_curve", |ctx| {
            require_single_linestring(geom)?;
            require_segments(points)?;
            let Some(g) = ctx.input(geom, ExportMode::OnlyLinestrings)? else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let out = g.offset_curve(radius, points, join.into(), mitre_limit)?;
            ctx.output(&out, geom, false)
        })
    }

    /// One-sided buffer of a single linestring.
    pub fn single_sided_buffer(
        &mut self,
        geom: &GeometryCollection,
        radius: f64,
        points: i32,
        left_side: bool,
    ) -> OpResult {
        self.run("single_sided_buffer", |ctx| {
            require_single_linestring(geom)?;
            let params = ctx.buffer_params(points, true)?;
            let Some(g) = ctx.input(geom, ExportMode::OnlyLinestrings)? else {
                return Ok(None);
            };
            let width = if left_side { radius } else { -radius };
            ctx.record_engine_call();
            let out = g.buffer_with_params(width, &params)?;
            ctx.output(&out, geom, false)
        })
    }

    /// The shortest segment joining `a` and `b`, as an XY linestring.
    pub fn shortest_line(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> OpResult {
        self.run("shortest_line", |ctx| {
            let (Some(ga), Some(gb)) = (ctx.input(a, ExportMode::All)?, ctx.input(b, ExportMode::All)?)
            else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let coords = ga.nearest_points(&gb)?;
            if coords.size()? < 2 {
                return Ok(None);
            }
            let from = Vertex::xy(coords.get_x(0)?, coords.get_y(0)?);
            let to = Vertex::xy(coords.get_x(1)?, coords.get_y(1)?);
            let mut line = GeometryCollection::new(Dimension::Xy);
            line.set_srid(a.srid());
            line.set_declared_type(GeometryType::Linestring);
            line.add_linestring_from(&[from, to])?;
            line.compute_mbr();
            Ok(Some(line))
        })
    }

    /// Snaps the vertices of `a` to those of `b` within `tolerance`.
    pub fn snap(
        &mut self,
        a: &GeometryCollection,
        b: &GeometryCollection,
        tolerance: f64,
    ) -> OpResult {
        self.binary_op("snap", a, b, |ga, gb| ga.snap(gb, tolerance))
    }

    fn unary_op(
        &mut self,
        op: &str,
        geom: &GeometryCollection,
        promote: bool,
        f: impl FnOnce(&Geometry) -> geos::GResult<Geometry>,
    ) -> OpResult {
        self.run(op, |ctx| {
            let Some(g) = ctx.input(geom, ExportMode::All)? else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let out = f(&g)?;
            ctx.output(&out, geom, promote)
        })
    }

    fn binary_op(
        &mut self,
        op: &str,
        a: &GeometryCollection,
        b: &GeometryCollection,
        f: impl FnOnce(&Geometry, &Geometry) -> geos::GResult<Geometry>,
    ) -> OpResult {
        self.run(op, |ctx| {
            let (Some(ga), Some(gb)) = (ctx.input(a, ExportMode::All)?, ctx.input(b, ExportMode::All)?)
            else {
                return Ok(None);
            };
            ctx.record_engine_call();
            let out = f(&ga, &gb)?;
            ctx.output(&out, a, true)
        })
    }

    fn buffer_params(&self, segments: i32, single_sided: bool) -> EngineResult<BufferParams> {
        require_segments(segments)?;
        let config = self.config();
        let params = BufferParams::builder()
            .end_cap_style(config.buffer_end_cap().into())
            .join_style(config.buffer_join().into())
            .mitre_limit(config.buffer_mitre_limit())
            .quadrant_segments(segments)
            .single_sided(single_sided)
            .build()?;
        Ok(params)
    }
}

fn require_segments(points: i32) -> EngineResult<()> {
    if points <= 0 {
        return Err(EngineError::InvalidArgument(format!(
            "segments per quadrant must be positive, got {}",
            points
        )));
    }
    Ok(())
}

fn require_only_linestrings(geom: &GeometryCollection) -> EngineResult<()> {
    if geom.num_points() > 0 || geom.num_polygons() > 0 {
        return Err(EngineError::Unsupported(
            "expects linestrings only".to_string(),
        ));
    }
    Ok(())
}

fn require_single_linestring(geom: &GeometryCollection) -> EngineResult<()> {
    if geom.num_linestrings() != 1 || geom.num_points() > 0 || geom.num_polygons() > 0 {
        return Err(EngineError::Unsupported(
            "expects exactly one linestring".to_string(),
        ));
    }
    Ok(())
}

fn declare_tessellation(mut result: GeometryCollection, only_edges: bool) -> GeometryCollection {
    let declared = if only_edges {
        GeometryType::MultiLinestring
    } else {
        GeometryType::MultiPolygon
    };
    result.set_declared_type(declared);
    result
}

/// `extent` grown on every side by `percent` of its larger side.
fn voronoi_frame(extent: &Mbr, percent: f64) -> Mbr {
    let size = extent.width().max(extent.height());
    let delta = if size > 0.0 { size * percent / 100.0 } else { 1.0 };
    extent.expand_by(delta)
}

fn frame_polygon(frame: &Mbr) -> EngineResult<Geometry> {
    let mut geom = GeometryCollection::new_xy();
    let ring = Ring::from_vertices(
        Dimension::Xy,
        &[
            Vertex::xy(frame.min_x, frame.min_y),
            Vertex::xy(frame.max_x, frame.min_y),
            Vertex::xy(frame.max_x, frame.max_y),
            Vertex::xy(frame.min_x, frame.max_y),
            Vertex::xy(frame.min_x, frame.min_y),
        ],
    );
    geom.insert_polygon(Polygon::from_exterior(ring, 0))?;
    to_engine(&geom, ExportMode::All)?
        .ok_or_else(|| EngineError::Unsupported("empty voronoi frame".to_string()))
}
