//! The relation context: predicates, measures and the state they share.
//!
//! A [`RelationContext`] belongs to one connection. It owns the configuration, the
//! prepared-geometry cache, the error collector and the statistics, and every
//! operation takes `&mut self`. Predicates answer with a [`Tristate`]; measures and
//! derived geometries (see [`crate::operations`]) answer with an [`EngineResult`].
//!
//! Each public operation first resets the collector, then rejects toxic operands,
//! then tries the bounding-box pre-check and only then calls GEOS.

use std::fmt::Display;

use geolith::geometry::{toxic_reason, GeometryCollection, GeometryType, ToxicReason};
use geos::{GResult, Geom, Geometry};
use log::{debug, warn};

use crate::bridge::{from_engine, to_engine, ExportMode};
use crate::cache::{CacheLookup, PreparedCache, PreparedSide};
use crate::collector::ErrorCollector;
use crate::config::RelationConfig;
use crate::error::{EngineError, EngineResult};
use crate::predicates::{
    is_valid_relate_pattern, BinaryPredicate, Contains, CoveredBy, Covers, Crosses, Disjoint,
    Equals, Intersects, Overlaps, PreparedPredicate, Touches, Within,
};
use crate::stats::RelationStats;
use crate::tristate::{Tristate, UnknownReason};

const VALID_GEOMETRY: &str = "Valid Geometry";

pub struct RelationContext {
    config: RelationConfig,
    cache: PreparedCache,
    errors: ErrorCollector,
    stats: RelationStats,
}

impl RelationContext {
    pub fn new() -> Self {
        Self::with_config(RelationConfig::default())
    }

    pub fn with_config(config: RelationConfig) -> Self {
        let stats = RelationStats::new();
        let cache = PreparedCache::with_stats(config.cache_policy(), stats.clone());
        RelationContext {
            config,
            cache,
            errors: ErrorCollector::new(),
            stats,
        }
    }

    pub fn config(&self) -> &RelationConfig {
        &self.config
    }

    /// Messages recorded by the last operation.
    pub fn errors(&self) -> &ErrorCollector {
        &self.errors
    }

    pub fn stats(&self) -> &RelationStats {
        &self.stats
    }

    pub fn cache(&self) -> &PreparedCache {
        &self.cache
    }

    /// Forgets every cached blob. Statistics are kept.
    pub fn reset_cache(&mut self) {
        self.cache.reset();
    }

    pub fn equals(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<Equals>(a, b)
    }

    pub fn intersects(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<Intersects>(a, b)
    }

    pub fn disjoint(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<Disjoint>(a, b)
    }

    pub fn overlaps(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<Overlaps>(a, b)
    }

    pub fn crosses(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<Crosses>(a, b)
    }

    pub fn touches(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<Touches>(a, b)
    }

    /// True when `a` lies inside `b`.
    pub fn within(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<Within>(a, b)
    }

    /// True when `a` holds `b`.
    pub fn contains(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<Contains>(a, b)
    }

    pub fn covers(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<Covers>(a, b)
    }

    pub fn covered_by(&mut self, a: &GeometryCollection, b: &GeometryCollection) -> Tristate {
        self.relation::<CoveredBy>(a, b)
    }

    /// Predicate variants that reuse a cached prepared operand.
    ///
    /// `blob_a` and `blob_b` are the serialized forms of `a` and `b`; they only
    /// serve as cache keys.
    pub fn prepared_intersects(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.prepared_relation::<Intersects>(a, blob_a, b, blob_b)
    }

    pub fn prepared_disjoint(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.prepared_relation::<Disjoint>(a, blob_a, b, blob_b)
    }

    pub fn prepared_overlaps(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.prepared_relation::<Overlaps>(a, blob_a, b, blob_b)
    }

    pub fn prepared_crosses(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.prepared_relation::<Crosses>(a, blob_a, b, blob_b)
    }

    pub fn prepared_touches(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.prepared_relation::<Touches>(a, blob_a, b, blob_b)
    }

    pub fn prepared_within(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.prepared_relation::<Within>(a, blob_a, b, blob_b)
    }

    pub fn prepared_contains(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.prepared_relation::<Contains>(a, blob_a, b, blob_b)
    }

    pub fn prepared_covers(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.prepared_relation::<Covers>(a, blob_a, b, blob_b)
    }

    pub fn prepared_covered_by(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.prepared_relation::<CoveredBy>(a, blob_a, b, blob_b)
    }

    /// Tests `a` and `b` against a DE-9IM pattern such as `T*F**F***`.
    pub fn relate(
        &mut self,
        a: &GeometryCollection,
        b: &GeometryCollection,
        pattern: &str,
    ) -> Tristate {
        self.errors.reset();
        if !is_valid_relate_pattern(pattern) {
            self.errors
                .set_error(format!("relate: invalid DE-9IM pattern '{}'", pattern));
            return Tristate::Unknown(UnknownReason::EngineFailure);
        }
        if self.reject_toxic(&[a, b]).is_some() {
            return Tristate::Unknown(UnknownReason::ToxicInput);
        }
        let (ga, gb) = match self.operand(a).and_then(|ga| Ok((ga, self.operand(b)?))) {
            Ok(pair) => pair,
            Err(unknown) => return unknown,
        };
        self.stats.record_engine_call();
        match ga.relate_pattern(&gb, pattern) {
            Ok(answer) => answer.into(),
            Err(err) => self.engine_failure("relate", &err),
        }
    }

    /// The DE-9IM intersection matrix of `a` and `b`.
    pub fn relate_matrix(
        &mut self,
        a: &GeometryCollection,
        b: &GeometryCollection,
    ) -> EngineResult<Option<String>> {
        self.run("relate_matrix", |ctx| {
            let (Some(ga), Some(gb)) = (ctx.input(a, ExportMode::All)?, ctx.input(b, ExportMode::All)?)
            else {
                return Ok(None);
            };
            ctx.stats.record_engine_call();
            Ok(Some(ga.relate(&gb)?))
        })
    }

    pub fn area(&mut self, geom: &GeometryCollection) -> EngineResult<Option<f64>> {
        self.measure("area", geom, ExportMode::All, |g| g.area())
    }

    /// Length of the linear components only.
    pub fn length(&mut self, geom: &GeometryCollection) -> EngineResult<Option<f64>> {
        self.measure("length", geom, ExportMode::OnlyLinestrings, |g| g.length())
    }

    /// Summed ring lengths of the polygonal components.
    pub fn perimeter(&mut self, geom: &GeometryCollection) -> EngineResult<Option<f64>> {
        self.measure("perimeter", geom, ExportMode::OnlyPolygons, |g| g.length())
    }

    pub fn distance(
        &mut self,
        a: &GeometryCollection,
        b: &GeometryCollection,
    ) -> EngineResult<Option<f64>> {
        self.binary_measure("distance", a, b, |ga, gb| ga.distance(gb))
    }

    pub fn hausdorff_distance(
        &mut self,
        a: &GeometryCollection,
        b: &GeometryCollection,
    ) -> EngineResult<Option<f64>> {
        self.binary_measure("hausdorff_distance", a, b, |ga, gb| {
            ga.hausdorff_distance(gb)
        })
    }

    /// Hausdorff distance with each segment densified by `fraction`, in `(0, 1]`.
    pub fn hausdorff_distance_densify(
        &mut self,
        a: &GeometryCollection,
        b: &GeometryCollection,
        fraction: f64,
    ) -> EngineResult<Option<f64>> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            self.errors.reset();
            let err = EngineError::InvalidArgument(format!(
                "densify fraction {} is outside (0, 1]",
                fraction
            ));
            self.errors.set_error(err.to_string());
            return Err(err);
        }
        self.binary_measure("hausdorff_distance_densify", a, b, |ga, gb| {
            ga.hausdorff_distance_densify(gb, fraction)
        })
    }

    pub fn is_simple(&mut self, geom: &GeometryCollection) -> Tristate {
        self.unary_check("is_simple", geom, |g| g.is_simple())
    }

    pub fn is_valid(&mut self, geom: &GeometryCollection) -> Tristate {
        self.unary_check("is_valid", geom, |g| {
            g.is_valid_reason().map(|reason| reason == VALID_GEOMETRY)
        })
    }

    /// The engine's explanation of why `geom` is valid or not.
    pub fn is_valid_reason(&mut self, geom: &GeometryCollection) -> EngineResult<Option<String>> {
        self.run("is_valid_reason", |ctx| {
            let Some(g) = ctx.input(geom, ExportMode::All)? else {
                return Ok(None);
            };
            ctx.stats.record_engine_call();
            Ok(Some(g.is_valid_reason()?))
        })
    }

    /// True when `geom` is a single closed and simple linestring.
    pub fn is_ring(&mut self, geom: &GeometryCollection) -> Tristate {
        if geom.num_linestrings() != 1 || geom.num_points() > 0 || geom.num_polygons() > 0 {
            self.errors.reset();
            self.errors
                .set_warning("is_ring: expects exactly one linestring");
            return Tristate::Unknown(UnknownReason::UnsupportedInput);
        }
        self.unary_check("is_ring", geom, |g| g.is_ring())
    }

    fn relation<P: BinaryPredicate>(
        &mut self,
        a: &GeometryCollection,
        b: &GeometryCollection,
    ) -> Tristate {
        self.errors.reset();
        if self.reject_toxic(&[a, b]).is_some() {
            return Tristate::Unknown(UnknownReason::ToxicInput);
        }
        if let Some(answer) = self.precheck::<P>(a, b) {
            return answer.into();
        }
        self.engine_relation::<P>(a, b)
    }

    fn prepared_relation<P: PreparedPredicate>(
        &mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> Tristate {
        self.errors.reset();
        if self.reject_toxic(&[a, b]).is_some() {
            return Tristate::Unknown(UnknownReason::ToxicInput);
        }
        if let Some(answer) = self.precheck::<P>(a, b) {
            return answer.into();
        }
        self.sync_cache_policy();

        let outcome = match self.cache.eval(a, blob_a, b, blob_b) {
            CacheLookup::Hit { prepared, side } => {
                let other = match side {
                    PreparedSide::First => b,
                    PreparedSide::Second => a,
                };
                let answer = match to_engine(other, ExportMode::All) {
                    Ok(Some(engine)) => {
                        self.stats.record_engine_call();
                        P::evaluate_prepared(prepared.prepared(), &engine, side)
                            .map_err(EngineError::from)
                    }
                    Ok(None) => Err(EngineError::Unsupported(
                        "operand has nothing the engine can represent".to_string(),
                    )),
                    Err(err) => Err(err),
                };
                Some(answer)
            }
            CacheLookup::Miss => None,
        };

        match outcome {
            Some(Ok(answer)) => answer.into(),
            Some(Err(err)) => self.unknown_from(P::NAME, err),
            None => self.engine_relation::<P>(a, b),
        }
    }

    fn engine_relation<P: BinaryPredicate>(
        &mut self,
        a: &GeometryCollection,
        b: &GeometryCollection,
    ) -> Tristate {
        let (ga, gb) = match self.operand(a).and_then(|ga| Ok((ga, self.operand(b)?))) {
            Ok(pair) => pair,
            Err(unknown) => return unknown,
        };
        self.stats.record_engine_call();
        match P::evaluate(&ga, &gb) {
            Ok(answer) => answer.into(),
            Err(err) => self.engine_failure(P::NAME, &err),
        }
    }

    fn precheck<P: BinaryPredicate>(
        &self,
        a: &GeometryCollection,
        b: &GeometryCollection,
    ) -> Option<bool> {
        if !self.config.mbr_precheck() {
            return None;
        }
        let answer = P::mbr_precheck(&a.current_mbr()?, &b.current_mbr()?)?;
        self.stats.record_short_circuit();
        debug!("{} decided by MBR pre-check: {}", P::NAME, answer);
        Some(answer)
    }

    fn sync_cache_policy(&mut self) {
        let policy = self.config.cache_policy();
        if self.cache.policy() != policy {
            debug!("Cache policy changed to {:?}, rebuilding cache", policy);
            self.cache = PreparedCache::with_stats(policy, self.stats.clone());
        }
    }

    fn unary_check(
        &mut self,
        op: &str,
        geom: &GeometryCollection,
        check: impl FnOnce(&Geometry) -> GResult<bool>,
    ) -> Tristate {
        self.errors.reset();
        if self.reject_toxic(&[geom]).is_some() {
            return Tristate::Unknown(UnknownReason::ToxicInput);
        }
        let engine = match self.operand(geom) {
            Ok(engine) => engine,
            Err(unknown) => return unknown,
        };
        self.stats.record_engine_call();
        match check(&engine) {
            Ok(answer) => answer.into(),
            Err(err) => self.engine_failure(op, &err),
        }
    }

    fn measure(
        &mut self,
        op: &str,
        geom: &GeometryCollection,
        mode: ExportMode,
        f: impl FnOnce(&Geometry) -> GResult<f64>,
    ) -> EngineResult<Option<f64>> {
        self.run(op, |ctx| {
            let Some(g) = ctx.input(geom, mode)? else {
                return Ok(None);
            };
            ctx.stats.record_engine_call();
            Ok(Some(f(&g)?))
        })
    }

    fn binary_measure(
        &mut self,
        op: &str,
        a: &GeometryCollection,
        b: &GeometryCollection,
        f: impl FnOnce(&Geometry, &Geometry) -> GResult<f64>,
    ) -> EngineResult<Option<f64>> {
        self.run(op, |ctx| {
            let (Some(ga), Some(gb)) = (ctx.input(a, ExportMode::All)?, ctx.input(b, ExportMode::All)?)
            else {
                return Ok(None);
            };
            ctx.stats.record_engine_call();
            Ok(Some(f(&ga, &gb)?))
        })
    }

    /// Runs an engine-backed operation with a fresh collector and records its failure.
    pub(crate) fn run<T>(
        &mut self,
        op: &str,
        f: impl FnOnce(&mut Self) -> EngineResult<T>,
    ) -> EngineResult<T> {
        self.errors.reset();
        let result = f(self);
        if let Err(err) = &result {
            match err {
                // already recorded as aux_error by `input`
                EngineError::Toxic(_) => {}
                EngineError::Unsupported(msg) => self.errors.set_warning(format!("{}: {}", op, msg)),
                other => {
                    warn!("{} failed: {}", op, other);
                    self.errors.set_error(format!("{}: {}", op, other));
                }
            }
        }
        result
    }

    /// Exports one operand of an `EngineResult` operation.
    ///
    /// Toxic operands are an error; an operand with nothing to export for `mode`
    /// yields `None` and a warning.
    pub(crate) fn input(
        &mut self,
        geom: &GeometryCollection,
        mode: ExportMode,
    ) -> EngineResult<Option<Geometry>> {
        if let Some(reason) = self.reject_toxic(&[geom]) {
            return Err(EngineError::Toxic(reason.to_string()));
        }
        let engine = to_engine(geom, mode)?;
        if engine.is_none() {
            self.errors
                .set_warning(format!("no components left to export in {:?} mode", mode));
        }
        Ok(engine)
    }

    /// Converts an engine result back, carrying the SRID of `reference`.
    ///
    /// With `promote`, a singular result is re-declared as the multi kind
    /// `reference` was declared with.
    pub(crate) fn output(
        &self,
        engine: &Geometry,
        reference: &GeometryCollection,
        promote: bool,
    ) -> EngineResult<Option<GeometryCollection>> {
        let Some(mut out) = from_engine(engine, reference.dimension())? else {
            return Ok(None);
        };
        out.set_srid(reference.srid());
        if promote {
            repromote(&mut out, reference);
        }
        Ok(Some(out))
    }

    pub(crate) fn record_engine_call(&self) {
        self.stats.record_engine_call();
    }

    fn reject_toxic(&mut self, operands: &[&GeometryCollection]) -> Option<ToxicReason> {
        let reason = operands.iter().find_map(|geom| toxic_reason(geom))?;
        self.stats.record_toxic_rejection();
        debug!("Rejected operand: {}", reason);
        self.errors.set_aux_error(reason.to_string());
        Some(reason)
    }

    fn operand(&mut self, geom: &GeometryCollection) -> Result<Geometry, Tristate> {
        match to_engine(geom, ExportMode::All) {
            Ok(Some(engine)) => Ok(engine),
            Ok(None) => {
                self.errors
                    .set_warning("operand has nothing the engine can represent");
                Err(Tristate::Unknown(UnknownReason::UnsupportedInput))
            }
            Err(err) => Err(self.unknown_from("export", err)),
        }
    }

    fn unknown_from(&mut self, op: &str, err: EngineError) -> Tristate {
        match err {
            EngineError::Unsupported(msg) => {
                self.errors.set_warning(format!("{}: {}", op, msg));
                Tristate::Unknown(UnknownReason::UnsupportedInput)
            }
            other => self.engine_failure(op, &other),
        }
    }

    fn engine_failure(&mut self, op: &str, err: &dyn Display) -> Tristate {
        warn!("{} failed: {}", op, err);
        self.errors.set_error(format!("{}: {}", op, err));
        Tristate::Unknown(UnknownReason::EngineFailure)
    }
}

impl Default for RelationContext {
    fn default() -> Self {
        Self::new()
    }
}

fn repromote(out: &mut GeometryCollection, reference: &GeometryCollection) {
    let Some(kind) = out.geometry_type() else {
        return;
    };
    if matches!(
        kind,
        GeometryType::Point | GeometryType::Linestring | GeometryType::Polygon
    ) && reference.declared_type() == kind.to_multi()
    {
        out.set_declared_type(kind.to_multi());
    }
}
