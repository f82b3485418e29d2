//! Binary spatial predicates and their bounding-box pre-checks.

use geolith::geometry::Mbr;
use geos::{GResult, Geom, Geometry, PreparedGeometry};

use crate::cache::PreparedSide;

/// A DE-9IM backed predicate between two engine geometries.
pub trait BinaryPredicate {
    const NAME: &'static str;

    /// Answer implied by the two boxes alone, if any.
    fn mbr_precheck(a: &Mbr, b: &Mbr) -> Option<bool>;

    fn evaluate(lhs: &Geometry, rhs: &Geometry) -> GResult<bool>;
}

/// A predicate GEOS can also evaluate against a prepared operand.
pub trait PreparedPredicate: BinaryPredicate {
    /// Evaluates with `prepared` standing for the operand on `side`.
    ///
    /// When the prepared geometry is the second operand the converse predicate is
    /// used, so the answer always refers to `(first, second)`.
    fn evaluate_prepared(
        prepared: &PreparedGeometry<'_>,
        other: &Geometry,
        side: PreparedSide,
    ) -> GResult<bool>;
}

fn require_overlap(a: &Mbr, b: &Mbr) -> Option<bool> {
    (!a.intersects(b)).then_some(false)
}

fn disjoint_boxes(a: &Mbr, b: &Mbr) -> Option<bool> {
    (!a.intersects(b)).then_some(true)
}

fn require_inside(a: &Mbr, b: &Mbr) -> Option<bool> {
    (!a.within(b)).then_some(false)
}

fn require_enclosing(a: &Mbr, b: &Mbr) -> Option<bool> {
    (!a.contains(b)).then_some(false)
}

/// Topological equality. GEOS has no prepared variant for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Equals;

impl BinaryPredicate for Equals {
    const NAME: &'static str = "equals";

    fn mbr_precheck(a: &Mbr, b: &Mbr) -> Option<bool> {
        (a != b).then_some(false)
    }

    fn evaluate(lhs: &Geometry, rhs: &Geometry) -> GResult<bool> {
        lhs.equals(rhs)
    }
}

macro_rules! impl_binary_predicate {
    ($struct_name:ident, $label:literal, $geos_method:ident, $converse:ident, $precheck:path $(,)?) => {
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $struct_name;

        impl BinaryPredicate for $struct_name {
            const NAME: &'static str = $label;

            fn mbr_precheck(a: &Mbr, b: &Mbr) -> Option<bool> {
                $precheck(a, b)
            }

            fn evaluate(lhs: &Geometry, rhs: &Geometry) -> GResult<bool> {
                lhs.$geos_method(rhs)
            }
        }

        impl PreparedPredicate for $struct_name {
            fn evaluate_prepared(
                prepared: &PreparedGeometry<'_>,
                other: &Geometry,
                side: PreparedSide,
            ) -> GResult<bool> {
                match side {
                    PreparedSide::First => prepared.$geos_method(other),
                    PreparedSide::Second => prepared.$converse(other),
                }
            }
        }
    };
}

impl_binary_predicate!(Intersects, "intersects", intersects, intersects, require_overlap);
impl_binary_predicate!(Disjoint, "disjoint", disjoint, disjoint, disjoint_boxes);
impl_binary_predicate!(Overlaps, "overlaps", overlaps, overlaps, require_overlap);
impl_binary_predicate!(Crosses, "crosses", crosses, crosses, require_overlap);
impl_binary_predicate!(Touches, "touches", touches, touches, require_overlap);
impl_binary_predicate!(Within, "within", within, contains, require_inside);
impl_binary_predicate!(Contains, "contains", contains, within, require_enclosing);
impl_binary_predicate!(Covers, "covers", covers, covered_by, require_enclosing);
impl_binary_predicate!(CoveredBy, "covered_by", covered_by, covers, require_inside);

/// True when `pattern` is a valid DE-9IM pattern: nine of `T F * 0 1 2`.
pub fn is_valid_relate_pattern(pattern: &str) -> bool {
    pattern.len() == 9
        && pattern
            .chars()
            .all(|c| matches!(c, 'T' | 'F' | '*' | '0' | '1' | '2'))
}
