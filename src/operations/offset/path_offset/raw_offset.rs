use std::f64::consts::FRAC_PI_4;

use crate::geometry::{CurveSeg, LineSeg, Primitive, Subpath};
use crate::math::vector_2d::exterior_angle;
use crate::math::{length, Point2};

/// Builds the corner join between two consecutive offset segments.
///
/// `a1 → a2` is the exit chord of the previous segment and `b1 → b2` the
/// entry chord of the next one. When the turn is on the same side as the
/// offset, both chords are extended by `|d|·tan(min(45°, |angle|/2))` and
/// bridged by a bevel line if the extensions do not meet. On the other side
/// `a2` is joined to `b1` directly; the overlap this leaves behind is removed
/// by the topology pass.
#[must_use]
pub fn offset_process(
    a1: Point2,
    a2: Point2,
    b1: Point2,
    b2: Point2,
    d: f64,
    tolerance: f64,
) -> Vec<Primitive> {
    let ea = exterior_angle(&(a2 - a1), &(b2 - b1));
    if ea * d > 0.0 {
        let trim = d.abs() * FRAC_PI_4.min(ea.abs() / 2.0).tan();
        if let (Ok(before), Ok(after)) = (
            LineSeg::toward(a2, a1, -trim),
            LineSeg::toward(b1, b2, -trim),
        ) {
            let after = after.reversed();
            let mut joins: Vec<Primitive> = vec![before.into()];
            if length(&after.p1, &before.p2) >= tolerance {
                joins.push(LineSeg::new(before.p2, after.p1).into());
            }
            joins.push(after.into());
            return joins;
        }
    }
    vec![LineSeg::new(a2, b1).into()]
}

/// Appends the join from the last built segment to the offset line `next`.
pub fn join_line(built: &mut Vec<Primitive>, next: &LineSeg, d: f64, tolerance: f64) {
    join(built, next.p1, next.p2, d, tolerance);
}

/// Appends the join from the last built segment to the offset curve `next`.
pub fn join_curve(built: &mut Vec<Primitive>, next: &CurveSeg, d: f64, tolerance: f64) {
    join(built, next.p1(), next.c1(), d, tolerance);
}

fn join(built: &mut Vec<Primitive>, b1: Point2, b2: Point2, d: f64, tolerance: f64) {
    let Some(last) = built.last() else {
        return;
    };
    let (a1, a2) = match last {
        Primitive::Line(l) => (l.p1, l.p2),
        Primitive::Curve(c) => (c.c2(), c.p2()),
    };
    let joins = offset_process(a1, a2, b1, b2, d, tolerance);
    built.extend(joins);
}

fn join_primitive(built: &mut Vec<Primitive>, next: &Primitive, d: f64, tolerance: f64) {
    match next {
        Primitive::Line(l) => join_line(built, l, d, tolerance),
        Primitive::Curve(c) => join_curve(built, c, d, tolerance),
    }
}

/// Builds the raw offset of one subpath: every primitive offset by `d`, with
/// corner joins in between and, for a closed subpath, a final join back to
/// the first offset.
///
/// The result is continuous but may overlap itself.
#[must_use]
pub fn build(subpath: &Subpath, d: f64, tolerance: f64) -> Vec<Primitive> {
    let mut built: Vec<Primitive> = Vec::with_capacity(subpath.primitives.len() * 3);
    for prim in &subpath.primitives {
        match prim {
            Primitive::Line(l) => {
                let offset = l.offset(d);
                join_line(&mut built, &offset, d, tolerance);
                built.push(offset.into());
            }
            Primitive::Curve(c) => {
                let offsets = c.offset(d);
                if let Some(first) = offsets.first() {
                    join_curve(&mut built, first, d, tolerance);
                }
                built.extend(offsets.into_iter().map(Primitive::from));
            }
        }
    }
    if subpath.closed {
        if let Some(first) = built.first().copied() {
            join_primitive(&mut built, &first, d, tolerance);
        }
    }
    built
}
