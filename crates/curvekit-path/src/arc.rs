//! Elliptical arc conversion from endpoint to center parameterization.
//!
//! Path data describes an arc by its endpoints, radii, rotation and two
//! flags; sinks take the center form. The conversion follows the
//! implementation notes of the SVG specification (appendix F.6.5).

use crate::geometry::Point;
use crate::sink::PathSink;
use std::f64::consts::TAU;

/// An elliptical arc in center parameterization.
///
/// Angles are in radians, measured in the ellipse's own (unrotated)
/// frame. `end_angle - start_angle` is the signed sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipticalArc {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// True when the arc runs towards decreasing angles.
    pub clockwise: bool,
    /// Rotation of the ellipse's x axis, in radians.
    pub x_axis_rotation: f64,
}

impl EllipticalArc {
    /// Signed angle swept from start to end.
    pub fn sweep_angle(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Evaluate the ellipse at `angle`.
    pub fn point_at(&self, angle: f64) -> Point {
        let (sin_r, cos_r) = self.x_axis_rotation.sin_cos();
        let (sin_a, cos_a) = angle.sin_cos();
        let x = self.radius_x * cos_a;
        let y = self.radius_y * sin_a;
        Point::new(
            self.center.x + cos_r * x - sin_r * y,
            self.center.y + sin_r * x + cos_r * y,
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }
}

/// Endpoint-form arc arguments, as written in path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

impl ArcParams {
    /// Read one `A` argument group: `rx ry rotation large-arc sweep x y`.
    /// The endpoint is ignored here.
    pub fn from_group(group: &[f64]) -> Self {
        Self {
            radius_x: group[0],
            radius_y: group[1],
            x_axis_rotation: group[2],
            large_arc: group[3] != 0.0,
            sweep: group[4] != 0.0,
        }
    }
}

/// What an arc command becomes once converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcSegment {
    /// A zero radius cannot describe an ellipse; draw a straight line.
    Line(Point),
    Arc(EllipticalArc),
}

/// Convert an endpoint-form arc from `start` to `end`.
///
/// Callers must not pass `start == end`; such arcs are skipped before
/// conversion.
pub fn endpoint_to_center(params: ArcParams, start: Point, end: Point) -> ArcSegment {
    if params.radius_x == 0.0 || params.radius_y == 0.0 {
        return ArcSegment::Line(end);
    }

    let rotation = params.x_axis_rotation.to_radians();
    let (sin_r, cos_r) = rotation.sin_cos();
    let mut rx = params.radius_x.abs();
    let mut ry = params.radius_y.abs();

    // Step 1: (x1', y1')
    let dx2 = (start.x - end.x) / 2.0;
    let dy2 = (start.y - end.y) / 2.0;
    let x1p = cos_r * dx2 + sin_r * dy2;
    let y1p = -sin_r * dx2 + cos_r * dy2;

    let mut rxs = rx * rx;
    let mut rys = ry * ry;
    let x1ps = x1p * x1p;
    let y1ps = y1p * y1p;

    // Radii too small to span the chord are scaled up uniformly.
    let cr = x1ps / rxs + y1ps / rys;
    if cr > 1.0 {
        let s = cr.sqrt();
        rx *= s;
        ry *= s;
        rxs = rx * rx;
        rys = ry * ry;
    }

    // Step 2: (cx', cy')
    let dq = rxs * y1ps + rys * x1ps;
    let pq = (rxs * rys - dq) / dq;
    let mut q = pq.max(0.0).sqrt();
    if params.large_arc == params.sweep {
        q = -q;
    }
    let cxp = q * rx * y1p / ry;
    let cyp = -q * ry * x1p / rx;

    // Step 3: (cx, cy)
    let cx = cos_r * cxp - sin_r * cyp + (start.x + end.x) / 2.0;
    let cy = sin_r * cxp + cos_r * cyp + (start.y + end.y) / 2.0;

    // Step 4: start angle and sweep
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;
    let theta = signed_angle(1.0, 0.0, ux, uy);
    let mut delta = signed_angle(ux, uy, vx, vy) % TAU;
    if !params.sweep && delta > 0.0 {
        delta -= TAU;
    } else if params.sweep && delta < 0.0 {
        delta += TAU;
    }

    ArcSegment::Arc(EllipticalArc {
        center: Point::new(cx, cy),
        radius_x: rx,
        radius_y: ry,
        start_angle: theta,
        end_angle: theta + delta,
        clockwise: !params.sweep,
        x_axis_rotation: rotation,
    })
}

/// Convert an arc and hand the result to `sink`.
pub fn arc_to<S: PathSink + ?Sized>(sink: &mut S, params: ArcParams, start: Point, end: Point) {
    match endpoint_to_center(params, start, end) {
        ArcSegment::Line(to) => sink.line_to(to),
        ArcSegment::Arc(arc) => sink.elliptical_arc_to(arc),
    }
}

/// Angle from `u` to `v`, signed by the cross product.
fn signed_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let dot = ux * vx + uy * vy;
    let len = ux.hypot(uy) * vx.hypot(vy);
    // Rounding can push the cosine slightly outside [-1, 1].
    let angle = (dot / len).clamp(-1.0, 1.0).acos();
    if ux * vy - uy * vx < 0.0 {
        -angle
    } else {
        angle
    }
}
