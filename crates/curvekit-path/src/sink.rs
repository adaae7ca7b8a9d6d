//! Path sinks.
//!
//! The assembler drives a [`PathSink`] with absolute-coordinate
//! primitives. [`PathData`] is the recording sink returned by
//! [`crate::parse`].

use crate::arc::EllipticalArc;
use crate::geometry::Point;
use crate::Diagnostic;

/// Receiver of assembled path primitives.
///
/// Implemented by shape builders that want to construct geometry from
/// path data.
pub trait PathSink {
    /// Start a new subpath at `to`.
    fn move_to(&mut self, to: Point);

    /// Straight line from the current point.
    fn line_to(&mut self, to: Point);

    /// Cubic Bézier from the current point.
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);

    /// Quadratic Bézier from the current point.
    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point);

    /// Elliptical arc in center parameterization. Sinks may decompose it
    /// into Bézier segments.
    fn elliptical_arc_to(&mut self, arc: EllipticalArc);

    /// Close the active subpath. A subpath with no segments stays as is.
    fn close_path(&mut self);
}

impl<S: PathSink + ?Sized> PathSink for &mut S {
    fn move_to(&mut self, to: Point) {
        (**self).move_to(to)
    }

    fn line_to(&mut self, to: Point) {
        (**self).line_to(to)
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        (**self).cubic_bezier_to(ctrl1, ctrl2, to)
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        (**self).quadratic_bezier_to(ctrl, to)
    }

    fn elliptical_arc_to(&mut self, arc: EllipticalArc) {
        (**self).elliptical_arc_to(arc)
    }

    fn close_path(&mut self) {
        (**self).close_path()
    }
}

/// One recorded primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Segment {
    MoveTo { to: Point },
    LineTo { to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    QuadTo { ctrl: Point, to: Point },
    Arc { arc: EllipticalArc },
    Close,
}

impl Segment {
    /// Absolute endpoint of the segment; `None` for [`Segment::Close`].
    pub fn end_point(&self) -> Option<Point> {
        match self {
            Segment::MoveTo { to }
            | Segment::LineTo { to }
            | Segment::CubicTo { to, .. }
            | Segment::QuadTo { to, .. } => Some(*to),
            Segment::Arc { arc } => Some(arc.end_point()),
            Segment::Close => None,
        }
    }

    /// Whether this segment draws something.
    pub fn is_drawing(&self) -> bool {
        !matches!(self, Segment::MoveTo { .. } | Segment::Close)
    }
}

/// Recording sink: the primitives of a parsed path plus any diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    segments: Vec<Segment>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Soft failures reported while parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments grouped into subpaths, each starting at a `MoveTo`.
    pub fn subpaths(&self) -> Vec<&[Segment]> {
        let mut subpaths = Vec::new();
        let mut start = 0;
        for (i, segment) in self.segments.iter().enumerate() {
            if matches!(segment, Segment::MoveTo { .. }) && i > start {
                subpaths.push(&self.segments[start..i]);
                start = i;
            }
        }
        if start < self.segments.len() {
            subpaths.push(&self.segments[start..]);
        }
        subpaths
    }

    /// Endpoint of every segment except closes, in order.
    pub fn end_points(&self) -> Vec<Point> {
        self.segments.iter().filter_map(Segment::end_point).collect()
    }

    fn subpath_has_segments(&self) -> bool {
        self.segments
            .iter()
            .rev()
            .take_while(|segment| !matches!(segment, Segment::MoveTo { .. } | Segment::Close))
            .any(Segment::is_drawing)
    }
}

impl PathSink for PathData {
    fn move_to(&mut self, to: Point) {
        self.segments.push(Segment::MoveTo { to });
    }

    fn line_to(&mut self, to: Point) {
        self.segments.push(Segment::LineTo { to });
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.segments.push(Segment::CubicTo { ctrl1, ctrl2, to });
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.segments.push(Segment::QuadTo { ctrl, to });
    }

    fn elliptical_arc_to(&mut self, arc: EllipticalArc) {
        self.segments.push(Segment::Arc { arc });
    }

    fn close_path(&mut self) {
        if self.subpath_has_segments() {
            self.segments.push(Segment::Close);
        }
    }
}
