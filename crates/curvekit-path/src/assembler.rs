//! Curve assembler.
//!
//! Walks parsed commands, resolves relative coordinates and smooth-curve
//! control points against the cursor, and emits absolute primitives into
//! a [`PathSink`].

use crate::arc::{self, ArcParams};
use crate::command::{CommandKind, PathCommand};
use crate::geometry::Point;
use crate::sink::PathSink;
use tracing::trace;

/// Cursor state threaded through one command sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cursor {
    /// Current absolute position.
    point: Point,
    /// Last Bézier control point, or `point` after any other command.
    control: Point,
    /// Where `Z` returns to.
    subpath_start: Point,
    /// Set at the start and after each close.
    is_first_point: bool,
    /// The next command group's first endpoint becomes `subpath_start`.
    capture_first_point: bool,
    /// Whether the current subpath has received any segment.
    has_segments: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            point: Point::ZERO,
            control: Point::ZERO,
            subpath_start: Point::ZERO,
            is_first_point: true,
            capture_first_point: false,
            has_segments: false,
        }
    }
}

/// Drives a sink from parsed commands.
pub struct Assembler<'s, S: PathSink + ?Sized> {
    sink: &'s mut S,
    cursor: Cursor,
}

impl<'s, S: PathSink + ?Sized> Assembler<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            cursor: Cursor::default(),
        }
    }

    /// The current absolute position.
    pub fn current_point(&self) -> Point {
        self.cursor.point
    }

    /// Where the current subpath started.
    pub fn subpath_start(&self) -> Point {
        self.cursor.subpath_start
    }

    pub fn run(&mut self, commands: &[PathCommand]) {
        for command in commands {
            self.command(command);
        }
    }

    /// Emit the primitives of one command group.
    pub fn command(&mut self, command: &PathCommand) {
        trace!(letter = %command.letter(), values = command.values.len(), "assembling command");

        if self.cursor.is_first_point {
            self.cursor.capture_first_point = true;
            self.cursor.is_first_point = false;
        }

        if command.kind == CommandKind::ClosePath {
            self.close_path();
            return;
        }

        let relative = command.relative;
        for (j, group) in command.groups().enumerate() {
            let emitted = match command.kind {
                CommandKind::MoveTo => {
                    let to = self.resolve(relative, group[0], group[1]);
                    if j == 0 {
                        self.move_to(to);
                    } else {
                        self.line_to(to);
                    }
                    true
                }
                CommandKind::HorizontalLineTo => {
                    let x = if relative { self.cursor.point.x + group[0] } else { group[0] };
                    self.line_to(Point::new(x, self.cursor.point.y));
                    true
                }
                CommandKind::VerticalLineTo => {
                    let y = if relative { self.cursor.point.y + group[0] } else { group[0] };
                    self.line_to(Point::new(self.cursor.point.x, y));
                    true
                }
                CommandKind::LineTo => {
                    let to = self.resolve(relative, group[0], group[1]);
                    self.line_to(to);
                    true
                }
                CommandKind::CubicTo => {
                    let ctrl1 = self.resolve(relative, group[0], group[1]);
                    let ctrl2 = self.resolve(relative, group[2], group[3]);
                    let to = self.resolve(relative, group[4], group[5]);
                    self.cubic_to(ctrl1, ctrl2, to);
                    true
                }
                CommandKind::SmoothCubicTo => {
                    let ctrl1 = self.cursor.point.reflect(self.cursor.control);
                    let ctrl2 = self.resolve(relative, group[0], group[1]);
                    let to = self.resolve(relative, group[2], group[3]);
                    self.cubic_to(ctrl1, ctrl2, to);
                    true
                }
                CommandKind::QuadTo => {
                    let ctrl = self.resolve(relative, group[0], group[1]);
                    let to = self.resolve(relative, group[2], group[3]);
                    self.quad_to(ctrl, to);
                    true
                }
                CommandKind::SmoothQuadTo => {
                    let ctrl = self.cursor.point.reflect(self.cursor.control);
                    let to = self.resolve(relative, group[0], group[1]);
                    self.quad_to(ctrl, to);
                    true
                }
                CommandKind::ArcTo => {
                    let to = self.resolve(relative, group[5], group[6]);
                    self.arc_to(ArcParams::from_group(group), to)
                }
                CommandKind::ClosePath => false,
            };

            if emitted && j == 0 && self.cursor.capture_first_point {
                self.cursor.subpath_start = self.cursor.point;
                self.cursor.capture_first_point = false;
            }
        }
    }

    fn resolve(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            Point::new(self.cursor.point.x + x, self.cursor.point.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn move_to(&mut self, to: Point) {
        self.sink.move_to(to);
        self.cursor.point = to;
        self.cursor.control = to;
        self.cursor.subpath_start = to;
        self.cursor.capture_first_point = false;
        self.cursor.has_segments = false;
    }

    fn line_to(&mut self, to: Point) {
        self.sink.line_to(to);
        self.cursor.point = to;
        self.cursor.control = to;
        self.cursor.has_segments = true;
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.sink.cubic_bezier_to(ctrl1, ctrl2, to);
        self.cursor.point = to;
        self.cursor.control = ctrl2;
        self.cursor.has_segments = true;
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.sink.quadratic_bezier_to(ctrl, to);
        self.cursor.point = to;
        self.cursor.control = ctrl;
        self.cursor.has_segments = true;
    }

    /// Returns false when the arc is skipped for ending where it starts.
    fn arc_to(&mut self, params: ArcParams, to: Point) -> bool {
        let start = self.cursor.point;
        if to == start {
            trace!(?to, "skipping zero-length arc");
            return false;
        }
        arc::arc_to(&mut *self.sink, params, start, to);
        self.cursor.point = to;
        self.cursor.control = to;
        self.cursor.has_segments = true;
        true
    }

    fn close_path(&mut self) {
        if !self.cursor.has_segments {
            return;
        }
        self.sink.close_path();
        self.cursor.point = self.cursor.subpath_start;
        self.cursor.control = self.cursor.point;
        self.cursor.is_first_point = true;
        self.cursor.has_segments = false;
    }
}

/// Assemble `commands` into `sink`.
pub fn assemble<S: PathSink + ?Sized>(commands: &[PathCommand], sink: &mut S) {
    Assembler::new(sink).run(commands);
}
