//! Point lists, as used by polygon and polyline shapes.
//!
//! A point list is a plain run of numbers (`"10,20 30,40"`) read with the
//! path tokenizer and paired into points.

use crate::geometry::Point;
use crate::options::PathOptions;
use crate::sink::{PathData, PathSink};
use crate::tokenizer::parse_floats;
use crate::ParseResult;
use tracing::debug;

/// Parse a point list. A trailing unpaired number is ignored.
pub fn parse_points(s: &str) -> ParseResult<Vec<Point>> {
    let numbers = parse_floats(s)?;
    if numbers.len() % 2 != 0 {
        debug!(count = numbers.len(), "ignoring unpaired trailing coordinate");
    }
    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

/// Emit an open polyline through `points`.
pub fn build_polyline<S: PathSink + ?Sized>(points: &[Point], sink: &mut S) {
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        sink.move_to(first);
        for &point in iter {
            sink.line_to(point);
        }
    }
}

/// Emit a closed polygon through `points`.
pub fn build_polygon<S: PathSink + ?Sized>(points: &[Point], sink: &mut S) {
    build_polyline(points, sink);
    if points.len() > 1 {
        sink.close_path();
    }
}

/// Parse a polyline `points` attribute into recorded segments.
pub fn parse_polyline(s: &str, options: &PathOptions) -> ParseResult<PathData> {
    let points = oriented(parse_points(s)?, options);
    let mut data = PathData::new();
    build_polyline(&points, &mut data);
    Ok(data)
}

/// Parse a polygon `points` attribute into recorded segments.
pub fn parse_polygon(s: &str, options: &PathOptions) -> ParseResult<PathData> {
    let points = oriented(parse_points(s)?, options);
    let mut data = PathData::new();
    build_polygon(&points, &mut data);
    Ok(data)
}

fn oriented(mut points: Vec<Point>, options: &PathOptions) -> Vec<Point> {
    if !options.is_identity() {
        for point in &mut points {
            point.y *= options.y_axis_sign;
        }
    }
    points
}
