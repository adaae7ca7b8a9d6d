//! # CurveKit Path
//!
//! Parser for SVG path data (the `d` attribute) and point lists.
//!
//! ## Features
//!
//! - **Tokenizer**: numbers with implicit separators, exponents and
//!   packed arc flags
//! - **Commands**: `M H V L C S Q T A Z` and their relative forms
//! - **Assembly**: absolute lines, Béziers and elliptical arcs, with
//!   smooth-curve reflection and subpath tracking
//! - **Arcs**: endpoint to center parameterization
//!
//! ## Architecture
//!
//! ```text
//! path data
//!    └── command groups (command)
//!           └── numbers (tokenizer)
//!                  └── assembler ──► PathSink (PathData, your shape builder)
//!                         └── arc conversion
//! ```
//!
//! ## Example
//!
//! ```
//! use curvekit_path::{parse, Point, Segment};
//!
//! let path = parse("M0,0 L10,10").unwrap();
//! assert_eq!(
//!     path.segments(),
//!     &[
//!         Segment::MoveTo { to: Point::new(0.0, 0.0) },
//!         Segment::LineTo { to: Point::new(10.0, 10.0) },
//!     ]
//! );
//! ```

pub mod arc;
pub mod assembler;
pub mod command;
pub mod error;
pub mod geometry;
pub mod options;
pub mod points;
pub mod sink;
pub mod tokenizer;

pub use arc::{endpoint_to_center, ArcParams, ArcSegment, EllipticalArc};
pub use assembler::{assemble, Assembler};
pub use command::{parse_path, CommandKind, ParsedPath, PathCommand};
pub use error::{Diagnostic, DiagnosticKind, ParseError, ParseResult};
pub use geometry::Point;
pub use options::PathOptions;
pub use points::{build_polygon, build_polyline, parse_points, parse_polygon, parse_polyline};
pub use sink::{PathData, PathSink, Segment};
pub use tokenizer::{parse_floats, parse_floats_with_flags, FlagLayout, Tokenizer, ARC_FLAGS};

use tracing::debug_span;

/// A sink after parsing, with the soft failures met along the way.
#[derive(Debug)]
pub struct ParseOutput<S> {
    pub sink: S,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse path data and drive `sink` with the resulting primitives.
///
/// A malformed number anywhere aborts the whole parse and `sink`
/// receives nothing.
pub fn parse_with<S: PathSink>(d: &str, options: &PathOptions, mut sink: S) -> ParseResult<ParseOutput<S>> {
    let _span = debug_span!("parse_path", len = d.len()).entered();

    let ParsedPath {
        mut commands,
        diagnostics,
    } = parse_path(d)?;

    if !options.is_identity() {
        for command in &mut commands {
            command.apply_y_sign(options.y_axis_sign);
        }
    }

    assemble(&commands, &mut sink);
    Ok(ParseOutput { sink, diagnostics })
}

/// Parse path data into recorded segments.
pub fn parse(d: &str) -> ParseResult<PathData> {
    parse_with_options(d, &PathOptions::default())
}

/// Parse path data into recorded segments using `options`.
pub fn parse_with_options(d: &str, options: &PathOptions) -> ParseResult<PathData> {
    let ParseOutput {
        sink: mut data,
        diagnostics,
    } = parse_with(d, options, PathData::new())?;
    data.diagnostics = diagnostics;
    Ok(data)
}
