//! Dump the curve primitives of SVG path data.
//!
//! ## Usage
//!
//! ```bash
//! # Print the segments of a path
//! path-dump path "M0,0 L10,10 a5 5 0 01 5 5z"
//!
//! # Same, flipped to a y-up frame, as JSON
//! path-dump --y-up --format json path "M0,0 L10,10"
//!
//! # Read a polygon point list from stdin
//! echo "0,0 10,0 10,10" | path-dump points --closed -
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use curvekit_common::{init_logging, LogConfig, LogFormat};
use curvekit_path::{
    parse_polygon, parse_polyline, parse_with_options, Diagnostic, ParseError, PathData,
    PathOptions, Segment,
};
use std::io::Read;
use thiserror::Error;
use tracing::debug;

#[derive(Parser)]
#[command(name = "path-dump")]
#[command(about = "Dump the curve primitives of SVG path data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Flip the y axis (y grows upwards)
    #[arg(long, global = true)]
    y_up: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Log parser decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log format
    #[arg(long, value_enum, default_value = "compact", global = true)]
    log_format: LogFormatArg,

    /// Custom log filter (e.g. "curvekit_path=trace"), overrides RUST_LOG
    #[arg(long, global = true)]
    log_filter: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse path data (the `d` attribute)
    Path {
        /// Path data, or `-` to read stdin
        data: String,
    },

    /// Parse a polyline or polygon point list
    Points {
        /// Point list, or `-` to read stdin
        data: String,
        /// Close the shape (polygon)
        #[arg(long)]
        closed: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Error, Debug)]
enum DumpError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON output document.
#[derive(Debug, serde::Serialize)]
struct Report<'a> {
    segments: &'a [Segment],
    subpaths: usize,
    diagnostics: &'a [Diagnostic],
}

fn main() {
    let cli = Cli::parse();

    init_logging(log_config(&cli));

    if let Err(e) = run(cli) {
        eprintln!("path-dump: {}", e);
        std::process::exit(1);
    }
}

fn log_config(cli: &Cli) -> LogConfig {
    let config = match cli.verbose {
        0 => LogConfig::default(),
        1 => LogConfig::debug(),
        _ => LogConfig::trace(),
    };
    let config = config.with_format(cli.log_format.into());
    match &cli.log_filter {
        Some(filter) => config.with_filter(filter.clone()),
        None => config,
    }
}

fn run(cli: Cli) -> Result<(), DumpError> {
    let options = if cli.y_up {
        PathOptions::y_up()
    } else {
        PathOptions::default()
    };

    let path = match cli.command {
        Commands::Path { data } => parse_with_options(&read_input(data)?, &options)?,
        Commands::Points { data, closed } => {
            let input = read_input(data)?;
            if closed {
                parse_polygon(&input, &options)?
            } else {
                parse_polyline(&input, &options)?
            }
        }
    };
    debug!(segments = path.len(), "parsed");

    for diagnostic in path.diagnostics() {
        eprintln!("warning: {}", diagnostic);
    }

    match cli.format {
        OutputFormat::Text => print_text(&path),
        OutputFormat::Json => {
            let report = Report {
                segments: path.segments(),
                subpaths: path.subpaths().len(),
                diagnostics: path.diagnostics(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn read_input(data: String) -> Result<String, DumpError> {
    if data != "-" {
        return Ok(data);
    }
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input.trim().to_string())
}

fn print_text(path: &PathData) {
    for (i, subpath) in path.subpaths().iter().enumerate() {
        println!("subpath {}:", i);
        for segment in subpath.iter() {
            println!("  {}", describe(segment));
        }
    }
}

fn describe(segment: &Segment) -> String {
    match segment {
        Segment::MoveTo { to } => format!("move   {} {}", to.x, to.y),
        Segment::LineTo { to } => format!("line   {} {}", to.x, to.y),
        Segment::CubicTo { ctrl1, ctrl2, to } => format!(
            "cubic  {} {}  {} {}  {} {}",
            ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
        ),
        Segment::QuadTo { ctrl, to } => {
            format!("quad   {} {}  {} {}", ctrl.x, ctrl.y, to.x, to.y)
        }
        Segment::Arc { arc } => format!(
            "arc    center {} {} radii {} {} angles {:.6} {:.6} rotation {:.6}{}",
            arc.center.x,
            arc.center.y,
            arc.radius_x,
            arc.radius_y,
            arc.start_angle,
            arc.end_angle,
            arc.x_axis_rotation,
            if arc.clockwise { " cw" } else { " ccw" }
        ),
        Segment::Close => "close".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvekit_path::{parse, Point};

    #[test]
    fn test_describe() {
        assert_eq!(describe(&Segment::LineTo { to: Point::new(1.5, -2.0) }), "line   1.5 -2");
        assert_eq!(describe(&Segment::Close), "close");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["path-dump", "--y-up", "points", "--closed", "0,0 1,1"]).unwrap();
        assert!(cli.y_up);
        assert!(matches!(cli.command, Commands::Points { closed: true, .. }));
    }

    #[test]
    fn test_log_options() {
        let cli = Cli::try_parse_from(["path-dump", "path", "M0 0"]).unwrap();
        let config = log_config(&cli);
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.filter, None);

        let cli = Cli::try_parse_from([
            "path-dump",
            "-vv",
            "--log-format",
            "json",
            "--log-filter",
            "curvekit_path=trace",
            "path",
            "M0 0",
        ])
        .unwrap();
        let config = log_config(&cli);
        assert_eq!(config.level, tracing::Level::TRACE);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.filter.as_deref(), Some("curvekit_path=trace"));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        assert!(Cli::try_parse_from(["path-dump", "--log-format", "xml", "path", "M0 0"]).is_err());
    }

    #[test]
    fn test_json_report() {
        let path = parse("M0 0 L1 2 Z").unwrap();
        let report = Report {
            segments: path.segments(),
            subpaths: path.subpaths().len(),
            diagnostics: path.diagnostics(),
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["subpaths"], 1);
        assert_eq!(json["segments"][1]["type"], "line_to");
        assert_eq!(json["segments"][2]["type"], "close");
    }
}
