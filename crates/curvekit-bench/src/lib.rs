//! # CurveKit Bench
//!
//! Input generators for the CurveKit path parsing benchmarks.
//!
//! ## Usage
//!
//! ```text
//! cargo bench -p curvekit-bench
//! ```

use std::fmt::Write;

/// Path data with `n` repetitions of a subpath that uses every command.
pub fn generate_path(n: usize) -> String {
    let mut d = String::with_capacity(n * 96);
    for i in 0..n {
        let x = (i % 100) as f64 * 1.5;
        let y = (i / 100) as f64 * 2.25;
        let _ = write!(
            d,
            "M{x},{y} h10 v-5.5 l3-3 C{a} {b} {c} {e} {x} {y} s2,1 4,0 q1.5.5 3 0 t3 0 a4 3 30 01 -6-2z ",
            a = x + 1.0,
            b = y - 2.0,
            c = x + 4.0,
            e = y + 2.0,
        );
    }
    d
}

/// Compact point list with `n` points.
pub fn generate_points(n: usize) -> String {
    let mut s = String::with_capacity(n * 12);
    for i in 0..n {
        let angle = i as f64 * 0.1;
        let _ = write!(s, "{:.3},{:.3} ", angle.cos() * 50.0, angle.sin() * 50.0);
    }
    s
}
