use std::fmt::Write as _;
use std::time::{Duration, Instant};

use tm_matrix::Matrix;

use crate::contender::Contender;
use crate::error::{BenchError, Result};

/// Results closer than this in absolute terms always agree.
pub const ABS_TOLERANCE: f64 = 1e-6;
/// Relative tolerance for results further from zero.
pub const REL_TOLERANCE: f64 = 1e-9;

/// Timing of one contender.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRow {
    pub name: String,
    pub elapsed: Duration,
    /// `elapsed` divided by the baseline's elapsed time; the baseline itself
    /// is 1.0 and a slower contender is above 1.0.
    pub speedup: f64,
}

/// Outcome of [`compare`]. The first row is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub rows: Vec<TimingRow>,
}

impl Comparison {
    pub fn baseline(&self) -> Option<&TimingRow> {
        self.rows.first()
    }

    /// Render as a tab-separated table with an
    /// `Implementation\tTime\tSpeedup` header, seconds to four places.
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("Implementation\tTime\tSpeedup\n");
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{}\t{:.4}\t{:.4}",
                row.name,
                row.elapsed.as_secs_f64(),
                row.speedup
            );
        }
        out
    }
}

/// Multiply `a @ b` with every contender in turn and time each call.
///
/// The first contender is the baseline. Every other result must agree with
/// the baseline's element-wise within [`ABS_TOLERANCE`] or
/// [`REL_TOLERANCE`]; otherwise the comparison fails with
/// `Disagreement` rather than report a timing for a wrong answer.
pub fn compare(a: &Matrix, b: &Matrix, contenders: &[&dyn Contender]) -> Result<Comparison> {
    let (first, rest) = contenders.split_first().ok_or(BenchError::NoContenders)?;

    let (reference, base_elapsed) = time(*first, a, b)?;
    let mut rows = vec![TimingRow {
        name: first.name().to_string(),
        elapsed: base_elapsed,
        speedup: 1.0,
    }];

    for contender in rest {
        let (result, elapsed) = time(*contender, a, b)?;
        let diff = max_abs_diff(&result, &reference);
        if !agrees(&result, &reference) {
            return Err(BenchError::Disagreement {
                name: contender.name().to_string(),
                baseline: first.name().to_string(),
                max_abs_diff: diff,
            });
        }
        rows.push(TimingRow {
            name: contender.name().to_string(),
            elapsed,
            speedup: ratio(elapsed, base_elapsed),
        });
    }

    Ok(Comparison { rows })
}

fn time(contender: &dyn Contender, a: &Matrix, b: &Matrix) -> Result<(Matrix, Duration)> {
    let start = Instant::now();
    let result = contender.multiply(a, b)?;
    let elapsed = start.elapsed();
    log::info!(
        "{}: {} @ {} in {:.4}s",
        contender.name(),
        a.shape(),
        b.shape(),
        elapsed.as_secs_f64()
    );
    Ok((result, elapsed))
}

fn ratio(elapsed: Duration, baseline: Duration) -> f64 {
    let base = baseline.as_secs_f64();
    if base > 0.0 {
        elapsed.as_secs_f64() / base
    } else if elapsed.is_zero() {
        1.0
    } else {
        f64::INFINITY
    }
}

fn agrees(x: &Matrix, y: &Matrix) -> bool {
    x.shape() == y.shape()
        && x.as_slice().iter().zip(y.as_slice()).all(|(&p, &q)| {
            approx::relative_eq!(p, q, epsilon = ABS_TOLERANCE, max_relative = REL_TOLERANCE)
        })
}

fn max_abs_diff(x: &Matrix, y: &Matrix) -> f64 {
    x.as_slice()
        .iter()
        .zip(y.as_slice())
        .map(|(p, q)| (p - q).abs())
        .fold(0.0, f64::max)
}
