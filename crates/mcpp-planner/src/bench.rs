//! Benchmark log record (§6), grounded on
//! `original_source/misc/benchmark/_utils.py::get_logger` and the per-step
//! `logger.info(...)` call in `misc/benchmark/all.py`. The source appends
//! plain `|`-joined fields to a line-oriented log file via the standard
//! library `logging` module; we write the same fields through a `csv`
//! writer over a row struct, following `dt-output::csv::CsvWriter`'s shape.

use std::io::Write;

use mcpp_core::label::Cell;
use serde::Serialize;

use crate::error::PlannerResult;

/// One step's outcome for every agent in the fleet, ready to be written as
/// a CSV row.
#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkRow {
    pub map_name: String,
    pub step: usize,
    pub planner: String,
    pub handler: String,
    pub success: bool,
    pub elapsed_seconds: f64,
    /// `len_1|len_2|…|len_n`, each fixed to 4 decimal places.
    pub trajectory_lengths: String,
    /// `count_1|count_2|…|count_n`.
    pub assignment_counts: String,
}

impl BenchmarkRow {
    pub fn new(
        map_name: impl Into<String>,
        step: usize,
        planner: impl Into<String>,
        handler: impl Into<String>,
        success: bool,
        elapsed_seconds: f64,
        trajectory_lengths: &[f64],
        assignment_counts: &[usize],
    ) -> Self {
        BenchmarkRow {
            map_name: map_name.into(),
            step,
            planner: planner.into(),
            handler: handler.into(),
            success,
            elapsed_seconds,
            trajectory_lengths: trajectory_lengths.iter().map(|l| format!("{l:.4}")).collect::<Vec<_>>().join("|"),
            assignment_counts: assignment_counts.iter().map(usize::to_string).collect::<Vec<_>>().join("|"),
        }
    }
}

/// The closed perimeter length of a cyclic trajectory: the sum of
/// Euclidean distances between consecutive cells, wrapping from the last
/// cell back to the first. Grounded on
/// `original_source/src/core/uav.py::UAV.get_trajectory_length`, itself
/// built on `Cell.distance` (`src/core/cell.py`).
pub fn trajectory_length(trajectory: &[Cell]) -> f64 {
    if trajectory.is_empty() {
        return 0.0;
    }
    let n = trajectory.len();
    (0..n)
        .map(|i| {
            let (r0, c0) = trajectory[i];
            let (r1, c1) = trajectory[(i + 1) % n];
            let (dr, dc) = (r1 as f64 - r0 as f64, c1 as f64 - c0 as f64);
            (dr * dr + dc * dc).sqrt()
        })
        .sum()
}

/// Appends [`BenchmarkRow`]s to a single underlying writer, one CSV line
/// per step, matching the source's one-logger-per-benchmark-run file.
pub struct BenchmarkWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> BenchmarkWriter<W> {
    /// Wrap an already-open writer. Does not write a header row — the
    /// source's raw `|`-joined log lines have none either.
    pub fn new(writer: W) -> Self {
        BenchmarkWriter { inner: csv::WriterBuilder::new().has_headers(false).from_writer(writer) }
    }

    pub fn write_row(&mut self, row: &BenchmarkRow) -> PlannerResult<()> {
        self.inner.serialize(row)?;
        Ok(())
    }

    pub fn flush(&mut self) -> PlannerResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}
