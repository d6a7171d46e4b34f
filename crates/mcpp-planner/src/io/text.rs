//! Delimiter-separated text grid ingestion (§6), grounded on
//! `original_source/src/core/utils.py::load_map_from_text_file` /
//! `save_map_to_text_file` (`np.loadtxt`/`np.savetxt`).

use std::fs;
use std::path::Path;

use mcpp_core::Grid;

use crate::error::{PlannerError, PlannerResult};

/// Parse a delimiter-separated integer grid: `0` is FREE, anything else is
/// OCCUPIED. Row count and column count are inferred from the text; a
/// trailing newline (or trailing blank lines) is tolerated.
pub fn parse_grid(text: &str, sep: char) -> PlannerResult<Grid> {
    let rows: Vec<Vec<i32>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split(sep)
                .map(str::trim)
                .map(|field| {
                    field
                        .parse::<i32>()
                        .map_err(|_| PlannerError::MalformedGrid(format!("not an integer: {field:?}")))
                })
                .collect::<PlannerResult<Vec<i32>>>()
        })
        .collect::<PlannerResult<Vec<Vec<i32>>>>()?;

    let height = rows.len();
    if height == 0 {
        return Err(PlannerError::MalformedGrid("empty grid".into()));
    }
    let width = rows[0].len();
    if rows.iter().any(|r| r.len() != width) {
        return Err(PlannerError::MalformedGrid("rows have inconsistent column counts".into()));
    }

    let values: Vec<i32> = rows.into_iter().flatten().collect();
    Ok(Grid::from_ints(height, width, &values)?)
}

/// Render a grid back to the same delimiter-separated integer format.
pub fn format_grid(grid: &Grid, sep: char) -> String {
    let mut out = String::new();
    for r in 0..grid.height() {
        for c in 0..grid.width() {
            if c > 0 {
                out.push(sep);
            }
            out.push(if grid.is_free(r, c) { '0' } else { '1' });
        }
        out.push('\n');
    }
    out
}

pub fn load_grid(path: impl AsRef<Path>, sep: char) -> PlannerResult<Grid> {
    parse_grid(&fs::read_to_string(path)?, sep)
}

pub fn save_grid(path: impl AsRef<Path>, grid: &Grid, sep: char) -> PlannerResult<()> {
    fs::write(path, format_grid(grid, sep))?;
    Ok(())
}
