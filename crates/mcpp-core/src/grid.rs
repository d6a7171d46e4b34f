//! Occupancy grid and neighborhood primitives.

use crate::error::{McppError, McppResult};

/// A single grid cell's occupancy state.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Free,
    Occupied,
}

impl CellKind {
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, CellKind::Free)
    }
}

/// A rectangular, immutable occupancy grid addressed by `(row, col)`.
///
/// Cells are stored flat in row-major order, following the CSR-style dense
/// layout the rest of this codebase prefers over nested `Vec<Vec<_>>`.
#[derive(Clone, Debug)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Build a grid from a row-major `height x width` cell matrix.
    ///
    /// Fails with [`McppError::InvalidGrid`] if the grid has zero area or
    /// contains no FREE cell.
    pub fn new(height: usize, width: usize, cells: Vec<CellKind>) -> McppResult<Self> {
        if height == 0 || width == 0 {
            return Err(McppError::InvalidGrid("grid has zero area".into()));
        }
        if cells.len() != height * width {
            return Err(McppError::InvalidGrid(format!(
                "expected {} cells for {height}x{width} grid, got {}",
                height * width,
                cells.len()
            )));
        }
        if !cells.iter().any(|c| c.is_free()) {
            return Err(McppError::InvalidGrid("grid has no free cell".into()));
        }
        Ok(Grid { height, width, cells })
    }

    /// Build a grid from `0`/non-`0` integers: `0` is FREE, anything else
    /// is OCCUPIED. Mirrors the text/image ingestion convention in use at
    /// the external boundary.
    pub fn from_ints(height: usize, width: usize, values: &[i32]) -> McppResult<Self> {
        let cells = values
            .iter()
            .map(|&v| if v == 0 { CellKind::Free } else { CellKind::Occupied })
            .collect();
        Self::new(height, width, cells)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.height && (c as usize) < self.width
    }

    #[inline]
    fn index(&self, r: usize, c: usize) -> usize {
        r * self.width + c
    }

    #[inline]
    pub fn kind(&self, r: usize, c: usize) -> CellKind {
        self.cells[self.index(r, c)]
    }

    #[inline]
    pub fn is_free(&self, r: usize, c: usize) -> bool {
        self.kind(r, c).is_free()
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_free()).count()
    }

    /// All free cells, in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |r| (0..self.width).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.is_free(r, c))
    }

    /// In-bounds 4-neighbors of `(r,c)`, in fixed order `(→, ↓, ←, ↑)`.
    pub fn neighbors4(&self, r: usize, c: usize) -> Vec<(usize, usize)> {
        DIRS4
            .iter()
            .filter_map(|&(dr, dc)| self.offset(r, c, dr, dc))
            .collect()
    }

    /// In-bounds 8-neighbors of `(r,c)`, in fixed row-major-ish order.
    pub fn neighbors8(&self, r: usize, c: usize) -> Vec<(usize, usize)> {
        DIRS8
            .iter()
            .filter_map(|&(dr, dc)| self.offset(r, c, dr, dc))
            .collect()
    }

    #[inline]
    fn offset(&self, r: usize, c: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let nr = r as isize + dr;
        let nc = c as isize + dc;
        if self.in_bounds(nr, nc) {
            Some((nr as usize, nc as usize))
        } else {
            None
        }
    }
}

/// 4-connected directions, fixed order `(→, ↓, ←, ↑)` — the order STC's walk
/// emission iterates them in.
pub const DIRS4: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// 8-connected directions (4-dirs followed by the four diagonals).
pub const DIRS8: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Free-standing form of [`Grid::neighbors4`] for callers without a `Grid`
/// handy (e.g. operating directly on a `LabelMatrix`).
pub fn neighbors4_bounded(
    r: usize,
    c: usize,
    height: usize,
    width: usize,
) -> impl Iterator<Item = (usize, usize)> {
    DIRS4.into_iter().filter_map(move |(dr, dc)| {
        let nr = r as isize + dr;
        let nc = c as isize + dc;
        if nr >= 0 && nc >= 0 && (nr as usize) < height && (nc as usize) < width {
            Some((nr as usize, nc as usize))
        } else {
            None
        }
    })
}

/// Free-standing form of [`Grid::neighbors8`].
pub fn neighbors8_bounded(
    r: usize,
    c: usize,
    height: usize,
    width: usize,
) -> impl Iterator<Item = (usize, usize)> {
    DIRS8.into_iter().filter_map(move |(dr, dc)| {
        let nr = r as isize + dr;
        let nc = c as isize + dc;
        if nr >= 0 && nc >= 0 && (nr as usize) < height && (nc as usize) < width {
            Some((nr as usize, nc as usize))
        } else {
            None
        }
    })
}
