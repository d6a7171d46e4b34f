//! The label matrix and the cell-level primitives built on top of it:
//! partitioning, border/adjacency views, the bridge test, and DFS-subtree
//! enumeration.
//!
//! Every iteration over a set of cells or labels here uses an ordered
//! container (`BTreeSet`/`BTreeMap`) rather than a hash-based one. Label
//! matrices feed directly into operations whose output must be
//! bit-identical across runs with the same seed; unordered iteration would
//! silently break that guarantee.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::{neighbors4_bounded, neighbors8_bounded, Grid};
use crate::ids::AgentIndex;

pub type Cell = (usize, usize);

/// `L[r,c] = Some(i)` assigns the cell to agent `i`; `None` means OCCUPIED.
#[derive(Clone, Debug)]
pub struct LabelMatrix {
    height: usize,
    width: usize,
    labels: Vec<Option<AgentIndex>>,
}

impl LabelMatrix {
    /// An all-`None` matrix of the given shape, ready to be filled in by a
    /// partitioner.
    pub fn empty(height: usize, width: usize) -> Self {
        LabelMatrix { height, width, labels: vec![None; height * width] }
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
    fn index(&self, r: usize, c: usize) -> usize {
        r * self.width + c
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Option<AgentIndex> {
        self.labels[self.index(r, c)]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, label: Option<AgentIndex>) {
        let i = self.index(r, c);
        self.labels[i] = label;
    }

    /// Every cell in row-major order, along with its label.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Cell, Option<AgentIndex>)> + '_ {
        (0..self.height)
            .flat_map(move |r| (0..self.width).map(move |c| (r, c)))
            .map(move |(r, c)| ((r, c), self.get(r, c)))
    }

    /// Validate against a grid: `L[r,c]` is `Some` iff the grid cell is FREE
    /// (invariant I1).
    pub fn matches_grid(&self, grid: &Grid) -> bool {
        self.iter_cells().all(|((r, c), label)| grid.is_free(r, c) == label.is_some())
    }

    /// Derived view: the per-agent cell sets `P_0,…,P_{n-1}` (§4.1 `partition`).
    pub fn partition(&self, n: usize) -> Vec<BTreeSet<Cell>> {
        let mut parts = vec![BTreeSet::new(); n];
        for ((r, c), label) in self.iter_cells() {
            if let Some(i) = label {
                parts[i.index()].insert((r, c));
            }
        }
        parts
    }

    /// Just the per-agent cell counts, without materializing full cell sets.
    pub fn partition_sizes(&self, n: usize) -> Vec<usize> {
        let mut sizes = vec![0usize; n];
        for (_, label) in self.iter_cells() {
            if let Some(i) = label {
                sizes[i.index()] += 1;
            }
        }
        sizes
    }

    /// All cells currently assigned to `agent`, in row-major order.
    pub fn cells_of(&self, agent: AgentIndex) -> BTreeSet<Cell> {
        self.iter_cells()
            .filter_map(|((r, c), label)| (label == Some(agent)).then_some((r, c)))
            .collect()
    }

    /// For a set of cells all belonging to one label, the set of external
    /// 4-adjacent neighbor cells grouped by their label (§4.1 `border`).
    pub fn border(&self, cells: &BTreeSet<Cell>) -> BTreeMap<AgentIndex, BTreeSet<Cell>> {
        let mut out: BTreeMap<AgentIndex, BTreeSet<Cell>> = BTreeMap::new();
        for &(r, c) in cells {
            for (nr, nc) in neighbors4_bounded(r, c, self.height, self.width) {
                if cells.contains(&(nr, nc)) {
                    continue;
                }
                if let Some(label) = self.get(nr, nc) {
                    out.entry(label).or_default().insert((nr, nc));
                }
            }
        }
        out
    }

    /// Agent adjacency: `i -> {j : some cell of P_i is 4-adjacent to some
    /// cell of P_j}` (§4.1 `adj_list`).
    pub fn adj_list(&self, n: usize) -> BTreeMap<AgentIndex, BTreeSet<AgentIndex>> {
        let mut out: BTreeMap<AgentIndex, BTreeSet<AgentIndex>> = BTreeMap::new();
        for ((r, c), label) in self.iter_cells() {
            let Some(i) = label else { continue };
            for (nr, nc) in neighbors4_bounded(r, c, self.height, self.width) {
                if let Some(j) = self.get(nr, nc) {
                    if j != i {
                        out.entry(i).or_default().insert(j);
                    }
                }
            }
        }
        // Ensure every agent with any area has an entry, even if isolated.
        for i in 0..n {
            out.entry(AgentIndex::try_from(i).expect("agent count fits u32")).or_default();
        }
        out
    }

    /// Articulation test restricted to a label (§4.1 `is_not_bridge`).
    ///
    /// Temporarily treats `cell` as occupied; returns `true` iff every pair
    /// of its same-label 4-neighbors remains connected within that label's
    /// region without passing through `cell`. Restores `L` exactly before
    /// returning, including on early exit.
    pub fn is_not_bridge(&mut self, cell: Cell) -> bool {
        let (r, c) = cell;
        let Some(label) = self.get(r, c) else { return true };

        let same_label_neighbors: Vec<Cell> = neighbors4_bounded(r, c, self.height, self.width)
            .filter(|&(nr, nc)| self.get(nr, nc) == Some(label))
            .collect();

        if same_label_neighbors.len() <= 1 {
            return true;
        }

        self.set(r, c, None);
        let anchor = same_label_neighbors[0];
        let reachable = self.flood_fill_label(anchor, label, Some(cell));
        let result = same_label_neighbors.iter().all(|n| reachable.contains(n));
        self.set(r, c, Some(label));
        result
    }

    /// Enumerate the connected subtrees that result if `root` were removed:
    /// each subtree is the set of same-label cells reachable through one of
    /// `root`'s 4-neighbors without passing through `root` (§4.1
    /// `dfs_subtrees`).
    pub fn dfs_subtrees(&mut self, root: Cell) -> Vec<BTreeSet<Cell>> {
        let (r, c) = root;
        let Some(label) = self.get(r, c) else { return Vec::new() };

        let same_label_neighbors: Vec<Cell> = neighbors4_bounded(r, c, self.height, self.width)
            .filter(|&(nr, nc)| self.get(nr, nc) == Some(label))
            .collect();

        self.set(r, c, None);
        let mut visited: BTreeSet<Cell> = BTreeSet::new();
        let mut subtrees = Vec::new();
        for start in same_label_neighbors {
            if visited.contains(&start) {
                continue;
            }
            let reached = self.flood_fill_label(start, label, Some(root));
            visited.extend(reached.iter().copied());
            subtrees.push(reached);
        }
        self.set(r, c, Some(label));
        subtrees
    }

    /// `true` iff strictly more than 25% of `cell`'s in-bounds 8-neighbors
    /// carry `label` (§4.1 `strongly_connected`).
    pub fn strongly_connected(&self, cell: Cell, label: AgentIndex) -> bool {
        let (r, c) = cell;
        let neighbors: Vec<Cell> = neighbors8_bounded(r, c, self.height, self.width).collect();
        if neighbors.is_empty() {
            return false;
        }
        let matching = neighbors.iter().filter(|&&(nr, nc)| self.get(nr, nc) == Some(label)).count();
        (matching as f64) > 0.25 * (neighbors.len() as f64)
    }

    /// BFS flood fill over cells carrying `label`, starting at `start`,
    /// never stepping onto `blocked`. Used by both `is_not_bridge` and
    /// `dfs_subtrees` (the latter despite the name uses a BFS frontier;
    /// traversal order does not affect the resulting connected set).
    fn flood_fill_label(&self, start: Cell, label: AgentIndex, blocked: Option<Cell>) -> BTreeSet<Cell> {
        let mut visited = BTreeSet::new();
        if self.get(start.0, start.1) != Some(label) {
            return visited;
        }
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(start);
        visited.insert(start);
        while let Some((r, c)) = queue.pop_front() {
            for (nr, nc) in neighbors4_bounded(r, c, self.height, self.width) {
                if Some((nr, nc)) == blocked {
                    continue;
                }
                if visited.contains(&(nr, nc)) {
                    continue;
                }
                if self.get(nr, nc) == Some(label) {
                    visited.insert((nr, nc));
                    queue.push_back((nr, nc));
                }
            }
        }
        visited
    }
}
