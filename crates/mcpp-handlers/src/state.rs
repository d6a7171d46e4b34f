//! The shared mutable state every handler operates on, and the small
//! bookkeeping helpers (STC re-run, index compaction after a removal) they
//! all need regardless of which strategy they implement.

use mcpp_core::grid::neighbors4_bounded;
use mcpp_core::label::Cell;
use mcpp_core::{Agent, AgentIndex, EngineConfig, Grid, LabelMatrix, McppResult};

/// One fleet's live planning state: the grid it flies over, the current
/// partition, the agents themselves (trajectories included), and the
/// configuration handlers consult (`mst_algo`, `max_iter`, the initial
/// partitioner selection used by `Redistribute`).
pub struct FleetState<'a> {
    pub grid: &'a Grid,
    pub labels: LabelMatrix,
    pub agents: Vec<Agent>,
    pub config: EngineConfig,
}

impl<'a> FleetState<'a> {
    pub fn new(grid: &'a Grid, labels: LabelMatrix, agents: Vec<Agent>, config: EngineConfig) -> Self {
        FleetState { grid, labels, agents, config }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.agents.len()
    }

    /// Every agent's current seed cell, in agent-index order.
    pub fn seeds(&self) -> Vec<Cell> {
        self.agents.iter().map(|a| a.seed()).collect()
    }

    /// Re-run STC for one agent against its current region and overwrite
    /// its trajectory.
    pub fn replan(&mut self, agent: AgentIndex) -> McppResult<()> {
        let (h, w) = (self.grid.height(), self.grid.width());
        let mask: Vec<bool> =
            (0..h * w).map(|i| self.labels.get(i / w, i % w) == Some(agent)).collect();
        let seed = self.agents[agent.index()].seed();
        let trajectory = mcpp_stc::plan_with(&mask, h, w, seed, self.config.mst_algo)?;
        self.agents[agent.index()].set_trajectory(trajectory);
        Ok(())
    }

    /// Re-run STC for every agent. Every handler ends with this (or a
    /// `replan` for just the agents it touched) per §4.7.
    pub fn replan_all(&mut self) -> McppResult<()> {
        for i in 0..self.n() {
            self.replan(AgentIndex::try_from(i).expect("agent count fits u32"))?;
        }
        Ok(())
    }
}

/// After `removed`'s cells have all been reassigned to some other agent,
/// shift every label greater than `removed` down by one so the label space
/// is dense again over `0..n-1`.
pub(crate) fn compact_after_removal(labels: &mut LabelMatrix, removed: AgentIndex) {
    let (h, w) = (labels.height(), labels.width());
    for r in 0..h {
        for c in 0..w {
            if let Some(label) = labels.get(r, c) {
                if label.index() > removed.index() {
                    labels.set(r, c, Some(AgentIndex::try_from(label.index() - 1).expect("fits")));
                }
            }
        }
    }
}

/// Multi-source BFS confined to the union of `labels`' current partitions,
/// re-seeded from each of those agents' current seed cells (§4.7 Voronoi's
/// `voronoi_reassign`). Used by the Voronoi handler for both add and
/// remove.
pub(crate) fn local_bfs_reassign(state: &mut FleetState, labels: &std::collections::BTreeSet<AgentIndex>) {
    use std::collections::{BTreeSet, VecDeque};

    let n = state.n();
    let partitions = state.labels.partition(n);
    let mut cells: BTreeSet<Cell> = BTreeSet::new();
    for &l in labels {
        cells.extend(partitions[l.index()].iter().copied());
    }

    let mut queue: VecDeque<(Cell, AgentIndex)> = VecDeque::new();
    for &l in labels {
        queue.push_back((state.agents[l.index()].seed(), l));
    }

    let (h, w) = (state.grid.height(), state.grid.width());
    while let Some((cell, label)) = queue.pop_front() {
        if !cells.contains(&cell) {
            continue;
        }
        cells.remove(&cell);
        state.labels.set(cell.0, cell.1, Some(label));
        for (nr, nc) in neighbors4_bounded(cell.0, cell.1, h, w) {
            if cells.contains(&(nr, nc)) {
                queue.push_back(((nr, nc), label));
            }
        }
    }
}
