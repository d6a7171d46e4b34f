//! Locally-scoped re-Voronoi handler, grounded on
//! `original_source/src/planner/cpp/continuous/handler/voronoi.py`.
//!
//! Both directions paint the changed agent's seed (or its departing
//! neighbor absorption) directly, then re-run a multi-source BFS confined
//! to just the affected agents' current regions rather than the whole
//! grid — cheaper than Redistribute, sloppier than Transfer/Propagation
//! about exact balance.

use std::collections::{BTreeSet, VecDeque};

use mcpp_core::grid::neighbors4_bounded;
use mcpp_core::label::Cell;
use mcpp_core::{Agent, AgentIndex, McppError, McppResult};

use crate::state::{compact_after_removal, local_bfs_reassign, FleetState};
use crate::trait_def::ChangeHandler;

#[derive(Default)]
pub struct VoronoiHandler;

impl VoronoiHandler {
    /// BFS outward from `start` for up to `free_count / n` cells,
    /// collecting every label encountered among visited cells' neighbors
    /// (the new/changed agent's own label is picked up via the reciprocal
    /// neighbor relation once the BFS wraps back around it).
    fn expand(state: &FleetState, start: Cell) -> BTreeSet<AgentIndex> {
        let (h, w) = (state.grid.height(), state.grid.width());
        let mut budget = (state.grid.free_count() / state.n()) as i64;
        let mut visited: BTreeSet<Cell> = BTreeSet::new();
        let mut seen_labels: BTreeSet<AgentIndex> = BTreeSet::new();
        let mut queue = VecDeque::from([start]);

        while budget > 0 {
            let Some(cell) = queue.pop_front() else { break };
            if visited.contains(&cell) {
                continue;
            }
            visited.insert(cell);
            budget -= 1;
            for (nr, nc) in neighbors4_bounded(cell.0, cell.1, h, w) {
                if let Some(label) = state.labels.get(nr, nc) {
                    seen_labels.insert(label);
                    queue.push_back((nr, nc));
                }
            }
        }
        seen_labels
    }
}

impl ChangeHandler for VoronoiHandler {
    fn handle_new_uav(&mut self, state: &mut FleetState, agent: Agent) -> McppResult<()> {
        let new_idx = AgentIndex::try_from(state.n()).expect("agent count fits u32");
        let seed = agent.seed();
        state.labels.set(seed.0, seed.1, Some(new_idx));
        state.agents.push(agent);

        let affected = VoronoiHandler::expand(state, seed);
        local_bfs_reassign(state, &affected);
        state.replan_all()
    }

    fn handle_removed_uav(&mut self, state: &mut FleetState, index: AgentIndex) -> McppResult<()> {
        let cells = state.labels.cells_of(index);
        let border = state.labels.border(&cells);
        let transfer_to = *border
            .keys()
            .next()
            .ok_or_else(|| McppError::Disconnected("departing agent has no bordering neighbor".into()))?;
        let bordering: Vec<AgentIndex> = border.keys().copied().collect();

        for &(r, c) in &cells {
            state.labels.set(r, c, Some(transfer_to));
        }
        compact_after_removal(&mut state.labels, index);
        state.agents.remove(index.index());

        let remapped: BTreeSet<AgentIndex> = bordering
            .into_iter()
            .map(|l| {
                if l.index() <= index.index() {
                    l
                } else {
                    AgentIndex::try_from(l.index() - 1).expect("fits")
                }
            })
            .collect();

        local_bfs_reassign(state, &remapped);
        state.replan_all()
    }
}
