//! Clear-and-replan-from-scratch handler, grounded on
//! `original_source/src/planner/cpp/continuous/handler/redistribute.py`.
//! Simplest and highest cost of the six (§4.7).

use mcpp_core::{Agent, AgentIndex, InitialPartitioner, LabelMatrix, McppResult, PlannerRng};
use mcpp_partition::{bfs_partition, darp_partition};
use mcpp_transfer::balance;

use crate::state::FleetState;
use crate::trait_def::ChangeHandler;

/// Owns the RNG the DARP partitioner (when selected) draws its jitter from;
/// every other partitioner choice ignores it.
pub struct RedistributeHandler {
    rng: PlannerRng,
}

impl RedistributeHandler {
    pub fn new(rng: PlannerRng) -> Self {
        RedistributeHandler { rng }
    }

    fn reassign(&mut self, state: &mut FleetState) -> McppResult<()> {
        let seeds = state.seeds();
        state.labels = match state.config.multi_planner {
            InitialPartitioner::Bfs => bfs_partition(state.grid, &seeds)?,
            InitialPartitioner::Darp => {
                darp_partition(state.grid, &seeds, None, &mut self.rng)?
            }
            InitialPartitioner::Transfer => {
                let mut labels = bfs_partition(state.grid, &seeds)?;
                balance(&mut labels, seeds.len(), &seeds, state.config.max_iter)?;
                labels
            }
        };
        state.replan_all()
    }
}

impl Default for RedistributeHandler {
    fn default() -> Self {
        RedistributeHandler::new(PlannerRng::default())
    }
}

impl ChangeHandler for RedistributeHandler {
    fn handle_new_uav(&mut self, state: &mut FleetState, agent: Agent) -> McppResult<()> {
        state.agents.push(agent);
        state.labels = LabelMatrix::empty(state.grid.height(), state.grid.width());
        self.reassign(state)
    }

    fn handle_removed_uav(&mut self, state: &mut FleetState, index: AgentIndex) -> McppResult<()> {
        state.agents.remove(index.index());
        state.labels = LabelMatrix::empty(state.grid.height(), state.grid.width());
        self.reassign(state)
    }
}
