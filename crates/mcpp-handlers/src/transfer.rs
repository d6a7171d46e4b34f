//! The balance-driver handler, grounded on
//! `original_source/src/planner/cpp/continuous/handler/transfer.py`.

use mcpp_core::config::DEFAULT_BALANCE_MAX_ITER;
use mcpp_core::{Agent, AgentIndex, McppError, McppResult};
use mcpp_transfer::balance;

use crate::state::{compact_after_removal, FleetState};
use crate::trait_def::ChangeHandler;

pub struct TransferHandler {
    pub max_iter: usize,
}

impl Default for TransferHandler {
    fn default() -> Self {
        TransferHandler { max_iter: DEFAULT_BALANCE_MAX_ITER }
    }
}

impl TransferHandler {
    fn reassign(&self, state: &mut FleetState) -> McppResult<()> {
        let n = state.n();
        let seeds = state.seeds();
        balance(&mut state.labels, n, &seeds, self.max_iter)?;
        state.replan_all()
    }
}

impl ChangeHandler for TransferHandler {
    fn handle_new_uav(&mut self, state: &mut FleetState, agent: Agent) -> McppResult<()> {
        let new_idx = AgentIndex::try_from(state.n()).expect("agent count fits u32");
        let seed = agent.seed();
        state.labels.set(seed.0, seed.1, Some(new_idx));
        state.agents.push(agent);
        self.reassign(state)
    }

    fn handle_removed_uav(&mut self, state: &mut FleetState, index: AgentIndex) -> McppResult<()> {
        let cells = state.labels.cells_of(index);
        let border = state.labels.border(&cells);
        let sizes = state.labels.partition_sizes(state.n());
        let transfer_to = *border
            .keys()
            .min_by_key(|&&k| sizes[k.index()])
            .ok_or_else(|| McppError::Disconnected("departing agent has no bordering neighbor".into()))?;

        for &(r, c) in &cells {
            state.labels.set(r, c, Some(transfer_to));
        }
        compact_after_removal(&mut state.labels, index);
        state.agents.remove(index.index());

        self.reassign(state)
    }
}
