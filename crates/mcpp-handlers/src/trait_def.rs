//! The fleet-change handler contract (§4.7). The original system dispatches
//! on handler name through a registry (`UAVChangeHandlerFactory`); per the
//! design note that a tagged enum/trait is an acceptable substitute, we use
//! one `ChangeHandler` trait and `mcpp_core::ChangeHandlerKind` to select an
//! implementation.

use mcpp_core::{Agent, AgentIndex, McppResult};

use crate::state::FleetState;

/// Strategy for absorbing an added or removed agent into the fleet.
/// Implementations observe and mutate the same `FleetState` — the shared
/// label matrix and agent list — for the duration of one call (§5: no
/// handler call suspends partway through).
pub trait ChangeHandler {
    /// `agent` has already been assigned a seed cell (distinct from every
    /// existing agent's seed) but is not yet part of `state.agents` or
    /// reflected in `state.labels`.
    fn handle_new_uav(&mut self, state: &mut FleetState, agent: Agent) -> McppResult<()>;

    /// `index` names the departing agent's current position in
    /// `state.agents`; it is still present in both `state.agents` and
    /// `state.labels` when this is called.
    fn handle_removed_uav(&mut self, state: &mut FleetState, index: AgentIndex) -> McppResult<()>;
}
