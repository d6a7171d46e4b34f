//! The handler that refuses every change, grounded on
//! `original_source/src/planner/cpp/continuous/handler/no_op.py`.

use mcpp_core::{Agent, AgentIndex, McppError, McppResult};

use crate::state::FleetState;
use crate::trait_def::ChangeHandler;

#[derive(Default)]
pub struct NoOpHandler;

impl ChangeHandler for NoOpHandler {
    fn handle_new_uav(&mut self, _state: &mut FleetState, _agent: Agent) -> McppResult<()> {
        Err(McppError::UnsupportedChange("NoOp handler does not support adding agents".into()))
    }

    fn handle_removed_uav(&mut self, _state: &mut FleetState, _index: AgentIndex) -> McppResult<()> {
        Err(McppError::UnsupportedChange("NoOp handler does not support removing agents".into()))
    }
}
