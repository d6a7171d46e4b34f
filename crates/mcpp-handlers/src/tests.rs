use mcpp_core::{Agent, AgentIndex, CellKind, EngineConfig, Grid};
use mcpp_partition::bfs_partition;

use crate::state::FleetState;
use crate::trait_def::ChangeHandler;

/// A 4x6 all-FREE grid — 24 cells, evenly divisible by 2, 3, or 4 agents.
fn open_grid() -> Grid {
    Grid::new(4, 6, vec![CellKind::Free; 24]).unwrap()
}

fn two_agent_state(grid: &Grid) -> FleetState<'_> {
    let seeds = [(0, 0), (3, 5)];
    let labels = bfs_partition(grid, &seeds).unwrap();
    let agents = seeds.iter().enumerate().map(|(i, &s)| Agent::new(format!("UAV-{i}"), s)).collect();
    FleetState::new(grid, labels, agents, EngineConfig::default())
}

/// Every FREE cell is assigned to exactly one of `0..state.n()`, and every
/// agent has a non-empty trajectory that starts and ends at its seed.
fn assert_well_formed(state: &FleetState) {
    assert!(state.labels.matches_grid(state.grid));
    let sizes = state.labels.partition_sizes(state.n());
    assert_eq!(sizes.iter().sum::<usize>(), state.grid.free_count());
    for agent in &state.agents {
        assert!(!agent.trajectory().is_empty());
        assert_eq!(agent.trajectory()[0], agent.seed());
    }
}

#[cfg(test)]
mod noop {
    use super::*;
    use crate::noop::NoOpHandler;

    #[test]
    fn rejects_both_kinds_of_change() {
        let grid = open_grid();
        let mut state = two_agent_state(&grid);
        let mut handler = NoOpHandler;
        assert!(handler.handle_new_uav(&mut state, Agent::new("UAV-2", (0, 5))).is_err());
        assert!(handler
            .handle_removed_uav(&mut state, AgentIndex::try_from(0usize).unwrap())
            .is_err());
    }
}

#[cfg(test)]
mod transfer {
    use super::*;
    use crate::transfer::TransferHandler;

    #[test]
    fn add_then_remove_round_trips_to_a_well_formed_partition() {
        let grid = open_grid();
        let mut state = two_agent_state(&grid);
        let mut handler = TransferHandler::default();

        handler.handle_new_uav(&mut state, Agent::new("UAV-2", (0, 5))).unwrap();
        assert_eq!(state.n(), 3);
        assert_well_formed(&state);

        handler.handle_removed_uav(&mut state, AgentIndex::try_from(1usize).unwrap()).unwrap();
        assert_eq!(state.n(), 2);
        assert_well_formed(&state);
    }
}

#[cfg(test)]
mod redistribute {
    use super::*;
    use crate::redistribute::RedistributeHandler;

    #[test]
    fn clears_and_replans_from_scratch_on_add() {
        let grid = open_grid();
        let mut state = two_agent_state(&grid);
        let mut handler = RedistributeHandler::default();

        handler.handle_new_uav(&mut state, Agent::new("UAV-2", (2, 2))).unwrap();
        assert_eq!(state.n(), 3);
        assert_well_formed(&state);
    }

    #[test]
    fn removal_shrinks_the_fleet_and_stays_well_formed() {
        let grid = open_grid();
        let mut state = two_agent_state(&grid);
        let mut handler = RedistributeHandler::default();
        handler.handle_removed_uav(&mut state, AgentIndex::try_from(0usize).unwrap()).unwrap();
        assert_eq!(state.n(), 1);
        assert_well_formed(&state);
    }
}

#[cfg(test)]
mod voronoi {
    use super::*;
    use crate::voronoi::VoronoiHandler;

    #[test]
    fn add_then_remove_round_trips_to_a_well_formed_partition() {
        let grid = open_grid();
        let mut state = two_agent_state(&grid);
        let mut handler = VoronoiHandler;

        handler.handle_new_uav(&mut state, Agent::new("UAV-2", (0, 5))).unwrap();
        assert_eq!(state.n(), 3);
        assert_well_formed(&state);

        handler.handle_removed_uav(&mut state, AgentIndex::try_from(1usize).unwrap()).unwrap();
        assert_eq!(state.n(), 2);
        assert_well_formed(&state);
    }
}

#[cfg(test)]
mod propagation {
    use super::*;
    use crate::propagation::PropagationHandler;

    #[test]
    fn add_then_remove_round_trips_to_a_well_formed_partition() {
        let grid = open_grid();
        let mut state = two_agent_state(&grid);
        let mut handler = PropagationHandler;

        handler.handle_new_uav(&mut state, Agent::new("UAV-2", (0, 5))).unwrap();
        assert_eq!(state.n(), 3);
        assert_well_formed(&state);

        handler.handle_removed_uav(&mut state, AgentIndex::try_from(1usize).unwrap()).unwrap();
        assert_eq!(state.n(), 2);
        assert_well_formed(&state);
    }
}

#[cfg(test)]
mod weighted_transfer {
    use super::*;
    use crate::weighted_transfer::WeightedTransferHandler;

    #[test]
    fn add_then_remove_round_trips_to_a_well_formed_partition() {
        let grid = open_grid();
        let mut state = two_agent_state(&grid);
        let mut handler = WeightedTransferHandler;

        handler.handle_new_uav(&mut state, Agent::new("UAV-2", (0, 5))).unwrap();
        assert_eq!(state.n(), 3);
        assert_well_formed(&state);

        handler.handle_removed_uav(&mut state, AgentIndex::try_from(1usize).unwrap()).unwrap();
        assert_eq!(state.n(), 2);
        assert_well_formed(&state);
    }
}
