//! The continuous coverage-planning facade (§4.8), grounded on
//! `original_source/src/planner/cpp/continuous/planner.py`'s
//! `ContinuousCoveragePathPlanner`.
//!
//! The source's `allocate_initial_uav_position` has a bug: its collision
//! check (`for uav in self.uavs: if free_cell == (uav.r, uav.c): continue`)
//! `continue`s the inner `for` loop, not the outer `while True` — so a
//! colliding cell is still assigned, the loop always exits after one
//! `random.choice`, and the "no two agents share a seed" intent is never
//! actually enforced. [`allocate_seed`] fixes this by sampling only from
//! the free cells not already taken, rather than retrying a draw that
//! never avoided the collision in the first place.

use std::collections::BTreeSet;

use mcpp_core::label::Cell;
use mcpp_core::{Agent, AgentIndex, EngineConfig, Grid, InitialPartitioner, LabelMatrix, McppError, PlannerRng};
use mcpp_handlers::{
    ChangeHandler, FleetState, NoOpHandler, PropagationHandler, RedistributeHandler, TransferHandler,
    VoronoiHandler, WeightedTransferHandler,
};
use mcpp_partition::{bfs_partition, darp_partition};
use mcpp_transfer::balance;

use crate::error::{PlannerError, PlannerResult};

/// Draw a free cell not already occupied by another agent's seed. See the
/// module doc for why this differs from the source's (broken) retry loop.
fn allocate_seed(rng: &mut PlannerRng, grid: &Grid, used: &BTreeSet<Cell>) -> PlannerResult<Cell> {
    let available: Vec<Cell> = grid.free_cells().filter(|c| !used.contains(c)).collect();
    let chosen = rng
        .choose(&available)
        .ok_or_else(|| McppError::InvalidConfiguration("no free cell left to seed a new agent".into()))?;
    Ok(*chosen)
}

fn build_handler(kind: mcpp_core::ChangeHandlerKind) -> Box<dyn ChangeHandler> {
    use mcpp_core::ChangeHandlerKind as K;
    match kind {
        K::NoOp => Box::new(NoOpHandler),
        K::Redistribute => Box::new(RedistributeHandler::default()),
        K::Transfer => Box::new(TransferHandler::default()),
        K::Voronoi => Box::new(VoronoiHandler),
        K::Propagation => Box::new(PropagationHandler),
        K::WTransfer => Box::new(WeightedTransferHandler),
    }
}

/// One running fleet: a grid, its current partition, and the agents
/// assigned to it, wired to a specific initial partitioner and
/// change-handler strategy.
pub struct ContinuousPlanner {
    grid: Grid,
    labels: LabelMatrix,
    agents: Vec<Agent>,
    config: EngineConfig,
    rng: PlannerRng,
    handler: Box<dyn ChangeHandler>,
}

impl ContinuousPlanner {
    pub fn n(&self) -> usize {
        self.agents.len()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn labels(&self) -> &LabelMatrix {
        &self.labels
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Run the configured initial partitioner over the current agent
    /// seeds, then STC for every agent. Call once after construction
    /// (seeds are already resolved by [`ContinuousPlannerBuilder::build`])
    /// and again after a batch of `handle_*` calls if a full re-plan is
    /// wanted instead of the handlers' own incremental STC re-runs.
    pub fn plan(&mut self) -> PlannerResult<()> {
        let seeds: Vec<Cell> = self.agents.iter().map(|a| a.seed()).collect();
        self.labels = match self.config.multi_planner {
            InitialPartitioner::Bfs => bfs_partition(&self.grid, &seeds)?,
            InitialPartitioner::Darp => darp_partition(&self.grid, &seeds, None, &mut self.rng)?,
            InitialPartitioner::Transfer => {
                let mut labels = bfs_partition(&self.grid, &seeds)?;
                balance(&mut labels, seeds.len(), &seeds, self.config.max_iter)?;
                labels
            }
        };

        // `FleetState` borrows `grid` but owns `labels`/`agents`; swap the
        // latter two out of `self` for the call, then swap the (possibly
        // mutated) results back in. Borrowing `&self.grid` directly here
        // (rather than through a helper method) keeps it a disjoint field
        // borrow from `self.handler`, which the other two methods need
        // alongside their own `state`.
        let mut state =
            FleetState::new(&self.grid, std::mem::replace(&mut self.labels, LabelMatrix::empty(1, 1)), std::mem::take(&mut self.agents), self.config.clone());
        let result = state.replan_all();
        self.labels = state.labels;
        self.agents = state.agents;
        result.map_err(PlannerError::from)
    }

    /// Create a fresh agent named `name`, seed it to a free cell not
    /// already occupied by an existing agent, and hand it to the
    /// configured change handler.
    pub fn handle_new_uav(&mut self, name: impl Into<String>) -> PlannerResult<()> {
        let used: BTreeSet<Cell> = self.agents.iter().map(|a| a.seed()).collect();
        let seed = allocate_seed(&mut self.rng, &self.grid, &used)?;
        let agent = Agent::new(name, seed);

        let mut state =
            FleetState::new(&self.grid, std::mem::replace(&mut self.labels, LabelMatrix::empty(1, 1)), std::mem::take(&mut self.agents), self.config.clone());
        let result = self.handler.handle_new_uav(&mut state, agent);
        self.labels = state.labels;
        self.agents = state.agents;
        result.map_err(PlannerError::from)
    }

    /// Resolve `name` to its current agent and hand its removal to the
    /// configured change handler.
    pub fn handle_removed_uav(&mut self, name: &str) -> PlannerResult<()> {
        let index = self
            .agents
            .iter()
            .position(|a| a.name() == name)
            .map(|i| AgentIndex::try_from(i).expect("agent count fits u32"))
            .ok_or_else(|| McppError::NotFound(name.to_string()))?;

        let mut state =
            FleetState::new(&self.grid, std::mem::replace(&mut self.labels, LabelMatrix::empty(1, 1)), std::mem::take(&mut self.agents), self.config.clone());
        let result = self.handler.handle_removed_uav(&mut state, index);
        self.labels = state.labels;
        self.agents = state.agents;
        result.map_err(PlannerError::from)
    }
}

/// Fluent builder for [`ContinuousPlanner`], following this codebase's
/// convention (`dt_sim::SimBuilder`) for types with several optional
/// construction inputs.
pub struct ContinuousPlannerBuilder {
    grid: Grid,
    agent_specs: Vec<(String, Option<Cell>)>,
    config: EngineConfig,
    seed: u64,
}

impl ContinuousPlannerBuilder {
    pub fn new(grid: Grid) -> Self {
        ContinuousPlannerBuilder {
            grid,
            agent_specs: Vec::new(),
            config: EngineConfig::default(),
            seed: mcpp_core::REFERENCE_SEED,
        }
    }

    /// Add one agent by name, with an optional pre-assigned seed cell.
    pub fn agent(mut self, name: impl Into<String>, seed: Option<Cell>) -> Self {
        self.agent_specs.push((name.into(), seed));
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the reference PRNG seed (default `42069`).
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Resolve every agent's seed (drawing from the shared RNG for those
    /// left unspecified) and return a planner ready for [`ContinuousPlanner::plan`].
    pub fn build(self) -> PlannerResult<ContinuousPlanner> {
        let mut rng = PlannerRng::new(self.seed);
        let mut used: BTreeSet<Cell> = self.agent_specs.iter().filter_map(|(_, s)| *s).collect();

        let mut agents = Vec::with_capacity(self.agent_specs.len());
        for (name, seed) in self.agent_specs {
            let seed = match seed {
                Some(s) => s,
                None => {
                    let s = allocate_seed(&mut rng, &self.grid, &used)?;
                    used.insert(s);
                    s
                }
            };
            agents.push(Agent::new(name, seed));
        }

        let handler = build_handler(self.config.handler);
        Ok(ContinuousPlanner {
            labels: LabelMatrix::empty(self.grid.height(), self.grid.width()),
            grid: self.grid,
            agents,
            config: self.config,
            rng,
            handler,
        })
    }
}
