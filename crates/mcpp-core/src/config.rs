//! The recognized configuration surface (§6): initial partitioner, change
//! handler, single-agent planner, MST algorithm, and iteration bounds.
//!
//! The source system expressed these as a factory/registry keyed by string
//! tag; we use closed tagged enums instead (per the design note that this
//! substitution is acceptable), with `TryFrom<&str>` impls for callers that
//! still want to select them by name (e.g. from a CLI flag or a config
//! file).

use crate::error::{McppError, McppResult};

/// Initial partitioner selection (§4.2, §4.3).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InitialPartitioner {
    /// Multi-source BFS flood fill. The source calls this "BFS" or
    /// "Voronoi" interchangeably since it produces a Voronoi-like partition.
    Bfs,
    Darp,
    /// BFS partition followed immediately by the balance driver.
    Transfer,
}

impl TryFrom<&str> for InitialPartitioner {
    type Error = McppError;
    fn try_from(s: &str) -> McppResult<Self> {
        match s {
            "BFS" | "Voronoi" => Ok(InitialPartitioner::Bfs),
            "DARP" => Ok(InitialPartitioner::Darp),
            "Transfer" => Ok(InitialPartitioner::Transfer),
            other => Err(McppError::InvalidConfiguration(format!(
                "unknown multi_planner {other:?}"
            ))),
        }
    }
}

/// Change-handler selection (§4.7).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ChangeHandlerKind {
    NoOp,
    Redistribute,
    Transfer,
    Voronoi,
    Propagation,
    WTransfer,
}

impl TryFrom<&str> for ChangeHandlerKind {
    type Error = McppError;
    fn try_from(s: &str) -> McppResult<Self> {
        match s {
            "NoOp" => Ok(ChangeHandlerKind::NoOp),
            "Redistribute" => Ok(ChangeHandlerKind::Redistribute),
            "Transfer" => Ok(ChangeHandlerKind::Transfer),
            "Voronoi" => Ok(ChangeHandlerKind::Voronoi),
            "Propagation" => Ok(ChangeHandlerKind::Propagation),
            "W_Transfer" => Ok(ChangeHandlerKind::WTransfer),
            other => Err(McppError::InvalidConfiguration(format!("unknown handler {other:?}"))),
        }
    }
}

/// Single-agent (per-region) planner selection. Only STC is specified.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum SinglePlannerKind {
    #[default]
    Stc,
}

impl TryFrom<&str> for SinglePlannerKind {
    type Error = McppError;
    fn try_from(s: &str) -> McppResult<Self> {
        match s {
            "STC" => Ok(SinglePlannerKind::Stc),
            other => Err(McppError::InvalidConfiguration(format!(
                "unknown single_planner {other:?}"
            ))),
        }
    }
}

/// STC spanning-tree construction algorithm (§4.6 Step B).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum MstAlgo {
    #[default]
    Kruskal,
    Dfs,
}

impl TryFrom<&str> for MstAlgo {
    type Error = McppError;
    fn try_from(s: &str) -> McppResult<Self> {
        match s {
            "kruskal" => Ok(MstAlgo::Kruskal),
            "dfs" => Ok(MstAlgo::Dfs),
            other => Err(McppError::InvalidConfiguration(format!("unknown mst_algo {other:?}"))),
        }
    }
}

/// Default upper bound for the balance driver (§4.5: "50-100").
pub const DEFAULT_BALANCE_MAX_ITER: usize = 100;

/// Default DARP iteration bound for `n` agents: `100 * 2^n` (§4.3).
pub fn default_darp_max_iter(n: usize) -> usize {
    100usize.saturating_mul(1usize.checked_shl(n as u32).unwrap_or(usize::MAX))
}

/// The full recognized option set (§6).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub multi_planner: InitialPartitioner,
    pub handler: ChangeHandlerKind,
    pub single_planner: SinglePlannerKind,
    pub mst_algo: MstAlgo,
    pub max_iter: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            multi_planner: InitialPartitioner::Bfs,
            handler: ChangeHandlerKind::Transfer,
            single_planner: SinglePlannerKind::Stc,
            mst_algo: MstAlgo::Kruskal,
            max_iter: DEFAULT_BALANCE_MAX_ITER,
        }
    }
}

/// Fluent builder for [`EngineConfig`], following this codebase's
/// convention of builders for types with several optional construction
/// inputs.
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multi_planner(mut self, v: InitialPartitioner) -> Self {
        self.config.multi_planner = v;
        self
    }

    pub fn handler(mut self, v: ChangeHandlerKind) -> Self {
        self.config.handler = v;
        self
    }

    pub fn single_planner(mut self, v: SinglePlannerKind) -> Self {
        self.config.single_planner = v;
        self
    }

    pub fn mst_algo(mut self, v: MstAlgo) -> Self {
        self.config.mst_algo = v;
        self
    }

    pub fn max_iter(mut self, v: usize) -> Self {
        self.config.max_iter = v;
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}
