//! `mcpp-core` — grid, label matrix, agent, and configuration primitives for
//! the mCPP coverage planning engine.
//!
//! This crate is a dependency of every other `mcpp-*` crate. It intentionally
//! has no `mcpp-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                |
//! |------------|-----------------------------------------------------------|
//! | [`grid`]   | `Grid`, `CellKind`, `neighbors4`/`neighbors8`              |
//! | [`label`]  | `LabelMatrix`: `partition`, `border`, `adj_list`, `is_not_bridge`, `dfs_subtrees`, `strongly_connected` |
//! | [`agent`]  | `Agent`: name, seed cell, cyclic trajectory                |
//! | [`ids`]    | `AgentIndex`                                               |
//! | [`rng`]    | `PlannerRng`, the reference seed `42069`                   |
//! | [`config`] | `EngineConfig` and the planner/handler/MST selection enums |
//! | [`error`]  | `McppError`, `McppResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public types. Required by `mcpp-planner`'s persisted-state snapshot. |

pub mod agent;
pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod label;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::Agent;
pub use config::{ChangeHandlerKind, EngineConfig, EngineConfigBuilder, InitialPartitioner, MstAlgo, SinglePlannerKind};
pub use error::{McppError, McppResult};
pub use grid::{CellKind, Grid};
pub use ids::AgentIndex;
pub use label::{Cell, LabelMatrix};
pub use rng::{PlannerRng, REFERENCE_SEED};
