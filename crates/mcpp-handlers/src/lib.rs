//! `mcpp-handlers` — the six fleet-change strategies (§4.7): how a running
//! fleet absorbs an added or removed agent without replanning the world
//! from nothing every time (except `Redistribute`, which does exactly
//! that, deliberately).
//!
//! | Module               | Handler      | Cost profile                          |
//! |-----------------------|--------------|----------------------------------------|
//! | [`noop`]               | `NoOp`       | rejects every change                   |
//! | [`redistribute`]       | `Redistribute` | full replan, simplest, priciest      |
//! | [`transfer`]           | `Transfer`   | balance-driver pass                    |
//! | [`voronoi`]            | `Voronoi`    | locally re-Voronoi'd neighborhood      |
//! | [`propagation`]        | `Propagation` | weighted-tree, excess-only correction |
//! | [`weighted_transfer`]  | `W_Transfer` | weighted-tree, bidirectional correction |

pub mod noop;
pub mod propagation;
pub mod redistribute;
pub mod state;
pub mod trait_def;
pub mod transfer;
pub mod voronoi;
pub mod weighted_transfer;

#[cfg(test)]
mod tests;

pub use noop::NoOpHandler;
pub use propagation::PropagationHandler;
pub use redistribute::RedistributeHandler;
pub use state::FleetState;
pub use trait_def::ChangeHandler;
pub use transfer::TransferHandler;
pub use voronoi::VoronoiHandler;
pub use weighted_transfer::WeightedTransferHandler;
