//! `mcpp-partition` — initial partition construction: multi-source BFS /
//! Voronoi (§4.2) and DARP (§4.3).
//!
//! | Module                 | Contents                                     |
//! |-------------------------|----------------------------------------------|
//! | [`bfs`]                 | `bfs_partition` — multi-source flood fill     |
//! | [`darp`]                 | `darp_partition` — iterative reweighting      |
//! | [`distance_transform`]   | exact squared Euclidean distance transform    |

pub mod bfs;
pub mod darp;
pub mod distance_transform;

#[cfg(test)]
mod tests;

pub use bfs::bfs_partition;
pub use darp::darp_partition;
