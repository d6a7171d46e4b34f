//! `mcpp-transfer` — cell transfer primitives and the balance drivers built
//! on top of them (§4.4, §4.5).
//!
//! | Module     | Contents                                                |
//! |------------|----------------------------------------------------------|
//! | [`engine`] | `transfer_area`, `transfer_area_subtree`, `transfer_concurrently`, `dfs_weighted_tree` |
//! | [`driver`] | `balance`, `cycling_balance`                              |

pub mod driver;
pub mod engine;

#[cfg(test)]
mod tests;

pub use driver::{balance, cycling_balance};
pub use engine::{adjacent_cells, dfs_weighted_tree, transfer_area, transfer_area_subtree, transfer_concurrently};
