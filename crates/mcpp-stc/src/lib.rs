//! `mcpp-stc` — the single-agent spanning-tree coverage planner (§4.6).
//!
//! | Module  | Contents                                               |
//! |---------|----------------------------------------------------------|
//! | [`mega`] | mega-grid coarsening, preferred/secondary edge test      |
//! | [`mst`]  | Kruskal and DFS spanning trees over the mega-grid        |
//! | [`walk`] | coverage-walk emission with the symmetric-cell rules     |

pub mod mega;
pub mod mst;
pub mod walk;

#[cfg(test)]
mod tests;

use mcpp_core::config::MstAlgo;
use mcpp_core::label::Cell;
use mcpp_core::{McppError, McppResult};

use mega::{cell_to_mega, MegaGrid};

/// Run STC for one agent: `mask[r*width+c]` is `true` iff that cell
/// belongs to this agent (FREE in its masked view). Returns the cyclic
/// coverage trajectory starting and ending at `seed`.
pub fn plan(mask: &[bool], height: usize, width: usize, seed: Cell) -> McppResult<Vec<Cell>> {
    plan_with(mask, height, width, seed, MstAlgo::default())
}

/// Like [`plan`], with an explicit MST algorithm choice (§6 `mst_algo`).
pub fn plan_with(
    mask: &[bool],
    height: usize,
    width: usize,
    seed: Cell,
    mst_algo: MstAlgo,
) -> McppResult<Vec<Cell>> {
    if height % 2 != 0 || width % 2 != 0 {
        return Err(McppError::InvalidGrid(format!(
            "STC requires even dimensions, got {height}x{width}"
        )));
    }
    if !mask[seed.0 * width + seed.1] {
        return Err(McppError::SeedOutsideFree { r: seed.0, c: seed.1 });
    }

    let mega = MegaGrid::build(mask, height, width);
    let seed_mega = cell_to_mega(seed);
    let tree = match mst_algo {
        MstAlgo::Kruskal => mst::kruskal(mask, width, &mega)?,
        MstAlgo::Dfs => mst::dfs(mask, width, &mega, seed_mega)?,
    };

    Ok(walk::emit_walk(mask, height, width, &tree, seed))
}
