//! Multi-source BFS / Voronoi partitioner (§4.2).
//!
//! Grounded on `original_source/src/planner/cpp/multi/voronoi.py` and the
//! `_initial_assign` BFS in `multi/transfer.py` — both flood-fill every
//! seed outward simultaneously from a single FIFO queue, labelling each
//! cell with whichever seed's wavefront reaches it first.

use std::collections::VecDeque;

use mcpp_core::{AgentIndex, Grid, LabelMatrix, McppError, McppResult};

/// Assign every FREE cell to the nearest (in BFS-hop terms) seed, breaking
/// ties by earliest dequeue order — i.e. whichever seed's wavefront reaches
/// a cell first keeps it, and since all seeds enter the queue in agent
/// index order, lower indices win simultaneous arrivals.
///
/// `seeds[i]` is agent `i`'s seed cell. Returns [`McppError::SeedOutsideFree`]
/// / [`McppError::SeedCollision`] for malformed input, and
/// [`McppError::Disconnected`] if any FREE cell is left unreachable from
/// every seed.
pub fn bfs_partition(grid: &Grid, seeds: &[(usize, usize)]) -> McppResult<LabelMatrix> {
    validate_seeds(grid, seeds)?;

    let mut labels = LabelMatrix::empty(grid.height(), grid.width());
    let mut queue: VecDeque<((usize, usize), AgentIndex)> = VecDeque::new();
    for (i, &seed) in seeds.iter().enumerate() {
        queue.push_back((seed, AgentIndex::try_from(i).expect("agent count fits u32")));
    }

    while let Some(((r, c), label)) = queue.pop_front() {
        if labels.get(r, c).is_some() {
            continue;
        }
        labels.set(r, c, Some(label));
        for (nr, nc) in grid.neighbors4(r, c) {
            if grid.is_free(nr, nc) && labels.get(nr, nc).is_none() {
                queue.push_back(((nr, nc), label));
            }
        }
    }

    if grid.free_cells().any(|(r, c)| labels.get(r, c).is_none()) {
        return Err(McppError::Disconnected(
            "one or more free cells are unreachable from every seed".into(),
        ));
    }

    Ok(labels)
}

/// Shared seed validation used by every partitioner entry point.
pub(crate) fn validate_seeds(grid: &Grid, seeds: &[(usize, usize)]) -> McppResult<()> {
    let mut seen: std::collections::BTreeMap<(usize, usize), usize> = Default::default();
    for (i, &(r, c)) in seeds.iter().enumerate() {
        if !grid.in_bounds(r as isize, c as isize) || !grid.is_free(r, c) {
            return Err(McppError::SeedOutsideFree { r, c });
        }
        if let Some(&first) = seen.get(&(r, c)) {
            return Err(McppError::SeedCollision { first, second: i, r, c });
        }
        seen.insert((r, c), i);
    }
    Ok(())
}
