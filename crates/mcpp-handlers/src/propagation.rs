//! Weighted-subtree handler, grounded on
//! `original_source/src/planner/cpp/continuous/handler/propagation.py`.
//!
//! Builds a weighted DFS tree over the agent-adjacency graph rooted at the
//! changed agent; each tree node's weight is `(subtree_node_count,
//! subtree_cell_count)`. Only the *excess* direction is corrected here —
//! children over their ideal share push the surplus up to their parent —
//! unlike [`crate::weighted_transfer`], which also pulls cells back down to
//! under-filled children.

use std::collections::{BTreeMap, VecDeque};

use mcpp_core::{Agent, AgentIndex, McppResult};
use mcpp_transfer::{adjacent_cells, dfs_weighted_tree, transfer_area_subtree, transfer_concurrently};

use crate::state::{compact_after_removal, FleetState};
use crate::trait_def::ChangeHandler;

#[derive(Default)]
pub struct PropagationHandler;

fn diff(node: AgentIndex, weights: &BTreeMap<AgentIndex, (usize, usize)>, target: f64) -> i64 {
    let (count, weight) = weights[&node];
    (target * count as f64).round() as i64 - weight as i64
}

/// Post-order: visit every child before deciding whether it owes its
/// parent cells, so a grandchild's surplus has already moved up through
/// its immediate parent by the time that parent is evaluated against
/// `node`.
fn transfer_bottom_up(
    node: AgentIndex,
    state: &mut FleetState,
    tree: &BTreeMap<AgentIndex, Vec<AgentIndex>>,
    weights: &BTreeMap<AgentIndex, (usize, usize)>,
    target: f64,
) {
    let mut children = tree.get(&node).cloned().unwrap_or_default();
    children.sort_by_key(|&c| diff(c, weights, target));
    for neigh in children {
        transfer_bottom_up(neigh, state, tree, weights, target);
        let transfer_amount = diff(neigh, weights, target);
        if transfer_amount < 0 {
            let border = adjacent_cells(&state.labels, neigh, node);
            let seed = state.agents[neigh.index()].seed();
            transfer_area_subtree(&mut state.labels, neigh, node, &border, (-transfer_amount) as usize, seed);
        }
    }
}

fn amount_to_transfer(
    parent: AgentIndex,
    tree: &BTreeMap<AgentIndex, Vec<AgentIndex>>,
    weights: &BTreeMap<AgentIndex, (usize, usize)>,
    area_reassign: usize,
) -> BTreeMap<AgentIndex, usize> {
    let children = tree.get(&parent).cloned().unwrap_or_default();
    let total_node_count: usize = children.iter().map(|c| weights[c].0).sum();
    if total_node_count == 0 {
        return BTreeMap::new();
    }
    children
        .into_iter()
        .map(|c| {
            let share = weights[&c].0 as f64 * area_reassign as f64 / total_node_count as f64;
            (c, share.round() as usize)
        })
        .collect()
}

/// BFS descent from the just-removed agent, distributing its cells to its
/// tree children (and cascading further down) proportional to subtree
/// size, then compacting the label space (the removed agent's index is
/// retired by this point, not beforehand).
fn transfer_top_down(state: &mut FleetState, changed: AgentIndex) {
    let n = state.n();
    let adj = state.labels.adj_list(n);
    let counts = state.labels.partition_sizes(n);
    let (tree, weights) = dfs_weighted_tree(&adj, &counts, changed);
    let area_reassign = counts[changed.index()] / (n - 1);

    let mut queue = VecDeque::from([changed]);
    while let Some(u) = queue.pop_front() {
        let to_amounts = amount_to_transfer(u, &tree, &weights, area_reassign);
        if !to_amounts.is_empty() {
            let from_seed = if u == changed { None } else { Some(state.agents[u.index()].seed()) };
            transfer_concurrently(&mut state.labels, u, &to_amounts, from_seed);
        }
        for &child in to_amounts.keys() {
            queue.push_back(child);
        }
    }

    compact_after_removal(&mut state.labels, changed);
}

impl ChangeHandler for PropagationHandler {
    fn handle_new_uav(&mut self, state: &mut FleetState, agent: Agent) -> McppResult<()> {
        let new_idx = AgentIndex::try_from(state.n()).expect("agent count fits u32");
        let seed = agent.seed();
        state.labels.set(seed.0, seed.1, Some(new_idx));
        state.agents.push(agent);

        let n = state.n();
        let target_cell_count = state.grid.free_count() as f64 / n as f64;
        let adj = state.labels.adj_list(n);
        let counts = state.labels.partition_sizes(n);
        let (tree, weights) = dfs_weighted_tree(&adj, &counts, new_idx);
        transfer_bottom_up(new_idx, state, &tree, &weights, target_cell_count);

        state.replan_all()
    }

    fn handle_removed_uav(&mut self, state: &mut FleetState, index: AgentIndex) -> McppResult<()> {
        transfer_top_down(state, index);
        state.agents.remove(index.index());
        state.replan_all()
    }
}
