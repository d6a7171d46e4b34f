//! "W_Transfer" handler, grounded on
//! `original_source/src/planner/cpp/continuous/handler/weight_redistribute.py`.
//!
//! Like [`crate::propagation`], but every tree edge is corrected in
//! whichever direction `diff` calls for — a child under its ideal share
//! pulls cells down from its parent too, not just the reverse — and the
//! traversal order matches the teacher's add/remove asymmetry: bottom-up
//! (post-order, rooted at the new agent) on add, top-down (BFS, rooted at
//! the chosen absorbing neighbor) on remove.

use std::collections::{BTreeMap, VecDeque};

use mcpp_core::{Agent, AgentIndex, McppError, McppResult};
use mcpp_transfer::{adjacent_cells, dfs_weighted_tree, transfer_area_subtree};

use crate::state::{compact_after_removal, FleetState};
use crate::trait_def::ChangeHandler;

#[derive(Default)]
pub struct WeightedTransferHandler;

fn diff(node: AgentIndex, weights: &BTreeMap<AgentIndex, (usize, usize)>, target: f64) -> i64 {
    let (count, weight) = weights[&node];
    (target * count as f64).round() as i64 - weight as i64
}

fn settle_edge(state: &mut FleetState, parent: AgentIndex, child: AgentIndex, amount: i64) {
    if amount < 0 {
        let border = adjacent_cells(&state.labels, child, parent);
        let seed = state.agents[child.index()].seed();
        transfer_area_subtree(&mut state.labels, child, parent, &border, (-amount) as usize, seed);
    } else if amount > 0 {
        let border = adjacent_cells(&state.labels, parent, child);
        let seed = state.agents[parent.index()].seed();
        transfer_area_subtree(&mut state.labels, parent, child, &border, amount as usize, seed);
    }
}

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
        settle_edge(state, node, neigh, diff(neigh, weights, target));
    }
}

fn transfer_top_down(state: &mut FleetState, root: AgentIndex) {
    let n = state.n();
    let target = state.grid.free_count() as f64 / n as f64;
    let adj = state.labels.adj_list(n);
    let counts = state.labels.partition_sizes(n);
    let (tree, weights) = dfs_weighted_tree(&adj, &counts, root);

    let mut queue = VecDeque::from([root]);
    while let Some(u) = queue.pop_front() {
        let mut children = tree.get(&u).cloned().unwrap_or_default();
        children.sort_by_key(|&c| diff(c, &weights, target));
        for v in children {
            settle_edge(state, u, v, diff(v, &weights, target));
            queue.push_back(v);
        }
    }
}

impl ChangeHandler for WeightedTransferHandler {
    fn handle_new_uav(&mut self, state: &mut FleetState, agent: Agent) -> McppResult<()> {
        let new_idx = AgentIndex::try_from(state.n()).expect("agent count fits u32");
        let seed = agent.seed();
        state.labels.set(seed.0, seed.1, Some(new_idx));
        state.agents.push(agent);

        let n = state.n();
        let target = state.grid.free_count() as f64 / n as f64;
        let adj = state.labels.adj_list(n);
        let counts = state.labels.partition_sizes(n);
        let (tree, weights) = dfs_weighted_tree(&adj, &counts, new_idx);
        transfer_bottom_up(new_idx, state, &tree, &weights, target);

        state.replan_all()
    }

    fn handle_removed_uav(&mut self, state: &mut FleetState, index: AgentIndex) -> McppResult<()> {
        let cells = state.labels.cells_of(index);
        let border = state.labels.border(&cells);
        let sizes = state.labels.partition_sizes(state.n());
        let transfer_to = *border
            .keys()
            .min_by_key(|&&k| sizes[k.index()])
            .ok_or_else(|| McppError::Disconnected("departing agent has no bordering neighbor".into()))?;

        for &(r, c) in &cells {
            state.labels.set(r, c, Some(transfer_to));
        }
        compact_after_removal(&mut state.labels, index);
        state.agents.remove(index.index());

        let remapped_transfer_to = if transfer_to.index() > index.index() {
            AgentIndex::try_from(transfer_to.index() - 1).expect("fits")
        } else {
            transfer_to
        };

        transfer_top_down(state, remapped_transfer_to);
        state.replan_all()
    }
}
