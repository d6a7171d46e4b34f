//! Transfer primitives (§4.4): `transfer_area`, `transfer_area_subtree`,
//! `transfer_concurrently`, and the weighted DFS tree used by the
//! Propagation/W-Transfer handlers.
//!
//! Grounded on `original_source/src/planner/cpp/utils.py`'s
//! `transfer_area`, `transfer_area_subtree`, `transfer_concurrently`, and
//! `dfs_weighted_tree`. One deliberate deviation from the source: every
//! BFS frontier here re-checks that a dequeued cell is still labeled
//! `sender` before acting on it. The source's `transfer_area` omits this
//! check (only `transfer_area_subtree` and `transfer_concurrently` have
//! it), which lets a cell enqueued twice get "transferred" a second time
//! after it no longer belongs to the sender — almost certainly an
//! oversight rather than intended behavior, since the other two transfer
//! primitives guard against exactly this. This port guards uniformly.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use mcpp_core::grid::neighbors4_bounded;
use mcpp_core::label::Cell;
use mcpp_core::{AgentIndex, LabelMatrix};

/// BFS outward from `border` (sender cells adjacent to receiver), converting
/// cells to `receiver` while every accepted cell keeps the sender's region
/// connected and the receiver's newly compact (§4.4 `transfer_area`).
/// Returns the number of cells actually transferred; never errors — callers
/// decide what a `0` result means.
pub fn transfer_area(
    labels: &mut LabelMatrix,
    sender: AgentIndex,
    receiver: AgentIndex,
    border: &BTreeSet<Cell>,
    amount: usize,
    sender_seed: Cell,
) -> usize {
    let (h, w) = (labels.height(), labels.width());
    let mut queue: VecDeque<Cell> = border.iter().copied().collect();
    let mut transferred = 0usize;

    while transferred < amount {
        let Some((r, c)) = queue.pop_front() else { break };
        if (r, c) == sender_seed || labels.get(r, c) != Some(sender) {
            continue;
        }
        if labels.strongly_connected((r, c), receiver) && labels.is_not_bridge((r, c)) {
            labels.set(r, c, Some(receiver));
            transferred += 1;
            for (nr, nc) in neighbors4_bounded(r, c, h, w) {
                if labels.get(nr, nc) == Some(sender) {
                    queue.push_back((nr, nc));
                }
            }
        }
    }
    transferred
}

/// Like [`transfer_area`], but a cell that would be a bridge is still taken
/// together with the DFS subtrees it would otherwise orphan, as long as
/// none of those subtrees contain the sender's seed and the combined size
/// does not exceed the remaining budget (§4.4 `transfer_area_subtree`).
pub fn transfer_area_subtree(
    labels: &mut LabelMatrix,
    sender: AgentIndex,
    receiver: AgentIndex,
    border: &BTreeSet<Cell>,
    amount: usize,
    sender_seed: Cell,
) -> usize {
    let (h, w) = (labels.height(), labels.width());
    let mut queue: VecDeque<Cell> = border.iter().copied().collect();
    let mut transferred = 0usize;

    while transferred < amount {
        let Some((r, c)) = queue.pop_front() else { break };
        if labels.get(r, c) != Some(sender) || (r, c) == sender_seed {
            continue;
        }
        if labels.is_not_bridge((r, c)) {
            labels.set(r, c, Some(receiver));
            transferred += 1;
            for (nr, nc) in neighbors4_bounded(r, c, h, w) {
                if labels.get(nr, nc) == Some(sender) {
                    queue.push_back((nr, nc));
                }
            }
            continue;
        }

        let subtrees = labels.dfs_subtrees((r, c));
        let keep: Vec<BTreeSet<Cell>> =
            subtrees.into_iter().filter(|s| !s.contains(&sender_seed)).collect();
        let total: usize = keep.iter().map(|s| s.len()).sum();
        if total >= amount - transferred {
            continue;
        }

        labels.set(r, c, Some(receiver));
        transferred += 1;
        for subtree in &keep {
            for &(cr, cc) in subtree {
                labels.set(cr, cc, Some(receiver));
                transferred += 1;
                for (nr, nc) in neighbors4_bounded(cr, cc, h, w) {
                    if labels.get(nr, nc) == Some(sender) {
                        queue.push_back((nr, nc));
                    }
                }
            }
        }
    }
    transferred
}

/// Cells of `from` that are 4-adjacent to `to` (§4.1 `get_adjacent_cells`).
pub fn adjacent_cells(labels: &LabelMatrix, from: AgentIndex, to: AgentIndex) -> BTreeSet<Cell> {
    labels.border(&labels.cells_of(from)).get(&to).cloned().unwrap_or_default()
}

/// Round-robin concurrent transfer from `from` to every key of `to_amounts`
/// (§4.4 `transfer_concurrently`). Each pass advances every still-active
/// receiver by up to one transferable cell. If `from_seed` is `None` and
/// only one receiver remains, the rest of `from`'s region is absorbed in
/// one step.
pub fn transfer_concurrently(
    labels: &mut LabelMatrix,
    from: AgentIndex,
    to_amounts: &BTreeMap<AgentIndex, usize>,
    from_seed: Option<Cell>,
) {
    let (h, w) = (labels.height(), labels.width());
    let mut transferred: BTreeMap<AgentIndex, usize> = to_amounts.keys().map(|&k| (k, 0)).collect();
    let mut queues: BTreeMap<AgentIndex, VecDeque<Cell>> = to_amounts
        .keys()
        .map(|&to| (to, adjacent_cells(labels, from, to).into_iter().collect()))
        .collect();

    while !queues.is_empty() {
        let nodes: Vec<AgentIndex> = queues.keys().copied().collect();
        for node in nodes {
            if !queues.contains_key(&node) {
                continue;
            }
            if from_seed.is_none() && queues.len() == 1 {
                for r in 0..h {
                    for c in 0..w {
                        if labels.get(r, c) == Some(from) {
                            labels.set(r, c, Some(node));
                        }
                    }
                }
                queues.remove(&node);
                break;
            }

            loop {
                let Some(&(r, c)) = queues[&node].front() else { break };
                if Some((r, c)) == from_seed || labels.get(r, c) != Some(from) {
                    queues.get_mut(&node).unwrap().pop_front();
                    continue;
                }
                if labels.is_not_bridge((r, c)) {
                    labels.set(r, c, Some(node));
                    *transferred.get_mut(&node).unwrap() += 1;
                    queues.get_mut(&node).unwrap().pop_front();
                    for (nr, nc) in neighbors4_bounded(r, c, h, w) {
                        if labels.get(nr, nc) == Some(from) {
                            queues.get_mut(&node).unwrap().push_back((nr, nc));
                        }
                    }
                    break;
                }
                let subtrees = labels.dfs_subtrees((r, c));
                let keep: Vec<BTreeSet<Cell>> = subtrees
                    .into_iter()
                    .filter(|s| from_seed.map(|seed| !s.contains(&seed)).unwrap_or(true))
                    .collect();
                let remaining = to_amounts[&node].saturating_sub(transferred[&node]);
                let total: usize = keep.iter().map(|s| s.len()).sum();
                if total >= remaining {
                    queues.get_mut(&node).unwrap().pop_front();
                    continue;
                }
                labels.set(r, c, Some(node));
                *transferred.get_mut(&node).unwrap() += 1;
                queues.get_mut(&node).unwrap().pop_front();
                for subtree in &keep {
                    for &(cr, cc) in subtree {
                        labels.set(cr, cc, Some(node));
                        *transferred.get_mut(&node).unwrap() += 1;
                        for (nr, nc) in neighbors4_bounded(cr, cc, h, w) {
                            if labels.get(nr, nc) == Some(from) {
                                queues.get_mut(&node).unwrap().push_back((nr, nc));
                            }
                        }
                    }
                }
                break;
            }

            let done = !queues.contains_key(&node) || {
                transferred[&node] >= to_amounts[&node] || queues[&node].is_empty()
            };
            if done {
                queues.remove(&node);
            }
        }
    }
}

/// Weighted DFS tree over an agent-adjacency graph, rooted at `root`
/// (§4.1/§4.7 `dfs_weighted_tree`). Returns the tree's child adjacency list
/// and, for every node, `(subtree_node_count, subtree_cell_count)`.
pub fn dfs_weighted_tree(
    adj: &BTreeMap<AgentIndex, BTreeSet<AgentIndex>>,
    node_weights: &[usize],
    root: AgentIndex,
) -> (BTreeMap<AgentIndex, Vec<AgentIndex>>, BTreeMap<AgentIndex, (usize, usize)>) {
    let mut children: BTreeMap<AgentIndex, Vec<AgentIndex>> = BTreeMap::new();
    let mut visited: BTreeSet<AgentIndex> = BTreeSet::new();
    let mut queue: VecDeque<(AgentIndex, Option<AgentIndex>)> = VecDeque::new();
    queue.push_back((root, None));

    while let Some((node, parent)) = queue.pop_front() {
        if visited.contains(&node) {
            continue;
        }
        visited.insert(node);
        if let Some(p) = parent {
            children.entry(p).or_default().push(node);
        }
        if let Some(neighbors) = adj.get(&node) {
            for &neighbor in neighbors {
                if Some(neighbor) != parent {
                    queue.push_back((neighbor, Some(node)));
                }
            }
        }
    }

    let mut weight: BTreeMap<AgentIndex, (usize, usize)> = BTreeMap::new();
    traverse(root, &children, node_weights, &mut weight);
    (children, weight)
}

fn traverse(
    node: AgentIndex,
    children: &BTreeMap<AgentIndex, Vec<AgentIndex>>,
    node_weights: &[usize],
    out: &mut BTreeMap<AgentIndex, (usize, usize)>,
) -> (usize, usize) {
    let mut count = 1usize;
    let mut weight = node_weights[node.index()];
    if let Some(kids) = children.get(&node) {
        for &child in kids {
            let (c, w) = traverse(child, children, node_weights, out);
            count += c;
            weight += w;
        }
    }
    out.insert(node, (count, weight));
    (count, weight)
}
