//! Spanning tree of the mega-grid (§4.6 Step B). Grounded on
//! `original_source/src/planner/cpp/single/stc.py`'s `_mst` for the overall
//! shape (parent-link tree, `(row,col)` dirs fixed order); generalized past
//! that source's homogeneous-mega-cell assumption using the
//! preferred/secondary edge distinction from spec §4.6.

use std::collections::{BTreeMap, BTreeSet};

use mcpp_core::{McppError, McppResult};

use crate::mega::{edge_kind, mega_neighbor, EdgeKind, MegaCell, MegaGrid};

const DIRS4: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Undirected mega-cell adjacency, each edge stored both ways.
pub type MegaTree = BTreeMap<MegaCell, BTreeSet<MegaCell>>;

fn add_edge(tree: &mut MegaTree, a: MegaCell, b: MegaCell) {
    tree.entry(a).or_default().insert(b);
    tree.entry(b).or_default().insert(a);
}

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        UnionFind { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.parent[ra] = rb;
        true
    }
}

/// Union-Find over FREE mega-cells, unioning preferred edges before
/// secondary ones; errors with `Disconnected` if more than one component
/// of FREE mega-cells remains.
pub fn kruskal(mask: &[bool], full_width: usize, mega: &MegaGrid) -> McppResult<MegaTree> {
    let free_cells: Vec<MegaCell> = mega.cells().filter(|&c| mega.is_free(c)).collect();
    let index: BTreeMap<MegaCell, usize> = free_cells.iter().enumerate().map(|(i, &c)| (c, i)).collect();

    let mut preferred = Vec::new();
    let mut secondary = Vec::new();
    for &a in &free_cells {
        for dir in DIRS4 {
            let Some(b) = mega_neighbor(a, dir, mega) else { continue };
            if !mega.is_free(b) || b < a {
                continue;
            }
            match edge_kind(mask, full_width, a, b) {
                Some(EdgeKind::Preferred) => preferred.push((a, b)),
                Some(EdgeKind::Secondary) => secondary.push((a, b)),
                None => {}
            }
        }
    }

    let mut uf = UnionFind::new(free_cells.len());
    let mut tree = MegaTree::new();
    let mut components = free_cells.len();
    for (a, b) in preferred.into_iter().chain(secondary) {
        if uf.union(index[&a], index[&b]) {
            add_edge(&mut tree, a, b);
            components -= 1;
        }
    }

    if components > 1 {
        return Err(McppError::Disconnected("mega-grid has more than one free component".into()));
    }
    Ok(tree)
}

/// Iterative DFS from `seed_mega`, visiting preferred neighbors before
/// secondary ones; errors with `Disconnected` if any FREE mega-cell is
/// unreachable from the seed.
pub fn dfs(mask: &[bool], full_width: usize, mega: &MegaGrid, seed_mega: MegaCell) -> McppResult<MegaTree> {
    let mut visited: BTreeSet<MegaCell> = BTreeSet::new();
    let mut tree = MegaTree::new();
    let mut stack = vec![seed_mega];
    visited.insert(seed_mega);

    while let Some(node) = stack.pop() {
        let mut preferred = Vec::new();
        let mut secondary = Vec::new();
        for dir in DIRS4 {
            let Some(neighbor) = mega_neighbor(node, dir, mega) else { continue };
            if visited.contains(&neighbor) || !mega.is_free(neighbor) {
                continue;
            }
            match edge_kind(mask, full_width, node, neighbor) {
                Some(EdgeKind::Preferred) => preferred.push(neighbor),
                Some(EdgeKind::Secondary) => secondary.push(neighbor),
                None => {}
            }
        }
        // Push secondary first so a preferred neighbor is popped (and
        // descended into) first, per §4.6's "preferred then secondary".
        for &n in secondary.iter().rev() {
            if visited.insert(n) {
                add_edge(&mut tree, node, n);
                stack.push(n);
            }
        }
        for &n in preferred.iter().rev() {
            if visited.insert(n) {
                add_edge(&mut tree, node, n);
                stack.push(n);
            }
        }
    }

    let free_count = mega.cells().filter(|&c| mega.is_free(c)).count();
    if visited.len() != free_count {
        return Err(McppError::Disconnected("mega-grid has cells unreachable from the seed".into()));
    }
    Ok(tree)
}
