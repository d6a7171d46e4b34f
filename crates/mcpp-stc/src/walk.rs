//! Coverage walk emission (§4.6 Step C).
//!
//! Move validity (does the mega-tree permit crossing here, or permit the
//! internal shortcut across a 2x2 block) follows the original's
//! `is_valid_movement`/`get_neighbor_mega_cell` in
//! `original_source/src/planner/cpp/single/stc.py`, generalized from its
//! fixed four-case match to the general boundary-direction formula. Cell
//! *selection* (the "symmetric cell" substitution rules) has no original
//! counterpart — that source only ever handles homogeneous mega-cells,
//! where the literal target is always free — and is implemented directly
//! from spec §4.6's prose.

use std::collections::BTreeSet;

use mcpp_core::label::Cell;

use crate::mst::MegaTree;

const DIRS4: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

fn step(cell: Cell, dir: (isize, isize), height: usize, width: usize) -> Option<Cell> {
    let r = cell.0 as isize + dir.0;
    let c = cell.1 as isize + dir.1;
    if r < 0 || c < 0 || r as usize >= height || c as usize >= width {
        return None;
    }
    Some((r as usize, c as usize))
}

fn mega_of(cell: Cell) -> (usize, usize) {
    (cell.0 >> 1, cell.1 >> 1)
}

/// Reflection of `cell` about the axis orthogonal to `dir`, within its
/// mega-cell: a horizontal direction flips the child's column, a vertical
/// direction flips the child's row.
fn symmetric(cell: Cell, dir: (isize, isize)) -> Cell {
    let (mega_r, mega_c) = mega_of(cell);
    let (child_r, child_c) = (cell.0 & 1, cell.1 & 1);
    if dir.1 != 0 {
        (cell.0, mega_c * 2 + (1 - child_c))
    } else {
        (mega_r * 2 + (1 - child_r), cell.1)
    }
}

fn tree_has_edge(tree: &MegaTree, a: (usize, usize), b: (usize, usize)) -> bool {
    tree.get(&a).is_some_and(|s| s.contains(&b))
}

/// The outside mega-cell across which an internal hop (`current` to a
/// same-mega-cell `target` along `dir`) would run, or `None` at the grid
/// boundary (no outside mega-cell exists, so the hop is unconditionally
/// allowed).
fn internal_hop_outside_mega(
    current: Cell,
    dir: (isize, isize),
    mega_h: usize,
    mega_w: usize,
) -> Option<(usize, usize)> {
    let (mega_r, mega_c) = mega_of(current);
    if dir.1 != 0 {
        let child_r = current.0 & 1;
        if child_r == 0 {
            (mega_r > 0).then(|| (mega_r - 1, mega_c))
        } else {
            (mega_r + 1 < mega_h).then_some((mega_r + 1, mega_c))
        }
    } else {
        let child_c = current.1 & 1;
        if child_c == 0 {
            (mega_c > 0).then(|| (mega_r, mega_c - 1))
        } else {
            (mega_c + 1 < mega_w).then_some((mega_r, mega_c + 1))
        }
    }
}

fn is_valid_move(
    current: Cell,
    target: Cell,
    dir: (isize, isize),
    tree: &MegaTree,
    mega_h: usize,
    mega_w: usize,
) -> bool {
    let (ca, cb) = (mega_of(current), mega_of(target));
    if ca != cb {
        tree_has_edge(tree, ca, cb)
    } else {
        match internal_hop_outside_mega(current, dir, mega_h, mega_w) {
            None => true,
            Some(outside) => !tree_has_edge(tree, ca, outside),
        }
    }
}

/// Walk the grid from `seed`, emitting a cyclic coverage sequence over the
/// FREE cells of `mask`. `height`/`width` must be even (mega-grid
/// precondition, checked by the caller).
pub fn emit_walk(mask: &[bool], height: usize, width: usize, tree: &MegaTree, seed: Cell) -> Vec<Cell> {
    let (mega_h, mega_w) = (height / 2, width / 2);
    let is_free = |c: Cell| mask[c.0 * width + c.1];

    let mut visited: BTreeSet<Cell> = BTreeSet::new();
    visited.insert(seed);
    let mut coverage: Vec<Cell> = vec![seed];
    let mut current = seed;
    let mut last = seed;
    let mut previous_direction: Option<(isize, isize)> = None;

    loop {
        let mut moved = false;
        for dir in DIRS4 {
            let Some(target) = step(current, dir, height, width) else { continue };
            if visited.contains(&target) {
                continue;
            }
            if !is_valid_move(current, target, dir, tree, mega_h, mega_w) {
                continue;
            }

            let mut emitted: Vec<Cell> = Vec::new();
            if last == current {
                if is_free(target) {
                    emitted.push(target);
                } else {
                    let sym = symmetric(target, dir);
                    if is_free(sym) {
                        emitted.push(sym);
                    }
                }
            } else if last == symmetric(current, dir) {
                if is_free(target) {
                    emitted.push(target);
                } else if let Some(alt) = step(last, dir, height, width) {
                    if is_free(alt) {
                        emitted.push(alt);
                    }
                }
            } else if previous_direction.is_some_and(|pd| last == symmetric(current, pd)) {
                let pd = previous_direction.unwrap();
                if let Some(first) = step(current, pd, height, width) {
                    emitted.push(first);
                }
                if is_free(target) {
                    emitted.push(target);
                } else {
                    let sym = symmetric(target, dir);
                    if is_free(sym) {
                        emitted.push(sym);
                    }
                }
            }
            // Else: none of the three textual cases apply. No cell is
            // emitted this step, but the geometric cursor still advances;
            // `visited` growth keeps the walk finite regardless.

            for cell in emitted {
                coverage.push(cell);
                last = cell;
            }

            visited.insert(target);
            current = target;
            previous_direction = Some(dir);
            moved = true;
            break;
        }
        if !moved {
            break;
        }
    }

    coverage.dedup();
    coverage
}
