//! DARP (Divide Areas algorithm for Robot Partitioning): iterative
//! cost-matrix reweighting with connectivity correction (§4.3).
//!
//! Grounded on `original_source/src/planner/cpp/multi/darp.py`. Where the
//! source leans on OpenCV (`cv2.connectedComponents`, `cv2.distanceTransform`)
//! this port uses a plain flood-fill component labeler and the exact
//! two-pass squared Euclidean distance transform in
//! [`crate::distance_transform`].

use mcpp_core::config::default_darp_max_iter;
use mcpp_core::{AgentIndex, Grid, LabelMatrix, McppError, McppResult, PlannerRng};

use crate::bfs::validate_seeds;
use crate::distance_transform::distance_transform;

const EPSILON: f64 = 1e-6;
const CC_VARIATION: f64 = 0.01;
const RANDOM_LEVEL: f64 = 1e-4;

/// Run DARP to convergence (or exhaustion of `max_iter`).
///
/// `max_iter` defaults to `100 * 2^n` per §4.3; each outer restart halves
/// it and increments the balance tolerance `thresh` by one, matching the
/// source's degrade-and-retry loop.
pub fn darp_partition(
    grid: &Grid,
    seeds: &[(usize, usize)],
    max_iter: Option<usize>,
    rng: &mut PlannerRng,
) -> McppResult<LabelMatrix> {
    validate_seeds(grid, seeds)?;

    let n = seeds.len();
    let (h, w) = (grid.height(), grid.width());
    let hw = h * w;
    let free_cell_count = grid.free_count();
    let occupied: Vec<bool> = (0..h).flat_map(|r| (0..w).map(move |c| (r, c))).map(|(r, c)| !grid.is_free(r, c)).collect();

    let mut cost: Vec<Vec<f64>> = seeds
        .iter()
        .map(|&(sr, sc)| {
            (0..h)
                .flat_map(|r| (0..w).map(move |c| (r, c)))
                .map(|(r, c)| {
                    let dr = r as f64 - sr as f64;
                    let dc = c as f64 - sc as f64;
                    (dr * dr + dc * dc).sqrt()
                })
                .collect()
        })
        .collect();

    let mut thresh: i64 = if free_cell_count % n == 0 { 0 } else { 1 };
    let mut max_iter = max_iter.unwrap_or_else(|| default_darp_max_iter(n));
    let original_max_iter = max_iter;
    let mut connected = vec![true; n];

    loop {
        if max_iter == 0 {
            break;
        }
        let down_thresh = (free_cell_count as f64 - thresh as f64 * (n as i64 - 1) as f64)
            / (n as f64 * free_cell_count as f64);
        let up_thresh = (free_cell_count as f64 + thresh as f64) / (n as f64 * free_cell_count as f64);

        let mut success = false;
        let mut iteration = 0usize;

        while iteration < max_iter {
            let assignment = argmin_assignment(&cost, &occupied, hw);
            let area_counts = assign_counts(&assignment, n);

            let connected_multiplier: Vec<Vec<f64>> = (0..n)
                .map(|i| connected_multiplier_for(&assignment, seeds[i], i, h, w, &mut connected))
                .collect();

            let target = free_cell_count / n;
            if connected.iter().all(|&c| c)
                && area_counts.iter().all(|&cnt| (cnt as i64 - target as i64).unsigned_abs() as i64 <= thresh)
            {
                success = true;
                break;
            }

            let plain_errors: Vec<f64> = area_counts.iter().map(|&c| c as f64 / free_cell_count as f64).collect();
            let mut div_fair_errors = vec![0.0f64; n];
            for i in 0..n {
                if plain_errors[i] < down_thresh {
                    div_fair_errors[i] = down_thresh - plain_errors[i];
                } else if plain_errors[i] > up_thresh {
                    div_fair_errors[i] = up_thresh - plain_errors[i];
                }
            }
            let total_neg_perc: f64 = -div_fair_errors.iter().filter(|&&e| e < 0.0).sum::<f64>();
            let total_neg_plain_errors: f64 = (0..n)
                .filter(|&i| div_fair_errors[i] < 0.0)
                .map(|i| plain_errors[i])
                .sum();

            let mut correction_multiplier = vec![1.0f64; n];
            if total_neg_plain_errors != 0.0 {
                for i in 0..n {
                    if div_fair_errors[i] < 0.0 {
                        correction_multiplier[i] =
                            1.0 + plain_errors[i] * total_neg_perc / (total_neg_plain_errors * 2.0);
                    }
                }
            }

            for i in 0..n {
                let cm = correction_multiplier[i];
                for cell in 0..hw {
                    let jitter = rng.jitter(RANDOM_LEVEL);
                    cost[i][cell] *= cm * jitter * connected_multiplier[i][cell];
                }
            }

            iteration += 1;
        }

        if success {
            break;
        }
        max_iter >>= 1;
        thresh += 1;
    }

    let assignment = argmin_assignment(&cost, &occupied, hw);
    if connected.iter().all(|&c| c)
        && assign_counts(&assignment, n)
            .iter()
            .all(|&cnt| (cnt as i64 - (free_cell_count / n) as i64).unsigned_abs() as i64 <= thresh)
    {
        Ok(assignment_to_label_matrix(&assignment, h, w))
    } else {
        Err(McppError::BalanceUnreached { max_iter: original_max_iter })
    }
}

/// `argmin_i cost[i][cell]`, masked to `None` on occupied cells. Ties break
/// to the smallest agent index (§4.3: "argmin ties broken by the smallest
/// index").
fn argmin_assignment(cost: &[Vec<f64>], occupied: &[bool], hw: usize) -> Vec<Option<AgentIndex>> {
    (0..hw)
        .map(|cell| {
            if occupied[cell] {
                return None;
            }
            let mut best_i = 0usize;
            let mut best_v = cost[0][cell];
            for (i, row) in cost.iter().enumerate().skip(1) {
                if row[cell] < best_v {
                    best_v = row[cell];
                    best_i = i;
                }
            }
            Some(AgentIndex::try_from(best_i).expect("agent count fits u32"))
        })
        .collect()
}

fn assign_counts(assignment: &[Option<AgentIndex>], n: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n];
    for a in assignment {
        if let Some(i) = a {
            counts[i.index()] += 1;
        }
    }
    counts
}

fn assignment_to_label_matrix(assignment: &[Option<AgentIndex>], h: usize, w: usize) -> LabelMatrix {
    let mut m = LabelMatrix::empty(h, w);
    for r in 0..h {
        for c in 0..w {
            m.set(r, c, assignment[r * w + c]);
        }
    }
    m
}

/// Per-agent connected-component correction multiplier, an `h*w` flat array
/// (§4.3 step 2). Updates `connected[i]` as a side effect, mirroring the
/// source's `self.connected` bookkeeping.
fn connected_multiplier_for(
    assignment: &[Option<AgentIndex>],
    seed: (usize, usize),
    i: usize,
    h: usize,
    w: usize,
    connected: &mut [bool],
) -> Vec<f64> {
    let agent = AgentIndex::try_from(i).expect("agent count fits u32");
    let mask: Vec<bool> = assignment.iter().map(|&a| a == Some(agent)).collect();
    let components = label_components(&mask, h, w);
    let num_components = components.iter().copied().max().unwrap_or(0);

    if num_components <= 1 {
        connected[i] = true;
        return vec![1.0; h * w];
    }
    connected[i] = false;

    let seed_label = components[seed.0 * w + seed.1];
    let primary_mask: Vec<bool> = components.iter().map(|&l| l == seed_label).collect();
    let other_mask: Vec<bool> = components.iter().map(|&l| l != 0 && l != seed_label).collect();

    let mut dist1 = normalize(&distance_transform(&primary_mask, h, w));
    for v in &mut dist1 {
        *v += 1.0;
    }
    let dist2 = normalize(&distance_transform(&other_mask, h, w));

    let raw: Vec<f64> = dist1.iter().zip(dist2.iter()).map(|(a, b)| a - b).collect();
    let normalized = normalize(&raw);
    normalized.into_iter().map(|v| (v * 2.0 - 1.0) * CC_VARIATION + 1.0).collect()
}

fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min + EPSILON;
    values.iter().map(|&v| (v - min) / span).collect()
}

/// 4-connected component labeling of `mask` (row-major flood fill).
/// Label `0` means "not in mask"; components are numbered `1..=k` in the
/// order their first cell is encountered in row-major scan order (stable,
/// deterministic).
fn label_components(mask: &[bool], h: usize, w: usize) -> Vec<i32> {
    let mut labels = vec![0i32; h * w];
    let mut next_label = 1i32;
    let mut stack = Vec::new();
    for r in 0..h {
        for c in 0..w {
            let idx = r * w + c;
            if !mask[idx] || labels[idx] != 0 {
                continue;
            }
            labels[idx] = next_label;
            stack.push((r, c));
            while let Some((cr, cc)) = stack.pop() {
                for (nr, nc) in mcpp_core::grid::neighbors4_bounded(cr, cc, h, w) {
                    let nidx = nr * w + nc;
                    if mask[nidx] && labels[nidx] == 0 {
                        labels[nidx] = next_label;
                        stack.push((nr, nc));
                    }
                }
            }
            next_label += 1;
        }
    }
    labels
}
