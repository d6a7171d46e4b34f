//! Exact squared Euclidean distance transform (Felzenszwalt & Huttenlocher's
//! lower-envelope-of-parabolas algorithm), used by DARP's connected
//! multiplier (§4.3) in place of `cv2.distanceTransform`.

const INF: f64 = f64::INFINITY;

/// For every cell, the squared Euclidean distance to the nearest cell where
/// `mask` is `true`. Two 1-D passes (columns, then rows), each linear in the
/// number of cells along that axis.
pub fn squared_distance_transform(mask: &[bool], height: usize, width: usize) -> Vec<f64> {
    let mut g = vec![0.0f64; height * width];

    // Pass 1: transform each column independently.
    for c in 0..width {
        let column: Vec<f64> = (0..height).map(|r| if mask[r * width + c] { 0.0 } else { INF }).collect();
        let transformed = edt_1d(&column);
        for r in 0..height {
            g[r * width + c] = transformed[r];
        }
    }

    // Pass 2: transform each row of the intermediate result.
    let mut out = vec![0.0f64; height * width];
    for r in 0..height {
        let row: Vec<f64> = (0..width).map(|c| g[r * width + c]).collect();
        let transformed = edt_1d(&row);
        out[r * width..(r + 1) * width].copy_from_slice(&transformed);
    }

    out
}

/// Euclidean (non-squared) distance transform; convenience wrapper.
pub fn distance_transform(mask: &[bool], height: usize, width: usize) -> Vec<f64> {
    squared_distance_transform(mask, height, width).into_iter().map(f64::sqrt).collect()
}

/// 1-D lower envelope of parabolas rooted at each sample of `f`.
/// Standard algorithm for linear-time distance transforms.
fn edt_1d(f: &[f64]) -> Vec<f64> {
    let n = f.len();
    let mut d = vec![0.0f64; n];
    let mut v = vec![0usize; n]; // locations of parabolas in lower envelope
    let mut z = vec![0.0f64; n + 1]; // locations of boundaries between parabolas

    let mut k = 0usize;
    v[0] = 0;
    z[0] = -INF;
    z[1] = INF;

    for q in 1..n {
        loop {
            let s = intersection(f, v[k], q);
            if s <= z[k] {
                if k == 0 {
                    // Degenerate: replace the sole parabola.
                    v[0] = q;
                    z[0] = -INF;
                    z[1] = INF;
                    break;
                }
                k -= 1;
                continue;
            }
            k += 1;
            v[k] = q;
            z[k] = s;
            z[k + 1] = INF;
            break;
        }
    }

    k = 0;
    for (q, slot) in d.iter_mut().enumerate() {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let dx = q as f64 - v[k] as f64;
        *slot = dx * dx + f[v[k]];
    }
    d
}

#[inline]
fn intersection(f: &[f64], p: usize, q: usize) -> f64 {
    let (fp, fq, p, q) = (f[p], f[q], p as f64, q as f64);
    ((fq + q * q) - (fp + p * p)) / (2.0 * q - 2.0 * p)
}
