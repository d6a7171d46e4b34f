//! Mega-grid construction (§4.6 Step A): a 2×2 coarsening of a per-agent
//! FREE/OCCUPIED mask, and the "preferred"/"secondary" edge classification
//! used by the spanning-tree builders in [`crate::mst`].

pub type MegaCell = (usize, usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeKind {
    Preferred,
    Secondary,
}

/// A `(height/2) x (width/2)` coarsening of a FREE/OCCUPIED mask. A
/// mega-cell is FREE iff any of its four children is FREE.
#[derive(Clone, Debug)]
pub struct MegaGrid {
    height: usize,
    width: usize,
    free: Vec<bool>,
}

impl MegaGrid {
    pub fn build(mask: &[bool], height: usize, width: usize) -> Self {
        let (mh, mw) = (height / 2, width / 2);
        let mut free = vec![false; mh * mw];
        for mr in 0..mh {
            for mc in 0..mw {
                let any = [(0usize, 0usize), (0, 1), (1, 0), (1, 1)]
                    .iter()
                    .any(|&(dr, dc)| mask[(mr * 2 + dr) * width + (mc * 2 + dc)]);
                free[mr * mw + mc] = any;
            }
        }
        MegaGrid { height: mh, width: mw, free }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn is_free(&self, cell: MegaCell) -> bool {
        self.free[cell.0 * self.width + cell.1]
    }

    pub fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.height && (c as usize) < self.width
    }

    pub fn cells(&self) -> impl Iterator<Item = MegaCell> + '_ {
        (0..self.height).flat_map(move |r| (0..self.width).map(move |c| (r, c)))
    }
}

pub fn cell_to_mega(cell: (usize, usize)) -> MegaCell {
    (cell.0 >> 1, cell.1 >> 1)
}

/// The 4-neighbor mega-cell in a fixed direction, if in-bounds.
pub fn mega_neighbor(cell: MegaCell, dir: (isize, isize), mega: &MegaGrid) -> Option<MegaCell> {
    let nr = cell.0 as isize + dir.0;
    let nc = cell.1 as isize + dir.1;
    mega.in_bounds(nr, nc).then_some((nr as usize, nc as usize))
}

/// Quality of the edge between two 4-adjacent mega-cells, judged by the
/// two boundary child-cell pairs a direct crossing would use: `Preferred`
/// when both pairs are free on both sides, `Secondary` when only one pair
/// is, `None` when neither pair offers a free crossing.
pub fn edge_kind(mask: &[bool], full_width: usize, a: MegaCell, b: MegaCell) -> Option<EdgeKind> {
    let pairs = boundary_pairs(a, b);
    let both_free = |x: (usize, usize), y: (usize, usize)| {
        mask[x.0 * full_width + x.1] && mask[y.0 * full_width + y.1]
    };
    let matches = pairs.iter().filter(|&&(x, y)| both_free(x, y)).count();
    match matches {
        2 => Some(EdgeKind::Preferred),
        1 => Some(EdgeKind::Secondary),
        _ => None,
    }
}

/// The two boundary child-cell pairs shared by two 4-adjacent mega-cells
/// (one pair per row, for a horizontal edge; one pair per column, for a
/// vertical edge).
fn boundary_pairs(a: MegaCell, b: MegaCell) -> [((usize, usize), (usize, usize)); 2] {
    let (ar, ac) = (a.0 * 2, a.1 * 2);
    let (br, bc) = (b.0 * 2, b.1 * 2);
    if a.0 == b.0 {
        if b.1 > a.1 {
            [((ar, ac + 1), (br, bc)), ((ar + 1, ac + 1), (br + 1, bc))]
        } else {
            [((ar, ac), (br, bc + 1)), ((ar + 1, ac), (br + 1, bc + 1))]
        }
    } else if b.0 > a.0 {
        [((ar + 1, ac), (br, bc)), ((ar + 1, ac + 1), (br, bc + 1))]
    } else {
        [((ar, ac), (br + 1, bc)), ((ar, ac + 1), (br + 1, bc + 1))]
    }
}
