#[cfg(test)]
mod plan {
    use std::collections::BTreeSet;

    use crate::plan;

    fn adjacent(a: (usize, usize), b: (usize, usize)) -> bool {
        let dr = a.0 as isize - b.0 as isize;
        let dc = a.1 as isize - b.1 as isize;
        matches!((dr, dc), (0, 1) | (0, -1) | (1, 0) | (-1, 0))
    }

    fn assert_full_cycle(path: &[(usize, usize)], mask: &[bool], height: usize, width: usize) {
        let expected: BTreeSet<(usize, usize)> = (0..height)
            .flat_map(|r| (0..width).map(move |c| (r, c)))
            .filter(|&(r, c)| mask[r * width + c])
            .collect();
        let visited: BTreeSet<(usize, usize)> = path.iter().copied().collect();
        assert_eq!(visited, expected, "every FREE cell must be visited exactly once");
        assert_eq!(path.len(), visited.len(), "no cell repeats in the trajectory");
        for w in path.windows(2) {
            assert!(adjacent(w[0], w[1]), "{:?} -> {:?} not 4-adjacent", w[0], w[1]);
        }
        assert!(adjacent(path[path.len() - 1], path[0]), "trajectory must close into a cycle");
    }

    #[test]
    fn dense_4x4_visits_every_cell_once() {
        let mask = vec![true; 16];
        let path = plan(&mask, 4, 4, (0, 0)).unwrap();
        assert_full_cycle(&path, &mask, 4, 4);
    }

    #[test]
    fn non_homogeneous_8x8_still_covers_every_free_cell() {
        // Checkerboard-ish holes inside otherwise-free 2x2 blocks.
        let mut mask = vec![true; 64];
        for &(r, c) in &[(0, 1), (3, 4), (5, 2), (6, 7)] {
            mask[r * 8 + c] = false;
        }
        let path = plan(&mask, 8, 8, (0, 0)).unwrap();
        assert_full_cycle(&path, &mask, 8, 8);
    }

    #[test]
    fn rejects_odd_dimensions() {
        let mask = vec![true; 9];
        assert!(plan(&mask, 3, 3, (0, 0)).is_err());
    }

    #[test]
    fn rejects_seed_on_occupied_cell() {
        let mut mask = vec![true; 16];
        mask[0] = false;
        assert!(plan(&mask, 4, 4, (0, 0)).is_err());
    }

    #[test]
    fn single_cell_corridor_still_completes() {
        // A 2-wide, 6-long corridor: exercises the boundary of the
        // symmetric-cell rules on a minimal non-square mega-grid.
        let mask = vec![true; 12];
        let path = plan(&mask, 2, 6, (0, 0)).unwrap();
        assert_full_cycle(&path, &mask, 2, 6);
    }
}

#[cfg(test)]
mod mst {
    use crate::mega::MegaGrid;
    use crate::mst::{dfs, kruskal};

    #[test]
    fn kruskal_errors_on_disconnected_mega_grid() {
        // 2x8 mask: free mega-cells at column 0 and column 3, fully
        // occupied mega-columns 1-2 between them.
        let mut mask = vec![false; 2 * 8];
        for r in 0..2 {
            mask[r * 8] = true;
            mask[r * 8 + 1] = true;
            mask[r * 8 + 6] = true;
            mask[r * 8 + 7] = true;
        }
        let mega = MegaGrid::build(&mask, 2, 8);
        assert!(kruskal(&mask, 8, &mega).is_err());
    }

    #[test]
    fn dfs_spans_a_simple_connected_mega_grid() {
        let mask = vec![true; 4 * 4];
        let mega = MegaGrid::build(&mask, 4, 4);
        let tree = dfs(&mask, 4, &mega, (0, 0)).unwrap();
        // 2x2 mega-grid has 4 free mega-cells; a spanning tree has 3 edges,
        // i.e. 6 directed entries across the adjacency map.
        let directed_entries: usize = tree.values().map(|s| s.len()).sum();
        assert_eq!(directed_entries, 6);
    }
}
