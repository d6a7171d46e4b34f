#[cfg(test)]
mod engine {
    use std::collections::BTreeMap;

    use mcpp_core::{AgentIndex, LabelMatrix};

    use crate::engine::{dfs_weighted_tree, transfer_area, transfer_area_subtree, transfer_concurrently};

    fn idx(i: usize) -> AgentIndex {
        AgentIndex::try_from(i).unwrap()
    }

    #[test]
    fn transfer_area_moves_exactly_the_requested_amount() {
        // 1x6 strip: agent0 owns cols 0-2, agent1 owns cols 3-5.
        let mut labels = LabelMatrix::empty(1, 6);
        for c in 0..3 {
            labels.set(0, c, Some(idx(0)));
        }
        for c in 3..6 {
            labels.set(0, c, Some(idx(1)));
        }
        let border = labels.border(&labels.cells_of(idx(1)));
        let moved = transfer_area(&mut labels, idx(0), idx(1), &border[&idx(0)], 1, (0, 0));
        assert_eq!(moved, 1);
        assert_eq!(labels.get(0, 2), Some(idx(1)));
        assert_eq!(labels.get(0, 1), Some(idx(0)));
    }

    #[test]
    fn transfer_area_subtree_keeps_the_seed_side_and_takes_the_rest() {
        // A 'T' shape of agent 0 (seed at (0,1)) bordering agent 1 on three
        // sides; (1,1) is a bridge separating the top bar from the stem.
        let mut labels = LabelMatrix::empty(3, 3);
        for c in 0..3 {
            labels.set(0, c, Some(idx(0)));
        }
        labels.set(1, 1, Some(idx(0)));
        labels.set(2, 1, Some(idx(0)));
        labels.set(1, 0, Some(idx(1)));
        labels.set(1, 2, Some(idx(1)));
        labels.set(2, 0, Some(idx(1)));
        labels.set(2, 2, Some(idx(1)));

        let border = labels.border(&labels.cells_of(idx(1)));
        let moved = transfer_area_subtree(&mut labels, idx(0), idx(1), &border[&idx(0)], 3, (0, 1));

        assert_eq!(moved, 3);
        assert_eq!(labels.get(0, 0), Some(idx(1)));
        assert_eq!(labels.get(1, 1), Some(idx(1)));
        assert_eq!(labels.get(2, 1), Some(idx(1)));
        // The seed's own branch is never sacrificed.
        assert_eq!(labels.get(0, 1), Some(idx(0)));
        assert_eq!(labels.get(0, 2), Some(idx(0)));
    }

    #[test]
    fn transfer_concurrently_splits_between_two_receivers() {
        let mut labels = LabelMatrix::empty(2, 5);
        for (r, c) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)] {
            labels.set(r, c, Some(idx(0)));
        }
        labels.set(0, 3, Some(idx(1)));
        labels.set(0, 4, Some(idx(1)));
        labels.set(1, 3, Some(idx(2)));
        labels.set(1, 4, Some(idx(2)));

        let mut to_amounts = BTreeMap::new();
        to_amounts.insert(idx(1), 2);
        to_amounts.insert(idx(2), 2);
        transfer_concurrently(&mut labels, idx(0), &to_amounts, Some((0, 0)));

        assert_eq!(labels.get(0, 0), Some(idx(0)));
        assert_eq!(labels.get(1, 0), Some(idx(0)));
        assert_eq!(labels.get(0, 1), Some(idx(1)));
        assert_eq!(labels.get(0, 2), Some(idx(1)));
        assert_eq!(labels.get(1, 1), Some(idx(2)));
        assert_eq!(labels.get(1, 2), Some(idx(2)));
    }

    #[test]
    fn dfs_weighted_tree_sums_subtree_weights() {
        let mut adj = BTreeMap::new();
        adj.insert(idx(0), [idx(1)].into_iter().collect());
        adj.insert(idx(1), [idx(0), idx(2)].into_iter().collect());
        adj.insert(idx(2), [idx(1)].into_iter().collect());

        let (children, weight) = dfs_weighted_tree(&adj, &[2, 3, 4], idx(0));
        assert_eq!(children[&idx(0)], vec![idx(1)]);
        assert_eq!(children[&idx(1)], vec![idx(2)]);
        assert_eq!(weight[&idx(2)], (1, 4));
        assert_eq!(weight[&idx(1)], (2, 7));
        assert_eq!(weight[&idx(0)], (3, 9));
    }
}

#[cfg(test)]
mod driver {
    use mcpp_core::{AgentIndex, LabelMatrix};

    use crate::driver::{balance, cycling_balance};

    fn idx(i: usize) -> AgentIndex {
        AgentIndex::try_from(i).unwrap()
    }

    fn skewed_strip() -> LabelMatrix {
        // 1x8 strip, agent0 holds 7 cells, agent1 holds 1.
        let mut labels = LabelMatrix::empty(1, 8);
        for c in 0..7 {
            labels.set(0, c, Some(idx(0)));
        }
        labels.set(0, 7, Some(idx(1)));
        labels
    }

    #[test]
    fn balance_converges_to_an_even_split() {
        let mut labels = skewed_strip();
        let seeds = [(0, 0), (0, 7)];
        balance(&mut labels, 2, &seeds, 20).unwrap();
        let sizes = labels.partition_sizes(2);
        assert_eq!(sizes, vec![4, 4]);
    }

    #[test]
    fn balance_reports_unreached_when_starved_of_iterations() {
        let mut labels = skewed_strip();
        let seeds = [(0, 0), (0, 7)];
        assert!(balance(&mut labels, 2, &seeds, 0).is_err());
    }

    #[test]
    fn cycling_balance_also_converges() {
        let mut labels = skewed_strip();
        let seeds = [(0, 0), (0, 7)];
        cycling_balance(&mut labels, 2, &seeds, 20);
        let sizes = labels.partition_sizes(2);
        assert!((sizes[0] as i64 - sizes[1] as i64).abs() <= 1);
    }
}
