//! Unit tests for mcpp-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentIndex;

    #[test]
    fn index_roundtrip() {
        let id = AgentIndex(3);
        assert_eq!(id.index(), 3);
        assert_eq!(AgentIndex::try_from(3usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentIndex(0) < AgentIndex(1));
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(AgentIndex::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentIndex(7).to_string(), "7");
    }
}

#[cfg(test)]
mod grid {
    use crate::grid::CellKind;
    use crate::Grid;

    fn grid3x3_all_free() -> Grid {
        Grid::from_ints(3, 3, &[0; 9]).unwrap()
    }

    #[test]
    fn rejects_zero_area() {
        assert!(Grid::new(0, 0, vec![]).is_err());
    }

    #[test]
    fn rejects_all_occupied() {
        let err = Grid::from_ints(2, 2, &[1, 1, 1, 1]).unwrap_err();
        assert!(err.to_string().contains("no free cell"));
    }

    #[test]
    fn neighbors4_corner_has_two() {
        let g = grid3x3_all_free();
        let ns = g.neighbors4(0, 0);
        assert_eq!(ns.len(), 2);
        assert_eq!(ns, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn neighbors4_interior_has_four_in_fixed_order() {
        let g = grid3x3_all_free();
        let ns = g.neighbors4(1, 1);
        assert_eq!(ns, vec![(1, 2), (2, 1), (1, 0), (0, 1)]);
    }

    #[test]
    fn neighbors8_corner_has_three() {
        let g = grid3x3_all_free();
        assert_eq!(g.neighbors8(0, 0).len(), 3);
    }

    #[test]
    fn free_count_matches_ints() {
        let g = Grid::from_ints(2, 2, &[0, 1, 0, 1]).unwrap();
        assert_eq!(g.free_count(), 2);
        assert!(g.is_free(0, 0));
        assert_eq!(g.kind(0, 1), CellKind::Occupied);
    }
}

#[cfg(test)]
mod label {
    use crate::label::LabelMatrix;
    use crate::AgentIndex;

    fn strip_labels(width: usize, labels: &[i32]) -> LabelMatrix {
        let height = labels.len() / width;
        let mut m = LabelMatrix::empty(height, width);
        for (idx, &v) in labels.iter().enumerate() {
            let r = idx / width;
            let c = idx % width;
            if v >= 0 {
                m.set(r, c, Some(AgentIndex(v as u32)));
            }
        }
        m
    }

    #[test]
    fn partition_groups_by_label() {
        // 1x4 strip: agent 0 owns cells 0-1, agent 1 owns cells 2-3.
        let m = strip_labels(4, &[0, 0, 1, 1]);
        let parts = m.partition(2);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[1].len(), 2);
        assert!(parts[0].contains(&(0, 0)));
        assert!(parts[1].contains(&(0, 3)));
    }

    #[test]
    fn border_reports_external_neighbors_only() {
        let m = strip_labels(4, &[0, 0, 1, 1]);
        let p0 = m.cells_of(AgentIndex(0));
        let border = m.border(&p0);
        assert_eq!(border.len(), 1);
        assert!(border[&AgentIndex(1)].contains(&(0, 2)));
    }

    #[test]
    fn adj_list_is_symmetric_for_two_agents() {
        let m = strip_labels(4, &[0, 0, 1, 1]);
        let adj = m.adj_list(2);
        assert!(adj[&AgentIndex(0)].contains(&AgentIndex(1)));
        assert!(adj[&AgentIndex(1)].contains(&AgentIndex(0)));
    }

    #[test]
    fn is_not_bridge_true_for_non_articulation_cell() {
        // 2x3 block, all agent 0: removing a corner never disconnects a 2-row block.
        let mut m = strip_labels(3, &[0, 0, 0, 0, 0, 0]);
        assert!(m.is_not_bridge((0, 0)));
        // L must be restored exactly.
        assert_eq!(m.get(0, 0), Some(AgentIndex(0)));
    }

    #[test]
    fn is_not_bridge_false_for_single_cell_corridor() {
        // Straight 1-wide corridor: the middle cell is an articulation point.
        let mut m = strip_labels(3, &[0, 0, 0]);
        assert!(!m.is_not_bridge((0, 1)));
        assert_eq!(m.get(0, 1), Some(AgentIndex(0)));
    }

    #[test]
    fn dfs_subtrees_splits_corridor_around_root() {
        let mut m = strip_labels(5, &[0, 0, 0, 0, 0]);
        let subtrees = m.dfs_subtrees((0, 2));
        assert_eq!(subtrees.len(), 2);
        let sizes: Vec<usize> = subtrees.iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![2, 2]);
        // unaffected after restore
        assert_eq!(m.get(0, 2), Some(AgentIndex(0)));
    }

    #[test]
    fn strongly_connected_threshold() {
        // 3x3, center cell surrounded entirely by label 0 except itself unset.
        let m = strip_labels(3, &[0, 0, 0, 0, -1, 0, 0, 0, 0]);
        assert!(m.strongly_connected((1, 1), AgentIndex(0)));
        let m2 = strip_labels(3, &[0, -1, -1, -1, -1, -1, -1, -1, -1]);
        assert!(!m2.strongly_connected((1, 1), AgentIndex(0)));
    }
}

#[cfg(test)]
mod agent {
    use crate::Agent;

    #[test]
    fn starts_at_seed() {
        let a = Agent::new("UAV-000001", (2, 3));
        assert_eq!(a.position(), (2, 3));
        assert_eq!(a.seed(), (2, 3));
    }

    #[test]
    fn trajectory_cycles() {
        let mut a = Agent::new("UAV-000001", (0, 0));
        a.set_trajectory(vec![(0, 0), (0, 1), (1, 1), (1, 0)]);
        assert_eq!(a.position(), (0, 0));
        a.step();
        assert_eq!(a.position(), (0, 1));
        a.step();
        a.step();
        a.step();
        assert_eq!(a.position(), (0, 0), "trajectory must wrap around");
    }

    #[test]
    fn set_trajectory_resets_cursor_to_seed() {
        let mut a = Agent::new("UAV-000001", (1, 1));
        a.set_trajectory(vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(a.position(), (1, 1));
    }
}

#[cfg(test)]
mod rng {
    use crate::rng::REFERENCE_SEED;
    use crate::PlannerRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = PlannerRng::new(12345);
        let mut r2 = PlannerRng::new(12345);
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1_000_000);
            let b: u32 = r2.gen_range(0..1_000_000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut r0 = PlannerRng::new(1);
        let mut r1 = PlannerRng::new(2);
        let a: u64 = r0.gen_range(0..u64::MAX);
        let b: u64 = r1.gen_range(0..u64::MAX);
        assert_ne!(a, b);
    }

    #[test]
    fn default_uses_reference_seed() {
        let mut a = PlannerRng::default();
        let mut b = PlannerRng::new(REFERENCE_SEED);
        assert_eq!(a.gen_range(0..u64::MAX), b.gen_range(0..u64::MAX));
    }

    #[test]
    fn jitter_stays_in_band() {
        let mut rng = PlannerRng::new(7);
        for _ in 0..1000 {
            let j = rng.jitter(1e-4);
            assert!((0.9999..=1.0001).contains(&j));
        }
    }
}

#[cfg(test)]
mod config {
    use crate::config::{ChangeHandlerKind, InitialPartitioner, MstAlgo};

    #[test]
    fn parses_known_names() {
        assert_eq!(InitialPartitioner::try_from("BFS").unwrap(), InitialPartitioner::Bfs);
        assert_eq!(InitialPartitioner::try_from("Voronoi").unwrap(), InitialPartitioner::Bfs);
        assert_eq!(InitialPartitioner::try_from("DARP").unwrap(), InitialPartitioner::Darp);
        assert_eq!(ChangeHandlerKind::try_from("W_Transfer").unwrap(), ChangeHandlerKind::WTransfer);
        assert_eq!(MstAlgo::try_from("dfs").unwrap(), MstAlgo::Dfs);
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(InitialPartitioner::try_from("bogus").is_err());
        assert!(ChangeHandlerKind::try_from("bogus").is_err());
    }
}
