#[cfg(test)]
mod bfs {
    use mcpp_core::{AgentIndex, Grid};

    use crate::bfs_partition;

    #[test]
    fn two_seeds_split_empty_strip_evenly() {
        // 1x4 empty strip, seeds at both ends.
        let grid = Grid::from_ints(1, 4, &[0, 0, 0, 0]).unwrap();
        let labels = bfs_partition(&grid, &[(0, 0), (0, 3)]).unwrap();
        assert_eq!(labels.get(0, 0), Some(AgentIndex(0)));
        assert_eq!(labels.get(0, 3), Some(AgentIndex(1)));
        // Every free cell gets a label.
        assert!(labels.iter_cells().all(|(_, l)| l.is_some()));
    }

    #[test]
    fn rejects_seed_on_occupied_cell() {
        let grid = Grid::from_ints(1, 3, &[0, 1, 0]).unwrap();
        assert!(bfs_partition(&grid, &[(0, 1)]).is_err());
    }

    #[test]
    fn rejects_seed_collision() {
        let grid = Grid::from_ints(1, 3, &[0, 0, 0]).unwrap();
        assert!(bfs_partition(&grid, &[(0, 0), (0, 0)]).is_err());
    }

    #[test]
    fn disconnected_region_errors() {
        // Two 1-cell regions separated by an occupied wall, one seed only
        // reaches its own side.
        let grid = Grid::from_ints(1, 3, &[0, 1, 0]).unwrap();
        let err = bfs_partition(&grid, &[(0, 0)]).unwrap_err();
        assert!(err.to_string().contains("unreachable"));
    }

    #[test]
    fn single_agent_claims_everything() {
        let grid = Grid::from_ints(2, 2, &[0, 0, 0, 0]).unwrap();
        let labels = bfs_partition(&grid, &[(0, 0)]).unwrap();
        assert_eq!(labels.partition_sizes(1), vec![4]);
    }
}

#[cfg(test)]
mod darp {
    use mcpp_core::PlannerRng;

    use crate::darp_partition;
    use mcpp_core::Grid;

    #[test]
    fn balances_empty_square_between_two_seeds() {
        let grid = Grid::from_ints(4, 4, &[0; 16]).unwrap();
        let mut rng = PlannerRng::new(42069);
        let labels = darp_partition(&grid, &[(0, 0), (3, 3)], Some(2000), &mut rng).unwrap();
        let sizes = labels.partition_sizes(2);
        assert_eq!(sizes.iter().sum::<usize>(), 16);
        assert!((sizes[0] as i64 - sizes[1] as i64).abs() <= 1);
    }
}

#[cfg(test)]
mod distance_transform {
    use crate::distance_transform::distance_transform;

    #[test]
    fn zero_at_mask_cells() {
        let mask = [true, false, false, false];
        let d = distance_transform(&mask, 2, 2);
        assert!(d[0] < 1e-9);
    }

    #[test]
    fn grows_with_distance_from_corner() {
        let mask = vec![
            true, false, false, //
            false, false, false, //
            false, false, false,
        ];
        let d = distance_transform(&mask, 3, 3);
        // (2,2) is farther from the top-left mask cell than (0,1).
        assert!(d[2 * 3 + 2] > d[0 * 3 + 1]);
        assert!((d[0] - 0.0).abs() < 1e-9);
        assert!((d[1] - 1.0).abs() < 1e-9);
    }
}
