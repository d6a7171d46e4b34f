use mcpp_core::{CellKind, Grid};

use crate::bench::{trajectory_length, BenchmarkRow};
use crate::facade::ContinuousPlannerBuilder;
use crate::naming::generate_name;
use crate::persist::{color_for_index, Snapshot};

fn open_grid() -> Grid {
    Grid::new(4, 6, vec![CellKind::Free; 24]).unwrap()
}

#[cfg(test)]
mod facade {
    use super::*;

    #[test]
    fn plan_covers_every_free_cell_with_well_formed_trajectories() {
        let grid = open_grid();
        let mut planner = ContinuousPlannerBuilder::new(grid)
            .agent("UAV-1", Some((0, 0)))
            .agent("UAV-2", Some((3, 5)))
            .build()
            .unwrap();

        planner.plan().unwrap();
        assert_eq!(planner.n(), 2);
        let sizes = planner.labels().partition_sizes(planner.n());
        assert_eq!(sizes.iter().sum::<usize>(), planner.grid().free_count());
        for agent in planner.agents() {
            assert!(!agent.trajectory().is_empty());
        }
    }

    #[test]
    fn unseeded_agents_get_distinct_seeds() {
        let grid = open_grid();
        let planner = ContinuousPlannerBuilder::new(grid)
            .agent("UAV-1", None)
            .agent("UAV-2", None)
            .agent("UAV-3", None)
            .build()
            .unwrap();

        let seeds: Vec<_> = planner.agents().iter().map(|a| a.seed()).collect();
        let mut unique = seeds.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), seeds.len(), "no two agents should share a seed cell");
    }

    #[test]
    fn add_then_remove_round_trips() {
        let grid = open_grid();
        let mut planner =
            ContinuousPlannerBuilder::new(grid).agent("UAV-1", Some((0, 0))).agent("UAV-2", Some((3, 5))).build().unwrap();
        planner.plan().unwrap();

        planner.handle_new_uav("UAV-3").unwrap();
        assert_eq!(planner.n(), 3);

        planner.handle_removed_uav("UAV-2").unwrap();
        assert_eq!(planner.n(), 2);
        assert!(planner.agents().iter().any(|a| a.name() == "UAV-1"));
        assert!(planner.agents().iter().any(|a| a.name() == "UAV-3"));
    }

    #[test]
    fn removing_an_unknown_name_fails() {
        let grid = open_grid();
        let mut planner = ContinuousPlannerBuilder::new(grid).agent("UAV-1", Some((0, 0))).build().unwrap();
        assert!(planner.handle_removed_uav("no-such-uav").is_err());
    }
}

#[cfg(test)]
mod naming {
    use super::*;
    use mcpp_core::PlannerRng;

    #[test]
    fn generated_names_match_the_reference_shape() {
        let mut rng = PlannerRng::default();
        for _ in 0..20 {
            let name = generate_name(&mut rng);
            assert!(name.starts_with("UAV-"));
            let digits = &name["UAV-".len()..];
            assert_eq!(digits.len(), 6);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

#[cfg(test)]
mod bench {
    use super::*;

    #[test]
    fn trajectory_length_of_a_unit_square_is_its_perimeter() {
        let square = vec![(0, 0), (0, 1), (1, 1), (1, 0)];
        assert!((trajectory_length(&square) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn trajectory_length_of_an_empty_trajectory_is_zero() {
        assert_eq!(trajectory_length(&[]), 0.0);
    }

    #[test]
    fn row_formats_pipe_joined_fields() {
        let row = BenchmarkRow::new("map.txt", 3, "BFS", "Transfer", true, 0.125, &[4.0, 5.5], &[10, 14]);
        assert_eq!(row.trajectory_lengths, "4.0000|5.5000");
        assert_eq!(row.assignment_counts, "10|14");
    }
}

#[cfg(test)]
mod persist {
    use super::*;

    #[test]
    fn color_palette_cycles_past_eight_agents() {
        assert_eq!(color_for_index(0), color_for_index(8));
        assert_ne!(color_for_index(0), color_for_index(1));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let grid = open_grid();
        let mut planner =
            ContinuousPlannerBuilder::new(grid).agent("UAV-1", Some((0, 0))).agent("UAV-2", Some((3, 5))).build().unwrap();
        planner.plan().unwrap();

        let snapshot = Snapshot::build(planner.agents(), planner.labels());
        let json = serde_json::to_string(&snapshot).unwrap();
        let reloaded: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.uavs.len(), 2);
        assert_eq!(reloaded.map.len(), planner.grid().height());
        assert_eq!(reloaded.map[0].len(), planner.grid().width());
    }
}

#[cfg(test)]
mod text_io {
    use crate::io::text::{format_grid, parse_grid};

    #[test]
    fn round_trips_through_text_format() {
        let grid = super::open_grid();
        let text = format_grid(&grid, ',');
        let parsed = parse_grid(&text, ',').unwrap();
        assert_eq!(parsed.height(), grid.height());
        assert_eq!(parsed.width(), grid.width());
        assert_eq!(parsed.free_count(), grid.free_count());
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(parse_grid("0,0,0\n0,0\n", ',').is_err());
    }
}
