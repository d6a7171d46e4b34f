//! Persisted assignment snapshot (§6), grounded on the map-dump shape
//! consumed by `original_source/misc/viz_map_assignee.py` (`save_uavs_and_map_info`):
//! a JSON object of UAV identities/colors plus the full label grid, meant
//! for an external visual front-end rather than for reloading into a live
//! planning session.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use mcpp_core::{Agent, LabelMatrix};
use serde::{Deserialize, Serialize};

use crate::error::PlannerResult;

/// The eight-color palette `ColorManager` hands out, in the order its
/// `list.pop()` (last-in-first-out) actually assigns them — not the order
/// they're declared in `_UAV_COLORS`.
const PALETTE: [[u8; 3]; 8] = [
    [139, 139, 0],  // dark yellow
    [0, 0, 139],    // dark blue
    [0, 139, 0],    // dark green
    [139, 0, 0],    // dark red
    [139, 69, 19],  // dark brown
    [139, 0, 139],  // dark pink
    [128, 0, 128],  // dark purple
    [255, 140, 0],  // dark orange
];

/// The source raises once its fixed 8-color palette is exhausted; a
/// library serving fleets of arbitrary size just cycles it instead of
/// failing a snapshot dump over a cosmetic detail.
pub fn color_for_index(i: usize) -> [u8; 3] {
    PALETTE[i % PALETTE.len()]
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotUav {
    pub name: String,
    pub r: usize,
    pub c: usize,
    pub color: [u8; 3],
}

/// `map[r][c] = -1` for OCCUPIED, otherwise an index into `uavs`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub uavs: Vec<SnapshotUav>,
    pub map: Vec<Vec<i32>>,
}

impl Snapshot {
    pub fn build(agents: &[Agent], labels: &LabelMatrix) -> Self {
        let uavs = agents
            .iter()
            .enumerate()
            .map(|(i, agent)| {
                let (r, c) = agent.position();
                SnapshotUav { name: agent.name().to_string(), r, c, color: color_for_index(i) }
            })
            .collect();

        let (h, w) = (labels.height(), labels.width());
        let map = (0..h)
            .map(|r| {
                (0..w)
                    .map(|c| labels.get(r, c).map_or(-1, |label| label.index() as i32))
                    .collect()
            })
            .collect();

        Snapshot { uavs, map }
    }
}

pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &Snapshot) -> PlannerResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot)?;
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> PlannerResult<Snapshot> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
