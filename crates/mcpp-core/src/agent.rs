//! The `Agent` entity: identity, seed cell, and cyclic coverage trajectory.

use crate::label::Cell;

/// A single UAV: an opaque name, a pinned seed cell, and the cyclic
/// trajectory STC writes into it.
///
/// `position` always equals `trajectory[cursor]`; callers that want to
/// advance the agent along its trajectory use [`Agent::step`].
#[derive(Clone, Debug)]
pub struct Agent {
    name: String,
    seed: Cell,
    trajectory: Vec<Cell>,
    cursor: usize,
}

impl Agent {
    /// A freshly seeded agent with no trajectory yet (STC has not run).
    pub fn new(name: impl Into<String>, seed: Cell) -> Self {
        Agent { name: name.into(), seed, trajectory: vec![seed], cursor: 0 }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn seed(&self) -> Cell {
        self.seed
    }

    #[inline]
    pub fn position(&self) -> Cell {
        self.trajectory[self.cursor]
    }

    #[inline]
    pub fn trajectory(&self) -> &[Cell] {
        &self.trajectory
    }

    /// Replace the trajectory after a (re)plan. The cursor resets to the
    /// position in the new trajectory matching the seed cell, falling back
    /// to `0` if the seed is for some reason absent (it never should be —
    /// STC always produces a cycle that includes the seed).
    pub fn set_trajectory(&mut self, trajectory: Vec<Cell>) {
        debug_assert!(!trajectory.is_empty(), "STC must produce a non-empty cyclic trajectory");
        self.cursor = trajectory.iter().position(|&c| c == self.seed).unwrap_or(0);
        self.trajectory = trajectory;
    }

    /// Advance one step along the cyclic trajectory.
    pub fn step(&mut self) {
        self.cursor = (self.cursor + 1) % self.trajectory.len();
    }
}
