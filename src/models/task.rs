//! Task model.
//!
//! A task is a named unit of work that occupies a fixed run of
//! consecutive slots within a single day of the weekly grid.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 6 (CSP variables and domains)

use serde::{Deserialize, Serialize};

/// A fixed-length task to be placed on the weekly grid.
///
/// The descriptor is immutable: mutable solving state (candidate start
/// slots, the chosen placement) lives in the solver, not on the task.
///
/// # Slot Representation
/// All positions are slot indices within a day, starting at 0. The
/// consumer defines what a slot means (e.g., one hour of a 24-slot day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task name.
    pub name: String,
    /// Number of consecutive slots the task occupies.
    pub slots: usize,
}

impl Task {
    /// Creates a new task occupying `slots` consecutive slots.
    pub fn new(name: impl Into<String>, slots: usize) -> Self {
        Self {
            name: name.into(),
            slots,
        }
    }

    /// Start slots at which this task fits within the daily capacity bound.
    ///
    /// Every start slot `s` with `s + slots <= capacity_bound`, ascending.
    /// Empty when the task is longer than the bound — no placement can
    /// exist and the problem is infeasible before any search.
    pub fn initial_domain(&self, capacity_bound: usize) -> Vec<usize> {
        if self.slots == 0 || self.slots > capacity_bound {
            return Vec::new();
        }
        (0..=capacity_bound - self.slots).collect()
    }
}

/// A concrete position on the grid: day index and start slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Day index (0-based).
    pub day: usize,
    /// Start slot within the day (0-based).
    pub start: usize,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(day: usize, start: usize) -> Self {
        Self { day, start }
    }

    /// End slot (exclusive) of a task of the given length placed here.
    #[inline]
    pub fn end(&self, slots: usize) -> usize {
        self.start + slots
    }
}
