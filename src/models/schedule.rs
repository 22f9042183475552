//! Schedule (solution) model.
//!
//! A schedule is the outcome of a successful search: one placement per
//! task on the weekly grid, plus the names of any tasks that were left
//! unplaced. Provides the `(day, slot) → task` projection a renderer
//! needs, and a day-by-day `Display` listing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A task-to-grid assignment.
///
/// Records that a task occupies `[start, end)` on `day`. Slot indices
/// are within-day positions, `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned task name.
    pub task: String,
    /// Day index (0-based).
    pub day: usize,
    /// First occupied slot.
    pub start: usize,
    /// One past the last occupied slot.
    pub end: usize,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(task: impl Into<String>, day: usize, start: usize, end: usize) -> Self {
        Self {
            task: task.into(),
            day,
            start,
            end,
        }
    }

    /// Number of slots occupied.
    #[inline]
    pub fn slots(&self) -> usize {
        self.end - self.start
    }
}

/// A complete or partial solution to a scheduling problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Task assignments, in problem task order.
    pub assignments: Vec<Assignment>,
    /// Names of tasks that could not be placed.
    pub unplaced: Vec<String>,
    /// Number of days in the grid the schedule was built on.
    pub days: usize,
    /// Number of slots per day in that grid.
    pub slots_per_day: usize,
}

impl Schedule {
    /// Creates an empty schedule for a grid of the given shape.
    pub fn new(days: usize, slots_per_day: usize) -> Self {
        Self {
            assignments: Vec::new(),
            unplaced: Vec::new(),
            days,
            slots_per_day,
        }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether every task was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// The assignment for a task, if it was placed.
    pub fn assignment_for(&self, task: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task == task)
    }

    /// Assignments on a given day, in slot order.
    pub fn assignments_for_day(&self, day: usize) -> Vec<&Assignment> {
        let mut on_day: Vec<_> = self.assignments.iter().filter(|a| a.day == day).collect();
        on_day.sort_by_key(|a| a.start);
        on_day
    }

    /// The task occupying a cell, or `None` if the cell is free.
    pub fn task_at(&self, day: usize, slot: usize) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.day == day && a.start <= slot && slot < a.end)
            .map(|a| a.task.as_str())
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in 0..self.days {
            writeln!(f, "Day {}:", day + 1)?;
            let on_day = self.assignments_for_day(day);
            if on_day.is_empty() {
                writeln!(f, "  (free)")?;
                continue;
            }
            for assignment in on_day {
                writeln!(
                    f,
                    "  [{:>2}-{:>2}) {}",
                    assignment.start, assignment.end, assignment.task
                )?;
            }
        }
        if !self.unplaced.is_empty() {
            writeln!(f, "Unplaced: {}", self.unplaced.join(", "))?;
        }
        Ok(())
    }
}
