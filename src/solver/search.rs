//! Backtracking placement search.
//!
//! Depth-first assignment of tasks to grid placements over the pruned
//! domains. Tasks are taken in input order; for each, days are tried
//! ascending and candidate start slots ascending, so the first solution
//! found is deterministic for a given problem and configuration.
//!
//! Every placement is undone on backtrack, including when the attempt
//! budget runs out, so a finished search always leaves the grid in a
//! consistent state: fully populated on success, fully unwound on
//! failure.

use log::trace;

use crate::grid::WeekGrid;
use crate::models::{Assignment, Placement, Problem, Schedule};

use super::Domains;

/// Terminal state of one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SearchResult {
    /// Every task is placed.
    Solved,
    /// All branches were explored without a full assignment.
    Exhausted,
    /// The placement attempt budget ran out mid-search.
    BudgetExceeded,
}

/// Mutable state threaded through the recursion: the grid, the chosen
/// placements, the trail of placement order, and the attempt counter.
pub(super) struct SearchState<'a> {
    problem: &'a Problem,
    domains: &'a Domains,
    grid: WeekGrid,
    placements: Vec<Option<Placement>>,
    trail: Vec<(usize, Placement)>,
    attempts: usize,
    max_attempts: usize,
}

impl<'a> SearchState<'a> {
    pub(super) fn new(
        problem: &'a Problem,
        domains: &'a Domains,
        grid: WeekGrid,
        max_attempts: usize,
    ) -> Self {
        Self {
            problem,
            domains,
            grid,
            placements: vec![None; problem.task_count()],
            trail: Vec::with_capacity(problem.task_count()),
            attempts: 0,
            max_attempts,
        }
    }

    /// Placement attempts performed so far.
    pub(super) fn attempts(&self) -> usize {
        self.attempts
    }

    /// Runs the search to a terminal state.
    pub(super) fn run(&mut self) -> SearchResult {
        let result = self.search();
        debug_assert!(
            result == SearchResult::Solved || self.trail.is_empty(),
            "failed search must leave the grid unwound"
        );
        result
    }

    fn search(&mut self) -> SearchResult {
        let Some(task) = self.next_unplaced() else {
            return SearchResult::Solved;
        };
        let slots = self.problem.tasks()[task].slots;

        for day in 0..self.grid.days() {
            for &start in self.domains.get(task) {
                if !self.grid.can_place(day, start, slots) {
                    continue;
                }
                if !self.consistent(task, start) {
                    continue;
                }
                if self.attempts == self.max_attempts {
                    return SearchResult::BudgetExceeded;
                }
                self.attempts += 1;

                let placement = Placement::new(day, start);
                self.grid.place(day, start, slots, task);
                self.placements[task] = Some(placement);
                self.trail.push((task, placement));
                trace!(
                    "placed {} at day {day} slot {start}",
                    self.problem.tasks()[task].name
                );

                let result = self.search();
                if result == SearchResult::Solved {
                    return result;
                }

                // Backtrack: undo this placement before trying the next
                // candidate or propagating the budget stop upward.
                self.trail.pop();
                self.placements[task] = None;
                self.grid.unplace(day, start, slots, task);
                trace!(
                    "backtracked {} from day {day} slot {start}",
                    self.problem.tasks()[task].name
                );

                if result == SearchResult::BudgetExceeded {
                    return result;
                }
            }
        }

        SearchResult::Exhausted
    }

    /// First task without a placement, in input order.
    fn next_unplaced(&self) -> Option<usize> {
        self.placements.iter().position(Option::is_none)
    }

    /// Whether placing `task` at `start` violates any constraint against
    /// an already-placed task. Uses concrete start and end slots on both
    /// sides, never placement order.
    fn consistent(&self, task: usize, start: usize) -> bool {
        self.trail
            .iter()
            .all(|&(placed, placement)| {
                self.problem
                    .pair_satisfied(task, start, placed, placement.start)
            })
    }

    /// Converts the final state into a schedule, in task order.
    pub(super) fn into_schedule(self) -> Schedule {
        let mut schedule = Schedule::new(self.grid.days(), self.grid.slots_per_day());
        for (task, placement) in self.problem.tasks().iter().zip(&self.placements) {
            match placement {
                Some(p) => schedule.add_assignment(Assignment::new(
                    &task.name,
                    p.day,
                    p.start,
                    p.end(task.slots),
                )),
                None => schedule.unplaced.push(task.name.clone()),
            }
        }
        schedule
    }
}
