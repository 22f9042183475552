//! Constraint solver: domain filtering plus backtracking search.
//!
//! Solving runs in three stages:
//!
//! 1. Build each task's initial start-slot domain from the daily
//!    capacity bound.
//! 2. Enforce arc consistency ([`ac3`]) over all constrained task
//!    pairs, pruning start slots that cannot appear in any solution.
//! 3. Depth-first backtracking search ([`search`]) over the pruned
//!    domains and the occupancy grid, bounded by an attempt budget.
//!
//! The solver returns the first feasible full assignment; it does not
//! optimize any objective.
//!
//! # References
//!
//! - Mackworth (1977), "Consistency in Networks of Relations"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern
//!   Approach", Ch. 6: Constraint Satisfaction Problems

mod ac3;
mod search;

use log::{debug, info};

use crate::grid::WeekGrid;
use crate::models::{Problem, Schedule};

use self::search::{SearchResult, SearchState};

/// Solver configuration.
///
/// Defaults match a week of hour slots with a 12-hour working day:
/// 7 days, 24 slots per day, capacity bound 12, 1000 placement attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of days in the grid.
    pub days: usize,
    /// Number of slots per day.
    pub slots_per_day: usize,
    /// Last slot index (exclusive) at which a task's run may end.
    pub capacity_bound: usize,
    /// Ceiling on placement attempts before the search gives up.
    pub max_attempts: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            days: 7,
            slots_per_day: 24,
            capacity_bound: 12,
            max_attempts: 1000,
        }
    }
}

impl SolverConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of days.
    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    /// Sets the number of slots per day.
    pub fn with_slots_per_day(mut self, slots_per_day: usize) -> Self {
        self.slots_per_day = slots_per_day;
        self
    }

    /// Sets the daily capacity bound.
    pub fn with_capacity_bound(mut self, capacity_bound: usize) -> Self {
        self.capacity_bound = capacity_bound;
        self
    }

    /// Sets the placement attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Per-task candidate start slots, indexed by task position.
///
/// Shared between the AC-3 filter (which prunes it before search) and
/// the search engine (which reads it when enumerating placements).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    values: Vec<Vec<usize>>,
}

impl Domains {
    /// Builds initial domains: every start slot at which each task fits
    /// within the capacity bound, ascending.
    pub fn initial(problem: &Problem, capacity_bound: usize) -> Self {
        Self {
            values: problem
                .tasks()
                .iter()
                .map(|task| task.initial_domain(capacity_bound))
                .collect(),
        }
    }

    /// Candidate start slots for a task, ascending.
    pub fn get(&self, task: usize) -> &[usize] {
        &self.values[task]
    }

    /// Index of the first task with an empty domain, if any.
    pub fn first_empty(&self) -> Option<usize> {
        self.values.iter().position(Vec::is_empty)
    }

    /// Keeps only the start slots satisfying `keep`. Returns whether the
    /// domain shrank.
    fn retain(&mut self, task: usize, keep: impl FnMut(usize) -> bool) -> bool {
        let mut keep = keep;
        let before = self.values[task].len();
        self.values[task].retain(|&slot| keep(slot));
        self.values[task].len() != before
    }
}

/// Outcome of one solve invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every task was placed; the schedule holds one assignment per task.
    Solved(Schedule),
    /// No feasible schedule exists. Definitive: produced by an empty
    /// initial domain, an AC-3 wipeout, or exhaustive search.
    Infeasible,
    /// The attempt budget ran out before the search space was covered.
    /// Inconclusive: a solution may or may not exist.
    BudgetExhausted {
        /// Placement attempts performed before giving up.
        attempts: usize,
    },
}

impl SolveOutcome {
    /// Whether a full schedule was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    /// The schedule, if one was found.
    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            SolveOutcome::Solved(schedule) => Some(schedule),
            _ => None,
        }
    }
}

/// Backtracking solver over a weekly capacity grid.
///
/// # Example
///
/// ```
/// use weekplan::models::{Constraint, Problem, Task};
/// use weekplan::solver::Solver;
///
/// let problem = Problem::new(
///     vec![Task::new("write", 2), Task::new("review", 1)],
///     vec![Constraint::before("write", "review")],
/// )
/// .unwrap();
///
/// let outcome = Solver::new().solve(&problem);
/// let schedule = outcome.schedule().unwrap();
/// assert_eq!(schedule.assignment_for("write").unwrap().start, 0);
/// assert!(schedule.assignment_for("review").unwrap().start >= 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with an explicit configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves the problem, returning the first feasible full assignment
    /// or a failure classification.
    ///
    /// Deterministic for a given problem and configuration: tasks are
    /// tried in input order, days ascending, start slots ascending.
    pub fn solve(&self, problem: &Problem) -> SolveOutcome {
        let mut domains = Domains::initial(problem, self.config.capacity_bound);

        if let Some(task) = domains.first_empty() {
            debug!(
                "task {} cannot fit within capacity bound {}",
                problem.tasks()[task].name,
                self.config.capacity_bound
            );
            return SolveOutcome::Infeasible;
        }

        if !ac3::enforce(problem, &mut domains) {
            return SolveOutcome::Infeasible;
        }

        let grid = WeekGrid::new(
            self.config.days,
            self.config.slots_per_day,
            self.config.capacity_bound,
        );
        let mut state = SearchState::new(problem, &domains, grid, self.config.max_attempts);

        match state.run() {
            SearchResult::Solved => {
                info!(
                    "schedule found after {} placement attempts",
                    state.attempts()
                );
                SolveOutcome::Solved(state.into_schedule())
            }
            SearchResult::Exhausted => {
                info!(
                    "search space exhausted after {} placement attempts",
                    state.attempts()
                );
                SolveOutcome::Infeasible
            }
            SearchResult::BudgetExceeded => SolveOutcome::BudgetExhausted {
                attempts: state.attempts(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Constraint, Task};

    fn solve(tasks: Vec<Task>, constraints: Vec<Constraint>) -> SolveOutcome {
        let problem = Problem::new(tasks, constraints).unwrap();
        Solver::new().solve(&problem)
    }

    #[test]
    fn test_precedence_pair() {
        // Two tasks with `A before B`: A lands at the start of day 0,
        // B immediately after A's run.
        let outcome = solve(
            vec![Task::new("A", 2), Task::new("B", 1)],
            vec![Constraint::before("A", "B")],
        );

        let schedule = outcome.schedule().unwrap();
        let a = schedule.assignment_for("A").unwrap();
        let b = schedule.assignment_for("B").unwrap();
        assert_eq!((a.day, a.start, a.end), (0, 0, 2));
        assert_eq!(b.day, 0);
        assert!(b.start >= 2);
        assert!(schedule.is_complete());
    }

    #[test]
    fn test_task_longer_than_capacity_is_infeasible() {
        // 13 slots never fit within a 12-slot capacity bound; the empty
        // initial domain is detected before any search.
        let outcome = solve(vec![Task::new("marathon", 13)], vec![]);
        assert_eq!(outcome, SolveOutcome::Infeasible);
    }

    #[test]
    fn test_ten_unit_tasks_fill_first_day() {
        let tasks: Vec<Task> = (0..10).map(|i| Task::new(format!("T{i}"), 1)).collect();
        let outcome = solve(tasks, vec![]);

        let schedule = outcome.schedule().unwrap();
        assert_eq!(schedule.assignment_count(), 10);
        for (i, assignment) in schedule.assignments.iter().enumerate() {
            assert_eq!(assignment.day, 0);
            assert_eq!(assignment.start, i);
        }
    }

    #[test]
    fn test_overfull_day_spills_to_next() {
        // Three 5-slot tasks exceed one 12-slot day; the third moves on.
        let tasks = vec![Task::new("A", 5), Task::new("B", 5), Task::new("C", 5)];
        let outcome = solve(tasks, vec![]);

        let schedule = outcome.schedule().unwrap();
        assert_eq!(schedule.assignment_for("A").unwrap().day, 0);
        assert_eq!(schedule.assignment_for("B").unwrap().day, 0);
        assert_eq!(schedule.assignment_for("C").unwrap().day, 1);
    }

    #[test]
    fn test_exhaustive_infeasibility() {
        // A single day cannot hold 15 slots of work within the 12-slot
        // bound. AC-3 leaves all domains intact (each task fits on its
        // own), so the search itself must prove infeasibility.
        let config = SolverConfig::new().with_days(1);
        let problem = Problem::new(
            vec![Task::new("A", 5), Task::new("B", 5), Task::new("C", 5)],
            vec![],
        )
        .unwrap();

        let outcome = Solver::with_config(config).solve(&problem);
        assert_eq!(outcome, SolveOutcome::Infeasible);
    }

    #[test]
    fn test_budget_exhaustion_is_distinct() {
        // Same infeasible instance, but with a budget too small to cover
        // the search space: the solver must answer "inconclusive", not
        // "no solution".
        let config = SolverConfig::new().with_days(1).with_max_attempts(3);
        let problem = Problem::new(
            vec![Task::new("A", 5), Task::new("B", 5), Task::new("C", 5)],
            vec![],
        )
        .unwrap();

        let outcome = Solver::with_config(config).solve(&problem);
        assert!(matches!(
            outcome,
            SolveOutcome::BudgetExhausted { attempts: 3 }
        ));
    }

    #[test]
    fn test_determinism() {
        let tasks = vec![
            Task::new("A", 3),
            Task::new("B", 2),
            Task::new("C", 4),
            Task::new("D", 1),
        ];
        let constraints = vec![Constraint::before("A", "C"), Constraint::after("D", "B")];

        let problem = Problem::new(tasks, constraints).unwrap();
        let first = Solver::new().solve(&problem);
        let second = Solver::new().solve(&problem);
        assert_eq!(first, second);
    }

    #[test]
    fn test_solved_schedule_satisfies_all_constraints() {
        let tasks = vec![
            Task::new("A", 2),
            Task::new("B", 3),
            Task::new("C", 1),
            Task::new("D", 2),
        ];
        let constraints = vec![
            Constraint::before("A", "B"),
            Constraint::before("B", "C"),
            Constraint::after("D", "A"),
        ];
        let problem = Problem::new(tasks, constraints.clone()).unwrap();

        let outcome = Solver::new().solve(&problem);
        let schedule = outcome.schedule().unwrap();

        for constraint in &constraints {
            let task = schedule.assignment_for(&constraint.task).unwrap();
            let other = schedule.assignment_for(&constraint.other).unwrap();
            assert!(
                constraint.relation.holds(
                    task.start,
                    task.slots(),
                    other.start,
                    other.slots()
                ),
                "violated: {constraint}"
            );
        }
    }

    #[test]
    fn test_no_cell_double_occupied() {
        let tasks: Vec<Task> = (0..8).map(|i| Task::new(format!("T{i}"), 3)).collect();
        let problem = Problem::new(tasks, vec![]).unwrap();
        let outcome = Solver::new().solve(&problem);
        let schedule = outcome.schedule().unwrap();

        for (i, a) in schedule.assignments.iter().enumerate() {
            assert_eq!(a.slots(), 3);
            assert!(a.end <= 12);
            for b in schedule.assignments.iter().skip(i + 1) {
                if a.day == b.day {
                    assert!(a.end <= b.start || b.end <= a.start);
                }
            }
        }
    }

    #[test]
    fn test_leftover_free_cells_are_normal() {
        let outcome = solve(vec![Task::new("only", 1)], vec![]);
        let schedule = outcome.schedule().unwrap();
        assert!(schedule.is_complete());
        assert_eq!(schedule.assignment_count(), 1);
    }
}
