//! Weekly timetable constraint solver.
//!
//! Places fixed-length tasks on a fixed weekly slot grid so that every
//! task appears exactly once, no two tasks overlap, runs end within a
//! per-day capacity bound, and pairwise precedence constraints
//! (`before` / `after`) hold. Solving combines an arc-consistency
//! (AC-3) pass that prunes impossible start slots with a deterministic
//! backtracking search over the pruned domains, bounded by a placement
//! attempt budget.
//!
//! The crate returns the first feasible assignment, not an optimal one.
//! File and CLI handling belong to the consumer; the model types derive
//! `serde` traits for structured input and output.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `Constraint`, `Problem`,
//!   `Schedule`, `Assignment`, `Placement`
//! - **`grid`**: `WeekGrid`, the day × slot occupancy matrix
//! - **`solver`**: AC-3 domain filtering and backtracking search
//! - **`generator`**: Random problem generation for testing and demos
//!
//! # Example
//!
//! ```
//! use weekplan::models::{Constraint, Problem, Task};
//! use weekplan::solver::Solver;
//!
//! let problem = Problem::new(
//!     vec![Task::new("draft", 2), Task::new("edit", 1)],
//!     vec![Constraint::before("draft", "edit")],
//! )
//! .unwrap();
//!
//! let outcome = Solver::new().solve(&problem);
//! assert!(outcome.is_solved());
//! println!("{}", outcome.schedule().unwrap());
//! ```
//!
//! # References
//!
//! - Mackworth (1977), "Consistency in Networks of Relations"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Dechter (2003), "Constraint Processing"

pub mod generator;
pub mod grid;
pub mod models;
pub mod solver;
