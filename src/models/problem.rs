//! Validated problem instance.
//!
//! Bundles tasks and constraints into an immutable, checked description
//! of one scheduling problem. Construction detects:
//! - Duplicate task names
//! - Zero-length tasks
//! - Constraints referencing unknown tasks
//! - Self-referential constraints
//!
//! All violations are collected and reported together rather than
//! stopping at the first.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use thiserror::Error;

use super::{Constraint, Relation, Task};

/// An input error detected while constructing a [`Problem`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// Two tasks share the same name.
    #[error("duplicate task name: {0}")]
    DuplicateTask(String),
    /// A task requires zero slots.
    #[error("task {0} has a zero slot requirement")]
    EmptyTask(String),
    /// A constraint references a task that does not exist.
    #[error("constraint references unknown task: {0}")]
    UnknownTask(String),
    /// A constraint relates a task to itself.
    #[error("constraint on {0} references itself")]
    SelfReference(String),
    /// A relation keyword could not be parsed.
    #[error("unknown relation keyword: {0}")]
    UnknownRelation(String),
}

/// A constraint with task names resolved to task indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    task: usize,
    relation: Relation,
    other: usize,
}

/// An immutable, validated scheduling problem.
///
/// Owns the task list (which fixes the search's variable order) and the
/// precedence constraints, with name references resolved up front.
/// Mutable solving state — candidate domains, the occupancy grid, the
/// placement trail — lives in the solver, never here.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    tasks: Vec<Task>,
    constraints: Vec<Constraint>,
    #[serde(skip)]
    links: Vec<Link>,
    #[serde(skip)]
    neighbors: Vec<BTreeSet<usize>>,
}

impl Problem {
    /// Validates the inputs and builds a problem instance.
    ///
    /// # Returns
    /// `Ok(problem)` if all checks pass, `Err(errors)` with every
    /// detected issue otherwise.
    pub fn new(tasks: Vec<Task>, constraints: Vec<Constraint>) -> Result<Self, Vec<ProblemError>> {
        let mut errors = Vec::new();

        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, task) in tasks.iter().enumerate() {
            if task.slots == 0 {
                errors.push(ProblemError::EmptyTask(task.name.clone()));
            }
            if index.insert(task.name.as_str(), i).is_some() {
                errors.push(ProblemError::DuplicateTask(task.name.clone()));
            }
        }

        let mut links = Vec::with_capacity(constraints.len());
        for constraint in &constraints {
            if constraint.task == constraint.other {
                errors.push(ProblemError::SelfReference(constraint.task.clone()));
                continue;
            }
            let task = index.get(constraint.task.as_str()).copied();
            let other = index.get(constraint.other.as_str()).copied();
            if task.is_none() {
                errors.push(ProblemError::UnknownTask(constraint.task.clone()));
            }
            if other.is_none() {
                errors.push(ProblemError::UnknownTask(constraint.other.clone()));
            }
            if let (Some(task), Some(other)) = (task, other) {
                links.push(Link {
                    task,
                    relation: constraint.relation,
                    other,
                });
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut neighbors = vec![BTreeSet::new(); tasks.len()];
        for link in &links {
            neighbors[link.task].insert(link.other);
            neighbors[link.other].insert(link.task);
        }

        Ok(Self {
            tasks,
            constraints,
            links,
            neighbors,
        })
    }

    /// The tasks, in input order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The constraints, in input order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Index of the task with the given name.
    pub fn task_index(&self, name: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.name == name)
    }

    /// Tasks related to `task` by at least one constraint, in either
    /// direction.
    pub fn neighbors(&self, task: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors[task].iter().copied()
    }

    /// Ordered task pairs `(i, j)` related by at least one constraint.
    ///
    /// Each constrained pair appears in both orientations, since either
    /// end may lose domain values during filtering.
    pub fn related_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(i, set)| set.iter().map(move |&j| (i, j)))
    }

    /// Whether every constraint between tasks `a` and `b` holds when `a`
    /// starts at slot `start_a` and `b` starts at slot `start_b`.
    ///
    /// Constraints involving other task pairs are ignored. Evaluation
    /// uses concrete start and end slots on both sides.
    pub fn pair_satisfied(&self, a: usize, start_a: usize, b: usize, start_b: usize) -> bool {
        self.links.iter().all(|link| {
            if link.task == a && link.other == b {
                link.relation
                    .holds(start_a, self.tasks[a].slots, start_b, self.tasks[b].slots)
            } else if link.task == b && link.other == a {
                link.relation
                    .holds(start_b, self.tasks[b].slots, start_a, self.tasks[a].slots)
            } else {
                true
            }
        })
    }
}
