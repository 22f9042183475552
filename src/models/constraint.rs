//! Pairwise precedence constraints between tasks.
//!
//! Defines the two relation directions a valid schedule must satisfy:
//! `before` (the task's run ends no later than the other's begins) and
//! `after` (the task's run begins no earlier than the other's ends).
//! Relations compare slot indices within a day; the day a task lands on
//! does not enter the comparison.
//!
//! # Reference
//! Mackworth (1977), "Consistency in Networks of Relations"

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ProblemError;

/// Direction of a pairwise precedence relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// The owning task's end slot must not exceed the other's start slot.
    Before,
    /// The owning task's start slot must not precede the other's end slot.
    After,
}

impl Relation {
    /// Evaluates the relation at a concrete pair of start slots.
    ///
    /// `start`/`slots` describe the owning task, `other_start`/`other_slots`
    /// the referenced one.
    #[inline]
    pub fn holds(self, start: usize, slots: usize, other_start: usize, other_slots: usize) -> bool {
        match self {
            Relation::Before => start + slots <= other_start,
            Relation::After => start >= other_start + other_slots,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Before => write!(f, "before"),
            Relation::After => write!(f, "after"),
        }
    }
}

impl FromStr for Relation {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(Relation::Before),
            "after" => Ok(Relation::After),
            other => Err(ProblemError::UnknownRelation(other.to_string())),
        }
    }
}

/// A directed precedence constraint between two named tasks.
///
/// Tasks are referenced by name rather than by list position, so the
/// constraint stays valid if the input order changes. References are
/// checked when the [`Problem`](super::Problem) is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Name of the constrained task.
    pub task: String,
    /// Relation direction.
    pub relation: Relation,
    /// Name of the task the relation refers to.
    pub other: String,
}

impl Constraint {
    /// Creates a constraint with an explicit relation.
    pub fn new(task: impl Into<String>, relation: Relation, other: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            relation,
            other: other.into(),
        }
    }

    /// Creates a `task before other` constraint.
    pub fn before(task: impl Into<String>, other: impl Into<String>) -> Self {
        Self::new(task, Relation::Before, other)
    }

    /// Creates a `task after other` constraint.
    pub fn after(task: impl Into<String>, other: impl Into<String>) -> Self {
        Self::new(task, Relation::After, other)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.task, self.relation, self.other)
    }
}
