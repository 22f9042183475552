//! Arc-consistency filter (AC-3).
//!
//! Prunes each task's candidate start slots before search: a slot
//! survives only if, for every constrained neighbor, some slot in the
//! neighbor's domain satisfies every constraint between the two tasks.
//! Pruning never removes a slot that appears in a globally consistent
//! solution, so it shrinks the search space without changing the set of
//! feasible schedules.
//!
//! # Reference
//! Mackworth (1977), "Consistency in Networks of Relations"

use std::collections::VecDeque;

use log::{debug, trace};

use crate::models::Problem;

use super::Domains;

/// Enforces arc consistency over all constrained task pairs.
///
/// Only pairs related by at least one constraint are enqueued;
/// unconstrained pairs revise trivially and are skipped.
///
/// Returns `false` if some task's domain was emptied — no solution can
/// exist and the caller should skip the search.
pub fn enforce(problem: &Problem, domains: &mut Domains) -> bool {
    let mut queue: VecDeque<(usize, usize)> = problem.related_pairs().collect();

    while let Some((task, other)) = queue.pop_front() {
        if !revise(problem, domains, task, other) {
            continue;
        }
        if domains.get(task).is_empty() {
            debug!(
                "domain of {} emptied during arc-consistency filtering",
                problem.tasks()[task].name
            );
            return false;
        }
        // The shrunken domain may invalidate support for other neighbors.
        for neighbor in problem.neighbors(task) {
            if neighbor != other {
                queue.push_back((neighbor, task));
            }
        }
    }

    true
}

/// Removes from `task`'s domain every start slot with no support in
/// `other`'s domain. Returns whether the domain changed.
///
/// A slot `v` is supported iff some slot `w` of `other` satisfies every
/// constraint between the two tasks evaluated at `(v, w)`.
fn revise(problem: &Problem, domains: &mut Domains, task: usize, other: usize) -> bool {
    let other_domain = domains.get(other).to_vec();
    domains.retain(task, |v| {
        let supported = other_domain
            .iter()
            .any(|&w| problem.pair_satisfied(task, v, other, w));
        if !supported {
            trace!(
                "pruned start slot {v} of {} against {}",
                problem.tasks()[task].name,
                problem.tasks()[other].name
            );
        }
        supported
    })
}
