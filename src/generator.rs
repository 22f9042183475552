//! Synthetic problem generation.
//!
//! Produces random task sets for exercising the solver: task lengths
//! are drawn uniformly until a target slot load is reached, and each
//! task after the first may be constrained `before` or `after` a
//! randomly chosen earlier task. Generated problems always pass
//! [`Problem`] validation — references point at existing tasks and are
//! never self-referential.
//!
//! Randomness comes from a caller-supplied [`rand::Rng`], so seeded
//! generators reproduce the same problem.

use rand::Rng;

use crate::models::{Constraint, Problem, Relation, Task};

/// Parameters for random problem generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Total slot load to generate across all tasks.
    ///
    /// Defaults to 84 — seven days at the default 12-slot capacity
    /// bound.
    pub target_load: usize,
    /// Maximum length of a single task, in slots.
    pub max_task_slots: usize,
    /// Probability that a task is constrained against an earlier task.
    pub constraint_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_load: 84,
            max_task_slots: 8,
            constraint_probability: 0.5,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total slot load.
    pub fn with_target_load(mut self, target_load: usize) -> Self {
        self.target_load = target_load;
        self
    }

    /// Sets the maximum task length.
    pub fn with_max_task_slots(mut self, max_task_slots: usize) -> Self {
        self.max_task_slots = max_task_slots;
        self
    }

    /// Sets the probability of attaching a constraint to a task.
    pub fn with_constraint_probability(mut self, probability: f64) -> Self {
        self.constraint_probability = probability;
        self
    }
}

/// Generates a random, valid problem totalling exactly
/// `config.target_load` slots.
///
/// The last task is clamped so the load lands exactly on the target.
pub fn generate<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Problem {
    let mut tasks = Vec::new();
    let mut constraints = Vec::new();
    let mut load = 0;

    while load < config.target_load {
        let remaining = config.target_load - load;
        let slots = rng
            .random_range(1..=config.max_task_slots.max(1))
            .min(remaining);
        load += slots;

        let name = format!("Task {}", tasks.len() + 1);
        if !tasks.is_empty() && rng.random_bool(config.constraint_probability) {
            let other: &Task = &tasks[rng.random_range(0..tasks.len())];
            let relation = if rng.random_bool(0.5) {
                Relation::Before
            } else {
                Relation::After
            };
            constraints.push(Constraint::new(&name, relation, &other.name));
        }
        tasks.push(Task::new(name, slots));
    }

    Problem::new(tasks, constraints).expect("generated problems reference only existing tasks")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_load_matches_target() {
        let mut rng = SmallRng::seed_from_u64(42);
        let problem = generate(&GeneratorConfig::default(), &mut rng);

        let load: usize = problem.tasks().iter().map(|t| t.slots).sum();
        assert_eq!(load, 84);
    }

    #[test]
    fn test_task_lengths_bounded() {
        let mut rng = SmallRng::seed_from_u64(7);
        let config = GeneratorConfig::new().with_max_task_slots(3);
        let problem = generate(&config, &mut rng);

        assert!(problem.tasks().iter().all(|t| (1..=3).contains(&t.slots)));
    }

    #[test]
    fn test_constraints_reference_earlier_tasks() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = GeneratorConfig::new().with_constraint_probability(1.0);
        let problem = generate(&config, &mut rng);

        assert!(!problem.constraints().is_empty());
        for constraint in problem.constraints() {
            let task = problem.task_index(&constraint.task).unwrap();
            let other = problem.task_index(&constraint.other).unwrap();
            assert!(other < task);
        }
    }

    #[test]
    fn test_no_constraints_when_probability_zero() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = GeneratorConfig::new().with_constraint_probability(0.0);
        let problem = generate(&config, &mut rng);
        assert!(problem.constraints().is_empty());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = GeneratorConfig::default();
        let a = generate(&config, &mut SmallRng::seed_from_u64(9));
        let b = generate(&config, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a.tasks(), b.tasks());
        assert_eq!(a.constraints(), b.constraints());
    }
}
