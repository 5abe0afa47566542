//! DE generational loop.
//!
//! [`DeRunner`] orchestrates initialization → mutation → reflection →
//! recombination → evaluation → positional survivor selection, tracking the
//! incumbent best across generations.

use rand::rngs::StdRng;

use super::config::DeConfig;
use super::operators::{
    binomial_recombination, differential_mutation, draw_distinct, reflect_into_bounds,
    select_survivors,
};
use crate::population::{evaluate_population, Individual, Population};
use crate::problem::Objective;
use crate::random::create_rng;

/// Result of a DE optimization run.
#[derive(Debug, Clone)]
pub struct DeResult {
    /// The best individual recorded during the entire run.
    pub best: Individual,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub iterations: usize,

    /// Whether the run stopped by reaching the convergence threshold.
    pub converged: bool,

    /// Incumbent fitness per generation; the first entry covers the
    /// initial population. Non-increasing by construction.
    pub fitness_history: Vec<f64>,

    /// Final population, sorted best first.
    pub population: Population,
}

/// Executes the DE generational loop.
///
/// # Usage
///
/// ```
/// use evosolve::de::{DeConfig, DeRunner};
/// use evosolve::problem::Benchmark;
///
/// let config = DeConfig::default().with_max_iterations(20).with_seed(7);
/// let result = DeRunner::run(&Benchmark::Sphere, &config);
/// assert!(result.best_fitness.is_finite());
/// ```
pub struct DeRunner;

impl DeRunner {
    /// Runs the optimization.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`DeConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<O: Objective>(objective: &O, config: &DeConfig) -> DeResult {
        config.validate().expect("invalid DeConfig");

        let mut rng: StdRng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let bounds = objective.bounds(config.n_variables);
        let mut population = Population::random(config.population_size, &bounds, &mut rng);
        evaluate_population(objective, population.individuals_mut(), config.parallel);
        population.sort_ascending();

        let mut best =
            objective.best(&population).expect("population must not be empty").clone();
        let mut fitness_history = Vec::with_capacity(config.max_iterations + 1);
        fitness_history.push(best.fitness());

        let mut iterations = 0;
        while iterations < config.max_iterations && best.fitness() > config.convergence_threshold
        {
            iterations += 1;

            // All randomness for this generation is consumed here, before
            // evaluation is dispatched.
            let mut offspring = Vec::with_capacity(config.population_size);
            for i in 0..config.population_size {
                let [base, diff1, diff2] = draw_distinct(population.len(), &mut rng);
                let mut trial = differential_mutation(
                    population.get(base),
                    population.get(diff1),
                    population.get(diff2),
                    config.scale_factor,
                );
                reflect_into_bounds(&mut trial, &bounds);
                binomial_recombination(
                    &mut trial,
                    population.get(i),
                    config.crossover_probability,
                    &mut rng,
                );
                offspring.push(trial);
            }

            evaluate_population(objective, &mut offspring, config.parallel);
            select_survivors(&mut population, offspring);
            population.sort_ascending();

            let generation_best =
                objective.best(&population).expect("population must not be empty");
            if generation_best.fitness() < best.fitness() {
                best = generation_best.clone();
            }
            fitness_history.push(best.fitness());
            objective.on_generation(iterations, best.fitness());
        }

        DeResult {
            best_fitness: best.fitness(),
            converged: best.fitness() <= config.convergence_threshold,
            iterations,
            fitness_history,
            population,
            best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Benchmark;

    #[test]
    fn test_sphere_converges() {
        let config = DeConfig::default()
            .with_n_variables(2)
            .with_population_size(50)
            .with_max_iterations(400)
            .with_scale_factor(0.5)
            .with_crossover_probability(0.5)
            .with_seed(42);

        let result = DeRunner::run(&Benchmark::Sphere, &config);
        assert!(
            result.best_fitness < 1e-6,
            "expected near-zero fitness on the 2D quadratic bowl, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_incumbent_is_monotone() {
        let config = DeConfig::default().with_max_iterations(100).with_seed(1);
        let result = DeRunner::run(&Benchmark::Rastrigin, &config);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "incumbent regressed: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.best_fitness, *result.fitness_history.last().unwrap());
    }

    #[test]
    fn test_population_size_is_invariant() {
        let config = DeConfig::default()
            .with_population_size(30)
            .with_max_iterations(25)
            .with_seed(3);
        let result = DeRunner::run(&Benchmark::Rosenbrock, &config);
        assert_eq!(result.population.len(), 30);
        assert!(result.population.iter().all(|ind| ind.is_evaluated()));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let config = DeConfig::default().with_max_iterations(60).with_seed(2024);
        let a = DeRunner::run(&Benchmark::Rastrigin, &config);
        let b = DeRunner::run(&Benchmark::Rastrigin, &config);
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.best.variables(), b.best.variables());
    }

    #[test]
    fn test_threshold_stops_early() {
        let config = DeConfig::default()
            .with_max_iterations(10_000)
            .with_convergence_threshold(1e-3)
            .with_seed(5);
        let result = DeRunner::run(&Benchmark::Sphere, &config);
        assert!(result.converged);
        assert!(result.iterations < 10_000);
        // The check runs at the top of the loop against the recorded
        // incumbent, so the final entry is at or below the threshold.
        assert!(result.best_fitness <= 1e-3);
    }

    #[test]
    fn test_best_matches_population_incumbent() {
        let config = DeConfig::default().with_max_iterations(50).with_seed(9);
        let result = DeRunner::run(&Benchmark::Schwefel, &config);
        let population_best = result.population.best().unwrap().fitness();
        assert_eq!(result.best_fitness, population_best);
    }

    #[test]
    #[should_panic(expected = "invalid DeConfig")]
    fn test_invalid_config_panics() {
        let config = DeConfig::default().with_population_size(0);
        DeRunner::run(&Benchmark::Sphere, &config);
    }
}
