//! GA generational loop.
//!
//! [`GaRunner`] orchestrates initialization → ranking → parent selection →
//! crossover → mutation → elitism merge, keeping the population sorted
//! worst-to-best (index 0 = worst, last index = best) through every
//! selection step and tracking the incumbent best across generations.

use rand::rngs::StdRng;
use rand::Rng;

use super::config::GaConfig;
use super::operators::{bit_flip, single_point_crossover};
use super::selection::{cumulative_line, elitism_merge, rank_probabilities};
use crate::population::{evaluate_population, Individual, Population};
use crate::problem::Objective;
use crate::random::create_rng;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best individual recorded during the entire run — never a
    /// final-generation member that regressed past the incumbent.
    pub best: Individual,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped by crossing the convergence threshold.
    pub converged: bool,

    /// Incumbent fitness per generation; the first entry covers the
    /// initial population.
    pub fitness_history: Vec<f64>,

    /// Final population, sorted worst-to-best.
    pub population: Population,
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```
/// use evosolve::ga::{GaConfig, GaRunner};
/// use evosolve::problem::Benchmark;
///
/// let config = GaConfig::default().with_max_evaluations(2_000).with_seed(7);
/// let result = GaRunner::run(&Benchmark::Rastrigin, &config);
/// assert!(result.best_fitness.is_finite());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the optimization.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<O: Objective>(objective: &O, config: &GaConfig) -> GaResult {
        config.validate().expect("invalid GaConfig");

        let mut rng: StdRng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let pop_size = config.population_size;
        let n_bits = config.bits_per_variable;
        let bounds = objective.bounds(config.n_variables);

        // Init: draw real vectors, encode genotypes, evaluate, then sort
        // worst-to-best.
        let mut population = Population::with_capacity(pop_size);
        for _ in 0..pop_size {
            let mut individual = Individual::random(&bounds, &mut rng);
            individual.encode_genotype(&bounds, n_bits);
            population.push(individual);
        }
        evaluate_population(objective, population.individuals_mut(), config.parallel);
        population.sort_descending();

        let n_generations = config.max_evaluations.saturating_sub(pop_size) / pop_size;
        let mutation_step = match config.mutation_step {
            0 => (n_generations / 3).max(1),
            step => step,
        };
        let elite_count = (config.elitism_fraction * pop_size as f64).round() as usize;
        let mut mutation_probability = config.mutation_probability;

        let mut best =
            objective.best(&population).expect("population must not be empty").clone();
        let mut fitness_history = Vec::with_capacity(n_generations + 1);
        fitness_history.push(best.fitness());

        let mut generations = 0;
        let mut converged = false;

        for generation in 0..n_generations {
            // The probability line is rebuilt fresh from the sorted
            // population each generation.
            let probabilities = rank_probabilities(pop_size, config.selection_pressure);
            let line = cumulative_line(&probabilities);

            // Decay schedule fires on generation 0 as well; no lower floor.
            if generation % mutation_step == 0 {
                mutation_probability *= 0.25;
            }

            let mut offspring = Population::with_capacity(pop_size);
            for _ in 0..pop_size / 2 {
                let (first, second) =
                    config.selection.select_parents(&population, &line, &mut rng);

                let (child1, child2) = if rng.random::<f64>() < config.crossover_probability {
                    let (mut a, mut b) = single_point_crossover(
                        population.get(first),
                        population.get(second),
                        n_bits,
                        &mut rng,
                    );
                    a.decode_genotype(&bounds, n_bits);
                    b.decode_genotype(&bounds, n_bits);
                    objective.evaluate(&mut a);
                    objective.evaluate(&mut b);
                    (a, b)
                } else {
                    // Deep copies: a child never aliases a parent's buffers.
                    (population.get(first).clone(), population.get(second).clone())
                };
                offspring.push(child1);
                offspring.push(child2);
            }

            // Mutate every child, then re-synchronize and re-evaluate at
            // the explicit sync point. All randomness is consumed before
            // evaluation is dispatched.
            for child in offspring.iter_mut() {
                bit_flip(child, mutation_probability, &mut rng);
                child.decode_genotype(&bounds, n_bits);
            }
            evaluate_population(objective, offspring.individuals_mut(), config.parallel);

            offspring.sort_descending();
            population.sort_descending();
            elitism_merge(&mut population, &offspring, elite_count, &mut rng);

            generations = generation + 1;
            let generation_best =
                objective.best(&population).expect("population must not be empty");
            if generation_best.fitness() < best.fitness() {
                best = generation_best.clone();
            }
            fitness_history.push(best.fitness());
            objective.on_generation(generations, best.fitness());

            if best.fitness() < config.convergence_threshold {
                converged = true;
                break;
            }
        }

        GaResult {
            best_fitness: best.fitness(),
            converged,
            generations,
            fitness_history,
            population,
            best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use crate::problem::Benchmark;

    #[test]
    fn test_rastrigin_terminates_with_true_incumbent() {
        let config = GaConfig::default()
            .with_n_variables(2)
            .with_population_size(100)
            .with_bits_per_variable(16)
            .with_elitism_fraction(0.65)
            .with_seed(42);

        let n_generations = (config.max_evaluations - config.population_size)
            / config.population_size;
        let result = GaRunner::run(&Benchmark::Rastrigin, &config);

        // Stops either by convergence or by exhausting the budget.
        assert!(result.converged || result.generations == n_generations);
        if result.converged {
            assert!(result.best_fitness < 1e-4);
        }
        // The reported best is the run's incumbent minimum.
        let history_min = result
            .fitness_history
            .iter()
            .cloned()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_fitness, history_min);
    }

    #[test]
    fn test_incumbent_never_regresses() {
        let config = GaConfig::default().with_max_evaluations(3_000).with_seed(9);
        let result = GaRunner::run(&Benchmark::Rastrigin, &config);
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
        let config = GaConfig::default()
            .with_population_size(40)
            .with_max_evaluations(2_000)
            .with_convergence_threshold(0.0)
            .with_seed(3);
        let result = GaRunner::run(&Benchmark::Sphere, &config);
        assert_eq!(result.population.len(), 40);
        assert!(result.population.iter().all(|ind| ind.is_evaluated()));
        assert_eq!(result.generations, (2_000 - 40) / 40);
    }

    #[test]
    fn test_final_population_is_worst_to_best() {
        let config = GaConfig::default().with_max_evaluations(1_500).with_seed(17);
        let result = GaRunner::run(&Benchmark::Sphere, &config);
        let pop = &result.population;
        for i in 1..pop.len() {
            assert!(pop.get(i - 1).fitness() >= pop.get(i).fitness());
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let config = GaConfig::default().with_max_evaluations(3_000).with_seed(2024);
        let a = GaRunner::run(&Benchmark::Rastrigin, &config);
        let b = GaRunner::run(&Benchmark::Rastrigin, &config);
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.best.variables(), b.best.variables());
    }

    #[test]
    fn test_roulette_strategy_runs() {
        let config = GaConfig::default()
            .with_selection(Selection::Roulette)
            .with_max_evaluations(2_000)
            .with_seed(5);
        let result = GaRunner::run(&Benchmark::Sphere, &config);
        assert!(result.best_fitness < 1.0);
    }

    #[test]
    fn test_tournament_strategy_runs() {
        let config = GaConfig::default()
            .with_tournament_size(3)
            .with_max_evaluations(2_000)
            .with_seed(5);
        let result = GaRunner::run(&Benchmark::Sphere, &config);
        assert!(result.best_fitness < 1.0);
    }

    #[test]
    fn test_budget_smaller_than_population_runs_zero_generations() {
        let config = GaConfig::default()
            .with_population_size(100)
            .with_max_evaluations(50)
            .with_seed(1);
        let result = GaRunner::run(&Benchmark::Sphere, &config);
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    #[should_panic(expected = "invalid GaConfig")]
    fn test_invalid_config_panics() {
        let config = GaConfig::default().with_population_size(13);
        GaRunner::run(&Benchmark::Sphere, &config);
    }
}
