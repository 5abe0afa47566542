//! GA configuration.

use super::selection::Selection;

/// Configuration for the Genetic Algorithm engine.
///
/// # Defaults
///
/// ```
/// use evosolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.bits_per_variable, 16);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evosolve::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Roulette)
///     .with_elitism_fraction(0.5)
///     .with_seed(42);
/// assert_eq!(config.selection, Selection::Roulette);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of decision variables.
    pub n_variables: usize,

    /// Number of individuals in the population.
    ///
    /// Must be even: children are produced in pairs.
    pub population_size: usize,

    /// Fitness-evaluation budget. The generation count is derived as
    /// `(max_evaluations - population_size) / population_size`, saturating
    /// at zero.
    pub max_evaluations: usize,

    /// Bits per variable in the quantized genotype, in `3..=63` (the
    /// single-point cut interval must be non-empty; levels are computed in
    /// `u64`).
    pub bits_per_variable: usize,

    /// Probability of applying crossover to a parent pair. When crossover
    /// does not fire, both parents are deep-cloned.
    pub crossover_probability: f64,

    /// Initial per-bit flip probability. Decays by a factor of 0.25 every
    /// `mutation_step` generations — generation 0 included, so the first
    /// effective probability is already a quarter of this value — with no
    /// lower floor.
    pub mutation_probability: f64,

    /// Generations between mutation-probability decays. `0` derives the
    /// step from the generation budget (one third of it, minimum 1).
    pub mutation_step: usize,

    /// Parent-selection strategy, applied per mating event.
    pub selection: Selection,

    /// Fraction of the population resolved through the pairwise elitism
    /// merge, in `[0, 1]`. The elite count is the rounded product with the
    /// population size.
    pub elitism_fraction: f64,

    /// Selection pressure `s` of the linear ranking, in `[1, 2]`. Higher
    /// values favor fitter ranks more strongly.
    pub selection_pressure: f64,

    /// Stop once the incumbent fitness falls below this value.
    pub convergence_threshold: f64,

    /// Whether to evaluate individuals in parallel. Requires the
    /// `parallel` cargo feature; ignored otherwise.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            n_variables: 2,
            population_size: 100,
            max_evaluations: 10_000,
            bits_per_variable: 16,
            crossover_probability: 1.0,
            mutation_probability: 0.5,
            mutation_step: 0,
            selection: Selection::default(),
            elitism_fraction: 0.65,
            selection_pressure: 1.9,
            convergence_threshold: 1e-4,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of decision variables.
    pub fn with_n_variables(mut self, n: usize) -> Self {
        self.n_variables = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the fitness-evaluation budget.
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    /// Sets the genotype width per variable.
    pub fn with_bits_per_variable(mut self, n_bits: usize) -> Self {
        self.bits_per_variable = n_bits;
        self
    }

    /// Sets the crossover probability, clamped into `[0, 1]`.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the initial mutation probability, clamped into `[0, 1]`.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the decay step of the mutation schedule (`0` = derive from the
    /// generation budget).
    pub fn with_mutation_step(mut self, step: usize) -> Self {
        self.mutation_step = step;
        self
    }

    /// Sets the parent-selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Convenience builder for tournament selection of size `k`.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elitism fraction, clamped into `[0, 1]`.
    pub fn with_elitism_fraction(mut self, fraction: f64) -> Self {
        self.elitism_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Sets the linear-ranking selection pressure, clamped into `[1, 2]`.
    pub fn with_selection_pressure(mut self, s: f64) -> Self {
        self.selection_pressure = s.clamp(1.0, 2.0);
        self
    }

    /// Sets the convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid; an
    /// invalid configuration is fatal to the run, not recoverable.
    ///
    /// A tournament size exceeding the population is *not* an error — it
    /// clamps to the population size at the selection site.
    pub fn validate(&self) -> Result<(), String> {
        if self.n_variables == 0 {
            return Err("n_variables must be positive".into());
        }
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.population_size % 2 != 0 {
            return Err("population_size must be even: children are produced in pairs".into());
        }
        if self.max_evaluations == 0 {
            return Err("max_evaluations must be at least 1".into());
        }
        if self.bits_per_variable == 0 {
            return Err("bits_per_variable must represent at least 2 quantization levels".into());
        }
        if self.bits_per_variable < 3 {
            return Err("bits_per_variable must be at least 3 for a single-point cut".into());
        }
        if self.bits_per_variable > 63 {
            return Err("bits_per_variable must not exceed 63".into());
        }
        if !(0.0..=1.0).contains(&self.elitism_fraction) {
            return Err("elitism_fraction must lie in [0, 1]".into());
        }
        if !(1.0..=2.0).contains(&self.selection_pressure) {
            return Err("selection_pressure must lie in [1, 2]".into());
        }
        if let Selection::Tournament(0) = self.selection {
            return Err("tournament size must be at least 1".into());
        }
        Ok(())
    }
}
