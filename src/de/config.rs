//! DE configuration.

/// Configuration for the Differential Evolution engine.
///
/// # Defaults
///
/// ```
/// use evosolve::de::DeConfig;
///
/// let config = DeConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_iterations, 400);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evosolve::de::DeConfig;
///
/// let config = DeConfig::default()
///     .with_n_variables(5)
///     .with_scale_factor(0.8)
///     .with_crossover_probability(0.9)
///     .with_seed(42);
/// assert_eq!(config.n_variables, 5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeConfig {
    /// Number of decision variables.
    pub n_variables: usize,

    /// Number of individuals in the population.
    ///
    /// Must be at least 3 so three mutually distinct members can be drawn
    /// for mutation.
    pub population_size: usize,

    /// Generation budget.
    pub max_iterations: usize,

    /// Scale factor `F` applied to the member difference during mutation.
    pub scale_factor: f64,

    /// Per-dimension probability of keeping the mutated value during
    /// binomial recombination (one dimension always keeps it).
    pub crossover_probability: f64,

    /// Stop once the best fitness recorded so far drops to this value or
    /// below. The check runs at the top of each generation, so one extra
    /// generation of work past the crossing is possible.
    pub convergence_threshold: f64,

    /// Whether to evaluate individuals in parallel. Requires the
    /// `parallel` cargo feature; ignored otherwise.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            n_variables: 2,
            population_size: 50,
            max_iterations: 400,
            scale_factor: 0.5,
            crossover_probability: 0.5,
            convergence_threshold: 1e-12,
            parallel: false,
            seed: None,
        }
    }
}

impl DeConfig {
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

    /// Sets the generation budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the mutation scale factor `F`.
    pub fn with_scale_factor(mut self, f: f64) -> Self {
        self.scale_factor = f;
        self
    }

    /// Sets the recombination probability, clamped into `[0, 1]`.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 1.0);
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
    pub fn validate(&self) -> Result<(), String> {
        if self.n_variables == 0 {
            return Err("n_variables must be positive".into());
        }
        if self.population_size < 3 {
            return Err("population_size must be at least 3 to draw three distinct members".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !self.scale_factor.is_finite() {
            return Err("scale_factor must be finite".into());
        }
        Ok(())
    }
}
