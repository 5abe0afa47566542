//! Objective interface and the benchmark catalogue.
//!
//! Engines consume objectives through the [`Objective`] trait. The
//! catalogue of classical benchmark functions is a tagged enum selected at
//! configuration time, not a subclass hierarchy; each variant supplies its
//! own formula and box bounds.

use std::fmt;
use std::str::FromStr;

use crate::population::{Bounds, Individual, Population};

/// A scalar minimization objective over a box-bounded domain.
///
/// `Send + Sync` so populations can be evaluated in parallel. Evaluation
/// has no side effect beyond storing the fitness on the individual.
pub trait Objective: Send + Sync {
    /// Fitness of a decision vector. Deterministic; lower is better.
    fn fitness(&self, variables: &[f64]) -> f64;

    /// Box bounds for an `n_variables`-dimensional search.
    fn bounds(&self, n_variables: usize) -> Bounds;

    /// Evaluates `individual`, storing the fitness of its decision vector.
    fn evaluate(&self, individual: &mut Individual) {
        let fitness = self.fitness(individual.variables());
        individual.set_fitness(fitness);
    }

    /// The minimum-fitness member, by linear scan; callable with the
    /// population in any order.
    fn best<'a>(&self, population: &'a Population) -> Option<&'a Individual> {
        population.best()
    }

    /// Per-generation hook invoked by the engines with the incumbent
    /// fitness. Default: no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}

/// Classical benchmark objectives.
///
/// All are minimization problems with known optima, useful for exercising
/// and comparing the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Benchmark {
    /// Highly multimodal cosine-modulated bowl; bounds ±5.12, global
    /// minimum 0 at the origin.
    Rastrigin,
    /// Deceptive multimodal surface; bounds ±500, global minimum 0 near
    /// 420.9687 in every dimension.
    Schwefel,
    /// Convex quadratic bowl; bounds ±5.12, global minimum 0 at the origin.
    Sphere,
    /// Foxholes lattice over two variables; bounds ±65.536.
    DeJong5,
    /// Curved narrow valley; bounds ±5, global minimum 0 at all-ones.
    Rosenbrock,
}

impl Objective for Benchmark {
    /// # Panics
    /// `DeJong5` is defined for two variables and panics with fewer.
    fn fitness(&self, x: &[f64]) -> f64 {
        match self {
            Benchmark::Rastrigin => {
                10.0 * x.len() as f64
                    + x.iter()
                        .map(|&v| v * v - 10.0 * (2.0 * v * std::f64::consts::PI).cos())
                        .sum::<f64>()
            }
            Benchmark::Schwefel => {
                418.9829 * x.len() as f64
                    - x.iter().map(|&v| v * v.abs().sqrt().sin()).sum::<f64>()
            }
            Benchmark::Sphere => x.iter().map(|&v| v * v).sum(),
            Benchmark::DeJong5 => {
                const A: [f64; 5] = [-32.0, -16.0, 0.0, 16.0, 32.0];
                let mut fitness = 0.002;
                for i in 0..25 {
                    fitness += 1.0
                        / (i as f64 + (x[0] - A[i % 5]).powi(6) + (x[1] - A[i / 5]).powi(6));
                }
                fitness
            }
            Benchmark::Rosenbrock => x
                .windows(2)
                .map(|w| (w[0] - 1.0).powi(2) + 100.0 * (w[1] - w[0] * w[0]).powi(2))
                .sum(),
        }
    }

    fn bounds(&self, n_variables: usize) -> Bounds {
        match self {
            Benchmark::Rastrigin | Benchmark::Sphere => Bounds::uniform(-5.12, 5.12, n_variables),
            Benchmark::Schwefel => Bounds::uniform(-500.0, 500.0, n_variables),
            Benchmark::DeJong5 => Bounds::uniform(-65.536, 65.536, n_variables),
            Benchmark::Rosenbrock => Bounds::uniform(-5.0, 5.0, n_variables),
        }
    }
}

impl FromStr for Benchmark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rastrigin" => Ok(Benchmark::Rastrigin),
            "schwefel" => Ok(Benchmark::Schwefel),
            "sphere" => Ok(Benchmark::Sphere),
            "dejong5" | "de-jong5" | "de_jong5" => Ok(Benchmark::DeJong5),
            "rosenbrock" => Ok(Benchmark::Rosenbrock),
            _ => Err(format!("unknown benchmark: {}", s)),
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Benchmark::Rastrigin => "rastrigin",
            Benchmark::Schwefel => "schwefel",
            Benchmark::Sphere => "sphere",
            Benchmark::DeJong5 => "dejong5",
            Benchmark::Rosenbrock => "rosenbrock",
        };
        f.write_str(name)
    }
}
