//! Population-based stochastic optimizers for bounded continuous domains.
//!
//! Two evolutionary algorithms search for the minimum of a scalar
//! objective over a box-bounded real vector space:
//!
//! - **Differential Evolution** ([`de`]): real-vector mutation from scaled
//!   member differences, single-pass boundary reflection, binomial
//!   recombination, and deterministic index-paired survivor selection.
//! - **Genetic Algorithm** ([`ga`]): binary-encoded individuals with
//!   rank-based parent selection (roulette or tournament), per-variable
//!   single-point crossover, decaying bit-flip mutation, and a pairwise
//!   elitism merge.
//!
//! Both engines share the population data model ([`population`]) and
//! consume objectives through the [`problem::Objective`] trait; a
//! catalogue of classical benchmark functions is provided as
//! [`problem::Benchmark`]. The GA additionally uses the quantized
//! real/binary bridge in [`encoding`], which also ships standalone
//! Gray-code utilities.
//!
//! # Reproducibility
//!
//! All randomness flows from one explicit [`rand::rngs::StdRng`] handle
//! created by [`random::create_rng`] and threaded through every operator,
//! so a seeded run consumes its draws in a fixed sequence and is exactly
//! repeatable. Fitness evaluation of distinct individuals is independent;
//! with the `parallel` cargo feature it fans out over rayon at the
//! whole-buffer evaluation points, after all draws have been consumed.
//!
//! # Architecture
//!
//! Each algorithm lives in its own module with a `config` / `operators` /
//! `runner` split (the GA adds `selection`). The shared leaf modules carry
//! no algorithm-specific state.
//!
//! # Example
//!
//! ```
//! use evosolve::de::{DeConfig, DeRunner};
//! use evosolve::problem::Benchmark;
//!
//! let config = DeConfig::default().with_max_iterations(50).with_seed(42);
//! let result = DeRunner::run(&Benchmark::Sphere, &config);
//! assert!(result.best_fitness < 1.0);
//! ```

pub mod de;
pub mod encoding;
pub mod ga;
pub mod population;
pub mod problem;
pub mod random;
