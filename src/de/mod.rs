//! Differential Evolution.
//!
//! Real-vector evolutionary search over a box-bounded domain. Each
//! generation builds one trial per population slot from the scaled
//! difference of two randomly drawn members added to a third, reflects it
//! off the bounds once, recombines it binomially against the slot's current
//! occupant, and keeps whichever of the pair has the strictly lower
//! fitness.
//!
//! # Key Types
//!
//! - [`DeConfig`]: algorithm parameters (population size, scale factor,
//!   recombination probability, termination)
//! - [`DeRunner`]: executes the generational loop
//! - [`DeResult`]: final result with per-generation incumbent history
//!
//! # Submodules
//!
//! - [`operators`]: the variation operators (differential mutation,
//!   boundary reflection, binomial recombination)

mod config;
pub mod operators;
mod runner;

pub use config::DeConfig;
pub use runner::{DeResult, DeRunner};
