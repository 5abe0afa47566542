//! Shared population data model: bounds, individuals, populations.
//!
//! Both engines evolve a [`Population`] of [`Individual`]s inside a fixed
//! [`Bounds`] box. Individuals are value types: cloning deep-copies the
//! decision vector and genotype, so offspring never alias a parent's
//! buffers. Population order is meaningful only after an explicit sort
//! call; between sorts it is whatever insertion produced.

use std::cmp::Ordering;

use rand::Rng;

use crate::encoding;
use crate::problem::Objective;

/// Per-variable box bounds with a fixed dimension.
///
/// Immutable once constructed for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates bounds from explicit per-variable limits.
    ///
    /// # Panics
    /// Panics if the sequences differ in length or any `lower[i] > upper[i]`.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        assert_eq!(lower.len(), upper.len(), "lower/upper length mismatch");
        assert!(
            lower.iter().zip(&upper).all(|(l, u)| l <= u),
            "every lower bound must not exceed its upper bound"
        );
        Self { lower, upper }
    }

    /// Creates bounds with the same limits replicated over `n_variables`
    /// dimensions, the shape the benchmark catalogue produces.
    pub fn uniform(lower: f64, upper: f64, n_variables: usize) -> Self {
        Self::new(vec![lower; n_variables], vec![upper; n_variables])
    }

    /// Number of decision variables.
    pub fn n_variables(&self) -> usize {
        self.lower.len()
    }

    /// Lower limit of dimension `d`.
    pub fn lower(&self, d: usize) -> f64 {
        self.lower[d]
    }

    /// Upper limit of dimension `d`.
    pub fn upper(&self, d: usize) -> f64 {
        self.upper[d]
    }
}

/// One candidate solution: a real decision vector, an optional binary
/// genotype, and a fitness assigned by evaluation. Lower fitness is better.
#[derive(Debug, Clone)]
pub struct Individual {
    variables: Vec<f64>,
    genotype: Option<Vec<Vec<bool>>>,
    fitness: Option<f64>,
}

impl Individual {
    /// Creates an unevaluated individual from a decision vector.
    pub fn new(variables: Vec<f64>) -> Self {
        Self { variables, genotype: None, fitness: None }
    }

    /// Creates an unevaluated individual whose decision vector is all
    /// zeros until the genotype is decoded.
    pub fn from_genotype(genotype: Vec<Vec<bool>>) -> Self {
        Self { variables: vec![0.0; genotype.len()], genotype: Some(genotype), fitness: None }
    }

    /// Creates an unevaluated individual with variables drawn uniformly
    /// within `bounds`, independently per dimension.
    pub fn random<R: Rng>(bounds: &Bounds, rng: &mut R) -> Self {
        let variables = (0..bounds.n_variables())
            .map(|d| {
                let (lower, upper) = (bounds.lower(d), bounds.upper(d));
                if lower < upper { rng.random_range(lower..upper) } else { lower }
            })
            .collect();
        Self::new(variables)
    }

    /// Number of decision variables.
    pub fn n_variables(&self) -> usize {
        self.variables.len()
    }

    /// The decision vector.
    pub fn variables(&self) -> &[f64] {
        &self.variables
    }

    pub(crate) fn variables_mut(&mut self) -> &mut [f64] {
        &mut self.variables
    }

    /// Binary genotype, one most-significant-bit-first bit-string per
    /// variable. `None` until [`encode_genotype`](Self::encode_genotype) runs.
    pub fn genotype(&self) -> Option<&[Vec<bool>]> {
        self.genotype.as_deref()
    }

    pub(crate) fn genotype_mut(&mut self) -> &mut [Vec<bool>] {
        self.genotype.as_deref_mut().expect("genotype accessed before encoding")
    }

    /// Current fitness.
    ///
    /// # Panics
    /// Panics if the individual has not been evaluated yet; comparing unset
    /// fitness is a programming error, never part of normal control flow.
    pub fn fitness(&self) -> f64 {
        self.fitness.expect("fitness accessed before evaluation")
    }

    /// Stores the fitness of this individual.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Whether a fitness has been assigned.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Synchronizes the genotype from the decision vector, quantizing each
    /// variable to `n_bits`. Any previous genotype is replaced.
    ///
    /// Representations are only kept in sync at these explicit calls;
    /// mutating one side does not invalidate the other.
    pub fn encode_genotype(&mut self, bounds: &Bounds, n_bits: usize) {
        let genotype = self
            .variables
            .iter()
            .enumerate()
            .map(|(d, &v)| encoding::encode(v, bounds.lower(d), bounds.upper(d), n_bits))
            .collect();
        self.genotype = Some(genotype);
    }

    /// Synchronizes the decision vector from the genotype.
    ///
    /// # Panics
    /// Panics if no genotype is present.
    pub fn decode_genotype(&mut self, bounds: &Bounds, n_bits: usize) {
        let genotype = self.genotype.as_ref().expect("decode requires a genotype");
        for (d, bits) in genotype.iter().enumerate() {
            self.variables[d] = encoding::decode(bits, bounds.lower(d), bounds.upper(d), n_bits);
        }
    }
}

fn by_fitness(a: &Individual, b: &Individual) -> Ordering {
    a.fitness().partial_cmp(&b.fitness()).unwrap_or(Ordering::Equal)
}

/// An ordered collection of individuals with a fixed target size.
///
/// The size is constant across whole-generation boundaries; transient
/// offspring buffers may differ in size mid-generation.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty population with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { individuals: Vec::with_capacity(capacity) }
    }

    /// Creates `size` unevaluated members drawn uniformly within `bounds`.
    pub fn random<R: Rng>(size: usize, bounds: &Bounds, rng: &mut R) -> Self {
        Self { individuals: (0..size).map(|_| Individual::random(bounds, rng)).collect() }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Member at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    /// Replaces the member at `index`.
    pub fn replace(&mut self, index: usize, individual: Individual) {
        self.individuals[index] = individual;
    }

    /// Appends a member.
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Individual> {
        self.individuals.iter_mut()
    }

    /// All members as a slice.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// All members as a mutable slice (evaluation entry point).
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// Sorts by fitness ascending: best first.
    ///
    /// # Panics
    /// Panics if any member is unevaluated.
    pub fn sort_ascending(&mut self) {
        self.individuals.sort_by(by_fitness);
    }

    /// Sorts by fitness descending: worst first, best last.
    ///
    /// # Panics
    /// Panics if any member is unevaluated.
    pub fn sort_descending(&mut self) {
        self.individuals.sort_by(|a, b| by_fitness(b, a));
    }

    /// The minimum-fitness member, by linear scan in any order.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().min_by(|a, b| by_fitness(a, b))
    }

    /// Removes the leading `count` members. Meaningful under worst-first
    /// order, where it discards the worst of the population.
    pub fn drop_worst(&mut self, count: usize) {
        self.individuals.drain(0..count);
    }
}

/// Evaluates every individual through `objective`.
///
/// With the `parallel` feature compiled in and `parallel == true`, the
/// evaluations fan out across individuals. Callers consume all random draws
/// before dispatching here, so the draw sequence stays independent of
/// evaluation concurrency.
pub fn evaluate_population<O: Objective + ?Sized>(
    objective: &O,
    individuals: &mut [Individual],
    parallel: bool,
) {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            individuals.par_iter_mut().for_each(|ind| objective.evaluate(ind));
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    for individual in individuals.iter_mut() {
        objective.evaluate(individual);
    }
}
