//! GA parent selection and the elitism-merge survivor rule.
//!
//! Everything here assumes the population is sorted worst-to-best (index 0
//! = worst, last index = best). Sortedness is re-established by the runner
//! immediately before any of these routines execute.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//!   (linear ranking)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::SliceRandom;
use rand::Rng;

use crate::population::Population;

/// Parent-selection strategy, applied per mating event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Roulette over the rank-based cumulative probability line.
    ///
    /// The two parent draws are independent and may pick the same
    /// individual.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan of the line)
    Roulette,

    /// Tournament of the given size: a batch of indices drawn uniformly
    /// *with replacement*, sorted ascending, and resolved to the member at
    /// the largest drawn index.
    ///
    /// The rule is positional: under the worst-to-best ordering used by
    /// the engine the largest index is the fittest of the batch, and the
    /// bias would invert if a call site ever switched the ordering
    /// convention. A size exceeding the population clamps to the
    /// population size.
    ///
    /// # Complexity
    /// O(k log k) per selection
    Tournament(usize),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(2)
    }
}

impl Selection {
    /// Picks the indices of two parents for one mating event.
    ///
    /// `line` is the cumulative probability line of the current
    /// generation; it is only consulted by [`Selection::Roulette`].
    pub fn select_parents<R: Rng>(
        &self,
        population: &Population,
        line: &[(usize, f64)],
        rng: &mut R,
    ) -> (usize, usize) {
        match *self {
            Selection::Roulette => (roulette(line, rng), roulette(line, rng)),
            Selection::Tournament(k) => {
                let k = k.clamp(1, population.len());
                (
                    tournament(population.len(), k, rng),
                    tournament(population.len(), k, rng),
                )
            }
        }
    }
}

/// Rank-based selection probability for each sorted rank (0 = worst,
/// `pop_size - 1` = best): `(2 - s)/N + 2i(s - 1) / (N(N - 1))`.
///
/// The probabilities sum to one and rise linearly with rank, so the best
/// rank is favored by a factor controlled by the pressure `s`.
pub fn rank_probabilities(pop_size: usize, pressure: f64) -> Vec<f64> {
    let n = pop_size as f64;
    (0..pop_size)
        .map(|i| (2.0 - pressure) / n + 2.0 * i as f64 * (pressure - 1.0) / (n * (n - 1.0)))
        .collect()
}

/// Cumulative probability line over ranks.
///
/// A transient artifact rebuilt from a freshly sorted population every
/// generation; it is never carried across generations.
pub fn cumulative_line(probabilities: &[f64]) -> Vec<(usize, f64)> {
    let mut cumulative = 0.0;
    probabilities
        .iter()
        .enumerate()
        .map(|(rank, &p)| {
            cumulative += p;
            (rank, cumulative)
        })
        .collect()
}

/// First rank whose cumulative probability exceeds a fresh uniform draw.
fn roulette<R: Rng>(line: &[(usize, f64)], rng: &mut R) -> usize {
    let draw = rng.random::<f64>();
    for &(rank, cumulative) in line {
        if cumulative > draw {
            return rank;
        }
    }
    line.len() - 1 // floating-point fallback
}

/// Largest of `k` indices drawn uniformly with replacement.
fn tournament<R: Rng>(pop_size: usize, k: usize, rng: &mut R) -> usize {
    let mut drawn: Vec<usize> = (0..k).map(|_| rng.random_range(0..pop_size)).collect();
    drawn.sort_unstable();
    drawn[k - 1]
}

/// Pairwise elitism merge between a parent population and its offspring.
///
/// Both populations must be sorted worst-to-best and hold the same number
/// of members. Two cursors walk inward from the best ends: each of the
/// `elite_count` comparisons either retains the strictly better parent or
/// pulls the current best offspring into the parent population. The stale
/// worst parents are then dropped and the free slots refilled from the
/// offspring above the elite boundary in shuffled order, restoring the
/// population to its original size, sorted worst-to-best.
///
/// A top-`elite_count` parent can only leave by losing its comparison to a
/// no-worse offspring, so the incumbent is never lost.
pub(crate) fn elitism_merge<R: Rng>(
    population: &mut Population,
    offspring: &Population,
    elite_count: usize,
    rng: &mut R,
) {
    let pop_size = offspring.len();
    debug_assert_eq!(population.len(), pop_size);

    let mut parents_kept = 0;
    let mut offspring_taken = 0;
    for _ in 0..elite_count {
        let parent = population.get(pop_size - 1 - parents_kept);
        let child = offspring.get(pop_size - 1 - offspring_taken);
        if parent.fitness() < child.fitness() {
            parents_kept += 1;
        } else {
            population.push(child.clone());
            offspring_taken += 1;
        }
    }

    population.sort_descending();
    population.drop_worst(pop_size - elite_count + offspring_taken);

    let mut refill: Vec<usize> = (elite_count..pop_size).collect();
    refill.shuffle(rng);
    for &index in &refill {
        population.push(offspring.get(index).clone());
    }

    population.sort_descending();
}
