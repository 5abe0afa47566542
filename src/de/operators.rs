//! DE variation and survivor-selection operators.
//!
//! Every operator produces or mutates an [`Individual`] it owns outright;
//! trials never alias a population member's buffers.

use rand::Rng;

use crate::population::{Bounds, Individual, Population};

/// Draws three mutually distinct member indices uniformly at random.
///
/// The slot currently being varied is deliberately *not* excluded from the
/// draw: a trial may be built from its own target's occupant.
pub(crate) fn draw_distinct<R: Rng>(len: usize, rng: &mut R) -> [usize; 3] {
    let picked = rand::seq::index::sample(rng, len, 3);
    [picked.index(0), picked.index(1), picked.index(2)]
}

/// Builds an unevaluated trial `base + f * (diff1 - diff2)`.
pub fn differential_mutation(
    base: &Individual,
    diff1: &Individual,
    diff2: &Individual,
    f: f64,
) -> Individual {
    let variables = base
        .variables()
        .iter()
        .zip(diff1.variables())
        .zip(diff2.variables())
        .map(|((&b, &d1), &d2)| b + f * (d1 - d2))
        .collect();
    Individual::new(variables)
}

/// Reflects out-of-range dimensions off the violated bound, once.
///
/// The reflection is not iterated: a value overshooting a bound by more
/// than the bound width remains out of range afterwards, and survivor
/// selection is left to discard such trials on fitness.
pub fn reflect_into_bounds(individual: &mut Individual, bounds: &Bounds) {
    for (d, v) in individual.variables_mut().iter_mut().enumerate() {
        let (lower, upper) = (bounds.lower(d), bounds.upper(d));
        if *v < lower {
            *v = lower - (*v - lower);
        } else if *v > upper {
            *v = upper - (*v - upper);
        }
    }
}

/// Binomial recombination of `trial` against `target`, in place.
///
/// One dimension, drawn uniformly, always keeps the mutated value. Every
/// other dimension keeps it with probability `crossover_probability` and
/// otherwise reverts to the target's value. A uniform variate is consumed
/// for every dimension, the forced one included.
pub fn binomial_recombination<R: Rng>(
    trial: &mut Individual,
    target: &Individual,
    crossover_probability: f64,
    rng: &mut R,
) {
    let forced = rng.random_range(0..trial.n_variables());
    for (d, v) in trial.variables_mut().iter_mut().enumerate() {
        let keep = rng.random::<f64>() < crossover_probability;
        if !(keep || d == forced) {
            *v = target.variables()[d];
        }
    }
}

/// Positional greedy survivor selection: the offspring at index `i`
/// replaces the member at `i` iff its fitness is strictly lower.
///
/// Index alignment between the population and the offspring buffer is the
/// correctness contract; this is not a rank-based merge.
pub(crate) fn select_survivors(population: &mut Population, offspring: Vec<Individual>) {
    for (i, child) in offspring.into_iter().enumerate() {
        if child.fitness() < population.get(i).fitness() {
            population.replace(i, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn evaluated(variables: Vec<f64>, fitness: f64) -> Individual {
        let mut ind = Individual::new(variables);
        ind.set_fitness(fitness);
        ind
    }

    #[test]
    fn test_draw_distinct_indices() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let [a, b, c] = draw_distinct(5, &mut rng);
            assert!(a != b && b != c && a != c);
            assert!(a < 5 && b < 5 && c < 5);
        }
    }

    #[test]
    fn test_differential_mutation_formula() {
        let base = Individual::new(vec![1.0, 2.0]);
        let d1 = Individual::new(vec![3.0, 5.0]);
        let d2 = Individual::new(vec![2.0, 1.0]);
        let trial = differential_mutation(&base, &d1, &d2, 0.5);
        assert_eq!(trial.variables(), &[1.5, 4.0]);
        assert!(!trial.is_evaluated());
    }

    #[test]
    fn test_mutation_output_owns_its_buffer() {
        let base = Individual::new(vec![1.0]);
        let d1 = Individual::new(vec![1.0]);
        let d2 = Individual::new(vec![1.0]);
        let mut trial = differential_mutation(&base, &d1, &d2, 0.5);
        trial.variables_mut()[0] = 99.0;
        assert_eq!(base.variables()[0], 1.0);
    }

    #[test]
    fn test_reflection_below_and_above() {
        let bounds = Bounds::uniform(-1.0, 1.0, 2);
        let mut ind = Individual::new(vec![-1.4, 1.25]);
        reflect_into_bounds(&mut ind, &bounds);
        assert!((ind.variables()[0] - (-0.6)).abs() < 1e-12);
        assert!((ind.variables()[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_reflection_is_single_pass() {
        // Overshoot of more than the bound width stays out of range.
        let bounds = Bounds::uniform(0.0, 1.0, 1);
        let mut ind = Individual::new(vec![-1.5]);
        reflect_into_bounds(&mut ind, &bounds);
        assert_eq!(ind.variables()[0], 1.5);
    }

    #[test]
    fn test_recombination_forces_one_dimension() {
        let mut rng = create_rng(42);
        let target = Individual::new(vec![0.0; 6]);
        for _ in 0..100 {
            let mut trial = Individual::new(vec![1.0; 6]);
            binomial_recombination(&mut trial, &target, 0.0, &mut rng);
            // With zero probability everything reverts except the forced dimension.
            let kept = trial.variables().iter().filter(|&&v| v == 1.0).count();
            assert_eq!(kept, 1);
        }
    }

    #[test]
    fn test_recombination_keeps_all_at_probability_one() {
        let mut rng = create_rng(42);
        let target = Individual::new(vec![0.0; 6]);
        let mut trial = Individual::new(vec![1.0; 6]);
        binomial_recombination(&mut trial, &target, 1.0, &mut rng);
        assert!(trial.variables().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_survivors_replace_only_strictly_better() {
        let mut population = Population::new();
        population.push(evaluated(vec![0.0], 1.0));
        population.push(evaluated(vec![1.0], 2.0));
        population.push(evaluated(vec![2.0], 3.0));

        let offspring = vec![
            evaluated(vec![9.0], 1.0), // equal: parent stays
            evaluated(vec![9.0], 1.5), // better: child wins
            evaluated(vec![9.0], 4.0), // worse: parent stays
        ];
        select_survivors(&mut population, offspring);

        assert_eq!(population.get(0).variables()[0], 0.0);
        assert_eq!(population.get(1).variables()[0], 9.0);
        assert_eq!(population.get(2).variables()[0], 2.0);
        assert_eq!(population.len(), 3);
    }
}
