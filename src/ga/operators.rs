//! Binary variation operators: crossover and bit-flip mutation.
//!
//! Crossover operators return children with freshly owned genotypes and
//! unset fitness; a child never aliases a parent's buffers. The decision
//! vectors of new children stay zeroed until the caller decodes them at an
//! explicit sync point.

use rand::Rng;

use crate::population::Individual;

/// Single-point crossover applied independently per variable.
///
/// For each variable a cut point is drawn uniformly in `[1, n_bits - 2]`
/// and the bit-string tails beyond it are swapped between the parents,
/// producing two children.
///
/// # Panics
/// Panics if a parent carries no genotype, if a bit-string is shorter than
/// the cut, or if `n_bits < 3` (empty cut interval).
pub fn single_point_crossover<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    n_bits: usize,
    rng: &mut R,
) -> (Individual, Individual) {
    let genotype1 = parent1.genotype().expect("crossover requires encoded parents");
    let genotype2 = parent2.genotype().expect("crossover requires encoded parents");

    let mut child1 = Vec::with_capacity(genotype1.len());
    let mut child2 = Vec::with_capacity(genotype2.len());
    for (bits1, bits2) in genotype1.iter().zip(genotype2) {
        let cut = rng.random_range(1..n_bits - 1);
        let mut head1 = bits1[..cut].to_vec();
        head1.extend_from_slice(&bits2[cut..]);
        let mut head2 = bits2[..cut].to_vec();
        head2.extend_from_slice(&bits1[cut..]);
        child1.push(head1);
        child2.push(head2);
    }
    (Individual::from_genotype(child1), Individual::from_genotype(child2))
}

/// Uniform crossover applied independently per bit.
///
/// Each bit position flips a fair coin to decide which parent feeds which
/// child. Provided alongside the single-point operator; the engine wires
/// only the latter.
///
/// # Panics
/// Panics if a parent carries no genotype.
pub fn uniform_crossover<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut R,
) -> (Individual, Individual) {
    let genotype1 = parent1.genotype().expect("crossover requires encoded parents");
    let genotype2 = parent2.genotype().expect("crossover requires encoded parents");

    let mut child1 = Vec::with_capacity(genotype1.len());
    let mut child2 = Vec::with_capacity(genotype2.len());
    for (bits1, bits2) in genotype1.iter().zip(genotype2) {
        let mut var1 = Vec::with_capacity(bits1.len());
        let mut var2 = Vec::with_capacity(bits2.len());
        for (&b1, &b2) in bits1.iter().zip(bits2) {
            if rng.random::<f64>() > 0.5 {
                var1.push(b1);
                var2.push(b2);
            } else {
                var1.push(b2);
                var2.push(b1);
            }
        }
        child1.push(var1);
        child2.push(var2);
    }
    (Individual::from_genotype(child1), Individual::from_genotype(child2))
}

/// Independent bit-flip over every bit of every variable.
///
/// The caller owns the probability schedule; genotype and decision vector
/// are only re-synchronized at the caller's explicit sync point.
///
/// # Panics
/// Panics if the individual carries no genotype.
pub fn bit_flip<R: Rng>(individual: &mut Individual, probability: f64, rng: &mut R) {
    for bits in individual.genotype_mut() {
        for bit in bits.iter_mut() {
            if rng.random::<f64>() < probability {
                *bit = !*bit;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Bounds;
    use crate::random::create_rng;

    const N_BITS: usize = 8;

    fn encoded(variables: Vec<f64>) -> Individual {
        let bounds = Bounds::uniform(-5.12, 5.12, variables.len());
        let mut ind = Individual::new(variables);
        ind.encode_genotype(&bounds, N_BITS);
        ind
    }

    #[test]
    fn test_single_point_swaps_tails() {
        let mut rng = create_rng(42);
        let p1 = encoded(vec![-5.12, -5.12]);
        let p2 = encoded(vec![5.12, 5.12]);

        for _ in 0..50 {
            let (c1, c2) = single_point_crossover(&p1, &p2, N_BITS, &mut rng);
            for v in 0..2 {
                let bits1 = &c1.genotype().unwrap()[v];
                let bits2 = &c2.genotype().unwrap()[v];
                assert_eq!(bits1.len(), N_BITS);
                // Parent 1 is all zeros, parent 2 all ones: child 1 must be
                // a zero-head/one-tail split with the cut inside 1..=N_BITS-2.
                let flip = bits1.iter().position(|&b| b).unwrap();
                assert!((1..N_BITS - 1).contains(&flip));
                assert!(bits1[flip..].iter().all(|&b| b));
                assert!(bits2[flip..].iter().all(|&b| !b));
            }
        }
    }

    #[test]
    fn test_single_point_children_are_unevaluated() {
        let mut rng = create_rng(1);
        let (c1, c2) = single_point_crossover(&encoded(vec![1.0]), &encoded(vec![-1.0]), N_BITS, &mut rng);
        assert!(!c1.is_evaluated());
        assert!(!c2.is_evaluated());
    }

    #[test]
    fn test_crossover_children_own_their_genotypes() {
        let mut rng = create_rng(42);
        let p1 = encoded(vec![1.0, 2.0]);
        let p2 = encoded(vec![-1.0, -2.0]);
        let before = p1.genotype().unwrap().to_vec();

        let (mut c1, _) = single_point_crossover(&p1, &p2, N_BITS, &mut rng);
        for bit in &mut c1.genotype_mut()[0] {
            *bit = !*bit;
        }

        assert_eq!(p1.genotype().unwrap(), &before[..]);
    }

    #[test]
    fn test_uniform_crossover_preserves_bit_multiset() {
        let mut rng = create_rng(42);
        let p1 = encoded(vec![3.3, -2.2]);
        let p2 = encoded(vec![-4.4, 1.1]);

        let (c1, c2) = uniform_crossover(&p1, &p2, &mut rng);
        for v in 0..2 {
            for k in 0..N_BITS {
                let parents = [p1.genotype().unwrap()[v][k], p2.genotype().unwrap()[v][k]];
                let mut children = [c1.genotype().unwrap()[v][k], c2.genotype().unwrap()[v][k]];
                let mut sorted_parents = parents;
                sorted_parents.sort_unstable();
                children.sort_unstable();
                assert_eq!(children, sorted_parents);
            }
        }
    }

    #[test]
    fn test_bit_flip_extremes() {
        let mut rng = create_rng(42);

        let mut ind = encoded(vec![1.5]);
        let original = ind.genotype().unwrap()[0].clone();
        bit_flip(&mut ind, 0.0, &mut rng);
        assert_eq!(ind.genotype().unwrap()[0], original);

        bit_flip(&mut ind, 1.0, &mut rng);
        let flipped: Vec<bool> = original.iter().map(|&b| !b).collect();
        assert_eq!(ind.genotype().unwrap()[0], flipped);
    }

    #[test]
    fn test_bit_flip_rate_is_plausible() {
        let mut rng = create_rng(42);
        let mut flips = 0usize;
        let trials = 500;
        for _ in 0..trials {
            let mut ind = encoded(vec![0.0, 0.0]);
            let before: Vec<Vec<bool>> = ind.genotype().unwrap().to_vec();
            bit_flip(&mut ind, 0.25, &mut rng);
            let after = ind.genotype().unwrap();
            for v in 0..2 {
                flips += before[v].iter().zip(&after[v]).filter(|(a, b)| a != b).count();
            }
        }
        let total_bits = trials * 2 * N_BITS;
        let rate = flips as f64 / total_bits as f64;
        assert!((rate - 0.25).abs() < 0.03, "observed flip rate {}", rate);
    }

    #[test]
    #[should_panic(expected = "crossover requires encoded parents")]
    fn test_crossover_without_genotype_panics() {
        let mut rng = create_rng(42);
        let p1 = Individual::new(vec![0.0]);
        let p2 = Individual::new(vec![0.0]);
        single_point_crossover(&p1, &p2, N_BITS, &mut rng);
    }
}
