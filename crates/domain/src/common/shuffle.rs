//! Random permutation of a candidate list.

use rand::seq::SliceRandom;
use rand::Rng;

/// Returns a shuffled copy of `items`, every element exactly once.
///
/// Swaps in place from the back of the list (Fisher-Yates), so every
/// permutation is equally likely given a uniform `rng`. Pass a seeded
/// generator to replay a shuffle.
///
/// ```
/// use lunchroll_domain::common::shuffle;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let a = shuffle(&[1, 2, 3, 4], &mut StdRng::seed_from_u64(7));
/// let b = shuffle(&[1, 2, 3, 4], &mut StdRng::seed_from_u64(7));
/// assert_eq!(a, b);
/// ```
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn keeps_every_element_once() {
        let input: Vec<u32> = (0..50).collect();
        let mut output = shuffle(&input, &mut StdRng::seed_from_u64(1));
        assert_eq!(output.len(), input.len());
        output.sort_unstable();
        assert_eq!(output, input);
    }

    #[test]
    fn leaves_input_untouched() {
        let input = vec!["a", "b", "c"];
        let _ = shuffle(&input, &mut StdRng::seed_from_u64(3));
        assert_eq!(input, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_and_single_lists() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(shuffle::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffle(&[42], &mut rng), vec![42]);
    }

    #[test]
    fn permutations_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();
        for _ in 0..6000 {
            *counts.entry(shuffle(&[1, 2, 3], &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (permutation, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "{:?} drawn {} times",
                permutation,
                count
            );
        }
    }
}
