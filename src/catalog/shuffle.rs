//! Board shuffling
//!
//! Fisher–Yates over an owned sequence, and the flattened, shuffled board built
//! from a catalog.

use super::Catalog;
use crate::core::WordEntry;
use rand::Rng;

/// Return a uniformly random permutation of `items`
///
/// Walks from the last index down to 1, swapping each element with one chosen
/// uniformly from `0..=i`. Every permutation is equally likely given a sound
/// random source.
///
/// # Examples
/// ```
/// use connections::catalog::shuffle;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut shuffled = shuffle(vec![1, 2, 3, 4, 5], &mut rng);
/// shuffled.sort_unstable();
/// assert_eq!(shuffled, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
    items
}

/// Flatten the catalog into board entries and shuffle them
///
/// Each entry keeps the index of the group it came from.
pub fn shuffled_words<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Vec<WordEntry> {
    let entries = catalog
        .groups()
        .iter()
        .enumerate()
        .flat_map(|(group_index, group)| {
            group
                .words()
                .iter()
                .map(move |word| WordEntry::new(word.clone(), group_index))
        })
        .collect();

    shuffle(entries, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::letter_puzzle;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn shuffle_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle(Vec::<u8>::new(), &mut rng).is_empty());
        assert_eq!(shuffle(vec![42], &mut rng), vec![42]);
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let items: Vec<u32> = (0..16).collect();
        let a = shuffle(items.clone(), &mut StdRng::seed_from_u64(99));
        let b = shuffle(items, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_positions_are_uniform() {
        const TRIALS: usize = 40_000;
        const ITEMS: usize = 4;

        let mut rng = StdRng::seed_from_u64(2024);
        // counts[position][item]
        let mut counts = [[0usize; ITEMS]; ITEMS];

        for _ in 0..TRIALS {
            let shuffled = shuffle((0..ITEMS).collect(), &mut rng);
            for (position, &item) in shuffled.iter().enumerate() {
                counts[position][item] += 1;
            }
        }

        let expected = TRIALS / ITEMS;
        // ~7 standard deviations for p = 1/4
        let tolerance = 600;
        for row in &counts {
            for &count in row {
                assert!(
                    count.abs_diff(expected) < tolerance,
                    "position distribution skewed: {counts:?}"
                );
            }
        }
    }

    #[test]
    fn shuffle_reaches_every_permutation() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..2_000 {
            seen.insert(shuffle(vec!['a', 'b', 'c'], &mut rng));
        }

        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn shuffled_words_keep_group_mapping() {
        let catalog = letter_puzzle();
        let board = shuffled_words(&catalog, &mut StdRng::seed_from_u64(3));

        assert_eq!(board.len(), catalog.word_count());
        for entry in &board {
            assert_eq!(catalog.group_of(&entry.word), Some(entry.group_index));
        }
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(items in proptest::collection::vec(any::<u16>(), 0..64), seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut shuffled = shuffle(items.clone(), &mut rng);

            let mut expected = items;
            expected.sort_unstable();
            shuffled.sort_unstable();
            prop_assert_eq!(shuffled, expected);
        }
    }
}
