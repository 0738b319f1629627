// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples with a SEEDED generator and cuts them into
//   - Test set:  the first ceil(test_fraction * n) samples
//   - Train set: everything else
//
// Seeding matters: the same input and the same seed always
// give the same row membership, so runs are reproducible.
// No stratification, no time ordering — a plain uniform
// shuffle-and-cut.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom over a
// StdRng seeded from a u64.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (train, test).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `test_fraction` - Proportion held out, e.g. 0.2 = 20%
/// * `seed`          - RNG seed; fixes the permutation
pub fn split_train_test<T>(
    mut samples:   Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    // Test size rounds up, so 0.2 of 101 rows holds out 21
    let total  = samples.len();
    let n_test = ((total as f64) * test_fraction).ceil() as usize;
    let n_test = n_test.min(total);

    // After this: samples = test [0..n_test], train = [n_test..total]
    let train = samples.split_off(n_test);
    let test  = samples;

    tracing::debug!(
        "Dataset split (seed {}): {} train, {} test",
        seed,
        train.len(),
        test.len(),
    );

    (train, test)
}

/// Split row indices 0..n. Callers gather features and targets
/// with the same index lists so X and y stay aligned.
pub fn split_indices(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    split_train_test((0..n).collect(), test_fraction, seed)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let (train, test) = split_indices(100, 0.2, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_test_size_rounds_up() {
        let (train, test) = split_indices(101, 0.2, 42);
        assert_eq!(test.len(),  21);
        assert_eq!(train.len(), 80);
    }

    #[test]
    fn test_all_items_preserved() {
        let (mut train, test) = split_indices(50, 0.3, 7);
        train.extend(test);
        train.sort_unstable();
        assert_eq!(train, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_membership() {
        let a = split_indices(200, 0.2, 42);
        let b = split_indices(200, 0.2, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let a = split_indices(200, 0.2, 42);
        let b = split_indices(200, 0.2, 43);
        assert_ne!(a.1, b.1);
    }

    #[test]
    fn test_empty_dataset() {
        let (train, test) = split_train_test(Vec::<usize>::new(), 0.2, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
