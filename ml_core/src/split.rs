use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{MlError, Result};

/// Fraction of rows held out for evaluation.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
/// Seed of the shuffle that assigns rows to partitions.
pub const DEFAULT_SEED: u64 = 42;

/// Row-aligned training and evaluation partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Returns the amount of rows held out for evaluation out of `total`.
pub fn test_size(total: usize, test_fraction: f64) -> usize {
    ((total as f64) * test_fraction).round() as usize
}

/// Shuffles the rows with a seeded generator and holds out `test_fraction` of them.
///
/// The first `round(test_fraction * n)` shuffled rows form the evaluation
/// partition, the remaining ones the training partition. The same inputs and
/// seed always yield the same partitions.
///
/// # Errors
/// Returns `MlError::ShapeMismatch` if `x` and `y` have different row counts and
/// `MlError::InvalidInput` if `test_fraction` is not within `[0, 1)`.
pub fn train_test_split(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    test_fraction: f64,
    seed: u64,
) -> Result<Split> {
    if x.nrows() != y.len() {
        return Err(MlError::ShapeMismatch {
            what: "targets",
            got: y.len(),
            expected: x.nrows(),
        });
    }

    if !(0.0..1.0).contains(&test_fraction) {
        return Err(MlError::InvalidInput(format!(
            "test fraction must be within [0, 1), got {test_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..x.nrows()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test, train) = indices.split_at(test_size(x.nrows(), test_fraction));

    Ok(Split {
        x_train: x.select(Axis(0), train),
        x_test: x.select(Axis(0), test),
        y_train: y.select(Axis(0), train),
        y_test: y.select(Axis(0), test),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    fn dataset(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array::from_shape_fn((n, 2), |(i, j)| (i * 10 + j) as f64);
        let y = Array::from_shape_fn(n, |i| i as f64);
        (x, y)
    }

    #[test]
    fn split_sizes_follow_the_rounded_fraction() {
        for n in [1, 2, 5, 7, 10, 13, 101] {
            let (x, y) = dataset(n);
            let split = train_test_split(x.view(), y.view(), 0.2, DEFAULT_SEED).unwrap();

            let expected_test = (0.2 * n as f64).round() as usize;
            let expected_train = (0.8 * n as f64).round() as usize;
            assert_eq!(split.x_test.nrows(), expected_test, "n = {n}");
            assert_eq!(split.x_train.nrows(), expected_train, "n = {n}");
            assert_eq!(split.y_test.len(), expected_test);
            assert_eq!(split.y_train.len(), expected_train);
        }
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let (x, y) = dataset(20);
        let a = train_test_split(x.view(), y.view(), 0.2, 42).unwrap();
        let b = train_test_split(x.view(), y.view(), 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn split_keeps_rows_aligned_and_disjoint() {
        let (x, y) = dataset(30);
        let split = train_test_split(x.view(), y.view(), 0.2, 7).unwrap();

        for (row, target) in split.x_train.rows().into_iter().zip(&split.y_train) {
            assert_eq!(row[0], target * 10.0);
        }
        for (row, target) in split.x_test.rows().into_iter().zip(&split.y_test) {
            assert_eq!(row[0], target * 10.0);
        }

        let mut all: Vec<f64> = split.y_train.iter().chain(&split.y_test).copied().collect();
        all.sort_by(f64::total_cmp);
        assert_eq!(all, y.to_vec());
    }

    #[test]
    fn split_rejects_misaligned_targets() {
        let (x, _) = dataset(4);
        let y = Array1::zeros(3);
        assert!(matches!(
            train_test_split(x.view(), y.view(), 0.2, 42),
            Err(MlError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn split_rejects_out_of_range_fractions() {
        let (x, y) = dataset(4);
        for fraction in [-0.1, 1.0, f64::NAN] {
            assert!(matches!(
                train_test_split(x.view(), y.view(), fraction, 42),
                Err(MlError::InvalidInput(_))
            ));
        }
    }
}
