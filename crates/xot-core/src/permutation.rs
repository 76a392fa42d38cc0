//! Random permutations hiding a ranked selection.

use rand::{seq::SliceRandom, CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::TransferError;

/// A permutation `w` of `[0, n)`.
///
/// Position `j` of the sender's response holds the blinded message `w[j]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Samples a uniformly random permutation of `[0, n)` using a Fisher-Yates shuffle.
    pub fn random<R: Rng + CryptoRng + ?Sized>(rng: &mut R, n: usize) -> Self {
        let mut w: Vec<usize> = (0..n).collect();
        w.shuffle(rng);
        Self(w)
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the permutation is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the permuted indices.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Returns the inverse lookup table, mapping every value of `w` to its position.
    ///
    /// Returns an error if `w` is not a bijection on `[0, n)`. The error names the smallest
    /// index which is missing from `w`.
    pub fn positions(&self) -> Result<Vec<usize>, TransferError> {
        let n = self.0.len();
        let mut positions = vec![None; n];

        for (position, &value) in self.0.iter().enumerate() {
            // Out of range or duplicated values leave another index unmapped.
            if let Some(slot @ None) = positions.get_mut(value) {
                *slot = Some(position);
            }
        }

        positions
            .into_iter()
            .enumerate()
            .map(|(value, position)| position.ok_or(TransferError::IndexMap(value)))
            .collect()
    }

    /// Computes the positions `y` of the priorities, such that `w[y[k]] = p[k]`.
    ///
    /// # Arguments
    ///
    /// * `priorities` - The ranked selection `p`, the entries must be distinct and less than `n`.
    pub fn preimage(&self, priorities: &[usize]) -> Result<Vec<usize>, TransferError> {
        let n = self.0.len();
        for &p in priorities {
            TransferError::check_range(p, n)?;
        }

        if n == 2 {
            // A permutation of two elements is its own inverse.
            return Ok(priorities.iter().map(|&p| self.0[p]).collect());
        }

        let positions = self.positions()?;
        Ok(priorities.iter().map(|&p| positions[p]).collect())
    }
}

impl From<Vec<usize>> for Permutation {
    fn from(w: Vec<usize>) -> Self {
        Self(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::*;

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(16)]
    #[case(1000)]
    fn test_random_is_bijection(#[case] n: usize) {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for _ in 0..8 {
            let w = Permutation::random(&mut rng, n);

            let mut sorted = w.as_slice().to_vec();
            sorted.sort_unstable();

            assert_eq!(sorted, (0..n).collect::<Vec<_>>());
            assert!(w.positions().is_ok());
        }
    }

    #[rstest]
    #[case(2, vec![1])]
    #[case(2, vec![1, 0])]
    #[case(8, vec![5, 1, 7])]
    #[case(10, vec![9, 0, 3, 4])]
    fn test_preimage(#[case] n: usize, #[case] priorities: Vec<usize>) {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for _ in 0..8 {
            let w = Permutation::random(&mut rng, n);
            let y = w.preimage(&priorities).unwrap();

            for (&y, &p) in y.iter().zip(&priorities) {
                assert_eq!(w.as_slice()[y], p);
            }
        }
    }

    #[test]
    fn test_every_permutation_is_sampled() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..600 {
            seen.insert(Permutation::random(&mut rng, 3));
        }

        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_malformed_permutation() {
        assert_eq!(
            Permutation::from(vec![0, 0, 2]).positions().unwrap_err(),
            TransferError::IndexMap(1)
        );
        assert_eq!(
            Permutation::from(vec![0, 3, 2]).positions().unwrap_err(),
            TransferError::IndexMap(1)
        );
        assert_eq!(
            Permutation::from(vec![2, 0, 1]).positions().unwrap(),
            vec![1, 2, 0]
        );
    }

    #[test]
    fn test_preimage_out_of_range() {
        let w = Permutation::from(vec![1, 0, 2]);

        assert_eq!(
            w.preimage(&[3]).unwrap_err(),
            TransferError::Range { index: 3, bound: 3 }
        );
    }
}
