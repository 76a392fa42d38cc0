//! XOR secret sharing of a selection index.

use itybity::ToBits;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::{tbcs, TransferError};

/// One XOR share of the bits of an index, most significant bit first.
///
/// The share doubles as the control string of the swap network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexShare(Vec<bool>);

impl IndexShare {
    /// Returns the share bits.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Returns the number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the share has no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<bool>> for IndexShare {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

/// Splits `idx` into two shares which XOR to the `log2(n)` bits of `idx`.
///
/// The first share is uniformly random and the second is its complement against the index
/// bits, so either share on its own is independent of `idx`.
///
/// # Arguments
///
/// * `rng` - The source of the random share.
/// * `idx` - The index to share.
/// * `n` - The number of messages, must be a power of two.
pub fn split<R: Rng + CryptoRng + ?Sized>(
    rng: &mut R,
    idx: usize,
    n: usize,
) -> Result<(IndexShare, IndexShare), TransferError> {
    let e = tbcs::depth(n)?;
    TransferError::check_range(idx, n)?;

    if n == 2 {
        let share_1: bool = rng.gen();
        let share_2 = share_1 ^ (idx == 1);

        return Ok((IndexShare(vec![share_1]), IndexShare(vec![share_2])));
    }

    let (share_1, share_2): (Vec<bool>, Vec<bool>) = (idx as u64)
        .iter_msb0()
        .skip(64 - e)
        .map(|bit| {
            let random: bool = rng.gen();
            (random, random ^ bit)
        })
        .unzip();

    Ok((IndexShare(share_1), IndexShare(share_2)))
}

/// Reconstructs the index from two shares.
pub fn reconstruct(share_1: &IndexShare, share_2: &IndexShare) -> Result<usize, TransferError> {
    if share_1.len() != share_2.len() {
        return Err(TransferError::config(format!(
            "shares have unequal length: {} != {}",
            share_1.len(),
            share_2.len()
        )));
    }

    Ok(share_1
        .0
        .iter()
        .zip(&share_2.0)
        .fold(0, |acc, (a, b)| (acc << 1) | usize::from(a ^ b)))
}
