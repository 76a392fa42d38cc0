//! One-time pads.

use std::collections::HashMap;

use rand::{CryptoRng, Rng};

use crate::{SecretValue, TransferError};

/// The sender's one-time pads for a single invocation.
///
/// A pad vector is generated fresh for every invocation and consumed when the sender computes
/// its response.
#[derive(Clone, PartialEq, Eq)]
pub struct PadVector {
    pads: Vec<SecretValue>,
    bit_size: usize,
}

opaque_debug::implement!(PadVector);

impl PadVector {
    /// Generates `n` uniformly random pads of `bit_size` bits.
    pub fn random<R: Rng + CryptoRng + ?Sized>(rng: &mut R, n: usize, bit_size: usize) -> Self {
        Self {
            pads: (0..n).map(|_| SecretValue::random(rng, bit_size)).collect(),
            bit_size,
        }
    }

    /// Returns the number of pads.
    pub fn len(&self) -> usize {
        self.pads.len()
    }

    /// Returns `true` if there are no pads.
    pub fn is_empty(&self) -> bool {
        self.pads.is_empty()
    }

    /// Returns the bit width of the pads.
    pub fn bit_size(&self) -> usize {
        self.bit_size
    }

    /// Returns the pads.
    pub fn as_slice(&self) -> &[SecretValue] {
        &self.pads
    }

    /// Blinds the messages with the pads, `c_i = m_i ^ r_i`.
    ///
    /// Every message must fit into the bit width of the pads, otherwise its high bits would be
    /// sent in the clear.
    pub(crate) fn blind(&self, messages: &[SecretValue]) -> Result<Vec<SecretValue>, TransferError> {
        crate::config::check_messages(self.pads.len(), self.bit_size, messages)?;

        Ok(messages.iter().zip(&self.pads).map(|(m, r)| m ^ r).collect())
    }

    /// Returns the pads at the provided positions.
    ///
    /// This is the part of the pad vector which is handed to the receiver during setup.
    pub fn select(&self, positions: &[usize]) -> Result<SelectedPads, TransferError> {
        let pads = positions
            .iter()
            .map(|&pos| {
                TransferError::check_range(pos, self.pads.len())?;
                Ok((pos, self.pads[pos].clone()))
            })
            .collect::<Result<_, TransferError>>()?;

        Ok(SelectedPads(pads))
    }
}

/// The pads known to the receiver, keyed by message position.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct SelectedPads(HashMap<usize, SecretValue>);

opaque_debug::implement!(SelectedPads);

impl SelectedPads {
    /// Returns the number of pads.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no pads.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the pad for message `position`.
    pub fn get(&self, position: usize) -> Result<&SecretValue, TransferError> {
        self.0
            .get(&position)
            .ok_or(TransferError::IndexMap(position))
    }
}

impl FromIterator<(usize, SecretValue)> for SelectedPads {
    fn from_iter<T: IntoIterator<Item = (usize, SecretValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
