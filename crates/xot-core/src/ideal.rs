//! Ideal pad setup functionality.
//!
//! The receiver needs the sender's pads at its selected positions to decrypt the filtered
//! ciphertexts. This functionality delivers exactly those pads, without revealing the selection
//! to the sender.

use crate::{PadVector, SelectedPads, TransferError};

/// The ideal pad setup functionality.
#[derive(Debug, Default)]
pub struct IdealPadSetup {
    invocations: usize,
    delivered: usize,
}

impl IdealPadSetup {
    /// Creates a new ideal pad setup functionality.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of invocations served.
    pub fn invocations(&self) -> usize {
        self.invocations
    }

    /// Returns the number of pads delivered to the receiver.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Delivers the sender's pads at `positions` to the receiver.
    ///
    /// # Arguments
    ///
    /// * `pads` - The sender's pads for one invocation.
    /// * `positions` - The receiver's selected message positions.
    pub fn deliver(
        &mut self,
        pads: &PadVector,
        positions: &[usize],
    ) -> Result<SelectedPads, TransferError> {
        let selected = pads.select(positions)?;

        self.invocations += 1;
        self.delivered += selected.len();

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ideal_pad_setup() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut setup = IdealPadSetup::new();

        let pads = PadVector::random(&mut rng, 8, 128);
        let selected = setup.deliver(&pads, &[3, 6]).unwrap();

        assert_eq!(selected.get(3).unwrap(), &pads.as_slice()[3]);
        assert_eq!(selected.get(6).unwrap(), &pads.as_slice()[6]);
        assert_eq!(setup.invocations(), 1);
        assert_eq!(setup.delivered(), 2);

        assert!(setup.deliver(&pads, &[8]).is_err());
        assert_eq!(setup.invocations(), 1);
    }
}
