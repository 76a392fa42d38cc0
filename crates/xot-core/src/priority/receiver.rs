//! Priority OT receiver.

use rand::{CryptoRng, Rng};

use crate::{
    msgs::{PermutationQuery, Response},
    permutation::Permutation,
    PriorityConfig, SecretValue, SelectedPads, TransferError,
};

/// Priority OT receiver.
#[derive(Debug)]
pub struct Receiver<T: state::State = state::Initialized> {
    config: PriorityConfig,
    state: T,
}

impl Receiver {
    /// Creates a new receiver.
    pub fn new(config: PriorityConfig) -> Self {
        Receiver {
            config,
            state: state::Initialized {},
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PriorityConfig {
        &self.config
    }

    /// Blinds the ranked selection with a fresh random permutation, returning the query for the
    /// sender.
    ///
    /// # Arguments
    ///
    /// * `rng` - The source of the permutation.
    /// * `priorities` - The `t` distinct indices to receive, highest priority first.
    pub fn query<R: Rng + CryptoRng + ?Sized>(
        self,
        rng: &mut R,
        priorities: &[usize],
    ) -> Result<(Receiver<state::Queried>, PermutationQuery), TransferError> {
        self.config.check_priorities(priorities)?;

        let permutation = Permutation::random(rng, self.config.n());
        let positions = permutation.preimage(priorities)?;

        Ok((
            Receiver {
                config: self.config,
                state: state::Queried {
                    priorities: priorities.to_vec(),
                    positions,
                },
            },
            PermutationQuery { permutation },
        ))
    }
}

impl Receiver<state::Queried> {
    /// Returns the ranked selection.
    pub fn priorities(&self) -> &[usize] {
        &self.state.priorities
    }

    /// Picks the ciphertexts of the selected messages from the response, in rank order.
    ///
    /// # Arguments
    ///
    /// * `response` - The sender's response.
    pub fn filter(self, response: Response) -> Result<Receiver<state::Filtered>, TransferError> {
        let Response { ciphertexts } = response;

        if ciphertexts.len() != self.config.n() {
            return Err(TransferError::config(format!(
                "expected {} ciphertexts, got {}",
                self.config.n(),
                ciphertexts.len()
            )));
        }

        let ciphertexts = self
            .state
            .positions
            .iter()
            .map(|&y| ciphertexts[y].clone())
            .collect();

        Ok(Receiver {
            config: self.config,
            state: state::Filtered {
                priorities: self.state.priorities,
                ciphertexts,
            },
        })
    }
}

impl Receiver<state::Filtered> {
    /// Returns the ranked selection.
    pub fn priorities(&self) -> &[usize] {
        &self.state.priorities
    }

    /// Decrypts the message of priority rank `k`.
    ///
    /// # Arguments
    ///
    /// * `k` - The rank, must be less than `t`.
    /// * `pads` - The pads delivered to the receiver during setup.
    pub fn retrieve_rank(&self, k: usize, pads: &SelectedPads) -> Result<SecretValue, TransferError> {
        TransferError::check_range(k, self.state.priorities.len())?;

        let pad = pads.get(self.state.priorities[k])?;

        Ok(&self.state.ciphertexts[k] ^ pad)
    }

    /// Decrypts all selected messages, in rank order.
    ///
    /// # Arguments
    ///
    /// * `pads` - The pads delivered to the receiver during setup.
    pub fn retrieve(self, pads: &SelectedPads) -> Result<Vec<SecretValue>, TransferError> {
        (0..self.state.priorities.len())
            .map(|k| self.retrieve_rank(k, pads))
            .collect()
    }
}

/// The receiver's state.
pub mod state {
    use super::*;

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Queried {}
        impl Sealed for super::Filtered {}
    }

    /// The receiver's state.
    pub trait State: sealed::Sealed {}

    /// The receiver's initial state.
    pub struct Initialized {}

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    /// The receiver's state after sending its query.
    pub struct Queried {
        pub(super) priorities: Vec<usize>,
        /// Positions `y` of the priorities in the permuted response.
        pub(super) positions: Vec<usize>,
    }

    impl State for Queried {}

    opaque_debug::implement!(Queried);

    /// The receiver's state after filtering the response.
    pub struct Filtered {
        pub(super) priorities: Vec<usize>,
        pub(super) ciphertexts: Vec<SecretValue>,
    }

    impl State for Filtered {}

    opaque_debug::implement!(Filtered);
}
