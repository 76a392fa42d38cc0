//! 1-out-of-n OT receiver.

use rand::{CryptoRng, Rng};

use crate::{
    msgs::{Query, Response},
    share, tbcs, OneOfNConfig, SecretValue, SelectedPads, TransferError,
};

/// 1-out-of-n OT receiver.
#[derive(Debug)]
pub struct Receiver<T: state::State = state::Initialized> {
    config: OneOfNConfig,
    state: T,
}

impl Receiver {
    /// Creates a new receiver.
    pub fn new(config: OneOfNConfig) -> Self {
        Receiver {
            config,
            state: state::Initialized {},
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OneOfNConfig {
        &self.config
    }

    /// Splits the index into two shares, returning the query for the sender.
    ///
    /// # Arguments
    ///
    /// * `rng` - The source of the random share.
    /// * `idx` - The index of the message to receive.
    pub fn query<R: Rng + CryptoRng + ?Sized>(
        self,
        rng: &mut R,
        idx: usize,
    ) -> Result<(Receiver<state::Queried>, Query), TransferError> {
        let (share_1, share_2) = share::split(rng, idx, self.config.n())?;

        Ok((
            Receiver {
                config: self.config,
                state: state::Queried {
                    idx,
                    share: share_2,
                },
            },
            Query { share: share_1 },
        ))
    }
}

impl Receiver<state::Queried> {
    /// Returns the selected index.
    pub fn idx(&self) -> usize {
        self.state.idx
    }

    /// Applies the swap network with the retained share, keeping the ciphertext of the
    /// selected message.
    ///
    /// # Arguments
    ///
    /// * `response` - The sender's response.
    pub fn filter(self, response: Response) -> Result<Receiver<state::Filtered>, TransferError> {
        let Response { mut ciphertexts } = response;

        if ciphertexts.len() != self.config.n() {
            return Err(TransferError::config(format!(
                "expected {} ciphertexts, got {}",
                self.config.n(),
                ciphertexts.len()
            )));
        }

        tbcs::apply(&mut ciphertexts, self.state.share.bits())?;

        // The swap network moved the selected ciphertext to the front.
        let ciphertext = ciphertexts.swap_remove(0);

        Ok(Receiver {
            config: self.config,
            state: state::Filtered {
                idx: self.state.idx,
                ciphertext,
            },
        })
    }
}

impl Receiver<state::Filtered> {
    /// Returns the selected index.
    pub fn idx(&self) -> usize {
        self.state.idx
    }

    /// Decrypts the selected message.
    ///
    /// # Arguments
    ///
    /// * `pads` - The pads delivered to the receiver during setup.
    pub fn retrieve(self, pads: &SelectedPads) -> Result<SecretValue, TransferError> {
        let pad = pads.get(self.state.idx)?;

        Ok(self.state.ciphertext ^ pad)
    }
}

/// The receiver's state.
pub mod state {
    use super::*;

    use crate::share::IndexShare;

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
        pub(super) idx: usize,
        /// The share which was not sent to the sender.
        pub(super) share: IndexShare,
    }

    impl State for Queried {}

    opaque_debug::implement!(Queried);

    /// The receiver's state after filtering the response.
    pub struct Filtered {
        pub(super) idx: usize,
        /// The ciphertext of the selected message.
        pub(super) ciphertext: SecretValue,
    }

    impl State for Filtered {}

    opaque_debug::implement!(Filtered);
}
