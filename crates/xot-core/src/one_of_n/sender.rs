//! 1-out-of-n OT sender.

use rand::{CryptoRng, Rng};

use crate::{
    msgs::{Query, Response},
    tbcs, OneOfNConfig, PadVector, SecretValue, TransferError,
};

/// 1-out-of-n OT sender.
#[derive(Debug)]
pub struct Sender<T: state::State = state::Initialized> {
    config: OneOfNConfig,
    state: T,
}

impl Sender {
    /// Creates a new sender.
    pub fn new(config: OneOfNConfig) -> Self {
        Sender {
            config,
            state: state::Initialized {},
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OneOfNConfig {
        &self.config
    }

    /// Samples fresh pads for a single invocation.
    ///
    /// # Arguments
    ///
    /// * `rng` - The source of the pads.
    pub fn setup<R: Rng + CryptoRng + ?Sized>(self, rng: &mut R) -> Sender<state::Setup> {
        let pads = PadVector::random(rng, self.config.n(), self.config.bit_size());

        Sender {
            config: self.config,
            state: state::Setup { pads },
        }
    }
}

impl Sender<state::Setup> {
    /// Returns the pads of this invocation.
    pub fn pads(&self) -> &PadVector {
        &self.state.pads
    }

    /// Computes the response to the receiver's query.
    ///
    /// The messages are blinded with the pads and permuted by the swap network, controlled by the
    /// receiver's index share. The pads are consumed.
    ///
    /// # Arguments
    ///
    /// * `messages` - The `n` messages.
    /// * `query` - The receiver's query.
    pub fn respond(
        self,
        messages: &[SecretValue],
        query: Query,
    ) -> Result<Response, TransferError> {
        let Query { share } = query;

        if share.len() != self.config.depth() {
            return Err(TransferError::config(format!(
                "expected an index share of {} bits, got {}",
                self.config.depth(),
                share.len()
            )));
        }

        let mut ciphertexts = self.state.pads.blind(messages)?;
        tbcs::apply(&mut ciphertexts, share.bits())?;

        Ok(Response { ciphertexts })
    }
}

/// The sender's state.
pub mod state {
    use super::*;

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Setup {}
    }

    /// The sender's state.
    pub trait State: sealed::Sealed {}

    /// The sender's initial state.
    pub struct Initialized {}

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    /// The sender's state after sampling the pads.
    pub struct Setup {
        /// The pads of this invocation.
        pub(super) pads: PadVector,
    }

    impl State for Setup {}

    opaque_debug::implement!(Setup);
}
