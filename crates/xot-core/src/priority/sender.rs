//! Priority OT sender.

use rand::{CryptoRng, Rng};

use crate::{
    msgs::{PermutationQuery, Response},
    PadVector, PriorityConfig, SecretValue, TransferError,
};

/// Priority OT sender.
#[derive(Debug)]
pub struct Sender<T: state::State = state::Initialized> {
    config: PriorityConfig,
    state: T,
}

impl Sender {
    /// Creates a new sender.
    pub fn new(config: PriorityConfig) -> Self {
        Sender {
            config,
            state: state::Initialized {},
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PriorityConfig {
        &self.config
    }

    /// Samples fresh pads for a single invocation.
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
    /// The blinded message `c_i` is placed at the position of `i` in the receiver's permutation,
    /// so that `response[j] = c[w[j]]`. The pads are consumed.
    ///
    /// # Arguments
    ///
    /// * `messages` - The `n` messages.
    /// * `query` - The receiver's query.
    pub fn respond(
        self,
        messages: &[SecretValue],
        query: PermutationQuery,
    ) -> Result<Response, TransferError> {
        let PermutationQuery { permutation } = query;

        if permutation.len() != self.config.n() {
            return Err(TransferError::config(format!(
                "expected a permutation of {} elements, got {}",
                self.config.n(),
                permutation.len()
            )));
        }

        let positions = permutation.positions()?;
        let blinded = self.state.pads.blind(messages)?;

        let mut ciphertexts = vec![SecretValue::zero(); blinded.len()];
        for (c, &position) in blinded.into_iter().zip(&positions) {
            ciphertexts[position] = c;
        }

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
        pub(super) pads: PadVector,
    }

    impl State for Setup {}

    opaque_debug::implement!(Setup);
}
