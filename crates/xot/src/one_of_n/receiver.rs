use async_trait::async_trait;
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serio::IoDuplex;
use tracing::instrument;
use xot_core::{OneOfNConfig, SecretValue, TransferId};

use super::OneOfN;
use crate::{protocol::receive_batch, PadSetupReceiver, ReceiverOutput, ReceiverRole, XotError};

/// 1-out-of-n OT receiver.
#[derive(Debug)]
pub struct Receiver<P> {
    config: OneOfNConfig,
    pad_setup: P,
    rng: ChaCha12Rng,
    id: TransferId,
}

impl<P> Receiver<P> {
    /// Creates a new receiver.
    ///
    /// # Arguments
    ///
    /// * `config` - The receiver's configuration.
    /// * `pad_setup` - The functionality delivering the pads to the receiver.
    pub fn new(config: OneOfNConfig, pad_setup: P) -> Self {
        Self::new_with_rng(config, pad_setup, ChaCha12Rng::from_seed(thread_rng().gen()))
    }

    /// Creates a new receiver with the provided RNG.
    pub fn new_with_rng(config: OneOfNConfig, pad_setup: P, rng: ChaCha12Rng) -> Self {
        Self {
            config,
            pad_setup,
            rng,
            id: TransferId::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OneOfNConfig {
        &self.config
    }

    /// Returns the transfer id of the next batch.
    pub fn id(&self) -> TransferId {
        self.id
    }
}

#[async_trait]
impl<Io, P> ReceiverRole<Io, usize, SecretValue> for Receiver<P>
where
    Io: IoDuplex + Unpin + Send,
    P: PadSetupReceiver<Io> + Send,
{
    #[instrument(level = "debug", fields(id = %self.id), skip_all, err)]
    async fn receive(
        &mut self,
        io: &mut Io,
        choices: Vec<usize>,
    ) -> Result<ReceiverOutput<SecretValue>, XotError> {
        receive_batch::<OneOfN, _, _>(
            &self.config,
            &mut self.pad_setup,
            &mut self.rng,
            &mut self.id,
            io,
            choices,
        )
        .await
    }
}
