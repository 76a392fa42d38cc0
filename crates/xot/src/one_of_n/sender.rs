use async_trait::async_trait;
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serio::IoDuplex;
use tracing::instrument;
use xot_core::{OneOfNConfig, SecretValue, TransferId};

use super::OneOfN;
use crate::{protocol::send_batch, PadSetupSender, SenderOutput, SenderRole, XotError};

/// 1-out-of-n OT sender.
#[derive(Debug)]
pub struct Sender<P> {
    config: OneOfNConfig,
    pad_setup: P,
    rng: ChaCha12Rng,
    id: TransferId,
}

impl<P> Sender<P> {
    /// Creates a new sender.
    ///
    /// # Arguments
    ///
    /// * `config` - The sender's configuration.
    /// * `pad_setup` - The functionality delivering the pads to the receiver.
    pub fn new(config: OneOfNConfig, pad_setup: P) -> Self {
        Self::new_with_rng(config, pad_setup, ChaCha12Rng::from_seed(thread_rng().gen()))
    }

    /// Creates a new sender with the provided RNG.
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
impl<Io, P> SenderRole<Io> for Sender<P>
where
    Io: IoDuplex + Unpin + Send,
    P: PadSetupSender<Io> + Send,
{
    #[instrument(level = "debug", fields(id = %self.id), skip_all, err)]
    async fn send(
        &mut self,
        io: &mut Io,
        messages: Vec<Vec<SecretValue>>,
    ) -> Result<SenderOutput, XotError> {
        send_batch::<OneOfN, _, _>(
            &self.config,
            &mut self.pad_setup,
            &mut self.rng,
            &mut self.id,
            io,
            messages,
        )
        .await
    }
}
