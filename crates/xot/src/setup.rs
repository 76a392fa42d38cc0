use async_trait::async_trait;
use xot_core::{PadVector, SelectedPads, TransferId};

use crate::XotError;

/// Delivers the sender's pads to the setup functionality.
#[async_trait]
pub trait PadSetupSender<Io> {
    /// Provides the pads of every invocation of a batch.
    ///
    /// # Arguments
    ///
    /// * `io` - The I/O channel.
    /// * `id` - The transfer id of the batch.
    /// * `pads` - The pads, one vector per invocation.
    async fn provide(
        &mut self,
        io: &mut Io,
        id: TransferId,
        pads: Vec<PadVector>,
    ) -> Result<(), XotError>;
}

/// Obtains the receiver's pads from the setup functionality.
#[async_trait]
pub trait PadSetupReceiver<Io> {
    /// Obtains the pads at the selected positions of every invocation of a batch.
    ///
    /// # Arguments
    ///
    /// * `io` - The I/O channel.
    /// * `id` - The transfer id of the batch.
    /// * `positions` - The selected positions per invocation, `None` for invocations the
    ///   receiver abandoned.
    async fn obtain(
        &mut self,
        io: &mut Io,
        id: TransferId,
        positions: Vec<Option<Vec<usize>>>,
    ) -> Result<Vec<Option<SelectedPads>>, XotError>;
}
