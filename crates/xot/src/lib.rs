//! Async implementations of XOR-based oblivious transfer.
//!
//! The roles in this crate drive the protocols of [`xot_core`] over a duplex I/O channel. A
//! batch of `count` invocations is transferred with a single query and a single response, the
//! pads are delivered to the receiver through a [`PadSetupSender`] / [`PadSetupReceiver`] pair.

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

mod error;
#[cfg(any(test, feature = "ideal"))]
pub mod ideal;
pub mod one_of_n;
pub mod priority;
mod protocol;
mod setup;

use async_trait::async_trait;

pub use error::{ErrorKind, XotError};
pub use setup::{PadSetupReceiver, PadSetupSender};
pub use xot_core::{
    OneOfNConfig, OneOfNConfigBuilder, PriorityConfig, PriorityConfigBuilder, SecretValue,
    TransferError, TransferId,
};

/// The output of a sender batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenderOutput {
    /// The transfer id of the batch.
    pub id: TransferId,
    /// The number of invocations which were answered.
    pub answered: usize,
    /// The number of invocations which were not answered.
    pub unanswered: usize,
}

/// The output of a receiver batch.
#[derive(Debug)]
pub struct ReceiverOutput<T> {
    /// The transfer id of the batch.
    pub id: TransferId,
    /// The outcome of every invocation, in batch order.
    pub outputs: Vec<Result<T, XotError>>,
}

impl<T> ReceiverOutput<T> {
    /// Returns the received messages, or the first error of the batch.
    pub fn into_result(self) -> Result<Vec<T>, XotError> {
        self.outputs.into_iter().collect()
    }
}

/// The sender of an oblivious transfer.
#[async_trait]
pub trait SenderRole<Io> {
    /// Obliviously transfers a batch of message sets.
    ///
    /// # Arguments
    ///
    /// * `io` - The I/O channel.
    /// * `messages` - The messages, one set per invocation.
    async fn send(
        &mut self,
        io: &mut Io,
        messages: Vec<Vec<SecretValue>>,
    ) -> Result<SenderOutput, XotError>;
}

/// The receiver of an oblivious transfer.
#[async_trait]
pub trait ReceiverRole<Io, C, T> {
    /// Obliviously receives the selected messages of a batch.
    ///
    /// Invocations fail independently, an error is only returned if the batch as a whole could
    /// not be executed.
    ///
    /// # Arguments
    ///
    /// * `io` - The I/O channel.
    /// * `choices` - The selection, one per invocation.
    async fn receive(
        &mut self,
        io: &mut Io,
        choices: Vec<C>,
    ) -> Result<ReceiverOutput<T>, XotError>;
}

pub(crate) fn check_batch(count: usize, len: usize, what: &str) -> Result<(), TransferError> {
    if len != count {
        return Err(TransferError::Configuration(format!(
            "expected {count} {what}, got {len}"
        )));
    }

    Ok(())
}
