//! Ordered t-out-of-n ("priority") oblivious transfer.

mod receiver;
mod sender;

pub use receiver::Receiver;
pub use sender::Sender;

use rand_chacha::ChaCha12Rng;
use xot_core::{
    msgs::{PermutationQuery, Response},
    priority, PadVector, PriorityConfig, SecretValue, SelectedPads, TransferError,
};

use crate::protocol::Protocol;

pub(crate) struct Priority;

impl Protocol for Priority {
    type Config = PriorityConfig;
    type Choice = Vec<usize>;
    type Query = PermutationQuery;
    type Output = Vec<SecretValue>;
    type Sender = priority::Sender<priority::sender::state::Setup>;
    type Receiver = priority::Receiver<priority::receiver::state::Queried>;

    fn count(config: &PriorityConfig) -> usize {
        config.count()
    }

    fn setup(config: &PriorityConfig, rng: &mut ChaCha12Rng) -> Self::Sender {
        priority::Sender::new(config.clone()).setup(rng)
    }

    fn pads(sender: &Self::Sender) -> &PadVector {
        sender.pads()
    }

    fn respond(
        sender: Self::Sender,
        messages: &[SecretValue],
        query: PermutationQuery,
    ) -> Result<Response, TransferError> {
        sender.respond(messages, query)
    }

    fn query(
        config: &PriorityConfig,
        rng: &mut ChaCha12Rng,
        priorities: &Vec<usize>,
    ) -> Result<(Self::Receiver, PermutationQuery), TransferError> {
        priority::Receiver::new(config.clone()).query(rng, priorities)
    }

    fn positions(receiver: &Self::Receiver) -> Vec<usize> {
        receiver.priorities().to_vec()
    }

    fn finish(
        receiver: Self::Receiver,
        response: Response,
        pads: &SelectedPads,
    ) -> Result<Vec<SecretValue>, TransferError> {
        receiver.filter(response)?.retrieve(pads)
    }
}
