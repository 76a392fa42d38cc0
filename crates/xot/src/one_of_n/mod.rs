//! 1-out-of-n oblivious transfer.

mod receiver;
mod sender;

pub use receiver::Receiver;
pub use sender::Sender;

use rand_chacha::ChaCha12Rng;
use xot_core::{
    msgs::{Query, Response},
    one_of_n, OneOfNConfig, PadVector, SecretValue, SelectedPads, TransferError,
};

use crate::protocol::Protocol;

pub(crate) struct OneOfN;

impl Protocol for OneOfN {
    type Config = OneOfNConfig;
    type Choice = usize;
    type Query = Query;
    type Output = SecretValue;
    type Sender = one_of_n::Sender<one_of_n::sender::state::Setup>;
    type Receiver = one_of_n::Receiver<one_of_n::receiver::state::Queried>;

    fn count(config: &OneOfNConfig) -> usize {
        config.count()
    }

    fn setup(config: &OneOfNConfig, rng: &mut ChaCha12Rng) -> Self::Sender {
        one_of_n::Sender::new(config.clone()).setup(rng)
    }

    fn pads(sender: &Self::Sender) -> &PadVector {
        sender.pads()
    }

    fn respond(
        sender: Self::Sender,
        messages: &[SecretValue],
        query: Query,
    ) -> Result<Response, TransferError> {
        sender.respond(messages, query)
    }

    fn query(
        config: &OneOfNConfig,
        rng: &mut ChaCha12Rng,
        idx: &usize,
    ) -> Result<(Self::Receiver, Query), TransferError> {
        one_of_n::Receiver::new(config.clone()).query(rng, *idx)
    }

    fn positions(receiver: &Self::Receiver) -> Vec<usize> {
        vec![receiver.idx()]
    }

    fn finish(
        receiver: Self::Receiver,
        response: Response,
        pads: &SelectedPads,
    ) -> Result<SecretValue, TransferError> {
        receiver.filter(response)?.retrieve(pads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        ideal::{ideal_pad_setup, IdealPadReceiver, IdealPadSender},
        ErrorKind, PadSetupSender, ReceiverRole, SenderRole, TransferId, XotError,
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rstest::*;
    use serio::{channel::duplex, stream::IoStreamExt, SinkExt};
    use xot_core::{
        msgs::{BatchQuery, BatchResponse},
        test::{assert_one_of_n, random_messages},
    };

    fn setup(config: OneOfNConfig) -> (Sender<IdealPadSender>, Receiver<IdealPadReceiver>) {
        let (pad_sender, pad_receiver) = ideal_pad_setup();

        (
            Sender::new_with_rng(config.clone(), pad_sender, ChaCha12Rng::seed_from_u64(0)),
            Receiver::new_with_rng(config, pad_receiver, ChaCha12Rng::seed_from_u64(1)),
        )
    }

    #[rstest]
    #[case(2, 1)]
    #[case(16, 8)]
    #[case(256, 4)]
    #[tokio::test]
    async fn test_one_of_n(#[case] n: usize, #[case] count: usize) {
        let _ = tracing_subscriber::fmt::try_init();

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = OneOfNConfig::builder().n(n).count(count).build().unwrap();
        let (mut sender, mut receiver) = setup(config);

        let messages: Vec<_> = (0..count)
            .map(|_| random_messages(&mut rng, n, 128))
            .collect();
        let choices: Vec<usize> = (0..count).map(|_| rng.gen_range(0..n)).collect();

        let (mut io_sender, mut io_receiver) = duplex(8);

        let (sender_output, receiver_output) = tokio::try_join!(
            sender.send(&mut io_sender, messages.clone()),
            receiver.receive(&mut io_receiver, choices.clone())
        )
        .unwrap();

        assert_eq!(sender_output.id, receiver_output.id);
        assert_eq!(sender_output.answered, count);

        let received = receiver_output.into_result().unwrap();

        assert_one_of_n(&messages, &choices, &received);
    }

    #[tokio::test]
    async fn test_invalid_choice_fails_locally() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = OneOfNConfig::builder().n(4).count(3).build().unwrap();
        let (mut sender, mut receiver) = setup(config);

        let messages: Vec<_> = (0..3).map(|_| random_messages(&mut rng, 4, 128)).collect();

        let (mut io_sender, mut io_receiver) = duplex(8);

        let (sender_output, receiver_output) = tokio::try_join!(
            sender.send(&mut io_sender, messages.clone()),
            receiver.receive(&mut io_receiver, vec![3, 4, 0])
        )
        .unwrap();

        assert_eq!(sender_output.answered, 2);
        assert_eq!(sender_output.unanswered, 1);

        let outputs = receiver_output.outputs;

        assert_eq!(outputs[0].as_ref().unwrap(), &messages[0][3]);
        assert_eq!(
            outputs[1].as_ref().unwrap_err().as_core(),
            Some(&TransferError::Range { index: 4, bound: 4 })
        );
        assert_eq!(outputs[2].as_ref().unwrap(), &messages[2][0]);
    }

    #[tokio::test]
    async fn test_wide_message_set_is_unanswered() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = OneOfNConfig::builder()
            .n(4)
            .bit_size(8)
            .count(2)
            .build()
            .unwrap();
        let (mut sender, mut receiver) = setup(config);

        let good = random_messages(&mut rng, 4, 8);
        let mut wide = random_messages(&mut rng, 4, 8);
        wide[3] = SecretValue::from(0x100u64);

        let (mut io_sender, mut io_receiver) = duplex(8);

        let (sender_output, receiver_output) = tokio::try_join!(
            sender.send(&mut io_sender, vec![good.clone(), wide]),
            receiver.receive(&mut io_receiver, vec![1, 2])
        )
        .unwrap();

        assert_eq!(sender_output.answered, 1);
        assert_eq!(sender_output.unanswered, 1);

        let outputs = receiver_output.outputs;

        assert_eq!(outputs[0].as_ref().unwrap(), &good[1]);
        assert_eq!(outputs[1].as_ref().unwrap_err().kind(), ErrorKind::Rejected);
    }

    #[tokio::test]
    async fn test_consecutive_batches() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = OneOfNConfig::builder().n(8).count(2).build().unwrap();
        let (mut sender, mut receiver) = setup(config);

        let (mut io_sender, mut io_receiver) = duplex(8);
        let mut expected = TransferId::default();

        for _ in 0..3 {
            let messages: Vec<_> = (0..2).map(|_| random_messages(&mut rng, 8, 128)).collect();
            let choices = vec![5, 5];

            let (sender_output, receiver_output) = tokio::try_join!(
                sender.send(&mut io_sender, messages.clone()),
                receiver.receive(&mut io_receiver, choices.clone())
            )
            .unwrap();

            let id = expected.next_id();

            assert_eq!(sender_output.id, id);
            assert_eq!(receiver_output.id, id);
            assert_one_of_n(&messages, &choices, &receiver_output.into_result().unwrap());
        }

        assert_eq!(sender.id(), receiver.id());
    }

    #[tokio::test]
    async fn test_wrong_transfer_id() {
        let config = OneOfNConfig::builder().n(4).build().unwrap();
        let (mut pad_sender, pad_receiver) = ideal_pad_setup();
        let mut receiver =
            Receiver::new_with_rng(config, pad_receiver, ChaCha12Rng::seed_from_u64(1));

        let mut id = TransferId::default();
        let expected = id.next_id();
        let wrong = id.next_id();

        let pads = vec![PadVector::random(&mut ChaCha8Rng::seed_from_u64(0), 4, 128)];
        let (mut io_sender, mut io_receiver) = duplex(8);

        // A sender which replies under a different transfer id.
        let fake_sender = async {
            PadSetupSender::provide(&mut pad_sender, &mut io_sender, expected, pads).await?;
            let query: BatchQuery<Query> = io_sender.expect_next().await?;
            io_sender
                .send(BatchResponse {
                    id: wrong,
                    responses: vec![None; query.queries.len()],
                })
                .await?;
            Ok::<_, XotError>(())
        };

        let (sent, received) =
            tokio::join!(fake_sender, receiver.receive(&mut io_receiver, vec![1]));

        sent.unwrap();
        let err = received.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Core);
        assert_eq!(err.as_core(), Some(&TransferError::WrongId(wrong, expected)));
    }

    #[tokio::test]
    async fn test_wrong_batch_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = OneOfNConfig::builder().n(4).count(2).build().unwrap();
        let (mut sender, mut receiver) = setup(config);

        let (mut io_sender, mut io_receiver) = duplex(8);

        let err = sender
            .send(&mut io_sender, vec![random_messages(&mut rng, 4, 128)])
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(TransferError::Configuration(_))));

        let err = receiver
            .receive(&mut io_receiver, vec![0, 1, 2])
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(TransferError::Configuration(_))));

        // Nothing was consumed.
        assert_eq!(sender.id(), TransferId::default());
        assert_eq!(receiver.id(), TransferId::default());
    }
}
