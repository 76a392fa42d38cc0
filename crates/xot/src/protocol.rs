//! Batch flow shared by both protocols.

use rand_chacha::ChaCha12Rng;
use serio::{stream::IoStreamExt, IoDuplex, SinkExt};
use tracing::debug;
use xot_core::{
    msgs::{BatchQuery, BatchResponse, Response},
    PadVector, SecretValue, SelectedPads, TransferError, TransferId,
};

use crate::{
    check_batch, PadSetupReceiver, PadSetupSender, ReceiverOutput, SenderOutput, XotError,
};

/// The phases of a single invocation, as seen by the batch flow.
pub(crate) trait Protocol {
    type Config: Clone + Send + Sync;
    /// The receiver's selection for one invocation.
    type Choice: Send;
    type Query: serio::Serialize + serio::Deserialize;
    type Output: Send;
    /// Core sender after setup.
    type Sender: Send;
    /// Core receiver after the query.
    type Receiver: Send;

    fn count(config: &Self::Config) -> usize;

    fn setup(config: &Self::Config, rng: &mut ChaCha12Rng) -> Self::Sender;

    fn pads(sender: &Self::Sender) -> &PadVector;

    fn respond(
        sender: Self::Sender,
        messages: &[SecretValue],
        query: Self::Query,
    ) -> Result<Response, TransferError>;

    fn query(
        config: &Self::Config,
        rng: &mut ChaCha12Rng,
        choice: &Self::Choice,
    ) -> Result<(Self::Receiver, Self::Query), TransferError>;

    /// The message positions whose pads the receiver needs.
    fn positions(receiver: &Self::Receiver) -> Vec<usize>;

    fn finish(
        receiver: Self::Receiver,
        response: Response,
        pads: &SelectedPads,
    ) -> Result<Self::Output, TransferError>;
}

/// Runs the sender side of a batch.
///
/// Only the batch size is checked up front. A message set which does not fit the configuration
/// leaves its invocation unanswered, the pads of every invocation are provided regardless.
pub(crate) async fn send_batch<V, Io, P>(
    config: &V::Config,
    pad_setup: &mut P,
    rng: &mut ChaCha12Rng,
    next_id: &mut TransferId,
    io: &mut Io,
    messages: Vec<Vec<SecretValue>>,
) -> Result<SenderOutput, XotError>
where
    V: Protocol,
    Io: IoDuplex + Unpin + Send,
    P: PadSetupSender<Io> + Send,
{
    let count = V::count(config);
    check_batch(count, messages.len(), "message sets")?;

    let id = next_id.next_id();

    let senders: Vec<_> = (0..count).map(|_| V::setup(config, rng)).collect();

    let pads = senders.iter().map(|sender| V::pads(sender).clone()).collect();
    pad_setup.provide(io, id, pads).await?;

    debug!("provided pads");

    let BatchQuery {
        id: query_id,
        queries,
    }: BatchQuery<V::Query> = io.expect_next().await?;

    if query_id != id {
        return Err(TransferError::WrongId(query_id, id).into());
    }

    if queries.len() != count {
        return Err(XotError::protocol(format!(
            "expected {count} queries, got {}",
            queries.len()
        )));
    }

    let responses: Vec<_> = senders
        .into_iter()
        .zip(queries)
        .zip(&messages)
        .enumerate()
        .map(|(i, ((sender, query), messages))| match query {
            Some(query) => match V::respond(sender, messages, query) {
                Ok(response) => Some(response),
                Err(err) => {
                    debug!(invocation = i, %err, "rejected query");
                    None
                }
            },
            None => None,
        })
        .collect();

    let answered = responses.iter().flatten().count();

    io.send(BatchResponse { id, responses }).await?;

    debug!(answered, "sent responses");

    Ok(SenderOutput {
        id,
        answered,
        unanswered: count - answered,
    })
}

/// Runs the receiver side of a batch.
///
/// Invalid selections fail locally and are never sent, the remaining invocations proceed.
pub(crate) async fn receive_batch<V, Io, P>(
    config: &V::Config,
    pad_setup: &mut P,
    rng: &mut ChaCha12Rng,
    next_id: &mut TransferId,
    io: &mut Io,
    choices: Vec<V::Choice>,
) -> Result<ReceiverOutput<V::Output>, XotError>
where
    V: Protocol,
    Io: IoDuplex + Unpin + Send,
    P: PadSetupReceiver<Io> + Send,
{
    let count = V::count(config);
    check_batch(count, choices.len(), "choices")?;

    let id = next_id.next_id();

    let mut receivers = Vec::with_capacity(count);
    let mut queries = Vec::with_capacity(count);
    for (i, choice) in choices.iter().enumerate() {
        match V::query(config, rng, choice) {
            Ok((receiver, query)) => {
                receivers.push(Ok(receiver));
                queries.push(Some(query));
            }
            Err(err) => {
                debug!(invocation = i, %err, "invalid selection");
                receivers.push(Err(XotError::from(err)));
                queries.push(None);
            }
        }
    }

    let positions = receivers
        .iter()
        .map(|receiver| receiver.as_ref().ok().map(V::positions))
        .collect();
    let pads = pad_setup.obtain(io, id, positions).await?;

    if pads.len() != count {
        return Err(XotError::state(format!(
            "pad setup delivered pads for {} invocations, expected {count}",
            pads.len()
        )));
    }

    debug!("obtained pads");

    io.send(BatchQuery { id, queries }).await?;

    let BatchResponse {
        id: response_id,
        responses,
    } = io.expect_next().await?;

    if response_id != id {
        return Err(TransferError::WrongId(response_id, id).into());
    }

    if responses.len() != count {
        return Err(XotError::protocol(format!(
            "expected {count} responses, got {}",
            responses.len()
        )));
    }

    let outputs = receivers
        .into_iter()
        .zip(responses)
        .zip(pads)
        .map(|((receiver, response), pads)| -> Result<_, XotError> {
            let receiver = receiver?;
            let response = response.ok_or_else(XotError::rejected)?;

            Ok(V::finish(receiver, response, &pads.unwrap_or_default())?)
        })
        .collect();

    Ok(ReceiverOutput { id, outputs })
}
