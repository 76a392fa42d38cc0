//! Ideal pad setup functionality.
//!
//! The sender deposits the pads of a batch and returns immediately. The receiver waits until the
//! pads with its transfer id are available and is handed the ones at its selected positions.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use futures::channel::oneshot;
use xot_core::{ideal::IdealPadSetup, PadVector, SelectedPads, TransferError, TransferId};

use crate::{PadSetupReceiver, PadSetupSender, XotError};

type Positions = Vec<Option<Vec<usize>>>;
type Delivery = Result<Vec<Option<SelectedPads>>, TransferError>;

#[derive(Debug, Default)]
struct Shared {
    f: IdealPadSetup,
    pads: HashMap<TransferId, Vec<PadVector>>,
    waiting: HashMap<TransferId, (Positions, oneshot::Sender<Delivery>)>,
}

fn deliver(f: &mut IdealPadSetup, pads: Vec<PadVector>, positions: Positions) -> Delivery {
    if pads.len() != positions.len() {
        return Err(TransferError::Configuration(format!(
            "expected pads for {} invocations, got {}",
            positions.len(),
            pads.len()
        )));
    }

    pads.iter()
        .zip(positions)
        .map(|(pads, positions)| {
            positions
                .map(|positions| f.deliver(pads, &positions))
                .transpose()
        })
        .collect()
}

/// Returns an ideal pad setup sender and receiver.
pub fn ideal_pad_setup() -> (IdealPadSender, IdealPadReceiver) {
    let shared = Arc::new(Mutex::new(Shared::default()));

    (
        IdealPadSender(shared.clone()),
        IdealPadReceiver(shared),
    )
}

fn lock(shared: &Mutex<Shared>) -> Result<MutexGuard<'_, Shared>, XotError> {
    shared
        .lock()
        .map_err(|_| XotError::state("ideal pad setup is poisoned"))
}

/// Ideal pad setup sender.
#[derive(Debug, Clone)]
pub struct IdealPadSender(Arc<Mutex<Shared>>);

impl IdealPadSender {
    /// Returns the number of pads delivered to the receiver.
    pub fn delivered(&self) -> Result<usize, XotError> {
        Ok(lock(&self.0)?.f.delivered())
    }
}

#[async_trait]
impl<Io: Send> PadSetupSender<Io> for IdealPadSender {
    async fn provide(
        &mut self,
        _io: &mut Io,
        id: TransferId,
        pads: Vec<PadVector>,
    ) -> Result<(), XotError> {
        let mut shared = lock(&self.0)?;

        if let Some((positions, ret)) = shared.waiting.remove(&id) {
            let delivery = deliver(&mut shared.f, pads, positions);
            // The receiver may have given up.
            _ = ret.send(delivery);
        } else if shared.pads.insert(id, pads).is_some() {
            return Err(XotError::state(format!("pads for {id} were already provided")));
        }

        Ok(())
    }
}

/// Ideal pad setup receiver.
#[derive(Debug, Clone)]
pub struct IdealPadReceiver(Arc<Mutex<Shared>>);

#[async_trait]
impl<Io: Send> PadSetupReceiver<Io> for IdealPadReceiver {
    async fn obtain(
        &mut self,
        _io: &mut Io,
        id: TransferId,
        positions: Vec<Option<Vec<usize>>>,
    ) -> Result<Vec<Option<SelectedPads>>, XotError> {
        let receiver = {
            let mut shared = lock(&self.0)?;

            if let Some(pads) = shared.pads.remove(&id) {
                return Ok(deliver(&mut shared.f, pads, positions)?);
            }

            let (sender, receiver) = oneshot::channel();
            if shared.waiting.insert(id, (positions, sender)).is_some() {
                return Err(XotError::state(format!("pads for {id} were already requested")));
            }

            receiver
        };

        let delivery = receiver
            .await
            .map_err(|_| XotError::state("pad setup sender dropped the request"))?;

        Ok(delivery?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ideal_pad_setup() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (mut sender, mut receiver) = ideal_pad_setup();
        let id = TransferId::default();

        let pads = vec![
            PadVector::random(&mut rng, 4, 128),
            PadVector::random(&mut rng, 4, 128),
        ];

        let (mut io_sender, mut io_receiver) = ((), ());

        // The receiver registers first and waits for the pads.
        let (delivered, _) = block_on(async {
            futures::try_join!(
                PadSetupReceiver::obtain(
                    &mut receiver,
                    &mut io_receiver,
                    id,
                    vec![Some(vec![2]), None]
                ),
                PadSetupSender::provide(&mut sender, &mut io_sender, id, pads.clone()),
            )
        })
        .unwrap();

        assert_eq!(delivered.len(), 2);
        assert_eq!(
            delivered[0].as_ref().unwrap().get(2).unwrap(),
            &pads[0].as_slice()[2]
        );
        assert!(delivered[1].is_none());
        assert_eq!(sender.delivered().unwrap(), 1);
    }

    #[test]
    fn test_sender_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (mut sender, mut receiver) = ideal_pad_setup();
        let id = TransferId::default();

        let pads = vec![PadVector::random(&mut rng, 8, 64)];

        block_on(PadSetupSender::<()>::provide(
            &mut sender,
            &mut (),
            id,
            pads.clone(),
        ))
        .unwrap();

        let delivered = block_on(PadSetupReceiver::<()>::obtain(
            &mut receiver,
            &mut (),
            id,
            vec![Some(vec![7, 0])],
        ))
        .unwrap();

        let selected = delivered[0].as_ref().unwrap();
        assert_eq!(selected.get(7).unwrap(), &pads[0].as_slice()[7]);
        assert_eq!(selected.get(0).unwrap(), &pads[0].as_slice()[0]);
    }

    #[test]
    fn test_batch_size_mismatch() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (mut sender, mut receiver) = ideal_pad_setup();
        let id = TransferId::default();

        block_on(PadSetupSender::<()>::provide(
            &mut sender,
            &mut (),
            id,
            vec![PadVector::random(&mut rng, 2, 8)],
        ))
        .unwrap();

        let err = block_on(PadSetupReceiver::<()>::obtain(
            &mut receiver,
            &mut (),
            id,
            vec![None, None],
        ))
        .unwrap_err();

        assert!(matches!(
            err.as_core(),
            Some(TransferError::Configuration(_))
        ));
    }
}
