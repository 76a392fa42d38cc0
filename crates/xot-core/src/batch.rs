//! Batch execution of independent invocations.
//!
//! A runner executes all five phases of `count` invocations in-process, with the pads delivered
//! through [`IdealPadSetup`]. Every invocation owns its pads, shares and buffers, and draws its
//! randomness from its own generators, which are seeded from the caller's generator before any
//! invocation executes. With the `rayon` feature the invocations run in parallel.

use rand::{CryptoRng, Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::{
    ideal::IdealPadSetup, one_of_n, priority, OneOfNConfig, PriorityConfig, SecretValue,
    TransferError,
};

/// Seeds of the sender's and the receiver's generators for one invocation.
type Seeds = ([u8; 32], [u8; 32]);

fn derive_seeds<R: Rng + CryptoRng + ?Sized>(rng: &mut R, count: usize) -> Vec<Seeds> {
    (0..count).map(|_| (rng.gen(), rng.gen())).collect()
}

fn check_batch(count: usize, messages: usize, selections: usize) -> Result<(), TransferError> {
    if messages != count || selections != count {
        return Err(TransferError::config(format!(
            "expected a batch of {count} invocations, got {messages} message sets and \
             {selections} selections"
        )));
    }

    Ok(())
}

/// Runs batches of 1-out-of-n OT.
#[derive(Debug, Clone)]
pub struct OneOfN {
    config: OneOfNConfig,
}

impl OneOfN {
    /// Creates a new runner.
    pub fn new(config: OneOfNConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OneOfNConfig {
        &self.config
    }

    /// Runs a batch of independent invocations.
    ///
    /// Returns an error if the batch does not contain `count` invocations, otherwise returns
    /// the outcome of every invocation.
    ///
    /// # Arguments
    ///
    /// * `rng` - The source of the per-invocation seeds.
    /// * `messages` - The sender's messages, one set per invocation.
    /// * `choices` - The receiver's index, one per invocation.
    pub fn run<R: Rng + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        messages: &[Vec<SecretValue>],
        choices: &[usize],
    ) -> Result<Vec<Result<SecretValue, TransferError>>, TransferError> {
        check_batch(self.config.count(), messages.len(), choices.len())?;

        let seeds = derive_seeds(rng, self.config.count());

        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;

                let outputs = messages
                    .par_iter()
                    .zip(choices.par_iter())
                    .zip(seeds.into_par_iter())
                    .map(|((messages, &idx), seeds)| self.invoke(messages, idx, seeds))
                    .collect();
            } else {
                let outputs = messages
                    .iter()
                    .zip(choices)
                    .zip(seeds)
                    .map(|((messages, &idx), seeds)| self.invoke(messages, idx, seeds))
                    .collect();
            }
        }

        Ok(outputs)
    }

    /// Runs a batch of invocations, returning the first error encountered.
    pub fn try_run<R: Rng + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        messages: &[Vec<SecretValue>],
        choices: &[usize],
    ) -> Result<Vec<SecretValue>, TransferError> {
        self.run(rng, messages, choices)?.into_iter().collect()
    }

    fn invoke(
        &self,
        messages: &[SecretValue],
        idx: usize,
        (sender_seed, receiver_seed): Seeds,
    ) -> Result<SecretValue, TransferError> {
        let mut sender_rng = ChaCha12Rng::from_seed(sender_seed);
        let mut receiver_rng = ChaCha12Rng::from_seed(receiver_seed);
        let mut pad_setup = IdealPadSetup::new();

        let sender = one_of_n::Sender::new(self.config.clone()).setup(&mut sender_rng);
        let (receiver, query) =
            one_of_n::Receiver::new(self.config.clone()).query(&mut receiver_rng, idx)?;
        let pads = pad_setup.deliver(sender.pads(), &[idx])?;

        let response = sender.respond(messages, query)?;

        receiver.filter(response)?.retrieve(&pads)
    }
}

/// Runs batches of priority OT.
#[derive(Debug, Clone)]
pub struct Priority {
    config: PriorityConfig,
}

impl Priority {
    /// Creates a new runner.
    pub fn new(config: PriorityConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PriorityConfig {
        &self.config
    }

    /// Runs a batch of independent invocations.
    ///
    /// Returns an error if the batch does not contain `count` invocations, otherwise returns
    /// the outcome of every invocation.
    ///
    /// # Arguments
    ///
    /// * `rng` - The source of the per-invocation seeds.
    /// * `messages` - The sender's messages, one set per invocation.
    /// * `priorities` - The receiver's ranked selection, one per invocation.
    pub fn run<R: Rng + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        messages: &[Vec<SecretValue>],
        priorities: &[Vec<usize>],
    ) -> Result<Vec<Result<Vec<SecretValue>, TransferError>>, TransferError> {
        check_batch(self.config.count(), messages.len(), priorities.len())?;

        let seeds = derive_seeds(rng, self.config.count());

        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;

                let outputs = messages
                    .par_iter()
                    .zip(priorities.par_iter())
                    .zip(seeds.into_par_iter())
                    .map(|((messages, priorities), seeds)| self.invoke(messages, priorities, seeds))
                    .collect();
            } else {
                let outputs = messages
                    .iter()
                    .zip(priorities)
                    .zip(seeds)
                    .map(|((messages, priorities), seeds)| self.invoke(messages, priorities, seeds))
                    .collect();
            }
        }

        Ok(outputs)
    }

    /// Runs a batch of invocations, returning the first error encountered.
    pub fn try_run<R: Rng + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        messages: &[Vec<SecretValue>],
        priorities: &[Vec<usize>],
    ) -> Result<Vec<Vec<SecretValue>>, TransferError> {
        self.run(rng, messages, priorities)?.into_iter().collect()
    }

    fn invoke(
        &self,
        messages: &[SecretValue],
        priorities: &[usize],
        (sender_seed, receiver_seed): Seeds,
    ) -> Result<Vec<SecretValue>, TransferError> {
        let mut sender_rng = ChaCha12Rng::from_seed(sender_seed);
        let mut receiver_rng = ChaCha12Rng::from_seed(receiver_seed);
        let mut pad_setup = IdealPadSetup::new();

        let sender = priority::Sender::new(self.config.clone()).setup(&mut sender_rng);
        let (receiver, query) =
            priority::Receiver::new(self.config.clone()).query(&mut receiver_rng, priorities)?;
        let pads = pad_setup.deliver(sender.pads(), priorities)?;

        let response = sender.respond(messages, query)?;

        receiver.filter(response)?.retrieve(&pads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{assert_one_of_n, assert_priority, random_messages, random_priorities};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_one_of_n_batch() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = OneOfNConfig::builder().n(16).count(10).build().unwrap();
        let runner = OneOfN::new(config);

        let messages: Vec<_> = (0..10).map(|_| random_messages(&mut rng, 16, 128)).collect();
        let choices: Vec<usize> = (0..10).map(|_| rng.gen_range(0..16)).collect();

        let received = runner.try_run(&mut rng, &messages, &choices).unwrap();

        assert_one_of_n(&messages, &choices, &received);
    }

    #[test]
    fn test_priority_batch() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = PriorityConfig::builder().n(12).t(4).count(6).build().unwrap();
        let runner = Priority::new(config);

        let messages: Vec<_> = (0..6).map(|_| random_messages(&mut rng, 12, 128)).collect();
        let priorities: Vec<_> = (0..6).map(|_| random_priorities(&mut rng, 12, 4)).collect();

        let received = runner.try_run(&mut rng, &messages, &priorities).unwrap();

        assert_priority(&messages, &priorities, &received);
    }

    #[test]
    fn test_invocations_are_independent() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = OneOfNConfig::builder().n(4).count(3).build().unwrap();
        let runner = OneOfN::new(config);

        let messages = vec![random_messages(&mut rng, 4, 128); 3];
        let choices = [1, 7, 2];

        let outputs = runner.run(&mut rng, &messages, &choices).unwrap();

        assert_eq!(outputs[0].as_ref().unwrap(), &messages[0][1]);
        assert_eq!(
            outputs[1].as_ref().unwrap_err(),
            &TransferError::Range { index: 7, bound: 4 }
        );
        assert_eq!(outputs[2].as_ref().unwrap(), &messages[2][2]);

        assert_eq!(
            runner.try_run(&mut rng, &messages, &choices).unwrap_err(),
            TransferError::Range { index: 7, bound: 4 }
        );
    }

    #[test]
    fn test_seeds_are_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let seeds = derive_seeds(&mut rng, 64);

        let mut all: Vec<[u8; 32]> = seeds.iter().flat_map(|&(s, r)| [s, r]).collect();
        all.sort_unstable();
        all.dedup();

        assert_eq!(all.len(), 128);
    }

    #[test]
    fn test_batch_size_mismatch() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = PriorityConfig::builder().n(4).t(2).count(2).build().unwrap();
        let runner = Priority::new(config);

        let messages = vec![random_messages(&mut rng, 4, 128)];
        let priorities = vec![vec![0, 1]];

        assert!(matches!(
            runner.run(&mut rng, &messages, &priorities),
            Err(TransferError::Configuration(_))
        ));
    }
}
