//! OT test utilities.

use rand::{CryptoRng, Rng};

use crate::SecretValue;

/// Generates `n` random messages of `bit_size` bits.
pub fn random_messages<R: Rng + CryptoRng + ?Sized>(
    rng: &mut R,
    n: usize,
    bit_size: usize,
) -> Vec<SecretValue> {
    (0..n).map(|_| SecretValue::random(rng, bit_size)).collect()
}

/// Generates `t` distinct random indices in `[0, n)`, in random order.
pub fn random_priorities<R: Rng + CryptoRng + ?Sized>(
    rng: &mut R,
    n: usize,
    t: usize,
) -> Vec<usize> {
    rand::seq::index::sample(rng, n, t).into_vec()
}

/// Asserts the correctness of 1-out-of-n oblivious transfer.
pub fn assert_one_of_n(messages: &[Vec<SecretValue>], choices: &[usize], received: &[SecretValue]) {
    assert_eq!(messages.len(), choices.len());
    assert_eq!(messages.len(), received.len());
    assert!(messages
        .iter()
        .zip(choices.iter().zip(received))
        .all(|(msgs, (&idx, received))| &msgs[idx] == received));
}

/// Asserts the correctness of ordered t-out-of-n oblivious transfer.
pub fn assert_priority(
    messages: &[Vec<SecretValue>],
    priorities: &[Vec<usize>],
    received: &[Vec<SecretValue>],
) {
    assert_eq!(messages.len(), priorities.len());
    assert_eq!(messages.len(), received.len());
    assert!(messages.iter().zip(priorities.iter().zip(received)).all(
        |(msgs, (priorities, received))| {
            priorities.len() == received.len()
                && priorities
                    .iter()
                    .zip(received)
                    .all(|(&p, received)| &msgs[p] == received)
        }
    ));
}
