//! Messages exchanged between the sender and the receiver.

use serde::{Deserialize, Serialize};

use crate::{permutation::Permutation, share::IndexShare, SecretValue, TransferId};

/// A 1-out-of-n query, the receiver's first index share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// The index share, controls the sender's swap network pass.
    pub share: IndexShare,
}

/// A priority query, the receiver's random permutation of the message positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationQuery {
    /// The permutation `w`.
    pub permutation: Permutation,
}

/// The sender's response, the pad-blinded messages in permuted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// The blinded messages.
    pub ciphertexts: Vec<SecretValue>,
}

/// The queries of a batch of invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchQuery<Q> {
    /// The transfer id.
    pub id: TransferId,
    /// One query per invocation, `None` if the receiver abandoned the invocation.
    pub queries: Vec<Option<Q>>,
}

/// The responses to a batch of queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// The transfer id of the batch query.
    pub id: TransferId,
    /// One response per invocation, `None` if no response was produced.
    pub responses: Vec<Option<Response>>,
}
