//! Low-level crate containing the core functionality of XOR-based oblivious transfer.
//!
//! Two protocols are implemented:
//!
//! - [`one_of_n`]: 1-out-of-n OT. The receiver secret-shares the bits of its index, and both
//!   parties run a binary swap network over the pad-blinded messages with their share.
//! - [`priority`]: ordered t-out-of-n OT. The receiver hides its ranked selection behind a
//!   uniformly random permutation of the message positions.
//!
//! Both follow the same five phases: setup, query generation, response generation, oblivious
//! filtering and retrieval. This crate contains no I/O, see the `xot` crate for the async roles.
//!
//! # ⚠️ Warning ⚠️
//!
//! The receiver learns its one-time pads through a setup functionality which is assumed to be
//! trusted, see [`ideal`]. Pads must never be reused across invocations.

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

pub mod batch;
pub mod config;
mod error;
pub mod ideal;
pub mod msgs;
pub mod one_of_n;
pub mod pad;
pub mod permutation;
pub mod priority;
pub mod share;
pub mod tbcs;
#[cfg(any(test, feature = "test-utils"))]
pub mod test;
mod value;

pub use config::{OneOfNConfig, OneOfNConfigBuilder, PriorityConfig, PriorityConfigBuilder};
pub use error::TransferError;
pub use pad::{PadVector, SelectedPads};
pub use value::SecretValue;

use serde::{Deserialize, Serialize};

/// A transfer identifier.
///
/// Multiple invocations may be batched together under the same transfer ID.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TransferId(u64);

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TransferId({})", self.0)
    }
}

impl TransferId {
    /// Returns the current transfer ID, incrementing `self` in-place.
    pub fn next_id(&mut self) -> Self {
        let id = *self;
        self.0 += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_id_increments() {
        let mut id = TransferId::default();

        assert_eq!(id.next_id(), TransferId(0));
        assert_eq!(id.next_id(), TransferId(1));
        assert_eq!(id, TransferId(2));
        assert_eq!(id.to_string(), "TransferId(2)");
    }
}
